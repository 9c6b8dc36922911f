// Bus module - CPU address decoding and the master clock
//
// # NES Memory Map (CPU Address Space)
//
// ```text
// $0000-$07FF: 2KB Internal RAM
// $0800-$1FFF: Mirrors of RAM (3 times)
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// $4020-$FFFF: Cartridge space (mapper-defined)
// ```
//
// Decoding order is cartridge first, then RAM, then the PPU window. Anything
// nobody claims reads as 0 and swallows writes.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::ppu::Ppu;
use crate::ram::Ram;

/// Trait for memory-mapped components
///
/// Implemented by every device the CPU can address: the RAM, the PPU register
/// window and the decoded CPU bus as a whole.
pub trait MemoryMappedDevice {
    /// Read a byte from the device
    ///
    /// Some devices have side effects on read (PPUSTATUS clears vblank, PPUDATA
    /// advances its address), so this method takes &mut self.
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to the device
    fn write(&mut self, addr: u16, data: u8);

    /// Read a byte without any side effects
    ///
    /// Used by the disassembler and debug snapshots.
    fn peek(&self, addr: u16) -> u8;
}

/// Undecoded 64KB memory
///
/// Every address is plain RAM. Lets the CPU run in isolation from the PPU
/// and the cartridge, e.g. for instruction tests and benchmarks.
#[derive(Clone)]
pub struct FlatMemory {
    memory: Box<[u8; 0x10000]>,
}

impl FlatMemory {
    /// Create a zero-filled 64KB memory
    pub fn new() -> Self {
        FlatMemory {
            memory: Box::new([0; 0x10000]),
        }
    }

    /// Copy `bytes` into memory starting at `addr`, wrapping at $FFFF
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.memory[addr.wrapping_add(i as u16) as usize] = byte;
        }
    }

    /// Store a little-endian vector (e.g. reset vector at $FFFC)
    pub fn set_vector(&mut self, vector: u16, target: u16) {
        self.load(vector, &target.to_le_bytes());
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMappedDevice for FlatMemory {
    fn read(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.memory[addr as usize] = data;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }
}

/// The CPU's view of the system: RAM, PPU registers and cartridge space
pub struct CpuBus {
    ram: Ram,
    ppu: Ppu,
    cartridge: Option<Rc<RefCell<Cartridge>>>,
}

impl CpuBus {
    /// Create a bus with zeroed RAM, a powered-on PPU and no cartridge
    pub fn new() -> Self {
        CpuBus {
            ram: Ram::new(),
            ppu: Ppu::new(),
            cartridge: None,
        }
    }

    /// Internal RAM
    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    /// PPU
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// PPU (mutable)
    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    /// The inserted cartridge, if any
    pub fn cartridge(&self) -> Option<&Rc<RefCell<Cartridge>>> {
        self.cartridge.as_ref()
    }
}

impl Default for CpuBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMappedDevice for CpuBus {
    fn read(&mut self, addr: u16) -> u8 {
        if let Some(cartridge) = &self.cartridge {
            if let Some(data) = cartridge.borrow().cpu_read(addr) {
                return data;
            }
        }

        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            0x2000..=0x3FFF => self.ppu.read(addr),
            _ => 0,
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        if let Some(cartridge) = &self.cartridge {
            if cartridge.borrow_mut().cpu_write(addr, data) {
                return;
            }
        }

        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, data),
            0x2000..=0x3FFF => self.ppu.write(addr, data),
            _ => {}
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        if let Some(cartridge) = &self.cartridge {
            if let Some(data) = cartridge.borrow().cpu_read(addr) {
                return data;
            }
        }

        match addr {
            0x0000..=0x1FFF => self.ram.peek(addr),
            0x2000..=0x3FFF => self.ppu.peek(addr),
            _ => 0,
        }
    }
}

/// The whole console: CPU, PPU, RAM and cartridge driven by one master clock
///
/// # Example
/// ```
/// use nes_core::Bus;
///
/// let mut bus = Bus::new();
/// bus.cpu_write(0x0000, 0x42);
/// assert_eq!(bus.cpu_read(0x0800), 0x42);
/// ```
pub struct Bus {
    cpu: Cpu,
    memory: CpuBus,
    system_clock_counter: u64,
}

impl Bus {
    /// Create a powered-on console with no cartridge
    pub fn new() -> Self {
        Bus {
            cpu: Cpu::new(),
            memory: CpuBus::new(),
            system_clock_counter: 0,
        }
    }

    /// Insert a cartridge
    ///
    /// The bus keeps ownership; the PPU receives a non-owning handle to the
    /// same image. Any previously inserted cartridge is dropped.
    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        let cartridge = Rc::new(RefCell::new(cartridge));
        self.memory.ppu.connect_cartridge(Rc::downgrade(&cartridge));
        self.memory.cartridge = Some(cartridge);
    }

    /// Remove the cartridge, returning the bus to open-bus cartridge space
    pub fn remove_cartridge(&mut self) {
        self.memory.cartridge = None;
        self.memory.ppu.disconnect_cartridge();
    }

    /// Reset the cartridge, then the CPU, then the PPU, and zero the tick counter
    pub fn reset(&mut self) {
        if let Some(cartridge) = &self.memory.cartridge {
            cartridge.borrow_mut().reset();
        }
        self.cpu.reset(&mut self.memory);
        self.memory.ppu.reset();
        self.system_clock_counter = 0;
    }

    /// Advance the master clock by one PPU cycle
    ///
    /// The PPU ticks every call. The CPU ticks whenever the counter is not a
    /// multiple of 3. A raised PPU NMI line is cleared and delivered to the CPU.
    pub fn clock(&mut self) {
        self.memory.ppu.clock();

        if self.system_clock_counter % 3 != 0 {
            self.cpu.clock(&mut self.memory);
        }

        if self.memory.ppu.nmi_pending() {
            self.memory.ppu.clear_nmi();
            self.cpu.nmi(&mut self.memory);
        }

        self.system_clock_counter = self.system_clock_counter.wrapping_add(1);
    }

    /// Read a byte from the CPU address space (with side effects)
    pub fn cpu_read(&mut self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    /// Write a byte to the CPU address space
    pub fn cpu_write(&mut self, addr: u16, data: u8) {
        self.memory.write(addr, data);
    }

    /// Disassemble `start..end` of the CPU address space without side effects
    pub fn disassemble(&self, start: u16, end: u16) -> BTreeMap<u16, String> {
        self.cpu.disassemble(&self.memory, start, end)
    }

    /// Number of master clock ticks since the last reset
    pub fn system_clock_counter(&self) -> u64 {
        self.system_clock_counter
    }

    /// CPU
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// CPU (mutable)
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// PPU
    pub fn ppu(&self) -> &Ppu {
        &self.memory.ppu
    }

    /// PPU (mutable)
    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.memory.ppu
    }

    /// CPU address space
    pub fn memory(&self) -> &CpuBus {
        &self.memory
    }

    /// CPU and its address space, borrowed together for stepping the CPU alone
    pub fn split_mut(&mut self) -> (&mut Cpu, &mut CpuBus) {
        (&mut self.cpu, &mut self.memory)
    }

    /// The inserted cartridge, if any
    pub fn cartridge(&self) -> Option<&Rc<RefCell<Cartridge>>> {
        self.memory.cartridge.as_ref()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
