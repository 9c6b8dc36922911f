// CPU module - 6502 processor implementation
//
// The CPU is clocked one cycle at a time. The whole instruction executes on
// the cycle it is fetched; the remaining cycles of its budget are spent idle
// so that the CPU stays in lock-step with the PPU.

mod addressing;
mod instructions;
pub mod opcodes;

use std::collections::BTreeMap;

use crate::bus::MemoryMappedDevice;
use crate::debug::disassembler;

pub use addressing::AddressingMode;
pub use opcodes::{Instruction, Operation, OPCODE_TABLE};

/// Processor Status Flags (P register)
///
/// Bit layout:
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  -  B  D  I  Z  C
/// ```
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001; // Bit 0: C
    pub const ZERO: u8 = 0b0000_0010; // Bit 1: Z
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100; // Bit 2: I
    pub const DECIMAL: u8 = 0b0000_1000; // Bit 3: D (unused in NES)
    pub const BREAK: u8 = 0b0001_0000; // Bit 4: B
    pub const UNUSED: u8 = 0b0010_0000; // Bit 5: - (always 1)
    pub const OVERFLOW: u8 = 0b0100_0000; // Bit 6: V
    pub const NEGATIVE: u8 = 0b1000_0000; // Bit 7: N
}

/// Base address of the hardware stack page
pub const STACK_BASE: u16 = 0x0100;

/// NMI vector ($FFFA-$FFFB)
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector ($FFFC-$FFFD)
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector ($FFFE-$FFFF)
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// CPU structure representing the 6502 processor state
#[derive(Debug, Clone)]
pub struct Cpu {
    // Registers
    pub a: u8,      // Accumulator
    pub x: u8,      // Index Register X
    pub y: u8,      // Index Register Y
    pub sp: u8,     // Stack Pointer
    pub pc: u16,    // Program Counter
    pub status: u8, // Processor Status flags

    /// Cycles left before the in-flight instruction retires
    pub cycles: u8,

    /// Clock calls since the last reset
    total_cycles: u64,

    // Decode latches for the in-flight instruction
    opcode: u8,
    mode: AddressingMode,
    fetched: u8,
    addr_abs: u16,
    addr_rel: u16,
}

impl Cpu {
    /// Create a new CPU in its power-on state
    ///
    /// Registers are cleared, SP is 0xFD and only the unused flag is set.
    /// PC stays 0 until [`Cpu::reset`] loads the reset vector.
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: flags::UNUSED,
            cycles: 0,
            total_cycles: 0,
            opcode: 0,
            mode: AddressingMode::Implied,
            fetched: 0,
            addr_abs: 0,
            addr_rel: 0,
        }
    }

    /// Reset the CPU
    ///
    /// Loads PC from the reset vector ($FFFC low, $FFFD high), clears A, X
    /// and Y, sets SP to 0xFD and the status to just the unused bit. The
    /// reset sequence itself takes 8 cycles.
    pub fn reset(&mut self, bus: &mut impl MemoryMappedDevice) {
        self.pc = read_word(bus, RESET_VECTOR);

        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = flags::UNUSED;

        self.fetched = 0;
        self.addr_abs = 0;
        self.addr_rel = 0;
        self.mode = AddressingMode::Implied;

        self.cycles = 8;
        self.total_cycles = 0;
    }

    /// Advance the CPU by one clock cycle
    ///
    /// When the previous instruction has used up its cycle budget, the next
    /// opcode is fetched, decoded and executed in full. Its budget becomes the
    /// table's base cycles, plus one when both the addressing mode and the
    /// operation report a page-crossing penalty.
    pub fn clock(&mut self, bus: &mut impl MemoryMappedDevice) {
        if self.cycles == 0 {
            self.opcode = bus.read(self.pc);
            self.pc = self.pc.wrapping_add(1);
            self.set_flag(flags::UNUSED);

            let instruction = &OPCODE_TABLE[self.opcode as usize];
            self.mode = instruction.mode;
            self.cycles = instruction.cycles;

            let mode_extra = self.resolve_address(instruction.mode, bus);
            let operation_extra = self.execute(instruction.operation, bus);
            if mode_extra && operation_extra {
                self.cycles += 1;
            }

            self.set_flag(flags::UNUSED);
        }

        self.cycles = self.cycles.saturating_sub(1);
        self.total_cycles = self.total_cycles.wrapping_add(1);
    }

    /// Whether the in-flight instruction has retired
    pub fn complete(&self) -> bool {
        self.cycles == 0
    }

    /// Clock until the current instruction retires
    ///
    /// If the CPU is between instructions, this executes exactly one
    /// instruction. Returns the number of cycles spent.
    pub fn step(&mut self, bus: &mut impl MemoryMappedDevice) -> u64 {
        let start = self.total_cycles;
        loop {
            self.clock(bus);
            if self.complete() {
                break;
            }
        }
        self.total_cycles.wrapping_sub(start)
    }

    /// Clock calls since the last reset
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    // ========================================
    // Interrupts
    // ========================================

    /// Interrupt request
    ///
    /// Ignored while the interrupt disable flag is set. Otherwise pushes PC
    /// and status and jumps through $FFFE, taking 7 cycles.
    pub fn irq(&mut self, bus: &mut impl MemoryMappedDevice) {
        if self.get_interrupt_disable() {
            return;
        }
        self.interrupt(bus, IRQ_VECTOR);
        self.cycles = 7;
    }

    /// Non-maskable interrupt
    ///
    /// Always taken. Pushes PC and status and jumps through $FFFA, taking
    /// 8 cycles.
    pub fn nmi(&mut self, bus: &mut impl MemoryMappedDevice) {
        self.interrupt(bus, NMI_VECTOR);
        self.cycles = 8;
    }

    fn interrupt(&mut self, bus: &mut impl MemoryMappedDevice, vector: u16) {
        self.push_word(bus, self.pc);

        self.clear_flag(flags::BREAK);
        self.set_flag(flags::UNUSED);
        self.push(bus, self.status);
        self.set_flag(flags::INTERRUPT_DISABLE);

        self.pc = read_word(bus, vector);
    }

    // ========================================
    // Operand and Stack Helpers
    // ========================================

    /// Fetch the operand of the in-flight instruction
    ///
    /// Reads the latched effective address, except in implied and
    /// accumulator modes where the latched value is used as is.
    pub(crate) fn fetch(&mut self, bus: &mut impl MemoryMappedDevice) -> u8 {
        if !matches!(
            self.mode,
            AddressingMode::Implied | AddressingMode::Accumulator
        ) {
            self.fetched = bus.read(self.addr_abs);
        }
        self.fetched
    }

    /// Push a byte onto the stack page
    pub(crate) fn push(&mut self, bus: &mut impl MemoryMappedDevice, value: u8) {
        bus.write(STACK_BASE + self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pull a byte from the stack page
    pub(crate) fn pull(&mut self, bus: &mut impl MemoryMappedDevice) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE + self.sp as u16)
    }

    /// Push a word, high byte first
    pub(crate) fn push_word(&mut self, bus: &mut impl MemoryMappedDevice, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    /// Pull a word, low byte first
    pub(crate) fn pull_word(&mut self, bus: &mut impl MemoryMappedDevice) -> u16 {
        let lo = self.pull(bus) as u16;
        let hi = self.pull(bus) as u16;
        (hi << 8) | lo
    }

    /// Disassemble `start..end` of `bus` without side effects
    pub fn disassemble(
        &self,
        bus: &impl MemoryMappedDevice,
        start: u16,
        end: u16,
    ) -> BTreeMap<u16, String> {
        disassembler::disassemble(bus, start, end)
    }

    // ========================================
    // Status Flag Manipulation Methods
    // ========================================

    /// Get the value of a specific flag
    #[inline]
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    /// Set a specific flag to 1
    #[inline]
    pub fn set_flag(&mut self, flag: u8) {
        self.status |= flag;
    }

    /// Clear a specific flag (set to 0)
    #[inline]
    pub fn clear_flag(&mut self, flag: u8) {
        self.status &= !flag;
    }

    /// Update a flag based on a condition
    #[inline]
    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set_flag(flag);
        } else {
            self.clear_flag(flag);
        }
    }

    // ========================================
    // Individual Flag Accessors
    // ========================================

    #[inline]
    pub fn get_carry(&self) -> bool {
        self.get_flag(flags::CARRY)
    }

    #[inline]
    pub fn get_zero(&self) -> bool {
        self.get_flag(flags::ZERO)
    }

    #[inline]
    pub fn get_interrupt_disable(&self) -> bool {
        self.get_flag(flags::INTERRUPT_DISABLE)
    }

    #[inline]
    pub fn get_decimal(&self) -> bool {
        self.get_flag(flags::DECIMAL)
    }

    #[inline]
    pub fn get_break(&self) -> bool {
        self.get_flag(flags::BREAK)
    }

    #[inline]
    pub fn get_overflow(&self) -> bool {
        self.get_flag(flags::OVERFLOW)
    }

    #[inline]
    pub fn get_negative(&self) -> bool {
        self.get_flag(flags::NEGATIVE)
    }

    #[inline]
    pub fn set_carry(&mut self, value: bool) {
        self.update_flag(flags::CARRY, value);
    }

    #[inline]
    pub fn set_zero(&mut self, value: bool) {
        self.update_flag(flags::ZERO, value);
    }

    #[inline]
    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.update_flag(flags::INTERRUPT_DISABLE, value);
    }

    #[inline]
    pub fn set_decimal(&mut self, value: bool) {
        self.update_flag(flags::DECIMAL, value);
    }

    #[inline]
    pub fn set_overflow(&mut self, value: bool) {
        self.update_flag(flags::OVERFLOW, value);
    }

    #[inline]
    pub fn set_negative(&mut self, value: bool) {
        self.update_flag(flags::NEGATIVE, value);
    }

    /// Update Zero and Negative flags based on a value
    #[inline]
    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_zero(value == 0);
        self.set_negative((value & 0x80) != 0);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a little-endian word
fn read_word(bus: &mut impl MemoryMappedDevice, addr: u16) -> u16 {
    let lo = bus.read(addr) as u16;
    let hi = bus.read(addr.wrapping_add(1)) as u16;
    (hi << 8) | lo
}
