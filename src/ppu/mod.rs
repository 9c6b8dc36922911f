// PPU module - Picture Processing Unit (2C02) emulation
//
// Scanline/cycle state machine producing a 256×240 RGBA frame from the
// background layer. Sprites (OAM) are not rendered.
//
// Scanline numbering:
//
// ```text
// -1       pre-render (clears VBlank, reloads vertical scroll)
// 0-239    visible
// 240      post-render (idle)
// 241-260  VBlank (flag + optional NMI at 241, cycle 1)
// ```

mod constants;
mod memory;
mod registers;
mod rendering;

#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::rc::Weak;

use crate::bus::MemoryMappedDevice;
use crate::cartridge::Cartridge;
use crate::display::FrameBuffer;

use constants::{
    NAMETABLE_SIZE, PALETTE_SIZE, PATTERN_TABLE_SIZE, POWER_ON_FILL, PPU_REGISTER_MASK,
};
use rendering::BackgroundPipeline;

pub use constants::{CYCLES_PER_FRAME, CYCLES_PER_SCANLINE, PATTERN_TABLE_DIM, SCANLINES_PER_FRAME};
pub use registers::{Control, LoopyRegister, Mask, Status};

/// PPU structure representing the Picture Processing Unit state
pub struct Ppu {
    control: Control,
    mask: Mask,
    status: Status,

    /// Current VRAM address (v)
    vram_addr: LoopyRegister,
    /// Temporary VRAM address / scroll latch (t)
    tram_addr: LoopyRegister,
    /// Fine X scroll (x)
    fine_x: u8,
    /// First/second write toggle for $2005/$2006 (w)
    write_latch: bool,
    /// $2007 read buffer
    data_buffer: u8,

    name_tables: Box<[[u8; NAMETABLE_SIZE]; 2]>,
    pattern_tables: Box<[[u8; PATTERN_TABLE_SIZE]; 2]>,
    palette: [u8; PALETTE_SIZE],

    background: BackgroundPipeline,

    scanline: i16,
    cycle: u16,
    frame_complete: bool,
    nmi: bool,

    frame_buffer: FrameBuffer,

    /// Non-owning handle; the bus owns the cartridge
    cartridge: Weak<RefCell<Cartridge>>,
}

impl Ppu {
    /// Create a new PPU in its power-on state
    pub fn new() -> Self {
        Ppu {
            control: Control::default(),
            mask: Mask::default(),
            status: Status::default(),
            vram_addr: LoopyRegister::default(),
            tram_addr: LoopyRegister::default(),
            fine_x: 0,
            write_latch: false,
            data_buffer: 0,
            name_tables: Box::new([[POWER_ON_FILL; NAMETABLE_SIZE]; 2]),
            pattern_tables: Box::new([[POWER_ON_FILL; PATTERN_TABLE_SIZE]; 2]),
            palette: [0; PALETTE_SIZE],
            background: BackgroundPipeline::default(),
            scanline: 0,
            cycle: 0,
            frame_complete: false,
            nmi: false,
            frame_buffer: FrameBuffer::new(),
            cartridge: Weak::new(),
        }
    }

    /// Reset registers, scroll state and counters
    ///
    /// Nametable, pattern and palette memory keep their contents.
    pub fn reset(&mut self) {
        self.control = Control::default();
        self.mask = Mask::default();
        self.status = Status::default();
        self.vram_addr = LoopyRegister::default();
        self.tram_addr = LoopyRegister::default();
        self.fine_x = 0;
        self.write_latch = false;
        self.data_buffer = 0;
        self.background = BackgroundPipeline::default();
        self.scanline = 0;
        self.cycle = 0;
        self.frame_complete = false;
        self.nmi = false;
    }

    /// Attach the cartridge whose CHR and mirroring the PPU should use
    pub fn connect_cartridge(&mut self, cartridge: Weak<RefCell<Cartridge>>) {
        self.cartridge = cartridge;
    }

    pub fn disconnect_cartridge(&mut self) {
        self.cartridge = Weak::new();
    }

    /// Whether the NMI output line is raised
    pub fn nmi_pending(&self) -> bool {
        self.nmi
    }

    pub fn clear_nmi(&mut self) {
        self.nmi = false;
    }

    /// Whether a frame has finished since the last `clear_frame_complete`
    pub fn frame_complete(&self) -> bool {
        self.frame_complete
    }

    pub fn clear_frame_complete(&mut self) {
        self.frame_complete = false;
    }

    /// Current scanline (-1 to 260)
    pub fn scanline(&self) -> i16 {
        self.scanline
    }

    /// Current cycle within the scanline (0 to 340)
    pub fn cycle(&self) -> u16 {
        self.cycle
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn control(&self) -> Control {
        self.control
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Current VRAM address (v)
    pub fn vram_addr(&self) -> LoopyRegister {
        self.vram_addr
    }

    /// Scroll latch (t)
    pub fn tram_addr(&self) -> LoopyRegister {
        self.tram_addr
    }

    pub fn fine_x(&self) -> u8 {
        self.fine_x
    }

    pub fn write_latch(&self) -> bool {
        self.write_latch
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMappedDevice for Ppu {
    fn read(&mut self, addr: u16) -> u8 {
        self.read_register(addr & PPU_REGISTER_MASK)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.write_register(addr & PPU_REGISTER_MASK, data);
    }

    fn peek(&self, addr: u16) -> u8 {
        self.peek_register(addr & PPU_REGISTER_MASK)
    }
}
