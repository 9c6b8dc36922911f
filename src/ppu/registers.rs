// PPU register handling
//
// The control, mask, status and loopy registers are plain integers with
// named bit masks. Field layout matches the hardware exactly:
//
// ```text
// loopy: yyy NN YYYYY XXXXX
//        ||| || ||||| +++++-- coarse X scroll
//        ||| || +++++-------- coarse Y scroll
//        ||| ++-------------- nametable select (X, Y)
//        +++----------------- fine Y scroll
// ```

use super::Ppu;

/// PPUCTRL ($2000)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Control(u8);

impl Control {
    pub const NAMETABLE_X: u8 = 0x01;
    pub const NAMETABLE_Y: u8 = 0x02;
    pub const INCREMENT_MODE: u8 = 0x04;
    pub const SPRITE_PATTERN: u8 = 0x08;
    pub const BACKGROUND_PATTERN: u8 = 0x10;
    pub const SPRITE_SIZE: u8 = 0x20;
    pub const SLAVE_MODE: u8 = 0x40;
    pub const GENERATE_NMI: u8 = 0x80;

    pub fn from_bits(bits: u8) -> Self {
        Control(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    pub fn nametable_x(self) -> u8 {
        self.0 & Self::NAMETABLE_X
    }

    pub fn nametable_y(self) -> u8 {
        (self.0 & Self::NAMETABLE_Y) >> 1
    }

    /// VRAM address increment per $2007 access: 1 (across) or 32 (down)
    pub fn increment(self) -> u16 {
        if self.contains(Self::INCREMENT_MODE) {
            32
        } else {
            1
        }
    }

    pub fn background_pattern_base(self) -> u16 {
        if self.contains(Self::BACKGROUND_PATTERN) {
            0x1000
        } else {
            0x0000
        }
    }

    pub fn generate_nmi(self) -> bool {
        self.contains(Self::GENERATE_NMI)
    }
}

/// PPUMASK ($2001)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mask(u8);

impl Mask {
    pub const GREYSCALE: u8 = 0x01;
    pub const SHOW_BACKGROUND_LEFT: u8 = 0x02;
    pub const SHOW_SPRITES_LEFT: u8 = 0x04;
    pub const SHOW_BACKGROUND: u8 = 0x08;
    pub const SHOW_SPRITES: u8 = 0x10;
    pub const EMPHASIZE_RED: u8 = 0x20;
    pub const EMPHASIZE_GREEN: u8 = 0x40;
    pub const EMPHASIZE_BLUE: u8 = 0x80;

    pub fn from_bits(bits: u8) -> Self {
        Mask(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    pub fn greyscale(self) -> bool {
        self.contains(Self::GREYSCALE)
    }

    pub fn show_background(self) -> bool {
        self.contains(Self::SHOW_BACKGROUND)
    }

    pub fn show_sprites(self) -> bool {
        self.contains(Self::SHOW_SPRITES)
    }

    /// Scroll counters only move while either layer is enabled
    pub fn rendering_enabled(self) -> bool {
        self.contains(Self::SHOW_BACKGROUND | Self::SHOW_SPRITES)
    }
}

/// PPUSTATUS ($2002)
///
/// Only the top three bits are driven; reads fill the low five bits from the
/// data buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    pub const SPRITE_OVERFLOW: u8 = 0x20;
    pub const SPRITE_ZERO_HIT: u8 = 0x40;
    pub const VBLANK: u8 = 0x80;

    /// Bits driven by the status register itself
    pub const DRIVEN: u8 = 0xE0;

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    pub fn vblank(self) -> bool {
        self.contains(Self::VBLANK)
    }

    pub fn set_vblank(&mut self, value: bool) {
        if value {
            self.0 |= Self::VBLANK;
        } else {
            self.0 &= !Self::VBLANK;
        }
    }
}

/// Loopy scroll/address register (15 bits)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopyRegister(u16);

impl LoopyRegister {
    const MASK: u16 = 0x7FFF;

    const COARSE_X_SHIFT: u16 = 0;
    const COARSE_Y_SHIFT: u16 = 5;
    const NAMETABLE_X_SHIFT: u16 = 10;
    const NAMETABLE_Y_SHIFT: u16 = 11;
    const FINE_Y_SHIFT: u16 = 12;

    pub fn new(bits: u16) -> Self {
        LoopyRegister(bits & Self::MASK)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn set_bits(&mut self, bits: u16) {
        self.0 = bits & Self::MASK;
    }

    fn field(self, shift: u16, width: u16) -> u8 {
        ((self.0 >> shift) & ((1 << width) - 1)) as u8
    }

    fn set_field(&mut self, shift: u16, width: u16, value: u8) {
        let mask = ((1 << width) - 1) << shift;
        self.0 = ((self.0 & !mask) | (((value as u16) << shift) & mask)) & Self::MASK;
    }

    pub fn coarse_x(self) -> u8 {
        self.field(Self::COARSE_X_SHIFT, 5)
    }

    pub fn set_coarse_x(&mut self, value: u8) {
        self.set_field(Self::COARSE_X_SHIFT, 5, value);
    }

    pub fn coarse_y(self) -> u8 {
        self.field(Self::COARSE_Y_SHIFT, 5)
    }

    pub fn set_coarse_y(&mut self, value: u8) {
        self.set_field(Self::COARSE_Y_SHIFT, 5, value);
    }

    pub fn nametable_x(self) -> u8 {
        self.field(Self::NAMETABLE_X_SHIFT, 1)
    }

    pub fn set_nametable_x(&mut self, value: u8) {
        self.set_field(Self::NAMETABLE_X_SHIFT, 1, value);
    }

    pub fn nametable_y(self) -> u8 {
        self.field(Self::NAMETABLE_Y_SHIFT, 1)
    }

    pub fn set_nametable_y(&mut self, value: u8) {
        self.set_field(Self::NAMETABLE_Y_SHIFT, 1, value);
    }

    pub fn fine_y(self) -> u8 {
        self.field(Self::FINE_Y_SHIFT, 3)
    }

    pub fn set_fine_y(&mut self, value: u8) {
        self.set_field(Self::FINE_Y_SHIFT, 3, value);
    }

    /// Advance by `step`, wrapping within 15 bits
    pub fn increment(&mut self, step: u16) {
        self.0 = self.0.wrapping_add(step) & Self::MASK;
    }
}

impl Ppu {
    /// Read from a PPU register
    ///
    /// - PPUSTATUS ($2002): top three status bits over the stale buffer,
    ///   clears VBlank and the write latch
    /// - PPUDATA ($2007): buffered by one read, except palette space which
    ///   answers immediately
    /// - Everything else reads as 0
    pub(super) fn read_register(&mut self, register: u16) -> u8 {
        match register {
            2 => {
                let data = self.status_read_value();
                self.status.set_vblank(false);
                self.write_latch = false;
                data
            }
            7 => {
                let addr = self.vram_addr.bits();
                let mut data = self.data_buffer;
                self.data_buffer = self.ppu_read(addr);

                if Self::is_palette_addr(addr) {
                    data = self.data_buffer;
                }

                self.vram_addr.increment(self.control.increment());
                data
            }
            // Write-only ports, plus OAM which is not wired up
            _ => 0,
        }
    }

    /// Side-effect free counterpart of `read_register`
    pub(super) fn peek_register(&self, register: u16) -> u8 {
        match register {
            2 => self.status_read_value(),
            7 => {
                let addr = self.vram_addr.bits();
                if Self::is_palette_addr(addr) {
                    self.ppu_read(addr)
                } else {
                    self.data_buffer
                }
            }
            _ => 0,
        }
    }

    fn status_read_value(&self) -> u8 {
        (self.status.bits() & Status::DRIVEN) | (self.data_buffer & !Status::DRIVEN)
    }

    /// Write to a PPU register
    ///
    /// - PPUCTRL ($2000): stores control flags, copies nametable select into t
    /// - PPUMASK ($2001): stores mask flags
    /// - PPUSCROLL ($2005): x then y, gated by the write latch
    /// - PPUADDR ($2006): high then low byte; the second write copies t to v
    /// - PPUDATA ($2007): writes at v and advances it
    /// - PPUSTATUS and the OAM ports ignore writes
    pub(super) fn write_register(&mut self, register: u16, data: u8) {
        match register {
            0 => {
                self.control = Control::from_bits(data);
                self.tram_addr.set_nametable_x(self.control.nametable_x());
                self.tram_addr.set_nametable_y(self.control.nametable_y());
            }
            1 => {
                self.mask = Mask::from_bits(data);
            }
            5 => {
                if !self.write_latch {
                    // t: ....... ...ABCDE <- d: ABCDE...
                    // x:              FGH <- d: .....FGH
                    self.fine_x = data & 0x07;
                    self.tram_addr.set_coarse_x(data >> 3);
                    self.write_latch = true;
                } else {
                    // t: FGH..AB CDE..... <- d: ABCDEFGH
                    self.tram_addr.set_fine_y(data & 0x07);
                    self.tram_addr.set_coarse_y(data >> 3);
                    self.write_latch = false;
                }
            }
            6 => {
                if !self.write_latch {
                    // t: .CDEFGH ........ <- d: ..CDEFGH
                    let t = (((data & 0x3F) as u16) << 8) | (self.tram_addr.bits() & 0x00FF);
                    self.tram_addr.set_bits(t);
                    self.write_latch = true;
                } else {
                    // t: ....... ABCDEFGH <- d: ABCDEFGH, then v = t
                    let t = (self.tram_addr.bits() & 0xFF00) | data as u16;
                    self.tram_addr.set_bits(t);
                    self.vram_addr = self.tram_addr;
                    self.write_latch = false;
                }
            }
            7 => {
                self.ppu_write(self.vram_addr.bits(), data);
                self.vram_addr.increment(self.control.increment());
            }
            _ => {}
        }
    }
}
