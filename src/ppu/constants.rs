// PPU constants

/// PPU register window mask
///
/// The 8 registers at $2000-$2007 repeat every 8 bytes up to $3FFF.
pub(super) const PPU_REGISTER_MASK: u16 = 0x0007;

/// PPU address space is 14 bits wide
pub(super) const PPU_ADDRESS_MASK: u16 = 0x3FFF;

/// Size of one physical nametable in bytes (1KB)
pub(super) const NAMETABLE_SIZE: usize = 1024;

/// Size of one internal pattern table in bytes (4KB)
pub(super) const PATTERN_TABLE_SIZE: usize = 4096;

/// Size of palette RAM in bytes
pub(super) const PALETTE_SIZE: usize = 32;

/// Start of nametable space
pub(super) const NAMETABLE_BASE: u16 = 0x2000;

/// Start of attribute table within nametable 0
pub(super) const ATTRIBUTE_TABLE_BASE: u16 = 0x23C0;

/// Start of palette space
pub(super) const PALETTE_BASE: u16 = 0x3F00;

/// Value nametables and internal pattern tables hold at power-on
pub(super) const POWER_ON_FILL: u8 = 0x80;

/// Pattern table viewer edge length in pixels (16 tiles of 8 pixels)
pub const PATTERN_TABLE_DIM: usize = 128;

// ========================================
// PPU Timing Constants (NTSC)
// ========================================

/// Number of PPU cycles per scanline
pub const CYCLES_PER_SCANLINE: u16 = 341;

/// Number of scanlines per frame, pre-render line included
pub const SCANLINES_PER_FRAME: u16 = 262;

/// Total PPU cycles per frame
/// 341 cycles/scanline × 262 scanlines = 89,342 cycles
pub const CYCLES_PER_FRAME: u32 = (CYCLES_PER_SCANLINE as u32) * (SCANLINES_PER_FRAME as u32);

/// Pre-render scanline
pub(super) const PRERENDER_SCANLINE: i16 = -1;

/// Last visible scanline
pub(super) const LAST_VISIBLE_SCANLINE: i16 = 239;

/// First VBlank scanline
pub(super) const VBLANK_SCANLINE: i16 = 241;

/// Last scanline before wrapping to the pre-render line
pub(super) const LAST_SCANLINE: i16 = 260;
