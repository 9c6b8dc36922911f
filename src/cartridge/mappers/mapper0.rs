// Mapper 0 (NROM) - Fixed PRG/CHR layout with no bank switching
//
// Memory Layout:
// - CPU $8000-$BFFF: First 16KB of PRG-ROM
// - CPU $C000-$FFFF: Last 16KB of PRG-ROM (mirror of the first bank on NROM-128)
// - PPU $0000-$1FFF: 8KB CHR-ROM, or CHR-RAM when the header declares no CHR banks

/// Mapper 0 implementation (NROM)
///
/// Only translates addresses; the ROM bytes themselves live in the cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapper0 {
    prg_banks: u8,
    chr_banks: u8,
}

impl Mapper0 {
    /// Create a new NROM mapper for the given bank counts
    ///
    /// # Arguments
    /// * `prg_banks` - Number of 16KB PRG-ROM banks declared in the header
    /// * `chr_banks` - Number of 8KB CHR-ROM banks declared in the header (0 means CHR-RAM)
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        Mapper0 {
            prg_banks,
            chr_banks,
        }
    }

    /// Mask applied to CPU addresses: 32KB window for NROM-256, 16KB mirror for NROM-128
    fn prg_mask(&self) -> u16 {
        if self.prg_banks > 1 {
            0x7FFF
        } else {
            0x3FFF
        }
    }

    /// Translate a CPU read address into a PRG-ROM offset
    pub fn cpu_map_read(&self, addr: u16) -> Option<usize> {
        match addr {
            0x8000..=0xFFFF => Some((addr & self.prg_mask()) as usize),
            _ => None,
        }
    }

    /// Translate a CPU write address into a PRG-ROM offset
    pub fn cpu_map_write(&self, addr: u16) -> Option<usize> {
        self.cpu_map_read(addr)
    }

    /// Translate a PPU read address into a CHR offset
    pub fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF => Some(addr as usize),
            _ => None,
        }
    }

    /// Translate a PPU write address into a CHR offset
    ///
    /// Writes are only accepted when the board carries CHR-RAM.
    pub fn ppu_map_write(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF if self.chr_banks == 0 => Some(addr as usize),
            _ => None,
        }
    }

    /// NROM has no registers to reset
    pub fn reset(&mut self) {}
}
