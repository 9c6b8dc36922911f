// Mappers module - Address translation strategies for cartridge boards
//
// Each board is one variant of the closed `Mapper` enum. Adding a board means
// adding a variant here; the bus and the chip engines only ever see `Mapper`.

mod mapper0;

pub use mapper0::Mapper0;

use thiserror::Error;

/// Error type for mapper creation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    /// The requested mapper number is not supported
    #[error("mapper {0} is not supported")]
    UnsupportedMapper(u8),
}

/// Cartridge board address translator, keyed by iNES mapper id
///
/// Every translation returns the offset into the cartridge's PRG or CHR
/// memory, or `None` when the board does not claim the address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapper {
    /// Mapper 0 (NROM)
    Nrom(Mapper0),
}

impl Mapper {
    /// Create the mapper for an iNES mapper id
    ///
    /// # Arguments
    /// * `id` - Mapper number reconstructed from the header flag nibbles
    /// * `prg_banks` - Number of 16KB PRG banks
    /// * `chr_banks` - Number of 8KB CHR banks
    ///
    /// # Errors
    /// Returns `MapperError::UnsupportedMapper` for ids without a variant
    pub fn from_id(id: u8, prg_banks: u8, chr_banks: u8) -> Result<Self, MapperError> {
        match id {
            0 => Ok(Mapper::Nrom(Mapper0::new(prg_banks, chr_banks))),
            other => Err(MapperError::UnsupportedMapper(other)),
        }
    }

    /// Translate a CPU read address
    pub fn cpu_map_read(&self, addr: u16) -> Option<usize> {
        match self {
            Mapper::Nrom(m) => m.cpu_map_read(addr),
        }
    }

    /// Translate a CPU write address
    ///
    /// `data` is handed to the board so register-based boards can latch it;
    /// NROM ignores it.
    pub fn cpu_map_write(&mut self, addr: u16, _data: u8) -> Option<usize> {
        match self {
            Mapper::Nrom(m) => m.cpu_map_write(addr),
        }
    }

    /// Translate a PPU read address
    pub fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        match self {
            Mapper::Nrom(m) => m.ppu_map_read(addr),
        }
    }

    /// Translate a PPU write address
    pub fn ppu_map_write(&mut self, addr: u16) -> Option<usize> {
        match self {
            Mapper::Nrom(m) => m.ppu_map_write(addr),
        }
    }

    /// Return the board to its power-on state
    pub fn reset(&mut self) {
        match self {
            Mapper::Nrom(m) => m.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapper_zero_is_nrom() {
        let mapper = Mapper::from_id(0, 1, 1).unwrap();
        assert!(matches!(mapper, Mapper::Nrom(_)));
    }

    #[test]
    fn test_unsupported_mapper() {
        assert_eq!(
            Mapper::from_id(4, 8, 16),
            Err(MapperError::UnsupportedMapper(4))
        );
        assert_eq!(
            MapperError::UnsupportedMapper(99).to_string(),
            "mapper 99 is not supported"
        );
    }

    #[test]
    fn test_dispatch_forwards_to_variant() {
        let mut mapper = Mapper::from_id(0, 2, 0).unwrap();
        assert_eq!(mapper.cpu_map_read(0xC123), Some(0x4123));
        assert_eq!(mapper.cpu_map_write(0x8000, 0xAA), Some(0x0000));
        assert_eq!(mapper.ppu_map_write(0x1FFF), Some(0x1FFF));
        mapper.reset();
        assert_eq!(mapper.ppu_map_read(0x0800), Some(0x0800));
    }
}
