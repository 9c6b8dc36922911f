// Cartridge module - iNES image parsing and mapper-backed memory access
//
// The cartridge owns PRG and CHR memory and the board's mapper. Both the CPU
// bus and the PPU ask it first; a `None`/`false` answer means the address is
// not claimed and the caller falls back to its own memory map.

pub mod mappers;

use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;

pub use mappers::{Mapper, MapperError};

/// Size of the iNES header in bytes
pub const INES_HEADER_SIZE: usize = 16;

/// Size of the optional trainer block in bytes
pub const TRAINER_SIZE: usize = 512;

/// Size of one PRG-ROM bank (16KB)
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// Size of one CHR bank (8KB)
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// iNES magic number: "NES" followed by MS-DOS end-of-file
pub const INES_MAGIC: [u8; 4] = [b'N', b'E', b'S', 0x1A];

/// Errors produced while reading an iNES image
#[derive(Debug, Error)]
pub enum CartridgeError {
    /// The image file could not be read
    #[error("failed to read cartridge image: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer than 16 bytes were available for the header
    #[error("image is {0} bytes, shorter than the 16-byte iNES header")]
    TruncatedHeader(usize),

    /// The header does not start with `NES\x1A`
    #[error("invalid iNES magic {0:02X?}")]
    InvalidMagic([u8; 4]),
}

/// Nametable mirroring wired on the cartridge board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mirroring {
    /// Quadrants {0,1} share bank 0, {2,3} share bank 1
    #[default]
    Horizontal,
    /// Quadrants {0,2} share bank 0, {1,3} share bank 1
    Vertical,
}

impl fmt::Display for Mirroring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mirroring::Horizontal => write!(f, "horizontal"),
            Mirroring::Vertical => write!(f, "vertical"),
        }
    }
}

/// Decoded iNES header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct INesHeader {
    /// Number of 16KB PRG-ROM banks
    pub prg_banks: u8,
    /// Number of 8KB CHR-ROM banks (0 means the board uses CHR-RAM)
    pub chr_banks: u8,
    /// Flags 6: mirroring, battery, trainer, mapper low nibble
    pub flags6: u8,
    /// Flags 7: console type, mapper high nibble
    pub flags7: u8,
}

impl INesHeader {
    /// Parse the first 16 bytes of an image
    ///
    /// # Errors
    /// Returns an error if the slice is too short or the magic is wrong
    pub fn parse(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < INES_HEADER_SIZE {
            return Err(CartridgeError::TruncatedHeader(data.len()));
        }

        let magic = [data[0], data[1], data[2], data[3]];
        if magic != INES_MAGIC {
            return Err(CartridgeError::InvalidMagic(magic));
        }

        Ok(INesHeader {
            prg_banks: data[4],
            chr_banks: data[5],
            flags6: data[6],
            flags7: data[7],
        })
    }

    /// Mapper id assembled from the high nibbles of flags 7 and flags 6
    pub fn mapper_id(&self) -> u8 {
        (self.flags7 & 0xF0) | (self.flags6 >> 4)
    }

    /// Whether a 512-byte trainer precedes PRG-ROM
    pub fn has_trainer(&self) -> bool {
        self.flags6 & 0x04 != 0
    }

    /// Nametable mirroring selected by bit 0 of flags 6
    pub fn mirroring(&self) -> Mirroring {
        if self.flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }
}

/// A loaded cartridge image
#[derive(Debug, Clone)]
pub struct Cartridge {
    prg_memory: Vec<u8>,
    chr_memory: Vec<u8>,
    prg_banks: u8,
    chr_banks: u8,
    mapper_id: u8,
    mapper: Option<Mapper>,
    mirroring: Mirroring,
    valid: bool,
}

impl Cartridge {
    /// Load a cartridge from an iNES file
    ///
    /// Never fails: an unreadable or malformed image produces an invalid
    /// cartridge, which callers detect through [`Cartridge::is_valid`].
    ///
    /// # Example
    /// ```no_run
    /// use nes_core::cartridge::Cartridge;
    ///
    /// let cartridge = Cartridge::load("game.nes");
    /// if !cartridge.is_valid() {
    ///     eprintln!("could not load image");
    /// }
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_ines_file(path) {
            Ok(cartridge) => cartridge,
            Err(err) => {
                tracing::error!("Cartridge {}: {}", path.display(), err);
                Self::invalid()
            }
        }
    }

    /// Read and parse an iNES file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or its header is malformed
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse an iNES image held in memory
    ///
    /// PRG and CHR data shorter than the header declares is zero-padded.
    /// An unsupported mapper id still yields a valid image with no mapper;
    /// every mapped access on it falls through to the unmapped behavior.
    ///
    /// # Errors
    /// Returns an error if the header is truncated or has the wrong magic
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        let header = INesHeader::parse(data)?;

        let mut offset = INES_HEADER_SIZE;
        if header.has_trainer() {
            offset += TRAINER_SIZE;
        }

        let prg_size = header.prg_banks as usize * PRG_BANK_SIZE;
        let prg_memory = take_padded(data, &mut offset, prg_size);

        // A board without CHR-ROM gets one bank of pattern RAM
        let chr_size = header.chr_banks.max(1) as usize * CHR_BANK_SIZE;
        let chr_memory = if header.chr_banks == 0 {
            vec![0; chr_size]
        } else {
            take_padded(data, &mut offset, chr_size)
        };

        let mapper_id = header.mapper_id();
        let mapper = match Mapper::from_id(mapper_id, header.prg_banks, header.chr_banks) {
            Ok(mapper) => Some(mapper),
            Err(err) => {
                tracing::warn!("Cartridge loaded without a mapper: {}", err);
                None
            }
        };

        tracing::info!(
            "Cartridge: mapper {}, {} x 16KB PRG, {} x 8KB CHR, {} mirroring",
            mapper_id,
            header.prg_banks,
            header.chr_banks,
            header.mirroring()
        );

        Ok(Cartridge {
            prg_memory,
            chr_memory,
            prg_banks: header.prg_banks,
            chr_banks: header.chr_banks,
            mapper_id,
            mapper,
            mirroring: header.mirroring(),
            valid: true,
        })
    }

    fn invalid() -> Self {
        Cartridge {
            prg_memory: Vec::new(),
            chr_memory: Vec::new(),
            prg_banks: 0,
            chr_banks: 0,
            mapper_id: 0,
            mapper: None,
            mirroring: Mirroring::default(),
            valid: false,
        }
    }

    /// Whether the image was read and parsed successfully
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether a mapper is installed for this image
    pub fn has_mapper(&self) -> bool {
        self.mapper.is_some()
    }

    /// Mapper id from the header
    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    /// Number of 16KB PRG-ROM banks
    pub fn prg_banks(&self) -> u8 {
        self.prg_banks
    }

    /// Number of 8KB CHR-ROM banks declared in the header
    pub fn chr_banks(&self) -> u8 {
        self.chr_banks
    }

    /// Whether pattern memory is writable CHR-RAM
    pub fn uses_chr_ram(&self) -> bool {
        self.valid && self.chr_banks == 0
    }

    /// Nametable mirroring
    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    /// CPU read; `None` if the cartridge does not claim the address
    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        let offset = self.mapper.as_ref()?.cpu_map_read(addr)?;
        self.prg_memory.get(offset).copied()
    }

    /// CPU write; returns whether the cartridge claimed the address
    pub fn cpu_write(&mut self, addr: u16, data: u8) -> bool {
        let Some(offset) = self
            .mapper
            .as_mut()
            .and_then(|m| m.cpu_map_write(addr, data))
        else {
            return false;
        };
        match self.prg_memory.get_mut(offset) {
            Some(byte) => {
                *byte = data;
                true
            }
            None => false,
        }
    }

    /// PPU read; `None` if the cartridge does not claim the address
    pub fn ppu_read(&self, addr: u16) -> Option<u8> {
        let offset = self.mapper.as_ref()?.ppu_map_read(addr)?;
        self.chr_memory.get(offset).copied()
    }

    /// PPU write; returns whether the cartridge claimed the address
    pub fn ppu_write(&mut self, addr: u16, data: u8) -> bool {
        let Some(offset) = self.mapper.as_mut().and_then(|m| m.ppu_map_write(addr)) else {
            return false;
        };
        match self.chr_memory.get_mut(offset) {
            Some(byte) => {
                *byte = data;
                true
            }
            None => false,
        }
    }

    /// Reset the mapper to its power-on state
    pub fn reset(&mut self) {
        if let Some(mapper) = self.mapper.as_mut() {
            mapper.reset();
        }
    }
}

/// Copy `len` bytes starting at `offset`, zero-filling past the end of `data`
fn take_padded(data: &[u8], offset: &mut usize, len: usize) -> Vec<u8> {
    let mut out = vec![0; len];
    let start = (*offset).min(data.len());
    let end = (*offset + len).min(data.len());
    out[..end - start].copy_from_slice(&data[start..end]);
    *offset += len;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
        let mut data = vec![
            b'N', b'E', b'S', 0x1A, prg_banks, chr_banks, flags6, flags7, 0, 0, 0, 0, 0, 0, 0, 0,
        ];
        if flags6 & 0x04 != 0 {
            data.extend(std::iter::repeat(0xEE).take(TRAINER_SIZE));
        }
        for bank in 0..prg_banks {
            data.extend(std::iter::repeat(0x10 + bank).take(PRG_BANK_SIZE));
        }
        for bank in 0..chr_banks {
            data.extend(std::iter::repeat(0x40 + bank).take(CHR_BANK_SIZE));
        }
        data
    }

    #[test]
    fn test_header_fields() {
        let header = INesHeader::parse(&image(2, 1, 0x31, 0x40)).unwrap();
        assert_eq!(header.prg_banks, 2);
        assert_eq!(header.chr_banks, 1);
        assert_eq!(header.mapper_id(), 0x43);
        assert_eq!(header.mirroring(), Mirroring::Vertical);
        assert!(!header.has_trainer());
    }

    #[test]
    fn test_rejects_bad_magic_and_short_header() {
        let mut data = image(1, 1, 0, 0);
        data[3] = 0x00;
        assert!(matches!(
            Cartridge::from_bytes(&data),
            Err(CartridgeError::InvalidMagic(_))
        ));
        assert!(matches!(
            Cartridge::from_bytes(&data[..10]),
            Err(CartridgeError::TruncatedHeader(10))
        ));
    }

    #[test]
    fn test_nrom_128_reads_mirror() {
        let mut data = image(1, 1, 0, 0);
        data[INES_HEADER_SIZE + 5] = 0xAB;
        let cart = Cartridge::from_bytes(&data).unwrap();

        assert!(cart.is_valid());
        assert!(cart.has_mapper());
        assert_eq!(cart.mirroring(), Mirroring::Horizontal);
        assert_eq!(cart.cpu_read(0x8005), Some(0xAB));
        assert_eq!(cart.cpu_read(0xC005), Some(0xAB));
        assert_eq!(cart.cpu_read(0x1234), None);
    }

    #[test]
    fn test_nrom_256_reads_second_bank() {
        let cart = Cartridge::from_bytes(&image(2, 1, 0, 0)).unwrap();
        assert_eq!(cart.cpu_read(0x8005), Some(0x10));
        assert_eq!(cart.cpu_read(0xC005), Some(0x11));
    }

    #[test]
    fn test_trainer_is_skipped() {
        let cart = Cartridge::from_bytes(&image(1, 1, 0x04, 0)).unwrap();
        assert_eq!(cart.cpu_read(0x8000), Some(0x10));
        assert_eq!(cart.ppu_read(0x0000), Some(0x40));
    }

    #[test]
    fn test_chr_rom_is_read_only() {
        let mut cart = Cartridge::from_bytes(&image(1, 1, 0, 0)).unwrap();
        assert!(!cart.uses_chr_ram());
        assert!(!cart.ppu_write(0x0010, 0x99));
        assert_eq!(cart.ppu_read(0x0010), Some(0x40));
    }

    #[test]
    fn test_zero_chr_banks_allocates_pattern_ram() {
        let mut cart = Cartridge::from_bytes(&image(1, 0, 0, 0)).unwrap();
        assert!(cart.uses_chr_ram());
        assert_eq!(cart.ppu_read(0x1FFF), Some(0x00));
        assert!(cart.ppu_write(0x1FFF, 0x99));
        assert_eq!(cart.ppu_read(0x1FFF), Some(0x99));
    }

    #[test]
    fn test_unsupported_mapper_falls_through() {
        let mut cart = Cartridge::from_bytes(&image(1, 1, 0x10, 0)).unwrap();
        assert!(cart.is_valid());
        assert!(!cart.has_mapper());
        assert_eq!(cart.mapper_id(), 1);
        assert_eq!(cart.cpu_read(0x8000), None);
        assert!(!cart.cpu_write(0x8000, 0x00));
        assert_eq!(cart.ppu_read(0x0000), None);
    }

    #[test]
    fn test_truncated_prg_is_zero_padded() {
        let data = image(1, 1, 0, 0);
        let cart = Cartridge::from_bytes(&data[..INES_HEADER_SIZE + 100]).unwrap();
        assert_eq!(cart.cpu_read(0x8000), Some(0x10));
        assert_eq!(cart.cpu_read(0x8100), Some(0x00));
        assert_eq!(cart.ppu_read(0x0000), Some(0x00));
    }

    #[test]
    fn test_missing_file_is_invalid() {
        let cart = Cartridge::load("/nonexistent/definitely-missing.nes");
        assert!(!cart.is_valid());
        assert!(!cart.has_mapper());
        assert_eq!(cart.cpu_read(0x8000), None);
    }

    #[test]
    fn test_prg_write_through_mapper() {
        let mut cart = Cartridge::from_bytes(&image(1, 1, 0, 0)).unwrap();
        assert!(cart.cpu_write(0xC000, 0x5A));
        assert_eq!(cart.cpu_read(0x8000), Some(0x5A));
    }
}
