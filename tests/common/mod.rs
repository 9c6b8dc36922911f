// Common helpers for integration tests
//
// Test programs are assembled by hand into in-memory iNES images, so the
// suites run without any ROM files on disk.

#![allow(dead_code)]

use nes_core::cartridge::{Cartridge, CHR_BANK_SIZE, INES_MAGIC, PRG_BANK_SIZE};
use nes_core::emulator::Emulator;

/// Reset vector used by [`InesBuilder::program`] images
pub const PROGRAM_START: u16 = 0x8000;

/// Builder for iNES images held in memory
pub struct InesBuilder {
    prg: Vec<u8>,
    chr: Vec<u8>,
    chr_banks: u8,
    mapper: u8,
    vertical: bool,
}

impl InesBuilder {
    /// Image with `prg_banks` 16KB banks filled with NOP and one zeroed CHR bank
    pub fn new(prg_banks: u8) -> Self {
        InesBuilder {
            prg: vec![0xEA; prg_banks as usize * PRG_BANK_SIZE],
            chr: vec![0; CHR_BANK_SIZE],
            chr_banks: 1,
            mapper: 0,
            vertical: false,
        }
    }

    /// Image whose reset vector points at `code` placed at $8000
    pub fn program(code: &[u8]) -> Self {
        Self::new(1)
            .bytes(PROGRAM_START, code)
            .vector(0xFFFC, PROGRAM_START)
    }

    /// Copy `bytes` to CPU address `addr` (mirrored into the image)
    pub fn bytes(mut self, addr: u16, bytes: &[u8]) -> Self {
        let len = self.prg.len();
        for (i, &byte) in bytes.iter().enumerate() {
            let offset = (addr as usize - 0x8000 + i) % len;
            self.prg[offset] = byte;
        }
        self
    }

    /// Point an interrupt vector at `target`
    pub fn vector(self, vector: u16, target: u16) -> Self {
        self.bytes(vector, &target.to_le_bytes())
    }

    /// Set one byte of CHR-ROM
    pub fn chr(mut self, offset: usize, value: u8) -> Self {
        self.chr[offset] = value;
        self
    }

    /// Declare no CHR-ROM so the board gets CHR-RAM
    pub fn chr_ram(mut self) -> Self {
        self.chr_banks = 0;
        self.chr.clear();
        self
    }

    pub fn mapper(mut self, id: u8) -> Self {
        self.mapper = id;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }

    /// Serialize to iNES bytes
    pub fn build(&self) -> Vec<u8> {
        let mut image = Vec::with_capacity(16 + self.prg.len() + self.chr.len());
        image.extend_from_slice(&INES_MAGIC);
        image.push((self.prg.len() / PRG_BANK_SIZE) as u8);
        image.push(self.chr_banks);
        image.push((self.mapper << 4) | u8::from(self.vertical));
        image.push(self.mapper & 0xF0);
        image.extend_from_slice(&[0; 8]);
        image.extend_from_slice(&self.prg);
        image.extend_from_slice(&self.chr);
        image
    }

    pub fn cartridge(&self) -> Cartridge {
        Cartridge::from_bytes(&self.build()).expect("builder produces a valid header")
    }

    /// Emulator with this image inserted and reset
    pub fn emulator(&self) -> Emulator {
        let mut emulator = Emulator::new();
        emulator.insert_cartridge(self.cartridge());
        emulator
    }
}
