// PPU memory access methods
//
// ```text
// $0000-$1FFF: Pattern tables (cartridge CHR, else internal fallback)
// $2000-$2FFF: Nametables (2 physical 1KB banks, mirrored)
// $3000-$3EFF: Mirror of $2000-$2EFF
// $3F00-$3FFF: Palette RAM (32 entries, mirrored)
// ```

use super::constants::{NAMETABLE_SIZE, PALETTE_BASE, PPU_ADDRESS_MASK};
use super::Ppu;
use crate::cartridge::Mirroring;

impl Ppu {
    /// Mirroring of the inserted cartridge, horizontal when none is connected
    pub fn mirroring(&self) -> Mirroring {
        self.cartridge
            .upgrade()
            .map(|cartridge| cartridge.borrow().mirroring())
            .unwrap_or_default()
    }

    /// Map a nametable address to (physical bank, offset)
    ///
    /// - Vertical: quadrants 0,2 -> bank 0 and 1,3 -> bank 1
    /// - Horizontal: quadrants 0,1 -> bank 0 and 2,3 -> bank 1
    pub(super) fn mirror_nametable_addr(&self, addr: u16) -> (usize, usize) {
        let addr = (addr & 0x0FFF) as usize;
        let quadrant = addr / NAMETABLE_SIZE;
        let offset = addr % NAMETABLE_SIZE;

        let bank = match self.mirroring() {
            Mirroring::Vertical => quadrant & 0x01,
            Mirroring::Horizontal => quadrant >> 1,
        };

        (bank, offset)
    }

    /// Map a palette address to its palette RAM index
    ///
    /// $3F10/$3F14/$3F18/$3F1C alias the background entries $3F00/$3F04/$3F08/$3F0C.
    pub(super) fn mirror_palette_addr(addr: u16) -> usize {
        let addr = (addr & 0x001F) as usize;
        if addr >= 0x10 && addr.is_multiple_of(4) {
            addr - 0x10
        } else {
            addr
        }
    }

    /// Read from the PPU address space
    ///
    /// The cartridge gets first refusal; unclaimed accesses fall back to the
    /// internal tables. Palette reads honour greyscale mode.
    pub(crate) fn ppu_read(&self, addr: u16) -> u8 {
        let addr = addr & PPU_ADDRESS_MASK;

        if let Some(cartridge) = self.cartridge.upgrade() {
            if let Some(data) = cartridge.borrow().ppu_read(addr) {
                return data;
            }
        }

        match addr {
            0x0000..=0x1FFF => {
                let table = ((addr & 0x1000) >> 12) as usize;
                self.pattern_tables[table][(addr & 0x0FFF) as usize]
            }
            0x2000..=0x3EFF => {
                let (bank, offset) = self.mirror_nametable_addr(addr);
                self.name_tables[bank][offset]
            }
            _ => {
                let mask = if self.mask.greyscale() { 0x30 } else { 0x3F };
                self.palette[Self::mirror_palette_addr(addr)] & mask
            }
        }
    }

    /// Write to the PPU address space
    pub(crate) fn ppu_write(&mut self, addr: u16, data: u8) {
        let addr = addr & PPU_ADDRESS_MASK;

        if let Some(cartridge) = self.cartridge.upgrade() {
            if cartridge.borrow_mut().ppu_write(addr, data) {
                return;
            }
        }

        match addr {
            0x0000..=0x1FFF => {
                let table = ((addr & 0x1000) >> 12) as usize;
                self.pattern_tables[table][(addr & 0x0FFF) as usize] = data;
            }
            0x2000..=0x3EFF => {
                let (bank, offset) = self.mirror_nametable_addr(addr);
                self.name_tables[bank][offset] = data;
            }
            _ => {
                self.palette[Self::mirror_palette_addr(addr)] = data;
            }
        }
    }

    /// Read the PPU address space without touching registers or the data buffer
    pub fn debug_read(&self, addr: u16) -> u8 {
        self.ppu_read(addr)
    }

    /// Whether `addr` falls in palette space
    ///
    /// Bit 14 of `v` is dropped first, so $7F00-$7FFF counts as palette
    /// space the same as $3F00-$3FFF.
    pub(super) fn is_palette_addr(addr: u16) -> bool {
        addr & PPU_ADDRESS_MASK >= PALETTE_BASE
    }
}
