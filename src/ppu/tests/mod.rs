//! PPU unit tests
//!
//! Organized by functionality: registers, memory, rendering, timing and
//! hardware quirks.

use super::*;
use crate::bus::MemoryMappedDevice;
use crate::cartridge::{Cartridge, Mirroring};
use std::cell::RefCell;
use std::rc::Rc;

// ========================================
// Test Constants (PPU Register Addresses)
// ========================================

/// PPU Control Register ($2000) - Write only
pub(crate) const PPUCTRL: u16 = 0x2000;
/// PPU Mask Register ($2001) - Write only
pub(crate) const PPUMASK: u16 = 0x2001;
/// PPU Status Register ($2002) - Read only
pub(crate) const PPUSTATUS: u16 = 0x2002;
/// OAM Address Port ($2003) - not wired up
pub(crate) const OAMADDR: u16 = 0x2003;
/// OAM Data Port ($2004) - not wired up
pub(crate) const OAMDATA: u16 = 0x2004;
/// Scroll Position Register ($2005) - Write×2
pub(crate) const PPUSCROLL: u16 = 0x2005;
/// PPU Address Register ($2006) - Write×2
pub(crate) const PPUADDR: u16 = 0x2006;
/// PPU Data Port ($2007) - Read/Write
pub(crate) const PPUDATA: u16 = 0x2007;

// ========================================
// Test Helper Functions
// ========================================

/// Build an NROM image with one PRG bank; `chr` of `None` means CHR-RAM
pub(crate) fn nrom_cartridge(chr: Option<u8>, vertical: bool) -> Rc<RefCell<Cartridge>> {
    let chr_banks = u8::from(chr.is_some());
    let flags6 = u8::from(vertical);
    let mut data = vec![
        b'N', b'E', b'S', 0x1A, 1, chr_banks, flags6, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ];
    data.extend(std::iter::repeat(0xEA).take(16 * 1024));
    if let Some(fill) = chr {
        data.extend(std::iter::repeat(fill).take(8 * 1024));
    }
    Rc::new(RefCell::new(Cartridge::from_bytes(&data).unwrap()))
}

/// Connect `cartridge` to `ppu`; the caller keeps the owning handle alive
pub(crate) fn connect(ppu: &mut Ppu, cartridge: &Rc<RefCell<Cartridge>>) {
    ppu.connect_cartridge(Rc::downgrade(cartridge));
}

/// Point v at `addr` through PPUADDR
pub(crate) fn set_vram_address(ppu: &mut Ppu, addr: u16) {
    ppu.write(PPUADDR, (addr >> 8) as u8);
    ppu.write(PPUADDR, addr as u8);
}

/// Write a run of bytes through PPUDATA starting at `addr`
pub(crate) fn write_vram(ppu: &mut Ppu, addr: u16, bytes: &[u8]) {
    set_vram_address(ppu, addr);
    for &byte in bytes {
        ppu.write(PPUDATA, byte);
    }
}

/// Clock until the counters read (`scanline`, `cycle`)
pub(crate) fn run_to(ppu: &mut Ppu, scanline: i16, cycle: u16) {
    let mut guard = 0u32;
    while ppu.scanline() != scanline || ppu.cycle() != cycle {
        ppu.clock();
        guard += 1;
        assert!(guard <= CYCLES_PER_FRAME * 2, "position never reached");
    }
}

/// Clock until a frame completes, then clear the flag; returns clocks taken
pub(crate) fn run_frame(ppu: &mut Ppu) -> u32 {
    let mut clocks = 0;
    while !ppu.frame_complete() {
        ppu.clock();
        clocks += 1;
        assert!(clocks <= CYCLES_PER_FRAME * 2, "frame never completed");
    }
    ppu.clear_frame_complete();
    clocks
}

// ========================================
// Test Modules
// ========================================
