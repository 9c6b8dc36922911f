// PPU rendering logic
//
// Background-only pipeline. Every 8 cycles of a fetch window the PPU
// reloads its shifters and fetches the next tile in four steps:
//
// ```text
// (cycle - 1) % 8:  0 load shifters + tile id
//                   2 attribute
//                   4 pattern low plane
//                   6 pattern high plane
//                   7 coarse X increment
// ```

use super::constants::{
    ATTRIBUTE_TABLE_BASE, CYCLES_PER_SCANLINE, LAST_SCANLINE, LAST_VISIBLE_SCANLINE,
    NAMETABLE_BASE, PALETTE_BASE, PATTERN_TABLE_DIM, PRERENDER_SCANLINE, VBLANK_SCANLINE,
};
use super::Ppu;
use crate::display::palette_to_rgba;

/// Background fetch latches and shift registers
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct BackgroundPipeline {
    pub(super) next_tile_id: u8,
    pub(super) next_tile_attribute: u8,
    pub(super) next_pattern_low: u8,
    pub(super) next_pattern_high: u8,
    pub(super) shifter_pattern_low: u16,
    pub(super) shifter_pattern_high: u16,
    pub(super) shifter_attribute_low: u16,
    pub(super) shifter_attribute_high: u16,
}

impl BackgroundPipeline {
    /// Move the fetched tile into the low byte of each shifter
    ///
    /// Attribute bits are widened to a full byte so they shift in lockstep
    /// with the pattern planes.
    pub(super) fn load(&mut self) {
        self.shifter_pattern_low = (self.shifter_pattern_low & 0xFF00) | self.next_pattern_low as u16;
        self.shifter_pattern_high =
            (self.shifter_pattern_high & 0xFF00) | self.next_pattern_high as u16;

        let attribute_low = if self.next_tile_attribute & 0x01 != 0 { 0xFF } else { 0x00 };
        let attribute_high = if self.next_tile_attribute & 0x02 != 0 { 0xFF } else { 0x00 };
        self.shifter_attribute_low = (self.shifter_attribute_low & 0xFF00) | attribute_low;
        self.shifter_attribute_high = (self.shifter_attribute_high & 0xFF00) | attribute_high;
    }

    pub(super) fn shift(&mut self) {
        self.shifter_pattern_low <<= 1;
        self.shifter_pattern_high <<= 1;
        self.shifter_attribute_low <<= 1;
        self.shifter_attribute_high <<= 1;
    }

    /// Sample the shifters at `fine_x`, returning (pixel, palette)
    pub(super) fn sample(&self, fine_x: u8) -> (u8, u8) {
        let select = 0x8000u16 >> (fine_x & 0x07);
        let bit = |shifter: u16| u8::from(shifter & select != 0);

        let pixel = (bit(self.shifter_pattern_high) << 1) | bit(self.shifter_pattern_low);
        let palette = (bit(self.shifter_attribute_high) << 1) | bit(self.shifter_attribute_low);
        (pixel, palette)
    }
}

impl Ppu {
    /// Advance the PPU by one cycle
    pub fn clock(&mut self) {
        if (PRERENDER_SCANLINE..=LAST_VISIBLE_SCANLINE).contains(&self.scanline) {
            self.background_step();
        }

        if self.scanline == VBLANK_SCANLINE && self.cycle == 1 {
            self.status.set_vblank(true);
            if self.control.generate_nmi() {
                self.nmi = true;
            }
        }

        let (pixel, palette) = if self.mask.show_background() {
            self.background.sample(self.fine_x)
        } else {
            (0, 0)
        };

        if (1..=256).contains(&self.cycle) && (0..=LAST_VISIBLE_SCANLINE).contains(&self.scanline)
        {
            let color = self.palette_color(palette, pixel);
            self.frame_buffer
                .set_pixel((self.cycle - 1) as usize, self.scanline as usize, color);
        }

        self.advance_counters();
    }

    fn advance_counters(&mut self) {
        self.cycle += 1;
        if self.cycle >= CYCLES_PER_SCANLINE {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline > LAST_SCANLINE {
                self.scanline = PRERENDER_SCANLINE;
                self.frame_complete = true;
                tracing::trace!("frame complete");
            }
        }
    }

    /// Fetch pipeline and scroll updates for the pre-render and visible lines
    fn background_step(&mut self) {
        if self.scanline == PRERENDER_SCANLINE && self.cycle == 1 {
            self.status.set_vblank(false);
        }

        if (2..258).contains(&self.cycle) || (321..338).contains(&self.cycle) {
            if self.mask.show_background() {
                self.background.shift();
            }

            match (self.cycle - 1) % 8 {
                0 => {
                    self.background.load();
                    self.background.next_tile_id = self.fetch_tile_id();
                }
                2 => self.background.next_tile_attribute = self.fetch_tile_attribute(),
                4 => self.background.next_pattern_low = self.fetch_tile_pattern(0),
                6 => self.background.next_pattern_high = self.fetch_tile_pattern(8),
                7 => self.increment_scroll_x(),
                _ => {}
            }
        }

        if self.cycle == 256 {
            self.increment_scroll_y();
        }

        if self.cycle == 257 {
            self.background.load();
            self.transfer_address_x();
        }

        // Dummy fetches at the end of the line
        if self.cycle == 338 || self.cycle == 340 {
            self.background.next_tile_id = self.fetch_tile_id();
        }

        if self.scanline == PRERENDER_SCANLINE && (280..305).contains(&self.cycle) {
            self.transfer_address_y();
        }
    }

    pub(super) fn fetch_tile_id(&self) -> u8 {
        self.ppu_read(NAMETABLE_BASE | (self.vram_addr.bits() & 0x0FFF))
    }

    /// Attribute byte reduced to the 2-bit palette of the current 16x16 quadrant
    pub(super) fn fetch_tile_attribute(&self) -> u8 {
        let v = self.vram_addr;
        let addr = ATTRIBUTE_TABLE_BASE
            | ((v.nametable_y() as u16) << 11)
            | ((v.nametable_x() as u16) << 10)
            | (((v.coarse_y() >> 2) as u16) << 3)
            | ((v.coarse_x() >> 2) as u16);

        let mut attribute = self.ppu_read(addr);
        if v.coarse_y() & 0x02 != 0 {
            attribute >>= 4;
        }
        if v.coarse_x() & 0x02 != 0 {
            attribute >>= 2;
        }
        attribute & 0x03
    }

    /// One bit plane (0 = low, 8 = high) of the next tile's current row
    pub(super) fn fetch_tile_pattern(&self, plane: u16) -> u8 {
        let addr = self.control.background_pattern_base()
            + ((self.background.next_tile_id as u16) << 4)
            + self.vram_addr.fine_y() as u16
            + plane;
        self.ppu_read(addr)
    }

    pub(super) fn increment_scroll_x(&mut self) {
        if !self.mask.rendering_enabled() {
            return;
        }

        if self.vram_addr.coarse_x() == 31 {
            self.vram_addr.set_coarse_x(0);
            self.vram_addr
                .set_nametable_x(self.vram_addr.nametable_x() ^ 1);
        } else {
            self.vram_addr.set_coarse_x(self.vram_addr.coarse_x() + 1);
        }
    }

    /// Move down one pixel row
    ///
    /// Coarse Y wraps at 29 into the other vertical nametable. A coarse Y of
    /// 30 or 31 (attribute rows) counts up to 31 and then wraps to 0 without
    /// switching nametables.
    pub(super) fn increment_scroll_y(&mut self) {
        if !self.mask.rendering_enabled() {
            return;
        }

        if self.vram_addr.fine_y() < 7 {
            self.vram_addr.set_fine_y(self.vram_addr.fine_y() + 1);
            return;
        }

        self.vram_addr.set_fine_y(0);
        match self.vram_addr.coarse_y() {
            29 => {
                self.vram_addr.set_coarse_y(0);
                self.vram_addr
                    .set_nametable_y(self.vram_addr.nametable_y() ^ 1);
            }
            31 => self.vram_addr.set_coarse_y(0),
            coarse_y => self.vram_addr.set_coarse_y(coarse_y + 1),
        }
    }

    /// v: ....A.. ...BCDEF <- t: ....A.. ...BCDEF
    pub(super) fn transfer_address_x(&mut self) {
        if !self.mask.rendering_enabled() {
            return;
        }

        self.vram_addr.set_coarse_x(self.tram_addr.coarse_x());
        self.vram_addr.set_nametable_x(self.tram_addr.nametable_x());
    }

    /// v: GHIA.BC DEF..... <- t: GHIA.BC DEF.....
    pub(super) fn transfer_address_y(&mut self) {
        if !self.mask.rendering_enabled() {
            return;
        }

        self.vram_addr.set_coarse_y(self.tram_addr.coarse_y());
        self.vram_addr.set_nametable_y(self.tram_addr.nametable_y());
        self.vram_addr.set_fine_y(self.tram_addr.fine_y());
    }

    /// Resolve a (palette, pixel) pair through palette RAM to an RGBA color
    ///
    /// Palettes 0-3 are background and 4-7 sprite. The entry read is
    /// `$3F00 + palette * 4 + pixel`.
    pub fn palette_color(&self, palette: u8, pixel: u8) -> [u8; 4] {
        let addr = PALETTE_BASE + (((palette & 0x07) as u16) << 2) + (pixel & 0x03) as u16;
        palette_to_rgba(self.ppu_read(addr) & 0x3F)
    }

    /// Render pattern table `index` (0 or 1) as a 128×128 RGBA image
    ///
    /// Tiles are laid out 16 per row, each drawn with `palette`.
    pub fn pattern_table_rgba(&self, index: u8, palette: u8) -> Vec<u8> {
        let mut image = vec![0u8; PATTERN_TABLE_DIM * PATTERN_TABLE_DIM * 4];
        let base = ((index & 0x01) as u16) * 0x1000;

        for tile_y in 0..16u16 {
            for tile_x in 0..16u16 {
                let tile = base + tile_y * 256 + tile_x * 16;

                for row in 0..8u16 {
                    let low = self.ppu_read(tile + row);
                    let high = self.ppu_read(tile + row + 8);

                    for column in 0..8u16 {
                        let bit = 7 - column;
                        let pixel = (((high >> bit) & 0x01) << 1) | ((low >> bit) & 0x01);

                        let x = (tile_x * 8 + column) as usize;
                        let y = (tile_y * 8 + row) as usize;
                        let offset = (y * PATTERN_TABLE_DIM + x) * 4;
                        image[offset..offset + 4].copy_from_slice(&self.palette_color(palette, pixel));
                    }
                }
            }
        }

        image
    }
}
