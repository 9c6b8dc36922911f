// Display module - Pixel output of the PPU
//
// This module provides:
// - The 2C02 system palette (64 colors)
// - The 256×240 RGBA frame buffer

pub mod framebuffer;
pub mod palette;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
pub use palette::{palette_to_rgb, palette_to_rgba, rgb_to_rgba, SYSTEM_PALETTE};
