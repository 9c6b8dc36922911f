// Frame Buffer - 256×240 RGBA pixel grid written by the PPU
//
// Pixels are stored row-major, 4 bytes per pixel (R, G, B, A), which is the
// layout PNG encoders and texture uploads expect.

/// Screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// Screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// Total number of pixels in the frame buffer
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Bytes per RGBA pixel
const BYTES_PER_PIXEL: usize = 4;

/// Frame buffer for storing pixel data
#[derive(Clone)]
pub struct FrameBuffer {
    /// RGBA bytes, `SCREEN_SIZE * 4` long
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Create a new frame buffer initialized to opaque black
    pub fn new() -> Self {
        let mut buffer = Self {
            pixels: vec![0; SCREEN_SIZE * BYTES_PER_PIXEL],
        };
        buffer.clear([0x00, 0x00, 0x00, 0xFF]);
        buffer
    }

    #[inline]
    fn offset(x: usize, y: usize) -> usize {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);
        (y * SCREEN_WIDTH + x) * BYTES_PER_PIXEL
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let offset = Self::offset(x, y);
        self.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Get the RGBA color of a pixel
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = Self::offset(x, y);
        let mut rgba = [0; BYTES_PER_PIXEL];
        rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        rgba
    }

    /// Fill the whole frame with one color
    pub fn clear(&mut self, rgba: [u8; 4]) {
        for pixel in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .finish()
    }
}
