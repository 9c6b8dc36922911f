// Screenshot functionality
//
// Saves the current frame buffer as a PNG file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::display::FrameBuffer;

/// Errors that can occur during screenshot operations
#[derive(Debug, Error)]
pub enum ScreenshotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),
}

/// Save a screenshot of `frame`
///
/// The file lands in `<base_dir>/<rom name>/screenshot_<timestamp>.png`, or
/// `<base_dir>/default/` when no ROM path is known.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use nes_core::emulator::save_screenshot;
/// use nes_core::ppu::Ppu;
///
/// let ppu = Ppu::new();
/// let path = save_screenshot(ppu.frame_buffer(), Path::new("screenshots"), None)
///     .expect("Failed to save screenshot");
/// println!("Screenshot saved to: {}", path.display());
/// ```
pub fn save_screenshot(
    frame: &FrameBuffer,
    base_dir: &Path,
    rom_path: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    let screenshots_dir = screenshot_directory(base_dir, rom_path);
    fs::create_dir_all(&screenshots_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
    let file_path = screenshots_dir.join(format!("screenshot_{}.png", timestamp));

    save_png(&file_path, frame)?;
    tracing::info!("Screenshot saved to {}", file_path.display());

    Ok(file_path)
}

/// Screenshot directory for the current ROM
fn screenshot_directory(base_dir: &Path, rom_path: Option<&Path>) -> PathBuf {
    match rom_path.and_then(Path::file_stem) {
        Some(rom_name) => base_dir.join(rom_name),
        None => base_dir.join("default"),
    }
}

/// Encode `frame` as an 8-bit RGBA PNG at `path`
pub fn save_png(path: &Path, frame: &FrameBuffer) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, frame.width() as u32, frame.height() as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(frame.as_rgba())?;

    Ok(())
}
