// System palette - RGB values for the 64 colors the 2C02 can output
//
// Palette RAM stores 6-bit indices into this table. Indices $0D-$0F,
// $1E-$1F, $2E-$2F and $3E-$3F render as black.

/// 2C02 system palette in RGB format (64 colors)
///
/// Each color is represented as a 32-bit value: 0xRRGGBB
pub const SYSTEM_PALETTE: [u32; 64] = [
    // $00-$0F
    0x545454, 0x001E74, 0x081090, 0x300088, 0x440064, 0x5C0030, 0x540400, 0x3C1800,
    0x202A00, 0x083A00, 0x004000, 0x003C00, 0x00323C, 0x000000, 0x000000, 0x000000,
    // $10-$1F
    0x989698, 0x084CC4, 0x3032EC, 0x5C1EE4, 0x8814B0, 0xA01464, 0x982220, 0x783C00,
    0x545A00, 0x287200, 0x087C00, 0x007628, 0x006678, 0x000000, 0x000000, 0x000000,
    // $20-$2F
    0xECEEEC, 0x4C9AEC, 0x787CEC, 0xB062EC, 0xE454EC, 0xEC58B4, 0xEC6A64, 0xD48820,
    0xA0AA00, 0x74C400, 0x4CD020, 0x38CC6C, 0x38B4CC, 0x3C3C3C, 0x000000, 0x000000,
    // $30-$3F
    0xECEEEC, 0xA8CCEC, 0xBCBCEC, 0xD4B2EC, 0xECAEEC, 0xECAED4, 0xECB4B0, 0xE4C490,
    0xCCD278, 0xB4DE78, 0xA8E290, 0x98E2B4, 0xA0D6E4, 0xA0A2A0, 0x000000, 0x000000,
];

/// Convert a palette index to RGB color
///
/// # Arguments
/// * `index` - Palette index (0x00-0x3F); upper bits are ignored
///
/// # Returns
/// 32-bit RGB color value (0xRRGGBB)
#[inline]
pub fn palette_to_rgb(index: u8) -> u32 {
    SYSTEM_PALETTE[(index & 0x3F) as usize]
}

/// Convert RGB color to RGBA bytes
#[inline]
pub fn rgb_to_rgba(rgb: u32) -> [u8; 4] {
    [
        ((rgb >> 16) & 0xFF) as u8, // Red
        ((rgb >> 8) & 0xFF) as u8,  // Green
        (rgb & 0xFF) as u8,         // Blue
        0xFF,                       // Alpha (fully opaque)
    ]
}

/// Convert a palette index directly to RGBA bytes
#[inline]
pub fn palette_to_rgba(index: u8) -> [u8; 4] {
    rgb_to_rgba(palette_to_rgb(index))
}
