//! Glyph palette lookup
//!
//! Brightness is quantized linearly onto a fixed ramp of ten glyphs, from the
//! emptiest (space) to the densest (`@`).

/// Glyphs ordered by ink coverage
pub const GLYPHS: [char; 10] = [
    ' ', // 0: darkest
    ':', // 1
    '+', // 2
    '=', // 3
    '§', // 4
    '%', // 5
    '$', // 6
    '&', // 7
    '#', // 8
    '@', // 9: brightest
];

pub const MAX_INDEX: usize = GLYPHS.len() - 1;

/// Channel sum covered by one palette step: 3 * 255 / 9
const SUM_PER_STEP: u16 = 85;

/// Map a brightness in `[0, 255]` to a palette index
///
/// Exactly `floor(brightness / 255 * 9)`, computed in `f64`. Out of range
/// input is clamped and NaN maps to 0.
pub fn glyph_index(brightness: f32) -> usize {
    if brightness.is_nan() {
        return 0;
    }
    let b = brightness.clamp(0.0, 255.0) as f64;
    let scaled = b * MAX_INDEX as f64 / 255.0;

    (scaled.floor() as usize).min(MAX_INDEX)
}

/// Palette index for a pixel whose three channels add up to `sum`
///
/// Same quantization as [`glyph_index`] on the mean `sum / 3`, in integer
/// arithmetic: `floor(sum / 3 / 255 * 9) == sum / 85`. Used for pixel data
/// so a mean such as 85 / 3 never lands on the wrong side of a step.
pub fn glyph_index_for_sum(sum: u16) -> usize {
    ((sum / SUM_PER_STEP) as usize).min(MAX_INDEX)
}

/// Get the glyph for a brightness value
pub fn glyph_for(brightness: f32) -> char {
    GLYPHS[glyph_index(brightness)]
}
