//! Built-in fixed-size bitmap font
//!
//! Every palette glyph is a 5x5 bitmap drawn into the top-left corner of a
//! 6x6 cell, leaving a one pixel gutter so neighbouring glyphs never touch.
//! Rows are stored top to bottom; bit 4 is the leftmost column.

use image::{Rgb, RgbImage};

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 5;

type Bitmap = [u8; GLYPH_HEIGHT as usize];

const SOLID: Bitmap = [0b11111; 5];

const FONT: [(char, Bitmap); 10] = [
    (' ', [0b00000, 0b00000, 0b00000, 0b00000, 0b00000]),
    (':', [0b00000, 0b00100, 0b00000, 0b00100, 0b00000]),
    ('+', [0b00000, 0b00100, 0b01110, 0b00100, 0b00000]),
    ('=', [0b00000, 0b11111, 0b00000, 0b11111, 0b00000]),
    ('§', [0b01111, 0b01000, 0b01110, 0b00010, 0b11110]),
    ('%', [0b11001, 0b11010, 0b00100, 0b01011, 0b10011]),
    ('$', [0b01111, 0b10100, 0b01110, 0b00101, 0b11110]),
    ('&', [0b01100, 0b10010, 0b01101, 0b10010, 0b01101]),
    ('#', [0b01010, 0b11111, 0b01010, 0b11111, 0b01010]),
    ('@', [0b01110, 0b10001, 0b10111, 0b10000, 0b01111]),
];

/// Look up the bitmap for a character
pub fn glyph_bitmap(ch: char) -> Option<&'static Bitmap> {
    FONT.iter().find(|(c, _)| *c == ch).map(|(_, bitmap)| bitmap)
}

/// Whether the pixel at (`x`, `y`) inside a glyph is ink
///
/// Characters missing from the font render as a solid block.
pub fn is_lit(ch: char, x: u32, y: u32) -> bool {
    if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
        return false;
    }
    let bitmap = glyph_bitmap(ch).unwrap_or(&SOLID);
    bitmap[y as usize] & (1 << (GLYPH_WIDTH - 1 - x)) != 0
}

/// Number of ink pixels in a glyph
pub fn coverage(ch: char) -> u32 {
    let bitmap = glyph_bitmap(ch).unwrap_or(&SOLID);
    bitmap.iter().map(|row| row.count_ones()).sum()
}

/// Draw `ch` with its top-left corner at (`x`, `y`), clipped to the canvas
pub fn draw_glyph(canvas: &mut RgbImage, x: u32, y: u32, ch: char, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();

    for gy in 0..GLYPH_HEIGHT {
        for gx in 0..GLYPH_WIDTH {
            if !is_lit(ch, gx, gy) {
                continue;
            }
            let (Some(px), Some(py)) = (x.checked_add(gx), y.checked_add(gy)) else {
                continue;
            };
            if px < width && py < height {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}
