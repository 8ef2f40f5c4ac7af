use crate::filters::BrightnessGrid;
use crate::font::draw_glyph;
use crate::lut::{GLYPHS, glyph_index_for_sum};
use image::{Rgb, RgbImage};
use rayon::prelude::*;

/// Side of the square pixel block each glyph occupies in the output
pub const CELL_SIZE: u32 = 6;

/// Glyph chosen for one cell, with the color it is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    /// Index into [`GLYPHS`], always `0..=9`
    pub index: u8,
    /// Exact color of the resized source pixel
    pub color: Rgb<u8>,
}

impl GlyphCell {
    pub fn glyph(&self) -> char {
        GLYPHS[self.index as usize]
    }
}

/// Grid of selected glyphs, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphGrid {
    width: u32,
    height: u32,
    cells: Vec<GlyphCell>,
}

impl GlyphGrid {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> GlyphCell {
        assert!(x < self.width && y < self.height, "cell out of bounds");
        self.cells[(y * self.width + x) as usize]
    }

    pub fn cells(&self) -> &[GlyphCell] {
        &self.cells
    }

    /// The glyphs as text, one line per row
    ///
    /// Handy for logging and tests; trailing spaces are kept.
    pub fn to_text(&self) -> String {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(GlyphCell::glyph).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pick a glyph for every cell
///
/// # Arguments
/// * `source` - Resized source image, one pixel per cell
/// * `brightness` - Brightness of `source`
///
/// # Panics
/// If the two grids differ in size
pub fn select_glyphs(source: &RgbImage, brightness: &BrightnessGrid) -> GlyphGrid {
    assert_eq!(
        source.dimensions(),
        brightness.dimensions(),
        "brightness grid must match the source image"
    );
    let (width, height) = source.dimensions();

    // Parallelize per row; collect keeps row order
    let cells: Vec<GlyphCell> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            (0..width).map(move |x| GlyphCell {
                index: glyph_index_for_sum(brightness.channel_sum(x, y)) as u8,
                color: *source.get_pixel(x, y),
            })
        })
        .collect();

    GlyphGrid {
        width,
        height,
        cells,
    }
}

/// Render selected glyphs onto a fresh black canvas
///
/// The canvas is `CELL_SIZE` times the grid in each direction; the glyph for
/// cell (col, row) is drawn at pixel offset (col * CELL_SIZE, row * CELL_SIZE).
pub fn render_glyphs(grid: &GlyphGrid) -> RgbImage {
    let width = grid.width * CELL_SIZE;
    let height = grid.height * CELL_SIZE;
    let mut output = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));

    for row in 0..grid.height {
        for col in 0..grid.width {
            let cell = grid.get(col, row);
            draw_glyph(
                &mut output,
                col * CELL_SIZE,
                row * CELL_SIZE,
                cell.glyph(),
                cell.color,
            );
        }
    }

    output
}
