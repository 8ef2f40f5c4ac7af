//! glyphcast - colorized ASCII-art image converter
//!
//! Shrinks an image to a grid of character cells, maps each cell's brightness
//! onto a fixed ten-glyph palette and draws the glyphs, in the cell's own
//! color, onto a black canvas of 6x6 pixels per cell.
//!
//! # Example
//! ```no_run
//! use glyphcast::{convert, ConvertConfig};
//!
//! let config = ConvertConfig::new("photo.jpg", "ascii_art.png").with_size(120, 60);
//! let report = convert(&config).unwrap();
//! println!("wrote {}", report.output_path.display());
//! ```

pub mod ascii;
pub mod config;
pub mod error;
pub mod filters;
pub mod font;
pub mod lut;
pub mod processor;

// Re-export main types for convenience
pub use ascii::{CELL_SIZE, GlyphCell, GlyphGrid};
pub use config::{ConvertConfig, ResizeFilter};
pub use error::{ConvertError, Result};
pub use filters::BrightnessGrid;
pub use lut::{GLYPHS, glyph_for, glyph_index, glyph_index_for_sum};
pub use processor::{ConversionReport, convert, load_image, render, save_image};
