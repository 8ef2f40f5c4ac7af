#[cfg(unix)]
use std::fs::Permissions;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::{ImageFormat, ImageReader, RgbImage};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::ascii::{GlyphGrid, render_glyphs, select_glyphs};
use crate::config::{ConvertConfig, ResizeFilter, validate_dimensions};
use crate::error::{ConvertError, Result};
use crate::filters::{calculate_brightness, resize_to_grid};

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output_path: PathBuf,
    /// Decoded input size in pixels
    pub source_dimensions: (u32, u32),
    /// Grid size in character cells
    pub grid_dimensions: (u32, u32),
    /// Written image size in pixels
    pub canvas_dimensions: (u32, u32),
}

/// Decode an image file and convert it to RGB
///
/// The format is sniffed from the file contents, falling back to the
/// extension. Alpha is discarded and grayscale expanded.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let decode_err = |message: String| ConvertError::Decode {
        path: path.to_path_buf(),
        message,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| decode_err(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_err(e.to_string()))?;
    let img = reader.decode().map_err(|e| decode_err(e.to_string()))?;

    Ok(img.to_rgb8())
}

/// Pick the glyph for every cell of a `width` x `height` grid
///
/// This covers the resize, brightness and quantization steps.
pub fn select_cells(
    source: &RgbImage,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> Result<GlyphGrid> {
    validate_dimensions(width, height)?;

    let resized = resize_to_grid(source, width, height, filter);
    let brightness = calculate_brightness(&resized);
    Ok(select_glyphs(&resized, &brightness))
}

/// Converts an in-memory image to ASCII art
///
/// 1. Resize to one pixel per character cell
/// 2. Compute the brightness of each cell
/// 3. Quantize brightness onto the glyph palette
/// 4. Draw each glyph in the cell's source color on a black canvas
///
/// # Returns
/// An image of `(width * CELL_SIZE) x (height * CELL_SIZE)` pixels
pub fn render(source: &RgbImage, width: u32, height: u32, filter: ResizeFilter) -> Result<RgbImage> {
    let grid = select_cells(source, width, height, filter)?;
    Ok(render_glyphs(&grid))
}

/// Output encoder for `path`, chosen by extension
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path).map_err(|e| ConvertError::Write {
        path: path.to_path_buf(),
        message: format!("unsupported output format: {}", e),
    })?;
    if !format.writing_enabled() {
        return Err(ConvertError::Write {
            path: path.to_path_buf(),
            message: format!("cannot encode {:?} images", format),
        });
    }
    Ok(format)
}

/// Encode `canvas` in the format given by the extension of `path`
pub fn encode_image(canvas: &RgbImage, path: &Path) -> Result<Vec<u8>> {
    let format = output_format(path)?;
    let mut bytes = Cursor::new(Vec::new());
    canvas
        .write_to(&mut bytes, format)
        .map_err(|e| ConvertError::Write {
            path: path.to_path_buf(),
            message: format!("failed to encode {:?}: {}", format, e),
        })?;
    Ok(bytes.into_inner())
}

/// Encode and write `canvas` to `path`
///
/// The image is encoded in memory and written to a temporary file next to
/// `path`, then renamed into place. On failure no file is left at `path`.
pub fn save_image(canvas: &RgbImage, path: &Path) -> Result<()> {
    let bytes = encode_image(canvas, path)?;

    let write_err = |message: String| ConvertError::Write {
        path: path.to_path_buf(),
        message,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = temp_file_in(dir).map_err(|e| write_err(e.to_string()))?;
    tmp.write_all(&bytes).map_err(|e| write_err(e.to_string()))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| write_err(e.to_string()))?;
    tmp.persist(path).map_err(|e| write_err(e.error.to_string()))?;

    Ok(())
}

/// Temporary file in `dir` that keeps the mode `File::create` would give
///
/// tempfile defaults to 0600 and the rename keeps it, so ask for 0666 and let
/// the umask apply, as it does for a plain create.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .prefix(".glyphcast")
        .permissions(Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    tempfile::Builder::new().prefix(".glyphcast").tempfile_in(dir)
}

/// Runs a full conversion: load, render and save
pub fn convert(config: &ConvertConfig) -> Result<ConversionReport> {
    config.validate()?;
    let started = Instant::now();

    let source = load_image(&config.input_path)?;
    debug!(
        "decoded {} ({}x{})",
        config.input_path.display(),
        source.width(),
        source.height()
    );

    // Fail on a bad extension before doing any work
    output_format(&config.output_path)?;

    let grid = select_cells(&source, config.width, config.height, config.filter)?;
    debug!(
        "selected {}x{} glyphs with {} filter",
        grid.width(),
        grid.height(),
        config.filter
    );

    let canvas = render_glyphs(&grid);
    save_image(&canvas, &config.output_path)?;

    info!(
        "wrote {} ({}x{}) in {:.1} ms",
        config.output_path.display(),
        canvas.width(),
        canvas.height(),
        started.elapsed().as_secs_f64() * 1000.0
    );

    Ok(ConversionReport {
        output_path: config.output_path.clone(),
        source_dimensions: source.dimensions(),
        grid_dimensions: (grid.width(), grid.height()),
        canvas_dimensions: canvas.dimensions(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::CELL_SIZE;
    use image::Rgb;

    #[test]
    fn test_render_dimensions() {
        let img = RgbImage::from_pixel(100, 100, Rgb([120, 80, 40]));
        let out = render(&img, 20, 10, ResizeFilter::default()).unwrap();
        assert_eq!(out.dimensions(), (20 * CELL_SIZE, 10 * CELL_SIZE));
    }

    #[test]
    fn test_render_rejects_zero_size() {
        let img = RgbImage::new(4, 4);
        assert!(matches!(
            render(&img, 0, 4, ResizeFilter::Nearest),
            Err(ConvertError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut img = RgbImage::new(16, 16);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgb([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8]);
        }
        let a = render(&img, 5, 3, ResizeFilter::Lanczos3).unwrap();
        let b = render(&img, 5, 3, ResizeFilter::Lanczos3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(output_format(Path::new("a.png")).unwrap(), ImageFormat::Png);
        assert_eq!(output_format(Path::new("a.JPG")).unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            output_format(Path::new("a.txt")),
            Err(ConvertError::Write { .. })
        ));
        assert!(output_format(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_encode_png_signature() {
        let canvas = RgbImage::new(6, 6);
        let bytes = encode_image(&canvas, Path::new("x.png")).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_image(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, ConvertError::Decode { .. }));
    }
}
