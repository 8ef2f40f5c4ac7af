use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::imageops::FilterType;

use crate::ascii::CELL_SIZE;
use crate::error::{ConvertError, Result};

/// Default grid width in character cells
pub const DEFAULT_WIDTH: u32 = 200;
/// Default grid height in character cells
pub const DEFAULT_HEIGHT: u32 = 100;

/// Resampling filter used when shrinking the source to the character grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    /// Bicubic
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    pub const ALL: [ResizeFilter; 5] = [
        ResizeFilter::Nearest,
        ResizeFilter::Triangle,
        ResizeFilter::CatmullRom,
        ResizeFilter::Gaussian,
        ResizeFilter::Lanczos3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Triangle => "triangle",
            ResizeFilter::CatmullRom => "catmull-rom",
            ResizeFilter::Gaussian => "gaussian",
            ResizeFilter::Lanczos3 => "lanczos3",
        }
    }

    pub fn filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ResizeFilter::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = ResizeFilter::ALL.iter().map(|f| f.name()).collect();
                format!("unknown filter '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// Configuration for a single conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    /// Image to read
    pub input_path: PathBuf,
    /// Image to write; the extension picks the encoder
    pub output_path: PathBuf,

    /// Grid size in character cells
    pub width: u32,  // default 200
    pub height: u32, // default 100

    pub filter: ResizeFilter, // default CatmullRom
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_path: PathBuf::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            filter: ResizeFilter::default(),
        }
    }
}

impl ConvertConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Default::default()
        }
    }

    /// Set the grid size in character cells
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;

        if self.input_path.as_os_str().is_empty() {
            return Err(ConvertError::invalid("input image path is empty", None));
        }
        validate_output_path(&self.output_path)
    }
}

/// Checks that a grid of `width` x `height` cells yields a representable canvas
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ConvertError::invalid(
            format!("width and height must be positive, got {}x{}", width, height),
            Some("pass --width and --height values of at least 1"),
        ));
    }
    if width.checked_mul(CELL_SIZE).is_none() || height.checked_mul(CELL_SIZE).is_none() {
        return Err(ConvertError::invalid(
            format!(
                "a {}x{} grid does not fit in an image at {} pixels per cell",
                width, height, CELL_SIZE
            ),
            None,
        ));
    }

    let limit = max_canvas_bytes();
    let bytes = canvas_bytes(width, height);
    if bytes > limit {
        return Err(ConvertError::invalid(
            format!(
                "a {}x{} grid needs a {} MiB canvas, over the {} MiB limit",
                width,
                height,
                bytes >> 20,
                limit >> 20
            ),
            Some("use a smaller --width and --height"),
        ));
    }
    Ok(())
}

/// Largest output canvas in bytes, taken from the `image` crate's default
/// allocation limit
pub fn max_canvas_bytes() -> u64 {
    image::Limits::default().max_alloc.unwrap_or(u64::MAX)
}

/// Size in bytes of the RGB canvas for a `width` x `height` grid
pub fn canvas_bytes(width: u32, height: u32) -> u64 {
    let cell = CELL_SIZE as u64;
    (width as u64 * cell)
        .saturating_mul(height as u64 * cell)
        .saturating_mul(3)
}

fn validate_output_path(path: &Path) -> Result<()> {
    let help = Some("name an image file, e.g. ascii.png");

    if path.as_os_str().is_empty() {
        return Err(ConvertError::invalid("output image path is empty", help));
    }
    if path.file_name().is_none() {
        return Err(ConvertError::invalid(
            format!("output path '{}' is not a file name", path.display()),
            help,
        ));
    }
    if path.is_dir() {
        return Err(ConvertError::invalid(
            format!("output path '{}' is a directory", path.display()),
            help,
        ));
    }
    Ok(())
}
