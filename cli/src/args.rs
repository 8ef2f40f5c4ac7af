use std::path::PathBuf;

use clap::{ArgAction, Parser};
use glyphcast::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use glyphcast::{ConvertConfig, ResizeFilter};

/// Convert an image to ASCII art
#[derive(Parser, Debug)]
#[command(name = "glyphcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the input image file
    pub input_image: PathBuf,

    /// Path to save the output ASCII art image (extension selects the format)
    pub output_image: PathBuf,

    /// Width of the output image in characters
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Height of the output image in characters
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Resampling filter: nearest, triangle, catmull-rom, gaussian, lanczos3
    #[arg(long, default_value_t = ResizeFilter::default())]
    pub filter: ResizeFilter,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not print the success message
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig::new(&self.input_image, &self.output_image)
            .with_size(self.width, self.height)
            .with_filter(self.filter)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
