use image::{RgbImage, imageops};
use rayon::prelude::*;

use crate::config::ResizeFilter;

/// Per-cell brightness of a resized image
///
/// Each cell keeps the sum of the pixel's red, green and blue channels; the
/// brightness is that sum divided by three, in `[0.0, 255.0]`. Stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrightnessGrid {
    width: u32,
    height: u32,
    sums: Vec<u16>,
}

impl BrightnessGrid {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Brightness at column `x`, row `y`
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.channel_sum(x, y) as f32 / 3.0
    }

    /// Sum of the three channels at column `x`, row `y`
    pub fn channel_sum(&self, x: u32, y: u32) -> u16 {
        assert!(x < self.width && y < self.height, "cell out of bounds");
        self.sums[(y * self.width + x) as usize]
    }

    /// Brightness of every cell, row-major
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.sums.iter().map(|&sum| sum as f32 / 3.0)
    }
}

/// Resample `img` to exactly `width` x `height` pixels, one per character cell
pub fn resize_to_grid(img: &RgbImage, width: u32, height: u32, filter: ResizeFilter) -> RgbImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, filter.filter_type())
}

/// Sum of the three channels of an RGB triple
pub fn channel_sum(rgb: [u8; 3]) -> u16 {
    rgb[0] as u16 + rgb[1] as u16 + rgb[2] as u16
}

/// Mean of the three channels of an RGB triple
pub fn pixel_brightness(rgb: [u8; 3]) -> f32 {
    channel_sum(rgb) as f32 / 3.0
}

/// Calculate the brightness of every pixel
///
/// Rows are processed in parallel and collected in order.
pub fn calculate_brightness(img: &RgbImage) -> BrightnessGrid {
    let (width, height) = img.dimensions();

    let sums: Vec<u16> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| (0..width).map(move |x| channel_sum(img.get_pixel(x, y).0)))
        .collect();

    BrightnessGrid {
        width,
        height,
        sums,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_channel_sum() {
        assert_eq!(channel_sum([0, 0, 0]), 0);
        assert_eq!(channel_sum([255, 255, 255]), 765);
        assert_eq!(channel_sum([28, 28, 29]), 85);
    }

    #[test]
    fn test_pixel_brightness() {
        assert_eq!(pixel_brightness([0, 0, 0]), 0.0);
        assert_eq!(pixel_brightness([255, 255, 255]), 255.0);
        assert_eq!(pixel_brightness([255, 0, 0]), 85.0);
        assert!((pixel_brightness([10, 20, 31]) - 61.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_brightness_grid_dimensions() {
        let img = RgbImage::from_pixel(7, 3, Rgb([30, 60, 90]));
        let grid = calculate_brightness(&img);
        assert_eq!(grid.dimensions(), (7, 3));
        assert_eq!(grid.values().count(), 21);
        assert!(grid.values().all(|b| b == 60.0));
        assert_eq!(grid.channel_sum(6, 2), 180);
    }

    #[test]
    fn test_brightness_grid_row_major() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        img.put_pixel(0, 1, Rgb([90, 90, 90]));
        let grid = calculate_brightness(&img);

        assert_eq!(grid.get(0, 0), 0.0);
        assert_eq!(grid.get(1, 0), 255.0);
        assert_eq!(grid.get(0, 1), 90.0);
        assert_eq!(grid.get(1, 1), 0.0);

        let values: Vec<f32> = grid.values().collect();
        assert_eq!(values, vec![0.0, 255.0, 90.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "cell out of bounds")]
    fn test_brightness_get_out_of_bounds() {
        let grid = calculate_brightness(&RgbImage::new(2, 2));
        grid.get(2, 0);
    }

    #[test]
    fn test_resize_to_grid_exact_dimensions() {
        let img = RgbImage::from_pixel(100, 37, Rgb([1, 2, 3]));
        for filter in ResizeFilter::ALL {
            let resized = resize_to_grid(&img, 13, 5, filter);
            assert_eq!(resized.dimensions(), (13, 5));
        }
    }

    #[test]
    fn test_resize_to_grid_upscales() {
        let img = RgbImage::from_pixel(1, 1, Rgb([200, 100, 50]));
        let resized = resize_to_grid(&img, 4, 2, ResizeFilter::Nearest);
        assert_eq!(resized.dimensions(), (4, 2));
        assert!(resized.pixels().all(|p| *p == Rgb([200, 100, 50])));
    }

    #[test]
    fn test_resize_to_grid_same_size_is_identity() {
        let mut img = RgbImage::new(3, 3);
        img.put_pixel(1, 1, Rgb([9, 8, 7]));
        let resized = resize_to_grid(&img, 3, 3, ResizeFilter::Lanczos3);
        assert_eq!(resized, img);
    }
}
