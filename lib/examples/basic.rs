/// Basic example: Convert a generated test image to ASCII art
///
/// Draws a gradient with a colored disc, renders it at two filters and saves
/// everything next to the working directory.
use glyphcast::{CELL_SIZE, ResizeFilter, render};
use image::{Rgb, RgbImage};

fn main() {
    println!("glyphcast - Basic Example");
    println!("=========================\n");

    let width = 320;
    let height = 160;
    let mut img = RgbImage::new(width, height);

    // Horizontal gray ramp from black to white
    for y in 0..height {
        for x in 0..width {
            let gray = (x * 255 / (width - 1)) as u8;
            img.put_pixel(x, y, Rgb([gray, gray, gray]));
        }
    }

    // Orange disc in the middle
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 50.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            if (dx * dx + dy * dy).sqrt() < radius {
                img.put_pixel(x, y, Rgb([255, 140, 0]));
            }
        }
    }

    println!("Created test image: {}x{}", width, height);
    img.save("basic_input.png").expect("Failed to save input");

    let (cols, rows) = (80, 30);
    for filter in [ResizeFilter::Nearest, ResizeFilter::CatmullRom] {
        let output = render(&img, cols, rows, filter).expect("Failed to render");
        assert_eq!(output.dimensions(), (cols * CELL_SIZE, rows * CELL_SIZE));

        let name = format!("basic_output_{}.png", filter);
        output.save(&name).expect("Failed to save output");
        println!("✓ {} filter -> {} ({}x{})", filter, name, output.width(), output.height());
    }

    println!("\nASCII conversion complete!");
}
