//! Synthetic line-art images for tests.

use ndarray::Array3;

pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// width x height RGBA image filled with one color.
pub fn solid(width: usize, height: usize, color: [u8; 4]) -> Array3<u8> {
    let mut image = Array3::<u8>::zeros((height, width, 4));
    for y in 0..height {
        for x in 0..width {
            put(&mut image, x, y, color);
        }
    }
    image
}

pub fn put(image: &mut Array3<u8>, x: usize, y: usize, color: [u8; 4]) {
    for (c, &v) in color.iter().enumerate() {
        image[[y, x, c]] = v;
    }
}

/// 1px black rectangle outline with corners (x0, y0) and (x1, y1), inclusive.
pub fn outline_rect(image: &mut Array3<u8>, x0: usize, y0: usize, x1: usize, y1: usize) {
    for x in x0..=x1 {
        put(image, x, y0, BLACK);
        put(image, x, y1, BLACK);
    }
    for y in y0..=y1 {
        put(image, x0, y, BLACK);
        put(image, x1, y, BLACK);
    }
}

/// White image with a 1px black square outline from (lo, lo) to (hi, hi).
pub fn bordered_square(width: usize, height: usize, lo: usize, hi: usize) -> Array3<u8> {
    let mut image = solid(width, height, WHITE);
    outline_rect(&mut image, lo, lo, hi, hi);
    image
}

/// White 100x60 image: outline (10,10)-(90,50) split by a line at x = 50.
pub fn two_panels() -> Array3<u8> {
    let mut image = solid(100, 60, WHITE);
    outline_rect(&mut image, 10, 10, 90, 50);
    for y in 10..=50 {
        put(&mut image, 50, y, BLACK);
    }
    image
}

/// [`two_panels`] with a 1px light grey anti-aliasing fringe around every
/// black line pixel.
pub fn fringed_two_panels() -> Array3<u8> {
    const FRINGE: [u8; 4] = [200, 200, 200, 255];
    let mut image = two_panels();
    let (height, width, _) = image.dim();

    let mut fringe = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if image[[y, x, 0]] != 0 {
                continue;
            }
            for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                    if image[[ny, nx, 0]] == 255 {
                        fringe.push((nx, ny));
                    }
                }
            }
        }
    }
    for (x, y) in fringe {
        put(&mut image, x, y, FRINGE);
    }
    image
}
