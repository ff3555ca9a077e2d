//! Mean structural similarity between two RGBA buffers.
//!
//! Standard SSIM over non-overlapping 8x8 windows on BT.601 luma,
//! averaged into a single score. Identical inputs score exactly 1.0.

use {
    crate::error::{Error, Result},
    image::{Rgba, RgbaImage},
};

const WINDOW: u32 = 8;

// Stabilization constants (K1 = 0.01, K2 = 0.03, L = 255).
const C1: f64 = (0.01 * 255.0) * (0.01 * 255.0);
const C2: f64 = (0.03 * 255.0) * (0.03 * 255.0);

/// Mean SSIM score in `[0, 1]`.
///
/// Both images must have the same, non-zero dimensions.
pub fn mssim(a: &RgbaImage, b: &RgbaImage) -> Result<f64> {
    if a.dimensions() != b.dimensions() {
        return Err(Error::DimensionMismatch {
            captured: a.dimensions(),
            reference: b.dimensions(),
        });
    }
    let (width, height) = a.dimensions();
    // Zero-area buffers can only come from a delegate violating its
    // capture contract; treat them as incompatible.
    if width == 0 || height == 0 {
        return Err(Error::DimensionMismatch {
            captured: a.dimensions(),
            reference: b.dimensions(),
        });
    }

    let mut total = 0.0;
    let mut windows = 0u32;
    for window_y in (0..height).step_by(WINDOW as usize) {
        for window_x in (0..width).step_by(WINDOW as usize) {
            let window_width = WINDOW.min(width - window_x);
            let window_height = WINDOW.min(height - window_y);
            total += window_ssim(a, b, window_x, window_y, window_width, window_height);
            windows += 1;
        }
    }
    // SSIM of a single window can dip slightly below zero for strongly
    // anticorrelated content; the score contract is [0, 1].
    Ok((total / f64::from(windows)).clamp(0.0, 1.0))
}

fn luma(pixel: &Rgba<u8>) -> f64 {
    // ITU-R BT.601
    0.299 * f64::from(pixel[0]) + 0.587 * f64::from(pixel[1]) + 0.114 * f64::from(pixel[2])
}

fn window_ssim(a: &RgbaImage, b: &RgbaImage, x0: u32, y0: u32, width: u32, height: u32) -> f64 {
    let n = f64::from(width * height);
    let mut sum_a = 0.0;
    let mut sum_b = 0.0;
    let mut sum_aa = 0.0;
    let mut sum_bb = 0.0;
    let mut sum_ab = 0.0;
    for y in y0..y0 + height {
        for x in x0..x0 + width {
            let la = luma(a.get_pixel(x, y));
            let lb = luma(b.get_pixel(x, y));
            sum_a += la;
            sum_b += lb;
            sum_aa += la * la;
            sum_bb += lb * lb;
            sum_ab += la * lb;
        }
    }
    let mean_a = sum_a / n;
    let mean_b = sum_b / n;
    let var_a = sum_aa / n - mean_a * mean_a;
    let var_b = sum_bb / n - mean_b * mean_b;
    let covar = sum_ab / n - mean_a * mean_b;

    ((2.0 * mean_a * mean_b + C1) * (2.0 * covar + C2))
        / ((mean_a * mean_a + mean_b * mean_b + C1) * (var_a + var_b + C2))
}
