//! Shear detection and correction
//!
//! A scanned page that is slightly rotated shows staff lines that drift
//! vertically in proportion to their column. This module measures that
//! drift and resamples the page to undo it.
//!
//! # Algorithm Overview
//!
//! 1. **Split**: The binary raster is split into a left and a right half.
//!
//! 2. **Correlate**: For every trial shift `s` in `-range..=range`, each
//!    pixel is mapped to -1 (ink) or +1 (paper) and the left half is
//!    multiplied pixel-by-pixel with the right half moved up by `s` rows.
//!    The sum is normalized by the page area.
//!
//! 3. **Resample**: With `h_max` the best shift, output pixel `(col, row)`
//!    is read from input row `row - 2·h_max·col/width`. Rows that fall
//!    outside the page become paper.

use rayon::prelude::*;
use staffline_core::{BACKGROUND, INK, Raster};

/// Result of shear detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearResult {
    /// Vertical offset in rows that best aligns the right half with the left
    /// half. Negative when the right side of the page sits lower.
    pub h_max: i32,

    /// Normalized correlation at `h_max`
    pub score: f64,
}

impl ShearResult {
    /// Skew angle in degrees implied by this shear on a page of `width` columns.
    pub fn angle_degrees(&self, width: u32) -> f64 {
        skew_angle_degrees(self.h_max, width)
    }
}

/// Convert a half-width vertical offset into a skew angle in degrees.
///
/// Returns 0 for an empty page.
pub fn skew_angle_degrees(h_max: i32, width: u32) -> f64 {
    if width == 0 {
        return 0.0;
    }
    (2.0 * f64::from(h_max) / f64::from(width)).atan().to_degrees()
}

/// Correlation between the left half and the right half shifted by `shift` rows.
fn half_correlation(raster: &Raster, shift: i64) -> f64 {
    let w = raster.width() as usize;
    let h = raster.height() as i64;
    let half_cols = w / 2;
    let half_width = w.div_ceil(2);

    let mut sum: i64 = 0;
    for i in 0..h {
        let r = i - shift;
        if r < 0 || r >= h {
            continue;
        }
        let left = &raster.row(i as u32)[..half_cols];
        let right = &raster.row(r as u32)[half_width..half_width + half_cols];
        for (&a, &b) in left.iter().zip(right) {
            sum += if (a == INK) == (b == INK) { 1 } else { -1 };
        }
    }
    sum as f64 * 2.0 / (w as f64 * h as f64)
}

/// Find the vertical offset between the two page halves.
///
/// Trial shifts are scored in parallel and compared in order of increasing
/// magnitude, so ties resolve toward the smallest correction. A score must
/// be strictly positive to be accepted; an empty page yields `h_max = 0`.
pub fn find_vertical_shift(raster: &Raster, range: u32) -> ShearResult {
    if raster.width() < 2 || raster.height() == 0 {
        return ShearResult {
            h_max: 0,
            score: 0.0,
        };
    }

    let range = i64::from(range);
    let shifts: Vec<i64> = std::iter::once(0)
        .chain((1..=range).flat_map(|m| [-m, m]))
        .collect();
    let scores: Vec<f64> = shifts
        .par_iter()
        .map(|&s| half_correlation(raster, s))
        .collect();

    let mut best = ShearResult {
        h_max: 0,
        score: 0.0,
    };
    for (&s, &score) in shifts.iter().zip(&scores) {
        if score > best.score {
            best = ShearResult {
                h_max: s as i32,
                score,
            };
        }
    }
    log::debug!(
        "shear: h_max = {} (score {:.4}) over ±{}",
        best.h_max,
        best.score,
        range
    );
    best
}

/// Resample `raster` so a drift of `h_max` rows per half width is removed.
pub fn correct_shear(raster: &Raster, h_max: i32) -> Raster {
    if h_max == 0 {
        return raster.clone();
    }
    let w = i64::from(raster.width());
    let h = i64::from(raster.height());
    let mut out = raster.to_mut();
    out.fill(BACKGROUND);
    for x in 0..w {
        let offset = 2 * i64::from(h_max) * x / w;
        for y in 0..h {
            let src = y - offset;
            if (0..h).contains(&src) {
                let v = raster.get_pixel_unchecked(x as u32, src as u32);
                out.set_pixel_unchecked(x as u32, y as u32, v);
            }
        }
    }
    out.into()
}

/// Detect and remove vertical shear in one step.
pub fn deskew(raster: &Raster, range: u32) -> (Raster, ShearResult) {
    let result = find_vertical_shift(raster, range);
    (correct_shear(raster, result.h_max), result)
}
