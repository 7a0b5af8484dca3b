//! Column-by-column tracking of the staff center line
//!
//! Even after deskewing, staff lines bend slightly across a page. The
//! tracker follows the center line with a five-line template.
//!
//! # Algorithm Overview
//!
//! 1. **Mask**: A window of `2·floor(2.5·interline)` rows holds +1 on the
//!    rows where a line is expected and -1 elsewhere.
//!
//! 2. **Start column**: Starting at the left bound, skip columns where the
//!    window is mostly ink (the opening barline).
//!
//! 3. **Correlate**: At every column the window is slid by `Δx` in
//!    `±floor(interline/2)` rows and correlated with the column's pixels
//!    (ink = +1, paper = -1), normalized by the window height.
//!
//! 4. **Smooth**: Each column's correlation curve is blended with the
//!    previous column's, `c = (1 - α)·c + α·c_prev`, and the best `Δx`
//!    gives the center row for that column.

use crate::staff::StaffLine;
use crate::{RecogError, RecogResult};
use staffline_core::Raster;

/// Tracking parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackParams {
    pub interline: u32,
    pub thickness0: u32,
    /// Weight of the previous column's correlation, in `[0, 1)`
    pub alpha: f64,
}

impl TrackParams {
    fn half_window(&self) -> i64 {
        i64::from(5 * self.interline / 2)
    }

    fn shift_range(&self) -> i64 {
        i64::from(self.interline / 2)
    }
}

/// Build the line template: +1 within `±floor(thickness0/2)` of each of the
/// five line offsets around the window center, -1 elsewhere.
pub fn staff_mask(interline: u32, thickness0: u32) -> Vec<i8> {
    let half = i64::from(5 * interline / 2);
    let band = i64::from(thickness0 / 2);
    let il = i64::from(interline);
    (0..2 * half)
        .map(|x| {
            let on_line = (-2..=2).any(|k| (x - (half + k * il)).abs() <= band);
            if on_line { 1 } else { -1 }
        })
        .collect()
}

/// First column at or after `left` where the tracking window around
/// `center` holds more paper than ink.
///
/// # Errors
///
/// Returns [`RecogError::BoundaryNotReached`] if no such column exists up
/// to a third of the staff width.
pub fn find_start_column(
    staff: &Raster,
    center: u32,
    left: u32,
    params: &TrackParams,
) -> RecogResult<u32> {
    let half = params.half_window();
    let stop_col = (f64::from(staff.width()) / 3.0).round() as u32;
    let center = i64::from(center);
    let mut col = left;
    loop {
        let (mut paper, mut ink) = (0u32, 0u32);
        for h in -half..half {
            let y = center + h;
            if !staff.contains(i64::from(col), y) {
                continue;
            }
            if staff.is_ink_at(i64::from(col), y) {
                ink += 1;
            } else {
                paper += 1;
            }
        }
        if paper > ink {
            return Ok(col);
        }
        if col > stop_col {
            return Err(RecogError::BoundaryNotReached { stop_col });
        }
        col += 1;
    }
}

/// Correlation curve of one column against the mask for every shift.
fn correlation_curve(
    staff: &Raster,
    mask: &[i8],
    center: i64,
    col: u32,
    params: &TrackParams,
) -> Vec<f64> {
    let half = params.half_window();
    let range = params.shift_range();
    let norm = mask.len() as f64;
    (-range..=range)
        .map(|dx| {
            let sum: i64 = mask
                .iter()
                .zip(-half..half)
                .map(|(&m, h)| {
                    let v = if staff.is_ink_at(i64::from(col), center + h + dx) {
                        1
                    } else {
                        -1
                    };
                    i64::from(m) * v
                })
                .sum();
            sum as f64 / norm
        })
        .collect()
}

/// Track the center line row for every column in `left..=right`.
///
/// The result has `right - left + 1` entries, each an absolute row in
/// `staff`. Columns before the start column repeat the start column's
/// correlation, so the line stays flat under an opening barline.
///
/// # Errors
///
/// - [`RecogError::UndeterminedGeometry`] for a zero interline, thickness
///   or center, or `right < left`.
/// - [`RecogError::BoundaryNotReached`] if no start column is found.
pub fn track_center_line(
    staff: &Raster,
    center: u32,
    left: u32,
    right: u32,
    params: &TrackParams,
) -> RecogResult<Vec<i32>> {
    if params.interline == 0 || params.thickness0 == 0 || center == 0 {
        return Err(RecogError::UndeterminedGeometry(format!(
            "cannot track with interline {}, thickness {}, center {}",
            params.interline, params.thickness0, center
        )));
    }
    if right < left || right >= staff.width() {
        return Err(RecogError::UndeterminedGeometry(format!(
            "invalid staff bounds [{}, {}] for width {}",
            left,
            right,
            staff.width()
        )));
    }

    let mask = staff_mask(params.interline, params.thickness0);
    let range = params.shift_range();
    let c = i64::from(center);
    let start = find_start_column(staff, center, left, params)?;
    log::debug!("track: start column {} (left bound {})", start, left);

    let start_curve = correlation_curve(staff, &mask, c, start, params);
    let mut shift = 0i64;
    let mut best = -1.0;
    for (i, &v) in start_curve.iter().enumerate() {
        if v > best {
            best = v;
            shift = i as i64 - range;
        }
    }

    let mut rows = Vec::with_capacity((right - left + 1) as usize);
    rows.push((c + shift) as i32);
    let mut prev = start_curve.clone();
    for col in left + 1..=right {
        let raw = if col <= start {
            start_curve.clone()
        } else {
            correlation_curve(staff, &mask, c, col, params)
        };
        let mut best = 0.0;
        let cur: Vec<f64> = raw
            .iter()
            .zip(&prev)
            .map(|(&r, &p)| (1.0 - params.alpha) * r + params.alpha * p)
            .collect();
        for (i, &v) in cur.iter().enumerate() {
            if v > best {
                best = v;
                shift = i as i64 - range;
            }
        }
        rows.push((c + shift) as i32);
        prev = cur;
    }
    Ok(rows)
}

/// Track the center line and derive all five staff lines from it.
pub fn trace_lines(
    staff: &Raster,
    center: u32,
    left: u32,
    right: u32,
    params: &TrackParams,
) -> RecogResult<Vec<StaffLine>> {
    let center_rows = track_center_line(staff, center, left, right, params)?;
    Ok(StaffLine::derive_all(&center_rows, params.interline))
}
