//! Horizontal staff extent
//!
//! For each column a density value counts ink on the five expected line
//! rows, allowing a small vertical slack. The staff starts at the first
//! column where that density stays above a threshold for a run of columns
//! and ends at the last such column. The threshold is lowered step by
//! step until a bound is found, separately for each side.

use serde::Serialize;
use staffline_core::{Profile, Raster};

/// Left and right column of a staff; `None` when undetermined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StaffBounds {
    pub left: Option<u32>,
    pub right: Option<u32>,
}

impl StaffBounds {
    /// Both bounds, if both were found and are ordered.
    pub fn both(&self) -> Option<(u32, u32)> {
        match (self.left, self.right) {
            (Some(l), Some(r)) if l <= r => Some((l, r)),
            _ => None,
        }
    }
}

/// Per-column ink density on the five line rows around `center`.
///
/// Each line is sampled over `±(thickness0/2 + 1)` rows; the whole comb may
/// slide by up to `±round(interline/2)` rows and the best position is kept.
pub fn column_density(staff: &Raster, center: u32, interline: u32, thickness0: u32) -> Profile {
    let il = i64::from(interline);
    let center = i64::from(center);
    let dx = i64::from(thickness0 / 2) + 1;
    let dp = (f64::from(interline) / 2.0).round() as i64;

    (0..i64::from(staff.width()))
        .map(|col| {
            (-dp..=dp)
                .map(|p| {
                    let mut count = 0;
                    for k in -2..=2 {
                        for d in -dx..=dx {
                            if staff.is_ink_at(col, center + k * il + d + p) {
                                count += 1;
                            }
                        }
                    }
                    count
                })
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Columns of confirmation required after a left bound and before a right bound.
fn windows(interline: u32) -> (usize, usize) {
    if interline < 4 {
        ((2 * interline as usize).max(5), (interline as usize).max(5))
    } else {
        (2 * interline as usize, interline as usize)
    }
}

/// First column `y > 0` whose density exceeds `thresh` and whose next
/// `window - 1` columns stay at or above it.
pub fn find_left_bound(profile: &Profile, thresh: u32, window: usize) -> Option<u32> {
    let p = profile.as_slice();
    (1..p.len())
        .find(|&y| {
            p[y] > thresh
                && y + window <= p.len()
                && p[y + 1..y + window].iter().all(|&v| v >= thresh)
        })
        .map(|y| y as u32)
}

/// Last column whose density exceeds `thresh` and whose previous `window`
/// columns stay at or above it. Column `window` itself is never accepted.
pub fn find_right_bound(profile: &Profile, thresh: u32, window: usize) -> Option<u32> {
    let p = profile.as_slice();
    (window + 1..p.len())
        .rev()
        .find(|&y| p[y] > thresh && p[y - window..y].iter().all(|&v| v >= thresh))
        .map(|y| y as u32)
}

/// Locate the left and right bounds of a staff.
///
/// Thresholds from `round(2.5·thickness_avg)` down to 0 are tried until a
/// bound is found; left and right are searched independently. If the two
/// searches settle on crossed columns, both bounds are undetermined.
pub fn locate_bounds(
    staff: &Raster,
    center: u32,
    interline: u32,
    thickness0: u32,
    thickness_avg: f64,
) -> StaffBounds {
    if interline == 0 {
        return StaffBounds::default();
    }
    let profile = column_density(staff, center, interline, thickness0);
    let (left_window, right_window) = windows(interline);
    let start = (2.5 * thickness_avg).round().max(0.0) as u32;

    let left = (0..=start)
        .rev()
        .find_map(|t| find_left_bound(&profile, t, left_window));
    let right = (0..=start)
        .rev()
        .find_map(|t| find_right_bound(&profile, t, right_window));
    log::debug!("bounds: left {:?} right {:?} (start threshold {})", left, right, start);
    if matches!((left, right), (Some(l), Some(r)) if l > r) {
        log::debug!("bounds crossed, discarding both");
        return StaffBounds::default();
    }
    StaffBounds { left, right }
}
