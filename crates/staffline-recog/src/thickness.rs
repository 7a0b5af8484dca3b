//! Staff line thickness estimation
//!
//! Vertical ink runs are collected in a window around every staff center.
//! Staff lines dominate those runs, so the histogram mode is the line
//! thickness.

use staffline_core::{Histogram, Raster};

/// Line thickness statistics for a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineThickness {
    /// Most frequent run length (0 if no run was found)
    pub thickness0: u32,

    /// Count-weighted mean of the run lengths `thickness0 - 1 ..= thickness0 + 1`.
    /// `None` when none of those lengths occurred.
    pub thickness_avg: Option<f64>,
}

/// Histogram of vertical ink runs inside a `window`-row band centred on each row of `centers`.
///
/// A run starting above the band is measured from the band's first row.
/// Runs reaching `window` rows or more are dropped. A window of
/// `2·height + 2` rows already covers the raster from any center, so taller
/// windows are clamped to it.
pub fn thickness_histogram(raster: &Raster, centers: &[u32], window: u32) -> Histogram {
    let window = window.min(raster.height().saturating_mul(2).saturating_add(2));
    let mut hist = Histogram::new(window as usize);
    if window == 0 {
        return hist;
    }
    let half = i64::from(window.div_ceil(2));
    let height = i64::from(raster.height());

    for x in 0..i64::from(raster.width()) {
        for &c in centers {
            let c = i64::from(c);
            let end = (c + half).min(height);
            let mut y = (c - half).max(0);
            while y < end {
                if raster.is_ink_at(x, y) {
                    let mut len = 1;
                    y += 1;
                    while y < end && raster.is_ink_at(x, y) {
                        len += 1;
                        y += 1;
                    }
                    if len < window {
                        hist.increment(len as usize);
                    }
                }
                y += 1;
            }
        }
    }
    hist
}

/// Derive the modal and smoothed line thickness from a run histogram.
pub fn estimate_thickness(hist: &Histogram) -> LineThickness {
    let thickness0 = hist.mode();
    let thickness_avg = hist.weighted_mean_around(thickness0, 1);
    log::debug!(
        "thickness: mode {} avg {:?} over {} runs",
        thickness0,
        thickness_avg,
        hist.total()
    );
    LineThickness {
        thickness0: thickness0 as u32,
        thickness_avg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffline_core::{INK, RasterMut};

    fn staff(width: u32, height: u32, top: u32, il: u32, t: u32) -> Raster {
        let mut r = RasterMut::new(width, height).unwrap();
        for k in 0..5 {
            for dy in 0..t {
                for x in 0..width {
                    r.set_pixel_unchecked(x, top + k * il + dy, INK);
                }
            }
        }
        r.into()
    }

    #[test]
    fn test_histogram_counts_every_line() {
        let raster = staff(20, 80, 10, 12, 3);
        let hist = thickness_histogram(&raster, &[35], 72);
        assert_eq!(hist.count(3), 5 * 20);
        assert_eq!(hist.total(), 5 * 20);
    }

    #[test]
    fn test_estimate_thickness() {
        let raster = staff(20, 80, 10, 12, 3);
        let t = estimate_thickness(&thickness_histogram(&raster, &[35], 72));
        assert_eq!(t.thickness0, 3);
        assert_eq!(t.thickness_avg, Some(3.0));
    }

    #[test]
    fn test_long_runs_dropped() {
        let raster = Raster::new_filled(4, 40, INK).unwrap();
        let hist = thickness_histogram(&raster, &[20], 12);
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn test_window_clipped_at_page_edge() {
        let raster = staff(5, 40, 0, 4, 1);
        // rows 0..14: the line at row 16 is outside the window
        let hist = thickness_histogram(&raster, &[2], 24);
        assert_eq!(hist.count(1), 4 * 5);
    }

    #[test]
    fn test_huge_window_covers_whole_raster() {
        let raster = staff(20, 80, 10, 12, 3);
        let hist = thickness_histogram(&raster, &[35], u32::MAX);
        assert_eq!(hist.count(3), 5 * 20);
        assert_eq!(hist.total(), 5 * 20);
    }

    #[test]
    fn test_blank_window_is_undeterminable() {
        let raster = Raster::new(30, 60).unwrap();
        let t = estimate_thickness(&thickness_histogram(&raster, &[30], 60));
        assert_eq!(t.thickness0, 0);
        assert_eq!(t.thickness_avg, None);
    }
}
