//! Staff location and page segmentation
//!
//! A comb filter matched to five lines `interline` rows apart turns the
//! horizontal profile into a signal that peaks on the center line of each
//! staff. Peaks split the page into one horizontal band per staff.

use crate::RecogResult;
use crate::deskew;
use staffline_core::{Profile, Raster};

/// Sum the profile at the five theoretical line offsets around every row.
///
/// Each offset also takes its ±1 neighbours to absorb spacing jitter.
pub fn comb_profile(profile: &Profile, interline: u32) -> Profile {
    let il = i64::from(interline);
    (0..profile.len() as i64)
        .map(|x| {
            let mut sum = 0;
            for i in -2..=2 {
                for j in -1..=1 {
                    sum += profile.get_or_zero(x + i * il + j);
                }
            }
            sum
        })
        .collect()
}

/// Find local maxima at least `range` apart.
///
/// A candidate must exceed a running maximum that starts at a third of the
/// global maximum, and no value within `[i - range, i + range)` may exceed
/// it. An unconfirmed candidate still raises the running maximum.
pub fn local_maxima(data: &Profile, range: usize) -> Vec<usize> {
    let mut maxima = Vec::new();
    let len = data.len();
    if range == 0 || len == 0 {
        return maxima;
    }
    let init_max = (f64::from(data.max().unwrap_or(0)) / 3.0).round() as u32;
    let mut max = init_max;

    let mut i = range;
    while i + range < len {
        if data[i] > max {
            max = data[i];
            let confirmed = (i - range..i + range).all(|r| data[r] <= max);
            if confirmed {
                maxima.push(i);
                i += range;
                max = init_max;
            }
        }
        i += 1;
    }
    maxima
}

/// Rows of the center line of every staff on a page, top to bottom.
pub fn find_staff_centers(profile: &Profile, interline: u32) -> Vec<u32> {
    if interline == 0 || profile.is_empty() {
        return Vec::new();
    }
    let comb = comb_profile(profile, interline);
    local_maxima(&comb, 2 * interline as usize)
        .into_iter()
        .map(|i| i as u32)
        .collect()
}

/// Center row of the single staff contained in a band, if any ink lines up.
pub fn refine_center(profile: &Profile, interline: u32) -> Option<u32> {
    if interline == 0 {
        return None;
    }
    comb_profile(profile, interline).argmax().map(|i| i as u32)
}

/// Horizontal band of the page holding one staff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffBand {
    /// First page row of the band
    pub origin: u32,
    /// Number of rows in the band
    pub height: u32,
}

/// Split a page into one band per staff center.
///
/// Bands are bounded by the midpoints between consecutive centers, widened
/// by `2·interline` on each side. The first band starts at row 0 and the
/// last one runs to the bottom of the page; neighbouring bands overlap.
pub fn staff_bands(centers: &[u32], interline: u32, page_height: u32) -> Vec<StaffBand> {
    let pad = 2 * i64::from(interline);
    let page = i64::from(page_height);
    let mids: Vec<i64> = centers
        .windows(2)
        .map(|w| ((f64::from(w[0]) + f64::from(w[1])) / 2.0).round() as i64)
        .collect();

    (0..centers.len())
        .map(|i| {
            let origin = if i == 0 { 0 } else { (mids[i - 1] - pad).max(0) };
            let end = if i + 1 < centers.len() {
                (mids[i] + pad).min(page)
            } else {
                page
            };
            StaffBand {
                origin: origin.min(page) as u32,
                height: (end - origin).max(0) as u32,
            }
        })
        .collect()
}

/// Crop a staff band out of the page, optionally removing its residual shear.
pub fn extract_band(
    page: &Raster,
    band: &StaffBand,
    deskew_range: Option<u32>,
) -> RecogResult<Raster> {
    let sub = page.crop_rows(band.origin, band.height)?;
    Ok(match deskew_range {
        Some(range) => deskew::deskew(&sub, range).0,
        None => sub,
    })
}
