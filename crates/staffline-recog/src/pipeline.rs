//! Page-level staff detection
//!
//! [`detect_staves`] chains every stage of the crate:
//!
//! 1. binarize and deskew the page,
//! 2. estimate the interline from the horizontal profile,
//! 3. locate staff centers and split the page into bands,
//! 4. estimate line thickness once over all staves,
//! 5. per staff: re-deskew the band, refine its center, find its bounds,
//!    track its lines and optionally erase them.
//!
//! Page-level failures abort the run. A staff whose bounds or tracking
//! start cannot be found is kept in the result without lines.

use crate::bounds::locate_bounds;
use crate::deskew::{self, skew_angle_degrees};
use crate::erase::erase_lines;
use crate::interline::estimate_interline;
use crate::locate::{self, StaffBand};
use crate::staff::{Staff, StaffGeometry};
use crate::thickness::{estimate_thickness, thickness_histogram};
use crate::track::{TrackParams, trace_lines};
use crate::{RecogError, RecogResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use staffline_core::{DEFAULT_THRESHOLD, Raster};

/// Options for staff detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffDetectOptions {
    /// Gray level at or below which a pixel is ink (default: 220)
    pub threshold: u8,

    /// Half range of the vertical shift search, in rows (default: 30)
    pub deskew_range: u32,

    /// Number of autocorrelation lags examined (default: 50)
    pub max_lag: u32,

    /// Smallest accepted interline (default: 4)
    pub min_interline: u32,

    /// Height of the thickness window in interlines (default: 6)
    pub thickness_window: u32,

    /// Tracker smoothing weight of the previous column (default: 0.98)
    pub alpha: f64,

    /// Deskew each staff band again after cropping (default: true)
    pub deskew_staves: bool,

    /// Produce a cleaned raster for every traced staff (default: false)
    pub erase_lines: bool,

    /// Process staves on the rayon thread pool (default: true)
    pub parallel: bool,
}

impl Default for StaffDetectOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            deskew_range: 30,
            max_lag: 50,
            min_interline: 4,
            thickness_window: 6,
            alpha: 0.98,
            deskew_staves: true,
            erase_lines: false,
            parallel: true,
        }
    }
}

impl StaffDetectOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the binarization threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the deskew search half range
    pub fn with_deskew_range(mut self, range: u32) -> Self {
        self.deskew_range = range;
        self
    }

    /// Set the number of autocorrelation lags
    pub fn with_max_lag(mut self, max_lag: u32) -> Self {
        self.max_lag = max_lag;
        self
    }

    /// Set the smallest accepted interline
    pub fn with_min_interline(mut self, min_interline: u32) -> Self {
        self.min_interline = min_interline;
        self
    }

    /// Set the thickness window height in interlines
    pub fn with_thickness_window(mut self, window: u32) -> Self {
        self.thickness_window = window;
        self
    }

    /// Set the tracker smoothing weight
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Enable or disable per-staff deskewing
    pub fn with_deskew_staves(mut self, enable: bool) -> Self {
        self.deskew_staves = enable;
        self
    }

    /// Enable or disable staff line erasure
    pub fn with_erase_lines(mut self, enable: bool) -> Self {
        self.erase_lines = enable;
        self
    }

    /// Enable or disable parallel per-staff processing
    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if self.min_interline == 0 {
            return Err(RecogError::InvalidParameter(
                "min_interline must be positive".to_string(),
            ));
        }
        if self.max_lag <= self.min_interline {
            return Err(RecogError::InvalidParameter(format!(
                "max_lag ({}) must exceed min_interline ({})",
                self.max_lag, self.min_interline
            )));
        }
        if self.thickness_window == 0 {
            return Err(RecogError::InvalidParameter(
                "thickness_window must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.alpha) {
            return Err(RecogError::InvalidParameter(format!(
                "alpha must be in [0, 1), got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Page-wide quantities every staff is processed with
#[derive(Debug, Clone, Copy)]
struct PageParams {
    interline: u32,
    thickness0: u32,
    thickness_avg: f64,
}

/// Detect every staff on a page and trace its lines.
///
/// # Errors
///
/// - [`RecogError::InvalidParameter`] if `options` do not validate, or if
///   the thickness window in rows does not fit a `u32`.
/// - [`RecogError::UndeterminedGeometry`] if no interline or line thickness
///   can be measured.
/// - [`RecogError::NoContent`] if no staff is found.
pub fn detect_staves(raster: &Raster, options: &StaffDetectOptions) -> RecogResult<StaffGeometry> {
    options.validate()?;

    let binary = raster.binarize(options.threshold);
    let (page, shear) = deskew::deskew(&binary, options.deskew_range);
    let skew_angle = skew_angle_degrees(shear.h_max, page.width());

    let profile = page.horizontal_profile();
    let interline = estimate_interline(&profile, options.max_lag, options.min_interline);
    if interline == 0 {
        return Err(RecogError::UndeterminedGeometry(
            "no periodic line structure in the horizontal profile".to_string(),
        ));
    }

    let centers = locate::find_staff_centers(&profile, interline);
    if centers.is_empty() {
        return Err(RecogError::NoContent("no staff found on the page".to_string()));
    }
    log::debug!("staff centers: {:?}", centers);

    let window = options.thickness_window.checked_mul(interline).ok_or_else(|| {
        RecogError::InvalidParameter(format!(
            "thickness_window ({}) times interline ({}) overflows",
            options.thickness_window, interline
        ))
    })?;
    let hist = thickness_histogram(&page, &centers, window);
    let thickness = estimate_thickness(&hist);
    let thickness_avg = match thickness.thickness_avg {
        Some(avg) if thickness.thickness0 > 0 => avg,
        _ => {
            return Err(RecogError::UndeterminedGeometry(
                "staff line thickness could not be measured".to_string(),
            ));
        }
    };
    let params = PageParams {
        interline,
        thickness0: thickness.thickness0,
        thickness_avg,
    };

    let bands = locate::staff_bands(&centers, interline, page.height());
    let staves: Vec<Staff> = if options.parallel {
        bands
            .par_iter()
            .enumerate()
            .map(|(id, band)| process_staff(id, &page, band, &params, options))
            .collect::<RecogResult<_>>()?
    } else {
        bands
            .iter()
            .enumerate()
            .map(|(id, band)| process_staff(id, &page, band, &params, options))
            .collect::<RecogResult<_>>()?
    };

    let geometry = StaffGeometry {
        h_max: shear.h_max,
        skew_angle,
        interline,
        thickness0: params.thickness0,
        thickness_avg,
        staves,
    };
    log::info!(
        "{} staves ({} traced), interline {}, thickness {} (avg {:.2}), skew {:.3}°",
        geometry.staves.len(),
        geometry.traced_count(),
        interline,
        geometry.thickness0,
        thickness_avg,
        skew_angle
    );
    Ok(geometry)
}

/// Build one staff from its band of the deskewed page.
fn process_staff(
    id: usize,
    page: &Raster,
    band: &StaffBand,
    params: &PageParams,
    options: &StaffDetectOptions,
) -> RecogResult<Staff> {
    let deskew_range = options.deskew_staves.then_some(options.deskew_range);
    let raster = locate::extract_band(page, band, deskew_range)?;
    let mut staff = Staff {
        id,
        origin_row: band.origin,
        center_row: None,
        left_bound: None,
        right_bound: None,
        lines: Vec::new(),
        raster,
        cleaned: None,
    };

    let Some(center) = locate::refine_center(&staff.raster.horizontal_profile(), params.interline)
    else {
        log::warn!("staff {}: no center line found in band", id);
        return Ok(staff);
    };
    staff.center_row = Some(center);

    let bounds = locate_bounds(
        &staff.raster,
        center,
        params.interline,
        params.thickness0,
        params.thickness_avg,
    );
    staff.left_bound = bounds.left;
    staff.right_bound = bounds.right;
    let Some((left, right)) = bounds.both() else {
        log::warn!("staff {}: bounds undetermined ({:?})", id, bounds);
        return Ok(staff);
    };

    let track = TrackParams {
        interline: params.interline,
        thickness0: params.thickness0,
        alpha: options.alpha,
    };
    match trace_lines(&staff.raster, center, left, right, &track) {
        Ok(lines) => staff.lines = lines,
        Err(e @ (RecogError::BoundaryNotReached { .. } | RecogError::UndeterminedGeometry(_))) => {
            log::warn!("staff {}: not traced: {}", id, e);
            return Ok(staff);
        }
        Err(e) => return Err(e),
    }
    log::debug!(
        "staff {}: origin {} center {} bounds [{}, {}]",
        id,
        staff.origin_row,
        center,
        left,
        right
    );

    if options.erase_lines {
        staff.cleaned = Some(erase_lines(
            &staff.raster,
            &staff.lines,
            left,
            params.thickness_avg,
        ));
    }
    Ok(staff)
}
