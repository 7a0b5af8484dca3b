//! Elementary raster operations: thresholding, row projection and
//! vertical run measurement.

use super::Raster;
use crate::profile::Profile;
use crate::{BACKGROUND, INK};

/// Vertical direction for run-length measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunDirection {
    /// Towards row 0
    Up,
    /// Towards the last row
    Down,
}

impl RunDirection {
    #[inline]
    fn step(self) -> i64 {
        match self {
            RunDirection::Up => -1,
            RunDirection::Down => 1,
        }
    }
}

impl Raster {
    /// Threshold to a binary raster.
    ///
    /// Pixels strictly above `threshold` become [`BACKGROUND`], all others
    /// become [`INK`].
    pub fn binarize(&self, threshold: u8) -> Raster {
        let mut out = self.to_mut();
        for v in out.data_mut() {
            *v = if *v > threshold { BACKGROUND } else { INK };
        }
        out.into()
    }

    /// Count the ink pixels on each row.
    pub fn horizontal_profile(&self) -> Profile {
        (0..self.height())
            .map(|y| self.row(y).iter().filter(|&&v| v == INK).count() as u32)
            .collect()
    }

    /// Follow the ink run through `(x, start_y)` vertically.
    ///
    /// Single-pixel gaps are bridged. Returns the row of the last ink pixel
    /// reached, or `start_y` itself if the start pixel is not ink.
    pub fn vertical_run_length(&self, x: u32, start_y: u32, dir: RunDirection) -> u32 {
        if !self.is_ink(x, start_y) {
            return start_y;
        }
        let step = dir.step();
        let x = i64::from(x);
        let mut y = i64::from(start_y);
        loop {
            if self.is_ink_at(x, y + step) {
                y += step;
            } else if self.is_ink_at(x, y + 2 * step) {
                y += 2 * step;
            } else {
                break;
            }
        }
        y as u32
    }
}
