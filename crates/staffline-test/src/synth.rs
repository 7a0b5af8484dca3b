//! Synthetic score pages
//!
//! Pages are built on white paper with ink drawn as axis-aligned strokes,
//! so every geometric quantity the pipeline estimates is known exactly.

use crate::TestResult;
use staffline_core::{INK, Raster, RasterMut};

/// Geometry of one five-line staff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffSpec {
    /// Top row of the topmost line
    pub top: u32,
    /// Distance between the top rows of consecutive lines
    pub interline: u32,
    /// Line thickness in rows
    pub thickness: u32,
    /// First inked column
    pub left: u32,
    /// Last inked column (clipped to the page)
    pub right: u32,
}

impl StaffSpec {
    /// One-pixel lines spanning the full page width.
    pub fn new(top: u32, interline: u32) -> Self {
        Self {
            top,
            interline,
            thickness: 1,
            left: 0,
            right: u32::MAX,
        }
    }

    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_columns(mut self, left: u32, right: u32) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Top row of line `k` (0 = topmost).
    pub fn line_top(&self, k: u32) -> u32 {
        self.top + k * self.interline
    }

    /// Row of the center (third) line, at the middle of its stroke.
    pub fn center_row(&self) -> u32 {
        self.line_top(2) + (self.thickness.saturating_sub(1)) / 2
    }
}

/// Incremental builder for a synthetic page
pub struct PageBuilder {
    raster: RasterMut,
}

impl PageBuilder {
    /// Start from a blank page.
    pub fn new(width: u32, height: u32) -> TestResult<Self> {
        Ok(Self {
            raster: RasterMut::new(width, height)?,
        })
    }

    /// Draw a five-line staff.
    pub fn staff(mut self, spec: &StaffSpec) -> Self {
        for k in 0..5 {
            self = self.hline(spec.line_top(k), spec.left, spec.right, spec.thickness);
        }
        self
    }

    /// Draw a horizontal stroke whose top row is `y`, covering columns `x0..=x1`.
    pub fn hline(mut self, y: u32, x0: u32, x1: u32, thickness: u32) -> Self {
        self.fill_rect(x0, y, x1, y + thickness.saturating_sub(1));
        self
    }

    /// Draw a vertical stroke `width` columns wide starting at `x`, covering rows `y0..=y1`.
    pub fn vline(mut self, x: u32, y0: u32, y1: u32, width: u32) -> Self {
        self.fill_rect(x, y0, x + width.saturating_sub(1), y1);
        self
    }

    /// Fill the rectangle `[x0, x1] × [y0, y1]` with ink.
    pub fn block(mut self, x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        self.fill_rect(x0, y0, x1, y1);
        self
    }

    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) {
        let (w, h) = (self.raster.width(), self.raster.height());
        if w == 0 || h == 0 {
            return;
        }
        for y in y0..=y1.min(h - 1) {
            for x in x0..=x1.min(w - 1) {
                self.raster.set_pixel_unchecked(x, y, INK);
            }
        }
    }

    /// Finish the page.
    pub fn build(self) -> Raster {
        self.raster.into()
    }
}

/// Apply a uniform vertical shear: column `x` moves down by `rise·x/width` rows.
///
/// Rows shifted in from outside the page are paper.
pub fn shear(raster: &Raster, rise: i64) -> TestResult<Raster> {
    let (w, h) = (raster.width(), raster.height());
    let mut out = RasterMut::new(w, h)?;
    for x in 0..w {
        let offset = rise * i64::from(x) / i64::from(w);
        for y in 0..h {
            let src = i64::from(y) - offset;
            if raster.is_ink_at(i64::from(x), src) {
                out.set_pixel_unchecked(x, y, INK);
            }
        }
    }
    Ok(out.into())
}

/// Map a binary page to gray levels, for exercising thresholding.
pub fn to_gray(raster: &Raster, ink_level: u8, paper_level: u8) -> Raster {
    let mut out = raster.to_mut();
    for v in out.data_mut() {
        *v = if *v == INK { ink_level } else { paper_level };
    }
    out.into()
}
