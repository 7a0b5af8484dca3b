//! Pixel access functions
//!
//! Coordinates are `(x, y)` = (column, row). Checked accessors return
//! `None` or an error outside the raster; the `is_ink_at` family takes
//! signed coordinates so scan windows may hang off the page edge.

use super::{Raster, RasterMut};
use crate::INK;
use crate::error::{Error, Result};

impl Raster {
    /// Get the pixel value at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get the pixel value at `(x, y)` without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the data buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[y as usize * self.width() as usize + x as usize]
    }

    /// Check whether `(x, y)` holds ink. Out-of-bounds reads as paper.
    #[inline]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y) == Some(INK)
    }

    /// Signed variant of [`Raster::is_ink`].
    #[inline]
    pub fn is_ink_at(&self, x: i64, y: i64) -> bool {
        self.contains(x, y) && self.get_pixel_unchecked(x as u32, y as u32) == INK
    }

    /// Check whether signed coordinates fall inside the raster.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width()) && y < i64::from(self.height())
    }
}

impl RasterMut {
    /// Get the pixel value at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.data()[y as usize * self.width() as usize + x as usize])
    }

    /// Set the pixel value at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinate is outside the raster.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            let len = self.width() as usize * self.height() as usize;
            return Err(Error::IndexOutOfBounds {
                index: y as usize * self.width() as usize + x as usize,
                len,
            });
        }
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// Set the pixel value at `(x, y)` without bounds checking.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: u8) {
        let idx = y as usize * self.width() as usize + x as usize;
        self.data_mut()[idx] = value;
    }

    /// Set a vertical span `y0..=y1` of column `x` to `value`.
    ///
    /// The span is clipped to the raster.
    pub fn set_column_span(&mut self, x: u32, y0: u32, y1: u32, value: u8) {
        if x >= self.width() || self.height() == 0 {
            return;
        }
        let y1 = y1.min(self.height() - 1);
        for y in y0..=y1 {
            self.set_pixel_unchecked(x, y, value);
        }
    }
}
