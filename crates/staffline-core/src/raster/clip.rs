//! Rectangular extraction

use super::Raster;
use crate::error::{Error, Result};

impl Raster {
    /// Extract the horizontal band of `height` rows starting at `y0`.
    ///
    /// The band is clamped to the raster bottom.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `y0` lies past the last row.
    pub fn crop_rows(&self, y0: u32, height: u32) -> Result<Raster> {
        if y0 > self.height() {
            return Err(Error::InvalidParameter(format!(
                "band start {y0} beyond raster height {}",
                self.height()
            )));
        }
        let h = height.min(self.height() - y0);
        let w = self.width() as usize;
        let start = y0 as usize * w;
        let data = self.data()[start..start + h as usize * w].to_vec();
        Raster::from_vec(self.width(), h, data)
    }
}
