//! Downscaling

use super::{Raster, RasterMut};
use crate::error::Result;

impl Raster {
    /// Halve both dimensions by averaging each 2×2 block.
    ///
    /// An odd trailing row or column is dropped.
    pub fn scale_half(&self) -> Result<Raster> {
        let w = self.width() / 2;
        let h = self.height() / 2;
        let mut out = RasterMut::new(w, h)?;
        for y in 0..h {
            let top = self.row(2 * y);
            let bottom = self.row(2 * y + 1);
            let dst = out.row_mut(y);
            for (x, d) in dst.iter_mut().enumerate() {
                let sum = u16::from(top[2 * x])
                    + u16::from(top[2 * x + 1])
                    + u16::from(bottom[2 * x])
                    + u16::from(bottom[2 * x + 1]);
                *d = ((sum + 2) / 4) as u8;
            }
        }
        Ok(out.into())
    }
}
