//! Visualization of traced staff lines

use crate::staff::Staff;
use staffline_core::Raster;

/// Gray level used to paint traced line rows
pub const LINE_GRAY: u8 = 128;

/// Copy of the staff sub-raster with every traced line row painted gray.
///
/// An untraced staff is returned unchanged.
pub fn render_traced_lines(staff: &Staff) -> Raster {
    let (Some(left), true) = (staff.left_bound, staff.is_traced()) else {
        return staff.raster.clone();
    };
    let mut out = staff.raster.to_mut();
    for line in &staff.lines {
        for (i, &row) in line.rows.iter().enumerate() {
            let x = i64::from(left) + i as i64;
            if staff.raster.contains(x, i64::from(row)) {
                out.set_pixel_unchecked(x as u32, row as u32, LINE_GRAY);
            }
        }
    }
    out.into()
}
