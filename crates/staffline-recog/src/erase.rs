//! Staff line removal
//!
//! Every traced line row is followed column by column. The vertical ink run
//! through that row is whitened only when it is short and sits on the
//! line, so stems, barlines and other glyph strokes crossing a staff line
//! survive.

use crate::staff::StaffLine;
use staffline_core::{BACKGROUND, Raster, RunDirection};

/// Erase traced staff lines from a staff sub-raster.
///
/// `left` is the column of the first entry of every line's row sequence.
/// A run `[up, down]` through a line row `r` is erased when `down - up`,
/// `r - up` and `down - r` are all at most `thickness_avg + 2`. Run extents
/// are always measured on `staff`, never on the partially erased output.
pub fn erase_lines(staff: &Raster, lines: &[StaffLine], left: u32, thickness_avg: f64) -> Raster {
    let tolerance = thickness_avg + 2.0;
    let mut out = staff.to_mut();
    let mut erased = 0usize;

    for line in lines {
        for (i, &row) in line.rows.iter().enumerate() {
            let x = i64::from(left) + i as i64;
            if !staff.is_ink_at(x, i64::from(row)) {
                continue;
            }
            let (x, row) = (x as u32, row as u32);
            let up = staff.vertical_run_length(x, row, RunDirection::Up);
            let down = staff.vertical_run_length(x, row, RunDirection::Down);
            let fits = f64::from(down - up) <= tolerance
                && f64::from(row - up) <= tolerance
                && f64::from(down - row) <= tolerance;
            if fits {
                out.set_column_span(x, up, down, BACKGROUND);
                erased += 1;
            }
        }
    }
    log::debug!("erase: whitened {} line runs", erased);
    out.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffline_core::{INK, RasterMut};

    fn staff_with_stem() -> Raster {
        let mut r = RasterMut::new(100, 60).unwrap();
        for y in [10, 20, 30, 40, 50] {
            for x in 5..=95 {
                r.set_pixel_unchecked(x, y, INK);
            }
        }
        for y in 8..=52 {
            r.set_pixel_unchecked(60, y, INK);
        }
        r.into()
    }

    #[test]
    fn test_erases_lines_keeps_stem() {
        let raster = staff_with_stem();
        let lines = StaffLine::derive_all(&[30; 91], 10);
        let cleaned = erase_lines(&raster, &lines, 5, 1.0);

        for y in [10, 20, 30, 40, 50] {
            assert_eq!(cleaned.get_pixel(5, y), Some(BACKGROUND));
            assert_eq!(cleaned.get_pixel(95, y), Some(BACKGROUND));
            assert_eq!(cleaned.get_pixel(60, y), Some(INK));
        }
        assert_eq!(raster.count_differences(&cleaned).unwrap(), 5 * 90);
        // the input is left untouched
        assert_eq!(raster.get_pixel(5, 10), Some(INK));
    }

    #[test]
    fn test_thick_line_erased_when_within_tolerance() {
        let mut r = RasterMut::new(20, 20).unwrap();
        for y in 8..13 {
            for x in 0..20 {
                r.set_pixel_unchecked(x, y, INK);
            }
        }
        let raster: Raster = r.into();
        let line = StaffLine {
            id: 2,
            rows: vec![10; 20],
        };
        let cleaned = erase_lines(&raster, std::slice::from_ref(&line), 0, 3.0);
        assert!(cleaned.data().iter().all(|&v| v == BACKGROUND));

        // a 5-row run spans more than 1 + 2 rows
        let kept = erase_lines(&raster, std::slice::from_ref(&line), 0, 1.0);
        assert_eq!(kept.count_differences(&raster).unwrap(), 0);
    }

    #[test]
    fn test_off_raster_rows_are_skipped() {
        let raster = Raster::new(10, 10).unwrap();
        let line = StaffLine {
            id: 0,
            rows: vec![-3; 10],
        };
        let cleaned = erase_lines(&raster, &[line], 0, 1.0);
        assert_eq!(cleaned.count_differences(&raster).unwrap(), 0);
    }
}
