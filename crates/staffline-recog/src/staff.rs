//! Staff geometry model
//!
//! The pipeline produces one [`StaffGeometry`] per page. Each [`Staff`]
//! owns its deskewed sub-raster and, once traced, exactly five
//! [`StaffLine`]s whose rows are given per column in the sub-raster's
//! coordinate frame.

use serde::Serialize;
use staffline_core::Raster;

/// Number of lines in a staff
pub const LINES_PER_STAFF: usize = 5;

/// Id of the center line, the one that is actually tracked
pub const CENTER_LINE: u8 = 2;

/// One traced staff line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffLine {
    /// 0 = topmost, 2 = center, 4 = bottom
    pub id: u8,
    /// Row of the line for every column in `[left_bound, right_bound]`
    pub rows: Vec<i32>,
}

impl StaffLine {
    /// Build line `id` from the traced center rows.
    pub fn from_center(id: u8, center_rows: &[i32], interline: u32) -> Self {
        let offset = interline as i32 * (i32::from(id) - i32::from(CENTER_LINE));
        Self {
            id,
            rows: center_rows.iter().map(|&r| r + offset).collect(),
        }
    }

    /// All five lines derived from the traced center rows.
    pub fn derive_all(center_rows: &[i32], interline: u32) -> Vec<StaffLine> {
        (0..LINES_PER_STAFF as u8)
            .map(|id| Self::from_center(id, center_rows, interline))
            .collect()
    }
}

/// A single staff and everything known about it
#[derive(Debug, Clone, Serialize)]
pub struct Staff {
    /// 0-based, top to bottom
    pub id: usize,
    /// Page row of the sub-raster's first row
    pub origin_row: u32,
    /// Center line row in the sub-raster, before tracking
    pub center_row: Option<u32>,
    pub left_bound: Option<u32>,
    pub right_bound: Option<u32>,
    /// Empty when the staff could not be traced
    pub lines: Vec<StaffLine>,
    #[serde(skip)]
    pub raster: Raster,
    /// Sub-raster with the staff lines erased, when requested
    #[serde(skip)]
    pub cleaned: Option<Raster>,
}

impl Staff {
    /// True when five lines were traced.
    pub fn is_traced(&self) -> bool {
        self.lines.len() == LINES_PER_STAFF
    }

    /// Get line `id`, if traced.
    pub fn line(&self, id: u8) -> Option<&StaffLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Rows of line `id` in page coordinates.
    pub fn page_rows(&self, id: u8) -> Option<Vec<i32>> {
        let origin = self.origin_row as i32;
        self.line(id)
            .map(|l| l.rows.iter().map(|&r| r + origin).collect())
    }
}

/// Page-level staff geometry
#[derive(Debug, Clone, Serialize)]
pub struct StaffGeometry {
    /// Vertical drift per half page width removed by the global deskew
    pub h_max: i32,
    /// Skew angle in degrees implied by `h_max`
    pub skew_angle: f64,
    /// Distance between consecutive staff lines, in rows
    pub interline: u32,
    /// Modal line thickness
    pub thickness0: u32,
    /// Smoothed average line thickness
    pub thickness_avg: f64,
    pub staves: Vec<Staff>,
}

impl StaffGeometry {
    /// Number of staves whose lines were traced.
    pub fn traced_count(&self) -> usize {
        self.staves.iter().filter(|s| s.is_traced()).count()
    }
}
