//! Staffline - Staff line analysis for scanned sheet music
//!
//! Finds the staves of a binarized score page and measures their geometry:
//! global skew, line spacing, line thickness, horizontal extent and the row
//! of every staff line in every column. The traced lines can then be erased
//! while the notes, stems and barlines crossing them are kept.
//!
//! # Overview
//!
//! - Raster, profile and histogram types (re-exported at the crate root)
//! - Image I/O for PNG, PNM and JPEG ([`io`])
//! - The staff detection pipeline and its stages ([`recog`])
//!
//! # Example
//!
//! ```
//! use staffline::{INK, RasterMut};
//! use staffline::recog::{StaffDetectOptions, detect_staves};
//!
//! // Two five-line staves, 12 rows apart, 3 rows thick
//! let mut page = RasterMut::new(400, 400).unwrap();
//! for top in [60, 240] {
//!     for k in 0..5 {
//!         for y in top + 12 * k..top + 12 * k + 3 {
//!             for x in 30..370 {
//!                 page.set_pixel_unchecked(x, y, INK);
//!             }
//!         }
//!     }
//! }
//!
//! let geometry = detect_staves(&page.into(), &StaffDetectOptions::default()).unwrap();
//! assert_eq!(geometry.interline, 12);
//! assert_eq!(geometry.staves.len(), 2);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use staffline_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use staffline_io as io;
pub use staffline_recog as recog;
