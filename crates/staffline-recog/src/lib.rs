//! staffline-recog - Staff detection on scanned sheet music
//!
//! This crate extracts the geometry of musical staves from a page:
//!
//! - **Deskew**: Detect and remove a uniform vertical shear
//! - **Interline**: Estimate line spacing from profile autocorrelation
//! - **Staff location**: Find staff centers and split the page into bands
//! - **Thickness**: Modal and average staff line thickness
//! - **Bounds**: Horizontal extent of each staff
//! - **Tracking**: Per-column row of every staff line
//! - **Erasure**: Remove staff lines while keeping crossing glyphs
//!
//! # Quick Start
//!
//! ```no_run
//! use staffline_recog::{StaffDetectOptions, detect_staves};
//! use staffline_core::Raster;
//!
//! let page = Raster::new(1200, 1600).unwrap();
//! let geometry = detect_staves(&page, &StaffDetectOptions::default()).unwrap();
//! for staff in &geometry.staves {
//!     println!("staff {}: bounds {:?}..{:?}", staff.id, staff.left_bound, staff.right_bound);
//! }
//! ```
//!
//! # Modules
//!
//! - [`deskew`]: Shear detection and correction
//! - [`interline`]: Inter-line spacing
//! - [`locate`]: Staff centers and page bands
//! - [`thickness`]: Line thickness histogram
//! - [`bounds`]: Left and right staff bounds
//! - [`track`]: Center line tracking
//! - [`erase`]: Staff line removal
//! - [`render`]: Traced line display
//! - [`pipeline`]: The page-level pipeline

pub mod bounds;
pub mod deskew;
pub mod erase;
mod error;
pub mod interline;
pub mod locate;
pub mod pipeline;
pub mod render;
pub mod staff;
pub mod thickness;
pub mod track;

pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use bounds::StaffBounds;
pub use deskew::ShearResult;
pub use locate::StaffBand;
pub use pipeline::{StaffDetectOptions, detect_staves};
pub use staff::{Staff, StaffGeometry, StaffLine};
pub use thickness::LineThickness;
pub use track::TrackParams;

// Re-export core for convenience
pub use staffline_core;
