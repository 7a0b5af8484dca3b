//! staffline-core - Basic data structures for staff-line analysis
//!
//! This crate provides the fundamental data structures shared by the
//! staff detection pipeline:
//!
//! - [`Raster`] / [`RasterMut`] - 8-bit single-channel image (immutable / mutable)
//! - [`Profile`] - Ink density along one axis, one value per row or column
//! - [`Histogram`] - Counts indexed by run length
//!
//! The elementary raster operations (binarization, horizontal projection,
//! vertical run scanning, cropping and half-scale resizing) live on
//! [`Raster`] itself.
//!
//! # Pixel convention
//!
//! Binarized rasters hold only [`INK`] (0, black) and [`BACKGROUND`]
//! (255, paper). Everything that is not exactly [`INK`] is treated as paper.

pub mod error;
pub mod histogram;
pub mod profile;
pub mod raster;

pub use error::{Error, Result};
pub use histogram::Histogram;
pub use profile::Profile;
pub use raster::{Raster, RasterMut, RunDirection};

/// Pixel value of ink (foreground) in a binarized raster.
pub const INK: u8 = 0;

/// Pixel value of paper (background) in a binarized raster.
pub const BACKGROUND: u8 = 255;

/// Default binarization threshold for scanned scores.
///
/// Pixels strictly above the threshold become paper.
pub const DEFAULT_THRESHOLD: u8 = 220;
