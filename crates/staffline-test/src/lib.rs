//! staffline-test - Regression test framework for staffline
//!
//! This crate provides the regression harness shared by every crate's
//! `tests/*_reg.rs` files, plus builders for synthetic score pages with
//! known geometry.
//!
//! # Usage
//!
//! ```ignore
//! use staffline_test::{RegParams, synth::{PageBuilder, StaffSpec}};
//!
//! let page = PageBuilder::new(200, 120)?.staff(&StaffSpec::new(20, 10)).build();
//! let mut rp = RegParams::new("interline");
//! rp.compare_values(10.0, interline as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::RegParams;
