//! scalekit-test - Regression test framework for scalekit
//!
//! This crate provides the regression test harness used by the `*_reg`
//! integration tests, together with deterministic raster fixtures.
//! Two modes are supported:
//!
//! - **Compare**: Check results and record failures (default)
//! - **Display**: Also print the rasters under test
//!
//! # Usage
//!
//! ```ignore
//! use scalekit_test::RegParams;
//!
//! let mut rp = RegParams::new("scale");
//! rp.compare_values(4.0, dst.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
