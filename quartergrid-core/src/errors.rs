//! Error Types for Resampling Configuration
//!
//! ## Design Philosophy
//!
//! The engine treats almost every data problem as a valid outcome rather than a
//! failure:
//!
//! 1. **Empty input** produces an empty table.
//! 2. **Unparseable timestamps** are dropped at ingest and counted.
//! 3. **Ambiguous column typing** is resolved by the numeric-ratio rule.
//!
//! What remains recoverable is a caller handing the engine a configuration it
//! cannot honour. Those errors are small `Copy` values so they can be returned
//! and compared cheaply.
//!
//! Broken internal invariants (a matched column shorter than the grid, a sensor
//! id that was never issued) are wiring bugs and panic instead of surfacing here.
//!
//! ## Example
//!
//! ```rust
//! use chrono::TimeDelta;
//! use quartergrid_core::{ResampleConfig, ResampleError};
//!
//! let config = ResampleConfig::default().with_tolerance(TimeDelta::seconds(-30));
//! match config.validate() {
//!     Err(ResampleError::InvalidTolerance { seconds }) => assert_eq!(seconds, -30),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for resampling operations
pub type ResampleResult<T> = Result<T, ResampleError>;

/// Configuration errors rejected before any resampling work starts
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ResampleError {
    /// Tolerance window is negative
    #[error("Tolerance {seconds}s must not be negative")]
    InvalidTolerance {
        /// Offending tolerance, whole seconds
        seconds: i64,
    },

    /// Staleness threshold cannot be tracked by the sliding window
    #[error("Stale threshold {threshold} outside [{min}, {max}]")]
    InvalidStaleThreshold {
        /// Requested consecutive-reading count
        threshold: usize,
        /// Smallest supported threshold
        min: usize,
        /// Largest supported threshold (window capacity + 1)
        max: usize,
    },

    /// Numeric classification ratio is not a fraction in (0, 1]
    #[error("Numeric ratio {ratio} outside (0, 1]")]
    InvalidNumericRatio {
        /// Requested ratio
        ratio: f64,
    },
}
