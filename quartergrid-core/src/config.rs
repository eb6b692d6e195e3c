//! Resampling configuration
//!
//! The engine is a pure function of (samples, config). Configuration is a
//! small value type: construct it from a preset, adjust it with the chained
//! setters, and let the pipeline validate it before any work starts.
//!
//! ```rust
//! use chrono::TimeDelta;
//! use quartergrid_core::ResampleConfig;
//!
//! let config = ResampleConfig::default()
//!     .with_tolerance(TimeDelta::seconds(90))
//!     .with_stale_threshold(4);
//! assert!(config.validate().is_ok());
//! ```

use chrono::TimeDelta;

use crate::constants::quality::{
    DEFAULT_STALE_THRESHOLD, MAX_STALE_THRESHOLD, MIN_STALE_THRESHOLD, NUMERIC_COLUMN_RATIO,
    RELAXED_STALE_THRESHOLD,
};
use crate::constants::time::{DEFAULT_TOLERANCE_SECONDS, RELAXED_TOLERANCE_SECONDS};
use crate::errors::{ResampleError, ResampleResult};

/// Thresholds for matching and quality annotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResampleConfig {
    /// Maximum distance between a grid instant and a matched sample
    tolerance: TimeDelta,

    /// Consecutive equal non-zero readings that count as stale
    stale_threshold: usize,

    /// Share of non-null cells that must parse as numbers for a numeric column
    numeric_ratio: f64,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            // ±2 minutes around each quarter hour
            tolerance: TimeDelta::seconds(DEFAULT_TOLERANCE_SECONDS),
            stale_threshold: DEFAULT_STALE_THRESHOLD,
            numeric_ratio: NUMERIC_COLUMN_RATIO,
        }
    }
}

impl ResampleConfig {
    /// Create config with custom limits
    pub fn new_with_limits(tolerance: TimeDelta, stale_threshold: usize) -> Self {
        Self {
            tolerance,
            stale_threshold,
            ..Self::default()
        }
    }

    /// Only readings logged exactly on the quarter hour are matched
    pub fn exact_only() -> Self {
        Self {
            tolerance: TimeDelta::zero(),
            ..Self::default()
        }
    }

    /// Every reading is eligible for its nearest row; staleness from the
    /// fourth identical reading
    pub fn relaxed() -> Self {
        Self {
            tolerance: TimeDelta::seconds(RELAXED_TOLERANCE_SECONDS),
            stale_threshold: RELAXED_STALE_THRESHOLD,
            ..Self::default()
        }
    }

    /// Set the matching tolerance
    pub fn with_tolerance(mut self, tolerance: TimeDelta) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the staleness threshold
    pub fn with_stale_threshold(mut self, threshold: usize) -> Self {
        self.stale_threshold = threshold;
        self
    }

    /// Set the numeric-column ratio
    pub fn with_numeric_ratio(mut self, ratio: f64) -> Self {
        self.numeric_ratio = ratio;
        self
    }

    /// Matching tolerance around each grid instant
    pub fn tolerance(&self) -> TimeDelta {
        self.tolerance
    }

    /// Consecutive equal readings that count as stale
    pub fn stale_threshold(&self) -> usize {
        self.stale_threshold
    }

    /// Minimum numeric share for a numeric column
    pub fn numeric_ratio(&self) -> f64 {
        self.numeric_ratio
    }

    /// Reject settings the engine cannot honour
    pub fn validate(&self) -> ResampleResult<()> {
        if self.tolerance < TimeDelta::zero() {
            return Err(ResampleError::InvalidTolerance {
                seconds: self.tolerance.num_seconds(),
            });
        }

        if !(MIN_STALE_THRESHOLD..=MAX_STALE_THRESHOLD).contains(&self.stale_threshold) {
            return Err(ResampleError::InvalidStaleThreshold {
                threshold: self.stale_threshold,
                min: MIN_STALE_THRESHOLD,
                max: MAX_STALE_THRESHOLD,
            });
        }

        // NaN fails both comparisons
        if !(self.numeric_ratio > 0.0 && self.numeric_ratio <= 1.0) {
            return Err(ResampleError::InvalidNumericRatio {
                ratio: self.numeric_ratio,
            });
        }

        Ok(())
    }
}
