//! Constants for QuarterGrid Core
//!
//! Centralised, documented constants used throughout the engine.
//!
//! ## Organization
//!
//! - **Time**: grid spacing and matching windows
//! - **Quality**: staleness, zero-run and column-classification thresholds
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Use descriptive names that include units

/// Grid spacing and tolerance windows.
pub mod time;

/// Staleness, zero-run and classification thresholds.
pub mod quality;

pub use time::{
    GRID_INTERVAL_MINUTES, GRID_INTERVAL_SECONDS, DEFAULT_TOLERANCE_SECONDS,
};

pub use quality::{
    DEFAULT_STALE_THRESHOLD, MIN_STALE_THRESHOLD, MAX_STALE_THRESHOLD,
    STALE_WINDOW_CAPACITY, ZERO_RUN_THRESHOLD, NUMERIC_COLUMN_RATIO,
};
