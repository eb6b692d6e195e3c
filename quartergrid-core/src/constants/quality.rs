//! Quality Thresholds
//!
//! This module defines the run lengths and ratios used when annotating a
//! resampled table with staleness and zero-run flags.

// ===== STALENESS =====

/// Default number of consecutive equal non-zero readings flagged as stale.
///
/// Three identical quarter-hour readings (45 minutes) from an analog point is
/// rare enough to indicate a frozen logger or a held value.
pub const DEFAULT_STALE_THRESHOLD: usize = 3;

/// Staleness threshold used by the relaxed preset.
///
/// Earlier exports flagged only from the fourth identical reading.
pub const RELAXED_STALE_THRESHOLD: usize = 4;

/// Smallest meaningful staleness threshold.
///
/// A threshold of one would flag every non-zero reading.
pub const MIN_STALE_THRESHOLD: usize = 2;

/// Capacity of the per-sensor sliding window (previous readings kept).
pub const STALE_WINDOW_CAPACITY: usize = 15;

/// Largest supported staleness threshold.
pub const MAX_STALE_THRESHOLD: usize = STALE_WINDOW_CAPACITY + 1;

// ===== ZERO RUNS =====

/// Consecutive zero readings that make a row `Repeated`.
///
/// Fixed; not exposed through configuration.
pub const ZERO_RUN_THRESHOLD: usize = 2;

// ===== COLUMN CLASSIFICATION =====

/// Minimum share of non-null cells that must parse as numbers for a column
/// to be treated as numeric.
///
/// Exports mix numeric points with status points ("on", "off", "alarm");
/// a handful of stray text cells should not demote a meter column.
pub const NUMERIC_COLUMN_RATIO: f64 = 0.8;
