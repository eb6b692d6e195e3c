//! Time-Related Constants
//!
//! This module defines the grid spacing and matching windows used when
//! aligning building-management exports onto quarter-hour rows.

// ===== TIME UNIT CONVERSIONS =====

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

// ===== GRID =====

/// Spacing between grid instants (minutes).
///
/// Utility billing and BMS trend logs report in 15-minute demand intervals,
/// so every output row lands on :00, :15, :30 or :45.
pub const GRID_INTERVAL_MINUTES: u32 = 15;

/// Spacing between grid instants (seconds).
pub const GRID_INTERVAL_SECONDS: i64 = GRID_INTERVAL_MINUTES as i64 * SECONDS_PER_MINUTE;

// ===== MATCHING WINDOWS =====

/// Default tolerance around each grid instant (seconds).
///
/// Trend loggers sampling every 1-5 minutes drift by tens of seconds per day.
/// Two minutes either side catches a reading taken "at" the quarter hour
/// without borrowing one from the neighbouring row.
pub const DEFAULT_TOLERANCE_SECONDS: i64 = 2 * SECONDS_PER_MINUTE;

/// Tolerance used by the relaxed preset (seconds).
///
/// Half the grid interval: every sample is eligible for its nearest row.
pub const RELAXED_TOLERANCE_SECONDS: i64 = GRID_INTERVAL_SECONDS / 2;
