//! Quarter-hour time arithmetic
//!
//! All instants are zone-naive. Exports are normalised to the site's local
//! time upstream, so the engine never sees offsets or DST transitions.

use chrono::{NaiveDateTime, TimeDelta, Timelike};

use crate::constants::time::{GRID_INTERVAL_MINUTES, GRID_INTERVAL_SECONDS};

/// Zone-naive instant used for samples and grid rows
pub type Timestamp = NaiveDateTime;

/// Spacing between consecutive grid instants
pub fn grid_interval() -> TimeDelta {
    TimeDelta::seconds(GRID_INTERVAL_SECONDS)
}

/// Check whether an instant sits exactly on a quarter hour
///
/// Minute must be a multiple of 15, seconds and sub-seconds zero.
pub fn is_quarter_hour_aligned(ts: Timestamp) -> bool {
    ts.minute() % GRID_INTERVAL_MINUTES == 0 && ts.second() == 0 && ts.nanosecond() == 0
}

/// Largest quarter-hour instant not after `ts`
pub fn floor_to_quarter_hour(ts: Timestamp) -> Timestamp {
    let excess = TimeDelta::minutes(i64::from(ts.minute() % GRID_INTERVAL_MINUTES))
        + TimeDelta::seconds(i64::from(ts.second()))
        + TimeDelta::nanoseconds(i64::from(ts.nanosecond()));
    ts - excess
}

/// Smallest quarter-hour instant not before `ts`
///
/// Saturates at the last representable quarter hour near `NaiveDateTime::MAX`.
pub fn ceil_to_quarter_hour(ts: Timestamp) -> Timestamp {
    let floor = floor_to_quarter_hour(ts);
    if floor == ts {
        ts
    } else {
        floor.checked_add_signed(grid_interval()).unwrap_or(floor)
    }
}

/// Absolute distance between two instants
pub fn distance(a: Timestamp, b: Timestamp) -> TimeDelta {
    if a >= b {
        a - b
    } else {
        b - a
    }
}
