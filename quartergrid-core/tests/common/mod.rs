//! Common test utilities for integration tests
//!
//! This module provides:
//! - Jittered logger generators mimicking building-management exports
//! - Named scenarios for edge cases
//! - Small timestamp helpers

#![allow(dead_code)]

pub mod generators;
pub mod scenarios;

use chrono::{NaiveDate, NaiveDateTime};

/// Instant on the fixture day (2024-03-01)
pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// Index of the grid row holding `ts`
pub fn row_of(timestamps: &[NaiveDateTime], ts: NaiveDateTime) -> usize {
    timestamps
        .iter()
        .position(|&t| t == ts)
        .unwrap_or_else(|| panic!("{ts} not on the grid"))
}
