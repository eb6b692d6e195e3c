//! Quarter-hour alignment engine for QuarterGrid
//!
//! Aligns multi-sensor building-management exports onto a fixed 15-minute grid
//! and flags data quality along the way.
//!
//! Each sensor is matched independently: for every grid instant the engine
//! picks that sensor's nearest reading within a tolerance window, then
//! annotates the table with exactness, staleness and zero-run flags.
//!
//! Key properties:
//! - Pure function of (samples, config); no state between runs
//! - Missing is never zero; a literal zero reading is preserved
//! - Runs without `std` (needs `alloc`)
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use quartergrid_core::{resample, ResampleConfig, SampleSet, Value};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let mut samples = SampleSet::new();
//! samples
//!     .sensor("AHU-1 Supply Temp")
//!     .ingest(day.and_hms_opt(12, 16, 30), Some(Value::Number(55.0)));
//!
//! match resample(&samples, &ResampleConfig::default()) {
//!     Ok(table) => {}, // one row per quarter hour
//!     Err(e) => {},    // configuration rejected
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod logging;

pub mod config;
pub mod constants;
pub mod errors;
pub mod grid;
pub mod matcher;
pub mod pipeline;
pub mod quality;
pub mod sample;
pub mod stats;
pub mod table;
pub mod time;
pub mod traits;
pub mod window;

// Public API
pub use config::ResampleConfig;
pub use errors::{ResampleError, ResampleResult};
pub use grid::Grid;
pub use matcher::{NearestMatcher, SortedIndex};
pub use pipeline::{resample, ResampledTable, Resampler};
pub use quality::{Annotations, ColumnKind, QualityAnnotator, RowFlags, ZeroFlag};
pub use sample::{Sample, SampleSet, SampleStore, SensorId, Value};
pub use stats::{ResampleStats, ZeroFlagCounts};
pub use table::{MatchedCell, MatchedTable, SensorColumn};
pub use time::Timestamp;
pub use traits::QualityPass;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
