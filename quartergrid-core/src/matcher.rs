//! Per-sensor nearest matching
//!
//! ## Why per sensor?
//!
//! Building loggers are not synchronised. A chiller plant may log every minute
//! while a zone controller logs every five, each drifting on its own clock.
//! Matching on a single merged timeline would let one sensor's sampling decide
//! which rows another sensor can fill. Every (grid instant, sensor) pair is
//! therefore resolved on its own:
//!
//! 1. Candidates are the sensor's samples with a value, within ±tolerance
//! 2. No candidate: the cell is missing (never zero)
//! 3. Otherwise the closest sample wins; on a tie the earlier timestamp wins,
//!    then the sample ingested first
//! 4. The cell is inexact iff the winning sample is off the quarter hour,
//!    whichever row it was matched to
//!
//! ## Search
//!
//! Each sensor's valued samples are stably sorted once. A lookup is two binary
//! searches, so matching costs O(log n) per cell:
//!
//! ```text
//! sorted:   ... 12:13:10  12:14:40 | 12:16:30  12:19:00 ...
//!                          before  ^  after
//!                               target 12:15:00
//! ```

use alloc::vec::Vec;

use chrono::TimeDelta;

use crate::config::ResampleConfig;
use crate::grid::Grid;
use crate::sample::{Sample, SampleSet, SampleStore};
use crate::table::{MatchedCell, MatchedTable};
use crate::time::{distance, is_quarter_hour_aligned, Timestamp};

/// Valued samples of one sensor, ordered by timestamp
///
/// Samples sharing a timestamp keep ingest order.
#[derive(Debug, Clone)]
pub struct SortedIndex<'a> {
    samples: Vec<&'a Sample>,
}

impl<'a> SortedIndex<'a> {
    /// Index a store, skipping samples with a missing value
    pub fn build(store: &'a SampleStore) -> Self {
        let mut samples: Vec<&Sample> = store.samples().iter().filter(|s| s.has_value()).collect();
        samples.sort_by_key(|s| s.timestamp);
        Self { samples }
    }

    /// Number of indexed samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the sensor has no valued samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First-ingested sample at the earliest timestamp `>= ts`
    fn first_at_or_after(&self, ts: Timestamp) -> Option<usize> {
        let idx = self.samples.partition_point(|s| s.timestamp < ts);
        (idx < self.samples.len()).then_some(idx)
    }

    /// First-ingested sample at the latest timestamp `< ts`
    fn first_before(&self, ts: Timestamp) -> Option<usize> {
        let idx = self.samples.partition_point(|s| s.timestamp < ts);
        let latest = self.samples.get(idx.checked_sub(1)?)?.timestamp;
        Some(self.samples.partition_point(|s| s.timestamp < latest))
    }

    /// Closest sample within `tolerance` of `target`
    pub fn nearest(&self, target: Timestamp, tolerance: TimeDelta) -> Option<&'a Sample> {
        let within = |idx: usize| {
            let sample = self.samples[idx];
            let d = distance(sample.timestamp, target);
            (d <= tolerance).then_some((d, sample))
        };

        let before = self.first_before(target).and_then(within);
        let after = self.first_at_or_after(target).and_then(within);

        match (before, after) {
            // Equidistant: the earlier reading wins
            (Some((db, b)), Some((da, a))) => Some(if db <= da { b } else { a }),
            (Some((_, b)), None) => Some(b),
            (None, Some((_, a))) => Some(a),
            (None, None) => None,
        }
    }
}

/// Nearest-sample matcher with a fixed tolerance window
#[derive(Debug, Clone, Copy)]
pub struct NearestMatcher {
    tolerance: TimeDelta,
}

impl Default for NearestMatcher {
    fn default() -> Self {
        Self::from_config(&ResampleConfig::default())
    }
}

impl NearestMatcher {
    /// Matcher with an explicit tolerance
    pub fn new(tolerance: TimeDelta) -> Self {
        Self { tolerance }
    }

    /// Matcher using the configured tolerance
    pub fn from_config(config: &ResampleConfig) -> Self {
        Self::new(config.tolerance())
    }

    /// Tolerance window
    pub fn tolerance(&self) -> TimeDelta {
        self.tolerance
    }

    /// Resolve one cell
    pub fn match_cell(&self, index: &SortedIndex<'_>, target: Timestamp) -> MatchedCell {
        match index.nearest(target, self.tolerance) {
            Some(sample) => MatchedCell {
                value: sample.value.clone(),
                source_timestamp: Some(sample.timestamp),
                is_inexact: !is_quarter_hour_aligned(sample.timestamp),
            },
            None => MatchedCell::missing(),
        }
    }

    /// Match every grid row for one sensor
    pub fn match_sensor(&self, grid: &Grid, store: &SampleStore) -> Vec<MatchedCell> {
        let index = SortedIndex::build(store);
        if index.is_empty() {
            log_warn!("Sensor '{}' has no valued samples; column left empty", store.name());
        }

        let cells: Vec<MatchedCell> = grid.iter().map(|t| self.match_cell(&index, t)).collect();

        log_debug!(
            "Sensor '{}': {} of {} rows matched",
            store.name(),
            cells.iter().filter(|c| !c.is_missing()).count(),
            cells.len()
        );
        cells
    }

    /// Build the matched table for every sensor in the set
    ///
    /// Columns follow the set's insertion order.
    pub fn match_all(&self, grid: Grid, samples: &SampleSet) -> MatchedTable {
        let cells: Vec<Vec<MatchedCell>> = samples
            .iter()
            .map(|(_, store)| self.match_sensor(&grid, store))
            .collect();

        let mut table = MatchedTable::new(grid.into_instants());
        for ((id, store), column) in samples.iter().zip(cells) {
            let assigned = table.push_column(store.name(), column);
            debug_assert_eq!(assigned, id);
        }
        table
    }
}
