//! Resampling pipeline
//!
//! Wires the stages together as a single synchronous pass:
//!
//! ```text
//! SampleSet ──► Grid ──► NearestMatcher ──► QualityAnnotator ──► ResampledTable
//!   (range)    (rows)      (cells)           (flags, stats)
//! ```
//!
//! The pipeline holds no state between runs. The same samples and config
//! always produce the same table.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use quartergrid_core::{resample, ResampleConfig, SampleSet, Value, ZeroFlag};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let mut samples = SampleSet::new();
//! let meter = samples.sensor("Main kW");
//! meter.ingest(day.and_hms_opt(12, 0, 0), Some(Value::Number(0.0)));
//! meter.ingest(day.and_hms_opt(12, 14, 20), Some(Value::Number(0.0)));
//!
//! let table = resample(&samples, &ResampleConfig::default())?;
//! assert_eq!(table.row_count(), 2);
//! assert!(table.cell(1, "Main kW").is_some_and(|c| c.is_inexact));
//! assert_eq!(table.row_flags()[1].zero, ZeroFlag::Repeated);
//! # Ok::<(), quartergrid_core::ResampleError>(())
//! ```

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ResampleConfig;
use crate::errors::ResampleResult;
use crate::grid::Grid;
use crate::matcher::NearestMatcher;
use crate::quality::{Annotations, ColumnKind, QualityAnnotator, RowFlags, StaleMarks};
use crate::sample::SampleSet;
use crate::stats::ResampleStats;
use crate::table::{MatchedCell, MatchedTable};
use crate::time::Timestamp;

/// Aligned table with its quality metadata
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResampledTable {
    table: MatchedTable,
    annotations: Annotations,
    stats: ResampleStats,
}

impl ResampledTable {
    /// Matched values, one column per sensor
    pub fn matched(&self) -> &MatchedTable {
        &self.table
    }

    /// Grid instants, one per row
    pub fn timestamps(&self) -> &[Timestamp] {
        self.table.timestamps()
    }

    /// Number of grid rows
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Sensor names in column order
    pub fn sensor_names(&self) -> Vec<&str> {
        self.table.columns().iter().map(|c| c.name()).collect()
    }

    /// Cell for a sensor by name
    pub fn cell(&self, row: usize, sensor: &str) -> Option<&MatchedCell> {
        let id = self.table.sensor_id(sensor)?;
        self.table.column(id).cells().get(row)
    }

    /// Check if a sensor's cell is stale
    pub fn is_stale(&self, row: usize, sensor: &str) -> Option<bool> {
        let id = self.table.sensor_id(sensor)?;
        (row < self.row_count()).then(|| self.annotations.stale.is_stale(row, id))
    }

    /// Consolidated flags, one per row
    pub fn row_flags(&self) -> &[RowFlags] {
        &self.annotations.rows
    }

    /// Numeric/text classification per sensor column
    pub fn column_kinds(&self) -> &[ColumnKind] {
        &self.annotations.column_kinds
    }

    /// Per-cell stale marks
    pub fn stale_marks(&self) -> &StaleMarks {
        &self.annotations.stale
    }

    /// Summary statistics for the run
    pub fn stats(&self) -> &ResampleStats {
        &self.stats
    }

    /// Split into parts for callers that take ownership
    pub fn into_parts(self) -> (MatchedTable, Annotations, ResampleStats) {
        (self.table, self.annotations, self.stats)
    }
}

/// Validated configuration bound to the pipeline stages
#[derive(Debug, Clone, Copy)]
pub struct Resampler {
    matcher: NearestMatcher,
    annotator: QualityAnnotator,
}

impl Resampler {
    /// Build a resampler, rejecting invalid configuration
    pub fn new(config: &ResampleConfig) -> ResampleResult<Self> {
        config.validate()?;
        Ok(Self {
            matcher: NearestMatcher::from_config(config),
            annotator: QualityAnnotator::from_config(config),
        })
    }

    /// Run every stage over the samples
    pub fn run(&self, samples: &SampleSet) -> ResampledTable {
        if samples.dropped_samples() > 0 {
            log_debug!(
                "{} samples dropped at ingest for invalid timestamps",
                samples.dropped_samples()
            );
        }

        let grid = Grid::for_samples(samples);
        log_debug!(
            "Grid: {} rows x {} sensors ({:?} .. {:?})",
            grid.len(),
            samples.len(),
            grid.first(),
            grid.last()
        );

        let table = self.matcher.match_all(grid, samples);
        let annotations = self.annotator.annotate(&table);
        let stats = ResampleStats::collect(&table, &annotations, samples.dropped_samples());

        ResampledTable {
            table,
            annotations,
            stats,
        }
    }
}

/// Resample every sensor onto the quarter-hour grid and flag quality
pub fn resample(samples: &SampleSet, config: &ResampleConfig) -> ResampleResult<ResampledTable> {
    Ok(Resampler::new(config)?.run(samples))
}
