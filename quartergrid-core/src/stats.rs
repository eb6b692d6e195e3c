//! Summary statistics for a resampled table
//!
//! Derived entirely from the matched table and its annotations, so the
//! numbers always agree with what a caller sees row by row.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::quality::{Annotations, ZeroFlag};
use crate::table::MatchedTable;
use crate::time::Timestamp;

/// Row counts per zero-run classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZeroFlagCounts {
    /// Rows with no zero reading
    pub clear: usize,
    /// Rows starting a zero run
    pub single: usize,
    /// Rows continuing a zero run
    pub repeated: usize,
}

impl ZeroFlagCounts {
    fn record(&mut self, flag: ZeroFlag) {
        match flag {
            ZeroFlag::Clear => self.clear += 1,
            ZeroFlag::Single => self.single += 1,
            ZeroFlag::Repeated => self.repeated += 1,
        }
    }

    /// Rows counted across all flags
    pub fn total(&self) -> usize {
        self.clear + self.single + self.repeated
    }
}

/// Summary of one resampling run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResampleStats {
    /// Grid rows
    pub total_intervals: usize,
    /// Cells filled from an off-grid sample
    pub total_inexact_cells: usize,
    /// Rows without a match, per sensor
    pub missing_by_sensor: BTreeMap<String, usize>,
    /// Stale cells, per sensor
    pub stale_by_sensor: BTreeMap<String, usize>,
    /// Sum of `stale_by_sensor`
    pub total_stale_flags: usize,
    /// Rows with at least one stale sensor
    pub rows_with_stale_data: usize,
    /// Rows per zero-run flag
    pub zero_flag_counts: ZeroFlagCounts,
    /// First and last grid instant
    pub date_range: Option<(Timestamp, Timestamp)>,
    /// Samples rejected at ingest for an invalid timestamp
    pub dropped_samples: usize,
}

impl ResampleStats {
    /// Summarise an annotated table
    pub fn collect(table: &MatchedTable, annotations: &Annotations, dropped_samples: usize) -> Self {
        let mut missing_by_sensor = BTreeMap::new();
        let mut stale_by_sensor = BTreeMap::new();
        for (id, column) in table.iter_columns() {
            let missing = column.cells().iter().filter(|c| c.is_missing()).count();
            missing_by_sensor.insert(column.name().to_string(), missing);
            stale_by_sensor.insert(column.name().to_string(), annotations.stale.count_for(id));
        }

        let mut zero_flag_counts = ZeroFlagCounts::default();
        for row in &annotations.rows {
            zero_flag_counts.record(row.zero);
        }

        let date_range = table
            .timestamps()
            .first()
            .zip(table.timestamps().last())
            .map(|(&first, &last)| (first, last));

        Self {
            total_intervals: table.row_count(),
            total_inexact_cells: table.inexact_count(),
            missing_by_sensor,
            total_stale_flags: stale_by_sensor.values().sum(),
            stale_by_sensor,
            rows_with_stale_data: annotations.rows.iter().filter(|r| r.stale).count(),
            zero_flag_counts,
            date_range,
            dropped_samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::QualityAnnotator;
    use crate::sample::Value;
    use crate::table::MatchedCell;
    use alloc::vec;
    use alloc::vec::Vec;
    use chrono::NaiveDate;

    #[test]
    fn counts_match_annotations() {
        let t0 = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let rows: Vec<Timestamp> = (0..4)
            .map(|i| t0 + chrono::TimeDelta::minutes(15 * i))
            .collect();

        let cell = |v: Option<f64>, inexact: bool| MatchedCell {
            value: v.map(Value::Number),
            source_timestamp: v.map(|_| t0),
            is_inexact: inexact,
        };

        let mut table = MatchedTable::new(rows.clone());
        table.push_column(
            "Meter",
            vec![
                cell(Some(9.0), false),
                cell(Some(9.0), true),
                cell(Some(9.0), false),
                cell(None, false),
            ],
        );
        table.push_column(
            "Pump",
            vec![
                cell(Some(0.0), false),
                cell(Some(0.0), false),
                cell(Some(1.0), true),
                cell(Some(0.0), false),
            ],
        );

        let annotations = QualityAnnotator::default().annotate(&table);
        let stats = ResampleStats::collect(&table, &annotations, 2);

        assert_eq!(stats.total_intervals, 4);
        assert_eq!(stats.total_inexact_cells, 2);
        assert_eq!(stats.missing_by_sensor["Meter"], 1);
        assert_eq!(stats.stale_by_sensor["Meter"], 1);
        assert_eq!(stats.stale_by_sensor["Pump"], 0);
        assert_eq!(stats.total_stale_flags, 1);
        assert_eq!(stats.rows_with_stale_data, 1);
        assert_eq!(
            stats.zero_flag_counts,
            ZeroFlagCounts { clear: 1, single: 2, repeated: 1 }
        );
        assert_eq!(stats.date_range, Some((rows[0], rows[3])));
        assert_eq!(stats.dropped_samples, 2);
    }

    #[test]
    fn empty_table_has_no_range() {
        let stats = ResampleStats::collect(&MatchedTable::default(), &Annotations::default(), 0);
        assert_eq!(stats.total_intervals, 0);
        assert_eq!(stats.date_range, None);
        assert_eq!(stats.zero_flag_counts.total(), 0);
    }
}
