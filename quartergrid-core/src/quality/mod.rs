//! Quality Annotation
//!
//! ## Overview
//!
//! Once every sensor has been matched onto the grid, two independent passes
//! derive data-quality flags from the matched values:
//!
//! ### 1. Stale runs (per sensor)
//! A numeric sensor repeating the same non-zero value for `threshold` rows is
//! probably frozen: a held BACnet point, a logger replaying its last reading.
//!
//! ### 2. Zero runs (per row, across sensors)
//! Zeros are legitimate for equipment that is off, but two zero rows running
//! usually mean a dropped meter or a tripped circuit.
//!
//! Both passes only run on columns classified as numeric (see [`classify`]),
//! and neither alters a matched value.
//!
//! ## Row consolidation
//!
//! Per-cell stale marks are folded into one [`RowFlags`] per row:
//!
//! ```text
//! row  Meter A  Meter B  Pump  │ stale  stale_sensors      zero
//! 0    100      7        0     │ no     []                 Single
//! 1    100      7        0     │ no     []                 Repeated
//! 2    100      7        3     │ yes    [Meter A, Meter B] Clear
//! ```

pub mod classify;
pub mod stale;
pub mod zero;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ResampleConfig;
use crate::table::MatchedTable;
use crate::traits::QualityPass;

pub use classify::{classify_column, ColumnKind};
pub use stale::{StaleMarks, StalenessPass};
pub use zero::{ZeroFlag, ZeroRunPass};

/// Quality flags for one grid row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowFlags {
    /// At least one sensor is stale in this row
    pub stale: bool,
    /// Names of the stale sensors, sorted
    pub stale_sensors: Vec<String>,
    /// Zero-run classification
    pub zero: ZeroFlag,
}

/// Everything the annotator derives from a matched table
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotations {
    /// Classification per sensor column, in column order
    pub column_kinds: Vec<ColumnKind>,
    /// Per-cell stale marks
    pub stale: StaleMarks,
    /// Consolidated flags per row
    pub rows: Vec<RowFlags>,
}

/// Runs column classification and both quality passes
#[derive(Debug, Clone, Copy)]
pub struct QualityAnnotator {
    staleness: StalenessPass,
    zero_runs: ZeroRunPass,
    numeric_ratio: f64,
}

impl Default for QualityAnnotator {
    fn default() -> Self {
        Self::from_config(&ResampleConfig::default())
    }
}

impl QualityAnnotator {
    /// Annotator using the configured thresholds and ratio
    pub fn from_config(config: &ResampleConfig) -> Self {
        Self {
            staleness: StalenessPass::new(config.stale_threshold()),
            zero_runs: ZeroRunPass,
            numeric_ratio: config.numeric_ratio(),
        }
    }

    /// Classify every column of the table
    pub fn classify(&self, table: &MatchedTable) -> Vec<ColumnKind> {
        table
            .columns()
            .iter()
            .map(|column| {
                let kind = classify_column(column, self.numeric_ratio);
                if kind == ColumnKind::Text {
                    log_warn!(
                        "Column '{}' is mostly text; excluded from stale and zero flags",
                        column.name()
                    );
                }
                kind
            })
            .collect()
    }

    /// Derive all quality flags
    pub fn annotate(&self, table: &MatchedTable) -> Annotations {
        let column_kinds = self.classify(table);
        let stale = self.staleness.annotate(table, &column_kinds);
        let zero = self.zero_runs.annotate(table, &column_kinds);

        let rows = zero
            .into_iter()
            .enumerate()
            .map(|(row, zero)| {
                let mut stale_sensors: Vec<String> = stale
                    .sensors_at(row)
                    .map(|id| table.sensor_name(id).to_string())
                    .collect();
                stale_sensors.sort();

                RowFlags {
                    stale: !stale_sensors.is_empty(),
                    stale_sensors,
                    zero,
                }
            })
            .collect();

        log_debug!(
            "Annotated {} rows: {} stale cells",
            table.row_count(),
            stale.total()
        );

        Annotations {
            column_kinds,
            stale,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Value;
    use crate::table::MatchedCell;
    use alloc::vec;
    use chrono::{NaiveDate, TimeDelta};

    fn table(columns: &[(&str, Vec<Option<Value>>)]) -> MatchedTable {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let rows = columns.first().map_or(0, |(_, v)| v.len());
        let mut table = MatchedTable::new(
            (0..rows)
                .map(|i| start + TimeDelta::minutes(15 * i as i64))
                .collect(),
        );
        for (name, values) in columns {
            let cells = values
                .iter()
                .cloned()
                .map(|value| MatchedCell {
                    value,
                    ..MatchedCell::missing()
                })
                .collect();
            table.push_column(*name, cells);
        }
        table
    }

    fn n(v: f64) -> Option<Value> {
        Some(Value::Number(v))
    }

    #[test]
    fn consolidates_sorted_sensor_names() {
        let t = table(&[
            ("Meter B", vec![n(7.0), n(7.0), n(7.0)]),
            ("Pump", vec![n(0.0), n(0.0), n(3.0)]),
            ("Meter A", vec![n(100.0), n(100.0), n(100.0)]),
        ]);
        let annotations = QualityAnnotator::default().annotate(&t);

        assert_eq!(annotations.rows.len(), 3);
        assert!(!annotations.rows[1].stale);
        assert_eq!(annotations.rows[0].zero, ZeroFlag::Single);
        assert_eq!(annotations.rows[1].zero, ZeroFlag::Repeated);

        let last = &annotations.rows[2];
        assert!(last.stale);
        assert_eq!(last.stale_sensors, ["Meter A", "Meter B"]);
        assert_eq!(last.zero, ZeroFlag::Clear);
    }

    #[test]
    fn text_column_contributes_nothing() {
        let status = vec![
            Some(Value::from("0")),
            Some(Value::from("0")),
            Some(Value::from("off")),
            Some(Value::from("off")),
            Some(Value::from("off")),
        ];
        let t = table(&[("Status", status)]);
        let annotations = QualityAnnotator::default().annotate(&t);

        assert_eq!(annotations.column_kinds, [ColumnKind::Text]);
        assert!(annotations.rows.iter().all(|r| !r.stale && r.zero == ZeroFlag::Clear));
    }

    #[test]
    fn matched_values_untouched() {
        let t = table(&[("Meter", vec![n(1.0), n(1.0), n(1.0), n(0.0)])]);
        let before = t.clone();
        let _ = QualityAnnotator::default().annotate(&t);
        assert_eq!(t, before);
    }

    #[test]
    fn empty_table() {
        let annotations = QualityAnnotator::default().annotate(&MatchedTable::default());
        assert!(annotations.rows.is_empty());
        assert!(annotations.column_kinds.is_empty());
    }
}
