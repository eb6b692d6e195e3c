//! Stale-run detection
//!
//! A cell is stale when its numeric value is non-zero and equals the values of
//! the `threshold - 1` rows before it. With the default threshold of three,
//! the third identical reading in a row is the first flagged one, and flagging
//! continues while the value holds.
//!
//! Rows are visited strictly in order; each sensor keeps a [`RunWindow`] of its
//! recent readings instead of looking back into the column.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::quality::DEFAULT_STALE_THRESHOLD;
use crate::quality::classify::{numeric_view, ColumnKind};
use crate::sample::SensorId;
use crate::table::MatchedTable;
use crate::traits::QualityPass;
use crate::window::RunWindow;

/// Per-cell stale marks, column-major like the matched table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaleMarks {
    columns: Vec<Vec<bool>>,
}

impl StaleMarks {
    /// Check if the cell at (`row`, `id`) is stale
    pub fn is_stale(&self, row: usize, id: SensorId) -> bool {
        self.columns[id.index()][row]
    }

    /// Stale cell count for one sensor
    pub fn count_for(&self, id: SensorId) -> usize {
        self.columns[id.index()].iter().filter(|&&s| s).count()
    }

    /// Stale cell count across all sensors
    pub fn total(&self) -> usize {
        self.columns.iter().flatten().filter(|&&s| s).count()
    }

    /// Sensors stale in `row`, in column order
    pub fn sensors_at(&self, row: usize) -> impl Iterator<Item = SensorId> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(move |(_, col)| col[row])
            .map(|(i, _)| SensorId::new(i))
    }
}

/// Flags runs of identical non-zero numeric readings
#[derive(Debug, Clone, Copy)]
pub struct StalenessPass {
    threshold: usize,
}

impl Default for StalenessPass {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_THRESHOLD)
    }
}

impl StalenessPass {
    /// Pass flagging runs of `threshold` equal readings
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Run length that triggers a stale mark
    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl QualityPass for StalenessPass {
    type Output = StaleMarks;

    fn annotate(&self, table: &MatchedTable, kinds: &[ColumnKind]) -> StaleMarks {
        let rows = table.row_count();

        let mut columns = Vec::with_capacity(table.sensor_count());
        for ((_, column), kind) in table.iter_columns().zip(kinds) {
            let mut marks = vec![false; rows];
            if kind.is_numeric() {
                let mut window = RunWindow::for_threshold(self.threshold);
                for (mark, value) in marks.iter_mut().zip(numeric_view(column)) {
                    *mark = window.observe(value);
                }
            }
            columns.push(marks);
        }

        StaleMarks { columns }
    }
}
