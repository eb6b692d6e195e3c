//! Matched table: one row per grid instant, one column per sensor
//!
//! Stored column-major (struct-of-arrays). Each sensor column is a `Vec` of
//! cells the same length as the grid, addressed by row index and [`SensorId`].
//!
//! ## Invariants
//!
//! - Every column has exactly `row_count()` cells
//! - Column `i` belongs to the sensor whose id has index `i`
//!
//! Breaking either is a wiring bug, so accessors index directly and panic.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sample::{SensorId, Value};
use crate::time::Timestamp;

/// Result of matching one sensor at one grid instant
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchedCell {
    /// Chosen reading, `None` when no sample fell within tolerance
    pub value: Option<Value>,
    /// Timestamp of the chosen sample
    pub source_timestamp: Option<Timestamp>,
    /// Chosen sample was not itself on a quarter hour
    pub is_inexact: bool,
}

impl MatchedCell {
    /// Cell with no match
    pub fn missing() -> Self {
        Self::default()
    }

    /// Check if no sample matched
    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

/// All cells for one sensor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorColumn {
    name: String,
    cells: Vec<MatchedCell>,
}

impl SensorColumn {
    /// Sensor name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cells in row order
    pub fn cells(&self) -> &[MatchedCell] {
        &self.cells
    }

    /// Matched values in row order
    pub fn values(&self) -> impl Iterator<Item = Option<&Value>> + '_ {
        self.cells.iter().map(|c| c.value.as_ref())
    }
}

/// Grid instants plus one matched column per sensor
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchedTable {
    timestamps: Vec<Timestamp>,
    columns: Vec<SensorColumn>,
}

impl MatchedTable {
    /// Table with the given rows and no sensor columns yet
    pub fn new(timestamps: Vec<Timestamp>) -> Self {
        Self {
            timestamps,
            columns: Vec::new(),
        }
    }

    /// Append a sensor column
    ///
    /// # Panics
    ///
    /// Panics if `cells` does not have one entry per row.
    pub fn push_column(&mut self, name: impl Into<String>, cells: Vec<MatchedCell>) -> SensorId {
        assert_eq!(
            cells.len(),
            self.timestamps.len(),
            "matched column length must equal grid length"
        );
        let id = SensorId::new(self.columns.len());
        self.columns.push(SensorColumn {
            name: name.into(),
            cells,
        });
        id
    }

    /// Grid instants, one per row
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Number of grid rows
    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    /// Number of sensor columns
    pub fn sensor_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Column for a sensor
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued for this table.
    pub fn column(&self, id: SensorId) -> &SensorColumn {
        &self.columns[id.index()]
    }

    /// All columns in sensor order
    pub fn columns(&self) -> &[SensorColumn] {
        &self.columns
    }

    /// Iterate columns with their handles
    pub fn iter_columns(&self) -> impl Iterator<Item = (SensorId, &SensorColumn)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| (SensorId::new(i), col))
    }

    /// Cell at (`row`, `id`)
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn cell(&self, row: usize, id: SensorId) -> &MatchedCell {
        &self.columns[id.index()].cells[row]
    }

    /// Name of the sensor behind `id`
    pub fn sensor_name(&self, id: SensorId) -> &str {
        self.column(id).name()
    }

    /// Look up a sensor's handle by name
    pub fn sensor_id(&self, name: &str) -> Option<SensorId> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .map(SensorId::new)
    }

    /// Cells whose source sample was off the quarter hour
    pub fn inexact_count(&self) -> usize {
        self.columns
            .iter()
            .flat_map(|c| c.cells.iter())
            .filter(|c| c.is_inexact)
            .count()
    }
}
