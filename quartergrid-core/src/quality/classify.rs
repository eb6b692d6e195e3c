//! Column classification: numeric versus text
//!
//! Exports mix meters ("kW", "°F") with status points ("on", "off"). Only
//! numeric columns take part in staleness and zero-run detection; a status
//! point sitting at "off" all night is not a frozen sensor.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::table::SensorColumn;

/// How a resampled column is treated by the quality passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColumnKind {
    /// Enough cells parse as numbers
    #[default]
    Numeric,
    /// Predominantly free text, excluded from quality flags
    Text,
}

impl ColumnKind {
    /// Check if the column takes part in quality flags
    pub fn is_numeric(self) -> bool {
        self == ColumnKind::Numeric
    }
}

/// Classify a column from its resampled (not raw) cells
///
/// Numeric iff at least `ratio` of the non-null cells parse as numbers. A
/// column with no non-null cells is numeric; it has nothing to flag either way.
pub fn classify_column(column: &SensorColumn, ratio: f64) -> ColumnKind {
    let (present, numeric) = column
        .values()
        .flatten()
        .fold((0usize, 0usize), |(present, numeric), value| {
            (present + 1, numeric + usize::from(value.as_number().is_some()))
        });

    if present == 0 || numeric as f64 / present as f64 >= ratio {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

/// Numeric reading per row; `None` for missing or unparseable cells
pub fn numeric_view(column: &SensorColumn) -> Vec<Option<f64>> {
    column
        .values()
        .map(|value| value.and_then(|v| v.as_number()))
        .collect()
}
