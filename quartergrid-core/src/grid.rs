//! Grid generation: the quarter-hour rows data is resampled onto
//!
//! The grid is the closed sequence of aligned instants from the floor of the
//! earliest timestamp to the ceiling of the latest, 15 minutes apart:
//!
//! ```text
//! samples:   11:58:40 ........................ 12:31:05
//! grid:    11:45    12:00    12:15    12:30    12:45
//! ```
//!
//! An empty sample set yields an empty grid; "no data" is a valid outcome.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sample::SampleSet;
use crate::time::{ceil_to_quarter_hour, floor_to_quarter_hour, grid_interval, Timestamp};

/// Ordered quarter-hour target instants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    instants: Vec<Timestamp>,
}

impl Grid {
    /// Grid with no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Grid covering `[min, max]`
    ///
    /// Arguments are swapped if given in the wrong order. When both fall on
    /// the same aligned instant the grid has exactly one row.
    pub fn covering(min: Timestamp, max: Timestamp) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };

        let start = floor_to_quarter_hour(min);
        let end = ceil_to_quarter_hour(max);
        let step = grid_interval();

        let mut instants = Vec::new();
        let mut next = Some(start);
        while let Some(t) = next.filter(|t| *t <= end) {
            instants.push(t);
            next = t.checked_add_signed(step);
        }

        Self { instants }
    }

    /// Grid covering every timestamp in the set
    pub fn for_samples(samples: &SampleSet) -> Self {
        match samples.time_bounds() {
            Some((min, max)) => Self::covering(min, max),
            None => Self::empty(),
        }
    }

    /// All grid instants in order
    pub fn instants(&self) -> &[Timestamp] {
        &self.instants
    }

    /// Instant for row `row`
    pub fn get(&self, row: usize) -> Option<Timestamp> {
        self.instants.get(row).copied()
    }

    /// Earliest grid instant
    pub fn first(&self) -> Option<Timestamp> {
        self.instants.first().copied()
    }

    /// Latest grid instant
    pub fn last(&self) -> Option<Timestamp> {
        self.instants.last().copied()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.instants.len()
    }

    /// Check if the grid has no rows
    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// Iterate grid instants in order
    pub fn iter(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.instants.iter().copied()
    }

    pub(crate) fn into_instants(self) -> Vec<Timestamp> {
        self.instants
    }
}
