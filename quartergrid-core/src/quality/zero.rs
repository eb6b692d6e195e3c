//! Zero-run detection
//!
//! Classifies each row by how zero readings line up across numeric sensors:
//!
//! | Flag       | Condition (any numeric sensor)                          |
//! |------------|---------------------------------------------------------|
//! | `Repeated` | zero in this row and the previous row                   |
//! | `Single`   | zero in this row, previous row non-zero/missing or none |
//! | `Clear`    | no zero in this row                                     |
//!
//! Priority is `Repeated` > `Single` > `Clear`. Text columns are skipped.

use core::fmt;

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::quality::ZERO_RUN_THRESHOLD;
use crate::quality::classify::{numeric_view, ColumnKind};
use crate::table::MatchedTable;
use crate::traits::QualityPass;

/// Per-row zero-run classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ZeroFlag {
    /// No numeric sensor reads zero
    #[default]
    Clear,
    /// Some sensor reads zero, none for two rows running
    Single,
    /// Some sensor reads zero for two rows running
    Repeated,
}

impl ZeroFlag {
    /// Label used in exports
    pub fn as_str(self) -> &'static str {
        match self {
            ZeroFlag::Clear => "Clear",
            ZeroFlag::Single => "Single",
            ZeroFlag::Repeated => "Repeated",
        }
    }
}

impl fmt::Display for ZeroFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies rows by zero continuity across numeric sensors
///
/// Each numeric sensor carries the length of its current zero run; a row takes
/// the highest flag any sensor earns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroRunPass;

impl ZeroRunPass {
    /// Flag earned by a sensor whose zero run ending at this row has `run` rows
    fn flag_for_run(run: usize) -> ZeroFlag {
        if run >= ZERO_RUN_THRESHOLD {
            ZeroFlag::Repeated
        } else if run > 0 {
            ZeroFlag::Single
        } else {
            ZeroFlag::Clear
        }
    }
}

impl QualityPass for ZeroRunPass {
    type Output = Vec<ZeroFlag>;

    fn annotate(&self, table: &MatchedTable, kinds: &[ColumnKind]) -> Vec<ZeroFlag> {
        let views: Vec<Vec<Option<f64>>> = table
            .columns()
            .iter()
            .zip(kinds)
            .filter(|(_, kind)| kind.is_numeric())
            .map(|(column, _)| numeric_view(column))
            .collect();

        let mut runs = vec![0usize; views.len()];
        (0..table.row_count())
            .map(|row| {
                let mut flag = ZeroFlag::Clear;
                for (run, view) in runs.iter_mut().zip(&views) {
                    *run = if view[row] == Some(0.0) { *run + 1 } else { 0 };
                    flag = flag.max(Self::flag_for_run(*run));
                }
                flag
            })
            .collect()
    }
}
