//! Core traits for quality passes
//!
//! A pass reads the matched table and produces its own annotation. Passes
//! never alter matched values, which is why they only get a shared borrow.

use crate::quality::ColumnKind;
use crate::table::MatchedTable;

/// Read-only derivation of quality flags from a matched table
pub trait QualityPass {
    /// Annotation produced by the pass
    type Output;

    /// Run the pass over every row
    ///
    /// `kinds` holds one entry per sensor column, in column order.
    fn annotate(&self, table: &MatchedTable, kinds: &[ColumnKind]) -> Self::Output;
}
