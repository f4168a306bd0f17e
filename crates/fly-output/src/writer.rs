//! The `OutputWriter` trait implemented by all backend writers.

use crate::{MoveRow, OutputResult, TurnSummaryRow};

/// Trait implemented by the text and CSV writers.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// stores them for retrieval with `take_error`.
pub trait OutputWriter {
    /// Write every move of one turn, in the order they happened.
    fn write_moves(&mut self, rows: &[MoveRow]) -> OutputResult<()>;

    /// Write one turn summary row.
    fn write_turn_summary(&mut self, row: &TurnSummaryRow) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
