//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use fly_core::Turn;
use fly_graph::ZoneMap;
use fly_sim::{SimObserver, TurnRecord};

use crate::row::{MoveRow, TurnSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Feed one turn's moves and summary to `writer`.
pub fn write_turn<W: OutputWriter>(
    writer: &mut W,
    record: &TurnRecord,
    map:    &ZoneMap,
) -> OutputResult<()> {
    let turn = record.turn.0;
    let rows: Vec<MoveRow> = record.moves.iter().map(|mv| MoveRow::new(turn, mv, map)).collect();
    writer.write_moves(&rows)?;
    writer.write_turn_summary(&TurnSummaryRow {
        turn,
        moves:     rows.len() as u64,
        remaining: record.remaining as u64,
    })
}

/// A [`SimObserver`] that streams every turn to any [`OutputWriter`]
/// backend as it completes.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect output after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_turn_end(&mut self, record: &TurnRecord, map: &ZoneMap) {
        let result = write_turn(&mut self.writer, record, map);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_turn: Turn) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
