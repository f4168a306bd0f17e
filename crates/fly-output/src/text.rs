//! Plain-text backend: the turn log exactly as the CLI prints it.

use std::io::Write;

use crate::writer::OutputWriter;
use crate::{MoveRow, OutputResult, TurnSummaryRow};

/// Writes one line per turn: the turn's move tokens separated by single
/// spaces.  Summaries are not part of the text format and are ignored.
pub struct TextWriter<W: Write> {
    out: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputWriter for TextWriter<W> {
    fn write_moves(&mut self, rows: &[MoveRow]) -> OutputResult<()> {
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b" ")?;
            }
            write!(self.out, "{row}")?;
        }
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn write_turn_summary(&mut self, _row: &TurnSummaryRow) -> OutputResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
