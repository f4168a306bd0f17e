//! `fly-output`: turn-log writers for the fly-in drone router.
//!
//! | Backend        | Output                                          |
//! |----------------|-------------------------------------------------|
//! | [`TextWriter`] | One space-separated line of move tokens per turn |
//! | [`CsvWriter`]  | `moves.csv`, `turn_summaries.csv`                |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `fly_sim::SimObserver`, or directly with [`write_turn`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use fly_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod text;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{write_turn, SimOutputObserver};
pub use row::{MoveRow, TurnSummaryRow};
pub use text::TextWriter;
pub use writer::OutputWriter;
