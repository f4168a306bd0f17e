//! Framework error type.
//!
//! Sub-crates define their own error enums (`MapError`, `SimError`,
//! `OutputError`) and wrap `FlyError` as one variant where they need it.

use thiserror::Error;

/// The top-level error type for `fly-core`.
#[derive(Debug, Error)]
pub enum FlyError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `fly-core`.
pub type FlyResult<T> = Result<T, FlyError>;
