//! Error types for the command-line front end
//!
//! Library errors from the engine and the FEN codec are wrapped so a command
//! can use `?` on both, alongside settings and replay-file I/O.

use senterej_engine::types::ParseSquareError;
use senterej_engine::{EngineError, FenError};
use thiserror::Error;

/// Errors that can occur in the CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// Settings or replay file I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings or replay file serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Square name that is neither algebraic nor `row,col`
    #[error(transparent)]
    Square(#[from] ParseSquareError),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Sync message encoding
    #[error(transparent)]
    Protocol(#[from] shared::ProtocolError),
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;
