//! Error types for the Senterej engine
//!
//! Every error here is recoverable: it is returned to the caller as a typed
//! result and a rejected move never reaches the move log.

use crate::fen::FenError;
use crate::rules::TerminalReason;
use crate::types::{Player, Position, Timestamp};
use thiserror::Error;
use uuid::Uuid;

/// Why a move failed the legality check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// Source square is empty
    NoPiece,
    /// Source square holds the opponent's piece
    NotYourPiece,
    /// Destination is not reachable by the piece
    NotInLegalSet,
    /// Move would leave the mover's king attacked
    LeavesKingInCheck,
}

impl IllegalReason {
    pub fn as_str(self) -> &'static str {
        match self {
            IllegalReason::NoPiece => "no piece on the source square",
            IllegalReason::NotYourPiece => "piece belongs to the opponent",
            IllegalReason::NotInLegalSet => "piece cannot move there",
            IllegalReason::LeavesKingInCheck => "move would leave the king in check",
        }
    }
}

/// Errors that can occur in the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Destination not legal for the piece on the source square
    #[error("Illegal move {from} -> {to}: {}", reason.as_str())]
    IllegalMove {
        from: Position,
        to: Position,
        reason: IllegalReason,
    },

    /// Submission during Normal phase by the player not holding the turn
    #[error("Not your turn: {player} cannot move now")]
    NotYourTurn { player: Player },

    /// Submission after the game has ended
    #[error("Game already over ({reason})")]
    SessionComplete { reason: TerminalReason },

    /// Submission before the second player joined
    #[error("Waiting for an opponent to join")]
    WaitingForOpponent,

    /// Join attempt on a session with both seats taken
    #[error("Game is full")]
    SessionFull,

    /// Normal-phase submission claiming a time at or before the newest logged move
    #[error("Stale timestamp {claimed}: newest logged move is at {latest}")]
    StaleTimestamp { claimed: Timestamp, latest: Timestamp },

    /// No session under this id
    #[error("Unknown session {0}")]
    UnknownSession(Uuid),

    /// FEN text could not be parsed
    #[error("FEN parse error: {0}")]
    Fen(#[from] FenError),
}

impl EngineError {
    /// Stable machine-readable code the UI can branch on
    pub fn reason_code(&self) -> &'static str {
        match self {
            EngineError::IllegalMove { .. } => "illegal-move",
            EngineError::NotYourTurn { .. } => "not-your-turn",
            EngineError::SessionComplete { .. } => "session-complete",
            EngineError::WaitingForOpponent => "waiting-for-opponent",
            EngineError::SessionFull => "session-full",
            EngineError::StaleTimestamp { .. } => "stale-timestamp",
            EngineError::UnknownSession(_) => "unknown-session",
            EngineError::Fen(_) => "fen-parse-error",
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
