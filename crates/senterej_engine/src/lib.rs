//! Senterej and standard chess rules with concurrent move reconciliation
//!
//! The engine is a set of pure rule functions plus a replicated move log.
//! Both players of a Senterej game may move freely during the opening
//! (Werera) until the first capture; moves are stamped with the submitter's
//! clock and every peer folds the same log in the same order, so all
//! replicas converge on one board.
//!
//! ## Module Organization
//!
//! - `types`, `constants` - Coordinates, players, piece classes, opening setups
//! - `board` - 8×8 grid and piece relocation
//! - `move_gen` - Per-class destination generators for both variants
//! - `rules` - Check, mate, stalemate, bare king and terminal evaluation
//! - `phase` - Werera / Normal / Complete state machine
//! - `history`, `captured` - Move log, canonical replay, derived state
//! - `fen` - Single-line state codec
//! - `api` - Sessions, the session store and peers
//! - `config`, `error` - Tuning knobs and typed errors

pub mod api;
pub mod board;
pub mod captured;
pub mod config;
pub mod constants;
pub mod error;
pub mod fen;
pub mod history;
pub mod move_gen;
pub mod phase;
pub mod rules;
pub mod types;

pub use api::{GameSession, MoveAccepted, Peer, PlayerInfo, Players, SessionStatus, SessionStore};
pub use board::Board;
pub use captured::CapturedPieces;
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult, IllegalReason};
pub use fen::{FenError, FenPosition, Notation};
pub use history::{
    canonical_board, replay, replay_with, GameState, Move, MoveId, MoveLog, StartPosition,
};
pub use move_gen::{is_legal_move, legal_destinations};
pub use phase::{Phase, PhaseController};
pub use rules::{evaluate, evaluate_with, TerminalEvent, TerminalReason};
pub use types::{Piece, PieceKind, Player, Position, Timestamp, Variant};
