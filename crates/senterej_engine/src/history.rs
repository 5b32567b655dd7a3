//! Move log and deterministic replay
//!
//! The log is the only replicated state of a game. Every peer holds the same
//! set of moves, sorts them by `(timestamp, mover, id)` and folds them over the
//! starting position; identical logs therefore produce identical boards no
//! matter in which order the moves were delivered.
//!
//! Replay applies moves without re-checking movement legality. Legality was
//! decided once at submission time against the submitter's view. A move whose
//! source square no longer holds one of the mover's pieces, because an
//! earlier move in canonical order captured or displaced it, cannot be
//! applied and is reported in [`GameState::skipped`].

use crate::board::Board;
use crate::captured::CapturedPieces;
use crate::config::EngineConfig;
use crate::fen::{self, FenPosition, Notation};
use crate::phase::{Phase, PhaseController};
use crate::rules::{evaluate_with, in_check, TerminalEvent, TerminalReason};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};
use uuid::Uuid;

/// Unique id minted when a move is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(pub Uuid);

impl MoveId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MoveId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One accepted move
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub id: MoveId,
    pub from: Position,
    pub to: Position,
    pub mover: Player,
    /// Class of the moving piece when it was submitted
    pub piece: PieceKind,
    /// Class of the piece on the destination when it was submitted
    pub captured: Option<PieceKind>,
    /// Milliseconds claimed by the submitting peer
    pub timestamp: Timestamp,
}

impl Move {
    /// New move with a fresh id
    pub fn new(
        mover: Player,
        piece: PieceKind,
        from: Position,
        to: Position,
        captured: Option<PieceKind>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: MoveId::new(),
            from,
            to,
            mover,
            piece,
            captured,
            timestamp,
        }
    }

    /// Canonical ordering key; White sorts before Black on a timestamp tie
    pub fn sort_key(&self) -> (Timestamp, Player, MoveId) {
        (self.timestamp, self.mover, self.id)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.captured.is_some() { 'x' } else { '-' };
        write!(f, "{} {}{}{} @{}", self.mover, self.from, sep, self.to, self.timestamp)
    }
}

/// Set of accepted moves, kept in canonical order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    moves: Vec<Move>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a move at its canonical position
    ///
    /// Returns `false` without touching the log when a move with the same id
    /// is already present.
    pub fn insert(&mut self, mv: Move) -> bool {
        if self.contains(mv.id) {
            trace!("[REPLAY] Duplicate delivery of move {}", mv.id);
            return false;
        }
        let key = mv.sort_key();
        let pos = self
            .moves
            .binary_search_by(|m| m.sort_key().cmp(&key))
            .unwrap_or_else(|p| p);
        self.moves.insert(pos, mv);
        true
    }

    pub fn contains(&self, id: MoveId) -> bool {
        self.moves.iter().any(|m| m.id == id)
    }

    pub fn get(&self, id: MoveId) -> Option<&Move> {
        self.moves.iter().find(|m| m.id == id)
    }

    /// Moves in canonical order
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Timestamp of the newest move
    pub fn latest_timestamp(&self) -> Option<Timestamp> {
        self.moves.last().map(|m| m.timestamp)
    }
}

impl FromIterator<Move> for MoveLog {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut log = MoveLog::new();
        for mv in iter {
            log.insert(mv);
        }
        log
    }
}

/// Position a game is replayed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPosition {
    pub board: Board,
    /// `Werera` or `Normal`
    pub phase: Phase,
    pub turn: Player,
    pub move_count: u32,
}

impl StartPosition {
    /// Standard opening setup of `variant`, White first
    pub fn initial(variant: Variant) -> Self {
        Self {
            board: Board::initial(variant),
            phase: Phase::initial(variant),
            turn: Player::White,
            move_count: 0,
        }
    }

    /// Custom board with the variant's initial phase
    pub fn with_board(board: Board, variant: Variant) -> Self {
        Self {
            board,
            ..Self::initial(variant)
        }
    }
}

impl From<&FenPosition> for StartPosition {
    fn from(fen: &FenPosition) -> Self {
        Self {
            board: fen.board,
            phase: fen.phase,
            turn: fen.active,
            move_count: fen.move_count,
        }
    }
}

/// Snapshot derived from the start position and the move log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub variant: Variant,
    pub board: Board,
    /// Player expected to move next; informational during Werera
    pub current_player: Player,
    pub captured_pieces: CapturedPieces,
    /// Whether `current_player`'s king is attacked
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub winner: Option<Player>,
    pub phase: Phase,
    pub move_count: u32,
    pub outcome: Option<TerminalEvent>,
    /// Logged moves that could not be applied
    pub skipped: Vec<MoveId>,
}

impl GameState {
    pub fn is_complete(&self) -> bool {
        self.phase.is_complete()
    }

    /// Record an external terminal event (resignation or timeout)
    ///
    /// Ignored when the position already ended the game.
    pub fn conclude(&mut self, event: TerminalEvent) {
        if self.outcome.is_some() {
            return;
        }
        self.phase = Phase::Complete(event.reason);
        self.winner = event.winner;
        self.outcome = Some(event);
    }

    /// Encode as a FEN line in `notation`
    pub fn to_fen(&self, notation: Notation) -> String {
        fen::encode(
            &self.board,
            self.current_player,
            self.phase,
            self.move_count,
            notation,
        )
    }
}

/// Fold `moves` over `start` in canonical order with the default config
pub fn replay(start: &StartPosition, moves: &[Move], variant: Variant) -> GameState {
    replay_with(start, moves, variant, &EngineConfig::default())
}

/// Fold `moves` over `start` in canonical order
///
/// `moves` may be in any order. Records sharing an id collapse to the one
/// that sorts first, so the result only depends on the set of records.
/// While Werera accepts self-check (`allow_self_check_in_werera`), terminal
/// evaluation counts those moves as available too.
pub fn replay_with(
    start: &StartPosition,
    moves: &[Move],
    variant: Variant,
    config: &EngineConfig,
) -> GameState {
    let mut ordered: Vec<&Move> = moves.iter().collect();
    ordered.sort_by_key(|m| (m.id, m.sort_key(), m.from, m.to, m.piece, m.captured));
    ordered.dedup_by_key(|m| m.id);
    ordered.sort_by_key(|m| m.sort_key());

    let lenient = |phase: Phase| phase == Phase::Werera && config.allow_self_check_in_werera;

    let mut board = start.board;
    let mut controller = PhaseController::resume(start.phase, start.turn);
    let mut captured_pieces = CapturedPieces::default();
    let mut move_count = start.move_count;
    let mut skipped = Vec::new();

    if let Some(event) = evaluate_with(&board, start.turn, variant, lenient(start.phase)) {
        controller.finish(event);
    }

    for mv in ordered {
        if controller.is_complete() {
            debug!("[REPLAY] Skipping {} after the game ended", mv);
            skipped.push(mv.id);
            continue;
        }

        let source_ok = board.piece_color(mv.from) == Some(mv.mover);
        let target_ok = board.piece_color(mv.to) != Some(mv.mover);
        if !source_ok || !target_ok {
            debug!("[REPLAY] Skipping {}: no longer applicable", mv);
            skipped.push(mv.id);
            continue;
        }

        let Some(applied) = board.apply_move(mv.from, mv.to) else {
            skipped.push(mv.id);
            continue;
        };
        if let Some(taken) = applied.captured {
            captured_pieces.add_capture(taken.owner, taken.kind);
        }
        move_count += 1;
        controller.record_move(mv.mover, applied.captured.is_some());

        let to_move = mv.mover.opponent();
        if let Some(event) = evaluate_with(&board, to_move, variant, lenient(controller.phase())) {
            controller.finish(event);
        }
    }

    let current_player = controller.current_turn();
    let outcome = controller.outcome();
    let reason = outcome.map(|e| e.reason);

    GameState {
        variant,
        board,
        current_player,
        captured_pieces,
        check: in_check(&board, current_player, variant),
        checkmate: reason == Some(TerminalReason::Checkmate),
        stalemate: reason == Some(TerminalReason::Stalemate),
        winner: outcome.and_then(|e| e.winner),
        phase: controller.phase(),
        move_count,
        outcome,
        skipped,
    }
}

/// Board produced by [`replay`]
pub fn canonical_board(start: &StartPosition, moves: &[Move], variant: Variant) -> Board {
    replay(start, moves, variant).board
}
