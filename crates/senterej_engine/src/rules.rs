//! Terminal-condition evaluation
//!
//! Check, checkmate, stalemate, bare king and king capture, built on the
//! movement rule engine. Everything here is a pure query over a [`Board`].
//!
//! # Outcomes
//!
//! | Reason          | Winner                                          |
//! |-----------------|-------------------------------------------------|
//! | `king-captured` | the side that still has a king                  |
//! | `bare-king`     | the other side (Senterej only; both bare draws) |
//! | `checkmate`     | the side delivering mate                        |
//! | `stalemate`     | Senterej: the other side; Standard: none (draw) |
//! | `resignation`   | the side that did not resign                    |
//! | `timeout`       | the side that did not time out                  |

use crate::board::Board;
use crate::move_gen::{is_attacked_by, legal_destinations};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalReason {
    Checkmate,
    Stalemate,
    BareKing,
    KingCaptured,
    Resignation,
    Timeout,
}

impl TerminalReason {
    pub fn as_str(self) -> &'static str {
        match self {
            TerminalReason::Checkmate => "checkmate",
            TerminalReason::Stalemate => "stalemate",
            TerminalReason::BareKing => "bare-king",
            TerminalReason::KingCaptured => "king-captured",
            TerminalReason::Resignation => "resignation",
            TerminalReason::Timeout => "timeout",
        }
    }

    /// Whether the reason is signalled from outside rather than read off the board
    pub fn is_external(self) -> bool {
        matches!(self, TerminalReason::Resignation | TerminalReason::Timeout)
    }
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal notification: why the game ended and who won, if anyone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalEvent {
    pub reason: TerminalReason,
    pub winner: Option<Player>,
}

impl TerminalEvent {
    pub fn new(reason: TerminalReason, winner: Option<Player>) -> Self {
        Self { reason, winner }
    }

    /// `player` resigned; the opponent wins
    pub fn resignation(player: Player) -> Self {
        Self::new(TerminalReason::Resignation, Some(player.opponent()))
    }

    /// `player` ran out of time; the opponent wins
    pub fn timeout(player: Player) -> Self {
        Self::new(TerminalReason::Timeout, Some(player.opponent()))
    }

    /// Human-readable summary
    pub fn message(&self) -> String {
        match self.winner {
            Some(winner) => format!("{winner} wins by {}", self.reason),
            None => format!("draw by {}", self.reason),
        }
    }
}

/// Whether `player`'s king is attacked
///
/// A side without a king is never "in check"; losing the king is reported
/// separately by [`evaluate`].
pub fn in_check(board: &Board, player: Player, variant: Variant) -> bool {
    match board.king_position(player) {
        Some(king) => is_attacked_by(board, king, player.opponent(), variant),
        None => false,
    }
}

/// Whether moving `from → to` would leave the mover's king attacked
///
/// Returns `false` when `from` is empty.
pub fn leaves_king_in_check(board: &Board, from: Position, to: Position, variant: Variant) -> bool {
    match board.get(from) {
        Some(piece) => in_check(&board.with_move(from, to), piece.owner, variant),
        None => false,
    }
}

/// Every destination from `from` that does not leave the mover in check
pub fn safe_destinations(board: &Board, from: Position, variant: Variant) -> Vec<Position> {
    legal_destinations(board, from, variant)
        .into_iter()
        .filter(|&to| !leaves_king_in_check(board, from, to, variant))
        .collect()
}

/// Whether `player` has at least one move that keeps their king safe
pub fn has_any_legal_move(board: &Board, player: Player, variant: Variant) -> bool {
    board.pieces_of(player).any(|(from, _)| {
        legal_destinations(board, from, variant)
            .into_iter()
            .any(|to| !leaves_king_in_check(board, from, to, variant))
    })
}

/// Whether `player` has any move at all, own king safety ignored
pub fn has_any_move(board: &Board, player: Player, variant: Variant) -> bool {
    board
        .pieces_of(player)
        .any(|(from, _)| !legal_destinations(board, from, variant).is_empty())
}

pub fn is_checkmate(board: &Board, player: Player, variant: Variant) -> bool {
    in_check(board, player, variant) && !has_any_legal_move(board, player, variant)
}

pub fn is_stalemate(board: &Board, player: Player, variant: Variant) -> bool {
    !in_check(board, player, variant) && !has_any_legal_move(board, player, variant)
}

/// Whether `player`'s only remaining piece is their king
pub fn bare_king(board: &Board, player: Player) -> bool {
    let mut pieces = board.pieces_of(player);
    matches!((pieces.next(), pieces.next()), (Some((_, piece)), None) if piece.is_king())
}

/// Terminal condition of a position with `to_move` next to act, if any
pub fn evaluate(board: &Board, to_move: Player, variant: Variant) -> Option<TerminalEvent> {
    evaluate_with(board, to_move, variant, false)
}

/// [`evaluate`] under a ruleset that may accept self-check
///
/// With `self_check_allowed` (Werera by default) any pseudo-legal move keeps
/// `to_move` alive, so mate and stalemate only arise when no piece can move.
pub fn evaluate_with(
    board: &Board,
    to_move: Player,
    variant: Variant,
    self_check_allowed: bool,
) -> Option<TerminalEvent> {
    let white_king = board.king_position(Player::White).is_some();
    let black_king = board.king_position(Player::Black).is_some();
    match (white_king, black_king) {
        (true, true) => {}
        (true, false) => {
            return Some(TerminalEvent::new(TerminalReason::KingCaptured, Some(Player::White)))
        }
        (false, true) => {
            return Some(TerminalEvent::new(TerminalReason::KingCaptured, Some(Player::Black)))
        }
        (false, false) => return Some(TerminalEvent::new(TerminalReason::KingCaptured, None)),
    }

    if variant == Variant::Senterej {
        match (bare_king(board, Player::White), bare_king(board, Player::Black)) {
            (false, false) => {}
            (true, true) => return Some(TerminalEvent::new(TerminalReason::BareKing, None)),
            (true, false) => {
                return Some(TerminalEvent::new(TerminalReason::BareKing, Some(Player::Black)))
            }
            (false, true) => {
                return Some(TerminalEvent::new(TerminalReason::BareKing, Some(Player::White)))
            }
        }
    }

    let can_move = if self_check_allowed {
        has_any_move(board, to_move, variant)
    } else {
        has_any_legal_move(board, to_move, variant)
    };
    if can_move {
        return None;
    }

    if in_check(board, to_move, variant) {
        return Some(TerminalEvent::new(
            TerminalReason::Checkmate,
            Some(to_move.opponent()),
        ));
    }

    // A stalemated Senterej player loses; in standard chess it is a draw
    let winner = match variant {
        Variant::Senterej => Some(to_move.opponent()),
        Variant::Standard => None,
    };
    Some(TerminalEvent::new(TerminalReason::Stalemate, winner))
}
