//! Movement rule engine
//!
//! Computes, for the piece on a square, every destination its movement class
//! allows under the given variant. These are pure functions over a [`Board`];
//! they know nothing about turns, phases or whether the mover's own king ends
//! up in check (that guard lives in [`crate::rules`]).
//!
//! # Module Structure
//!
//! - `sliding` - Shared ray and leap walkers
//! - `king`, `minister`, `elephant`, `knight`, `rook`, `pawn` - One file per movement class
//!
//! [`legal_destinations`] is the single source of truth; [`is_legal_move`]
//! is a membership test on its result.

mod elephant;
mod king;
mod knight;
mod minister;
mod pawn;
mod rook;
mod sliding;


use crate::board::Board;
use crate::types::*;
use std::collections::BTreeSet;

pub use elephant::generate_elephant_moves;
pub use king::generate_king_moves;
pub use knight::generate_knight_moves;
pub use minister::generate_minister_moves;
pub use pawn::generate_pawn_moves;
pub use rook::generate_rook_moves;

/// Every destination the piece on `from` may move to
///
/// Returns an empty set when `from` is empty.
pub fn legal_destinations(board: &Board, from: Position, variant: Variant) -> BTreeSet<Position> {
    let mut moves = BTreeSet::new();
    let Some(piece) = board.get(from) else {
        return moves;
    };
    let player = piece.owner;

    match piece.kind {
        PieceKind::King => generate_king_moves(board, from, player, &mut moves),
        PieceKind::Minister => generate_minister_moves(board, from, player, variant, &mut moves),
        PieceKind::Elephant => generate_elephant_moves(board, from, player, variant, &mut moves),
        PieceKind::Knight => generate_knight_moves(board, from, player, &mut moves),
        PieceKind::Rook => generate_rook_moves(board, from, player, &mut moves),
        PieceKind::Pawn => generate_pawn_moves(board, from, player, &mut moves),
    }

    moves
}

/// Whether the piece on `from` may move to `to`
#[inline]
pub fn is_legal_move(board: &Board, from: Position, to: Position, variant: Variant) -> bool {
    legal_destinations(board, from, variant).contains(&to)
}

/// All `(from, to)` pairs available to `player`, ignoring self-check
pub fn pseudo_legal_moves(board: &Board, player: Player, variant: Variant) -> Vec<(Position, Position)> {
    board
        .pieces_of(player)
        .flat_map(|(from, _)| {
            legal_destinations(board, from, variant)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Whether any piece of `by` could move onto `target`
///
/// Uses capture semantics: a pawn attacks only its forward diagonals, which
/// [`legal_destinations`] reports only when `target` is occupied by the other
/// side. Callers asking about a king square always satisfy that.
pub fn is_attacked_by(board: &Board, target: Position, by: Player, variant: Variant) -> bool {
    board
        .pieces_of(by)
        .any(|(from, _)| legal_destinations(board, from, variant).contains(&target))
}
