//! Pawn-class move generation (medeq / pawn)
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: one square toward the opponent, only onto an empty square
//! - **No double push**: neither ruleset here models the initial two-step
//! - **Captures**: one square diagonally forward, only onto an opposing piece
//! - **Promotion**: handled when the move is applied (see [`Board::apply_move`])

use crate::board::Board;
use crate::types::*;
use std::collections::BTreeSet;

pub fn generate_pawn_moves(
    board: &Board,
    from: Position,
    player: Player,
    moves: &mut BTreeSet<Position>,
) {
    let forward = player.forward();

    if let Some(to) = from.offset(forward, 0) {
        if board.is_empty(to) {
            moves.insert(to);
        }
    }

    for d_col in [-1, 1] {
        if let Some(to) = from.offset(forward, d_col) {
            if board.piece_color(to) == Some(player.opponent()) {
                moves.insert(to);
            }
        }
    }
}
