//! Sliding and stepping helpers
//!
//! Common functionality for every piece class. Two shapes cover all of them:
//!
//! - **Rays** (rook, standard queen, standard bishop): walk a direction until
//!   the edge or the first occupied square. An opposing blocker is included
//!   as a capture; an own blocker is not.
//! - **Leaps** (king, fers, saba, knight): a fixed set of offsets checked
//!   independently. Intervening squares are never inspected, which is what
//!   makes the saba a jumper rather than a short slider.

use crate::board::Board;
use crate::types::*;
use std::collections::BTreeSet;

/// Whether `player` may land on `to`: empty or opposing
#[inline]
pub fn can_land(board: &Board, to: Position, player: Player) -> bool {
    board.piece_color(to) != Some(player)
}

/// Add every square reachable along `directions` until blocked
pub fn generate_sliding_moves(
    board: &Board,
    from: Position,
    player: Player,
    directions: &[(i8, i8)],
    moves: &mut BTreeSet<Position>,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from.offset(d_row, d_col);
        while let Some(to) = cursor {
            match board.piece_color(to) {
                None => {
                    moves.insert(to);
                }
                Some(owner) => {
                    if owner != player {
                        moves.insert(to);
                    }
                    break;
                }
            }
            cursor = to.offset(d_row, d_col);
        }
    }
}

/// Add every in-bounds offset square not occupied by `player`
pub fn generate_leaping_moves(
    board: &Board,
    from: Position,
    player: Player,
    offsets: &[(i8, i8)],
    moves: &mut BTreeSet<Position>,
) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if can_land(board, to, player) {
                moves.insert(to);
            }
        }
    }
}
