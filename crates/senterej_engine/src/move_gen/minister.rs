//! Minister-class move generation (fers / queen)
//!
//! The variant changes the rule, not just the label:
//!
//! - **Senterej fers**: exactly one square diagonally.
//! - **Standard queen**: unlimited orthogonal and diagonal slides until blocked.

use super::sliding::{generate_leaping_moves, generate_sliding_moves};
use crate::board::Board;
use crate::constants::{DIAGONAL, ORTHOGONAL};
use crate::types::*;
use std::collections::BTreeSet;

pub fn generate_minister_moves(
    board: &Board,
    from: Position,
    player: Player,
    variant: Variant,
    moves: &mut BTreeSet<Position>,
) {
    match variant {
        Variant::Senterej => generate_leaping_moves(board, from, player, &DIAGONAL, moves),
        Variant::Standard => {
            generate_sliding_moves(board, from, player, &ORTHOGONAL, moves);
            generate_sliding_moves(board, from, player, &DIAGONAL, moves);
        }
    }
}
