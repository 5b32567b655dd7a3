//! Rook-class move generation (der / rook)
//!
//! Unlimited orthogonal slide until blocked, capturing an opposing blocker.

use super::sliding::generate_sliding_moves;
use crate::board::Board;
use crate::constants::ORTHOGONAL;
use crate::types::*;
use std::collections::BTreeSet;

pub fn generate_rook_moves(
    board: &Board,
    from: Position,
    player: Player,
    moves: &mut BTreeSet<Position>,
) {
    generate_sliding_moves(board, from, player, &ORTHOGONAL, moves);
}
