//! King-class move generation (negus / king)
//!
//! One square in any of the eight directions in both variants. Castling does
//! not exist in either ruleset here.

use super::sliding::generate_leaping_moves;
use crate::board::Board;
use crate::constants::{DIAGONAL, ORTHOGONAL};
use crate::types::*;
use std::collections::BTreeSet;

pub fn generate_king_moves(
    board: &Board,
    from: Position,
    player: Player,
    moves: &mut BTreeSet<Position>,
) {
    generate_leaping_moves(board, from, player, &ORTHOGONAL, moves);
    generate_leaping_moves(board, from, player, &DIAGONAL, moves);
}
