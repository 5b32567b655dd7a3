//! Knight-class move generation (ferese / knight)
//!
//! Knights move in an L-shape: 2 squares in one direction, then 1 square
//! perpendicular. Identical in both variants.
//!
//! - Knights jump over pieces
//! - Up to 8 destinations, fewer near the edges
//! - Cannot land on own pieces

use super::sliding::generate_leaping_moves;
use crate::board::Board;
use crate::constants::KNIGHT_OFFSETS;
use crate::types::*;
use std::collections::BTreeSet;

pub fn generate_knight_moves(
    board: &Board,
    from: Position,
    player: Player,
    moves: &mut BTreeSet<Position>,
) {
    generate_leaping_moves(board, from, player, &KNIGHT_OFFSETS, moves);
}
