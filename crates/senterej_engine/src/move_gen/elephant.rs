//! Elephant-class move generation (saba / bishop)
//!
//! - **Senterej saba**: jumps exactly two squares diagonally. The square in
//!   between is ignored, occupied or not.
//! - **Standard bishop**: slides diagonally until blocked.

use super::sliding::{generate_leaping_moves, generate_sliding_moves};
use crate::board::Board;
use crate::constants::DIAGONAL;
use crate::types::*;
use std::collections::BTreeSet;

/// Two-square diagonal jump offsets
const SABA_OFFSETS: [(i8, i8); 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];

pub fn generate_elephant_moves(
    board: &Board,
    from: Position,
    player: Player,
    variant: Variant,
    moves: &mut BTreeSet<Position>,
) {
    match variant {
        Variant::Senterej => generate_leaping_moves(board, from, player, &SABA_OFFSETS, moves),
        Variant::Standard => generate_sliding_moves(board, from, player, &DIAGONAL, moves),
    }
}
