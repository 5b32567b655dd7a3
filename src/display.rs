//! Plain-text board rendering
//!
//! ```text
//! 8 | d e f s e s n d
//! 7 | m m m m m m m m
//! ...
//!     a b c d e f g h
//! ```

use senterej_engine::types::BOARD_SIZE;
use senterej_engine::{Board, GameState, Notation, Phase, Player};
use std::fmt::Write;

/// Board as eight text rows plus a file legend, Black at the top
pub fn render_board(board: &Board, notation: Notation) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        let _ = write!(out, "{} |", BOARD_SIZE - row);
        for square in board.rank(row) {
            let symbol = square.map_or('.', |piece| notation.piece_char(piece));
            out.push(' ');
            out.push(symbol);
        }
        out.push('\n');
    }
    out.push_str("    a b c d e f g h\n");
    out
}

/// One-paragraph status of a derived state
pub fn describe_state(state: &GameState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "variant: {}", state.variant);
    let _ = writeln!(out, "phase:   {}", state.phase);

    match state.phase {
        Phase::Werera => {
            let _ = writeln!(out, "turn:    both players (werera)");
        }
        Phase::Normal => {
            let check = if state.check { " (in check)" } else { "" };
            let _ = writeln!(out, "turn:    {}{}", state.current_player, check);
        }
        Phase::Complete(_) => {
            if let Some(event) = state.outcome {
                let _ = writeln!(out, "result:  {}", event.message());
            }
        }
    }

    let _ = writeln!(out, "moves:   {}", state.move_count);
    let advantage = state.captured_pieces.material_advantage(state.variant);
    if state.captured_pieces.total() > 0 {
        let leader = match advantage.signum() {
            1 => Player::White.to_string(),
            -1 => Player::Black.to_string(),
            _ => "even".to_string(),
        };
        let _ = writeln!(out, "material: {} ({:+})", leader, advantage);
    }
    if !state.skipped.is_empty() {
        let _ = writeln!(out, "skipped: {} move(s)", state.skipped.len());
    }
    out
}
