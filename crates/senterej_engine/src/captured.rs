//! Captured pieces tracking
//!
//! Tracks pieces captured by each player and calculates material advantage.
//!
//! # Material Advantage
//!
//! Positive advantage means White is ahead, negative means Black is ahead.
//! Values depend on the variant: a Senterej fers is worth far less than a
//! queen, and a saba less than a bishop.

use crate::types::*;
use serde::{Deserialize, Serialize};

/// Captures made by both sides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPieces {
    /// Pieces captured by white (black pieces taken)
    pub white_captured: Vec<PieceKind>,
    /// Pieces captured by black (white pieces taken)
    pub black_captured: Vec<PieceKind>,
}

impl CapturedPieces {
    /// Record a piece capture
    ///
    /// # Arguments
    ///
    /// * `captured_owner` - Owner of the piece that was taken
    /// * `kind` - Class of the piece that was taken
    pub fn add_capture(&mut self, captured_owner: Player, kind: PieceKind) {
        match captured_owner {
            Player::White => self.black_captured.push(kind),
            Player::Black => self.white_captured.push(kind),
        }
    }

    /// Pieces taken by `player`
    pub fn taken_by(&self, player: Player) -> &[PieceKind] {
        match player {
            Player::White => &self.white_captured,
            Player::Black => &self.black_captured,
        }
    }

    pub fn total(&self) -> usize {
        self.white_captured.len() + self.black_captured.len()
    }

    /// Material difference in pawn units, White minus Black
    pub fn material_advantage(&self, variant: Variant) -> i32 {
        let white: i32 = self.white_captured.iter().map(|k| k.value(variant)).sum();
        let black: i32 = self.black_captured.iter().map(|k| k.value(variant)).sum();
        white - black
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_pieces_default() {
        //! Starts empty with no advantage
        let captured = CapturedPieces::default();
        assert_eq!(captured.total(), 0);
        assert_eq!(captured.material_advantage(Variant::Senterej), 0);
    }

    #[test]
    fn test_add_capture_credits_the_taker() {
        let mut captured = CapturedPieces::default();
        captured.add_capture(Player::Black, PieceKind::Rook);
        captured.add_capture(Player::White, PieceKind::Pawn);

        assert_eq!(captured.taken_by(Player::White), &[PieceKind::Rook]);
        assert_eq!(captured.taken_by(Player::Black), &[PieceKind::Pawn]);
        assert!(captured.material_advantage(Variant::Standard) > 0);
    }

    #[test]
    fn test_minister_value_depends_on_variant() {
        let mut captured = CapturedPieces::default();
        captured.add_capture(Player::Black, PieceKind::Minister);

        assert!(
            captured.material_advantage(Variant::Standard)
                > captured.material_advantage(Variant::Senterej)
        );
    }
}
