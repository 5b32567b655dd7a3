//! Board representation and piece relocation
//!
//! The board is a plain 8×8 grid of `Option<Piece>`. It carries no turn or
//! phase information; that lives in the phase controller and is re-derived
//! from the move log on every replay.

use crate::constants::{SENTEREJ_BACK_RANK, STANDARD_BACK_RANK};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Result of relocating one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The piece as it stood on the source square
    pub piece: Piece,
    /// Opposing piece removed from the destination, if any
    pub captured: Option<Piece>,
    /// Whether a pawn was promoted to the minister class
    pub promoted: bool,
}

/// 8×8 grid, indexed `[row][col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Board with no pieces
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Starting position of the given variant
    pub fn initial(variant: Variant) -> Self {
        let back_rank = match variant {
            Variant::Senterej => SENTEREJ_BACK_RANK,
            Variant::Standard => STANDARD_BACK_RANK,
        };

        let mut board = Self::empty();
        for col in 0..BOARD_SIZE as usize {
            board.squares[0][col] = Some(Piece::new(back_rank[col], Player::Black));
            board.squares[1][col] = Some(Piece::new(PieceKind::Pawn, Player::Black));
            board.squares[6][col] = Some(Piece::new(PieceKind::Pawn, Player::White));
            board.squares[7][col] = Some(Piece::new(back_rank[col], Player::White));
        }
        board
    }

    /// Build a board from `(kind, owner, position)` triples
    ///
    /// Later entries overwrite earlier ones on the same square.
    pub fn from_pieces(pieces: &[(PieceKind, Player, Position)]) -> Self {
        let mut board = Self::empty();
        for &(kind, owner, pos) in pieces {
            board.set(pos, Some(Piece::new(kind, owner)));
        }
        board
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row as usize][pos.col as usize]
    }

    #[inline]
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.row as usize][pos.col as usize] = piece;
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Owner of the piece on `pos`, if any
    #[inline]
    pub fn piece_color(&self, pos: Position) -> Option<Player> {
        self.get(pos).map(|p| p.owner)
    }

    /// Row `row` as a slice, a-file first
    pub fn rank(&self, row: u8) -> &[Option<Piece>; 8] {
        &self.squares[row as usize]
    }

    /// All occupied squares with their pieces, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    /// Pieces owned by `player`
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.owner == player)
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    /// Square of `player`'s king-class piece
    pub fn king_position(&self, player: Player) -> Option<Position> {
        self.pieces_of(player)
            .find(|(_, piece)| piece.is_king())
            .map(|(pos, _)| pos)
    }

    /// Relocate the piece on `from` to `to`
    ///
    /// Removes whatever stands on `to`, marks the piece as moved and promotes a
    /// pawn arriving on its far rank to the minister class. Legality is not
    /// checked here; returns `None` only when `from` is empty.
    pub fn apply_move(&mut self, from: Position, to: Position) -> Option<AppliedMove> {
        let piece = self.get(from)?;
        let captured = self.get(to).filter(|target| target.owner != piece.owner);

        let mut moved = piece;
        moved.has_moved = true;
        let promoted = moved.kind == PieceKind::Pawn && to.row == moved.owner.promotion_row();
        if promoted {
            moved.kind = PieceKind::Minister;
        }

        self.set(from, None);
        self.set(to, Some(moved));

        Some(AppliedMove {
            piece,
            captured,
            promoted,
        })
    }

    /// Copy of the board with one move applied
    pub fn with_move(&self, from: Position, to: Position) -> Board {
        let mut next = *self;
        next.apply_move(from, to);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_initial_board_layout() {
        let board = Board::initial(Variant::Senterej);
        for col in 0..8 {
            assert_eq!(
                board.get(pos(6, col)),
                Some(Piece::new(PieceKind::Pawn, Player::White))
            );
            assert_eq!(
                board.get(pos(1, col)),
                Some(Piece::new(PieceKind::Pawn, Player::Black))
            );
        }
        assert_eq!(board.count(Player::White), 16);
        assert_eq!(board.count(Player::Black), 16);
        assert_eq!(board.king_position(Player::White), Some(pos(7, 6)));

        let standard = Board::initial(Variant::Standard);
        assert_eq!(standard.king_position(Player::Black), Some(pos(0, 4)));
    }

    #[test]
    fn test_apply_move_captures_and_marks_moved() {
        let mut board = Board::from_pieces(&[
            (PieceKind::Rook, Player::White, pos(4, 0)),
            (PieceKind::Knight, Player::Black, pos(4, 5)),
        ]);

        let applied = board.apply_move(pos(4, 0), pos(4, 5)).unwrap();
        assert_eq!(applied.captured.map(|p| p.kind), Some(PieceKind::Knight));
        assert!(!applied.promoted);
        assert!(board.is_empty(pos(4, 0)));
        let rook = board.get(pos(4, 5)).unwrap();
        assert!(rook.has_moved);
        assert_eq!(rook.owner, Player::White);
    }

    #[test]
    fn test_apply_move_from_empty_square() {
        let mut board = Board::empty();
        assert!(board.apply_move(pos(0, 0), pos(1, 1)).is_none());
    }

    #[test]
    fn test_pawn_promotes_to_minister() {
        let mut board = Board::from_pieces(&[
            (PieceKind::Pawn, Player::White, pos(1, 3)),
            (PieceKind::Pawn, Player::Black, pos(6, 2)),
        ]);

        assert!(board.apply_move(pos(1, 3), pos(0, 3)).unwrap().promoted);
        assert_eq!(board.get(pos(0, 3)).unwrap().kind, PieceKind::Minister);

        assert!(board.apply_move(pos(6, 2), pos(7, 2)).unwrap().promoted);
        assert_eq!(board.get(pos(7, 2)).unwrap().kind, PieceKind::Minister);
    }
}
