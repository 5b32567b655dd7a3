//! Core value types shared by every engine module
//!
//! ## Coordinates
//!
//! A [`Position`] is a `(row, col)` pair in `[0, 8)`. Row 0 is Black's back
//! rank and row 7 is White's, so White pawns advance toward row 0. Positions
//! render in algebraic form: `(0, 0)` is `a8`, `(7, 7)` is `h1`.
//!
//! ## Piece vocabularies
//!
//! Senterej and standard chess name their pieces differently, and two of the
//! classes move differently, but both map onto the same six movement classes
//! of [`PieceKind`]. The mapping happens once, when a name is parsed; every
//! rule afterwards matches on the enum.
//!
//! | Class      | Senterej | Standard |
//! |------------|----------|----------|
//! | `King`     | negus    | king     |
//! | `Minister` | fers     | queen    |
//! | `Elephant` | saba     | bishop   |
//! | `Knight`   | ferese   | knight   |
//! | `Rook`     | der      | rook     |
//! | `Pawn`     | medeq    | pawn     |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Board edge length
pub const BOARD_SIZE: u8 = 8;

/// Claimed wall-clock time of a submission, in milliseconds
pub type Timestamp = u64;

/// Error returned when a textual name does not match any known value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} '{value}'")]
pub struct ParseNameError {
    pub what: &'static str,
    pub value: String,
}

impl ParseNameError {
    fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Row delta of a forward pawn step
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Player::White => -1,
            Player::Black => 1,
        }
    }

    /// Row a pawn of this side promotes on
    #[inline]
    pub fn promotion_row(self) -> u8 {
        match self {
            Player::White => 0,
            Player::Black => BOARD_SIZE - 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Player::White => "white",
            Player::Black => "black",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Player {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Player::White),
            "black" | "b" => Ok(Player::Black),
            _ => Err(ParseNameError::new("player", s)),
        }
    }
}

/// Ruleset a game is played under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Ethiopian chess: simultaneous Werera opening, short-range fers and saba
    #[default]
    Senterej,
    /// International chess without castling, en passant or the double step
    Standard,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Senterej => "senterej",
            Variant::Standard => "standard",
        }
    }

    /// Whether games of this variant open with the simultaneous phase
    pub fn has_werera(self) -> bool {
        matches!(self, Variant::Senterej)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "senterej" => Ok(Variant::Senterej),
            "standard" | "chess" => Ok(Variant::Standard),
            _ => Err(ParseNameError::new("variant", s)),
        }
    }
}

/// The six movement classes shared by both vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Minister,
    Elephant,
    Knight,
    Rook,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Minister,
        PieceKind::Elephant,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Pawn,
    ];

    /// Name of this class in the given variant's vocabulary
    pub fn local_name(self, variant: Variant) -> &'static str {
        match (variant, self) {
            (Variant::Senterej, PieceKind::King) => "negus",
            (Variant::Senterej, PieceKind::Minister) => "fers",
            (Variant::Senterej, PieceKind::Elephant) => "saba",
            (Variant::Senterej, PieceKind::Knight) => "ferese",
            (Variant::Senterej, PieceKind::Rook) => "der",
            (Variant::Senterej, PieceKind::Pawn) => "medeq",
            (Variant::Standard, PieceKind::King) => "king",
            (Variant::Standard, PieceKind::Minister) => "queen",
            (Variant::Standard, PieceKind::Elephant) => "bishop",
            (Variant::Standard, PieceKind::Knight) => "knight",
            (Variant::Standard, PieceKind::Rook) => "rook",
            (Variant::Standard, PieceKind::Pawn) => "pawn",
        }
    }

    /// Resolve a piece name from either vocabulary
    pub fn from_name(name: &str) -> Result<PieceKind, ParseNameError> {
        match name.to_ascii_lowercase().as_str() {
            "negus" | "king" => Ok(PieceKind::King),
            "fers" | "queen" | "minister" => Ok(PieceKind::Minister),
            "saba" | "bishop" | "elephant" => Ok(PieceKind::Elephant),
            "ferese" | "knight" => Ok(PieceKind::Knight),
            "der" | "rook" => Ok(PieceKind::Rook),
            "medeq" | "pawn" => Ok(PieceKind::Pawn),
            _ => Err(ParseNameError::new("piece", name)),
        }
    }

    /// Material value in pawns, used for the captured-pieces balance
    pub fn value(self, variant: Variant) -> i32 {
        match (self, variant) {
            (PieceKind::King, _) => 0,
            (PieceKind::Pawn, _) => 1,
            (PieceKind::Knight, _) => 3,
            (PieceKind::Rook, _) => 5,
            (PieceKind::Minister, Variant::Standard) => 9,
            (PieceKind::Elephant, Variant::Standard) => 3,
            // Short-range pieces are worth far less than their standard cousins
            (PieceKind::Minister, Variant::Senterej) => 2,
            (PieceKind::Elephant, Variant::Senterej) => 2,
        }
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Player,
    #[serde(default)]
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, owner: Player) -> Self {
        Self {
            kind,
            owner,
            has_moved: false,
        }
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    #[inline]
    pub fn belongs_to(&self, player: Player) -> bool {
        self.owner == player
    }
}

/// Error returned for an unparsable square name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square '{0}' (expected a1..h8 or row,col)")]
pub struct ParseSquareError(pub String);

/// A square on the 8×8 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Build a position, returning `None` when out of bounds
    #[inline]
    pub fn new(row: u8, col: u8) -> Option<Position> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Position { row, col })
    }

    /// Step by a signed delta, returning `None` when the result leaves the board
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Position> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Every square, row-major from a8
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = BOARD_SIZE - self.row;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Position {
    type Err = ParseSquareError;

    /// Accepts algebraic (`e2`) or raw `row,col` (`6,4`) notation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSquareError(s.to_string());
        let trimmed = s.trim();

        if let Some((row, col)) = trimmed.split_once(',') {
            let row: u8 = row.trim().parse().map_err(|_| err())?;
            let col: u8 = col.trim().parse().map_err(|_| err())?;
            return Position::new(row, col).ok_or_else(err);
        }

        let bytes = trimmed.as_bytes();
        if bytes.len() != 2 {
            return Err(err());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(err());
        }
        Position::new(BOARD_SIZE - (rank - b'0'), file - b'a').ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_algebraic_round_trip() {
        let a8 = Position::new(0, 0).unwrap();
        let h1 = Position::new(7, 7).unwrap();
        assert_eq!(a8.to_string(), "a8");
        assert_eq!(h1.to_string(), "h1");
        assert_eq!("e2".parse::<Position>().unwrap(), Position::new(6, 4).unwrap());
        assert_eq!("6,0".parse::<Position>().unwrap(), Position::new(6, 0).unwrap());
    }

    #[test]
    fn test_position_rejects_out_of_range() {
        assert!(Position::new(8, 0).is_none());
        assert!("i1".parse::<Position>().is_err());
        assert!("a9".parse::<Position>().is_err());
        assert!("8,1".parse::<Position>().is_err());
        assert!(Position::new(0, 0).unwrap().offset(-1, 0).is_none());
    }

    #[test]
    fn test_both_vocabularies_map_to_same_class() {
        assert_eq!(PieceKind::from_name("fers").unwrap(), PieceKind::Minister);
        assert_eq!(PieceKind::from_name("Queen").unwrap(), PieceKind::Minister);
        assert_eq!(PieceKind::from_name("saba").unwrap(), PieceKind::Elephant);
        assert_eq!(PieceKind::from_name("medeq").unwrap(), PieceKind::Pawn);
        assert!(PieceKind::from_name("archbishop").is_err());

        for kind in PieceKind::ALL {
            for variant in [Variant::Senterej, Variant::Standard] {
                assert_eq!(PieceKind::from_name(kind.local_name(variant)).unwrap(), kind);
            }
        }
    }

    #[test]
    fn test_player_directions() {
        assert_eq!(Player::White.forward(), -1);
        assert_eq!(Player::Black.forward(), 1);
        assert_eq!(Player::White.promotion_row(), 0);
        assert_eq!(Player::White.opponent(), Player::Black);
    }
}
