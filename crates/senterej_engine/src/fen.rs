//! FEN-style single-line game state codec
//!
//! ```text
//! <8 slash-separated ranks> <activeColor> <phase> <moveCount>
//! defsesnd/mmmmmmmm/8/8/8/8/MMMMMMMM/DEFSESND w werera 0
//! ```
//!
//! Ranks are listed from row 0 (Black's back rank) to row 7. Runs of empty
//! squares collapse to a digit 1–8; uppercase letters are White.
//!
//! # Notations
//!
//! Two piece alphabets are understood:
//!
//! | Class    | Shared | Senterej      |
//! |----------|--------|---------------|
//! | King     | `K`    | `N` (negus)   |
//! | Minister | `Q`    | `F` (fers)    |
//! | Elephant | `B`    | `S` (saba)    |
//! | Knight   | `N`    | `E` (ferese)  |
//! | Rook     | `R`    | `D` (der)     |
//! | Pawn     | `P`    | `M` (medeq)   |
//!
//! The shared alphabet is cross-variant (a fers and a queen both emit `Q`) and
//! is what exports use by default. Decoding detects the alphabet from the
//! letters present. A placement whose only letters are `N`/`n` is read as
//! Senterej kings, since the shared reading would leave both sides without a
//! king. Mixing letters exclusive to each alphabet is rejected.
//!
//! `phase` defaults to `normal` and `moveCount` to `0` when omitted. The
//! format carries no `has_moved` flags and no move history.

use crate::board::Board;
use crate::phase::Phase;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Letters that only appear in the shared alphabet
const SHARED_ONLY: &str = "kqbrp";
/// Letters that only appear in the Senterej alphabet
const SENTEREJ_ONLY: &str = "defsm";

/// Errors produced while decoding FEN text, each naming the violated rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN string is empty")]
    Empty,

    #[error("expected at most 4 fields (ranks, color, phase, move count), found {found}")]
    TooManyFields { found: usize },

    #[error("missing active color field (expected 'w' or 'b')")]
    MissingActiveColor,

    #[error("expected 8 ranks separated by '/', found {found}")]
    RankCount { found: usize },

    #[error("rank {rank} describes {squares} squares, expected exactly 8")]
    RankWidth { rank: usize, squares: usize },

    #[error("rank {rank}: empty-square run '{digit}' must be between 1 and 8")]
    InvalidRunLength { rank: usize, digit: char },

    #[error("rank {rank}: unknown piece letter '{letter}'")]
    UnknownPiece { rank: usize, letter: char },

    #[error("piece letters mix the shared alphabet ('{shared}') with the Senterej alphabet ('{senterej}')")]
    MixedNotation { shared: char, senterej: char },

    #[error("{player} has more than one king")]
    DuplicateKing { player: Player },

    #[error("invalid active color '{0}' (expected 'w' or 'b')")]
    InvalidActiveColor(String),

    #[error("invalid phase '{0}' (expected 'werera' or 'normal')")]
    InvalidPhase(String),

    #[error("invalid move count '{0}' (expected a non-negative integer)")]
    InvalidMoveCount(String),
}

/// Piece alphabet used for the placement field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// `K Q B N R P`, identical for both variants
    #[default]
    Shared,
    /// `N F S E D M`, native Senterej names
    Senterej,
}

impl Notation {
    /// Uppercase letter for `kind`
    pub fn letter(self, kind: PieceKind) -> char {
        match (self, kind) {
            (Notation::Shared, PieceKind::King) => 'K',
            (Notation::Shared, PieceKind::Minister) => 'Q',
            (Notation::Shared, PieceKind::Elephant) => 'B',
            (Notation::Shared, PieceKind::Knight) => 'N',
            (Notation::Shared, PieceKind::Rook) => 'R',
            (Notation::Shared, PieceKind::Pawn) => 'P',
            (Notation::Senterej, PieceKind::King) => 'N',
            (Notation::Senterej, PieceKind::Minister) => 'F',
            (Notation::Senterej, PieceKind::Elephant) => 'S',
            (Notation::Senterej, PieceKind::Knight) => 'E',
            (Notation::Senterej, PieceKind::Rook) => 'D',
            (Notation::Senterej, PieceKind::Pawn) => 'M',
        }
    }

    /// Piece class for a letter of this alphabet, case-insensitive
    pub fn kind(self, letter: char) -> Option<PieceKind> {
        let upper = letter.to_ascii_uppercase();
        PieceKind::ALL
            .into_iter()
            .find(|&kind| self.letter(kind) == upper)
    }

    /// Letter as it appears on the board for `piece`
    pub fn piece_char(self, piece: Piece) -> char {
        let letter = self.letter(piece.kind);
        match piece.owner {
            Player::White => letter,
            Player::Black => letter.to_ascii_lowercase(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Notation::Shared => "shared",
            Notation::Senterej => "senterej",
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Notation {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shared" => Ok(Notation::Shared),
            "senterej" | "native" => Ok(Notation::Senterej),
            _ => Err(ParseNameError {
                what: "notation",
                value: s.to_string(),
            }),
        }
    }
}

/// Decoded FEN line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenPosition {
    pub board: Board,
    pub active: Player,
    /// Always `Werera` or `Normal`
    pub phase: Phase,
    pub move_count: u32,
    /// Alphabet the placement field was written in
    pub notation: Notation,
}

impl FenPosition {
    /// Parse one FEN line
    pub fn parse(text: &str) -> Result<Self, FenError> {
        decode(text)
    }

    /// Variant implied by the text: Senterej letters or a Werera phase
    /// mean Senterej, anything else standard chess
    pub fn variant(&self) -> Variant {
        if self.notation == Notation::Senterej || self.phase == Phase::Werera {
            Variant::Senterej
        } else {
            Variant::Standard
        }
    }

    /// Re-encode in the alphabet the position was parsed from
    pub fn to_fen(&self) -> String {
        encode(
            &self.board,
            self.active,
            self.phase,
            self.move_count,
            self.notation,
        )
    }
}

impl FromStr for FenPosition {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl fmt::Display for FenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

/// Encode only the placement field
pub fn encode_board(board: &Board, notation: Notation) -> String {
    let mut out = String::with_capacity(72);

    for row in 0..BOARD_SIZE {
        if row > 0 {
            out.push('/');
        }
        let mut empty = 0u8;
        for square in board.rank(row) {
            match square {
                Some(piece) => {
                    if empty > 0 {
                        out.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    out.push(notation.piece_char(*piece));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push((b'0' + empty) as char);
        }
    }

    out
}

/// Encode a full FEN line
///
/// A completed game encodes its phase as `normal`.
pub fn encode(
    board: &Board,
    active: Player,
    phase: Phase,
    move_count: u32,
    notation: Notation,
) -> String {
    let color = match active {
        Player::White => 'w',
        Player::Black => 'b',
    };
    let phase = match phase {
        Phase::Werera => "werera",
        Phase::Normal | Phase::Complete(_) => "normal",
    };
    format!(
        "{} {} {} {}",
        encode_board(board, notation),
        color,
        phase,
        move_count
    )
}

/// Decode a full FEN line
pub fn decode(text: &str) -> Result<FenPosition, FenError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.is_empty() {
        return Err(FenError::Empty);
    }
    if fields.len() > 4 {
        return Err(FenError::TooManyFields {
            found: fields.len(),
        });
    }

    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != BOARD_SIZE as usize {
        return Err(FenError::RankCount { found: ranks.len() });
    }

    let notation = detect_notation(&ranks)?;
    let board = decode_ranks(&ranks, notation)?;

    let active = match fields.get(1) {
        None => return Err(FenError::MissingActiveColor),
        Some(&"w") => Player::White,
        Some(&"b") => Player::Black,
        Some(other) => return Err(FenError::InvalidActiveColor(other.to_string())),
    };

    let phase = match fields.get(2) {
        None | Some(&"normal") => Phase::Normal,
        Some(&"werera") => Phase::Werera,
        Some(other) => return Err(FenError::InvalidPhase(other.to_string())),
    };

    let move_count = match fields.get(3) {
        None => 0,
        Some(count) if count.bytes().all(|b| b.is_ascii_digit()) => count
            .parse::<u32>()
            .map_err(|_| FenError::InvalidMoveCount(count.to_string()))?,
        Some(count) => return Err(FenError::InvalidMoveCount(count.to_string())),
    };

    Ok(FenPosition {
        board,
        active,
        phase,
        move_count,
        notation,
    })
}

/// Pick the alphabet from the letters present in the placement field
fn detect_notation(ranks: &[&str]) -> Result<Notation, FenError> {
    let mut shared = None;
    let mut senterej = None;
    let mut common = false;

    for (index, rank) in ranks.iter().enumerate() {
        for ch in rank.chars().filter(|c| !c.is_ascii_digit()) {
            let lower = ch.to_ascii_lowercase();
            if SHARED_ONLY.contains(lower) && ch.is_ascii_alphabetic() {
                shared.get_or_insert(ch);
            } else if SENTEREJ_ONLY.contains(lower) && ch.is_ascii_alphabetic() {
                senterej.get_or_insert(ch);
            } else if lower == 'n' {
                common = true;
            } else {
                return Err(FenError::UnknownPiece {
                    rank: index + 1,
                    letter: ch,
                });
            }
        }
    }

    match (shared, senterej) {
        (Some(shared), Some(senterej)) => Err(FenError::MixedNotation { shared, senterej }),
        (None, Some(_)) => Ok(Notation::Senterej),
        // Only `N`/`n`: kings in Senterej, kingless knights otherwise
        (None, None) if common => Ok(Notation::Senterej),
        _ => Ok(Notation::Shared),
    }
}

fn decode_ranks(ranks: &[&str], notation: Notation) -> Result<Board, FenError> {
    let mut board = Board::empty();
    let mut kings = [0u8; 2];

    for (row, rank) in ranks.iter().enumerate() {
        let rank_no = row + 1;
        let mut col = 0usize;

        for ch in rank.chars() {
            if let Some(run) = ch.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(FenError::InvalidRunLength {
                        rank: rank_no,
                        digit: ch,
                    });
                }
                col += run as usize;
            } else {
                let kind = notation.kind(ch).ok_or(FenError::UnknownPiece {
                    rank: rank_no,
                    letter: ch,
                })?;
                let owner = if ch.is_ascii_uppercase() {
                    Player::White
                } else {
                    Player::Black
                };
                if col < BOARD_SIZE as usize {
                    let pos = Position {
                        row: row as u8,
                        col: col as u8,
                    };
                    board.set(pos, Some(Piece::new(kind, owner)));
                }
                if kind == PieceKind::King {
                    let seen = &mut kings[owner as usize];
                    *seen += 1;
                    if *seen > 1 {
                        return Err(FenError::DuplicateKing { player: owner });
                    }
                }
                col += 1;
            }

            if col > BOARD_SIZE as usize {
                return Err(FenError::RankWidth {
                    rank: rank_no,
                    squares: col,
                });
            }
        }

        if col != BOARD_SIZE as usize {
            return Err(FenError::RankWidth {
                rank: rank_no,
                squares: col,
            });
        }
    }

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SENTEREJ_START_FEN, STANDARD_START_FEN};

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_senterej_start_decodes_and_round_trips() {
        let fen = decode(SENTEREJ_START_FEN).unwrap();

        assert_eq!(fen.notation, Notation::Senterej);
        assert_eq!(fen.phase, Phase::Werera);
        assert_eq!(fen.move_count, 0);
        assert_eq!(fen.active, Player::White);
        assert_eq!(fen.variant(), Variant::Senterej);
        for col in 0..8 {
            assert_eq!(
                fen.board.get(pos(6, col)),
                Some(Piece::new(PieceKind::Pawn, Player::White))
            );
            assert_eq!(
                fen.board.get(pos(1, col)),
                Some(Piece::new(PieceKind::Pawn, Player::Black))
            );
        }
        assert_eq!(fen.board, Board::initial(Variant::Senterej));
        assert_eq!(fen.to_fen(), SENTEREJ_START_FEN);
    }

    #[test]
    fn test_standard_start_round_trips() {
        let fen = decode(STANDARD_START_FEN).unwrap();
        assert_eq!(fen.board, Board::initial(Variant::Standard));
        assert_eq!(fen.variant(), Variant::Standard);
        assert_eq!(fen.to_fen(), STANDARD_START_FEN);
    }

    #[test]
    fn test_shared_export_of_senterej_board() {
        //! Fers and queen share the `Q` letter in the shared alphabet.
        let board = Board::initial(Variant::Senterej);
        assert_eq!(
            encode(&board, Player::White, Phase::Werera, 0, Notation::Shared),
            "rnqbnbkr/pppppppp/8/8/8/8/PPPPPPPP/RNQBNBKR w werera 0"
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let fen = decode("4k3/8/8/8/8/8/8/4K3 b").unwrap();
        assert_eq!(fen.active, Player::Black);
        assert_eq!(fen.phase, Phase::Normal);
        assert_eq!(fen.move_count, 0);
        assert_eq!(fen.to_fen(), "4k3/8/8/8/8/8/8/4K3 b normal 0");
    }

    #[test]
    fn test_rank_count_error() {
        assert_eq!(
            decode("8/8/8/8/8/8/8 w"),
            Err(FenError::RankCount { found: 7 })
        );
    }

    #[test]
    fn test_rank_width_errors() {
        assert_eq!(
            decode("4k4/8/8/8/8/8/8/4K3 w"),
            Err(FenError::RankWidth { rank: 1, squares: 9 })
        );
        assert_eq!(
            decode("4k3/8/8/8/8/8/8/4K2 w"),
            Err(FenError::RankWidth { rank: 8, squares: 7 })
        );
        assert_eq!(
            decode("4k3/0pppppppp/8/8/8/8/8/4K3 w"),
            Err(FenError::InvalidRunLength { rank: 2, digit: '0' })
        );
    }

    #[test]
    fn test_unknown_and_mixed_letters() {
        assert_eq!(
            decode("4k3/8/8/3x4/8/8/8/4K3 w"),
            Err(FenError::UnknownPiece { rank: 4, letter: 'x' })
        );
        assert_eq!(
            decode("4k3/8/8/8/8/8/M7/4K3 w"),
            Err(FenError::MixedNotation { shared: 'k', senterej: 'M' })
        );
    }

    #[test]
    fn test_bad_color_phase_and_count() {
        let placement = "4k3/8/8/8/8/8/8/4K3";
        assert_eq!(decode(placement), Err(FenError::MissingActiveColor));
        assert_eq!(
            decode(&format!("{placement} x")),
            Err(FenError::InvalidActiveColor("x".to_string()))
        );
        assert_eq!(
            decode(&format!("{placement} w opening")),
            Err(FenError::InvalidPhase("opening".to_string()))
        );
        assert_eq!(
            decode(&format!("{placement} w normal -3")),
            Err(FenError::InvalidMoveCount("-3".to_string()))
        );
        assert_eq!(
            decode(&format!("{placement} w normal +3")),
            Err(FenError::InvalidMoveCount("+3".to_string()))
        );
        assert_eq!(
            decode(&format!("{placement} w normal 3 extra")),
            Err(FenError::TooManyFields { found: 5 })
        );
        assert_eq!(decode("   "), Err(FenError::Empty));
    }

    #[test]
    fn test_duplicate_king_rejected() {
        assert_eq!(
            decode("4k2k/8/8/8/8/8/8/4K3 w"),
            Err(FenError::DuplicateKing { player: Player::Black })
        );
    }

    #[test]
    fn test_error_messages_name_the_rule() {
        let err = decode("8/8/8 w").unwrap_err();
        assert_eq!(err.to_string(), "expected 8 ranks separated by '/', found 3");
        let err = decode("4k3/8/8/8/8/8/8/4K3 g").unwrap_err();
        assert!(err.to_string().contains("active color"));
    }

    #[test]
    fn test_kings_only_board_round_trips_in_senterej_letters() {
        //! `N` is the negus in Senterej letters and the knight in shared ones;
        //! a board of bare negus pieces must come back with its kings.
        let board = Board::from_pieces(&[
            (PieceKind::King, Player::Black, pos(0, 4)),
            (PieceKind::King, Player::White, pos(7, 4)),
        ]);
        let text = encode(&board, Player::White, Phase::Normal, 5, Notation::Senterej);
        assert_eq!(text, "4n3/8/8/8/8/8/8/4N3 w normal 5");

        let back = decode(&text).unwrap();
        assert_eq!(back.notation, Notation::Senterej);
        assert_eq!(back.variant(), Variant::Senterej);
        assert_eq!(back.board, board);
        assert_eq!(back.to_fen(), text);
    }

    #[test]
    fn test_knight_with_shared_king_stays_shared() {
        let fen = decode("4k3/8/8/3n4/8/8/8/4K3 w").unwrap();
        assert_eq!(fen.notation, Notation::Shared);
        assert_eq!(fen.board.get(pos(3, 3)).map(|p| p.kind), Some(PieceKind::Knight));
    }
}
