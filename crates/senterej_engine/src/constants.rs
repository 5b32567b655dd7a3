//! Engine constants: starting layouts, FEN strings and protocol defaults

use crate::types::PieceKind;

/// Senterej back rank, a-file to h-file, identical for both sides
pub const SENTEREJ_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Minister,
    PieceKind::Elephant,
    PieceKind::Knight,
    PieceKind::Elephant,
    PieceKind::King,
    PieceKind::Rook,
];

/// Standard back rank, a-file to h-file
pub const STANDARD_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Elephant,
    PieceKind::Minister,
    PieceKind::King,
    PieceKind::Elephant,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Senterej starting position in native notation
pub const SENTEREJ_START_FEN: &str = "defsesnd/mmmmmmmm/8/8/8/8/MMMMMMMM/DEFSESND w werera 0";

/// Standard starting position in shared notation
pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w normal 0";

/// Window inside which a peer drops its own repeated `(from, to)` submission
pub const DEFAULT_DEDUP_WINDOW_MS: u64 = 500;

/// Knight jump offsets `(d_row, d_col)`
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Orthogonal ray directions
pub const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal ray directions
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
