//! Canonical chess-rule constants.
//!
//! Starting position, castling geometry and draw thresholds used by the
//! generator, the session and the termination classifier.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule draws the game.
pub const DEFAULT_FIFTY_MOVE_THRESHOLD: u16 = 100;

/// Number of occurrences of one position that draws by repetition.
pub const REPETITION_DRAW_COUNT: usize = 3;

/// Geometry of one castling flank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingFlank {
    pub right: CastlingRights,
    pub color: Color,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub must_be_empty: &'static [Square],
    /// Squares the king crosses or lands on; none may be attacked.
    pub king_path: &'static [Square],
}

pub const CASTLING_FLANKS: [CastlingFlank; 4] = [
    CastlingFlank {
        right: CASTLE_LIGHT_KINGSIDE,
        color: Color::Light,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        must_be_empty: &[5, 6],
        king_path: &[5, 6],
    },
    CastlingFlank {
        right: CASTLE_LIGHT_QUEENSIDE,
        color: Color::Light,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        must_be_empty: &[1, 2, 3],
        king_path: &[3, 2],
    },
    CastlingFlank {
        right: CASTLE_DARK_KINGSIDE,
        color: Color::Dark,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        rook_to: 61,
        must_be_empty: &[61, 62],
        king_path: &[61, 62],
    },
    CastlingFlank {
        right: CASTLE_DARK_QUEENSIDE,
        color: Color::Dark,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        rook_to: 59,
        must_be_empty: &[57, 58, 59],
        king_path: &[59, 58],
    },
];

/// Castling flanks belonging to `color`.
pub fn castling_flanks(color: Color) -> impl Iterator<Item = &'static CastlingFlank> {
    CASTLING_FLANKS.iter().filter(move |flank| flank.color == color)
}

/// Flank whose king move is `from -> to`, if any.
pub fn castling_flank_for_king_move(from: Square, to: Square) -> Option<&'static CastlingFlank> {
    CASTLING_FLANKS
        .iter()
        .find(|flank| flank.king_from == from && flank.king_to == to)
}

/// Castling right lost when a piece leaves or arrives on `square`.
#[inline]
pub const fn castling_right_for_corner(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_LIGHT_QUEENSIDE,
        7 => CASTLE_LIGHT_KINGSIDE,
        56 => CASTLE_DARK_QUEENSIDE,
        63 => CASTLE_DARK_KINGSIDE,
        _ => 0,
    }
}

/// Both castling rights of `color`.
#[inline]
pub const fn castling_rights_of(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
    }
}
