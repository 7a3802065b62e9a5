//! Direction offsets and precomputed edge distances for mailbox generation.
//!
//! Ray directions are ordered so rooks use `0..4`, bishops `4..8` and queens
//! the full range.

use crate::game_state::chess_types::{file_of, rank_of, Square};

/// North, south, west, east, north-west, south-east, north-east, south-west.
pub const DIRECTION_OFFSETS: [i8; 8] = [8, -8, -1, 1, 7, -7, 9, -9];

pub const ROOK_DIRECTIONS: std::ops::Range<usize> = 0..4;
pub const BISHOP_DIRECTIONS: std::ops::Range<usize> = 4..8;
pub const QUEEN_DIRECTIONS: std::ops::Range<usize> = 0..8;

pub const KNIGHT_OFFSETS: [i8; 8] = [17, 15, 10, 6, -6, -10, -15, -17];
pub const KING_OFFSETS: [i8; 8] = [8, -8, -1, 1, 7, -7, 9, -9];

/// Number of squares from each square to the board edge per direction.
pub const SQUARES_TO_EDGE: [[u8; 8]; 64] = generate_squares_to_edge();

const fn generate_squares_to_edge() -> [[u8; 8]; 64] {
    let mut table = [[0u8; 8]; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as u8;
        let rank = (sq / 8) as u8;

        let north = 7 - rank;
        let south = rank;
        let west = file;
        let east = 7 - file;

        table[sq] = [
            north,
            south,
            west,
            east,
            min(north, west),
            min(south, east),
            min(north, east),
            min(south, west),
        ];
        sq += 1;
    }

    table
}

const fn min(a: u8, b: u8) -> u8 {
    if a < b {
        a
    } else {
        b
    }
}

/// King-move distance between two squares.
#[inline]
pub fn chebyshev_distance(a: Square, b: Square) -> u8 {
    let df = file_of(a).abs_diff(file_of(b));
    let dr = rank_of(a).abs_diff(rank_of(b));
    df.max(dr)
}

/// `square + offset` when it stays on the board and lands exactly
/// `distance` king-steps away; this rejects file wrap-around.
#[inline]
pub fn offset_square(square: Square, offset: i8, distance: u8) -> Option<Square> {
    let target = square as i16 + offset as i16;
    if !(0..64).contains(&target) {
        return None;
    }
    let target = target as Square;
    (chebyshev_distance(square, target) == distance).then_some(target)
}
