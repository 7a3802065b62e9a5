//! Positional bonus tables.
//!
//! Tables are written the way a board is printed from light's side: the first
//! row is rank 8. A light piece on `sq` reads entry `sq ^ 56`; a dark piece
//! reads entry `sq`, which mirrors the table onto dark's side of the board.

use crate::game_state::chess_types::*;

#[rustfmt::skip]
const KING_MIDDLEGAME: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

#[rustfmt::skip]
const QUEEN: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,  -5,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const BISHOP: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const KNIGHT: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const ROOK: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10,  10,  10,  10,  10,   5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const PAWN: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     10,  10,  20,  30,  30,  20,  10,  10,
      5,   5,  10,  25,  25,  10,   5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      5,  10,  10, -20, -20,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KING_ENDGAME: [i32; 64] = [
    -50, -40, -30, -20, -20, -30, -40, -50,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -50, -30, -30, -30, -30, -30, -30, -50,
];

#[inline]
const fn table_index(color: Color, square: Square) -> usize {
    match color {
        Color::Light => (square ^ 56) as usize,
        Color::Dark => square as usize,
    }
}

/// Bonus for `color`'s `kind` standing on `square`, from that side's view.
pub fn piece_square_bonus(kind: PieceKind, color: Color, square: Square, endgame: bool) -> i32 {
    let table = match kind {
        PieceKind::King if endgame => &KING_ENDGAME,
        PieceKind::King => &KING_MIDDLEGAME,
        PieceKind::Queen => &QUEEN,
        PieceKind::Bishop => &BISHOP,
        PieceKind::Knight => &KNIGHT,
        PieceKind::Rook => &ROOK,
        PieceKind::Pawn => &PAWN,
    };
    table[table_index(color, square)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_mirror_between_colours() {
        // e2 for light and e7 for dark share the same entry.
        assert_eq!(
            piece_square_bonus(PieceKind::Pawn, Color::Light, 12, false),
            piece_square_bonus(PieceKind::Pawn, Color::Dark, 52, false)
        );
        assert_eq!(piece_square_bonus(PieceKind::Pawn, Color::Light, 12, false), -20);
        assert_eq!(piece_square_bonus(PieceKind::Pawn, Color::Light, 52, false), 50);
    }

    #[test]
    fn king_table_switches_in_endgame() {
        // g1 is a safe castled square in the middlegame and a poor one late.
        assert_eq!(piece_square_bonus(PieceKind::King, Color::Light, 6, false), 30);
        assert_eq!(piece_square_bonus(PieceKind::King, Color::Light, 6, true), -30);
        assert_eq!(piece_square_bonus(PieceKind::King, Color::Light, 27, true), 40);
    }
}
