//! Square conversions for algebraic coordinates (`e4` and friends).

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{file_of, rank_of, square_at, Square};

/// Parse a coordinate such as `e4` into a square index.
pub fn parse_square(text: &str) -> ChessResult<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(text.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(text.to_owned()));
    }

    Ok(square_at(file - b'a', rank - b'1'))
}

/// Coordinate name of `square`, `"-"` for anything off the board.
pub fn square_name(square: Square) -> String {
    if square > 63 {
        return "-".to_owned();
    }
    format!("{}{}", file_char(square), rank_char(square))
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + file_of(square))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + rank_of(square))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::NO_SQUARE;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(parse_square("a1").expect("a1 should parse"), 0);
        assert_eq!(parse_square("h8").expect("h8 should parse"), 63);
        assert_eq!(parse_square("e4").expect("e4 should parse"), 28);
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(63), "h8");
        assert_eq!(square_name(NO_SQUARE), "-");
    }

    #[test]
    fn rejects_malformed_coordinates() {
        for bad in ["", "e", "i4", "e9", "e44", "E4"] {
            assert_eq!(
                parse_square(bad),
                Err(ChessError::InvalidSquare(bad.to_owned()))
            );
        }
    }
}
