use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::resolve_legal_move;
use crate::moves::move_descriptions::LegalMove;
use crate::utils::algebraic::parse_square;

/// Split move text such as `e2e4` or `e7e8q` into its squares and the
/// optional promotion piece. Nothing is checked against a position.
pub fn parse_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidMoveText(text.to_owned()));
    }

    let from = parse_square(&text[0..2]).map_err(|_| ChessError::InvalidMoveText(text.to_owned()))?;
    let to = parse_square(&text[2..4]).map_err(|_| ChessError::InvalidMoveText(text.to_owned()))?;

    let promotion = match text.as_bytes().get(4) {
        Some(&byte) => Some(char_to_promotion(char::from(byte))?),
        None => None,
    };

    Ok((from, to, promotion))
}

/// Resolve move text to a legal move of the side to move.
///
/// A pawn reaching its last rank without a promotion letter promotes to a
/// queen.
pub fn long_algebraic_to_legal_move(text: &str, game_state: &mut GameState) -> ChessResult<LegalMove> {
    let (from, to, promotion) = parse_long_algebraic(text)?;
    resolve_legal_move(game_state, from, to, promotion)
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    match ch.to_ascii_lowercase() {
        'q' => Ok(PieceKind::Queen),
        'r' => Ok(PieceKind::Rook),
        'b' => Ok(PieceKind::Bishop),
        'n' => Ok(PieceKind::Knight),
        _ => Err(ChessError::InvalidPromotion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;

    #[test]
    fn parses_plain_and_promotion_text() {
        assert_eq!(
            parse_long_algebraic("e2e4").expect("e2e4 should parse"),
            (12, 28, None)
        );
        assert_eq!(
            parse_long_algebraic("a7a8N").expect("a7a8N should parse"),
            (48, 56, Some(PieceKind::Knight))
        );
    }

    #[test]
    fn rejects_malformed_text() {
        for bad in ["", "e2", "e2e", "e2e9", "z2e4", "e2e4qq"] {
            assert!(
                matches!(parse_long_algebraic(bad), Err(ChessError::InvalidMoveText(_))),
                "{bad:?}"
            );
        }
        assert_eq!(parse_long_algebraic("e7e8k"), Err(ChessError::InvalidPromotion));
    }

    #[test]
    fn resolves_against_legal_moves() {
        let mut game = GameState::new_game();
        let mv = long_algebraic_to_legal_move("g1f3", &mut game).expect("g1f3 should be legal");
        assert_eq!(mv, LegalMove::new(6, 21));
        assert_eq!(
            long_algebraic_to_legal_move("e2e5", &mut game),
            Err(ChessError::IllegalMove { from: 12, to: 36 })
        );
    }

    #[test]
    fn promotion_defaults_to_queen_and_honours_choice() {
        let mut game = GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let auto = long_algebraic_to_legal_move("a7a8", &mut game).expect("push should be legal");
        assert_eq!(auto.promotion, Some(PieceKind::Queen));

        let under = long_algebraic_to_legal_move("a7a8r", &mut game).expect("rook promotion should be legal");
        assert_eq!(under.promotion, Some(PieceKind::Rook));
    }

    #[test]
    fn promotion_letter_on_quiet_move_is_rejected() {
        let mut game = GameState::new_game();
        assert_eq!(
            long_algebraic_to_legal_move("e2e4q", &mut game),
            Err(ChessError::InvalidPromotion)
        );
    }
}
