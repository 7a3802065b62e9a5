//! Heuristic move ordering for alpha-beta.
//!
//! Ordering never changes the search result, only how early cutoffs happen.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::pawn_attack_map;
use crate::moves::move_descriptions::LegalMove;
use crate::search::board_scoring::{is_endgame, piece_value};
use crate::tables::piece_square_tables::piece_square_bonus;

pub const CAPTURE_VICTIM_MULTIPLIER: i32 = 10;
pub const PAWN_ATTACK_PENALTY: i32 = 350;

/// Score every move and sort best first. The sort is stable, so equally
/// scored moves keep their generation order.
pub fn order_moves(game_state: &GameState, moves: &mut [LegalMove]) {
    let mover = game_state.side_to_move;
    let enemy_pawn_attacks = pawn_attack_map(game_state, mover.opposite());
    let endgame = is_endgame(game_state);

    for mv in moves.iter_mut() {
        mv.score = score_move(game_state, mv, mover, enemy_pawn_attacks.contains(mv.to), endgame);
    }
    moves.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Victim value times ten minus attacker value for captures, the promotion
/// piece's value for promotions, a penalty for landing on a square an enemy
/// pawn attacks, and the piece-square change of the moving piece.
pub fn score_move(
    game_state: &GameState,
    mv: &LegalMove,
    mover: Color,
    target_attacked_by_pawn: bool,
    endgame: bool,
) -> i32 {
    let Some(attacker) = game_state.piece_at(mv.from).kind() else {
        return 0;
    };
    let mut score = 0;

    let victim = match game_state.piece_at(mv.to).kind() {
        Some(kind) => Some(kind),
        None if attacker == PieceKind::Pawn
            && game_state.en_passant_square == Some(mv.to)
            && file_of(mv.from) != file_of(mv.to) =>
        {
            Some(PieceKind::Pawn)
        }
        None => None,
    };
    if let Some(victim) = victim {
        if victim != PieceKind::King {
            score += CAPTURE_VICTIM_MULTIPLIER * piece_value(victim) - piece_value(attacker);
        }
    }

    if let Some(promotion) = mv.promotion {
        score += piece_value(promotion);
    }

    if target_attacked_by_pawn {
        score -= PAWN_ATTACK_PENALTY;
    }

    let placed = mv.promotion.unwrap_or(attacker);
    score += piece_square_bonus(placed, mover, mv.to, endgame)
        - piece_square_bonus(attacker, mover, mv.from, endgame);

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::move_generation::move_generator::GenerationOptions;

    fn ordered(fen: &str) -> Vec<LegalMove> {
        let mut game = GameState::from_fen(fen).expect("fixture FEN should parse");
        let mut moves = generate_legal_moves(&mut game, GenerationOptions::default());
        order_moves(&game, &mut moves);
        moves
    }

    #[test]
    fn winning_capture_comes_first() {
        // Pawn on e4 can take the queen on d5.
        let moves = ordered("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
        assert_eq!(moves[0], LegalMove::new(28, 35));
        assert!(moves[0].score > 8_000);
        assert!(moves.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn promotion_outranks_quiet_moves() {
        let moves = ordered("k7/4P3/8/8/8/8/8/7K w - - 0 1");
        assert_eq!(moves[0], LegalMove::with_promotion(52, 60, PieceKind::Queen));
    }

    #[test]
    fn pawn_attacked_square_is_penalised() {
        let game = GameState::from_fen("4k3/8/8/3p4/8/8/8/2N1K3 w - - 0 1")
            .expect("fixture FEN should parse");
        let into_pawn = score_move(&game, &LegalMove::new(2, 19), Color::Light, true, false);
        let safe = score_move(&game, &LegalMove::new(2, 19), Color::Light, false, false);
        assert_eq!(safe - into_pawn, PAWN_ATTACK_PENALTY);
    }
}
