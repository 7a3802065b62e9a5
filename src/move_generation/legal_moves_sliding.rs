use std::ops::Range;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::shifted;
use crate::move_generation::move_generator::{GenerationMode, MoveSink};
use crate::moves::offsets::{DIRECTION_OFFSETS, SQUARES_TO_EDGE};

/// Ray-cast bishops, rooks and queens over the given direction indices.
///
/// In move mode a ray stops at the first occupied square, which is kept only
/// when it holds an enemy piece. In attack mode the blocker is always kept,
/// and the ray carries on through the enemy king so the king cannot retreat
/// along the line it is attacked on.
pub fn generate_sliding_moves<S: MoveSink>(
    game_state: &GameState,
    from: Square,
    color: Color,
    directions: Range<usize>,
    sink: &mut S,
) {
    let enemy_king = Piece::new(color.opposite(), PieceKind::King);

    for dir in directions {
        let offset = DIRECTION_OFFSETS[dir];
        let mut to = from;

        for _ in 0..SQUARES_TO_EDGE[from as usize][dir] {
            to = shifted(to, offset);
            let occupant = game_state.piece_at(to);

            if occupant.is_empty() {
                sink.accept(from, to, None);
                continue;
            }

            match S::MODE {
                GenerationMode::Attacks => {
                    sink.accept(from, to, None);
                    if occupant != enemy_king {
                        break;
                    }
                }
                GenerationMode::Moves => {
                    if !occupant.is_color(color) {
                        sink.accept(from, to, None);
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::move_generator::AttackSet;
    use crate::moves::move_descriptions::LegalMove;
    use crate::moves::offsets::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};

    #[test]
    fn rook_on_open_board_reaches_fourteen_squares() {
        let game = GameState::from_fen("k7/8/8/8/3R4/8/8/7K w - - 0 1")
            .expect("fixture FEN should parse");
        let mut moves: Vec<LegalMove> = Vec::new();
        generate_sliding_moves(&game, 27, Color::Light, ROOK_DIRECTIONS, &mut moves);
        assert_eq!(moves.len(), 14);
    }

    #[test]
    fn bishop_stops_at_blockers() {
        let game = GameState::new_game();
        let mut moves: Vec<LegalMove> = Vec::new();
        generate_sliding_moves(&game, 2, Color::Light, BISHOP_DIRECTIONS, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn queen_captures_but_does_not_pass_enemy() {
        let game = GameState::from_fen("k7/8/8/3p4/8/8/8/3Q3K w - - 0 1")
            .expect("fixture FEN should parse");
        let mut moves: Vec<LegalMove> = Vec::new();
        generate_sliding_moves(&game, 3, Color::Light, QUEEN_DIRECTIONS, &mut moves);
        assert!(moves.iter().any(|m| m.to == 35));
        assert!(!moves.iter().any(|m| m.to == 43));
    }

    #[test]
    fn attack_rays_pass_through_enemy_king() {
        let game = GameState::from_fen("8/8/8/8/R2k4/8/8/7K b - - 0 1")
            .expect("fixture FEN should parse");
        let mut attacks = AttackSet::EMPTY;
        generate_sliding_moves(&game, 24, Color::Light, ROOK_DIRECTIONS, &mut attacks);
        // d4 king is attacked and e4 behind it stays covered.
        assert!(attacks.contains(27));
        assert!(attacks.contains(28));
    }
}
