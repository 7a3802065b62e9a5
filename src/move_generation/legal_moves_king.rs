use crate::game_state::chess_rules::{castling_flanks, CastlingFlank};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::emit_step_target;
use crate::move_generation::move_generator::{AttackSet, GenerationMode, MoveSink};
use crate::moves::offsets::{offset_square, KING_OFFSETS};

/// King steps and castling.
///
/// In move mode, squares in `enemy_attacks` are skipped so the king never
/// steps into check. Attack mode emits the eight neighbours and nothing else.
pub fn generate_king_moves<S: MoveSink>(
    game_state: &GameState,
    from: Square,
    color: Color,
    enemy_attacks: AttackSet,
    sink: &mut S,
) {
    for offset in KING_OFFSETS {
        let Some(to) = offset_square(from, offset, 1) else {
            continue;
        };
        if S::MODE == GenerationMode::Moves && enemy_attacks.contains(to) {
            continue;
        }
        emit_step_target(game_state, from, to, color, sink);
    }

    if S::MODE == GenerationMode::Attacks {
        return;
    }

    for flank in castling_flanks(color) {
        if can_castle(game_state, flank, enemy_attacks) {
            sink.accept(flank.king_from, flank.king_to, None);
        }
    }
}

/// Right held, king and rook unmoved on their home squares, the squares
/// between them empty, the king not in check and its path not attacked.
pub fn can_castle(game_state: &GameState, flank: &CastlingFlank, enemy_attacks: AttackSet) -> bool {
    if game_state.castling_rights & flank.right == 0 {
        return false;
    }
    if !game_state.piece_at(flank.king_from).is(flank.color, PieceKind::King)
        || game_state.has_moved(flank.king_from)
    {
        return false;
    }
    if !game_state.piece_at(flank.rook_from).is(flank.color, PieceKind::Rook)
        || game_state.has_moved(flank.rook_from)
    {
        return false;
    }
    if flank
        .must_be_empty
        .iter()
        .any(|sq| !game_state.piece_at(*sq).is_empty())
    {
        return false;
    }
    if enemy_attacks.contains(flank.king_from) {
        return false;
    }
    !flank.king_path.iter().any(|sq| enemy_attacks.contains(*sq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::attacked_squares;
    use crate::moves::move_descriptions::LegalMove;

    fn king_moves(fen: &str) -> Vec<LegalMove> {
        let game = GameState::from_fen(fen).expect("fixture FEN should parse");
        let color = game.side_to_move;
        let king = game.find_king(color).expect("fixture should have a king");
        let enemy = attacked_squares(&game, color.opposite());
        let mut moves: Vec<LegalMove> = Vec::new();
        generate_king_moves(&game, king, color, enemy, &mut moves);
        moves
    }

    #[test]
    fn both_flanks_offered_when_clear() {
        let moves = king_moves("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        assert!(moves.contains(&LegalMove::new(4, 6)));
        assert!(moves.contains(&LegalMove::new(4, 2)));
    }

    #[test]
    fn attacked_path_blocks_castling() {
        // Black rook on f8 covers f1 through the open f-file.
        let moves = king_moves("r3kr2/ppppp1pp/8/8/8/8/PPPPP1PP/R3K2R w KQq - 0 1");
        assert!(!moves.contains(&LegalMove::new(4, 6)));
        assert!(moves.contains(&LegalMove::new(4, 2)));
    }

    #[test]
    fn king_does_not_step_onto_attacked_square() {
        let moves = king_moves("k7/8/8/8/8/8/r7/4K3 w - - 0 1");
        assert!(!moves.iter().any(|m| (8..16).contains(&m.to)));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn b_file_attack_does_not_block_long_castle() {
        let moves = king_moves("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves.contains(&LegalMove::new(4, 2)));
    }
}
