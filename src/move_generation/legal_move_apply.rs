//! Make/unmake primitives.
//!
//! `make_move` performs no legality check. `unmake_move` must receive the
//! records in strict LIFO order.

use crate::game_state::chess_rules::{
    castling_flank_for_king_move, castling_right_for_corner, castling_rights_of,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::shifted;
use crate::moves::move_descriptions::LegalMove;

/// Apply `mv` to the board and return the record that undoes it.
///
/// A pawn reaching its last rank becomes `mv.promotion`, or a queen when no
/// piece is named.
///
/// # Panics
///
/// Panics when `mv.from` is empty.
pub fn make_move(game_state: &mut GameState, mv: LegalMove) -> UndoState {
    let from = mv.from;
    let to = mv.to;
    let moved_piece = game_state.piece_at(from);
    let Some(kind) = moved_piece.kind() else {
        panic!("make_move from empty square {from}");
    };
    let color = game_state.side_to_move;
    let captured_piece = game_state.piece_at(to);

    let mut undo = UndoState {
        mv,
        moved_piece,
        captured_piece,
        en_passant_capture: None,
        castling_rook: None,
        prev_move_bits: game_state.move_bits,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_history_len: game_state.position_history.len(),
    };

    if kind == PieceKind::Pawn
        && captured_piece.is_empty()
        && game_state.en_passant_square == Some(to)
        && file_of(from) != file_of(to)
    {
        let victim_square = shifted(to, -color.forward());
        undo.en_passant_capture = Some((victim_square, game_state.piece_at(victim_square)));
        game_state.board[victim_square as usize] = Piece::EMPTY;
        game_state.set_moved(victim_square, false);
    }

    if kind == PieceKind::King {
        if let Some(flank) = castling_flank_for_king_move(from, to) {
            let rook = game_state.piece_at(flank.rook_from);
            game_state.board[flank.rook_from as usize] = Piece::EMPTY;
            game_state.board[flank.rook_to as usize] = rook;
            game_state.set_moved(flank.rook_from, false);
            game_state.set_moved(flank.rook_to, true);
            undo.castling_rook = Some((flank.rook_from, flank.rook_to));
        }
    }

    let placed = if kind == PieceKind::Pawn && rank_of(to) == color.promotion_rank() {
        Piece::new(color, mv.promotion.unwrap_or(PieceKind::Queen))
    } else {
        moved_piece
    };
    game_state.board[from as usize] = Piece::EMPTY;
    game_state.board[to as usize] = placed;
    game_state.set_moved(from, false);
    game_state.set_moved(to, true);

    if kind == PieceKind::King {
        game_state.castling_rights &= !castling_rights_of(color);
    }
    game_state.castling_rights &= !castling_right_for_corner(from);
    game_state.castling_rights &= !castling_right_for_corner(to);

    game_state.en_passant_square = if kind == PieceKind::Pawn && from.abs_diff(to) == 16 {
        Some((from + to) / 2)
    } else {
        None
    };

    if kind == PieceKind::Pawn || undo.taken_piece().is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if color == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = color.opposite();
    game_state.record_position();

    undo
}

/// Exactly invert the `make_move` that produced `undo`.
///
/// # Panics
///
/// Panics when `undo` is not the most recent record, detected through the
/// position-history length.
pub fn unmake_move(game_state: &mut GameState, undo: &UndoState) {
    assert_eq!(
        game_state.position_history.len(),
        undo.prev_history_len + 1,
        "unmake_move called out of LIFO order"
    );
    game_state.position_history.truncate(undo.prev_history_len);

    let from = undo.mv.from;
    let to = undo.mv.to;
    game_state.board[from as usize] = undo.moved_piece;
    game_state.board[to as usize] = undo.captured_piece;

    if let Some((square, piece)) = undo.en_passant_capture {
        game_state.board[square as usize] = piece;
    }
    if let Some((rook_from, rook_to)) = undo.castling_rook {
        game_state.board[rook_from as usize] = game_state.piece_at(rook_to);
        game_state.board[rook_to as usize] = Piece::EMPTY;
    }

    game_state.side_to_move = game_state.side_to_move.opposite();
    game_state.move_bits = undo.prev_move_bits;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::move_generation::move_generator::{GenerationOptions, PromotionPolicy};

    fn round_trip_all(game: &mut GameState, depth: u8) {
        if depth == 0 {
            return;
        }
        let options = GenerationOptions::with_promotion_policy(PromotionPolicy::AllPieces);
        for mv in generate_legal_moves(game, options) {
            let before = game.clone();
            let undo = make_move(game, mv);
            round_trip_all(game, depth - 1);
            unmake_move(game, &undo);
            assert_eq!(*game, before, "unmake of {mv} should restore the position");
        }
    }

    #[test]
    fn make_unmake_round_trips_from_start() {
        let mut game = GameState::new_game();
        round_trip_all(&mut game, 3);
    }

    #[test]
    fn make_unmake_round_trips_through_special_moves() {
        let mut game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("fixture FEN should parse");
        round_trip_all(&mut game, 2);
    }

    #[test]
    fn make_unmake_round_trips_through_promotions() {
        let mut game = GameState::from_fen(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        )
        .expect("fixture FEN should parse");
        round_trip_all(&mut game, 2);
    }

    #[test]
    fn promotion_capture_unmakes_to_pawn_and_victim() {
        let mut game = GameState::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1")
            .expect("fixture FEN should parse");
        let before = game.clone();
        let undo = make_move(&mut game, LegalMove::with_promotion(48, 57, PieceKind::Knight));
        assert!(game.piece_at(57).is(Color::Light, PieceKind::Knight));
        assert!(game.piece_at(48).is_empty());

        unmake_move(&mut game, &undo);
        assert_eq!(game, before);
        assert!(game.piece_at(48).is(Color::Light, PieceKind::Pawn));
        assert!(game.piece_at(57).is(Color::Dark, PieceKind::Rook));
    }

    #[test]
    fn double_push_sets_and_next_move_clears_en_passant() {
        let mut game = GameState::new_game();
        make_move(&mut game, LegalMove::new(12, 28));
        assert_eq!(game.en_passant_square, Some(20));
        assert!(game.has_moved(28));
        assert!(!game.has_moved(12));

        make_move(&mut game, LegalMove::new(62, 45));
        assert_eq!(game.en_passant_square, None);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut game = GameState::from_fen("k7/8/8/3pP3/8/8/8/7K w - d6 0 2")
            .expect("fixture FEN should parse");
        let undo = make_move(&mut game, LegalMove::new(36, 43));
        assert!(game.piece_at(35).is_empty());
        assert!(game.piece_at(43).is(Color::Light, PieceKind::Pawn));
        assert_eq!(game.halfmove_clock, 0);
        assert!(undo.is_en_passant());

        unmake_move(&mut game, &undo);
        assert!(game.piece_at(35).is(Color::Dark, PieceKind::Pawn));
        assert!(game.piece_at(43).is_empty());
    }

    #[test]
    fn castling_relocates_rook_and_drops_rights() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("fixture FEN should parse");
        let undo = make_move(&mut game, LegalMove::new(4, 6));
        assert!(game.piece_at(5).is(Color::Light, PieceKind::Rook));
        assert!(game.piece_at(7).is_empty());
        assert_eq!(game.castling_rights, CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
        assert!(undo.is_castling());

        unmake_move(&mut game, &undo);
        assert!(game.piece_at(7).is(Color::Light, PieceKind::Rook));
        assert_eq!(game.castling_rights, CASTLE_ALL);
        assert!(!game.has_moved(7));
    }

    #[test]
    fn pawn_without_promotion_choice_becomes_queen() {
        let mut game = GameState::from_fen("k7/4P3/8/8/8/8/8/7K w - - 0 1")
            .expect("fixture FEN should parse");
        make_move(&mut game, LegalMove::new(52, 60));
        assert!(game.piece_at(60).is(Color::Light, PieceKind::Queen));
    }

    #[test]
    fn capture_on_corner_revokes_that_right() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("fixture FEN should parse");
        make_move(&mut game, LegalMove::new(0, 56));
        assert_eq!(game.castling_rights, CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE);
    }

    #[test]
    #[should_panic(expected = "LIFO")]
    fn out_of_order_unmake_panics() {
        let mut game = GameState::new_game();
        let first = make_move(&mut game, LegalMove::new(12, 28));
        make_move(&mut game, LegalMove::new(52, 36));
        unmake_move(&mut game, &first);
    }
}
