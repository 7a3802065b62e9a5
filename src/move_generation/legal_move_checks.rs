use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::move_generator::{
    generate_for_side, AttackSet, GenerationOptions, PromotionPolicy,
};

/// Every square `color` attacks or defends, recomputed from the board.
pub fn attacked_squares(game_state: &GameState, color: Color) -> AttackSet {
    let mut attacks = AttackSet::EMPTY;
    generate_for_side(
        game_state,
        color,
        GenerationOptions::default(),
        AttackSet::EMPTY,
        &mut attacks,
    );
    attacks
}

#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker: Color) -> bool {
    attacked_squares(game_state, attacker).contains(square)
}

/// Whether `color`'s king is attacked.
///
/// # Panics
///
/// Panics when `color` has no king on the board; every reachable position
/// holds exactly one king per side.
pub fn is_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_square) = game_state.find_king(color) else {
        panic!("{color} king is missing from the board");
    };
    is_square_attacked(game_state, king_square, color.opposite())
}

/// Squares attacked by `color`'s pawns only.
pub fn pawn_attack_map(game_state: &GameState, color: Color) -> AttackSet {
    let mut attacks = AttackSet::EMPTY;
    for (from, kind) in game_state.pieces_of(color) {
        if kind == PieceKind::Pawn {
            generate_pawn_moves(
                game_state,
                from,
                color,
                PromotionPolicy::AutoQueen,
                &mut attacks,
            );
        }
    }
    attacks
}
