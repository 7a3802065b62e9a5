//! Full legal move generation pipeline.
//!
//! Runs the piece generators into a pseudo-legal list, then keeps each
//! candidate only if the mover's king is safe after a tentative
//! make/unmake.

use tracing::trace;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::{attacked_squares, is_in_check};
use crate::move_generation::move_generator::{
    generate_for_side, GenerationOptions, PromotionPolicy,
};
use crate::moves::move_descriptions::LegalMove;

/// Pseudo-legal moves of the side to move.
pub fn generate_pseudo_legal_moves(
    game_state: &GameState,
    options: GenerationOptions,
) -> Vec<LegalMove> {
    let color = game_state.side_to_move;
    let enemy_attacks = attacked_squares(game_state, color.opposite());
    let mut pseudo = Vec::<LegalMove>::with_capacity(64);
    generate_for_side(game_state, color, options, enemy_attacks, &mut pseudo);
    pseudo
}

/// Legal moves of the side to move. The position is left unchanged.
pub fn generate_legal_moves(game_state: &mut GameState, options: GenerationOptions) -> Vec<LegalMove> {
    let pseudo = generate_pseudo_legal_moves(game_state, options);
    let legal = retain_king_safe(game_state, pseudo);
    trace!(count = legal.len(), "generated legal moves");
    legal
}

/// Legal moves starting on `square`.
pub fn legal_moves_from(
    game_state: &mut GameState,
    square: Square,
    options: GenerationOptions,
) -> Vec<LegalMove> {
    let pseudo: Vec<LegalMove> = generate_pseudo_legal_moves(game_state, options)
        .into_iter()
        .filter(|mv| mv.from == square)
        .collect();
    retain_king_safe(game_state, pseudo)
}

/// Legal captures, en-passant captures and promotions: the moves quiescence
/// search keeps exploring.
pub fn generate_legal_captures(
    game_state: &mut GameState,
    options: GenerationOptions,
) -> Vec<LegalMove> {
    let pseudo: Vec<LegalMove> = generate_pseudo_legal_moves(game_state, options)
        .into_iter()
        .filter(|mv| is_noisy(game_state, mv))
        .collect();
    retain_king_safe(game_state, pseudo)
}

/// Resolve a requested `from -> to` move, with an optional promotion piece,
/// to a legal move of the side to move.
///
/// A promotion without a named piece becomes a queen. Naming a piece for a
/// move that does not promote, or a king or pawn, is `InvalidPromotion`.
pub fn resolve_legal_move(
    game_state: &mut GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<LegalMove> {
    if matches!(promotion, Some(PieceKind::King | PieceKind::Pawn)) {
        return Err(ChessError::InvalidPromotion);
    }

    let candidates: Vec<LegalMove> = legal_moves_from(
        game_state,
        from,
        GenerationOptions::with_promotion_policy(PromotionPolicy::AllPieces),
    )
    .into_iter()
    .filter(|mv| mv.to == to)
    .collect();

    let Some(first) = candidates.first() else {
        return Err(ChessError::IllegalMove { from, to });
    };

    match (first.promotion, promotion) {
        (None, None) => Ok(*first),
        (None, Some(_)) => Err(ChessError::InvalidPromotion),
        (Some(_), choice) => {
            let wanted = choice.unwrap_or(PieceKind::Queen);
            candidates
                .into_iter()
                .find(|mv| mv.promotion == Some(wanted))
                .ok_or(ChessError::InvalidPromotion)
        }
    }
}

/// Whether the side to move has at least one legal move.
pub fn has_legal_move(game_state: &mut GameState) -> bool {
    let color = game_state.side_to_move;
    for mv in generate_pseudo_legal_moves(game_state, GenerationOptions::default()) {
        let undo = make_move(game_state, mv);
        let safe = !is_in_check(game_state, color);
        unmake_move(game_state, &undo);
        if safe {
            return true;
        }
    }
    false
}

/// Whether `mv` captures or promotes in the current position.
#[inline]
pub fn is_noisy(game_state: &GameState, mv: &LegalMove) -> bool {
    mv.promotion.is_some() || is_capture(game_state, mv)
}

/// Whether `mv` removes an enemy piece, en passant included.
#[inline]
pub fn is_capture(game_state: &GameState, mv: &LegalMove) -> bool {
    if !game_state.piece_at(mv.to).is_empty() {
        return true;
    }
    game_state.piece_at(mv.from).is_kind(PieceKind::Pawn)
        && game_state.en_passant_square == Some(mv.to)
        && file_of(mv.from) != file_of(mv.to)
}

fn retain_king_safe(game_state: &mut GameState, pseudo: Vec<LegalMove>) -> Vec<LegalMove> {
    let color = game_state.side_to_move;
    let mut legal = Vec::<LegalMove>::with_capacity(pseudo.len());
    for mv in pseudo {
        let undo = make_move(game_state, mv);
        if !is_in_check(game_state, color) {
            legal.push(mv);
        }
        unmake_move(game_state, &undo);
    }
    legal
}
