use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{classify_target, shifted, TargetSquare};
use crate::move_generation::move_generator::{GenerationMode, MoveSink, PromotionPolicy};
use crate::moves::offsets::offset_square;

/// Diagonal capture offsets for each colour.
#[inline]
pub const fn pawn_capture_offsets(color: Color) -> [i8; 2] {
    match color {
        Color::Light => [7, 9],
        Color::Dark => [-9, -7],
    }
}

/// Pawn pushes, captures, en passant and promotions.
///
/// The double push is gated by the move bitset rather than the rank. In attack
/// mode only the two diagonal targets are emitted, occupied or not.
pub fn generate_pawn_moves<S: MoveSink>(
    game_state: &GameState,
    from: Square,
    color: Color,
    promotion_policy: PromotionPolicy,
    sink: &mut S,
) {
    if S::MODE == GenerationMode::Attacks {
        for offset in pawn_capture_offsets(color) {
            if let Some(to) = offset_square(from, offset, 1) {
                sink.accept(from, to, None);
            }
        }
        return;
    }

    let forward = color.forward();
    if let Some(one_step) = offset_square(from, forward, 1) {
        if game_state.piece_at(one_step).is_empty() {
            emit_pawn_move(from, one_step, color, promotion_policy, sink);

            if !game_state.has_moved(from) {
                if let Some(two_step) = offset_square(one_step, forward, 1) {
                    if game_state.piece_at(two_step).is_empty() {
                        sink.accept(from, two_step, None);
                    }
                }
            }
        }
    }

    for offset in pawn_capture_offsets(color) {
        let Some(to) = offset_square(from, offset, 1) else {
            continue;
        };
        match classify_target(game_state, to, color) {
            TargetSquare::Enemy => emit_pawn_move(from, to, color, promotion_policy, sink),
            TargetSquare::Empty if is_en_passant_target(game_state, to, color) => {
                sink.accept(from, to, None)
            }
            _ => {}
        }
    }
}

/// `to` is the current en-passant square and an enemy pawn sits behind it.
fn is_en_passant_target(game_state: &GameState, to: Square, color: Color) -> bool {
    if game_state.en_passant_square != Some(to) {
        return false;
    }
    let victim_square = shifted(to, -color.forward());
    game_state
        .piece_at(victim_square)
        .is(color.opposite(), PieceKind::Pawn)
}

fn emit_pawn_move<S: MoveSink>(
    from: Square,
    to: Square,
    color: Color,
    promotion_policy: PromotionPolicy,
    sink: &mut S,
) {
    if rank_of(to) != color.promotion_rank() {
        sink.accept(from, to, None);
        return;
    }

    match promotion_policy {
        PromotionPolicy::AutoQueen => sink.accept(from, to, Some(PieceKind::Queen)),
        PromotionPolicy::AllPieces => {
            for kind in PieceKind::PROMOTIONS {
                sink.accept(from, to, Some(kind));
            }
        }
    }
}
