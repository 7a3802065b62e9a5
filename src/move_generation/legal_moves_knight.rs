use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::emit_step_target;
use crate::move_generation::move_generator::MoveSink;
use crate::moves::offsets::{offset_square, KNIGHT_OFFSETS};

/// Knight jumps land exactly two king-steps away; that filter removes the
/// offsets that would wrap around a board edge.
pub fn generate_knight_moves<S: MoveSink>(
    game_state: &GameState,
    from: Square,
    color: Color,
    sink: &mut S,
) {
    for offset in KNIGHT_OFFSETS {
        if let Some(to) = offset_square(from, offset, 2) {
            emit_step_target(game_state, from, to, color, sink);
        }
    }
}
