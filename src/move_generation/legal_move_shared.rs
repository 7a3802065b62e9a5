use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::{GenerationMode, MoveSink};

/// Outcome of looking at a target square from a moving piece's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSquare {
    Empty,
    Friendly,
    Enemy,
}

#[inline]
pub fn classify_target(game_state: &GameState, square: Square, mover: Color) -> TargetSquare {
    match game_state.piece_at(square).color() {
        None => TargetSquare::Empty,
        Some(color) if color == mover => TargetSquare::Friendly,
        Some(_) => TargetSquare::Enemy,
    }
}

/// Emit a step target for knights and kings: every target in attack mode,
/// anything but a friendly piece in move mode.
#[inline]
pub fn emit_step_target<S: MoveSink>(
    game_state: &GameState,
    from: Square,
    to: Square,
    mover: Color,
    sink: &mut S,
) {
    match S::MODE {
        GenerationMode::Attacks => sink.accept(from, to, None),
        GenerationMode::Moves => {
            if classify_target(game_state, to, mover) != TargetSquare::Friendly {
                sink.accept(from, to, None);
            }
        }
    }
}

/// Square reached by moving `square` by `offset` along a known-safe path.
#[inline]
pub fn shifted(square: Square, offset: i8) -> Square {
    (square as i16 + offset as i16) as Square
}
