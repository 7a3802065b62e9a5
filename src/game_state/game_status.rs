//! Game termination classification.
//!
//! The status is always derived fresh from the position and its history;
//! nothing here caches a previous verdict.

use std::collections::HashMap;
use std::fmt;

use crate::game_state::chess_rules::REPETITION_DRAW_COUNT;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::search::board_scoring::piece_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    DrawInsufficientMaterial,
    DrawThreefoldRepetition,
    DrawFiftyMoveRule,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    #[inline]
    pub fn is_checkmate(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. })
    }

    /// Stalemate and every other drawn outcome.
    #[inline]
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawInsufficientMaterial
                | GameStatus::DrawThreefoldRepetition
                | GameStatus::DrawFiftyMoveRule
        )
    }

    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self {
            GameStatus::InProgress => "*",
            GameStatus::Checkmate {
                winner: Color::Light,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Color::Dark,
            } => "0-1",
            _ => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
            GameStatus::DrawInsufficientMaterial => f.write_str("draw by insufficient material"),
            GameStatus::DrawThreefoldRepetition => f.write_str("draw by threefold repetition"),
            GameStatus::DrawFiftyMoveRule => f.write_str("draw by fifty-move rule"),
        }
    }
}

/// Classify the current position.
///
/// Mate and stalemate take precedence over the draw rules, so a mating move
/// that also reaches the halfmove threshold still reports checkmate.
pub fn classify_game_status(game_state: &mut GameState, fifty_move_threshold: u16) -> GameStatus {
    let side = game_state.side_to_move;

    if !has_legal_move(game_state) {
        return if is_in_check(game_state, side) {
            GameStatus::Checkmate {
                winner: side.opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if has_insufficient_material(game_state) {
        return GameStatus::DrawInsufficientMaterial;
    }
    if is_threefold_repetition(game_state) {
        return GameStatus::DrawThreefoldRepetition;
    }
    if game_state.halfmove_clock >= fifty_move_threshold {
        return GameStatus::DrawFiftyMoveRule;
    }

    GameStatus::InProgress
}

/// No pawns and at most one minor piece's worth of non-king material in
/// total.
pub fn has_insufficient_material(game_state: &GameState) -> bool {
    let mut material = 0;
    for piece in game_state.board.iter() {
        match piece.kind() {
            None | Some(PieceKind::King) => {}
            Some(PieceKind::Pawn) => return false,
            Some(kind) => material += piece_value(kind),
        }
    }
    material <= piece_value(PieceKind::Bishop)
}

/// Any position key recorded at least three times.
pub fn is_threefold_repetition(game_state: &GameState) -> bool {
    let mut seen: HashMap<u64, usize> = HashMap::with_capacity(game_state.position_history.len());
    for key in &game_state.position_history {
        let count = seen.entry(*key).or_insert(0);
        *count += 1;
        if *count >= REPETITION_DRAW_COUNT {
            return true;
        }
    }
    false
}
