//! Engine abstraction layer.
//!
//! Sessions, the self-play loop and the CLI pick a move through this trait so
//! the search-backed and random players are interchangeable.

use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::LegalMove;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the side to move has no legal move.
    pub best_move: Option<LegalMove>,
    /// Score from the moving side's view, when the engine computes one.
    pub score: Option<i32>,
    pub nodes: u64,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Choose a move for the side to move. `game_state` is not modified.
    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput>;
}
