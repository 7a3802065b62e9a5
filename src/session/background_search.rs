//! Search on a worker thread.
//!
//! The worker owns a clone of the session position, so the session's board
//! is never touched while it runs. The session refuses mutation until the
//! worker has been joined.

use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::StandardScorer;
use crate::search::minimax::{search_best_move, SearchConfig, SearchResult};

#[derive(Debug)]
pub struct BackgroundSearch {
    handle: JoinHandle<ChessResult<SearchResult>>,
    /// Key of the position the worker is searching.
    position_key: u64,
}

impl BackgroundSearch {
    /// Validates `config` before any thread is started.
    pub fn spawn(game_state: &GameState, config: SearchConfig) -> ChessResult<Self> {
        config.validate()?;

        let mut local = game_state.clone();
        let position_key = local.zobrist_key();
        debug!(depth = config.depth, position_key, "starting background search");

        let handle = thread::spawn(move || search_best_move(&mut local, &StandardScorer, config));
        Ok(Self {
            handle,
            position_key,
        })
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    #[inline]
    pub fn position_key(&self) -> u64 {
        self.position_key
    }

    /// Block until the worker returns.
    pub fn join(self) -> ChessResult<SearchResult> {
        self.handle
            .join()
            .map_err(|_| ChessError::WorkerPanicked("background search"))?
    }
}
