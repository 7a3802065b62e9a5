//! Random-move engine.
//!
//! Picks uniformly from the legal moves, except that an available en-passant
//! capture is always played. Used for self-play diagnostics and as the
//! weakest opponent.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_generator::GenerationOptions;
use crate::moves::move_descriptions::LegalMove;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    /// Engine seeded from the thread RNG.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Engine with a reproducible move sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The en-passant capture among `moves`, if one is available.
pub fn forced_en_passant(game_state: &GameState, moves: &[LegalMove]) -> Option<LegalMove> {
    let target = game_state.en_passant_square?;
    moves.iter().copied().find(|mv| {
        mv.to == target
            && game_state.piece_at(mv.from).is_kind(PieceKind::Pawn)
            && file_of(mv.from) != file_of(mv.to)
    })
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "NeuralChess Random"
    }

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput> {
        let mut local = game_state.clone();
        let legal_moves = generate_legal_moves(&mut local, GenerationOptions::default());

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("random_engine legal_moves {}", legal_moves.len()));

        out.best_move = match forced_en_passant(&local, &legal_moves) {
            Some(mv) => {
                out.info_lines.push("random_engine forced en passant".to_owned());
                Some(mv)
            }
            None => legal_moves.as_slice().choose(&mut self.rng).copied(),
        };
        Ok(out)
    }
}
