use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::{BoardScorer, StandardScorer};
use crate::search::minimax::{search_best_move, SearchConfig};

/// Fixed-depth alpha-beta engine over a pluggable scorer.
pub struct MinimaxEngine<S: BoardScorer = StandardScorer> {
    scorer: S,
    config: SearchConfig,
}

impl MinimaxEngine<StandardScorer> {
    pub fn new(config: SearchConfig) -> ChessResult<Self> {
        Self::with_scorer(StandardScorer, config)
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    /// Fails when `config.depth` is outside the supported range.
    pub fn with_scorer(scorer: S, config: SearchConfig) -> ChessResult<Self> {
        config.validate()?;
        Ok(Self { scorer, config })
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "NeuralChess Minimax"
    }

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput> {
        let mut local = game_state.clone();
        match search_best_move(&mut local, &self.scorer, self.config) {
            Ok(result) => Ok(EngineOutput {
                best_move: Some(result.best_move),
                score: Some(result.score),
                nodes: result.nodes,
                info_lines: vec![format!(
                    "depth {} score {} nodes {} time_ms {}",
                    result.depth,
                    result.score,
                    result.nodes,
                    result.elapsed.as_millis()
                )],
            }),
            Err(ChessError::NoLegalMoves) => Ok(EngineOutput::default()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::LegalMove;
    use crate::search::board_scoring::MaterialScorer;

    #[test]
    fn rejects_depth_beyond_limit() {
        let config = SearchConfig {
            depth: 9,
            ..SearchConfig::default()
        };
        assert!(matches!(
            MinimaxEngine::new(config),
            Err(ChessError::InvalidSearchDepth { depth: 9, .. })
        ));
    }

    #[test]
    fn plays_mate_in_one() {
        let game = GameState::from_fen("1k6/ppp5/8/8/8/8/6R1/6K1 w - - 0 1")
            .expect("fixture FEN should parse");
        let mut engine = MinimaxEngine::with_scorer(
            MaterialScorer,
            SearchConfig {
                depth: 2,
                ..SearchConfig::default()
            },
        )
        .expect("depth 2 should be accepted");
        let out = engine.choose_move(&game).expect("search should succeed");
        assert_eq!(out.best_move, Some(LegalMove::new(14, 62)));
        assert!(out.score.is_some());
    }

    #[test]
    fn no_move_when_checkmated() {
        let game = GameState::from_fen("1k4R1/ppp5/8/8/8/8/8/6K1 b - - 1 1")
            .expect("fixture FEN should parse");
        let mut engine = MinimaxEngine::new(SearchConfig::default()).expect("default depth is valid");
        let out = engine.choose_move(&game).expect("mated side should not error");
        assert_eq!(out.best_move, None);
    }
}
