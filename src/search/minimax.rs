//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Scores inside the search are relative to the side that moves at the root:
//! nodes where that side is on move maximise, the others minimise. A mate is
//! worth `MATE_SCORE - ply`, so nearer mates score higher, and every draw is
//! worth zero. There is no time limit and no iterative deepening; the whole
//! tree to `depth` plies is explored on every call.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::DEFAULT_FIFTY_MOVE_THRESHOLD;
use crate::game_state::chess_types::*;
use crate::game_state::game_status::{has_insufficient_material, is_threefold_repetition};
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{
    generate_legal_captures, generate_legal_moves, has_legal_move,
};
use crate::move_generation::move_generator::GenerationOptions;
use crate::moves::move_descriptions::LegalMove;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::move_ordering::order_moves;

/// Deepest search accepted, in plies.
pub const MAX_SEARCH_DEPTH: u8 = 6;

const INFINITY: i32 = MATE_SCORE + 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched, the root move included.
    pub depth: u8,
    /// Continue past the horizon with captures and promotions.
    pub quiescence: bool,
    pub max_quiescence_depth: u8,
    pub fifty_move_threshold: u16,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            quiescence: false,
            max_quiescence_depth: 4,
            fifty_move_threshold: DEFAULT_FIFTY_MOVE_THRESHOLD,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> ChessResult<()> {
        if self.depth == 0 || self.depth > MAX_SEARCH_DEPTH {
            return Err(ChessError::InvalidSearchDepth {
                depth: self.depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: LegalMove,
    /// Score of `best_move` from the moving side's point of view.
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
}

struct SearchContext<'a, S: BoardScorer> {
    scorer: &'a S,
    root_side: Color,
    config: SearchConfig,
    nodes: u64,
}

/// Pick one move for the side to move. The position is restored before
/// returning.
pub fn search_best_move<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    config: SearchConfig,
) -> ChessResult<SearchResult> {
    config.validate()?;
    let started = Instant::now();

    let mut moves = generate_legal_moves(game_state, GenerationOptions::default());
    if moves.is_empty() {
        return Err(ChessError::NoLegalMoves);
    }
    order_moves(game_state, &mut moves);

    let mut ctx = SearchContext {
        scorer,
        root_side: game_state.side_to_move,
        config,
        nodes: 1,
    };

    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best_move = moves[0];
    let mut best_score = -INFINITY;

    for mv in moves {
        let undo = make_move(game_state, mv);
        let score = minimax(game_state, &mut ctx, config.depth - 1, alpha, beta, 1);
        unmake_move(game_state, &undo);

        debug!(mv = %mv, score, "root move searched");
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
        alpha = alpha.max(score);
    }

    best_move.score = best_score;
    let result = SearchResult {
        best_move,
        score: best_score,
        depth: config.depth,
        nodes: ctx.nodes,
        elapsed: started.elapsed(),
    };
    info!(
        best_move = %result.best_move,
        score = result.score,
        depth = result.depth,
        nodes = result.nodes,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "search complete"
    );
    Ok(result)
}

fn minimax<S: BoardScorer>(
    game_state: &mut GameState,
    ctx: &mut SearchContext<'_, S>,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    ply: u8,
) -> i32 {
    ctx.nodes += 1;
    let maximizing = game_state.side_to_move == ctx.root_side;

    let mut moves = generate_legal_moves(game_state, GenerationOptions::default());
    if moves.is_empty() {
        return terminal_score(game_state, maximizing, ply);
    }
    if is_draw_by_rule(game_state, ctx.config.fifty_move_threshold) {
        return 0;
    }

    if depth == 0 {
        return if ctx.config.quiescence {
            quiescence(game_state, ctx, ctx.config.max_quiescence_depth, alpha, beta, ply)
        } else {
            evaluate(game_state, ctx)
        };
    }

    order_moves(game_state, &mut moves);

    if maximizing {
        let mut best = -INFINITY;
        for mv in moves {
            let undo = make_move(game_state, mv);
            let score = minimax(game_state, ctx, depth - 1, alpha, beta, ply + 1);
            unmake_move(game_state, &undo);

            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = INFINITY;
        for mv in moves {
            let undo = make_move(game_state, mv);
            let score = minimax(game_state, ctx, depth - 1, alpha, beta, ply + 1);
            unmake_move(game_state, &undo);

            best = best.min(score);
            beta = beta.min(best);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Captures and promotions only, with the static score as a stand-pat bound.
/// Mates are scored by distance from the root, as in the main search.
fn quiescence<S: BoardScorer>(
    game_state: &mut GameState,
    ctx: &mut SearchContext<'_, S>,
    depth_left: u8,
    mut alpha: i32,
    mut beta: i32,
    ply: u8,
) -> i32 {
    ctx.nodes += 1;
    let maximizing = game_state.side_to_move == ctx.root_side;
    if !has_legal_move(game_state) {
        return terminal_score(game_state, maximizing, ply);
    }

    let stand_pat = evaluate(game_state, ctx);
    if depth_left == 0 {
        return stand_pat;
    }

    if maximizing {
        if stand_pat >= beta {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);
    } else {
        if stand_pat <= alpha {
            return stand_pat;
        }
        beta = beta.min(stand_pat);
    }

    let mut captures = generate_legal_captures(game_state, GenerationOptions::default());
    order_moves(game_state, &mut captures);

    let mut best = stand_pat;
    for mv in captures {
        let undo = make_move(game_state, mv);
        let score = quiescence(game_state, ctx, depth_left - 1, alpha, beta, ply + 1);
        unmake_move(game_state, &undo);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

#[inline]
fn evaluate<S: BoardScorer>(game_state: &mut GameState, ctx: &SearchContext<'_, S>) -> i32 {
    ctx.root_side.sign() * ctx.scorer.score(game_state)
}

/// Score of a node without legal moves, from the root side's view.
fn terminal_score(game_state: &GameState, maximizing: bool, ply: u8) -> i32 {
    if !is_in_check(game_state, game_state.side_to_move) {
        return 0;
    }
    let mate = MATE_SCORE - ply as i32;
    if maximizing {
        -mate
    } else {
        mate
    }
}

fn is_draw_by_rule(game_state: &GameState, fifty_move_threshold: u16) -> bool {
    game_state.halfmove_clock >= fifty_move_threshold
        || has_insufficient_material(game_state)
        || is_threefold_repetition(game_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::{MaterialScorer, StandardScorer};

    fn config(depth: u8) -> SearchConfig {
        SearchConfig {
            depth,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn finds_mate_in_one() {
        let mut game = GameState::from_fen("7k/8/6K1/8/8/8/8/1Q6 w - - 0 1")
            .expect("fixture FEN should parse");
        let result =
            search_best_move(&mut game, &StandardScorer, config(2)).expect("search should succeed");
        let undo = make_move(&mut game, result.best_move);
        assert!(is_in_check(&game, Color::Dark));
        assert!(generate_legal_moves(&mut game, GenerationOptions::default()).is_empty());
        unmake_move(&mut game, &undo);
        assert_eq!(result.score, MATE_SCORE - 1);
    }

    #[test]
    fn back_rank_mate_is_chosen() {
        let mut game = GameState::from_fen("1k6/ppp5/8/8/8/8/6R1/6K1 w - - 0 1")
            .expect("fixture FEN should parse");
        let result =
            search_best_move(&mut game, &MaterialScorer, config(1)).expect("search should succeed");
        assert_eq!(result.best_move, LegalMove::new(14, 62));
    }

    #[test]
    fn search_is_deterministic_and_restores_position() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let mut game = GameState::from_fen(fen).expect("fixture FEN should parse");
        let before = game.clone();

        let first =
            search_best_move(&mut game, &StandardScorer, config(2)).expect("search should succeed");
        assert_eq!(game, before);
        let second =
            search_best_move(&mut game, &StandardScorer, config(2)).expect("search should succeed");

        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.nodes, second.nodes);
    }

    #[test]
    fn takes_hanging_queen() {
        let mut game = GameState::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1")
            .expect("fixture FEN should parse");
        let result =
            search_best_move(&mut game, &MaterialScorer, config(2)).expect("search should succeed");
        assert_eq!(result.best_move, LegalMove::new(28, 35));
    }

    #[test]
    fn quiescence_sees_recapture() {
        // Rxd5 wins a pawn but the c6 pawn recaptures the rook.
        let mut game = GameState::from_fen("4k3/8/2p5/3p4/8/8/8/3RK3 w - - 0 1")
            .expect("fixture FEN should parse");
        let result = search_best_move(
            &mut game,
            &MaterialScorer,
            SearchConfig {
                depth: 1,
                quiescence: true,
                ..SearchConfig::default()
            },
        )
        .expect("search should succeed");
        assert_ne!(result.best_move, LegalMove::new(3, 35));
    }

    #[test]
    fn quiescence_scores_mates_by_distance() {
        let config = SearchConfig {
            depth: 1,
            quiescence: true,
            ..SearchConfig::default()
        };
        let mut ctx = SearchContext {
            scorer: &StandardScorer,
            root_side: Color::Light,
            config,
            nodes: 0,
        };

        let mut mated = GameState::from_fen("1k4R1/ppp5/8/8/8/8/8/6K1 b - - 1 1")
            .expect("fixture FEN should parse");
        let score = quiescence(&mut mated, &mut ctx, 4, -INFINITY, INFINITY, 3);
        assert_eq!(score, MATE_SCORE - 3);
        assert!(score < MATE_SCORE - 1, "a deeper mate should rank below a mate in one");

        let mut stalemated = GameState::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1")
            .expect("fixture FEN should parse");
        assert_eq!(quiescence(&mut stalemated, &mut ctx, 4, -INFINITY, INFINITY, 3), 0);
    }

    #[test]
    fn rejects_out_of_range_depth() {
        let mut game = GameState::new_game();
        assert_eq!(
            search_best_move(&mut game, &MaterialScorer, config(0)),
            Err(ChessError::InvalidSearchDepth {
                depth: 0,
                max: MAX_SEARCH_DEPTH
            })
        );
        assert!(search_best_move(&mut game, &MaterialScorer, config(MAX_SEARCH_DEPTH + 1)).is_err());
    }

    #[test]
    fn no_moves_is_an_error() {
        let mut game = GameState::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1")
            .expect("fixture FEN should parse");
        assert_eq!(
            search_best_move(&mut game, &MaterialScorer, config(1)),
            Err(ChessError::NoLegalMoves)
        );
    }
}
