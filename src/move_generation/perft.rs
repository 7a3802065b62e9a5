use std::thread;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_legal_move, is_capture};
use crate::move_generation::move_generator::{GenerationOptions, PromotionPolicy};
use crate::moves::move_descriptions::LegalMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

/// Leaf count at `depth`. Depth 1 is counted from the move list directly.
pub fn perft(game_state: &mut GameState, depth: u8, promotion_policy: PromotionPolicy) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(
        game_state,
        GenerationOptions::with_promotion_policy(promotion_policy),
    );
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        let undo = make_move(game_state, mv);
        nodes += perft(game_state, depth - 1, promotion_policy);
        unmake_move(game_state, &undo);
    }
    nodes
}

/// Leaf count per root move, in generation order.
pub fn perft_divide(
    game_state: &mut GameState,
    depth: u8,
    promotion_policy: PromotionPolicy,
) -> Vec<(LegalMove, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = generate_legal_moves(
        game_state,
        GenerationOptions::with_promotion_policy(promotion_policy),
    );
    moves
        .into_iter()
        .map(|mv| {
            let undo = make_move(game_state, mv);
            let nodes = perft(game_state, depth - 1, promotion_policy);
            unmake_move(game_state, &undo);
            (mv, nodes)
        })
        .collect()
}

/// Leaf count with a breakdown of the move kinds reaching the leaves.
pub fn perft_counts(
    game_state: &mut GameState,
    depth: u8,
    promotion_policy: PromotionPolicy,
) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_counts_recurse(game_state, depth, promotion_policy, &mut counts);
    counts
}

fn perft_counts_recurse(
    game_state: &mut GameState,
    depth: u8,
    promotion_policy: PromotionPolicy,
    counts: &mut PerftCounts,
) {
    let options = GenerationOptions::with_promotion_policy(promotion_policy);
    for mv in generate_legal_moves(game_state, options) {
        let captures = is_capture(game_state, &mv);
        let undo = make_move(game_state, mv);

        if depth == 1 {
            counts.nodes += 1;
            if captures {
                counts.captures += 1;
            }
            if undo.is_en_passant() {
                counts.en_passant += 1;
            }
            if undo.is_castling() {
                counts.castles += 1;
            }
            if mv.promotion.is_some() {
                counts.promotions += 1;
            }
            if is_in_check(game_state, game_state.side_to_move) {
                counts.checks += 1;
                if !has_legal_move(game_state) {
                    counts.checkmates += 1;
                }
            }
        } else {
            perft_counts_recurse(game_state, depth - 1, promotion_policy, counts);
        }

        unmake_move(game_state, &undo);
    }
}

/// Perft with one worker thread per root move, each on its own clone of the
/// position.
pub fn perft_multi_threaded(
    game_state: &GameState,
    depth: u8,
    promotion_policy: PromotionPolicy,
) -> ChessResult<u64> {
    if depth <= 1 {
        let mut local = game_state.clone();
        return Ok(perft(&mut local, depth, promotion_policy));
    }

    let mut root = game_state.clone();
    let root_moves = generate_legal_moves(
        &mut root,
        GenerationOptions::with_promotion_policy(promotion_policy),
    );

    let mut handles = Vec::with_capacity(root_moves.len());
    for mv in root_moves {
        let mut local = game_state.clone();
        handles.push(thread::spawn(move || {
            make_move(&mut local, mv);
            perft(&mut local, depth - 1, promotion_policy)
        }));
    }

    let mut total = 0;
    for handle in handles {
        total += handle
            .join()
            .map_err(|_| ChessError::WorkerPanicked("perft"))?;
    }
    Ok(total)
}
