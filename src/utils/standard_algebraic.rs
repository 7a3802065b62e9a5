//! Standard algebraic notation (SAN) for moves about to be played.
//!
//! Produces `e4`, `Nf3`, `exd5`, `Rad1`, `e8=Q`, `O-O`, `O-O-O` with a `+`
//! or `#` suffix. The notation depends on the position before the move, so
//! callers format a move first and commit it afterwards.

use crate::game_state::chess_rules::castling_flank_for_king_move;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_legal_move, is_capture};
use crate::move_generation::move_generator::GenerationOptions;
use crate::moves::move_descriptions::LegalMove;
use crate::utils::algebraic::{file_char, rank_char, square_name};

/// SAN of `mv` in the current position. `mv` is assumed legal; the
/// position is restored before returning.
pub fn move_to_san(game_state: &mut GameState, mv: LegalMove) -> String {
    let piece = game_state.piece_at(mv.from);
    let Some(kind) = piece.kind() else {
        return mv.to_string();
    };

    let mut out = String::with_capacity(8);

    if kind == PieceKind::King && castling_flank_for_king_move(mv.from, mv.to).is_some() {
        out.push_str(if file_of(mv.to) > file_of(mv.from) { "O-O" } else { "O-O-O" });
    } else {
        let capture = is_capture(game_state, &mv);

        if kind == PieceKind::Pawn {
            if capture {
                out.push(file_char(mv.from));
            }
        } else {
            out.push(kind.letter());
            out.push_str(&disambiguation(game_state, mv, kind));
        }

        if capture {
            out.push('x');
        }
        out.push_str(&square_name(mv.to));

        if let Some(promotion) = mv.promotion {
            out.push('=');
            out.push(promotion.letter());
        }
    }

    out.push_str(check_suffix(game_state, mv));
    out
}

/// File, rank or full square of the origin when another piece of the same
/// kind can reach the same target.
fn disambiguation(game_state: &mut GameState, mv: LegalMove, kind: PieceKind) -> String {
    let rivals: Vec<Square> = generate_legal_moves(game_state, GenerationOptions::default())
        .into_iter()
        .filter(|other| other.to == mv.to && other.from != mv.from)
        .filter(|other| game_state.piece_at(other.from).is_kind(kind))
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let shares_file = rivals.iter().any(|sq| file_of(*sq) == file_of(mv.from));
    let shares_rank = rivals.iter().any(|sq| rank_of(*sq) == rank_of(mv.from));

    match (shares_file, shares_rank) {
        (false, _) => file_char(mv.from).to_string(),
        (true, false) => rank_char(mv.from).to_string(),
        (true, true) => square_name(mv.from),
    }
}

fn check_suffix(game_state: &mut GameState, mv: LegalMove) -> &'static str {
    let undo = make_move(game_state, mv);
    let suffix = if is_in_check(game_state, game_state.side_to_move) {
        if has_legal_move(game_state) {
            "+"
        } else {
            "#"
        }
    } else {
        ""
    };
    unmake_move(game_state, &undo);
    suffix
}
