//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Scores are White-relative: positive favours light. Search converts them to
//! the acting side's view. Scorers take the state mutably because mobility is
//! measured with the legal-move generator, but every scorer leaves the
//! position exactly as it found it.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{attacked_squares, is_in_check};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_generator::GenerationOptions;
use crate::tables::piece_square_tables::piece_square_bonus;

/// Magnitude of a mate score before the ply adjustment.
pub const MATE_SCORE: i32 = 30000;

pub const MOBILITY_WEIGHT: i32 = 10;
pub const SPATIAL_WEIGHT: i32 = 10;
pub const DOUBLED_PAWN_PENALTY: i32 = 50;
pub const BLOCKED_PAWN_PENALTY: i32 = 50;

/// Non-pawn, non-king material at or below which the endgame king table
/// applies.
const ENDGAME_MATERIAL_THRESHOLD: i32 = 1800;

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 320,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}

pub trait BoardScorer: Send + Sync {
    /// White-relative score of the position.
    fn score(&self, game_state: &mut GameState) -> i32;
}

/// Material only, kings excluded.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &mut GameState) -> i32 {
        material_white_minus_black(game_state)
    }
}

/// Material, piece-square tables, mobility, spatial control and pawn
/// structure. A side with no legal moves short-circuits to a mate sentinel or
/// zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl StandardScorer {
    pub fn breakdown(&self, game_state: &mut GameState) -> ScoreBreakdown {
        ScoreBreakdown {
            material: material_white_minus_black(game_state),
            piece_squares: piece_square_white_minus_black(game_state),
            mobility: MOBILITY_WEIGHT * mobility_white_minus_black(game_state),
            spatial: SPATIAL_WEIGHT * spatial_white_minus_black(game_state),
            pawn_structure: pawn_structure_white_minus_black(game_state),
        }
    }
}

impl BoardScorer for StandardScorer {
    fn score(&self, game_state: &mut GameState) -> i32 {
        let side = game_state.side_to_move;
        if generate_legal_moves(game_state, GenerationOptions::default()).is_empty() {
            return if is_in_check(game_state, side) {
                -side.sign() * MATE_SCORE
            } else {
                0
            };
        }
        self.breakdown(game_state).total()
    }
}

/// Individual White-relative terms of [`StandardScorer`], weights applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub material: i32,
    pub piece_squares: i32,
    pub mobility: i32,
    pub spatial: i32,
    pub pawn_structure: i32,
}

impl ScoreBreakdown {
    #[inline]
    pub fn total(&self) -> i32 {
        self.material + self.piece_squares + self.mobility + self.spatial + self.pawn_structure
    }
}

pub fn material_white_minus_black(game_state: &GameState) -> i32 {
    game_state
        .board
        .iter()
        .filter_map(|piece| Some((piece.color()?, piece.kind()?)))
        .filter(|(_, kind)| *kind != PieceKind::King)
        .map(|(color, kind)| color.sign() * piece_value(kind))
        .sum()
}

/// Endgame once the queens are gone or little non-pawn material remains.
pub fn is_endgame(game_state: &GameState) -> bool {
    let mut queens = 0;
    let mut material = 0;
    for piece in game_state.board.iter() {
        match piece.kind() {
            None | Some(PieceKind::King) | Some(PieceKind::Pawn) => {}
            Some(kind) => {
                if kind == PieceKind::Queen {
                    queens += 1;
                }
                material += piece_value(kind);
            }
        }
    }
    queens == 0 || material <= ENDGAME_MATERIAL_THRESHOLD
}

pub fn piece_square_white_minus_black(game_state: &GameState) -> i32 {
    let endgame = is_endgame(game_state);
    let mut score = 0;
    for color in Color::BOTH {
        for (square, kind) in game_state.pieces_of(color) {
            score += color.sign() * piece_square_bonus(kind, color, square, endgame);
        }
    }
    score
}

/// Legal-move count difference. The side not on move is measured by
/// handing it the move with the en-passant square cleared, then restoring.
pub fn mobility_white_minus_black(game_state: &mut GameState) -> i32 {
    let options = GenerationOptions::default();
    let mover = game_state.side_to_move;
    let mover_moves = generate_legal_moves(game_state, options).len() as i32;

    let saved_en_passant = game_state.en_passant_square.take();
    game_state.side_to_move = mover.opposite();
    let other_moves = generate_legal_moves(game_state, options).len() as i32;
    game_state.side_to_move = mover;
    game_state.en_passant_square = saved_en_passant;

    mover.sign() * (mover_moves - other_moves)
}

pub fn spatial_white_minus_black(game_state: &GameState) -> i32 {
    let light = attacked_squares(game_state, Color::Light).len() as i32;
    let dark = attacked_squares(game_state, Color::Dark).len() as i32;
    light - dark
}

/// Penalties for every extra pawn on a file and for pawns whose next square
/// is occupied.
pub fn pawn_structure_white_minus_black(game_state: &GameState) -> i32 {
    let mut score = 0;
    for color in Color::BOTH {
        let mut per_file = [0i32; 8];
        let mut blocked = 0i32;

        for (square, kind) in game_state.pieces_of(color) {
            if kind != PieceKind::Pawn {
                continue;
            }
            per_file[file_of(square) as usize] += 1;

            let ahead = square as i16 + color.forward() as i16;
            if (0..64).contains(&ahead) && !game_state.piece_at(ahead as Square).is_empty() {
                blocked += 1;
            }
        }

        let doubled: i32 = per_file.iter().map(|count| (count - 1).max(0)).sum();
        let penalty = doubled * DOUBLED_PAWN_PENALTY + blocked * BLOCKED_PAWN_PENALTY;
        score -= color.sign() * penalty;
    }
    score
}
