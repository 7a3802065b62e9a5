//! Shared generation plumbing.
//!
//! Every piece generator is written once and feeds a [`MoveSink`]. A
//! `Vec<LegalMove>` collects pseudo-legal moves; an [`AttackSet`] records the
//! squares a side controls. The sink's [`GenerationMode`] tells the piece
//! generators which rules apply.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliding::generate_sliding_moves;
use crate::moves::move_descriptions::LegalMove;
use crate::moves::offsets::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Pseudo-legal moves: pushes, captures, en passant, castling.
    Moves,
    /// Controlled squares: diagonal pawn targets, defended pieces, rays
    /// continuing through the enemy king. No pushes, no castling.
    Attacks,
}

/// How a pawn reaching its last rank is expanded into moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionPolicy {
    /// One move per promotion, always to a queen.
    #[default]
    AutoQueen,
    /// One move per promotion piece (queen, rook, bishop, knight).
    AllPieces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationOptions {
    pub promotion_policy: PromotionPolicy,
}

impl GenerationOptions {
    pub const fn with_promotion_policy(promotion_policy: PromotionPolicy) -> Self {
        Self { promotion_policy }
    }
}

/// Consumer of generated targets.
pub trait MoveSink {
    const MODE: GenerationMode;

    fn accept(&mut self, from: Square, to: Square, promotion: Option<PieceKind>);
}

impl MoveSink for Vec<LegalMove> {
    const MODE: GenerationMode = GenerationMode::Moves;

    #[inline]
    fn accept(&mut self, from: Square, to: Square, promotion: Option<PieceKind>) {
        self.push(LegalMove {
            from,
            to,
            promotion,
            score: 0,
        });
    }
}

/// Set of squares as a 64-bit mask, bit `sq` for square `sq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct AttackSet(pub u64);

impl AttackSet {
    pub const EMPTY: AttackSet = AttackSet(0);

    #[inline]
    pub fn contains(self, square: Square) -> bool {
        self.0 & (1u64 << square) != 0
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square;
    }

    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl MoveSink for AttackSet {
    const MODE: GenerationMode = GenerationMode::Attacks;

    #[inline]
    fn accept(&mut self, _from: Square, to: Square, _promotion: Option<PieceKind>) {
        self.insert(to);
    }
}

/// Run every piece generator of `color` into `sink`.
///
/// `enemy_attacks` is only consulted in [`GenerationMode::Moves`], where the
/// king may not step onto or castle across an attacked square.
pub fn generate_for_side<S: MoveSink>(
    game_state: &GameState,
    color: Color,
    options: GenerationOptions,
    enemy_attacks: AttackSet,
    sink: &mut S,
) {
    for (from, kind) in game_state.pieces_of(color) {
        match kind {
            PieceKind::Pawn => {
                generate_pawn_moves(game_state, from, color, options.promotion_policy, sink)
            }
            PieceKind::Knight => generate_knight_moves(game_state, from, color, sink),
            PieceKind::Bishop => {
                generate_sliding_moves(game_state, from, color, BISHOP_DIRECTIONS, sink)
            }
            PieceKind::Rook => {
                generate_sliding_moves(game_state, from, color, ROOK_DIRECTIONS, sink)
            }
            PieceKind::Queen => {
                generate_sliding_moves(game_state, from, color, QUEEN_DIRECTIONS, sink)
            }
            PieceKind::King => generate_king_moves(game_state, from, color, enemy_attacks, sink),
        }
    }
}
