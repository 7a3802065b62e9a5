use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_name;

/// A generated move: origin, target, optional promotion piece and the
/// ordering score assigned by the search.
///
/// Equality and hashing ignore `score`; two moves are the same move when
/// they share squares and promotion piece.
#[derive(Debug, Clone, Copy, Eq)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub score: i32,
}

impl LegalMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            score: 0,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
            score: 0,
        }
    }

    #[inline]
    pub fn same_squares(&self, from: Square, to: Square) -> bool {
        self.from == from && self.to == to
    }
}

impl PartialEq for LegalMove {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl Hash for LegalMove {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promotion.hash(state);
    }
}

/// Long algebraic form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for LegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from), square_name(self.to))?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LegalMove;
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn equality_ignores_ordering_score() {
        let mut scored = LegalMove::new(12, 28);
        scored.score = 450;
        assert_eq!(scored, LegalMove::new(12, 28));
        assert_ne!(
            LegalMove::with_promotion(52, 60, PieceKind::Queen),
            LegalMove::with_promotion(52, 60, PieceKind::Knight)
        );
    }

    #[test]
    fn displays_long_algebraic() {
        assert_eq!(LegalMove::new(12, 28).to_string(), "e2e4");
        assert_eq!(
            LegalMove::with_promotion(52, 60, PieceKind::Queen).to_string(),
            "e7e8q"
        );
    }
}
