use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::LegalMove;

/// Single undo record for `make_move` / `unmake_move`.
///
/// Holds every side effect of one tentative move so the board can be put back
/// exactly. Records are consumed in strict LIFO order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: LegalMove,
    pub moved_piece: Piece,
    /// Piece that stood on the destination square (empty for quiet moves and
    /// en passant).
    pub captured_piece: Piece,

    /// Square and piece removed by an en-passant capture.
    pub en_passant_capture: Option<(Square, Piece)>,
    /// Rook relocation `(from, to)` performed by castling.
    pub castling_rook: Option<(Square, Square)>,

    pub prev_move_bits: u64,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    /// Position-history length before the move was made.
    pub prev_history_len: usize,
}

impl UndoState {
    /// Piece removed from the board by this move, if any.
    #[inline]
    pub fn taken_piece(&self) -> Option<Piece> {
        match self.en_passant_capture {
            Some((_, piece)) => Some(piece),
            None if !self.captured_piece.is_empty() => Some(self.captured_piece),
            None => None,
        }
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.castling_rook.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.en_passant_capture.is_some()
    }
}
