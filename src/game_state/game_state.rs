//! Core mutable board state.
//!
//! `GameState` is the single source of truth for piece placement and game
//! flags. It is mutated only through `make_move` / `unmake_move` and is
//! exclusively owned by whoever drives it (a session, a search, a perft run).

use crate::errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::search::zobrist::compute_zobrist_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Mailbox game state with the satellite flags needed for make/unmake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Piece on every square, `a1 == 0`.
    pub board: [Piece; 64],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,

    /// Square a pawn may capture onto en passant; valid for one ply only.
    pub en_passant_square: Option<Square>,

    /// Plies since the last capture or pawn move.
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    /// Bit `sq` is set when the piece currently on `sq` has moved.
    pub move_bits: u64,

    /// Zobrist key of every position reached, the current one last.
    pub position_history: Vec<u64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [Piece::EMPTY; 64],
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            move_bits: 0,
            position_history: Vec::new(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.board[square as usize]
    }

    #[inline]
    pub fn has_moved(&self, square: Square) -> bool {
        self.move_bits & (1u64 << square) != 0
    }

    #[inline]
    pub fn set_moved(&mut self, square: Square, moved: bool) {
        if moved {
            self.move_bits |= 1u64 << square;
        } else {
            self.move_bits &= !(1u64 << square);
        }
    }

    /// Key of the current position.
    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        match self.position_history.last() {
            Some(key) => *key,
            None => compute_zobrist_key(self),
        }
    }

    /// Append the key of the current position to the history.
    #[inline]
    pub fn record_position(&mut self) {
        let key = compute_zobrist_key(self);
        self.position_history.push(key);
    }

    /// Recompute the key of the latest history entry after a flag change
    /// made outside `make_move`.
    pub fn refresh_latest_position_key(&mut self) {
        let key = compute_zobrist_key(self);
        match self.position_history.last_mut() {
            Some(last) => *last = key,
            None => self.position_history.push(key),
        }
    }

    /// Square of `color`'s king, found by linear scan.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        self.board
            .iter()
            .position(|piece| *piece == king)
            .map(|sq| sq as Square)
    }

    /// Occupied squares of `color` as `(square, kind)` pairs in index order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, PieceKind)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter(move |(_, piece)| piece.is_color(color))
            .filter_map(|(sq, piece)| piece.kind().map(|kind| (sq as Square, kind)))
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        let wanted = Piece::new(color, kind);
        self.board.iter().filter(|piece| **piece == wanted).count()
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_has_thirty_two_pieces_and_one_history_entry() {
        let game = GameState::new_game();
        let occupied = game.board.iter().filter(|p| !p.is_empty()).count();
        assert_eq!(occupied, 32);
        assert_eq!(game.position_history.len(), 1);
        assert_eq!(game.castling_rights, CASTLE_ALL);
        assert_eq!(game.move_bits, 0);
    }

    #[test]
    fn find_king_scans_board() {
        let game = GameState::new_game();
        assert_eq!(game.find_king(Color::Light), Some(4));
        assert_eq!(game.find_king(Color::Dark), Some(60));
        assert_eq!(GameState::new_empty().find_king(Color::Light), None);
    }

    #[test]
    fn move_bits_set_and_clear() {
        let mut game = GameState::new_empty();
        game.set_moved(12, true);
        assert!(game.has_moved(12));
        game.set_moved(12, false);
        assert!(!game.has_moved(12));
    }

    #[test]
    fn piece_counts_match_start_position() {
        let game = GameState::new_game();
        assert_eq!(game.count(Color::Light, PieceKind::Pawn), 8);
        assert_eq!(game.count(Color::Dark, PieceKind::Knight), 2);
        assert_eq!(game.pieces_of(Color::Dark).count(), 16);
    }
}
