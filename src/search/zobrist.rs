//! Zobrist hashing for position identity and repetition tracking.
//!
//! The tables are filled once per process from a fixed-seed `StdRng`, so
//! keys agree across every `GameState` in one run. Besides the pieces the key
//! folds in the side to move, the castling rights and the en-passant file, so
//! positions that differ only in those flags never count as repetitions.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x5EED_C4E5_5000_0001;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[u64; 64]; 12],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[0u64; 64]; 12];
    for piece in &mut piece_square {
        for key in piece.iter_mut() {
            *key = rng.random::<u64>();
        }
    }

    let side_to_move = rng.random::<u64>();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random::<u64>();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random::<u64>();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Key of one `(piece, square)` occupancy term. Empty squares contribute 0.
#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    match piece.code() {
        0 => 0,
        code => tables().piece_square[code as usize - 1][square as usize],
    }
}

#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & 0x0F) as usize]
}

#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[file as usize]
}

/// Xor'd in when dark is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Full key of the position, recomputed from every square.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for (square, piece) in game_state.board.iter().enumerate() {
        key ^= piece_square_key(*piece, square as Square);
    }

    if game_state.side_to_move == Color::Dark {
        key ^= side_to_move_key();
    }

    key ^= castling_key(game_state.castling_rights);

    if let Some(ep_square) = game_state.en_passant_square {
        key ^= en_passant_file_key(file_of(ep_square));
    }

    key
}

#[cfg(test)]
mod tests {
    use super::compute_zobrist_key;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::{make_move, unmake_move};
    use crate::moves::move_descriptions::LegalMove;

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = GameState::new_game();
        let b = GameState::new_game();
        assert_eq!(a.zobrist_key(), b.zobrist_key());
        assert_eq!(a.zobrist_key(), compute_zobrist_key(&a));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(w.zobrist_key(), b.zobrist_key());
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.zobrist_key(), without_rights.zobrist_key());
    }

    #[test]
    fn en_passant_file_changes_hash() {
        let no_ep =
            GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let ep = GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_ne!(no_ep.zobrist_key(), ep.zobrist_key());
    }

    #[test]
    fn history_tracks_make_and_unmake() {
        let mut game = GameState::new_game();
        let start_key = game.zobrist_key();

        let undo = make_move(&mut game, LegalMove::new(12, 28));
        assert_eq!(game.position_history.len(), 2);
        assert_eq!(game.zobrist_key(), compute_zobrist_key(&game));
        assert_ne!(game.zobrist_key(), start_key);

        unmake_move(&mut game, &undo);
        assert_eq!(game.position_history.len(), 1);
        assert_eq!(game.zobrist_key(), start_key);
    }
}
