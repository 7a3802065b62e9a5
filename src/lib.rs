//! Crate root module declarations for the neural_chess engine core.
//!
//! Exposes the board and game state, legal move generation, termination
//! detection, evaluation and search, the engine wrappers, the interactive
//! game session, and notation helpers under stable module paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod game_status;
    pub mod undo_state;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod offsets;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliding;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod move_ordering;
    pub mod zobrist;
}

pub mod tables {
    pub mod piece_square_tables;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod session {
    pub mod background_search;
    pub mod game_config;
    pub mod game_session;
    pub mod ply_record;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
    pub mod standard_algebraic;
}
