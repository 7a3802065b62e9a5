//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single recoverable error type of the crate. Parsing,
//! move application, session bookkeeping and search configuration all report
//! through it so callers can match on one enum.
//!
//! Internal invariant violations (a side without a king, `unmake_move` called
//! out of order) are not represented here: they are programming errors and
//! panic at the point of detection.

use thiserror::Error;

use crate::game_state::chess_types::Square;
use crate::game_state::game_status::GameStatus;

/// Unified error type for the chess engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A FEN string could not be turned into a valid position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A square name such as `e4` could not be parsed.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Move text (long algebraic, e.g. `e2e4`) could not be parsed.
    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    /// PGN text could not be read back into a game.
    #[error("invalid PGN: {0}")]
    InvalidPgn(String),

    /// The requested move is not in the current legal-move set.
    #[error("illegal move from square {from} to square {to}")]
    IllegalMove { from: Square, to: Square },

    /// The requested promotion piece is not a queen, rook, bishop or knight.
    #[error("invalid promotion piece")]
    InvalidPromotion,

    /// The game has already been decided; no further moves are accepted.
    #[error("game is over: {0}")]
    GameOver(GameStatus),

    /// The engine was asked to move for a side that is not on turn.
    #[error("it is not the engine's turn to move")]
    NotEnginesTurn,

    /// A background search owns the position; mutation is refused.
    #[error("a background search is in progress")]
    SearchInProgress,

    /// `finish_background_search` was called without a running search.
    #[error("no background search is in progress")]
    NoSearchInProgress,

    /// A worker thread (background search, parallel perft) panicked before
    /// producing a result.
    #[error("{0} worker thread panicked")]
    WorkerPanicked(&'static str),

    /// The requested depth is outside `1..=max`.
    #[error("search depth {depth} is outside the supported range 1..={max}")]
    InvalidSearchDepth { depth: u8, max: u8 },

    /// The side to move has no legal moves, so no best move exists.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// There is no committed ply to take back.
    #[error("no move to undo")]
    NothingToUndo,

    /// There is no retracted ply to replay.
    #[error("no move to redo")]
    NothingToRedo,
}

/// Result alias used by fallible engine operations.
pub type ChessResult<T> = Result<T, ChessError>;
