use crate::game_state::chess_types::*;
use crate::game_state::game_status::GameStatus;
use crate::moves::move_descriptions::LegalMove;

/// One committed ply of a session, with everything needed to take it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyRecord {
    pub legal_move: LegalMove,
    pub undo: UndoState,
    pub captured: Option<Piece>,
    /// Standard algebraic notation, e.g. `Nxe5+`.
    pub notation: String,
    pub status_after: GameStatus,
}

/// Result of a committed move, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub legal_move: LegalMove,
    pub captured: Option<Piece>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_draw: bool,
    pub status: GameStatus,
    pub notation: String,
}

impl MoveOutcome {
    pub(crate) fn from_record(record: &PlyRecord, is_check: bool) -> Self {
        Self {
            legal_move: record.legal_move,
            captured: record.captured,
            is_check,
            is_checkmate: record.status_after.is_checkmate(),
            is_draw: record.status_after.is_draw(),
            status: record.status_after,
            notation: record.notation.clone(),
        }
    }
}
