//! Interactive game session.
//!
//! `GameSession` owns the position, the ply history and the redo stack, and
//! is the only mutating entry point for callers driving a game. Every move
//! is checked against the legal-move set before it touches the board;
//! rejected input leaves the session unchanged.

use tracing::{debug, info, warn};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::CASTLING_FLANKS;
use crate::game_state::chess_types::*;
use crate::game_state::game_status::{classify_game_status, GameStatus};
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::{attacked_squares, is_in_check};
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, legal_moves_from, resolve_legal_move,
};
use crate::move_generation::move_generator::GenerationOptions;
use crate::moves::move_descriptions::LegalMove;
use crate::search::board_scoring::{BoardScorer, StandardScorer};
use crate::search::minimax::{search_best_move, SearchResult};
use crate::session::background_search::BackgroundSearch;
use crate::session::game_config::GameConfig;
use crate::session::ply_record::{MoveOutcome, PlyRecord};
use crate::utils::pgn::{number_movetext, write_pgn};
use crate::utils::standard_algebraic::move_to_san;

/// Outcome of joining a background search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedSearch {
    pub result: SearchResult,
    /// Present when the move was committed to the session.
    pub committed: Option<MoveOutcome>,
}

#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    initial_state: GameState,
    game_state: GameState,
    plies: Vec<PlyRecord>,
    /// Retracted moves, the next one to replay last.
    redo_stack: Vec<LegalMove>,
    background: Option<BackgroundSearch>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::with_state(GameState::new_game(), config)
    }

    pub fn from_fen(fen: &str, config: GameConfig) -> ChessResult<Self> {
        Ok(Self::with_state(GameState::from_fen(fen)?, config))
    }

    fn with_state(game_state: GameState, config: GameConfig) -> Self {
        Self {
            config,
            initial_state: game_state.clone(),
            game_state,
            plies: Vec::new(),
            redo_stack: Vec::new(),
            background: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[inline]
    pub fn history(&self) -> &[PlyRecord] {
        &self.plies
    }

    #[inline]
    pub fn is_computing(&self) -> bool {
        self.background.is_some()
    }

    /// Replace the game with the position in `fen`. On error the current
    /// game is kept as it was.
    pub fn load_fen(&mut self, fen: &str) -> ChessResult<()> {
        self.ensure_idle()?;
        let game_state = GameState::from_fen(fen).inspect_err(|err| {
            warn!(%err, "rejected position");
        })?;
        *self = Self::with_state(game_state, self.config);
        debug!(fen, "loaded position");
        Ok(())
    }

    /// Back to the standard starting position with an empty history.
    pub fn reset(&mut self) -> ChessResult<()> {
        self.ensure_idle()?;
        *self = Self::new(self.config);
        Ok(())
    }

    /// Play `from -> to` for the side to move.
    ///
    /// A promotion without an explicit `promotion` piece becomes a queen.
    /// Illegal requests fail with [`ChessError::IllegalMove`] and change
    /// nothing.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveOutcome> {
        self.ensure_idle()?;
        self.ensure_in_progress()?;

        let mv = resolve_legal_move(&mut self.game_state, from, to, promotion).inspect_err(|err| {
            warn!(%err, from, to, "rejected move");
        })?;
        self.redo_stack.clear();
        Ok(self.commit(mv))
    }

    /// Legal moves of the side to move, optionally only those leaving
    /// `square`. Empty once the game is over.
    pub fn legal_moves(&mut self, square: Option<Square>) -> Vec<LegalMove> {
        if self.status().is_over() {
            return Vec::new();
        }
        let options = GenerationOptions::with_promotion_policy(self.config.promotion_policy);
        match square {
            Some(square) => legal_moves_from(&mut self.game_state, square, options),
            None => generate_legal_moves(&mut self.game_state, options),
        }
    }

    /// Search the current position without committing anything.
    ///
    /// With `side_restriction` set, the request is refused unless that side
    /// is to move.
    pub fn best_move(&mut self, depth: u8, side_restriction: Option<Color>) -> ChessResult<SearchResult> {
        self.ensure_in_progress()?;
        if side_restriction.is_some_and(|side| side != self.game_state.side_to_move) {
            return Err(ChessError::NotEnginesTurn);
        }

        let result = search_best_move(
            &mut self.game_state,
            &StandardScorer,
            self.config.search_at_depth(depth),
        )?;
        info!(
            best_move = %result.best_move,
            score = result.score,
            nodes = result.nodes,
            "best move found"
        );
        Ok(result)
    }

    /// Search at `depth` and commit the chosen move.
    pub fn play_best_move(&mut self, depth: u8) -> ChessResult<MoveOutcome> {
        self.ensure_idle()?;
        let result = self.best_move(depth, None)?;
        self.redo_stack.clear();
        Ok(self.commit(result.best_move))
    }

    /// Take back the most recent ply. The move can be replayed with
    /// [`redo_move`](Self::redo_move) until another move is committed.
    pub fn undo_last_move(&mut self) -> ChessResult<LegalMove> {
        self.ensure_idle()?;
        let record = self.plies.pop().ok_or(ChessError::NothingToUndo)?;
        unmake_move(&mut self.game_state, &record.undo);
        self.redo_stack.push(record.legal_move);
        debug!(mv = %record.legal_move, "undid ply");
        Ok(record.legal_move)
    }

    pub fn redo_move(&mut self) -> ChessResult<MoveOutcome> {
        self.ensure_idle()?;
        let mv = self.redo_stack.pop().ok_or(ChessError::NothingToRedo)?;
        Ok(self.commit(mv))
    }

    /// Classification of the current position, computed fresh.
    pub fn status(&mut self) -> GameStatus {
        classify_game_status(&mut self.game_state, self.config.fifty_move_threshold)
    }

    /// Static evaluation of the current position, positive when white
    /// stands better.
    pub fn evaluation(&mut self) -> i32 {
        StandardScorer.score(&mut self.game_state)
    }

    #[inline]
    pub fn fen(&self) -> String {
        self.game_state.get_fen()
    }

    pub fn pgn(&mut self) -> ChessResult<String> {
        let moves: Vec<LegalMove> = self.plies.iter().map(|ply| ply.legal_move).collect();
        let result = self.status().result_token();
        write_pgn(&self.initial_state, &moves, result)
    }

    /// Numbered SAN of the plies played so far, e.g. `1. e4 e5 2. Nf3`.
    pub fn move_text(&self) -> String {
        let notations: Vec<String> = self.plies.iter().map(|ply| ply.notation.clone()).collect();
        number_movetext(
            self.initial_state.side_to_move,
            self.initial_state.fullmove_number,
            &notations,
        )
    }

    /// Start searching the current position on a worker thread. Mutating
    /// calls fail with [`ChessError::SearchInProgress`] until
    /// [`finish_background_search`](Self::finish_background_search).
    pub fn start_background_search(&mut self, depth: u8) -> ChessResult<()> {
        self.ensure_idle()?;
        self.ensure_in_progress()?;
        let search = BackgroundSearch::spawn(&self.game_state, self.config.search_at_depth(depth))?;
        self.background = Some(search);
        Ok(())
    }

    /// Whether the running worker has produced its result. `false` when no
    /// search is running.
    pub fn background_search_ready(&self) -> bool {
        self.background.as_ref().is_some_and(BackgroundSearch::is_finished)
    }

    /// Join the worker, blocking if it is still running, and commit its
    /// move when `commit` is set.
    pub fn finish_background_search(&mut self, commit: bool) -> ChessResult<FinishedSearch> {
        let search = self.background.take().ok_or(ChessError::NoSearchInProgress)?;
        debug_assert_eq!(search.position_key(), self.game_state.zobrist_key());

        let result = search.join()?;
        let committed = if commit {
            self.redo_stack.clear();
            Some(self.commit(result.best_move))
        } else {
            None
        };
        Ok(FinishedSearch { result, committed })
    }

    fn ensure_idle(&self) -> ChessResult<()> {
        if self.background.is_some() {
            return Err(ChessError::SearchInProgress);
        }
        Ok(())
    }

    fn ensure_in_progress(&mut self) -> ChessResult<()> {
        let status = self.status();
        if status.is_over() {
            return Err(ChessError::GameOver(status));
        }
        Ok(())
    }

    /// Apply a move already known to be legal and record the ply.
    fn commit(&mut self, mv: LegalMove) -> MoveOutcome {
        let notation = move_to_san(&mut self.game_state, mv);
        let undo = make_move(&mut self.game_state, mv);

        if self.config.sticky_castling_revocation {
            self.revoke_threatened_castling();
        }

        let status_after = self.status();
        let is_check = is_in_check(&self.game_state, self.game_state.side_to_move);
        let record = PlyRecord {
            legal_move: mv,
            captured: undo.taken_piece(),
            undo,
            notation,
            status_after,
        };
        debug!(
            ply = self.plies.len() + 1,
            mv = %mv,
            notation = %record.notation,
            status = %status_after,
            "committed ply"
        );

        let outcome = MoveOutcome::from_record(&record, is_check);
        self.plies.push(record);
        outcome
    }

    /// Drop every castling right whose king path or squares between king and
    /// rook the opponent attacks. The right does not come back when the
    /// attack goes away.
    fn revoke_threatened_castling(&mut self) {
        let attacks = [
            attacked_squares(&self.game_state, Color::Dark),
            attacked_squares(&self.game_state, Color::Light),
        ];

        let mut revoked: CastlingRights = 0;
        for flank in CASTLING_FLANKS.iter() {
            if self.game_state.castling_rights & flank.right == 0 {
                continue;
            }
            let enemy_attacks = attacks[flank.color.index()];
            if flank
                .king_path
                .iter()
                .chain(flank.must_be_empty.iter())
                .any(|square| enemy_attacks.contains(*square))
            {
                revoked |= flank.right;
            }
        }

        if revoked != 0 {
            self.game_state.castling_rights &= !revoked;
            self.game_state.refresh_latest_position_key();
            debug!(revoked, "castling rights revoked by attack");
        }
    }
}
