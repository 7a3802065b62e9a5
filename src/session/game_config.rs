use crate::game_state::chess_rules::DEFAULT_FIFTY_MOVE_THRESHOLD;
use crate::move_generation::move_generator::PromotionPolicy;
use crate::search::minimax::SearchConfig;

/// Rules and engine settings of one [`GameSession`](super::game_session::GameSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Halfmove clock value that draws the game.
    pub fifty_move_threshold: u16,
    /// After each committed ply, permanently drop a castling right whose
    /// king path is attacked.
    pub sticky_castling_revocation: bool,
    /// Promotion expansion used for `legal_moves` hints. Engine search always
    /// promotes to a queen.
    pub promotion_policy: PromotionPolicy,
    pub search: SearchConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fifty_move_threshold: DEFAULT_FIFTY_MOVE_THRESHOLD,
            sticky_castling_revocation: true,
            promotion_policy: PromotionPolicy::AutoQueen,
            search: SearchConfig::default(),
        }
    }
}

impl GameConfig {
    /// Search settings for a request at `depth`, carrying this game's draw
    /// threshold.
    pub fn search_at_depth(&self, depth: u8) -> SearchConfig {
        SearchConfig {
            depth,
            fifty_move_threshold: self.fifty_move_threshold,
            ..self.search
        }
    }
}
