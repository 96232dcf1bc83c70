//! Engine abstraction used by the game session.
//!
//! The session hands the authoritative game to an engine and feeds the
//! returned move back through `GameState::apply_move`; engines never mutate
//! the game themselves.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    pub best_move: Option<ChessMove>,
    /// Search score from the engine's side, when the engine computes one.
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Choose a move for `side`. `best_move` is `None` when `side` has no
    /// legal move.
    fn choose_move(&mut self, game_state: &GameState, side: Color) -> ChessResult<EngineOutput>;
}
