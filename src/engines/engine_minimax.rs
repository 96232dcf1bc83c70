//! The bot: fixed-depth minimax over material and piece-square tables.

use log::info;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::chess_types::*;
use crate::search::board_scoring::{BoardScorer, MaterialPstScorer};
use crate::search::minimax::{minimax_search, SearchConfig};
use crate::utils::algebraic::move_to_coordinates;

pub struct MinimaxEngine<S: BoardScorer = MaterialPstScorer> {
    scorer: S,
    depth: u8,
}

impl MinimaxEngine<MaterialPstScorer> {
    /// Depth is fixed at construction and must be at least 1.
    pub fn new(depth: u8) -> ChessResult<Self> {
        Self::with_scorer(MaterialPstScorer, depth)
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    pub fn with_scorer(scorer: S, depth: u8) -> ChessResult<Self> {
        if depth == 0 {
            return Err(ChessError::InvalidConfig(
                "bot depth must be at least 1".to_owned(),
            ));
        }
        Ok(Self { scorer, depth })
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn choose_move(&mut self, game_state: &GameState, side: Color) -> ChessResult<EngineOutput> {
        let config = SearchConfig {
            depth: self.depth,
            pruning: true,
        };
        let result = minimax_search(game_state, side, &self.scorer, config)?;

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: Some(result.best_score),
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "minimax depth {} nodes {} cutoffs {} score {}",
            self.depth, result.nodes, result.cutoffs, result.best_score
        ));

        match result.best_move {
            Some(mv) => {
                let (from, to) = move_to_coordinates(mv)?;
                info!("{} bot plays {from}{to} (score {})", side.name(), result.best_score);
            }
            None => info!("{} bot has no legal move", side.name()),
        }
        Ok(out)
    }
}
