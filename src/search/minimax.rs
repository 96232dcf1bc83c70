//! Fixed-depth minimax with fail-hard alpha-beta pruning.
//!
//! The search runs on a detached copy of the game and applies moves through
//! `make_move` / `unmake_move`. Every score is from the searching side's
//! point of view: that side maximises, the opponent minimises.

use log::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::promotion_row;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::all_moves_lenient;
use crate::search::board_scoring::BoardScorer;

/// Kind a searched pawn promotes to.
pub const SEARCH_PROMOTION: PieceKind = PieceKind::Queen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    /// Disable to walk the full tree; used to verify pruning.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            pruning: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub best_score: i32,
    pub nodes: u64,
    pub cutoffs: u64,
}

struct Searcher<'a, S: BoardScorer + ?Sized> {
    scorer: &'a S,
    perspective: Color,
    pruning: bool,
    nodes: u64,
    cutoffs: u64,
}

/// Pick the best move for `side`. Ties keep the first move in generation
/// order. Returns no move when `side` has none.
pub fn minimax_search<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    side: Color,
    scorer: &S,
    config: SearchConfig,
) -> ChessResult<SearchResult> {
    if config.depth == 0 {
        return Err(ChessError::InvalidConfig(
            "search depth must be at least 1".to_owned(),
        ));
    }

    let mut scratch = game_state.detached_copy();
    let mut searcher = Searcher {
        scorer,
        perspective: side,
        pruning: config.pruning,
        nodes: 0,
        cutoffs: 0,
    };

    let (best_move, best_score) = searcher.root(&mut scratch, config.depth)?;
    debug!(
        "minimax depth {} pruning {}: score {best_score}, {} nodes, {} cutoffs",
        config.depth, config.pruning, searcher.nodes, searcher.cutoffs
    );

    Ok(SearchResult {
        best_move,
        best_score,
        nodes: searcher.nodes,
        cutoffs: searcher.cutoffs,
    })
}

/// Legal moves for the search: per-piece failures count as no moves, and
/// promotions are resolved to `SEARCH_PROMOTION`.
pub fn search_moves(game_state: &GameState, color: Color) -> Vec<ChessMove> {
    let mut moves = all_moves_lenient(game_state, color);
    for mv in &mut moves {
        let is_pawn = game_state.board.piece_at(mv.from).map(|p| p.kind) == Some(PieceKind::Pawn);
        if is_pawn && mv.to / 10 == promotion_row(color) {
            mv.promotion = Some(SEARCH_PROMOTION);
        }
    }
    moves
}

impl<S: BoardScorer + ?Sized> Searcher<'_, S> {
    fn root(&mut self, game_state: &mut GameState, depth: u8) -> ChessResult<(Option<ChessMove>, i32)> {
        self.nodes += 1;
        let moves = search_moves(game_state, self.perspective);
        if moves.is_empty() {
            return Ok((None, self.evaluate(game_state)));
        }

        let mut alpha = i32::MIN;
        let beta = i32::MAX;
        let mut best_move = None;
        let mut best_score = i32::MIN;

        for mv in moves {
            let entry = make_move(game_state, mv)?;
            let score = self.minimax(game_state, depth - 1, alpha, beta, false)?;
            unmake_move(game_state, &entry)?;

            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if self.pruning {
                alpha = alpha.max(score);
            }
        }

        Ok((best_move, best_score))
    }

    fn minimax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> ChessResult<i32> {
        self.nodes += 1;
        if depth == 0 {
            return Ok(self.evaluate(game_state));
        }

        let color = if maximizing {
            self.perspective
        } else {
            self.perspective.opposite()
        };
        let moves = search_moves(game_state, color);
        if moves.is_empty() {
            return Ok(self.evaluate(game_state));
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let entry = make_move(game_state, mv)?;
            let score = self.minimax(game_state, depth - 1, alpha, beta, !maximizing)?;
            unmake_move(game_state, &entry)?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if self.pruning && beta <= alpha {
                self.cutoffs += 1;
                break;
            }
        }
        Ok(best)
    }

    #[inline]
    fn evaluate(&self, game_state: &GameState) -> i32 {
        self.scorer.score(game_state, self.perspective)
    }
}
