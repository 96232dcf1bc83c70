//! Pluggable board evaluation.
//!
//! Search delegates static scoring to this trait so a different heuristic can
//! be swapped in without touching the tree walk.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::search::piece_square_tables::{material_value, positional_value};

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `perspective`, not of the side to move.
    fn score(&self, game_state: &GameState, perspective: Color) -> i32;
}

/// Material plus piece-square bonus, summed over the whole board.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialPstScorer;

impl MaterialPstScorer {
    #[inline]
    pub fn piece_score(piece: Piece, square: Square) -> i32 {
        material_value(piece.kind) + positional_value(piece, square)
    }
}

impl BoardScorer for MaterialPstScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> i32 {
        game_state
            .board
            .pieces()
            .map(|(square, piece)| {
                let value = Self::piece_score(piece, square);
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

/// Material only. Cheaper and handy when checking search behaviour against
/// hand-counted scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> i32 {
        game_state
            .board
            .pieces()
            .map(|(_, piece)| {
                let value = material_value(piece.kind);
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}
