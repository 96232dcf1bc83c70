//! Notifications emitted by the session for a front end to render.

use crate::game_state::board::{playable_squares, Board};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Squares whose contents changed, with their new contents.
    SquaresChanged(Vec<(Square, Option<Piece>)>),
    Selected { from: Square, destinations: Vec<Square> },
    SelectionCleared,
    MoveRecorded(String),
    PromotionRequired { square: Square, color: Color },
    TurnChanged(Color),
    BotThinking(Color),
    Check(Color),
    Checkmate { winner: Color },
    Stalemate,
    NewGame,
}

/// Per-square difference between two boards, in board-scan order.
pub fn board_delta(before: &Board, after: &Board) -> Vec<(Square, Option<Piece>)> {
    playable_squares()
        .filter(|&sq| before.piece_at(sq) != after.piece_at(sq))
        .map(|sq| (sq, after.piece_at(sq)))
        .collect()
}
