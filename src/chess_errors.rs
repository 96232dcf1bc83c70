//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by board manipulation,
//! layout parsing, move generation, game-state transitions and the engines.
//!
//! Usage guidelines:
//! - Input-shaped variants (`InvalidCoordinate`, `InvalidLayout`,
//!   `IllegalMove`, ...) are recoverable: nothing was mutated and the caller
//!   may retry with corrected input.
//! - `KingNotFound` signals a corrupted board. All check and attack logic
//!   depends on king presence, so it must be propagated rather than swallowed.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind, Square};

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A coordinate string was not a lowercase file `a`..`h` followed by a
    /// rank digit `1`..`8`.
    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    /// A mailbox index outside the 64 playable cells.
    #[error("mailbox index {0} is not a playable square")]
    InvalidSquareIndex(Square),

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),

    #[error("no piece on {0}")]
    EmptySquare(String),

    #[error("illegal move {from}{to}")]
    IllegalMove { from: String, to: String },

    #[error("{0:?} king not found on the board")]
    KingNotFound(Color),

    #[error("a promotion choice is pending")]
    PromotionPending,

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    #[error("the game is over")]
    GameOver,

    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Color),

    #[error("the computer is still thinking")]
    BotTurnPending,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
