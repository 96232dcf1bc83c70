//! Core value types shared by the board, move generation and search.
//!
//! Side and piece type are explicit tags rather than letter case; letter case
//! only appears at the text boundary (`Piece::from_char` / `Piece::to_char`).

use serde::{Deserialize, Serialize};

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::{HistoryEntry, MoveKind};

/// Side to move. `Light` owns the uppercase letters and starts on ranks 1-2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Mailbox step of a single pawn advance for this side.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => -10,
            Color::Dark => 10,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Light => "White",
            Color::Dark => "Black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Fire,
    Water,
    Earth,
    Air,
}

impl PieceKind {
    pub const ALL: [PieceKind; 10] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Fire,
        PieceKind::Water,
        PieceKind::Earth,
        PieceKind::Air,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
            PieceKind::Fire => 6,
            PieceKind::Water => 7,
            PieceKind::Earth => 8,
            PieceKind::Air => 9,
        }
    }

    /// Lowercase letter used in layouts.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Fire => 'f',
            PieceKind::Water => 'w',
            PieceKind::Earth => 'e',
            PieceKind::Air => 'a',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        let kind = match letter.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            'f' => PieceKind::Fire,
            'w' => PieceKind::Water,
            'e' => PieceKind::Earth,
            'a' => PieceKind::Air,
            _ => return None,
        };
        Some(kind)
    }
}

/// A piece on the board: side tag plus type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Parse a layout letter; uppercase is `Light`, lowercase is `Dark`.
    pub fn from_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };
        PieceKind::from_letter(ch).map(|kind| Self { color, kind })
    }

    pub fn to_char(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::Light => letter.to_ascii_uppercase(),
            Color::Dark => letter,
        }
    }
}

/// Mailbox index (`0..120`) into the padded 10x12 grid.
pub type Square = u8;

/// Castling rights bitmask. Bits are only ever cleared during play.
pub type CastlingRights = u8;

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    #[inline]
    pub const fn right(self, color: Color) -> CastlingRights {
        match (color, self) {
            (Color::Light, CastleSide::Kingside) => CASTLE_LIGHT_KINGSIDE,
            (Color::Light, CastleSide::Queenside) => CASTLE_LIGHT_QUEENSIDE,
            (Color::Dark, CastleSide::Kingside) => CASTLE_DARK_KINGSIDE,
            (Color::Dark, CastleSide::Queenside) => CASTLE_DARK_QUEENSIDE,
        }
    }
}

/// A move request between two mailbox squares. `promotion` is only consulted
/// when a pawn reaches the far rank; `None` defers the choice to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}
