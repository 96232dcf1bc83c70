//! Canonical rule constants.
//!
//! Starting layouts, home squares and the pawn rows that drive double steps
//! and promotion. All squares are mailbox indices.

use crate::game_state::chess_types::{CastleSide, Color, PieceKind, Square};

/// Standard chess starting layout.
pub const CLASSIC_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Elemental starting layout: fire, earth, air and water replace the
/// b-file knight, the queen, the f-file bishop and the h-file rook.
pub const ELEMENTAL_LAYOUT: &str = "rfbekanw/pppppppp/8/8/8/8/PPPPPPPP/RFBEKANW";

/// Kinds a pawn may become on the far rank.
pub const PROMOTION_KINDS: [PieceKind; 8] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Fire,
    PieceKind::Water,
    PieceKind::Earth,
    PieceKind::Air,
];

#[inline]
pub const fn king_home(color: Color) -> Square {
    match color {
        Color::Light => 95,
        Color::Dark => 25,
    }
}

#[inline]
pub const fn rook_home(color: Color, side: CastleSide) -> Square {
    match (color, side) {
        (Color::Light, CastleSide::Kingside) => 98,
        (Color::Light, CastleSide::Queenside) => 91,
        (Color::Dark, CastleSide::Kingside) => 28,
        (Color::Dark, CastleSide::Queenside) => 21,
    }
}

/// Where the king lands when castling.
#[inline]
pub const fn castle_king_target(color: Color, side: CastleSide) -> Square {
    match side {
        CastleSide::Kingside => king_home(color) + 2,
        CastleSide::Queenside => king_home(color) - 2,
    }
}

/// Where the rook lands when castling (the square the king passed over).
#[inline]
pub const fn castle_rook_target(color: Color, side: CastleSide) -> Square {
    match side {
        CastleSide::Kingside => king_home(color) + 1,
        CastleSide::Queenside => king_home(color) - 1,
    }
}

/// Squares between king and rook that must be empty.
pub const fn castle_empty_squares(color: Color, side: CastleSide) -> &'static [Square] {
    match (color, side) {
        (Color::Light, CastleSide::Kingside) => &[96, 97],
        (Color::Light, CastleSide::Queenside) => &[94, 93, 92],
        (Color::Dark, CastleSide::Kingside) => &[26, 27],
        (Color::Dark, CastleSide::Queenside) => &[24, 23, 22],
    }
}

/// Squares the king stands on, crosses or lands on; none may be attacked.
pub const fn castle_king_path(color: Color, side: CastleSide) -> &'static [Square] {
    match (color, side) {
        (Color::Light, CastleSide::Kingside) => &[95, 96, 97],
        (Color::Light, CastleSide::Queenside) => &[95, 94, 93],
        (Color::Dark, CastleSide::Kingside) => &[25, 26, 27],
        (Color::Dark, CastleSide::Queenside) => &[25, 24, 23],
    }
}

/// Mailbox row (`square / 10`) pawns start on and may double-step from.
#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::Light => 8,
        Color::Dark => 3,
    }
}

/// Mailbox row on which a pawn of `color` promotes.
#[inline]
pub const fn promotion_row(color: Color) -> u8 {
    match color {
        Color::Light => 2,
        Color::Dark => 9,
    }
}
