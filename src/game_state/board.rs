//! 120-cell mailbox board.
//!
//! The 8x8 playing area sits inside a 10x12 grid whose border cells are never
//! playable, so offset arithmetic can run off the edge and be caught by a
//! single table lookup. Index 21 is a8 and index 98 is h1.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::utils::algebraic::index_to_coordinate;

pub const BOARD_CELLS: usize = 120;

/// Mailbox index -> 0..64 square (a8 = 0), or -1 for border cells.
#[rustfmt::skip]
pub const MAILBOX120: [i8; BOARD_CELLS] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1,  0,  1,  2,  3,  4,  5,  6,  7, -1,
    -1,  8,  9, 10, 11, 12, 13, 14, 15, -1,
    -1, 16, 17, 18, 19, 20, 21, 22, 23, -1,
    -1, 24, 25, 26, 27, 28, 29, 30, 31, -1,
    -1, 32, 33, 34, 35, 36, 37, 38, 39, -1,
    -1, 40, 41, 42, 43, 44, 45, 46, 47, -1,
    -1, 48, 49, 50, 51, 52, 53, 54, 55, -1,
    -1, 56, 57, 58, 59, 60, 61, 62, 63, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
];

/// 0..64 square (a8 = 0, h1 = 63) -> mailbox index.
#[rustfmt::skip]
pub const MAILBOX64: [Square; 64] = [
    21, 22, 23, 24, 25, 26, 27, 28,
    31, 32, 33, 34, 35, 36, 37, 38,
    41, 42, 43, 44, 45, 46, 47, 48,
    51, 52, 53, 54, 55, 56, 57, 58,
    61, 62, 63, 64, 65, 66, 67, 68,
    71, 72, 73, 74, 75, 76, 77, 78,
    81, 82, 83, 84, 85, 86, 87, 88,
    91, 92, 93, 94, 95, 96, 97, 98,
];

#[inline]
pub fn is_valid_square(square: Square) -> bool {
    MAILBOX120
        .get(square as usize)
        .is_some_and(|&idx64| idx64 >= 0)
}

/// Apply a mailbox offset, returning `None` when the result is off the board.
#[inline]
pub fn offset_square(square: Square, offset: i8) -> Option<Square> {
    let target = i16::from(square) + i16::from(offset);
    if !(0..BOARD_CELLS as i16).contains(&target) {
        return None;
    }
    let target = target as Square;
    is_valid_square(target).then_some(target)
}

/// All 64 playable squares in ascending mailbox order.
#[inline]
pub fn playable_squares() -> impl Iterator<Item = Square> {
    MAILBOX64.iter().copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; BOARD_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Piece on `square`; border cells always read as empty.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if is_valid_square(square) {
            self.cells[square as usize]
        } else {
            None
        }
    }

    pub fn place_piece(&mut self, piece: Piece, square: Square) -> ChessResult<()> {
        if !is_valid_square(square) {
            return Err(ChessError::InvalidSquareIndex(square));
        }
        self.cells[square as usize] = Some(piece);
        Ok(())
    }

    /// Clear `square`, returning whatever stood there.
    pub fn remove_piece(&mut self, square: Square) -> ChessResult<Option<Piece>> {
        if !is_valid_square(square) {
            return Err(ChessError::InvalidSquareIndex(square));
        }
        Ok(self.cells[square as usize].take())
    }

    /// Relocate the piece on `from` to `to`, overwriting (capturing) anything
    /// on `to`. Returns the overwritten piece.
    pub fn apply_basic_move(&mut self, from: Square, to: Square) -> ChessResult<Option<Piece>> {
        if !is_valid_square(to) {
            return Err(ChessError::InvalidSquareIndex(to));
        }
        let piece = self
            .remove_piece(from)?
            .ok_or_else(|| ChessError::EmptySquare(index_to_coordinate(from).unwrap_or_default()))?;
        let captured = self.cells[to as usize].replace(piece);
        Ok(captured)
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    pub fn all_empty(&self, squares: &[Square]) -> bool {
        squares.iter().all(|&sq| !self.is_occupied(sq))
    }

    #[inline]
    pub fn is_ally(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color == color)
    }

    #[inline]
    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color != color)
    }

    pub fn find_king(&self, color: Color) -> ChessResult<Square> {
        let king = Piece::new(color, PieceKind::King);
        playable_squares()
            .find(|&sq| self.cells[sq as usize] == Some(king))
            .ok_or(ChessError::KingNotFound(color))
    }

    pub fn count_pieces(&self, piece: Piece) -> usize {
        playable_squares()
            .filter(|&sq| self.cells[sq as usize] == Some(piece))
            .count()
    }

    /// Occupied squares with their pieces, in ascending mailbox order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        playable_squares().filter_map(move |sq| self.cells[sq as usize].map(|p| (sq, p)))
    }
}
