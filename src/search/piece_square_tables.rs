//! Material values and positional tables for static evaluation.
//!
//! Tables are written from Light's point of view with row 0 = rank 8; Dark
//! reads them mirrored vertically.

use crate::game_state::board::MAILBOX120;
use crate::game_state::chess_types::*;

pub type PieceSquareTable = [[i32; 8]; 8];

#[inline]
pub const fn material_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
        PieceKind::Fire => 450,
        PieceKind::Water => 450,
        PieceKind::Earth => 550,
        PieceKind::Air => 500,
    }
}

#[rustfmt::skip]
const PAWN_TABLE: PieceSquareTable = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: PieceSquareTable = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_TABLE: PieceSquareTable = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const ROOK_TABLE: PieceSquareTable = [
    [  0,   0,   5,  10,  10,   5,   0,   0],
    [  0,   0,   5,  10,  10,   5,   0,   0],
    [  0,   0,   5,  10,  10,   5,   0,   0],
    [  0,   0,   5,  10,  10,   5,   0,   0],
    [  0,   0,   5,  10,  10,   5,   0,   0],
    [  0,   0,   5,  10,  10,   5,   0,   0],
    [ 25,  25,  25,  25,  25,  25,  25,  25],
    [  0,   0,   5,  10,  10,   5,   0,   0],
];

#[rustfmt::skip]
const QUEEN_TABLE: PieceSquareTable = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [ -5,   0,   5,  10,  10,   5,   0,  -5],
    [  0,   0,   5,  10,  10,   5,   0,  -5],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

#[rustfmt::skip]
const KING_TABLE: PieceSquareTable = [
    [-40, -40, -35, -35, -35, -35, -40, -40],
    [-30, -30, -25, -25, -25, -25, -30, -30],
    [-30, -25, -10, -10, -10, -10, -25, -30],
    [-30, -25,  -5,  -5,  -5,  -5, -25, -30],
    [-25, -20,   0,   0,   0,   0, -20, -25],
    [-20, -15,   0,   5,   5,   0, -15, -20],
    [ -5,  -5,   0,   0,   0,   0,  -5,  -5],
    [-15,   0, -10, -15, -15, -10,   0, -15],
];

#[rustfmt::skip]
const FIRE_TABLE: PieceSquareTable = [
    [-40, -30, -20, -10, -10, -20, -30, -40],
    [-30, -10,   5,  10,  10,   5, -10, -30],
    [-20,   5,  20,  25,  25,  20,   5, -20],
    [-10,  10,  25,  30,  30,  25,  10, -10],
    [-10,  10,  25,  30,  30,  25,  10, -10],
    [-20,   5,  20,  25,  25,  20,   5, -20],
    [-30, -10,   5,  10,  10,   5, -10, -30],
    [-40, -30, -20, -10, -10, -20, -30, -40],
];

#[rustfmt::skip]
const WATER_TABLE: PieceSquareTable = [
    [  0,   0,   5,  10,  10,   5,   0,   0],
    [  5,  10,  15,  10,  10,  15,  10,   5],
    [  0,   5,  10,  15,  15,  10,   5,   0],
    [  0,   0,   5,  15,  15,   5,   0,   0],
    [  0,   0,   5,  15,  15,   5,   0,   0],
    [  0,   5,  10,  15,  15,  10,   5,   0],
    [  5,  10,  15,  10,  10,  15,  10,   5],
    [  0,   0,   5,  10,  10,   5,   0,   0],
];

#[rustfmt::skip]
const EARTH_TABLE: PieceSquareTable = [
    [-20, -10,  -5,   0,   0,  -5, -10, -20],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [ -5,   5,  10,  20,  20,  10,   5,  -5],
    [  0,  10,  20,  25,  25,  20,  10,   0],
    [  0,  10,  20,  25,  25,  20,  10,   0],
    [ -5,   5,  10,  20,  20,  10,   5,  -5],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-20, -10,  -5,   0,   0,  -5, -10, -20],
];

#[rustfmt::skip]
const AIR_TABLE: PieceSquareTable = [
    [-20, -10,  -5,   0,   0,  -5, -10, -20],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [ -5,   5,  10,  15,  15,  10,   5,  -5],
    [  0,  10,  15,  20,  20,  15,  10,   0],
    [  0,  10,  15,  20,  20,  15,  10,   0],
    [ -5,   5,  10,  15,  15,  10,   5,  -5],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-20, -10,  -5,   0,   0,  -5, -10, -20],
];

pub const fn table_for(kind: PieceKind) -> &'static PieceSquareTable {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
        PieceKind::Fire => &FIRE_TABLE,
        PieceKind::Water => &WATER_TABLE,
        PieceKind::Earth => &EARTH_TABLE,
        PieceKind::Air => &AIR_TABLE,
    }
}

/// Positional bonus of `piece` standing on mailbox `square`; 0 off the board.
pub fn positional_value(piece: Piece, square: Square) -> i32 {
    let Some(&idx64) = MAILBOX120.get(usize::from(square)) else {
        return 0;
    };
    if idx64 < 0 {
        return 0;
    }

    let row = (idx64 / 8) as usize;
    let file = (idx64 % 8) as usize;
    let table = table_for(piece.kind);
    match piece.color {
        Color::Light => table[row][file],
        Color::Dark => table[7 - row][file],
    }
}

#[cfg(test)]
mod tests {
    use super::{material_value, positional_value};
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::coordinate_to_index;

    fn sq(coordinate: &str) -> Square {
        coordinate_to_index(coordinate).expect("test coordinate should parse")
    }

    #[test]
    fn dark_reads_tables_mirrored() {
        let light_pawn = Piece::new(Color::Light, PieceKind::Pawn);
        let dark_pawn = Piece::new(Color::Dark, PieceKind::Pawn);
        assert_eq!(positional_value(light_pawn, sq("e2")), -20);
        assert_eq!(positional_value(dark_pawn, sq("e7")), -20);
        assert_eq!(positional_value(light_pawn, sq("a7")), 50);
        assert_eq!(positional_value(dark_pawn, sq("a2")), 50);
    }

    #[test]
    fn border_cells_score_nothing() {
        let rook = Piece::new(Color::Light, PieceKind::Rook);
        assert_eq!(positional_value(rook, 0), 0);
        assert_eq!(positional_value(rook, 119), 0);
        assert_eq!(positional_value(rook, 200), 0);
    }

    #[test]
    fn elemental_values_sit_between_minor_and_major_pieces() {
        for kind in [PieceKind::Fire, PieceKind::Water, PieceKind::Earth, PieceKind::Air] {
            assert!(material_value(kind) > material_value(PieceKind::Bishop));
            assert!(material_value(kind) < material_value(PieceKind::Queen));
        }
    }
}
