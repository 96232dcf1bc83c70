//! Per-kind movement tables in mailbox offsets.
//!
//! Every non-pawn kind is described as a list of `Movement`s: a set of
//! direction offsets and the maximum number of steps along each. Move
//! generation walks these forwards from a piece; attack detection walks them
//! backwards from a target square. Both read the same table.

use crate::game_state::chess_types::PieceKind;

pub const ORTHOGONAL: [i8; 4] = [-10, -1, 1, 10];
pub const DIAGONAL: [i8; 4] = [-11, -9, 9, 11];
pub const ALL_DIRECTIONS: [i8; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];
pub const KNIGHT_JUMPS: [i8; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
/// Two-square jumps in all eight directions, skipping the ring in between.
pub const DONUT_JUMPS: [i8; 8] = [22, 20, 18, 2, -2, -18, -20, -22];

/// Unbounded slide: no path on the board is longer than 7 steps.
pub const SLIDE: u8 = 7;
/// Range cap of the earth piece.
pub const EARTH_RANGE: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub offsets: &'static [i8],
    /// Maximum steps per direction; 1 for stepping and jumping pieces.
    pub range: u8,
}

impl Movement {
    const fn new(offsets: &'static [i8], range: u8) -> Self {
        Self { offsets, range }
    }
}

const KNIGHT: [Movement; 1] = [Movement::new(&KNIGHT_JUMPS, 1)];
const BISHOP: [Movement; 1] = [Movement::new(&DIAGONAL, SLIDE)];
const ROOK: [Movement; 1] = [Movement::new(&ORTHOGONAL, SLIDE)];
const QUEEN: [Movement; 1] = [Movement::new(&ALL_DIRECTIONS, SLIDE)];
const KING: [Movement; 1] = [Movement::new(&ALL_DIRECTIONS, 1)];
const FIRE: [Movement; 2] = [
    Movement::new(&KNIGHT_JUMPS, 1),
    Movement::new(&ALL_DIRECTIONS, 1),
];
const WATER: [Movement; 2] = [
    Movement::new(&ORTHOGONAL, 1),
    Movement::new(&DONUT_JUMPS, 1),
];
const EARTH: [Movement; 1] = [Movement::new(&ALL_DIRECTIONS, EARTH_RANGE)];
const AIR: [Movement; 2] = [
    Movement::new(&DIAGONAL, 1),
    Movement::new(&DONUT_JUMPS, 1),
];

/// Movement table for `kind`. Pawns are direction-dependent and handled
/// separately, so they have no entry here.
pub const fn movements(kind: PieceKind) -> &'static [Movement] {
    match kind {
        PieceKind::Pawn => &[],
        PieceKind::Knight => &KNIGHT,
        PieceKind::Bishop => &BISHOP,
        PieceKind::Rook => &ROOK,
        PieceKind::Queen => &QUEEN,
        PieceKind::King => &KING,
        PieceKind::Fire => &FIRE,
        PieceKind::Water => &WATER,
        PieceKind::Earth => &EARTH,
        PieceKind::Air => &AIR,
    }
}

#[cfg(test)]
mod tests {
    use super::movements;
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn every_offset_set_is_symmetric() {
        // Attack detection walks offsets in reverse, which relies on each set
        // containing the negation of every member.
        for kind in PieceKind::ALL {
            for movement in movements(kind) {
                for off in movement.offsets {
                    assert!(
                        movement.offsets.contains(&-off),
                        "{kind:?} offset {off} has no opposite"
                    );
                }
            }
        }
    }

    #[test]
    fn only_pawns_lack_a_table() {
        for kind in PieceKind::ALL {
            assert_eq!(movements(kind).is_empty(), kind == PieceKind::Pawn);
        }
    }
}
