//! Pseudo-legal destinations for every table-driven kind: the classic
//! knight, bishop, rook, queen and king steps plus the four elemental pieces.

use crate::game_state::board::{offset_square, Board};
use crate::game_state::chess_types::*;
use crate::moves::movement_patterns::movements;

/// Walk each movement of `piece` from `from`. A ray ends at the board edge,
/// at an ally (excluded) or at an enemy (included as a capture).
pub fn generate_pattern_moves(board: &Board, from: Square, piece: Piece, out: &mut Vec<Square>) {
    for movement in movements(piece.kind) {
        for &off in movement.offsets {
            let mut current = from;
            for _ in 0..movement.range {
                let Some(next) = offset_square(current, off) else {
                    break;
                };
                match board.piece_at(next) {
                    None => out.push(next),
                    Some(other) => {
                        if other.color != piece.color {
                            out.push(next);
                        }
                        break;
                    }
                }
                current = next;
            }
        }
    }
}
