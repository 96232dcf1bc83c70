//! Pawn pushes, double steps, diagonal captures and en passant.

use crate::game_state::board::{offset_square, Board};
use crate::game_state::chess_rules::pawn_start_row;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::en_passant_victim_square;

pub fn generate_pawn_moves(
    board: &Board,
    from: Square,
    color: Color,
    en_passant_square: Option<Square>,
    out: &mut Vec<Square>,
) {
    let forward = color.forward();

    if let Some(one) = offset_square(from, forward) {
        if !board.is_occupied(one) {
            out.push(one);

            if from / 10 == pawn_start_row(color) {
                if let Some(two) = offset_square(one, forward) {
                    if !board.is_occupied(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    for side_step in [-1i8, 1] {
        let Some(target) = offset_square(from, forward + side_step) else {
            continue;
        };
        if board.is_enemy(target, color)
            || is_en_passant_capture(board, color, target, en_passant_square)
        {
            out.push(target);
        }
    }
}

/// The target must match and the pawn that just double-stepped past it must
/// still be an enemy pawn standing right behind it.
fn is_en_passant_capture(
    board: &Board,
    color: Color,
    target: Square,
    en_passant_square: Option<Square>,
) -> bool {
    if en_passant_square != Some(target) {
        return false;
    }
    en_passant_victim_square(color, target)
        .and_then(|sq| board.piece_at(sq))
        .is_some_and(|victim| victim == Piece::new(color.opposite(), PieceKind::Pawn))
}
