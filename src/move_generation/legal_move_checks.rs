//! Attack detection.
//!
//! Answers "could any piece of `attacker` move to this square next" without
//! regard to whose turn it is or to the attacker's own king safety, so it
//! never recurses into full legality.

use crate::chess_errors::ChessResult;
use crate::game_state::board::{offset_square, Board};
use crate::game_state::chess_types::*;
use crate::moves::movement_patterns::movements;

const PATTERN_KINDS: [PieceKind; 9] = [
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

pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    // Pawns capture diagonally forward, so an attacking pawn sits one row
    // behind the target from its own point of view.
    let behind = -attacker.forward();
    let pawn = Piece::new(attacker, PieceKind::Pawn);
    for side_step in [-1i8, 1] {
        if let Some(from) = offset_square(square, behind + side_step) {
            if board.piece_at(from) == Some(pawn) {
                return true;
            }
        }
    }

    PATTERN_KINDS
        .iter()
        .any(|&kind| attacked_by_kind(board, square, Piece::new(attacker, kind)))
}

/// Walk each movement of `attacker` backwards from `square`. The first piece
/// met along a ray ends that ray; it is an attack only if it is `attacker`.
fn attacked_by_kind(board: &Board, square: Square, attacker: Piece) -> bool {
    for movement in movements(attacker.kind) {
        for &off in movement.offsets {
            let mut current = square;
            for _ in 0..movement.range {
                let Some(next) = offset_square(current, -off) else {
                    break;
                };
                if let Some(piece) = board.piece_at(next) {
                    if piece == attacker {
                        return true;
                    }
                    break;
                }
                current = next;
            }
        }
    }
    false
}

pub fn any_square_attacked(board: &Board, squares: &[Square], attacker: Color) -> bool {
    squares
        .iter()
        .any(|&sq| is_square_attacked(board, sq, attacker))
}

pub fn is_king_in_check(board: &Board, color: Color) -> ChessResult<bool> {
    let king_sq = board.find_king(color)?;
    Ok(is_square_attacked(board, king_sq, color.opposite()))
}
