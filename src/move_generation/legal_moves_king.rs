//! King steps plus castling destinations.

use crate::game_state::chess_rules::*;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::any_square_attacked;
use crate::move_generation::legal_moves_pattern::generate_pattern_moves;

pub fn generate_king_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    generate_pattern_moves(
        &game_state.board,
        from,
        Piece::new(color, PieceKind::King),
        out,
    );

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if can_castle(game_state, color, side) {
            out.push(castle_king_target(color, side));
        }
    }
}

/// The right is held, the king and the rook stand on their home squares,
/// the squares between them are empty, and none of the squares the king
/// occupies, crosses or lands on is attacked.
pub fn can_castle(game_state: &GameState, color: Color, side: CastleSide) -> bool {
    let board = &game_state.board;

    if (game_state.castling_rights & side.right(color)) == 0 {
        return false;
    }
    if board.piece_at(king_home(color)) != Some(Piece::new(color, PieceKind::King)) {
        return false;
    }
    if board.piece_at(rook_home(color, side)) != Some(Piece::new(color, PieceKind::Rook)) {
        return false;
    }
    if !board.all_empty(castle_empty_squares(color, side)) {
        return false;
    }

    !any_square_attacked(board, castle_king_path(color, side), color.opposite())
}
