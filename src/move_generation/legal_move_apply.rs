//! Move application and reversal.
//!
//! `make_move` / `unmake_move` are the only primitives that mutate a position;
//! the game, the legality filter and the search copy all go through them.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::{offset_square, Board};
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::index_to_coordinate;

/// Classify `from -> to` for the piece standing on `from`.
pub fn classify_move(
    board: &Board,
    en_passant_square: Option<Square>,
    from: Square,
    to: Square,
) -> ChessResult<(Piece, MoveKind)> {
    let piece = board
        .piece_at(from)
        .ok_or_else(|| ChessError::EmptySquare(index_to_coordinate(from).unwrap_or_default()))?;

    let kind = match piece.kind {
        PieceKind::Pawn if Some(to) == en_passant_square && from % 10 != to % 10 => {
            MoveKind::EnPassant
        }
        PieceKind::Pawn if to / 10 == promotion_row(piece.color) => MoveKind::Promotion,
        PieceKind::King if from == king_home(piece.color) && from.abs_diff(to) == 2 => {
            MoveKind::Castle
        }
        _ => MoveKind::Normal,
    };
    Ok((piece, kind))
}

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline]
pub fn en_passant_victim_square(mover: Color, to: Square) -> Option<Square> {
    offset_square(to, -mover.forward())
}

#[inline]
fn castle_side(from: Square, to: Square) -> CastleSide {
    if to > from {
        CastleSide::Kingside
    } else {
        CastleSide::Queenside
    }
}

/// Perform the board relocation for a classified move, including the
/// en-passant victim and the castling rook. Returns the captured piece and
/// the square it was taken from.
pub fn relocate(
    board: &mut Board,
    piece: Piece,
    kind: MoveKind,
    from: Square,
    to: Square,
) -> ChessResult<(Option<Piece>, Option<Square>)> {
    match kind {
        MoveKind::EnPassant => {
            let victim_sq = en_passant_victim_square(piece.color, to)
                .ok_or(ChessError::InvalidSquareIndex(to))?;
            let victim = board.remove_piece(victim_sq)?;
            board.apply_basic_move(from, to)?;
            Ok((victim, victim.map(|_| victim_sq)))
        }
        MoveKind::Castle => {
            let side = castle_side(from, to);
            board.apply_basic_move(from, to)?;
            board.apply_basic_move(
                rook_home(piece.color, side),
                castle_rook_target(piece.color, side),
            )?;
            Ok((None, None))
        }
        MoveKind::Normal | MoveKind::Promotion => {
            let captured = board.apply_basic_move(from, to)?;
            Ok((captured, captured.map(|_| to)))
        }
    }
}

/// Apply `mv` to `game_state` and return the history record needed to undo
/// it. Does not touch the side to move or the history stacks.
///
/// A pawn reaching the far rank without `mv.promotion` stays a pawn and
/// leaves `pending_promotion` set for the caller to resolve.
pub fn make_move(game_state: &mut GameState, mv: ChessMove) -> ChessResult<HistoryEntry> {
    let (piece, kind) =
        classify_move(&game_state.board, game_state.en_passant_square, mv.from, mv.to)?;

    if kind == MoveKind::Promotion {
        if let Some(promo) = mv.promotion {
            if !PROMOTION_KINDS.contains(&promo) {
                return Err(ChessError::InvalidPromotion(promo));
            }
        }
    }

    let prev_castling_rights = game_state.castling_rights;
    let prev_en_passant_square = game_state.en_passant_square;

    let (captured, captured_square) =
        relocate(&mut game_state.board, piece, kind, mv.from, mv.to)?;

    let mut promoted_to = None;
    if kind == MoveKind::Promotion {
        match mv.promotion {
            Some(promo) => {
                game_state
                    .board
                    .place_piece(Piece::new(piece.color, promo), mv.to)?;
                promoted_to = Some(promo);
            }
            None => game_state.pending_promotion = Some(mv.to),
        }
    }

    update_castling_rights(&mut game_state.castling_rights, piece, mv.from, mv.to);
    game_state.en_passant_square =
        if piece.kind == PieceKind::Pawn && mv.from.abs_diff(mv.to) == 20 {
            Some((mv.from + mv.to) / 2)
        } else {
            None
        };

    Ok(HistoryEntry {
        piece,
        from: mv.from,
        to: mv.to,
        captured,
        captured_square,
        kind,
        promoted_to,
        prev_castling_rights,
        prev_en_passant_square,
    })
}

/// Reverse a move previously applied with `make_move`.
pub fn unmake_move(game_state: &mut GameState, entry: &HistoryEntry) -> ChessResult<()> {
    let board = &mut game_state.board;

    match entry.kind {
        MoveKind::Normal | MoveKind::EnPassant => {
            board.apply_basic_move(entry.to, entry.from)?;
        }
        MoveKind::Castle => {
            let side = castle_side(entry.from, entry.to);
            board.apply_basic_move(entry.to, entry.from)?;
            board.apply_basic_move(
                castle_rook_target(entry.piece.color, side),
                rook_home(entry.piece.color, side),
            )?;
        }
        MoveKind::Promotion => {
            board.remove_piece(entry.to)?;
            board.place_piece(entry.piece, entry.from)?;
        }
    }

    if let (Some(captured), Some(square)) = (entry.captured, entry.captured_square) {
        board.place_piece(captured, square)?;
    }

    game_state.castling_rights = entry.prev_castling_rights;
    game_state.en_passant_square = entry.prev_en_passant_square;
    game_state.pending_promotion = None;
    Ok(())
}

/// Re-apply an undone record, including its promotion choice.
pub fn remake_move(game_state: &mut GameState, entry: &HistoryEntry) -> ChessResult<HistoryEntry> {
    let mv = ChessMove {
        from: entry.from,
        to: entry.to,
        promotion: entry.promoted_to,
    };
    make_move(game_state, mv)
}

fn update_castling_rights(rights: &mut CastlingRights, piece: Piece, from: Square, to: Square) {
    if piece.kind == PieceKind::King {
        *rights &= !(CastleSide::Kingside.right(piece.color)
            | CastleSide::Queenside.right(piece.color));
    }

    for color in [Color::Light, Color::Dark] {
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            let home = rook_home(color, side);
            // A rook leaving home, or anything landing on it, ends that right.
            let rook_left = piece.kind == PieceKind::Rook && piece.color == color && from == home;
            if rook_left || to == home {
                *rights &= !side.right(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{make_move, unmake_move};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::{coordinate_to_index, parse_move_request};

    fn mv(request: &str) -> ChessMove {
        parse_move_request(request).expect("test move should parse")
    }

    fn sq(coordinate: &str) -> Square {
        coordinate_to_index(coordinate).expect("test coordinate should parse")
    }

    fn assert_round_trip(position: &str, request: ChessMove, expected_kind: MoveKind) {
        let mut game = GameState::from_position(position).expect("position should parse");
        let before = game.clone();

        let entry = make_move(&mut game, request).expect("move should apply");
        assert_eq!(entry.kind, expected_kind);
        assert_ne!(game.board, before.board);

        unmake_move(&mut game, &entry).expect("move should unmake");
        assert_eq!(game.board, before.board);
        assert_eq!(game.castling_rights, before.castling_rights);
        assert_eq!(game.en_passant_square, before.en_passant_square);
        assert_eq!(game.pending_promotion, None);
    }

    #[test]
    fn every_move_kind_unmakes_exactly() {
        assert_round_trip("4k3/8/8/8/8/8/4P3/4K3 w - -", mv("e2e4"), MoveKind::Normal);
        assert_round_trip("4k3/8/8/3r4/8/8/3R4/4K3 w - -", mv("d2d5"), MoveKind::Normal);
        assert_round_trip("4k3/8/8/3pP3/8/8/8/4K3 w - d6", mv("e5d6"), MoveKind::EnPassant);
        assert_round_trip("4k3/8/8/8/8/8/8/R3K2R w KQ -", mv("e1g1"), MoveKind::Castle);
        assert_round_trip("r3k2r/8/8/8/8/8/8/4K3 b kq -", mv("e8c8"), MoveKind::Castle);
        assert_round_trip(
            "3rk3/4P3/8/8/8/8/8/4K3 w - -",
            ChessMove::with_promotion(sq("e7"), sq("d8"), PieceKind::Earth),
            MoveKind::Promotion,
        );
        assert_round_trip("4k3/4P3/8/8/8/8/8/4K3 w - -", mv("e7e8"), MoveKind::Promotion);
    }

    #[test]
    fn en_passant_removes_the_pawn_behind_the_target() {
        let mut game =
            GameState::from_position("4k3/8/8/8/3pP3/8/8/4K3 b - e3").expect("position should parse");
        let entry = make_move(&mut game, mv("d4e3")).expect("en passant should apply");
        assert_eq!(entry.captured, Some(Piece::new(Color::Light, PieceKind::Pawn)));
        assert_eq!(entry.captured_square, Some(sq("e4")));
        assert!(!game.board.is_occupied(sq("e4")));
        assert_eq!(game.board.piece_at(sq("e3")), Some(Piece::new(Color::Dark, PieceKind::Pawn)));
    }

    #[test]
    fn castling_moves_king_and_rook_together() {
        let mut game =
            GameState::from_position("4k3/8/8/8/8/8/8/R3K2R w KQ -").expect("position should parse");
        make_move(&mut game, mv("e1c1")).expect("castle should apply");
        assert_eq!(game.board.piece_at(sq("c1")), Some(Piece::new(Color::Light, PieceKind::King)));
        assert_eq!(game.board.piece_at(sq("d1")), Some(Piece::new(Color::Light, PieceKind::Rook)));
        assert!(!game.board.is_occupied(sq("a1")));
        assert_eq!(game.castling_rights, 0);
    }

    #[test]
    fn rook_moves_and_captures_revoke_only_their_side() {
        let mut game =
            GameState::from_position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").expect("position should parse");
        make_move(&mut game, mv("h1h8")).expect("rook capture should apply");
        assert_eq!(
            game.castling_rights,
            CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_QUEENSIDE
        );
    }

    #[test]
    fn double_step_sets_and_any_other_move_clears_en_passant() {
        let mut game = GameState::new_classic();
        make_move(&mut game, mv("e2e4")).expect("double step should apply");
        assert_eq!(game.en_passant_square, Some(sq("e3")));
        make_move(&mut game, mv("g8f6")).expect("knight move should apply");
        assert_eq!(game.en_passant_square, None);
    }

    #[test]
    fn pawn_reaching_far_rank_without_choice_is_left_pending() {
        let mut game =
            GameState::from_position("4k3/P7/8/8/8/8/8/4K3 w - -").expect("position should parse");
        let entry = make_move(&mut game, mv("a7a8")).expect("promotion move should apply");
        assert_eq!(entry.promoted_to, None);
        assert_eq!(game.pending_promotion, Some(sq("a8")));
        assert_eq!(game.board.piece_at(sq("a8")), Some(Piece::new(Color::Light, PieceKind::Pawn)));
    }

    #[test]
    fn promotion_to_king_or_pawn_is_refused_before_mutation() {
        let mut game =
            GameState::from_position("4k3/P7/8/8/8/8/8/4K3 w - -").expect("position should parse");
        let before = game.board;
        let err = make_move(
            &mut game,
            ChessMove::with_promotion(sq("a7"), sq("a8"), PieceKind::King),
        )
        .expect_err("king promotion should fail");
        assert_eq!(err, ChessError::InvalidPromotion(PieceKind::King));
        assert_eq!(game.board, before);
    }
}
