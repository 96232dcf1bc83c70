//! Full legal move generation pipeline.
//!
//! Collects per-piece pseudo-legal destinations, plays each one on a scratch
//! copy of the board and drops those that leave the mover's own king
//! attacked.

use log::warn;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::playable_squares;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{classify_move, relocate};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pattern::generate_pattern_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::utils::algebraic::index_to_coordinate;

/// Candidate destinations before the own-king safety filter.
pub fn pseudo_legal_destinations(game_state: &GameState, from: Square) -> ChessResult<Vec<Square>> {
    let piece = game_state
        .board
        .piece_at(from)
        .ok_or_else(|| ChessError::EmptySquare(index_to_coordinate(from).unwrap_or_default()))?;

    let mut out = Vec::with_capacity(32);
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(
            &game_state.board,
            from,
            piece.color,
            game_state.en_passant_square,
            &mut out,
        ),
        PieceKind::King => generate_king_moves(game_state, from, piece.color, &mut out),
        _ => generate_pattern_moves(&game_state.board, from, piece, &mut out),
    }
    Ok(out)
}

/// Legal destinations for the piece on `from`.
///
/// Fails with `KingNotFound` when the mover has no king, since legality
/// cannot be judged without one.
pub fn legal_destinations(game_state: &GameState, from: Square) -> ChessResult<Vec<Square>> {
    let candidates = pseudo_legal_destinations(game_state, from)?;
    let mut legal = Vec::with_capacity(candidates.len());

    for to in candidates {
        if leaves_king_safe(game_state, from, to)? {
            legal.push(to);
        }
    }
    Ok(legal)
}

fn leaves_king_safe(game_state: &GameState, from: Square, to: Square) -> ChessResult<bool> {
    let (piece, kind) = classify_move(&game_state.board, game_state.en_passant_square, from, to)?;
    let mut scratch = game_state.board;
    relocate(&mut scratch, piece, kind, from, to)?;
    Ok(!is_king_in_check(&scratch, piece.color)?)
}

pub fn is_legal_move(game_state: &GameState, from: Square, to: Square) -> ChessResult<bool> {
    Ok(legal_destinations(game_state, from)?.contains(&to))
}

/// Every legal move of `color`, squares visited a8..h1. Promotion moves are
/// returned once, without a chosen kind.
pub fn all_moves(game_state: &GameState, color: Color) -> ChessResult<Vec<ChessMove>> {
    let mut moves = Vec::with_capacity(64);
    for (from, piece) in game_state.board.pieces() {
        if piece.color != color {
            continue;
        }
        for to in legal_destinations(game_state, from)? {
            moves.push(ChessMove::new(from, to));
        }
    }
    Ok(moves)
}

/// Like `all_moves`, but a piece whose moves cannot be produced contributes
/// none instead of failing the whole enumeration.
pub fn all_moves_lenient(game_state: &GameState, color: Color) -> Vec<ChessMove> {
    let mut moves = Vec::with_capacity(64);
    for (from, piece) in game_state.board.pieces() {
        if piece.color != color {
            continue;
        }
        match legal_destinations(game_state, from) {
            Ok(destinations) => {
                moves.extend(destinations.into_iter().map(|to| ChessMove::new(from, to)))
            }
            Err(err) => warn!("skipping moves of {} on square {from}: {err}", piece.to_char()),
        }
    }
    moves
}

/// Early-exit check for at least one legal move.
pub fn has_any_legal_move(game_state: &GameState, color: Color) -> ChessResult<bool> {
    for sq in playable_squares() {
        match game_state.board.piece_at(sq) {
            Some(piece) if piece.color == color => {
                if !legal_destinations(game_state, sq)?.is_empty() {
                    return Ok(true);
                }
            }
            _ => {}
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{all_moves, all_moves_lenient, is_legal_move, legal_destinations};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::coordinate_to_index;

    fn sq(coordinate: &str) -> Square {
        coordinate_to_index(coordinate).expect("test coordinate should parse")
    }

    fn game(position: &str) -> GameState {
        GameState::from_position(position).expect("test position should parse")
    }

    #[test]
    fn opening_move_counts() {
        assert_eq!(all_moves(&GameState::new_classic(), Color::Light).map(|m| m.len()), Ok(20));
        assert_eq!(all_moves(&GameState::new_classic(), Color::Dark).map(|m| m.len()), Ok(20));
        assert_eq!(all_moves(&GameState::new_elemental(), Color::Light).map(|m| m.len()), Ok(25));
        assert_eq!(all_moves(&GameState::new_elemental(), Color::Dark).map(|m| m.len()), Ok(25));
    }

    #[test]
    fn pinned_piece_may_only_move_along_the_pin() {
        // Light rook on e2 pinned by the dark rook on e8.
        let g = game("4r2k/8/8/8/8/8/4R3/4K3 w - -");
        let moves = legal_destinations(&g, sq("e2")).expect("rook moves should generate");
        assert!(moves.iter().all(|&to| to % 10 == sq("e2") % 10));
        assert!(moves.contains(&sq("e8")));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let g = game("3r3k/8/8/8/8/8/8/4K3 w - -");
        assert_eq!(is_legal_move(&g, sq("e1"), sq("d1")), Ok(false));
        assert_eq!(is_legal_move(&g, sq("e1"), sq("d2")), Ok(false));
        assert_eq!(is_legal_move(&g, sq("e1"), sq("f1")), Ok(true));
    }

    #[test]
    fn en_passant_exposing_the_king_is_illegal() {
        // Removing both pawns from the fifth rank opens the rook onto the king.
        let g = game("7k/8/8/K2pP2r/8/8/8/8 w - d6");
        assert_eq!(is_legal_move(&g, sq("e5"), sq("d6")), Ok(false));
        assert_eq!(is_legal_move(&g, sq("e5"), sq("e6")), Ok(true));
    }

    #[test]
    fn castle_destination_offered_only_when_allowed() {
        let g = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
        let moves = legal_destinations(&g, sq("e1")).expect("king moves should generate");
        assert!(moves.contains(&sq("g1")));
        assert!(moves.contains(&sq("c1")));
    }

    #[test]
    fn missing_king_is_reported_strictly_and_skipped_leniently() {
        let mut g = GameState::new_classic();
        g.board
            .remove_piece(sq("e1"))
            .expect("king square should be playable");
        assert_eq!(
            all_moves(&g, Color::Light),
            Err(ChessError::KingNotFound(Color::Light))
        );
        assert!(all_moves_lenient(&g, Color::Light).is_empty());
    }

    #[test]
    fn empty_origin_is_an_error() {
        let g = GameState::new_classic();
        assert_eq!(
            legal_destinations(&g, sq("e4")),
            Err(ChessError::EmptySquare("e4".to_owned()))
        );
    }
}
