use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::{promotion_row, PROMOTION_KINDS};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{all_moves, has_any_legal_move};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

/// Count leaf positions of the legal-move tree `depth` plies deep. Each
/// promotion is expanded into one move per promotable kind.
pub fn perft(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }

    let mut scratch = game_state.detached_copy();
    perft_recurse(&mut scratch, depth, &mut counts)?;
    Ok(counts)
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(game_state: &GameState, depth: u8) -> ChessResult<Vec<(ChessMove, usize)>> {
    let mut scratch = game_state.detached_copy();
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }

    for mv in expanded_moves(&scratch)? {
        let entry = make_move(&mut scratch, mv)?;
        scratch.toggle_turn();

        let mut counts = PerftCounts::default();
        if depth == 1 {
            counts.nodes = 1;
        } else {
            perft_recurse(&mut scratch, depth - 1, &mut counts)?;
        }
        out.push((mv, counts.nodes));

        unmake_move(&mut scratch, &entry)?;
        scratch.toggle_turn();
    }
    Ok(out)
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    for mv in expanded_moves(game_state)? {
        let entry = make_move(game_state, mv)?;
        game_state.toggle_turn();

        if depth == 1 {
            record_leaf(game_state, &entry, counts)?;
        } else {
            perft_recurse(game_state, depth - 1, counts)?;
        }

        unmake_move(game_state, &entry)?;
        game_state.toggle_turn();
    }
    Ok(())
}

fn expanded_moves(game_state: &GameState) -> ChessResult<Vec<ChessMove>> {
    let mover = game_state.side_to_move;
    let mut out = Vec::new();
    for mv in all_moves(game_state, mover)? {
        let is_promotion = game_state.board.piece_at(mv.from).map(|p| p.kind) == Some(PieceKind::Pawn)
            && mv.to / 10 == promotion_row(mover);
        if is_promotion {
            out.extend(
                PROMOTION_KINDS
                    .iter()
                    .map(|&kind| ChessMove::with_promotion(mv.from, mv.to, kind)),
            );
        } else {
            out.push(mv);
        }
    }
    Ok(out)
}

fn record_leaf(game_state: &GameState, entry: &HistoryEntry, counts: &mut PerftCounts) -> ChessResult<()> {
    counts.nodes += 1;
    if entry.captured.is_some() {
        counts.captures += 1;
    }
    match entry.kind {
        MoveKind::EnPassant => counts.en_passant += 1,
        MoveKind::Castle => counts.castles += 1,
        MoveKind::Promotion => counts.promotions += 1,
        MoveKind::Normal => {}
    }

    let defender = game_state.side_to_move;
    if is_king_in_check(&game_state.board, defender)? {
        counts.checks += 1;
        if !has_any_legal_move(game_state, defender)? {
            counts.checkmates += 1;
        }
    }
    Ok(())
}
