//! Layout and position-string parsing.
//!
//! A layout is 8 `/`-separated ranks (rank 8 first) of piece letters and
//! digit runs of empty squares. A position string is a layout optionally
//! followed by side to move, castling rights and en-passant target, in the
//! FEN manner (`<layout> w KQkq -`). Parsing is all-or-nothing: the whole
//! string is validated before a board is built.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::{Board, MAILBOX64};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::coordinate_to_index;

const LAYOUT_CHARS: &str = "prnbqkfweaPRNBQKFWEA12345678/";

/// Board, side and rights decoded from a position string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPosition {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
}

pub fn validate_layout(layout: &str) -> ChessResult<()> {
    if layout.is_empty() {
        return Err(ChessError::InvalidLayout("layout is empty".to_owned()));
    }
    if let Some(ch) = layout.chars().find(|ch| !LAYOUT_CHARS.contains(*ch)) {
        return Err(ChessError::InvalidLayout(format!(
            "unrecognized character '{ch}'"
        )));
    }

    let ranks: Vec<&str> = layout.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidLayout(format!(
            "expected 8 ranks, received {}",
            ranks.len()
        )));
    }

    for (i, rank) in ranks.iter().enumerate() {
        let count: u32 = rank
            .chars()
            .map(|ch| ch.to_digit(10).unwrap_or(1))
            .sum();
        if count != 8 {
            return Err(ChessError::InvalidLayout(format!(
                "rank {} describes {count} squares",
                8 - i
            )));
        }
    }

    Ok(())
}

pub fn parse_layout(layout: &str) -> ChessResult<Board> {
    validate_layout(layout)?;

    let mut board = Board::empty();
    let mut idx64 = 0usize;
    for ch in layout.chars() {
        if ch == '/' {
            continue;
        }
        if let Some(run) = ch.to_digit(10) {
            idx64 += run as usize;
            continue;
        }
        let piece = Piece::from_char(ch)
            .ok_or_else(|| ChessError::InvalidLayout(format!("unrecognized character '{ch}'")))?;
        board.place_piece(piece, MAILBOX64[idx64])?;
        idx64 += 1;
    }

    Ok(board)
}

/// Parse `<layout> [side [castling [en-passant]]]`. Missing fields default to
/// Light to move, all castling rights, and no en-passant target.
pub fn parse_position(position: &str) -> ChessResult<ParsedPosition> {
    let mut parts = position.split_whitespace();
    let layout = parts
        .next()
        .ok_or_else(|| ChessError::InvalidLayout("position is empty".to_owned()))?;

    let side_to_move = parts.next().map(parse_side_to_move).transpose()?;
    let castling_rights = parts.next().map(parse_castling_rights).transpose()?;
    let en_passant_square = parts.next().map(parse_en_passant_square).transpose()?;

    if let Some(extra) = parts.next() {
        return Err(ChessError::InvalidLayout(format!(
            "unexpected trailing field '{extra}'"
        )));
    }

    Ok(ParsedPosition {
        board: parse_layout(layout)?,
        side_to_move: side_to_move.unwrap_or(Color::Light),
        castling_rights: castling_rights.unwrap_or(CASTLE_ALL),
        en_passant_square: en_passant_square.flatten(),
    })
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessError::InvalidLayout(format!(
            "invalid side-to-move field '{side_part}'"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => {
                return Err(ChessError::InvalidLayout(format!(
                    "invalid castling rights character '{ch}'"
                )))
            }
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    coordinate_to_index(en_passant_part)
        .map(Some)
        .map_err(|_| ChessError::InvalidLayout(format!("invalid en-passant square '{en_passant_part}'")))
}
