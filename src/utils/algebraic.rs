//! Coordinate conversions between algebraic squares (`e4`) and mailbox
//! indices.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::{MAILBOX120, MAILBOX64};
use crate::game_state::chess_types::{ChessMove, PieceKind, Square};

/// Convert algebraic notation (for example: "e4") to a mailbox index.
pub fn coordinate_to_index(coordinate: &str) -> ChessResult<Square> {
    let bytes = coordinate.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidCoordinate(coordinate.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidCoordinate(coordinate.to_owned()));
    }

    let row = usize::from(b'8' - rank);
    let col = usize::from(file - b'a');
    Ok(MAILBOX64[row * 8 + col])
}

/// Convert a mailbox index back to algebraic notation.
pub fn index_to_coordinate(square: Square) -> ChessResult<String> {
    let idx64 = *MAILBOX120
        .get(square as usize)
        .ok_or(ChessError::InvalidSquareIndex(square))?;
    if idx64 < 0 {
        return Err(ChessError::InvalidSquareIndex(square));
    }

    let file = idx64 as u8 % 8;
    let rank = 8 - idx64 as u8 / 8;
    Ok(format!("{}{}", char::from(b'a' + file), rank))
}

/// Parse a move request such as `e2e4` or `e2 e4`, optionally followed by a
/// promotion letter (`a7a8q`).
pub fn parse_move_request(request: &str) -> ChessResult<ChessMove> {
    let compact: String = request.split_whitespace().collect();
    let invalid = || ChessError::InvalidCoordinate(request.trim().to_owned());
    if !(4..=5).contains(&compact.len()) || !compact.is_ascii() {
        return Err(invalid());
    }
    let from = coordinate_to_index(&compact[..2])?;
    let to = coordinate_to_index(&compact[2..4])?;
    match compact[4..].chars().next() {
        None => Ok(ChessMove::new(from, to)),
        Some(letter) => {
            let kind = PieceKind::from_letter(letter).ok_or_else(invalid)?;
            Ok(ChessMove::with_promotion(from, to, kind))
        }
    }
}

/// Render a move as a pair of coordinates, e.g. `("e2", "e4")`.
pub fn move_to_coordinates(mv: ChessMove) -> ChessResult<(String, String)> {
    Ok((index_to_coordinate(mv.from)?, index_to_coordinate(mv.to)?))
}

#[cfg(test)]
mod tests {
    use super::{coordinate_to_index, index_to_coordinate, parse_move_request};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::board::playable_squares;

    #[test]
    fn corner_squares_map_to_mailbox_corners() {
        assert_eq!(coordinate_to_index("a8").expect("a8 should parse"), 21);
        assert_eq!(coordinate_to_index("h8").expect("h8 should parse"), 28);
        assert_eq!(coordinate_to_index("a1").expect("a1 should parse"), 91);
        assert_eq!(coordinate_to_index("h1").expect("h1 should parse"), 98);
        assert_eq!(coordinate_to_index("e4").expect("e4 should parse"), 65);
    }

    #[test]
    fn every_playable_square_round_trips() {
        for square in playable_squares() {
            let coordinate = index_to_coordinate(square).expect("playable square should convert");
            assert_eq!(
                coordinate_to_index(&coordinate).expect("coordinate should parse"),
                square
            );
        }
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        for bad in ["", "e", "e9", "i1", "E2", "e0", "e22", "é1"] {
            assert_eq!(
                coordinate_to_index(bad),
                Err(ChessError::InvalidCoordinate(bad.to_owned())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn border_indices_do_not_convert() {
        assert_eq!(index_to_coordinate(0), Err(ChessError::InvalidSquareIndex(0)));
        assert_eq!(index_to_coordinate(30), Err(ChessError::InvalidSquareIndex(30)));
        assert_eq!(index_to_coordinate(200), Err(ChessError::InvalidSquareIndex(200)));
    }

    #[test]
    fn move_requests_accept_compact_and_spaced_forms() {
        let compact = parse_move_request("e2e4").expect("compact form should parse");
        let spaced = parse_move_request(" e2  e4 ").expect("spaced form should parse");
        assert_eq!(compact, spaced);
        assert_eq!((compact.from, compact.to), (85, 65));
        assert!(parse_move_request("e2e9").is_err());
        assert!(parse_move_request("e2").is_err());
    }

    #[test]
    fn trailing_letter_requests_a_promotion() {
        let mv = parse_move_request("a7a8w").expect("promotion request should parse");
        assert_eq!(mv.promotion, Some(PieceKind::Water));
        assert_eq!((mv.from, mv.to), (31, 21));
        assert!(parse_move_request("a7a8z").is_err());
        assert!(parse_move_request("a7a8qq").is_err());
    }
}
