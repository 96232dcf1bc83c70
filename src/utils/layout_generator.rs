//! Layout and position-string serialisation, the inverse of `layout_parser`.

use crate::game_state::board::{Board, MAILBOX64};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::index_to_coordinate;

pub fn generate_layout(board: &Board) -> String {
    let mut out = String::new();

    for row in 0..8 {
        let mut empty_count = 0u8;

        for col in 0..8 {
            match board.piece_at(MAILBOX64[row * 8 + col]) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.to_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

/// `<layout> <side> <castling> <en-passant>`, the inverse of `parse_position`.
pub fn generate_position(game_state: &GameState) -> String {
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };

    format!(
        "{} {} {} {}",
        generate_layout(&game_state.board),
        side_to_move,
        generate_castling_field(game_state.castling_rights),
        generate_en_passant_field(game_state.en_passant_square)
    )
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();
    if (rights & CASTLE_LIGHT_KINGSIDE) != 0 {
        out.push('K');
    }
    if (rights & CASTLE_LIGHT_QUEENSIDE) != 0 {
        out.push('Q');
    }
    if (rights & CASTLE_DARK_KINGSIDE) != 0 {
        out.push('k');
    }
    if (rights & CASTLE_DARK_QUEENSIDE) != 0 {
        out.push('q');
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    square
        .and_then(|sq| index_to_coordinate(sq).ok())
        .unwrap_or_else(|| "-".to_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{generate_layout, generate_position};
    use crate::game_state::chess_rules::{CLASSIC_LAYOUT, ELEMENTAL_LAYOUT};
    use crate::game_state::game_state::GameState;
    use crate::utils::layout_parser::parse_layout;

    #[test]
    fn starting_layouts_serialize_back_unchanged() {
        for layout in [CLASSIC_LAYOUT, ELEMENTAL_LAYOUT, "4k3/8/8/3pP3/8/8/8/R3K2R"] {
            let board = parse_layout(layout).expect("layout should parse");
            assert_eq!(generate_layout(&board), layout);
        }
    }

    #[test]
    fn position_string_carries_rights_and_target() {
        let position = "4k3/8/8/3pP3/8/8/8/R3K2R w Kq d6";
        let game = GameState::from_position(position).expect("position should parse");
        assert_eq!(generate_position(&game), position);

        let fresh = GameState::new_elemental();
        assert_eq!(
            generate_position(&fresh),
            format!("{ELEMENTAL_LAYOUT} w KQkq -")
        );
    }
}
