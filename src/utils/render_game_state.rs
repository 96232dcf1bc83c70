//! Terminal board renderer.
//!
//! Pieces print as their layout letters (uppercase Light, lowercase Dark) so
//! the elemental kinds need no special glyphs.

use crate::game_state::board::MAILBOX64;
use crate::game_state::{chess_types::*, game_state::GameState};

pub fn render_game_state(game_state: &GameState) -> String {
    render_with_highlights(game_state, &[])
}

/// Render the board with `highlights` marked: `*` on an empty square, `x` on
/// an occupied one (a capture).
pub fn render_with_highlights(game_state: &GameState, highlights: &[Square]) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8 {
        let rank = char::from(b'8' - row as u8);
        out.push(rank);
        out.push(' ');

        for file in 0..8 {
            let sq = MAILBOX64[row * 8 + file];
            let marked = highlights.contains(&sq);
            let ch = match (game_state.board.piece_at(sq), marked) {
                (Some(_), true) => 'x',
                (Some(piece), false) => piece.to_char(),
                (None, true) => '*',
                (None, false) => '.',
            };
            out.push(ch);

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{render_game_state, render_with_highlights};
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::coordinate_to_index;

    #[test]
    fn elemental_start_renders_letters() {
        let expected = concat!(
            "  a b c d e f g h\n",
            "8 r f b e k a n w 8\n",
            "7 p p p p p p p p 7\n",
            "6 . . . . . . . . 6\n",
            "5 . . . . . . . . 5\n",
            "4 . . . . . . . . 4\n",
            "3 . . . . . . . . 3\n",
            "2 P P P P P P P P 2\n",
            "1 R F B E K A N W 1\n",
            "  a b c d e f g h",
        );
        assert_eq!(render_game_state(&GameState::new_elemental()), expected);
    }

    #[test]
    fn highlights_mark_targets_and_captures() {
        let game = GameState::from_position("4k3/8/8/8/8/8/3p4/4K3 w - -")
            .expect("position should parse");
        let marks = ["d1", "d2"].map(|c| coordinate_to_index(c).expect("test coordinate should parse"));
        let rendered = render_with_highlights(&game, &marks);
        assert!(rendered.contains("2 . . . x . . . . 2"));
        assert!(rendered.contains("1 . . . * K . . . 1"));
    }
}
