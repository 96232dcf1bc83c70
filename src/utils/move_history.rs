//! Human-readable move history lines.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::index_to_coordinate;

pub const EMPTY_HISTORY: &str = "No moves have been made yet.";

/// `"<piece> from <from> to <to>[, capturing <piece>]"`, pieces as letters.
pub fn format_move(entry: &HistoryEntry) -> ChessResult<String> {
    let mut line = format!(
        "{} from {} to {}",
        entry.piece.to_char(),
        index_to_coordinate(entry.from)?,
        index_to_coordinate(entry.to)?
    );
    if let Some(captured) = entry.captured {
        line.push_str(", capturing ");
        line.push(captured.to_char());
    }
    Ok(line)
}

/// Numbered history, one move per line.
pub fn format_history(history: &[HistoryEntry]) -> ChessResult<String> {
    if history.is_empty() {
        return Ok(EMPTY_HISTORY.to_owned());
    }

    let lines = history
        .iter()
        .enumerate()
        .map(|(i, entry)| Ok(format!("{}. {}", i + 1, format_move(entry)?)))
        .collect::<ChessResult<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{format_history, EMPTY_HISTORY};
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::parse_move_request;

    #[test]
    fn empty_history_has_a_placeholder() {
        assert_eq!(format_history(&[]), Ok(EMPTY_HISTORY.to_owned()));
    }

    #[test]
    fn captures_are_named_and_lines_numbered() {
        let mut game = GameState::new_classic();
        for request in ["e2e4", "d7d5", "e4d5"] {
            game.apply_move(parse_move_request(request).expect("test move should parse"))
                .expect("scripted move should be legal");
        }
        assert_eq!(
            format_history(&game.history).expect("history should format"),
            "1. P from e2 to e4\n2. p from d7 to d5\n3. P from e4 to d5, capturing p"
        );
    }
}
