//! Authoritative game model.
//!
//! `GameState` owns the board together with the turn, castling and
//! en-passant flags and the undo/redo stacks. All mutation goes through
//! `make_move` / `unmake_move`; this type adds turn ownership, legality
//! checks, promotion hand-off and history bookkeeping on top.

use log::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{CLASSIC_LAYOUT, ELEMENTAL_LAYOUT, PROMOTION_KINDS};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, remake_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    all_moves, has_any_legal_move, is_legal_move, legal_destinations,
};
use crate::utils::algebraic::index_to_coordinate;
use crate::utils::layout_generator::generate_position;
use crate::utils::layout_parser::{parse_layout, parse_position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// The side to move is in check but has a reply.
    Check(Color),
    /// The side to move is mated; the other side wins.
    Checkmate(Color),
    Stalemate,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    /// Square of a pawn waiting for `promote`.
    pub pending_promotion: Option<Square>,

    pub history: Vec<HistoryEntry>,
    pub redo_stack: Vec<HistoryEntry>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            pending_promotion: None,
            history: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_classic() -> Self {
        Self::from_layout(CLASSIC_LAYOUT).expect("classic layout should always parse")
    }

    #[inline]
    pub fn new_elemental() -> Self {
        Self::from_layout(ELEMENTAL_LAYOUT).expect("elemental layout should always parse")
    }

    /// Fresh game from a bare layout: Light to move, every castling right.
    pub fn from_layout(layout: &str) -> ChessResult<Self> {
        let board = parse_layout(layout)?;
        validate_kings(&board)?;
        Ok(Self {
            board,
            castling_rights: CASTLE_ALL,
            ..Self::default()
        })
    }

    /// Game from a position string: `<layout> [side [castling [en-passant]]]`.
    pub fn from_position(position: &str) -> ChessResult<Self> {
        let parsed = parse_position(position)?;
        validate_kings(&parsed.board)?;
        Ok(Self {
            board: parsed.board,
            side_to_move: parsed.side_to_move,
            castling_rights: parsed.castling_rights,
            en_passant_square: parsed.en_passant_square,
            ..Self::default()
        })
    }

    #[inline]
    pub fn to_position_string(&self) -> String {
        generate_position(self)
    }

    /// Copy of the position without history, for search to mutate freely.
    pub fn detached_copy(&self) -> Self {
        Self {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
            pending_promotion: self.pending_promotion,
            history: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    #[inline]
    pub fn toggle_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    pub fn legal_moves(&self, from: Square) -> ChessResult<Vec<Square>> {
        legal_destinations(self, from)
    }

    pub fn all_moves(&self, color: Color) -> ChessResult<Vec<ChessMove>> {
        all_moves(self, color)
    }

    /// Apply a move for the side to move. On success the turn passes to the
    /// opponent, unless a pawn now waits on the far rank for `promote`.
    ///
    /// Rejected requests leave the state untouched.
    pub fn apply_move(&mut self, mv: ChessMove) -> ChessResult<HistoryEntry> {
        if self.pending_promotion.is_some() {
            return Err(ChessError::PromotionPending);
        }

        let piece = self
            .board
            .piece_at(mv.from)
            .ok_or_else(|| ChessError::EmptySquare(coordinate(mv.from)))?;
        if piece.color != self.side_to_move {
            return Err(ChessError::NotYourTurn(piece.color));
        }
        if !is_legal_move(self, mv.from, mv.to)? {
            return Err(ChessError::IllegalMove {
                from: coordinate(mv.from),
                to: coordinate(mv.to),
            });
        }

        let entry = make_move(self, mv)?;
        debug!(
            "{} {} {} -> {} ({:?})",
            piece.color.name(),
            piece.to_char(),
            coordinate(mv.from),
            coordinate(mv.to),
            entry.kind
        );

        self.history.push(entry.clone());
        self.redo_stack.clear();
        if self.pending_promotion.is_none() {
            self.toggle_turn();
        }
        Ok(entry)
    }

    /// Complete a pending promotion and pass the turn.
    pub fn promote(&mut self, kind: PieceKind) -> ChessResult<()> {
        let square = self
            .pending_promotion
            .ok_or(ChessError::NoPromotionPending)?;
        if !PROMOTION_KINDS.contains(&kind) {
            return Err(ChessError::InvalidPromotion(kind));
        }

        self.board
            .place_piece(Piece::new(self.side_to_move, kind), square)?;
        if let Some(last) = self.history.last_mut() {
            last.promoted_to = Some(kind);
        }
        self.pending_promotion = None;
        self.toggle_turn();
        Ok(())
    }

    /// Take back the last move. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> ChessResult<Option<HistoryEntry>> {
        let Some(entry) = self.history.pop() else {
            return Ok(None);
        };

        unmake_move(self, &entry)?;
        self.side_to_move = entry.piece.color;
        self.redo_stack.push(entry.clone());
        Ok(Some(entry))
    }

    /// Re-apply the most recently undone move.
    pub fn redo(&mut self) -> ChessResult<Option<HistoryEntry>> {
        if self.pending_promotion.is_some() {
            return Err(ChessError::PromotionPending);
        }
        let Some(undone) = self.redo_stack.pop() else {
            return Ok(None);
        };

        let entry = remake_move(self, &undone)?;
        self.side_to_move = entry.piece.color;
        if self.pending_promotion.is_none() {
            self.toggle_turn();
        }
        self.history.push(entry.clone());
        Ok(Some(entry))
    }

    pub fn is_in_check(&self, color: Color) -> ChessResult<bool> {
        is_king_in_check(&self.board, color)
    }

    pub fn has_legal_move(&self, color: Color) -> ChessResult<bool> {
        has_any_legal_move(self, color)
    }

    pub fn is_checkmate(&self, color: Color) -> ChessResult<bool> {
        Ok(self.is_in_check(color)? && !self.has_legal_move(color)?)
    }

    pub fn is_stalemate(&self, color: Color) -> ChessResult<bool> {
        Ok(!self.is_in_check(color)? && !self.has_legal_move(color)?)
    }

    /// Status from the point of view of the side to move.
    pub fn status(&self) -> ChessResult<GameStatus> {
        let color = self.side_to_move;
        let in_check = self.is_in_check(color)?;
        let can_move = self.has_legal_move(color)?;
        Ok(match (in_check, can_move) {
            (true, false) => GameStatus::Checkmate(color),
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check(color),
            (false, true) => GameStatus::InProgress,
        })
    }
}

fn validate_kings(board: &Board) -> ChessResult<()> {
    for color in [Color::Light, Color::Dark] {
        let kings = board.count_pieces(Piece::new(color, PieceKind::King));
        if kings != 1 {
            return Err(ChessError::InvalidLayout(format!(
                "{} must have exactly one king, found {kings}",
                color.name()
            )));
        }
    }
    Ok(())
}

fn coordinate(square: Square) -> String {
    index_to_coordinate(square).unwrap_or_else(|_| square.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    use super::GameStatus;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::utils::algebraic::{coordinate_to_index, parse_move_request};

    fn mv(request: &str) -> ChessMove {
        parse_move_request(request).expect("test move should parse")
    }

    fn sq(coordinate: &str) -> Square {
        coordinate_to_index(coordinate).expect("test coordinate should parse")
    }

    fn play(game: &mut GameState, moves: &[&str]) {
        for request in moves {
            game.apply_move(mv(request))
                .unwrap_or_else(|err| panic!("{request} should be legal: {err}"));
        }
    }

    #[test]
    fn starting_games_have_both_kings_and_all_rights() {
        for game in [GameState::new_classic(), GameState::new_elemental()] {
            assert_eq!(game.board.find_king(Color::Light), Ok(95));
            assert_eq!(game.board.find_king(Color::Dark), Ok(25));
            assert_eq!(game.castling_rights, CASTLE_ALL);
            assert_eq!(game.board.pieces().count(), 32);
        }
    }

    #[test]
    fn fools_mate_is_checkmate_with_no_moves_left() {
        let mut game = GameState::new_classic();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        assert_eq!(game.is_checkmate(Color::Light), Ok(true));
        assert_eq!(game.status(), Ok(GameStatus::Checkmate(Color::Light)));
        for (from, piece) in game.board.pieces() {
            if piece.color == Color::Light {
                assert_eq!(game.legal_moves(from), Ok(vec![]), "{}", piece.to_char());
            }
        }
    }

    #[test]
    fn stalemate_is_not_checkmate() {
        let game = GameState::from_position("7k/5Q2/6K1/8/8/8/8/8 b - -")
            .expect("position should parse");
        assert_eq!(game.is_checkmate(Color::Dark), Ok(false));
        assert_eq!(game.is_stalemate(Color::Dark), Ok(true));
        assert_eq!(game.status(), Ok(GameStatus::Stalemate));
    }

    #[test]
    fn check_is_reported_for_the_side_to_move() {
        let mut game = GameState::new_classic();
        play(&mut game, &["e2e4", "f7f6", "d1h5"]);
        assert_eq!(game.status(), Ok(GameStatus::Check(Color::Dark)));
    }

    #[test]
    fn rejected_moves_leave_the_game_untouched() {
        let mut game = GameState::new_classic();
        let before = game.clone();

        assert_eq!(
            game.apply_move(mv("e2e5")),
            Err(ChessError::IllegalMove {
                from: "e2".to_owned(),
                to: "e5".to_owned()
            })
        );
        assert_eq!(
            game.apply_move(mv("e7e5")),
            Err(ChessError::NotYourTurn(Color::Dark))
        );
        assert_eq!(
            game.apply_move(mv("e4e5")),
            Err(ChessError::EmptySquare("e4".to_owned()))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn layouts_need_exactly_one_king_each() {
        assert!(matches!(
            GameState::from_layout("8/8/8/8/8/8/8/4K3"),
            Err(ChessError::InvalidLayout(_))
        ));
        assert!(matches!(
            GameState::from_layout("4k3/8/8/8/8/8/8/3KK3"),
            Err(ChessError::InvalidLayout(_))
        ));
        assert!(GameState::from_layout("4k3/8/8/8/8/8/8/4K3").is_ok());
    }

    #[test]
    fn en_passant_window_lasts_one_move() {
        let start = "4k3/3p4/8/4P3/8/8/8/4K3 b - -";

        let mut game = GameState::from_position(start).expect("position should parse");
        play(&mut game, &["d7d5", "e5d6"]);
        assert_eq!(game.board.piece_at(sq("d5")), None);

        let mut game = GameState::from_position(start).expect("position should parse");
        play(&mut game, &["d7d5", "e1e2", "e8e7"]);
        assert_eq!(game.en_passant_square, None);
        assert!(matches!(
            game.apply_move(mv("e5d6")),
            Err(ChessError::IllegalMove { .. })
        ));
    }

    #[test]
    fn promotion_waits_for_a_choice() {
        let mut game = GameState::from_position("4k3/P7/8/8/8/8/8/4K3 w - -")
            .expect("position should parse");
        game.apply_move(mv("a7a8")).expect("promotion move should apply");

        assert_eq!(game.side_to_move, Color::Light);
        assert_eq!(game.apply_move(mv("e1e2")), Err(ChessError::PromotionPending));
        assert_eq!(
            game.promote(PieceKind::King),
            Err(ChessError::InvalidPromotion(PieceKind::King))
        );

        game.promote(PieceKind::Air).expect("air is promotable");
        assert_eq!(game.board.piece_at(sq("a8")), Some(Piece::new(Color::Light, PieceKind::Air)));
        assert_eq!(game.side_to_move, Color::Dark);
        assert_eq!(game.promote(PieceKind::Queen), Err(ChessError::NoPromotionPending));
    }

    #[test]
    fn undo_and_redo_replay_the_promotion_choice() {
        let position = "4k3/P7/8/8/8/8/8/4K3 w - -";
        let mut game = GameState::from_position(position).expect("position should parse");
        game.apply_move(mv("a7a8")).expect("promotion move should apply");
        game.promote(PieceKind::Water).expect("water is promotable");

        game.undo().expect("undo should succeed");
        assert_eq!(game.to_position_string(), position);

        game.redo().expect("redo should succeed");
        assert_eq!(game.board.piece_at(sq("a8")), Some(Piece::new(Color::Light, PieceKind::Water)));
        assert_eq!(game.side_to_move, Color::Dark);
    }

    #[test]
    fn undo_of_a_pending_promotion_restores_the_pawn() {
        let position = "4k3/P7/8/8/8/8/8/4K3 w - -";
        let mut game = GameState::from_position(position).expect("position should parse");
        game.apply_move(mv("a7a8")).expect("promotion move should apply");
        game.undo().expect("undo should succeed");
        assert_eq!(game.to_position_string(), position);
        assert_eq!(game.pending_promotion, None);
    }

    #[test]
    fn new_move_discards_the_redo_stack() {
        let mut game = GameState::new_elemental();
        play(&mut game, &["e2e4"]);
        game.undo().expect("undo should succeed");
        assert_eq!(game.redo_stack.len(), 1);
        play(&mut game, &["d2d4"]);
        assert!(game.redo_stack.is_empty());
        assert_eq!(game.redo(), Ok(None));
    }

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut game = GameState::new_classic();
        assert_eq!(game.undo(), Ok(None));
        assert_eq!(game, GameState::new_classic());
    }

    #[test]
    fn random_walks_stay_legal_and_unwind_exactly() {
        for seed in 0..6u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = if seed % 2 == 0 {
                GameState::new_elemental()
            } else {
                GameState::new_classic()
            };
            let start = game.clone();

            for _ in 0..80 {
                let mover = game.side_to_move;
                let moves = game.all_moves(mover).expect("moves should generate");
                let Some(&choice) = moves.choose(&mut rng) else {
                    break;
                };
                game.apply_move(choice).expect("generated move should apply");
                if game.pending_promotion.is_some() {
                    game.promote(PieceKind::Queen).expect("queen is promotable");
                }
                assert_eq!(is_king_in_check(&game.board, mover), Ok(false));
            }

            let played = game.history.len();
            let end = game.to_position_string();
            while game.undo().expect("undo should succeed").is_some() {}
            assert_eq!(game.to_position_string(), start.to_position_string(), "seed {seed}");
            assert_eq!(game.board, start.board);

            for _ in 0..played {
                game.redo().expect("redo should succeed");
            }
            assert_eq!(game.to_position_string(), end, "seed {seed}");
        }
    }
}
