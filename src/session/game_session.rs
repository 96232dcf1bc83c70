//! Turn and selection state machine.
//!
//! A session owns the authoritative `GameState`, accepts one request at a
//! time from a front end, hands the turn to the bot when it is due and
//! queues `GameEvent`s for rendering. Nothing is applied while the bot turn
//! is pending or a promotion choice is open.

use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_rules::PROMOTION_KINDS;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameStatus;
use crate::session::game_config::{GameConfig, GameMode};
use crate::session::game_events::{board_delta, GameEvent};
use crate::utils::move_history::{format_history, format_move};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingSelection,
    PieceSelected { from: Square, destinations: Vec<Square> },
    PromotionPending(Square),
    BotPending,
    GameOver(GameStatus),
}

pub struct GameSession {
    config: GameConfig,
    game: GameState,
    phase: SessionPhase,
    bot: Option<Box<dyn Engine>>,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> ChessResult<Self> {
        config.validate()?;
        let game = config.starting_position()?;
        let bot = config.build_bot()?;
        let mut session = Self {
            config,
            game,
            phase: SessionPhase::AwaitingSelection,
            bot,
            events: Vec::new(),
        };
        session.refresh_phase()?;
        Ok(session)
    }

    /// Replace the engine driving the bot side.
    pub fn with_bot(mut self, bot: Box<dyn Engine>) -> ChessResult<Self> {
        self.bot = Some(bot);
        self.refresh_phase()?;
        Ok(self)
    }

    /// Start over with the same configuration.
    pub fn new_game(&mut self) -> ChessResult<()> {
        self.game = self.config.starting_position()?;
        if let Some(bot) = self.bot.as_mut() {
            bot.new_game();
        }
        self.events.clear();
        self.events.push(GameEvent::NewGame);
        info!("new {:?} game ({:?})", self.config.variant, self.config.mode);
        self.refresh_phase()
    }

    #[inline]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[inline]
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn history_text(&self) -> ChessResult<String> {
        format_history(&self.game.history)
    }

    pub fn is_bot_turn(&self) -> bool {
        self.bot.is_some()
            && self.config.mode == GameMode::Pvb
            && self.game.side_to_move == self.config.bot_side
    }

    /// Pick up a piece of the side to move. Selecting another own piece
    /// replaces the current selection.
    pub fn select(&mut self, from: Square) -> ChessResult<&[Square]> {
        self.ensure_accepting_input()?;

        let piece = self
            .game
            .board
            .piece_at(from)
            .ok_or_else(|| ChessError::EmptySquare(coordinate(from)))?;
        if piece.color != self.game.side_to_move {
            return Err(ChessError::NotYourTurn(piece.color));
        }
        let destinations = self.game.legal_moves(from)?;

        self.events.push(GameEvent::Selected {
            from,
            destinations: destinations.clone(),
        });
        self.phase = SessionPhase::PieceSelected { from, destinations };
        match &self.phase {
            SessionPhase::PieceSelected { destinations, .. } => Ok(destinations),
            _ => Ok(&[]),
        }
    }

    pub fn deselect(&mut self) {
        if matches!(self.phase, SessionPhase::PieceSelected { .. }) {
            self.phase = SessionPhase::AwaitingSelection;
            self.events.push(GameEvent::SelectionCleared);
        }
    }

    /// Move the selected piece. A destination outside the legal set is
    /// refused and the selection is kept.
    pub fn move_selected_to(&mut self, to: Square) -> ChessResult<()> {
        let SessionPhase::PieceSelected { from, destinations } = &self.phase else {
            self.ensure_accepting_input()?;
            return Err(ChessError::IllegalMove {
                from: "-".to_owned(),
                to: coordinate(to),
            });
        };
        let from = *from;
        if !destinations.contains(&to) {
            return Err(ChessError::IllegalMove {
                from: coordinate(from),
                to: coordinate(to),
            });
        }

        self.apply(ChessMove::new(from, to))
    }

    /// Select and move in one request. An unpromotable piece letter is
    /// refused before anything is applied.
    pub fn request_move(&mut self, mv: ChessMove) -> ChessResult<()> {
        if let Some(kind) = mv.promotion {
            if !PROMOTION_KINDS.contains(&kind) {
                return Err(ChessError::InvalidPromotion(kind));
            }
        }
        self.select(mv.from)?;
        match self.move_selected_to(mv.to) {
            Ok(()) => {}
            Err(err) => {
                self.deselect();
                return Err(err);
            }
        }
        if let (Some(kind), SessionPhase::PromotionPending(_)) = (mv.promotion, &self.phase) {
            self.promote(kind)?;
        }
        Ok(())
    }

    pub fn promote(&mut self, kind: PieceKind) -> ChessResult<()> {
        let SessionPhase::PromotionPending(square) = self.phase else {
            return Err(ChessError::NoPromotionPending);
        };

        let before = self.game.board;
        self.game.promote(kind)?;
        self.events
            .push(GameEvent::SquaresChanged(board_delta(&before, &self.game.board)));
        debug!("promoted on {} to {:?}", coordinate(square), kind);
        self.after_move()
    }

    /// Play the bot's move after the configured pause.
    pub fn run_bot_turn(&mut self) -> ChessResult<()> {
        if self.phase != SessionPhase::BotPending {
            return Err(ChessError::NotYourTurn(self.game.side_to_move));
        }

        if self.config.think_delay_ms > 0 {
            thread::sleep(Duration::from_millis(self.config.think_delay_ms));
        }

        let side = self.game.side_to_move;
        let bot = self.bot.as_mut().ok_or_else(|| {
            ChessError::InvalidConfig("no bot configured for this session".to_owned())
        })?;
        let output = bot.choose_move(&self.game, side)?;
        for line in &output.info_lines {
            debug!("{line}");
        }

        match output.best_move {
            Some(mv) => self.apply(mv),
            None => self.refresh_phase(),
        }
    }

    /// Take back the last move. Against the bot, also takes back the bot's
    /// reply so the human is to move again.
    pub fn undo(&mut self) -> ChessResult<bool> {
        let before = self.game.board;
        if self.game.undo()?.is_none() {
            return Ok(false);
        }
        while self.is_bot_turn() && !self.game.history.is_empty() {
            self.game.undo()?;
        }

        self.events
            .push(GameEvent::SquaresChanged(board_delta(&before, &self.game.board)));
        self.refresh_phase()?;
        Ok(true)
    }

    /// Re-apply undone moves, up to the next human turn against the bot.
    pub fn redo(&mut self) -> ChessResult<bool> {
        if self.phase == SessionPhase::BotPending && self.game.redo_stack.is_empty() {
            return Err(ChessError::BotTurnPending);
        }
        let before = self.game.board;
        if self.game.redo()?.is_none() {
            return Ok(false);
        }
        while self.is_bot_turn() && !self.game.redo_stack.is_empty() {
            self.game.redo()?;
        }

        self.events
            .push(GameEvent::SquaresChanged(board_delta(&before, &self.game.board)));
        self.refresh_phase()?;
        Ok(true)
    }

    fn ensure_accepting_input(&self) -> ChessResult<()> {
        match self.phase {
            SessionPhase::AwaitingSelection | SessionPhase::PieceSelected { .. } => Ok(()),
            SessionPhase::PromotionPending(_) => Err(ChessError::PromotionPending),
            SessionPhase::BotPending => Err(ChessError::BotTurnPending),
            SessionPhase::GameOver(_) => Err(ChessError::GameOver),
        }
    }

    fn apply(&mut self, mv: ChessMove) -> ChessResult<()> {
        let before = self.game.board;
        let entry = self.game.apply_move(mv)?;
        self.events
            .push(GameEvent::SquaresChanged(board_delta(&before, &self.game.board)));

        if let Some(square) = self.game.pending_promotion {
            self.phase = SessionPhase::PromotionPending(square);
            self.events.push(GameEvent::PromotionRequired {
                square,
                color: entry.piece.color,
            });
            return Ok(());
        }
        self.after_move()
    }

    fn after_move(&mut self) -> ChessResult<()> {
        if let Some(entry) = self.game.history.last() {
            let line = format_move(entry)?;
            info!("{}. {line}", self.game.history.len());
            self.events.push(GameEvent::MoveRecorded(line));
        }
        self.events
            .push(GameEvent::TurnChanged(self.game.side_to_move));
        self.refresh_phase()
    }

    /// Recompute the phase from the game and announce check or game end.
    fn refresh_phase(&mut self) -> ChessResult<()> {
        if let Some(square) = self.game.pending_promotion {
            self.phase = SessionPhase::PromotionPending(square);
            return Ok(());
        }

        let status = self.game.status()?;
        match status {
            GameStatus::Checkmate(loser) => {
                info!("checkmate, {} wins", loser.opposite().name());
                self.events.push(GameEvent::Checkmate {
                    winner: loser.opposite(),
                });
            }
            GameStatus::Stalemate => {
                info!("stalemate");
                self.events.push(GameEvent::Stalemate);
            }
            GameStatus::Check(color) => {
                info!("{} is in check", color.name());
                self.events.push(GameEvent::Check(color));
            }
            GameStatus::InProgress => {}
        }

        self.phase = if status.is_terminal() {
            SessionPhase::GameOver(status)
        } else if self.is_bot_turn() {
            self.events
                .push(GameEvent::BotThinking(self.game.side_to_move));
            SessionPhase::BotPending
        } else {
            SessionPhase::AwaitingSelection
        };
        Ok(())
    }
}

fn coordinate(square: Square) -> String {
    crate::utils::algebraic::index_to_coordinate(square).unwrap_or_else(|_| square.to_string())
}
