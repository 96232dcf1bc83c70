//! Game setup: mode, variant, bot settings.
//!
//! Loaded from JSON; every field is optional and falls back to the
//! defaults below.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_rules::{CLASSIC_LAYOUT, ELEMENTAL_LAYOUT};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans at one terminal.
    #[default]
    Pvp,
    /// Human against the bot.
    Pvb,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Classic,
    #[default]
    Elemental,
}

impl Variant {
    pub const fn layout(self) -> &'static str {
        match self {
            Variant::Classic => CLASSIC_LAYOUT,
            Variant::Elemental => ELEMENTAL_LAYOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    #[default]
    Minimax,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub variant: Variant,
    /// Overrides the variant's starting position. Accepts a bare layout or a
    /// full position string.
    pub layout: Option<String>,
    pub bot_side: Color,
    pub bot_kind: BotKind,
    pub bot_depth: u8,
    /// Pause before the bot searches, in milliseconds.
    pub think_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Pvp,
            variant: Variant::Elemental,
            layout: None,
            bot_side: Color::Dark,
            bot_kind: BotKind::Minimax,
            bot_depth: 3,
            think_delay_ms: 500,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> ChessResult<Self> {
        serde_json::from_str(json).map_err(|e| ChessError::InvalidConfig(e.to_string()))
    }

    pub fn to_json(&self) -> ChessResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ChessError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> ChessResult<()> {
        if self.bot_depth == 0 {
            return Err(ChessError::InvalidConfig(
                "bot_depth must be at least 1".to_owned(),
            ));
        }
        self.starting_position().map(|_| ())
    }

    pub fn starting_position(&self) -> ChessResult<GameState> {
        match &self.layout {
            Some(position) => GameState::from_position(position),
            None => GameState::from_layout(self.variant.layout()),
        }
    }

    /// The engine for the bot side, or `None` outside pvb.
    pub fn build_bot(&self) -> ChessResult<Option<Box<dyn Engine>>> {
        if self.mode != GameMode::Pvb {
            return Ok(None);
        }
        let engine: Box<dyn Engine> = match self.bot_kind {
            BotKind::Minimax => Box::new(MinimaxEngine::new(self.bot_depth)?),
            BotKind::Random => Box::new(RandomEngine::new()),
        };
        Ok(Some(engine))
    }
}
