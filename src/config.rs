//! Game variant configuration.
//!
//! Plain struct fields with explicit, validating setters. A [`GameConfig`] can
//! also be loaded from `PACMAN_`-prefixed environment variables.

use figment::{providers::Env, Figment};
use serde::Deserialize;
use strum_macros::{AsRefStr, EnumIter};
use tracing::debug;

use crate::constants::{DEFAULT_LIVES, MAX_LEVEL_NUMBER, MIN_LEVEL_NUMBER};
use crate::error::{GameError, GameResult};
use crate::map::MapCategory;

/// Difficulty setting, shifting all actor speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, AsRefStr, EnumIter)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Crazy,
}

/// Fails with a configuration error unless the level number is playable.
pub fn validate_level_number(level_number: u32) -> GameResult<()> {
    if (MIN_LEVEL_NUMBER..=MAX_LEVEL_NUMBER).contains(&level_number) {
        Ok(())
    } else {
        Err(GameError::InvalidLevelNumber(level_number))
    }
}

/// Settings of one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    difficulty: Difficulty,
    map_category: MapCategory,
    start_level_number: u32,
    initial_lives: u8,
    /// Ghosts cannot kill the player.
    pub immunity: bool,
    /// Demo levels do not touch the score ledger.
    pub demo: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            map_category: MapCategory::Arcade,
            start_level_number: MIN_LEVEL_NUMBER,
            initial_lives: DEFAULT_LIVES,
            immunity: false,
            demo: false,
        }
    }
}

impl GameConfig {
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn map_category(&self) -> MapCategory {
        self.map_category
    }

    pub fn set_map_category(&mut self, category: MapCategory) {
        self.map_category = category;
    }

    pub fn start_level_number(&self) -> u32 {
        self.start_level_number
    }

    /// Sets the level a new game starts at.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidLevelNumber`] outside `1..=32`.
    pub fn set_start_level_number(&mut self, level_number: u32) -> GameResult<()> {
        validate_level_number(level_number)?;
        self.start_level_number = level_number;
        Ok(())
    }

    pub fn initial_lives(&self) -> u8 {
        self.initial_lives
    }

    pub fn set_initial_lives(&mut self, lives: u8) -> GameResult<()> {
        if lives == 0 {
            return Err(GameError::InvalidConfig("a game needs at least one life".into()));
        }
        self.initial_lives = lives;
        Ok(())
    }

    /// Loads the configuration from `PACMAN_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> GameResult<Self> {
        let raw: RawConfig = Figment::new()
            .merge(Env::prefixed("PACMAN_"))
            .extract()
            .map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        let config = GameConfig::try_from(raw)?;
        debug!(?config, "Configuration loaded from environment");
        Ok(config)
    }
}

/// Configuration values as read from the environment, before validation.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    difficulty: Option<Difficulty>,
    map_category: Option<MapCategory>,
    start_level: Option<u32>,
    lives: Option<u8>,
    #[serde(default)]
    immunity: bool,
    #[serde(default)]
    demo: bool,
}

impl TryFrom<RawConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawConfig) -> GameResult<Self> {
        let mut config = GameConfig::default();
        if let Some(difficulty) = raw.difficulty {
            config.set_difficulty(difficulty);
        }
        if let Some(category) = raw.map_category {
            config.set_map_category(category);
        }
        if let Some(level) = raw.start_level {
            config.set_start_level_number(level)?;
        }
        if let Some(lives) = raw.lives {
            config.set_initial_lives(lives)?;
        }
        config.immunity = raw.immunity;
        config.demo = raw.demo;
        Ok(config)
    }
}
