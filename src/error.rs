//! Centralized error types for the simulation core.
//!
//! Every variant of [`GameError`] other than the map errors is a configuration
//! error: it indicates a programming or content-authoring mistake and is raised
//! while a level or game is being constructed, never in the middle of a tick.

use crate::map::MapCategory;

/// Main error type for the simulation core.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Illegal level number: {0} (must be in 1..=32)")]
    InvalidLevelNumber(u32),

    #[error("Illegal ghost personality id: {0}")]
    InvalidPersonality(u8),

    #[error("Illegal map selection: category {category:?} has no map number {number}")]
    InvalidMapSelection { category: MapCategory, number: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("High score store error: {0}")]
    HighScore(String),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Unknown character in board: {0}")]
    UnknownCharacter(char),
    #[error("House door must have exactly 2 positions, found {0}")]
    InvalidHouseDoorCount(usize),
    #[error("Board rows must all have the same width (row {row} has {found}, expected {expected})")]
    RaggedRow { row: usize, found: usize, expected: usize },
    #[error("Board is empty")]
    Empty,
}

/// Errors related to map operations.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("Tile out of bounds: ({0}, {1})")]
    OutOfBounds(i32, i32),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
