#![allow(dead_code)]

use glam::IVec2;
use pacman_core::{
    actor::Actor,
    config::GameConfig,
    constants::RAW_BOARD,
    game::Game,
    level::Level,
    map::{direction::Direction, BuiltinMapSelector, WorldMap},
    score::{MemoryHighScoreStore, ScoreLedger},
};
use rand::{rngs::SmallRng, SeedableRng};

pub fn builtin_map() -> WorldMap {
    WorldMap::from_board(&RAW_BOARD).expect("built-in board should parse")
}

pub fn create_level(number: u32) -> Level {
    Level::new(number, builtin_map(), &GameConfig::default()).expect("level should build")
}

pub fn create_ledger() -> ScoreLedger {
    ScoreLedger::new(Box::new(MemoryHighScoreStore::default()))
}

pub fn create_game(config: GameConfig) -> Game {
    Game::new(
        config,
        Box::new(BuiltinMapSelector),
        Box::new(MemoryHighScoreStore::default()),
    )
    .expect("game should build")
}

pub fn seeded_rng() -> SmallRng {
    SmallRng::seed_from_u64(0xC0FFEE)
}

/// The tile the player occupies after its first tick moving left from the start.
pub const PLAYER_FIRST_TILE: IVec2 = IVec2::new(13, 23);

/// An actor placed where the player will be after one tick.
pub fn actor_in_player_path() -> Actor {
    Actor::at_tile(PLAYER_FIRST_TILE, Direction::Left)
}
