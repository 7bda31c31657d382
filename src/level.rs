//! Mutable state of the level being played.

use glam::IVec2;
use tracing::debug;

use crate::actor::Actor;
use crate::bonus::Bonus;
use crate::config::{validate_level_number, GameConfig};
use crate::constants::{tables, TICKS_PER_FLASH};
use crate::error::GameResult;
use crate::gatekeeper::GateKeeper;
use crate::ghost::{Ghost, Personality};
use crate::hunting::HuntingTimer;
use crate::map::{direction::Direction, tile_center, WorldMap};
use crate::power::PowerTimer;

/// Number of flashes of frightened ghosts before power mode ends at a level.
pub fn number_of_flashes(level_number: u32) -> u32 {
    let index = (level_number.max(1) as usize - 1).min(tables::NUM_FLASHES.len() - 1);
    tables::NUM_FLASHES[index] as u32
}

/// A level: map, actors and all per-level timers and counters.
///
/// Built once per level start and replaced on level transition.
#[derive(Debug, Clone)]
pub struct Level {
    number: u32,
    pub map: WorldMap,
    pub player: Actor,
    /// Indexed by personality id.
    pub ghosts: Vec<Ghost>,
    pub bonus: Option<Bonus>,
    /// Bonuses activated so far in this level.
    pub bonus_count: u32,
    pub hunting: HuntingTimer,
    pub gatekeeper: GateKeeper,
    pub power: PowerTimer,
    /// Ghosts eaten during the current power window, in order.
    pub ghosts_eaten_in_window: Vec<Personality>,
    /// Ticks since the player last ate.
    pub starvation_ticks: u32,
    pub player_dead: bool,
    pub immunity: bool,
}

impl Level {
    /// Builds a level on the given map.
    ///
    /// # Errors
    ///
    /// Fails if the level number is outside `1..=32`.
    pub fn new(number: u32, map: WorldMap, config: &GameConfig) -> GameResult<Self> {
        validate_level_number(number)?;

        let ghosts = Personality::ALL
            .iter()
            .map(|&p| Ghost::new(p, map.house(), map.width(), map.height()))
            .collect();
        let player = Actor::new(tile_center(map.player_start()) + glam::Vec2::new(4.0, 0.0), Direction::Left);
        let fade_ticks = number_of_flashes(number) * TICKS_PER_FLASH;

        debug!(level_number = number, fade_ticks, food = map.total_food(), "Level created");

        Ok(Self {
            number,
            map,
            player,
            ghosts,
            bonus: None,
            bonus_count: 0,
            hunting: HuntingTimer::for_level(number),
            gatekeeper: GateKeeper::for_level(number),
            power: PowerTimer::new(fade_ticks),
            ghosts_eaten_in_window: Vec::new(),
            starvation_ticks: 0,
            player_dead: false,
            immunity: config.immunity,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn ghost(&self, personality: Personality) -> &Ghost {
        &self.ghosts[personality.id() as usize]
    }

    pub fn ghost_mut(&mut self, personality: Personality) -> &mut Ghost {
        &mut self.ghosts[personality.id() as usize]
    }

    pub fn is_completed(&self) -> bool {
        self.map.food_remaining() == 0
    }

    /// Puts player and ghosts back at their start positions after a life was
    /// lost. Food, counters and the bonus count are kept.
    pub fn reset_actors(&mut self) {
        let map = &self.map;
        self.player = Actor::new(tile_center(map.player_start()) + glam::Vec2::new(4.0, 0.0), Direction::Left);
        self.ghosts = Personality::ALL
            .iter()
            .map(|&p| Ghost::new(p, map.house(), map.width(), map.height()))
            .collect();
        self.bonus = None;
        self.power.stop();
        self.hunting.reset();
        self.gatekeeper.reset_after_death();
        self.ghosts_eaten_in_window.clear();
        self.starvation_ticks = 0;
        self.player_dead = false;
    }

    /// Tile the player is standing on.
    pub fn player_tile(&self) -> IVec2 {
        self.player.tile()
    }
}
