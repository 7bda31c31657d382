//! Ghost identities, states and the per-ghost bookkeeping of a level.

use glam::{IVec2, Vec2};
use strum_macros::{AsRefStr, EnumIter};
use tracing::debug;

use crate::actor::Actor;
use crate::error::{GameError, GameResult};
use crate::map::{direction::Direction, House};

/// The four classic ghost personalities.
///
/// Personalities differ only in their chase target, their scatter corner, and a
/// small speed offset that keeps ghosts sharing a tile apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Personality {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl Personality {
    pub const ALL: [Personality; 4] = [
        Personality::Blinky,
        Personality::Pinky,
        Personality::Inky,
        Personality::Clyde,
    ];

    /// Looks up a personality by its numeric id (0..=3).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPersonality`] for any other id.
    pub fn from_id(id: u8) -> GameResult<Self> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(GameError::InvalidPersonality(id))
    }

    pub const fn id(self) -> u8 {
        match self {
            Personality::Blinky => 0,
            Personality::Pinky => 1,
            Personality::Inky => 2,
            Personality::Clyde => 3,
        }
    }

    /// Fixed corner tile targeted during scatter phases.
    pub fn scatter_tile(self, map_width: i32, map_height: i32) -> IVec2 {
        match self {
            Personality::Blinky => IVec2::new(map_width - 3, -3),
            Personality::Pinky => IVec2::new(2, -3),
            Personality::Inky => IVec2::new(map_width - 1, map_height),
            Personality::Clyde => IVec2::new(0, map_height),
        }
    }
}

/// The state of a single ghost. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum GhostState {
    /// Waiting inside the house for the gate keeper.
    Locked,
    LeavingHouse,
    HuntingPac,
    Frightened,
    /// Just eaten; frozen while its value is displayed.
    Eaten,
    ReturningHome,
    EnteringHouse,
}

/// A ghost and its per-level state.
#[derive(Debug, Clone)]
pub struct Ghost {
    pub personality: Personality,
    pub actor: Actor,
    state: GhostState,
    /// Set by the hunting scheduler or power mode; consumed at the next decision point.
    pub reverse_at_next_occasion: bool,
    /// Ticks spent in the current state.
    pub state_ticks: u32,
    pub scatter_tile: IVec2,
    /// Where the ghost waits and is revived inside the house.
    pub revival_position: Vec2,
}

impl Ghost {
    /// Creates a ghost at its start position: the first personality waits
    /// outside the house, the others are locked inside.
    pub fn new(personality: Personality, house: &House, map_width: i32, map_height: i32) -> Self {
        let (position, direction, state) = match personality {
            Personality::Blinky => (house.entry_position(), Direction::Left, GhostState::HuntingPac),
            Personality::Pinky => (house.seat(personality), Direction::Down, GhostState::Locked),
            Personality::Inky | Personality::Clyde => (house.seat(personality), Direction::Up, GhostState::Locked),
        };
        Self {
            personality,
            actor: Actor::new(position, direction),
            state,
            reverse_at_next_occasion: false,
            state_ticks: 0,
            scatter_tile: personality.scatter_tile(map_width, map_height),
            revival_position: house.seat(personality),
        }
    }

    pub fn state(&self) -> GhostState {
        self.state
    }

    pub fn in_state(&self, states: &[GhostState]) -> bool {
        states.contains(&self.state)
    }

    pub fn set_state(&mut self, state: GhostState) {
        if self.state != state {
            debug!(ghost = self.personality.as_ref(), from = ?self.state, to = ?state, "Ghost state changed");
            self.state = state;
            self.state_ticks = 0;
        }
    }

    pub fn tile(&self) -> IVec2 {
        self.actor.tile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;
    use crate::map::WorldMap;

    #[test]
    fn test_personality_from_id() {
        for (id, personality) in Personality::ALL.iter().enumerate() {
            assert_eq!(Personality::from_id(id as u8).unwrap(), *personality);
            assert_eq!(personality.id(), id as u8);
        }
        assert!(matches!(Personality::from_id(4), Err(GameError::InvalidPersonality(4))));
    }

    #[test]
    fn test_initial_states() {
        let map = WorldMap::from_board(&RAW_BOARD).unwrap();
        let blinky = Ghost::new(Personality::Blinky, map.house(), map.width(), map.height());
        let clyde = Ghost::new(Personality::Clyde, map.house(), map.width(), map.height());
        assert_eq!(blinky.state(), GhostState::HuntingPac);
        assert_eq!(blinky.actor.position, map.house().entry_position());
        assert_eq!(clyde.state(), GhostState::Locked);
        assert!(map.house().contains(clyde.tile()));
    }

    #[test]
    fn test_set_state_resets_ticks() {
        let map = WorldMap::from_board(&RAW_BOARD).unwrap();
        let mut ghost = Ghost::new(Personality::Inky, map.house(), map.width(), map.height());
        ghost.state_ticks = 10;
        ghost.set_state(GhostState::LeavingHouse);
        assert_eq!(ghost.state_ticks, 0);
        assert!(ghost.in_state(&[GhostState::LeavingHouse, GhostState::Locked]));
    }
}
