//! Gate keeper: releases ghosts from the house as the player eats.

use tracing::{debug, trace};

use crate::constants::tables;
use crate::ghost::{Ghost, GhostState, Personality};

/// Cumulative dot counts releasing each personality at a level.
pub fn release_thresholds(level_number: u32) -> [u32; 4] {
    match level_number {
        1 => tables::RELEASE_LEVEL_1,
        2 => tables::RELEASE_LEVEL_2,
        _ => tables::RELEASE_LEVELS_3_PLUS,
    }
}

/// Ticks without eating after which a ghost is released anyway.
pub fn starvation_limit(level_number: u32) -> u32 {
    if level_number < 5 {
        tables::STARVATION_LIMIT_EARLY
    } else {
        tables::STARVATION_LIMIT_LATE
    }
}

/// Why a ghost was let out of the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    DotCounter,
    Starvation,
}

#[derive(Debug, Clone)]
pub struct GateKeeper {
    thresholds: [u32; 4],
    starvation_limit: u32,
    counter: u32,
    /// After a life is lost the global thresholds apply.
    global: bool,
}

impl GateKeeper {
    pub fn new(thresholds: [u32; 4], starvation_limit: u32) -> Self {
        Self {
            thresholds,
            starvation_limit,
            counter: 0,
            global: false,
        }
    }

    pub fn for_level(level_number: u32) -> Self {
        Self::new(release_thresholds(level_number), starvation_limit(level_number))
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    /// Counts one eaten food item.
    pub fn register_food_eaten(&mut self) {
        self.counter += 1;
        trace!(counter = self.counter, "Gate keeper counted food");
    }

    /// Resets the counter after the player lost a life and switches to the
    /// global thresholds so no ghost stays locked forever.
    pub fn reset_after_death(&mut self) {
        self.counter = 0;
        self.global = true;
        debug!("Gate keeper reset to global release thresholds");
    }

    pub fn threshold(&self, personality: Personality) -> u32 {
        let table = if self.global {
            tables::RELEASE_GLOBAL
        } else {
            self.thresholds
        };
        table[personality.id() as usize]
    }

    /// Releases the first locked ghost (in personality order) whose threshold
    /// is met, or any first locked ghost when the player is starving.
    ///
    /// At most one ghost is released per call.
    pub fn check_release(&mut self, ghosts: &mut [Ghost], starvation_ticks: u32) -> Option<(Personality, ReleaseReason)> {
        let prisoner = ghosts
            .iter_mut()
            .filter(|ghost| ghost.state() == GhostState::Locked)
            .min_by_key(|ghost| ghost.personality)?;

        let reason = if self.counter >= self.threshold(prisoner.personality) {
            ReleaseReason::DotCounter
        } else if starvation_ticks >= self.starvation_limit {
            ReleaseReason::Starvation
        } else {
            return None;
        };

        debug!(ghost = prisoner.personality.as_ref(), ?reason, counter = self.counter, "Releasing ghost");
        prisoner.set_state(GhostState::LeavingHouse);
        Some((prisoner.personality, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;
    use crate::map::WorldMap;

    fn ghosts() -> Vec<Ghost> {
        let map = WorldMap::from_board(&RAW_BOARD).unwrap();
        Personality::ALL
            .iter()
            .map(|&p| Ghost::new(p, map.house(), map.width(), map.height()))
            .collect()
    }

    #[test]
    fn test_release_in_order() {
        let mut ghosts = ghosts();
        let mut keeper = GateKeeper::for_level(1);

        assert_eq!(
            keeper.check_release(&mut ghosts, 0),
            Some((Personality::Pinky, ReleaseReason::DotCounter))
        );
        assert_eq!(keeper.check_release(&mut ghosts, 0), None);

        for _ in 0..30 {
            keeper.register_food_eaten();
        }
        assert_eq!(
            keeper.check_release(&mut ghosts, 0),
            Some((Personality::Inky, ReleaseReason::DotCounter))
        );
        assert_eq!(ghosts[2].state(), GhostState::LeavingHouse);
        assert_eq!(ghosts[3].state(), GhostState::Locked);
    }

    #[test]
    fn test_starvation_release() {
        let mut ghosts = ghosts();
        ghosts[1].set_state(GhostState::HuntingPac);
        let mut keeper = GateKeeper::for_level(1);
        assert_eq!(keeper.check_release(&mut ghosts, 239), None);
        assert_eq!(
            keeper.check_release(&mut ghosts, 240),
            Some((Personality::Inky, ReleaseReason::Starvation))
        );
    }

    #[test]
    fn test_reset_after_death_uses_global_thresholds() {
        let mut keeper = GateKeeper::for_level(3);
        keeper.register_food_eaten();
        keeper.reset_after_death();
        assert_eq!(keeper.counter(), 0);
        assert!(keeper.is_global());
        assert_eq!(keeper.threshold(Personality::Clyde), 32);
        assert_eq!(keeper.threshold(Personality::Pinky), 7);
    }
}
