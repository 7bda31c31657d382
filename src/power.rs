//! Power mode: the frightened window opened by an energizer.

use tracing::{debug, info};

use crate::constants::{points, tables, TICKS_PER_SECOND};
use crate::events::GameEvent;
use crate::ghost::GhostState;
use crate::level::Level;
use crate::score::ScoreLedger;

/// Raw frightened duration of a level, in 1/16 seconds. Levels past the
/// table use its last entry.
pub fn power_duration_raw(level_number: u32) -> u8 {
    let index = (level_number.max(1) as usize - 1).min(tables::POWER_DURATION.len() - 1);
    tables::POWER_DURATION[index]
}

/// Frightened duration of a level, in ticks.
pub fn power_duration_ticks(level_number: u32) -> u32 {
    power_duration_raw(level_number) as u32 * TICKS_PER_SECOND / 16
}

/// Countdown of the current power window.
#[derive(Debug, Clone)]
pub struct PowerTimer {
    remaining: u32,
    /// Length of the pre-expiry flashing window.
    fade_ticks: u32,
}

impl PowerTimer {
    pub fn new(fade_ticks: u32) -> Self {
        Self { remaining: 0, fade_ticks }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Whether ghosts should flash because power is about to end.
    pub fn is_fading(&self) -> bool {
        self.is_active() && self.remaining <= self.fade_ticks
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn fade_ticks(&self) -> u32 {
        self.fade_ticks
    }

    /// Starts (or restarts) the window. A new energizer replaces what was left.
    pub fn start(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    pub fn stop(&mut self) {
        self.remaining = 0;
    }

    /// Counts down one tick. Returns true on the tick the window closes.
    pub fn update(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

/// Handles an energizer just eaten by the player.
pub fn on_energizer_eaten(level: &mut Level, ledger: &mut ScoreLedger, events: &mut Vec<GameEvent>) {
    ledger.score_points(points::ENERGIZER);
    level.ghosts_eaten_in_window.clear();

    let duration = power_duration_ticks(level.number());
    if duration > 0 {
        level.hunting.pause();
        level.power.start(duration);
        for ghost in level.ghosts.iter_mut() {
            match ghost.state() {
                GhostState::HuntingPac => {
                    ghost.set_state(GhostState::Frightened);
                    ghost.reverse_at_next_occasion = true;
                }
                GhostState::Frightened => ghost.reverse_at_next_occasion = true,
                _ => {}
            }
        }
        info!(level_number = level.number(), duration_ticks = duration, "Power mode started");
        events.push(GameEvent::PowerBegin { duration_ticks: duration });
    } else {
        for ghost in level.ghosts.iter_mut() {
            if ghost.in_state(&[GhostState::Frightened, GhostState::HuntingPac]) {
                ghost.reverse_at_next_occasion = true;
            }
        }
        debug!(level_number = level.number(), "No power mode at this level, ghosts only reverse");
    }
}

/// Counts the power window down and ends it when it runs out.
pub fn update_power(level: &mut Level, events: &mut Vec<GameEvent>) {
    if !level.power.update() {
        return;
    }
    for ghost in level.ghosts.iter_mut() {
        if ghost.state() == GhostState::Frightened {
            ghost.set_state(GhostState::HuntingPac);
        }
    }
    level.hunting.resume();
    info!(level_number = level.number(), "Power mode ended");
    events.push(GameEvent::PowerEnd);
}
