//! Hunting scheduler: alternates scatter and chase phases on a level timetable.

use strum_macros::AsRefStr;
use tracing::{debug, trace};

use crate::constants::tables;

/// Hunting sub-phase. Even phase indices scatter, odd ones chase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum HuntingPhase {
    Scatter,
    Chase,
}

/// Phase durations in ticks for a level; `None` lasts forever.
pub fn hunting_durations(level_number: u32) -> &'static [Option<u32>] {
    match level_number {
        1 => &tables::HUNTING_LEVEL_1,
        2..=4 => &tables::HUNTING_LEVELS_2_TO_4,
        _ => &tables::HUNTING_LEVELS_5_PLUS,
    }
}

/// Scatter/chase timer of one level.
#[derive(Debug, Clone)]
pub struct HuntingTimer {
    durations: Vec<Option<u32>>,
    phase_index: usize,
    tick: u32,
    running: bool,
}

impl HuntingTimer {
    pub fn new(durations: &[Option<u32>]) -> Self {
        Self {
            durations: durations.to_vec(),
            phase_index: 0,
            tick: 0,
            running: false,
        }
    }

    pub fn for_level(level_number: u32) -> Self {
        Self::new(hunting_durations(level_number))
    }

    /// Rewinds to phase 0 and stops. Called on level start and after a life is lost.
    pub fn reset(&mut self) {
        self.phase_index = 0;
        self.tick = 0;
        self.running = false;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops the timer without losing its position.
    pub fn pause(&mut self) {
        if self.running {
            trace!(phase_index = self.phase_index, tick = self.tick, "Hunting timer paused");
        }
        self.running = false;
    }

    /// Continues from where [`HuntingTimer::pause`] stopped.
    pub fn resume(&mut self) {
        if !self.running {
            trace!(phase_index = self.phase_index, tick = self.tick, "Hunting timer resumed");
        }
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn phase(&self) -> HuntingPhase {
        if self.phase_index % 2 == 0 {
            HuntingPhase::Scatter
        } else {
            HuntingPhase::Chase
        }
    }

    /// Ticks spent in the current phase.
    pub fn tick_in_phase(&self) -> u32 {
        self.tick
    }

    /// Advances one tick. Returns the new phase index when a phase ends.
    pub fn update(&mut self) -> Option<usize> {
        if !self.running {
            return None;
        }
        self.tick += 1;
        let duration = self.durations.get(self.phase_index).copied().flatten()?;
        if self.tick < duration || self.phase_index + 1 >= self.durations.len() {
            return None;
        }
        self.phase_index += 1;
        self.tick = 0;
        debug!(phase_index = self.phase_index, phase = self.phase().as_ref(), "Hunting phase started");
        Some(self.phase_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_change_after_duration() {
        let mut timer = HuntingTimer::new(&[Some(3), Some(2), None]);
        timer.start();
        assert_eq!(timer.phase(), HuntingPhase::Scatter);
        assert_eq!(timer.update(), None);
        assert_eq!(timer.update(), None);
        assert_eq!(timer.update(), Some(1));
        assert_eq!(timer.phase(), HuntingPhase::Chase);
        assert_eq!(timer.update(), None);
        assert_eq!(timer.update(), Some(2));
        for _ in 0..1000 {
            assert_eq!(timer.update(), None);
        }
        assert_eq!(timer.phase_index(), 2);
    }

    #[test]
    fn test_pause_keeps_position() {
        let mut timer = HuntingTimer::new(&[Some(10), None]);
        timer.start();
        for _ in 0..4 {
            timer.update();
        }
        timer.pause();
        for _ in 0..100 {
            assert_eq!(timer.update(), None);
        }
        assert_eq!(timer.tick_in_phase(), 4);
        timer.resume();
        for _ in 0..5 {
            assert_eq!(timer.update(), None);
        }
        assert_eq!(timer.update(), Some(1));
    }

    #[test]
    fn test_level_tables() {
        assert_eq!(hunting_durations(1)[0], Some(420));
        assert_eq!(hunting_durations(3)[5], Some(61980));
        assert_eq!(hunting_durations(32)[0], Some(300));
        assert_eq!(hunting_durations(32).last(), Some(&None));
    }

    #[test]
    fn test_reset() {
        let mut timer = HuntingTimer::new(&[Some(1), None]);
        timer.start();
        timer.update();
        assert_eq!(timer.phase_index(), 1);
        timer.reset();
        assert_eq!(timer.phase_index(), 0);
        assert!(!timer.is_running());
    }
}
