//! Score ledger: points, high score and extra-life thresholds.
//!
//! How the high score is persisted is up to the [`HighScoreStore`]; the ledger
//! only calls `load` and `save`.

use tracing::{debug, info, warn};

use crate::error::{GameError, GameResult};
use crate::map::MapCategory;

/// A score and the level it was reached at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub points: u32,
    pub level_number: u32,
}

/// Persistence of the high score.
pub trait HighScoreStore {
    fn load(&self) -> GameResult<Score>;
    fn save(&mut self, score: Score) -> GameResult<()>;
}

/// Keeps the high score in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryHighScoreStore {
    saved: Option<Score>,
}

impl MemoryHighScoreStore {
    pub fn with_score(score: Score) -> Self {
        Self { saved: Some(score) }
    }

    pub fn saved(&self) -> Option<Score> {
        self.saved
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> GameResult<Score> {
        self.saved
            .ok_or_else(|| GameError::HighScore("no high score saved yet".into()))
    }

    fn save(&mut self, score: Score) -> GameResult<()> {
        self.saved = Some(score);
        Ok(())
    }
}

pub struct ScoreLedger {
    score: Score,
    high_score: Score,
    /// Ascending thresholds; each one crossed awards an extra life.
    extra_life_scores: Vec<u32>,
    /// Extra lives won since the last [`ScoreLedger::take_extra_lives`].
    pending_extra_lives: u32,
    /// Disabled during demo levels.
    pub enabled: bool,
    store: Box<dyn HighScoreStore>,
}

impl std::fmt::Debug for ScoreLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreLedger")
            .field("score", &self.score)
            .field("high_score", &self.high_score)
            .field("extra_life_scores", &self.extra_life_scores)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl ScoreLedger {
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        Self {
            score: Score::default(),
            high_score: Score::default(),
            extra_life_scores: Vec::new(),
            pending_extra_lives: 0,
            enabled: true,
            store,
        }
    }

    pub fn points(&self) -> u32 {
        self.score.points
    }

    pub fn level_number(&self) -> u32 {
        self.score.level_number
    }

    pub fn set_level_number(&mut self, level_number: u32) {
        self.score.level_number = level_number;
    }

    pub fn high_score(&self) -> Score {
        self.high_score
    }

    pub fn extra_life_scores(&self) -> &[u32] {
        &self.extra_life_scores
    }

    pub fn set_extra_life_scores(&mut self, scores: &[u32]) {
        self.extra_life_scores = scores.to_vec();
    }

    /// Uses the extra-life thresholds of a map category.
    pub fn use_category(&mut self, category: MapCategory) {
        self.set_extra_life_scores(&category.extra_life_scores());
    }

    /// Starts a new game's score at zero.
    pub fn reset(&mut self) {
        self.score = Score::default();
        self.pending_extra_lives = 0;
    }

    /// Adds points. Returns how many extra-life thresholds were crossed.
    ///
    /// Does nothing while the ledger is disabled.
    pub fn score_points(&mut self, amount: u32) -> u32 {
        if !self.enabled || amount == 0 {
            return 0;
        }
        let before = self.score.points;
        let after = before + amount;
        self.score.points = after;

        if after > self.high_score.points {
            self.high_score = self.score;
        }

        let crossed = self
            .extra_life_scores
            .iter()
            .filter(|&&threshold| before < threshold && threshold <= after)
            .count() as u32;
        if crossed > 0 {
            debug!(score = after, crossed, "Extra life threshold crossed");
            self.pending_extra_lives += crossed;
        }
        crossed
    }

    /// Drains the extra lives won since the last call.
    pub fn take_extra_lives(&mut self) -> u32 {
        std::mem::take(&mut self.pending_extra_lives)
    }

    /// Loads the saved high score. A missing or unreadable one counts as zero.
    pub fn load_high_score(&mut self) {
        match self.store.load() {
            Ok(score) => {
                debug!(points = score.points, level_number = score.level_number, "High score loaded");
                self.high_score = score;
            }
            Err(error) => {
                warn!(%error, "Could not load high score, starting from zero");
                self.high_score = Score::default();
            }
        }
    }

    /// Saves the high score if the current game beat the saved one.
    pub fn update_high_score(&mut self) -> GameResult<()> {
        let saved = self.store.load().unwrap_or_default();
        if self.high_score.points > saved.points {
            self.store.save(self.high_score)?;
            info!(points = self.high_score.points, "New high score saved");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> ScoreLedger {
        ScoreLedger::new(Box::new(MemoryHighScoreStore::default()))
    }

    #[test]
    fn test_extra_life_crossing() {
        let mut ledger = ledger();
        ledger.use_category(MapCategory::Mini);
        assert_eq!(ledger.score_points(9_990), 0);
        assert_eq!(ledger.score_points(10), 1);
        assert_eq!(ledger.score_points(10), 0);
        assert_eq!(ledger.score_points(100_000), 2);
        assert_eq!(ledger.take_extra_lives(), 3);
        assert_eq!(ledger.take_extra_lives(), 0);
    }

    #[test]
    fn test_disabled_ledger_ignores_points() {
        let mut ledger = ledger();
        ledger.enabled = false;
        assert_eq!(ledger.score_points(500), 0);
        assert_eq!(ledger.points(), 0);
    }

    #[test]
    fn test_high_score_follows_score() {
        let mut ledger = ledger();
        ledger.set_level_number(3);
        ledger.score_points(120);
        assert_eq!(ledger.high_score(), Score { points: 120, level_number: 3 });
    }

    #[test]
    fn test_load_missing_high_score_is_zero() {
        let mut ledger = ledger();
        ledger.load_high_score();
        assert_eq!(ledger.high_score(), Score::default());
    }

    #[test]
    fn test_update_high_score_saves_only_better() {
        let store = MemoryHighScoreStore::with_score(Score {
            points: 1_000,
            level_number: 2,
        });
        let mut ledger = ScoreLedger::new(Box::new(store));
        ledger.load_high_score();
        ledger.score_points(500);
        ledger.update_high_score().unwrap();
        assert_eq!(ledger.high_score().points, 1_000);

        ledger.score_points(600);
        ledger.update_high_score().unwrap();
        assert_eq!(ledger.high_score().points, 1_100);
    }
}
