use glam::IVec2;

use crate::ghost::Personality;
use crate::hunting::HuntingPhase;
use crate::map::Food;

/// Domain events emitted by a tick, drained by the rendering and sound layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    LevelCreated { level_number: u32 },
    LevelStarted { level_number: u32 },
    FoodFound { tile: IVec2, food: Food },
    PowerBegin { duration_ticks: u32 },
    PowerEnd,
    HuntingPhaseChanged { phase_index: usize, phase: HuntingPhase },
    GhostReleased { personality: Personality },
    GhostEaten { personality: Personality, points: u32 },
    BonusActivated { symbol: u8, points: u32 },
    BonusEaten { symbol: u8, points: u32 },
    BonusExpired { symbol: u8 },
    ExtraLifeWon { lives: u8 },
    PlayerKilled { killer: Personality },
    LevelCompleted { level_number: u32 },
    GameOver,
}
