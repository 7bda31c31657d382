//! Headless runner: plays a seeded game with a random autopilot and logs what happens.

use anyhow::Context;
use figment::{providers::Env, Figment};
use pacman_core::config::GameConfig;
use pacman_core::events::GameEvent;
use pacman_core::formatter::{self, TickFormatter};
use pacman_core::game::Game;
use pacman_core::map::{direction::Direction, BuiltinMapSelector};
use pacman_core::score::MemoryHighScoreStore;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::{debug, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Settings of the runner itself, read from `PACMAN_RUN_*`.
#[derive(Debug, Deserialize)]
struct RunnerConfig {
    #[serde(default = "default_seed")]
    seed: u64,
    #[serde(default = "default_ticks")]
    ticks: u64,
}

fn default_seed() -> u64 {
    0x5EED
}

fn default_ticks() -> u64 {
    // Five minutes of game time
    5 * 60 * 60
}

fn init_tracing() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().event_format(TickFormatter))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let runner: RunnerConfig = Figment::new()
        .merge(Env::prefixed("PACMAN_RUN_"))
        .extract()
        .context("Invalid runner settings")?;
    let config = GameConfig::from_env().context("Invalid game configuration")?;
    info!(seed = runner.seed, ticks = runner.ticks, "Starting headless run");

    let mut rng = SmallRng::seed_from_u64(runner.seed);
    let mut game = Game::new(
        config,
        Box::new(BuiltinMapSelector),
        Box::new(MemoryHighScoreStore::default()),
    )
    .context("Failed to create game")?;

    let directions: Vec<Direction> = Direction::iter().collect();
    let mut events = game.start();
    let mut eaten_ghosts = 0u32;
    let mut input = None;

    for tick in 1..=runner.ticks {
        formatter::record_tick(tick);
        if game.level().player.is_stuck() || rng.random_ratio(1, 45) {
            input = Some(directions[rng.random_range(0..directions.len())]);
        }
        events.extend(game.tick(input, &mut rng).context("Tick failed")?);

        for event in events.drain(..) {
            if let GameEvent::GhostEaten { .. } = event {
                eaten_ghosts += 1;
            }
            debug!(?event, "Event");
        }
        if game.is_over() {
            break;
        }
    }

    info!(
        ticks = game.tick_count(),
        level_number = game.level().number(),
        score = game.ledger().points(),
        high_score = game.ledger().high_score().points,
        lives = game.lives(),
        eaten_ghosts,
        game_over = game.is_over(),
        "Headless run finished"
    );
    Ok(())
}
