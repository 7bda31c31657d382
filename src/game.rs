//! Game session and the per-tick level orchestration.

use glam::Vec2;
use rand::Rng;
use strum_macros::AsRefStr;
use tracing::{debug, error, info, trace};

use crate::bonus::{activate_next_bonus, check_bonus_reached, update_bonus, BonusState};
use crate::config::GameConfig;
use crate::constants::{points, GHOST_EATEN_TICKS, MAX_LEVEL_NUMBER};
use crate::error::GameResult;
use crate::events::GameEvent;
use crate::gatekeeper::ReleaseReason;
use crate::ghost::{GhostState, Personality};
use crate::level::Level;
use crate::map::{direction::Direction, Food, MapSelector};
use crate::power::{on_energizer_eaten, update_power};
use crate::score::{HighScoreStore, ScoreLedger};
use crate::speed;
use crate::targeting::{hunting_target, steer, HuntingTarget};

/// Where the session stands between two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum SessionState {
    /// Built but not started yet.
    Ready,
    Playing,
    /// The level was cleared; the next one is built on the following tick.
    LevelCompleted { next_level: u32 },
    GameOver,
}

/// A game session: configuration, score, lives and the level being played.
pub struct Game {
    config: GameConfig,
    ledger: ScoreLedger,
    selector: Box<dyn MapSelector>,
    level: Level,
    lives: u8,
    state: SessionState,
    tick: u64,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("ledger", &self.ledger)
            .field("level_number", &self.level.number())
            .field("lives", &self.lives)
            .field("state", &self.state)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Creates a session and builds its first level.
    ///
    /// # Errors
    ///
    /// Fails if the map selector cannot supply the first level's map.
    pub fn new(config: GameConfig, selector: Box<dyn MapSelector>, store: Box<dyn HighScoreStore>) -> GameResult<Self> {
        let mut ledger = ScoreLedger::new(store);
        ledger.use_category(config.map_category());
        ledger.load_high_score();
        ledger.enabled = !config.demo;

        let level = build_level(&config, selector.as_ref(), config.start_level_number())?;
        ledger.set_level_number(level.number());

        info!(
            category = config.map_category().as_ref(),
            difficulty = config.difficulty().as_ref(),
            start_level = config.start_level_number(),
            demo = config.demo,
            "Game created"
        );

        Ok(Self {
            lives: config.initial_lives(),
            config,
            ledger,
            selector,
            level,
            state: SessionState::Ready,
            tick: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Mutable access to the level, for setting up scenarios between ticks.
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Ticks simulated so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Starts the first level. Calling it again has no effect.
    pub fn start(&mut self) -> Vec<GameEvent> {
        if self.state != SessionState::Ready {
            return Vec::new();
        }
        self.state = SessionState::Playing;
        self.level.hunting.start();
        let level_number = self.level.number();
        info!(level_number, lives = self.lives, "Game started");
        vec![
            GameEvent::GameStarted,
            GameEvent::LevelCreated { level_number },
            GameEvent::LevelStarted { level_number },
        ]
    }

    /// Simulates one tick and returns the events it produced, in order.
    ///
    /// `input` is the direction the player asks for, if any.
    ///
    /// # Errors
    ///
    /// Fails only when the next level cannot be built after a level was cleared.
    pub fn tick<R: Rng + ?Sized>(&mut self, input: Option<Direction>, rng: &mut R) -> GameResult<Vec<GameEvent>> {
        let mut events = Vec::new();
        match self.state {
            SessionState::Ready | SessionState::GameOver => return Ok(events),
            SessionState::LevelCompleted { next_level } => {
                self.enter_level(next_level, &mut events)?;
                return Ok(events);
            }
            SessionState::Playing => {}
        }
        self.tick += 1;

        let ctx = TickContext {
            config: &self.config,
            ledger: &mut self.ledger,
            events: &mut events,
        };
        simulate_tick(&mut self.level, ctx, input, rng);

        let won = self.ledger.take_extra_lives();
        if won > 0 {
            self.lives = self.lives.saturating_add(won.min(u8::MAX as u32) as u8);
            info!(lives = self.lives, "Extra life won");
            events.push(GameEvent::ExtraLifeWon { lives: self.lives });
        }

        if self.level.player_dead {
            self.on_player_killed(&mut events);
        } else if self.level.is_completed() {
            self.on_level_completed(&mut events);
        }
        Ok(events)
    }

    fn on_player_killed(&mut self, events: &mut Vec<GameEvent>) {
        self.lives = self.lives.saturating_sub(1);
        info!(lives = self.lives, level_number = self.level.number(), "Player lost a life");
        if self.lives == 0 {
            self.end_game(events);
            return;
        }
        self.level.reset_actors();
        self.level.hunting.start();
    }

    fn on_level_completed(&mut self, events: &mut Vec<GameEvent>) {
        let level_number = self.level.number();
        info!(level_number, score = self.ledger.points(), "Level completed");
        events.push(GameEvent::LevelCompleted { level_number });
        if level_number >= MAX_LEVEL_NUMBER {
            self.end_game(events);
        } else {
            self.state = SessionState::LevelCompleted {
                next_level: level_number + 1,
            };
        }
    }

    fn enter_level(&mut self, level_number: u32, events: &mut Vec<GameEvent>) -> GameResult<()> {
        self.level = build_level(&self.config, self.selector.as_ref(), level_number)?;
        self.ledger.set_level_number(level_number);
        events.push(GameEvent::LevelCreated { level_number });
        self.level.hunting.start();
        self.state = SessionState::Playing;
        info!(level_number, "Level started");
        events.push(GameEvent::LevelStarted { level_number });
        Ok(())
    }

    fn end_game(&mut self, events: &mut Vec<GameEvent>) {
        self.state = SessionState::GameOver;
        if let Err(error) = self.ledger.update_high_score() {
            error!(%error, "Could not save high score");
        }
        info!(score = self.ledger.points(), level_number = self.level.number(), "Game over");
        events.push(GameEvent::GameOver);
    }
}

/// Builds a level on the map the selector supplies for it.
fn build_level(config: &GameConfig, selector: &dyn MapSelector, level_number: u32) -> GameResult<Level> {
    let category = config.map_category();
    let map_number = category.map_number_for_level(level_number);
    let map = selector.select(category, map_number)?;
    debug!(level_number, category = category.as_ref(), map_number, "Map selected");
    Level::new(level_number, map, config)
}

/// Collaborators threaded through one tick of a level.
pub struct TickContext<'a> {
    pub config: &'a GameConfig,
    pub ledger: &'a mut ScoreLedger,
    pub events: &'a mut Vec<GameEvent>,
}

/// Runs one tick of a level, in fixed order: player, food, hunting timer,
/// ghosts and house release, power countdown, bonus, collisions.
pub fn simulate_tick<R: Rng + ?Sized>(level: &mut Level, ctx: TickContext<'_>, input: Option<Direction>, rng: &mut R) {
    let TickContext { config, ledger, events } = ctx;

    move_player(level, config, input);

    let tile = level.player_tile();
    match level.map.remove_food(tile) {
        Some(food) => eat_food(level, config, ledger, events, food, tile, rng),
        None => level.starvation_ticks += 1,
    }

    update_hunting(level, events);
    update_ghosts(level, config, rng);
    release_ghosts(level, events);
    update_power(level, events);
    update_bonus(level, events);
    check_collisions(level, ledger, events);
}

fn move_player(level: &mut Level, config: &GameConfig, input: Option<Direction>) {
    let difficulty = config.difficulty();
    level.player.speed = if level.power.is_active() {
        speed::player_power_speed(level.number(), difficulty)
    } else {
        speed::player_speed(level.number(), difficulty)
    };
    if let Some(direction) = input {
        level.player.wish_dir = direction;
    }
    level.player.advance(&level.map);
}

fn eat_food<R: Rng + ?Sized>(
    level: &mut Level,
    config: &GameConfig,
    ledger: &mut ScoreLedger,
    events: &mut Vec<GameEvent>,
    food: Food,
    tile: glam::IVec2,
    rng: &mut R,
) {
    level.starvation_ticks = 0;
    level.gatekeeper.register_food_eaten();
    trace!(?tile, ?food, remaining = level.map.food_remaining(), "Food eaten");
    events.push(GameEvent::FoodFound { tile, food });

    match food {
        Food::Pellet => {
            ledger.score_points(points::PELLET);
        }
        Food::Energizer => on_energizer_eaten(level, ledger, events),
    }

    if check_bonus_reached(level) {
        activate_next_bonus(level, config.map_category(), rng, events);
    }
}

fn update_hunting(level: &mut Level, events: &mut Vec<GameEvent>) {
    let Some(phase_index) = level.hunting.update() else {
        return;
    };
    let phase = level.hunting.phase();
    for ghost in level.ghosts.iter_mut() {
        if ghost.in_state(&[GhostState::HuntingPac, GhostState::Locked, GhostState::LeavingHouse]) {
            ghost.reverse_at_next_occasion = true;
        }
    }
    events.push(GameEvent::HuntingPhaseChanged { phase_index, phase });
}

fn update_ghosts<R: Rng + ?Sized>(level: &mut Level, config: &GameConfig, rng: &mut R) {
    for personality in Personality::ALL {
        update_ghost(level, config, personality, rng);
    }
}

/// Moves one ghost according to its state.
fn update_ghost<R: Rng + ?Sized>(level: &mut Level, config: &GameConfig, personality: Personality, rng: &mut R) {
    let level_number = level.number();
    let difficulty = config.difficulty();
    let phase_index = level.hunting.phase_index();
    let phase = level.hunting.phase();
    // Targets read the whole level, so they are computed before borrowing the ghost
    let target = match level.ghost(personality).state() {
        GhostState::HuntingPac => hunting_target(level, personality, phase_index, phase),
        GhostState::ReturningHome => HuntingTarget::Tile(level.map.house().entry_tile()),
        _ => HuntingTarget::Roam,
    };
    let frightened_on_exit = level.power.is_active() && !level.ghosts_eaten_in_window.contains(&personality);

    let Level { map, ghosts, .. } = level;
    let house = *map.house();
    let ghost = &mut ghosts[personality.id() as usize];
    ghost.state_ticks += 1;

    match ghost.state() {
        GhostState::Locked => {
            let seat = ghost.revival_position;
            let bob_y = if ghost.actor.move_dir == Direction::Up {
                seat.y - 2.0
            } else {
                seat.y + 2.0
            };
            if ghost.actor.move_towards(Vec2::new(seat.x, bob_y), speed::SPEED_INSIDE_HOUSE) {
                ghost.actor.reverse();
            }
        }
        GhostState::LeavingHouse => {
            let exit = house.entry_position();
            if (ghost.actor.position.x - exit.x).abs() > f32::EPSILON {
                let column = Vec2::new(exit.x, ghost.actor.position.y);
                ghost.actor.move_towards(column, speed::SPEED_INSIDE_HOUSE);
            } else if ghost.actor.move_towards(exit, speed::SPEED_INSIDE_HOUSE) {
                ghost.actor.move_dir = Direction::Left;
                ghost.actor.wish_dir = Direction::Left;
                // A ghost already eaten in this power window comes out hunting
                if frightened_on_exit {
                    ghost.set_state(GhostState::Frightened);
                } else {
                    ghost.set_state(GhostState::HuntingPac);
                }
            }
        }
        GhostState::HuntingPac | GhostState::Frightened => {
            let tile = ghost.tile();
            ghost.actor.speed = if map.is_tunnel(tile) {
                speed::ghost_tunnel_speed(level_number, difficulty)
            } else if ghost.state() == GhostState::Frightened {
                speed::ghost_frightened_speed(level_number, difficulty)
            } else {
                speed::ghost_attack_speed(level_number, difficulty, personality, map.food_remaining())
            };
            steer(ghost, target, |t| map.is_blocked(t), rng);
            ghost.actor.advance(map);
        }
        GhostState::Eaten => {
            if ghost.state_ticks >= GHOST_EATEN_TICKS {
                ghost.set_state(GhostState::ReturningHome);
            }
        }
        GhostState::ReturningHome => {
            ghost.actor.speed = speed::SPEED_RETURNING_HOME;
            steer(ghost, target, |t| map.is_blocked(t), rng);
            ghost.actor.advance(map);

            let entry = house.entry_position();
            let position = ghost.actor.position;
            if (position.y - entry.y).abs() < f32::EPSILON && (position.x - entry.x).abs() <= ghost.actor.speed {
                ghost.actor.position = entry;
                ghost.set_state(GhostState::EnteringHouse);
            }
        }
        // Moves at the returning speed, not the slow in-house speed, until it is seated
        GhostState::EnteringHouse => {
            let center_y = house.seat(Personality::Blinky).y;
            if (ghost.actor.position.y - center_y).abs() > f32::EPSILON {
                let below = Vec2::new(ghost.actor.position.x, center_y);
                ghost.actor.move_towards(below, speed::SPEED_RETURNING_HOME);
            } else if ghost.actor.move_towards(ghost.revival_position, speed::SPEED_RETURNING_HOME) {
                ghost.actor.move_dir = Direction::Up;
                ghost.actor.wish_dir = Direction::Up;
                ghost.set_state(GhostState::Locked);
            }
        }
    }
}

fn release_ghosts(level: &mut Level, events: &mut Vec<GameEvent>) {
    let Some((personality, reason)) = level.gatekeeper.check_release(&mut level.ghosts, level.starvation_ticks) else {
        return;
    };
    if reason == ReleaseReason::Starvation {
        level.starvation_ticks = 0;
    }
    events.push(GameEvent::GhostReleased { personality });
}

/// Resolves same-tile encounters of the player with ghosts and the bonus.
fn check_collisions(level: &mut Level, ledger: &mut ScoreLedger, events: &mut Vec<GameEvent>) {
    let player_tile = level.player_tile();

    for ghost in level.ghosts.iter_mut() {
        if ghost.tile() != player_tile {
            continue;
        }
        match ghost.state() {
            GhostState::Frightened => {
                let index = level.ghosts_eaten_in_window.len().min(points::GHOST_FACTORS.len() - 1);
                let value = points::GHOST_FACTORS[index] * 100;
                ledger.score_points(value);
                level.ghosts_eaten_in_window.push(ghost.personality);
                ghost.reverse_at_next_occasion = false;
                ghost.set_state(GhostState::Eaten);
                info!(ghost = ghost.personality.as_ref(), points = value, "Ghost eaten");
                events.push(GameEvent::GhostEaten {
                    personality: ghost.personality,
                    points: value,
                });
            }
            GhostState::HuntingPac if !level.player_dead => {
                if level.immunity {
                    trace!(ghost = ghost.personality.as_ref(), "Player immune, ignoring ghost contact");
                    continue;
                }
                level.player_dead = true;
                info!(ghost = ghost.personality.as_ref(), tile = ?player_tile, "Player killed");
                events.push(GameEvent::PlayerKilled {
                    killer: ghost.personality,
                });
            }
            _ => {}
        }
    }

    if level.player_dead {
        return;
    }
    if let Some(bonus) = level.bonus.as_mut() {
        if bonus.state() == BonusState::Edible && bonus.actor.tile() == player_tile {
            bonus.set_eaten();
            ledger.score_points(bonus.points());
            info!(symbol = bonus.symbol(), points = bonus.points(), "Bonus eaten");
            events.push(GameEvent::BonusEaten {
                symbol: bonus.symbol(),
                points: bonus.points(),
            });
        }
    }
}
