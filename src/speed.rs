//! Speed model.
//!
//! Raw speeds are "speed units" of 1/32 pixel per tick, matching the arcade
//! hardware tables. All functions here are pure; context multipliers (tunnel,
//! frightened, power) are applied on top of the unit values.

use crate::config::Difficulty;
use crate::constants::SPEED_UNITS_PER_PIXEL;
use crate::ghost::Personality;

/// Fixed speed of ghosts moving inside the house, in pixels per tick.
pub const SPEED_INSIDE_HOUSE: f32 = 0.5;
/// Fixed speed of eaten ghosts on their way home, in pixels per tick.
pub const SPEED_RETURNING_HOME: f32 = 2.0;

const TUNNEL_FACTOR: f32 = 0.4;
const FRIGHTENED_FACTOR: f32 = 0.5;
const POWER_FACTOR: f32 = 1.1;

/// Converts speed units into pixels per tick.
pub fn units_to_pixels(units: i32) -> f32 {
    units as f32 / SPEED_UNITS_PER_PIXEL
}

/// Player base speed for a level, in units.
pub fn player_base_units(level_number: u32) -> i32 {
    match level_number {
        1..=4 => 0x20,
        5..=12 => 0x24,
        13..=16 => 0x28,
        17..=20 => 0x27,
        21..=24 => 0x26,
        25..=28 => 0x25,
        _ => 0x24,
    }
}

/// Ghost base speed for a level, in units.
pub fn ghost_base_units(level_number: u32) -> i32 {
    match level_number {
        1..=4 => 0x18,
        5..=12 => 0x20 + (level_number as i32 - 5),
        n if n >= 13 => 0x28,
        _ => 0x20,
    }
}

pub fn player_difficulty_units(difficulty: Difficulty) -> i32 {
    match difficulty {
        Difficulty::Easy => -4,
        Difficulty::Normal => 0,
        Difficulty::Hard => 12,
        Difficulty::Crazy => 24,
    }
}

pub fn ghost_difficulty_units(difficulty: Difficulty) -> i32 {
    match difficulty {
        Difficulty::Easy => -8,
        Difficulty::Normal => 0,
        Difficulty::Hard => 16,
        Difficulty::Crazy => 32,
    }
}

/// Static per-personality offset that separates ghosts sharing a tile.
pub fn personality_units(personality: Personality) -> i32 {
    match personality {
        Personality::Blinky => 3,
        Personality::Pinky => 2,
        Personality::Inky => 1,
        Personality::Clyde => 0,
    }
}

/// Extra ghost speed as the maze empties. Only on normal difficulty from level 5.
pub fn ghost_speed_increase_by_food_remaining(difficulty: Difficulty, level_number: u32, food_remaining: u32) -> i32 {
    if difficulty != Difficulty::Normal || level_number < 5 {
        return 0;
    }
    match food_remaining {
        0..=7 => 5,
        8..=15 => 4,
        16..=23 => 3,
        24..=31 => 2,
        _ => 0,
    }
}

/// Player base speed, in pixels per tick.
pub fn player_speed(level_number: u32, difficulty: Difficulty) -> f32 {
    units_to_pixels(player_base_units(level_number) + player_difficulty_units(difficulty))
}

/// Player speed while power mode is active.
pub fn player_power_speed(level_number: u32, difficulty: Difficulty) -> f32 {
    POWER_FACTOR * player_speed(level_number, difficulty)
}

/// Ghost base speed (no personality offset), in pixels per tick.
pub fn ghost_base_speed(level_number: u32, difficulty: Difficulty) -> f32 {
    units_to_pixels(ghost_base_units(level_number) + ghost_difficulty_units(difficulty))
}

/// Speed of a hunting ghost, in pixels per tick.
pub fn ghost_attack_speed(level_number: u32, difficulty: Difficulty, personality: Personality, food_remaining: u32) -> f32 {
    units_to_pixels(
        ghost_base_units(level_number)
            + ghost_difficulty_units(difficulty)
            + personality_units(personality)
            + ghost_speed_increase_by_food_remaining(difficulty, level_number, food_remaining),
    )
}

pub fn ghost_tunnel_speed(level_number: u32, difficulty: Difficulty) -> f32 {
    TUNNEL_FACTOR * ghost_base_speed(level_number, difficulty)
}

pub fn ghost_frightened_speed(level_number: u32, difficulty: Difficulty) -> f32 {
    FRIGHTENED_FACTOR * ghost_base_speed(level_number, difficulty)
}
