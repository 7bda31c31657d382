//! This module contains all the constants used by the simulation.

use glam::UVec2;

/// Simulation ticks per second of game time.
pub const TICKS_PER_SECOND: u32 = 60;

/// The size of each tile, in pixels.
pub const TILE_SIZE: f32 = 8.0;
/// Half the size of a tile, in pixels.
pub const HALF_TILE_SIZE: f32 = TILE_SIZE / 2.0;
/// The size of the built-in arcade board, in tiles.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(28, 31);

/// The lowest playable level number.
pub const MIN_LEVEL_NUMBER: u32 = 1;
/// The highest playable level number.
pub const MAX_LEVEL_NUMBER: u32 = 32;

/// Number of lives a fresh game starts with.
pub const DEFAULT_LIVES: u8 = 3;

/// Speed values are stored in units of 1/32 pixel per tick.
pub const SPEED_UNITS_PER_PIXEL: f32 = 32.0;

/// Ticks of frightened fading per ghost flash.
pub const TICKS_PER_FLASH: u32 = 28;

/// Ticks an eaten ghost stays frozen showing its value before heading home.
pub const GHOST_EATEN_TICKS: u32 = 60;

/// Distance (in tiles) under which the fourth personality retreats to its corner.
pub const RETREAT_DISTANCE_TILES: f32 = 8.0;

/// Movement speed of a bonus travelling along its route, in pixels per tick.
pub const BONUS_SPEED: f32 = 0.5;
/// Upper bound on the lifetime of a moving bonus, in ticks.
pub const BONUS_MAX_ROUTE_TICKS: u32 = 30 * TICKS_PER_SECOND;

pub mod points {
    //! Point values awarded by the simulation.

    pub const PELLET: u32 = 10;
    pub const ENERGIZER: u32 = 50;
    /// Multiplied by 100 for the k-th ghost eaten within one power window.
    pub const GHOST_FACTORS: [u32; 4] = [2, 4, 8, 16];
    /// Multiplied by 100 to get the value of each bonus symbol.
    pub const BONUS_FACTORS: [u32; 14] = [1, 2, 5, 7, 10, 20, 50, 30, 40, 50, 60, 70, 80, 100];
    /// Eaten-food counts at which a bonus is activated.
    pub const BONUS_FOOD_THRESHOLDS: [u32; 2] = [64, 176];

    /// Extra-life thresholds of the arcade category: one extra life per game in practice.
    pub const ARCADE_EXTRA_LIFE_SCORES: [u32; 4] = [10_000, 970_000, 980_000, 990_000];
    /// Extra-life thresholds of every other map category.
    pub const DEFAULT_EXTRA_LIFE_SCORES: [u32; 4] = [10_000, 50_000, 100_000, 300_000];
}

pub mod tables {
    //! Per-level lookup tables from the arcade hardware.

    /// Frightened duration per level in 1/16 seconds; levels past the end use the last entry.
    pub const POWER_DURATION: [u8; 19] = [
        0x60, 0x50, 0x40, 0x30, 0x20, 0x50, 0x20, 0x20, 0x10, 0x50, 0x20, 0x10, 0x10, 0x30, 0x10, 0x10, 0x00, 0x10,
        0x00,
    ];

    /// Number of ghost flashes before frightened mode ends; levels past the end use the last entry.
    pub const NUM_FLASHES: [u8; 19] = [5, 5, 5, 5, 5, 5, 5, 5, 3, 5, 5, 3, 3, 5, 3, 3, 0, 3, 0];

    /// Hunting phase durations in ticks. `None` lasts forever.
    pub const HUNTING_LEVEL_1: [Option<u32>; 8] = [
        Some(420),
        Some(1200),
        Some(420),
        Some(1200),
        Some(300),
        Some(1200),
        Some(300),
        None,
    ];
    pub const HUNTING_LEVELS_2_TO_4: [Option<u32>; 8] = [
        Some(420),
        Some(1200),
        Some(420),
        Some(1200),
        Some(300),
        Some(61980),
        Some(1),
        None,
    ];
    pub const HUNTING_LEVELS_5_PLUS: [Option<u32>; 8] = [
        Some(300),
        Some(1200),
        Some(300),
        Some(1200),
        Some(300),
        Some(62262),
        Some(1),
        None,
    ];

    /// Cumulative dot counts releasing each personality, indexed by personality.
    pub const RELEASE_LEVEL_1: [u32; 4] = [0, 0, 30, 90];
    pub const RELEASE_LEVEL_2: [u32; 4] = [0, 0, 0, 50];
    pub const RELEASE_LEVELS_3_PLUS: [u32; 4] = [0, 0, 0, 0];
    /// Dot counts used after the player lost a life in the current level.
    pub const RELEASE_GLOBAL: [u32; 4] = [0, 7, 17, 32];

    /// Ticks without eating after which the next locked ghost is released.
    pub const STARVATION_LIMIT_EARLY: u32 = 240;
    pub const STARVATION_LIMIT_LATE: u32 = 180;
}

/// The raw layout of the built-in arcade board, as a 2D array of characters.
///
/// `#` wall, `.` pellet, `o` energizer, `T` tunnel, `=` house door, `P` player start.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###==### ##.#     ",
    "######.## #      # ##.######",
    "TTTTTT.   #      #   .TTTTTT",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......P .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_board_dimensions() {
        assert_eq!(RAW_BOARD.len(), BOARD_CELL_SIZE.y as usize);
        for row in RAW_BOARD.iter() {
            assert_eq!(row.len(), BOARD_CELL_SIZE.x as usize);
        }
    }

    #[test]
    fn test_raw_board_power_pellets() {
        let count: usize = RAW_BOARD.iter().map(|row| row.chars().filter(|&c| c == 'o').count()).sum();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_power_table_first_level() {
        // 0x60 / 16 = 6 seconds
        assert_eq!(tables::POWER_DURATION[0], 0x60);
        assert_eq!(tables::POWER_DURATION[16], 0);
    }

    #[test]
    fn test_tables_same_length() {
        assert_eq!(tables::POWER_DURATION.len(), tables::NUM_FLASHES.len());
    }
}
