use pacman_core::config::Difficulty;
use pacman_core::ghost::Personality;
use pacman_core::speed::*;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_player_speed_table() {
    assert_that(&player_speed(1, Difficulty::Normal)).is_equal_to(1.0);
    assert_that(&player_speed(5, Difficulty::Normal)).is_equal_to(1.125);
    assert_that(&player_speed(13, Difficulty::Normal)).is_equal_to(1.25);
    assert_that(&player_speed(32, Difficulty::Normal)).is_equal_to(1.125);
}

#[test]
fn test_player_base_units_every_level() {
    for level in 1..=32u32 {
        let expected = match level {
            1..=4 => 0x20,
            5..=12 => 0x24,
            13..=16 => 0x28,
            17..=20 => 0x27,
            21..=24 => 0x26,
            25..=28 => 0x25,
            _ => 0x24,
        };
        assert_eq!(player_base_units(level), expected, "level {level}");
    }
}

#[test]
fn test_player_bracket_boundaries() {
    for (below, above) in [(4, 5), (12, 13), (16, 17), (20, 21), (24, 25), (28, 29)] {
        assert_that(&player_base_units(below)).is_not_equal_to(player_base_units(above));
    }
    assert_that(&player_speed(17, Difficulty::Normal)).is_equal_to(39.0 / 32.0);
    assert_that(&player_speed(28, Difficulty::Normal)).is_equal_to(37.0 / 32.0);
}

#[test]
fn test_ghost_base_units_ramp() {
    assert_that(&ghost_base_units(4)).is_equal_to(0x18);
    assert_that(&ghost_base_units(5)).is_equal_to(0x20);
    assert_that(&ghost_base_units(12)).is_equal_to(0x27);
    assert_that(&ghost_base_units(13)).is_equal_to(0x28);
    for level in 5..=12u32 {
        assert_eq!(ghost_base_units(level), 0x20 + (level as i32 - 5), "level {level}");
    }
}

#[test]
fn test_difficulty_shifts_speed() {
    assert_that(&player_speed(1, Difficulty::Easy)).is_equal_to(0.875);
    assert_that(&player_speed(1, Difficulty::Crazy)).is_equal_to(1.75);
    assert_that(&ghost_base_speed(1, Difficulty::Hard)).is_equal_to(1.25);
}

#[test]
fn test_ghost_speed_by_level() {
    assert_that(&ghost_base_speed(1, Difficulty::Normal)).is_equal_to(0.75);
    assert_that(&ghost_base_speed(5, Difficulty::Normal)).is_equal_to(1.0);
    assert_that(&ghost_base_speed(13, Difficulty::Normal)).is_equal_to(1.25);
    assert_that(&ghost_base_speed(32, Difficulty::Normal)).is_equal_to(1.25);
}

#[test]
fn test_personality_offsets_order() {
    let speeds: Vec<f32> = Personality::ALL
        .iter()
        .map(|&p| ghost_attack_speed(1, Difficulty::Normal, p, 200))
        .collect();
    assert_eq!(speeds, vec![27.0 / 32.0, 26.0 / 32.0, 25.0 / 32.0, 24.0 / 32.0]);
}

#[test]
fn test_food_boost_only_on_normal_from_level_5() {
    assert_that(&ghost_speed_increase_by_food_remaining(Difficulty::Normal, 4, 0)).is_equal_to(0);
    assert_that(&ghost_speed_increase_by_food_remaining(Difficulty::Hard, 10, 0)).is_equal_to(0);
    assert_that(&ghost_speed_increase_by_food_remaining(Difficulty::Easy, 10, 0)).is_equal_to(0);
    assert_that(&ghost_speed_increase_by_food_remaining(Difficulty::Normal, 5, 7)).is_equal_to(5);
    assert_that(&ghost_speed_increase_by_food_remaining(Difficulty::Normal, 5, 20)).is_equal_to(3);
    assert_that(&ghost_speed_increase_by_food_remaining(Difficulty::Normal, 5, 32)).is_equal_to(0);
}

#[test]
fn test_context_speeds() {
    assert_that(&((ghost_tunnel_speed(1, Difficulty::Normal) - 0.3).abs() < 1e-6)).is_true();
    assert_that(&ghost_frightened_speed(1, Difficulty::Normal)).is_equal_to(0.375);
    assert_that(&player_power_speed(1, Difficulty::Normal)).is_equal_to(1.1);
}
