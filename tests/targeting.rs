use glam::IVec2;
use pacman_core::actor::Actor;
use pacman_core::ghost::Personality;
use pacman_core::hunting::HuntingPhase;
use pacman_core::map::direction::Direction;
use pacman_core::targeting::{chase_target, hunting_target, HuntingTarget};
use speculoos::prelude::*;

mod common;

#[test]
fn test_chase_targets_at_level_start() {
    let level = common::create_level(1);
    // Player at tile (14, 23) heading left; first ghost at (14, 11)
    assert_that(&chase_target(&level, Personality::Blinky)).is_equal_to(IVec2::new(14, 23));
    assert_that(&chase_target(&level, Personality::Pinky)).is_equal_to(IVec2::new(10, 23));
    assert_that(&chase_target(&level, Personality::Inky)).is_equal_to(IVec2::new(10, 35));
    assert_that(&chase_target(&level, Personality::Clyde)).is_equal_to(IVec2::new(14, 23));
}

#[test]
fn test_fourth_ghost_retreats_when_close() {
    let mut level = common::create_level(1);
    level.ghost_mut(Personality::Clyde).actor = Actor::at_tile(IVec2::new(14, 20), Direction::Up);
    let corner = IVec2::new(0, level.map.height());
    assert_that(&chase_target(&level, Personality::Clyde)).is_equal_to(corner);
}

#[test]
fn test_ambush_follows_player_direction() {
    let mut level = common::create_level(1);
    level.player = Actor::at_tile(IVec2::new(6, 10), Direction::Up);
    assert_that(&chase_target(&level, Personality::Pinky)).is_equal_to(IVec2::new(6, 6));
}

#[test]
fn test_hunting_target_by_phase() {
    let level = common::create_level(1);
    let scatter = level.ghost(Personality::Pinky).scatter_tile;

    assert_that(&hunting_target(&level, Personality::Pinky, 0, HuntingPhase::Scatter)).is_equal_to(HuntingTarget::Roam);
    assert_that(&hunting_target(&level, Personality::Pinky, 2, HuntingPhase::Scatter))
        .is_equal_to(HuntingTarget::Tile(scatter));
    assert_that(&hunting_target(&level, Personality::Pinky, 1, HuntingPhase::Chase))
        .is_equal_to(HuntingTarget::Tile(IVec2::new(10, 23)));
    assert_that(&scatter).is_equal_to(IVec2::new(2, -3));
}
