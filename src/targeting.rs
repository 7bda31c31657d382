//! Ghost targeting and intersection movement resolution.
//!
//! Personalities differ only in how they pick a chase target; all of them share
//! [`best_direction`] to steer towards whatever tile they target.

use glam::IVec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;

use crate::constants::RETREAT_DISTANCE_TILES;
use crate::ghost::{Ghost, Personality};
use crate::hunting::HuntingPhase;
use crate::level::Level;
use crate::map::direction::Direction;

/// Computes the chase target of one personality.
pub type TargetFn = fn(&Level, Personality) -> IVec2;

/// Chase target functions, indexed by personality id.
const CHASE_TARGETS: [TargetFn; 4] = [shadow_target, ambush_target, flank_target, retreat_target];

/// The player's current tile.
fn shadow_target(level: &Level, _: Personality) -> IVec2 {
    level.player.tile()
}

/// Four tiles ahead of the player.
fn ambush_target(level: &Level, _: Personality) -> IVec2 {
    level.player.tiles_ahead(4)
}

/// The tile two ahead of the player, mirrored through the first ghost's tile.
fn flank_target(level: &Level, _: Personality) -> IVec2 {
    let pivot = level.player.tiles_ahead(2);
    pivot * 2 - level.ghost(Personality::Blinky).tile()
}

/// Chases like the first ghost, but retreats to its corner when close to the player.
fn retreat_target(level: &Level, personality: Personality) -> IVec2 {
    let ghost = level.ghost(personality);
    let player_tile = level.player.tile();
    if ghost.tile().as_vec2().distance(player_tile.as_vec2()) < RETREAT_DISTANCE_TILES {
        ghost.scatter_tile
    } else {
        player_tile
    }
}

/// The tile a personality chases during a chase phase.
pub fn chase_target(level: &Level, personality: Personality) -> IVec2 {
    CHASE_TARGETS[personality.id() as usize](level, personality)
}

/// What a hunting ghost steers towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntingTarget {
    /// Wander without a target (first scatter phase).
    Roam,
    Tile(IVec2),
}

/// Target of a hunting ghost for the current phase.
pub fn hunting_target(level: &Level, personality: Personality, phase_index: usize, phase: HuntingPhase) -> HuntingTarget {
    if phase_index == 0 {
        return HuntingTarget::Roam;
    }
    match phase {
        HuntingPhase::Scatter => HuntingTarget::Tile(level.ghost(personality).scatter_tile),
        HuntingPhase::Chase => HuntingTarget::Tile(chase_target(level, personality)),
    }
}

/// Directions a ghost may take from a tile without reversing.
pub fn open_directions(tile: IVec2, move_dir: Direction, blocked: impl Fn(IVec2) -> bool) -> SmallVec<[Direction; 4]> {
    Direction::PRIORITY
        .into_iter()
        .filter(|&dir| dir != move_dir.opposite() && !blocked(tile + dir.as_ivec2()))
        .collect()
}

/// Picks the non-reversing direction whose next tile is closest to the target.
///
/// Distances are compared squared; ties go to the earlier direction in
/// [`Direction::PRIORITY`]. A dead end forces a reversal.
pub fn best_direction(tile: IVec2, move_dir: Direction, target: IVec2, blocked: impl Fn(IVec2) -> bool) -> Direction {
    let mut best: Option<(Direction, i32)> = None;
    for dir in open_directions(tile, move_dir, blocked) {
        let distance = (tile + dir.as_ivec2()).distance_squared(target);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((dir, distance));
        }
    }
    best.map_or(move_dir.opposite(), |(dir, _)| dir)
}

/// Picks a random non-reversing direction. A dead end forces a reversal.
pub fn random_direction<R: Rng + ?Sized>(
    tile: IVec2,
    move_dir: Direction,
    blocked: impl Fn(IVec2) -> bool,
    rng: &mut R,
) -> Direction {
    open_directions(tile, move_dir, blocked)
        .choose(rng)
        .copied()
        .unwrap_or(move_dir.opposite())
}

/// Sets the ghost's wish direction at a decision point.
///
/// Decisions are made when a ghost enters a new tile. A pending reversal wins
/// over everything else and is consumed here.
pub fn steer<R: Rng + ?Sized>(
    ghost: &mut Ghost,
    target: HuntingTarget,
    blocked: impl Fn(IVec2) -> bool,
    rng: &mut R,
) {
    if !ghost.actor.new_tile_entered() && !ghost.actor.is_stuck() {
        return;
    }
    if ghost.reverse_at_next_occasion {
        ghost.reverse_at_next_occasion = false;
        ghost.actor.reverse();
        return;
    }
    let tile = ghost.tile();
    let move_dir = ghost.actor.move_dir;
    ghost.actor.wish_dir = match target {
        HuntingTarget::Roam => random_direction(tile, move_dir, blocked, rng),
        HuntingTarget::Tile(target) => best_direction(tile, move_dir, target, blocked),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(_: IVec2) -> bool {
        false
    }

    #[test]
    fn test_best_direction_never_reverses() {
        // Target straight behind: must not turn around
        let dir = best_direction(IVec2::new(5, 5), Direction::Right, IVec2::new(0, 5), open);
        assert_ne!(dir, Direction::Left);
    }

    #[test]
    fn test_tie_break_priority() {
        // Up and Left are equally close to a target diagonally up-left
        let dir = best_direction(IVec2::new(5, 5), Direction::Left, IVec2::new(3, 3), open);
        assert_eq!(dir, Direction::Up);

        // Down and Right tie when moving right towards a target down-right
        let dir = best_direction(IVec2::new(5, 5), Direction::Right, IVec2::new(7, 7), open);
        assert_eq!(dir, Direction::Down);
    }

    #[test]
    fn test_dead_end_reverses() {
        let walls = |t: IVec2| t != IVec2::new(4, 5);
        let dir = best_direction(IVec2::new(5, 5), Direction::Right, IVec2::new(9, 9), walls);
        assert_eq!(dir, Direction::Left);
    }

    #[test]
    fn test_target_outside_map_is_valid() {
        let dir = best_direction(IVec2::new(5, 5), Direction::Up, IVec2::new(-100, -100), open);
        assert!(matches!(dir, Direction::Up | Direction::Left));
    }

    #[test]
    fn test_random_direction_excludes_reverse() {
        use rand::{rngs::SmallRng, SeedableRng};
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let dir = random_direction(IVec2::new(5, 5), Direction::Down, open, &mut rng);
            assert_ne!(dir, Direction::Up);
        }
    }
}
