//! Actors moving through the maze and the shared movement routine.
//!
//! Positions are actor centres in pixels. Actors turn only at tile centres,
//! may reverse at any time, and stop at the centre of a tile whose neighbour
//! ahead is blocked.

use glam::{IVec2, Vec2};
use tracing::trace;

use crate::map::{direction::Direction, tile_at, tile_center, WorldMap};

/// Something that moves through the maze: the player, a ghost, or a moving bonus.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub position: Vec2,
    pub move_dir: Direction,
    pub wish_dir: Direction,
    /// Pixels per tick.
    pub speed: f32,
    pub visible: bool,
    /// Whether leaving the board through a portal wraps to the other side.
    pub can_teleport: bool,
    new_tile_entered: bool,
    stuck: bool,
}

impl Actor {
    pub fn new(position: Vec2, direction: Direction) -> Self {
        Self {
            position,
            move_dir: direction,
            wish_dir: direction,
            speed: 0.0,
            visible: true,
            can_teleport: true,
            new_tile_entered: true,
            stuck: false,
        }
    }

    /// Places the actor at the centre of a tile.
    pub fn at_tile(tile: IVec2, direction: Direction) -> Self {
        Self::new(tile_center(tile), direction)
    }

    pub fn tile(&self) -> IVec2 {
        tile_at(self.position)
    }

    /// Whether the last move crossed into a different tile.
    pub fn new_tile_entered(&self) -> bool {
        self.new_tile_entered
    }

    /// Whether the last move was stopped by a wall.
    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    /// The tile `n` steps ahead in the current move direction.
    pub fn tiles_ahead(&self, n: i32) -> IVec2 {
        self.tile() + self.move_dir.as_ivec2() * n
    }

    /// Reverses immediately. Used for scheduled reversals, which may happen mid-corridor.
    pub fn reverse(&mut self) {
        self.move_dir = self.move_dir.opposite();
        self.wish_dir = self.move_dir;
    }

    /// Moves in a straight line regardless of walls. Used inside the ghost house.
    pub fn move_towards(&mut self, target: Vec2, speed: f32) -> bool {
        let delta = target - self.position;
        let distance = delta.length();
        if distance <= speed {
            self.position = target;
            return true;
        }
        let step = delta / distance;
        self.move_dir = if step.x.abs() > step.y.abs() {
            if step.x > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if step.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        self.wish_dir = self.move_dir;
        self.position += step * speed;
        false
    }

    /// Advances the actor one tick through the maze at its current speed.
    pub fn advance(&mut self, map: &WorldMap) {
        self.advance_with(map, |tile| map.is_blocked(tile));
    }

    /// Advances the actor one tick, treating tiles for which `blocked` returns
    /// true as walls.
    pub fn advance_with(&mut self, map: &WorldMap, blocked: impl Fn(IVec2) -> bool) {
        let tile_before = self.tile();
        let center = tile_center(tile_before);
        let mut remaining = self.speed;
        self.stuck = false;

        if self.wish_dir == self.move_dir.opposite() {
            self.move_dir = self.wish_dir;
        }

        // Distance along the move axis until the tile centre; negative once passed.
        let to_center = (center - self.position).dot(self.move_dir.as_ivec2().as_vec2());
        let aligned = if self.move_dir.is_horizontal() {
            (self.position.y - center.y).abs() < f32::EPSILON
        } else {
            (self.position.x - center.x).abs() < f32::EPSILON
        };

        if (0.0..=remaining).contains(&to_center) {
            let wants_turn = self.wish_dir != self.move_dir && !blocked(tile_before + self.wish_dir.as_ivec2());
            let blocked_ahead = blocked(tile_before + self.move_dir.as_ivec2());

            if wants_turn || blocked_ahead {
                self.position = center;
                remaining -= to_center;
                if wants_turn {
                    trace!(from = ?self.move_dir, to = ?self.wish_dir, tile = ?tile_before, "Actor turned");
                    self.move_dir = self.wish_dir;
                } else {
                    self.stuck = true;
                    self.new_tile_entered = false;
                    return;
                }
            }
        } else if !aligned {
            // Snap onto the lane after a reversal or a house exit
            if self.move_dir.is_horizontal() {
                self.position.y = center.y;
            } else {
                self.position.x = center.x;
            }
        }

        self.position += self.move_dir.as_ivec2().as_vec2() * remaining;
        if self.can_teleport {
            self.position = map.wrap_portal(self.position);
        }
        self.new_tile_entered = self.tile() != tile_before;
    }
}
