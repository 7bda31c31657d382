//! Bonus controller: symbol selection and the moving bonus route.

use glam::IVec2;
use rand::Rng;
use tracing::{debug, error, info, trace};

use crate::actor::Actor;
use crate::constants::{points, BONUS_MAX_ROUTE_TICKS, BONUS_SPEED, TICKS_PER_SECOND};
use crate::events::GameEvent;
use crate::level::Level;
use crate::map::{direction::Direction, MapCategory, WorldMap};
use crate::targeting::best_direction;

/// Ticks an eaten bonus stays visible showing its value.
const EATEN_DISPLAY_TICKS: u32 = 2 * TICKS_PER_SECOND;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusState {
    Inactive,
    Edible,
    Eaten,
    Expired,
}

/// A bonus symbol travelling once along its route.
#[derive(Debug, Clone)]
pub struct Bonus {
    symbol: u8,
    points: u32,
    state: BonusState,
    pub actor: Actor,
    route: Vec<IVec2>,
    next_waypoint: usize,
    left_to_right: bool,
    ticks: u32,
}

impl Bonus {
    /// Creates an inactive bonus at the first waypoint of its route.
    pub fn new(symbol: u8, route: Vec<IVec2>, left_to_right: bool) -> Self {
        let direction = if left_to_right {
            Direction::Right
        } else {
            Direction::Left
        };
        let mut actor = Actor::at_tile(route.first().copied().unwrap_or_default(), direction);
        actor.speed = BONUS_SPEED;
        actor.can_teleport = false;
        actor.visible = false;
        Self {
            symbol,
            points: bonus_points(symbol),
            state: BonusState::Inactive,
            actor,
            route,
            next_waypoint: 0,
            left_to_right,
            ticks: 0,
        }
    }

    pub fn symbol(&self) -> u8 {
        self.symbol
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn state(&self) -> BonusState {
        self.state
    }

    pub fn route(&self) -> &[IVec2] {
        &self.route
    }

    pub fn is_left_to_right(&self) -> bool {
        self.left_to_right
    }

    pub fn set_edible(&mut self) {
        self.state = BonusState::Edible;
        self.actor.visible = true;
    }

    pub fn set_eaten(&mut self) {
        self.state = BonusState::Eaten;
        self.ticks = 0;
    }

    fn expire(&mut self) {
        self.state = BonusState::Expired;
        self.actor.visible = false;
    }

    /// Moves one tick along the route. Expires at the end of the route.
    fn travel(&mut self, map: &WorldMap) {
        self.ticks += 1;
        if self.ticks > BONUS_MAX_ROUTE_TICKS {
            debug!(symbol = self.symbol, "Bonus exceeded its route time");
            self.expire();
            return;
        }

        while let Some(&waypoint) = self.route.get(self.next_waypoint) {
            if self.actor.tile() != waypoint {
                break;
            }
            trace!(symbol = self.symbol, ?waypoint, index = self.next_waypoint, "Bonus reached waypoint");
            self.next_waypoint += 1;
        }
        let Some(&target) = self.route.get(self.next_waypoint) else {
            self.expire();
            return;
        };

        if self.actor.new_tile_entered() || self.actor.is_stuck() {
            self.actor.wish_dir = best_direction(self.actor.tile(), self.actor.move_dir, target, |t| map.is_blocked(t));
        }
        self.actor.advance(map);
    }
}

/// Value of a bonus symbol.
pub fn bonus_points(symbol: u8) -> u32 {
    points::BONUS_FACTORS[symbol as usize % points::BONUS_FACTORS.len()] * 100
}

/// Whether the food just eaten unlocks a bonus.
pub fn check_bonus_reached(level: &Level) -> bool {
    points::BONUS_FOOD_THRESHOLDS.contains(&level.map.eaten_food())
}

/// Symbol of the next bonus: the level's own symbol while the category has
/// one, a random symbol of the category afterwards.
pub fn select_symbol<R: Rng + ?Sized>(level_number: u32, category: MapCategory, rng: &mut R) -> u8 {
    let max = category.max_bonus_symbol();
    match u8::try_from(level_number.saturating_sub(1)) {
        Ok(symbol) if symbol <= max => symbol,
        _ => rng.random_range(0..=max),
    }
}

/// Builds the five-waypoint route through a random portal pair and past the house.
///
/// Returns `None` when the map has no portal.
pub fn build_route<R: Rng + ?Sized>(map: &WorldMap, rng: &mut R) -> Option<(Vec<IVec2>, bool)> {
    let portals = map.portals();
    if portals.is_empty() {
        return None;
    }
    let entry = portals[rng.random_range(0..portals.len())];
    let exit = portals[rng.random_range(0..portals.len())];
    let left_to_right = rng.random_bool(0.5);

    let house = map.house();
    let house_entry = house.entry_tile();
    let below_house = house_entry + IVec2::new(0, house.size.y + 1);

    let route = vec![
        if left_to_right { entry.left } else { entry.right },
        house_entry,
        below_house,
        house_entry,
        if left_to_right {
            exit.right + IVec2::X
        } else {
            exit.left - IVec2::X
        },
    ];
    Some((route, left_to_right))
}

/// Activates the next bonus of the level.
///
/// Does nothing while a bonus is still edible. Skips the activation (with an
/// error log) when the map has no portal for the route.
pub fn activate_next_bonus<R: Rng + ?Sized>(
    level: &mut Level,
    category: MapCategory,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if let Some(bonus) = &level.bonus {
        if bonus.state() == BonusState::Edible {
            debug!(symbol = bonus.symbol(), "Bonus already active, ignoring activation");
            return;
        }
    }

    let Some((route, left_to_right)) = build_route(&level.map, rng) else {
        error!(level_number = level.number(), "No portal found for bonus route, skipping bonus");
        return;
    };

    let symbol = select_symbol(level.number(), category, rng);
    let mut bonus = Bonus::new(symbol, route, left_to_right);
    bonus.set_edible();
    level.bonus_count += 1;

    info!(symbol, points = bonus.points(), left_to_right, "Bonus activated");
    events.push(GameEvent::BonusActivated {
        symbol,
        points: bonus.points(),
    });
    level.bonus = Some(bonus);
}

/// Advances the active bonus: moves an edible one, times out an eaten one.
pub fn update_bonus(level: &mut Level, events: &mut Vec<GameEvent>) {
    let Some(bonus) = level.bonus.as_mut() else {
        return;
    };
    match bonus.state() {
        BonusState::Edible => {
            bonus.travel(&level.map);
            if bonus.state == BonusState::Expired {
                info!(symbol = bonus.symbol, "Bonus expired");
                events.push(GameEvent::BonusExpired { symbol: bonus.symbol });
                level.bonus = None;
            }
        }
        BonusState::Eaten => {
            bonus.ticks += 1;
            if bonus.ticks >= EATEN_DISPLAY_TICKS {
                level.bonus = None;
            }
        }
        BonusState::Inactive | BonusState::Expired => level.bonus = None,
    }
}
