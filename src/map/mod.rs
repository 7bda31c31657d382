//! The world map: tile grid, food layer, portals and ghost house geometry.

pub mod direction;
pub mod parser;

use glam::{IVec2, Vec2};
use serde::Deserialize;
use strum_macros::{AsRefStr, EnumIter};
use tracing::{debug, warn};

use crate::constants::{points, HALF_TILE_SIZE, RAW_BOARD, TILE_SIZE};
use crate::error::{GameError, GameResult, MapError};
use crate::ghost::Personality;
use crate::map::parser::{MapTileParser, ParsedMap};

/// The terrain of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    /// Slows ghosts down; portal rows are lined with these.
    Tunnel,
    /// Ghost house door; only ghosts entering or leaving the house cross it.
    Door,
}

/// The content of the food layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Food {
    Pellet,
    Energizer,
}

/// A horizontal wrap-around passage.
///
/// Both ends lie one tile outside the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portal {
    pub left: IVec2,
    pub right: IVec2,
}

impl Portal {
    pub fn row(&self) -> i32 {
        self.left.y
    }
}

/// Ghost house geometry, in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct House {
    /// Top-left tile of the house walls.
    pub min_tile: IVec2,
    /// Size of the house including its walls.
    pub size: IVec2,
}

impl House {
    /// Width and height of the arcade house.
    pub const DEFAULT_SIZE: IVec2 = IVec2::new(8, 5);

    /// Builds the house from its two door tiles, which sit centred in the top wall.
    pub fn from_door(left_door: IVec2) -> Self {
        Self {
            min_tile: IVec2::new(left_door.x - 3, left_door.y),
            size: Self::DEFAULT_SIZE,
        }
    }

    /// Default house centred horizontally, slightly above the middle row.
    pub fn centered(width: i32, height: i32) -> Self {
        Self {
            min_tile: IVec2::new((width - Self::DEFAULT_SIZE.x) / 2, height / 2 - 3),
            size: Self::DEFAULT_SIZE,
        }
    }

    /// The tile directly above the left door tile.
    pub fn entry_tile(&self) -> IVec2 {
        IVec2::new(self.min_tile.x + self.size.x / 2 - 1, self.min_tile.y - 1)
    }

    /// Pixel position (actor centre) from which ghosts drop into the house.
    pub fn entry_position(&self) -> Vec2 {
        Vec2::new(
            (self.min_tile.x + self.size.x / 2) as f32 * TILE_SIZE,
            (self.min_tile.y - 1) as f32 * TILE_SIZE + HALF_TILE_SIZE,
        )
    }

    /// Pixel position of a ghost's seat inside the house.
    ///
    /// The first personality never sits at home; it is revived in the centre seat.
    pub fn seat(&self, personality: Personality) -> Vec2 {
        let center = Vec2::new(
            self.entry_position().x,
            (self.min_tile.y + self.size.y / 2) as f32 * TILE_SIZE + HALF_TILE_SIZE,
        );
        match personality {
            Personality::Blinky | Personality::Pinky => center,
            Personality::Inky => center - Vec2::new(2.0 * TILE_SIZE, 0.0),
            Personality::Clyde => center + Vec2::new(2.0 * TILE_SIZE, 0.0),
        }
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        let max = self.min_tile + self.size;
        tile.x >= self.min_tile.x && tile.y >= self.min_tile.y && tile.x < max.x && tile.y < max.y
    }
}

/// Converts a tile to the pixel position of its centre.
pub fn tile_center(tile: IVec2) -> Vec2 {
    tile.as_vec2() * TILE_SIZE + Vec2::splat(HALF_TILE_SIZE)
}

/// Converts a pixel position to the tile containing it.
pub fn tile_at(position: Vec2) -> IVec2 {
    (position / TILE_SIZE).floor().as_ivec2()
}

/// The playable map of a level.
#[derive(Debug, Clone)]
pub struct WorldMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    food: Vec<Option<Food>>,
    portals: Vec<Portal>,
    house: House,
    player_start: IVec2,
    total_food: u32,
    eaten_food: u32,
}

impl WorldMap {
    /// Parses and builds a map from a raw board.
    pub fn from_board(raw_board: &[&str]) -> GameResult<Self> {
        let parsed = MapTileParser::parse_board(raw_board)?;
        Ok(Self::from_parsed(parsed))
    }

    /// Builds a map from parsed board data, substituting defaults for missing
    /// house or start data.
    pub fn from_parsed(parsed: ParsedMap) -> Self {
        let ParsedMap {
            width,
            height,
            tiles,
            food,
            house_door,
            player_start,
        } = parsed;

        let house = match house_door.first() {
            Some(&left_door) => House::from_door(left_door),
            None => {
                let house = House::centered(width, height);
                warn!(min_tile = ?house.min_tile, "Board has no house door, using default house geometry");
                house
            }
        };

        let player_start = player_start.unwrap_or_else(|| {
            let start = IVec2::new(width / 2 - 1, house.min_tile.y + house.size.y + 6);
            warn!(?start, "Board has no player start, using default start tile");
            start
        });

        let portals: Vec<Portal> = (0..height)
            .filter(|&y| {
                tiles[(y * width) as usize] == Tile::Tunnel && tiles[(y * width + width - 1) as usize] == Tile::Tunnel
            })
            .map(|y| Portal {
                left: IVec2::new(-1, y),
                right: IVec2::new(width, y),
            })
            .collect();

        let total_food = food.iter().filter(|f| f.is_some()).count() as u32;
        debug!(width, height, total_food, portals = portals.len(), "World map built");

        Self {
            width,
            height,
            tiles,
            food,
            portals,
            house,
            player_start,
            total_food,
            eaten_food: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn house(&self) -> &House {
        &self.house
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn player_start(&self) -> IVec2 {
        self.player_start
    }

    pub fn in_bounds(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    fn index(&self, tile: IVec2) -> usize {
        (tile.y * self.width + tile.x) as usize
    }

    fn is_portal_row(&self, y: i32) -> bool {
        self.portals.iter().any(|portal| portal.row() == y)
    }

    /// Returns the tile at the given position, failing outside the board.
    pub fn try_tile(&self, tile: IVec2) -> Result<Tile, MapError> {
        if self.in_bounds(tile) {
            Ok(self.tiles[self.index(tile)])
        } else {
            Err(MapError::OutOfBounds(tile.x, tile.y))
        }
    }

    /// Returns the tile at the given position. Tiles beyond the horizontal
    /// border of a portal row are tunnel, everything else outside is wall.
    pub fn tile(&self, tile: IVec2) -> Tile {
        match self.try_tile(tile) {
            Ok(t) => t,
            Err(_) if self.is_portal_row(tile.y) => Tile::Tunnel,
            Err(_) => Tile::Wall,
        }
    }

    /// Whether actors moving through the maze may not enter the tile.
    pub fn is_blocked(&self, tile: IVec2) -> bool {
        matches!(self.tile(tile), Tile::Wall | Tile::Door)
    }

    pub fn is_tunnel(&self, tile: IVec2) -> bool {
        self.tile(tile) == Tile::Tunnel
    }

    /// Removes and returns the food at the tile, if any.
    pub fn remove_food(&mut self, tile: IVec2) -> Option<Food> {
        if !self.in_bounds(tile) {
            return None;
        }
        let index = self.index(tile);
        let food = self.food[index].take();
        if food.is_some() {
            self.eaten_food += 1;
        }
        food
    }

    pub fn total_food(&self) -> u32 {
        self.total_food
    }

    pub fn eaten_food(&self) -> u32 {
        self.eaten_food
    }

    pub fn food_remaining(&self) -> u32 {
        self.total_food - self.eaten_food
    }

    /// Wraps a position that left the board through a portal to the opposite side.
    pub fn wrap_portal(&self, position: Vec2) -> Vec2 {
        let tile = tile_at(position);
        if !self.is_portal_row(tile.y) {
            return position;
        }
        let span = (self.width + 2) as f32 * TILE_SIZE;
        if tile.x < -1 {
            position + Vec2::new(span, 0.0)
        } else if tile.x > self.width {
            position - Vec2::new(span, 0.0)
        } else {
            position
        }
    }
}

/// Map categories of the game variant. Each category has its own set of mazes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, AsRefStr, EnumIter)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum MapCategory {
    #[default]
    Arcade,
    Mini,
    Big,
    Strange,
}

impl MapCategory {
    /// Number of distinct maps in this category.
    pub const fn map_count(self) -> u32 {
        match self {
            MapCategory::Arcade => 4,
            MapCategory::Mini => 6,
            MapCategory::Big => 11,
            MapCategory::Strange => 15,
        }
    }

    /// Highest bonus symbol index this category awards.
    pub const fn max_bonus_symbol(self) -> u8 {
        match self {
            MapCategory::Strange => (points::BONUS_FACTORS.len() - 1) as u8,
            _ => 6,
        }
    }

    pub const fn extra_life_scores(self) -> [u32; 4] {
        match self {
            MapCategory::Arcade => points::ARCADE_EXTRA_LIFE_SCORES,
            _ => points::DEFAULT_EXTRA_LIFE_SCORES,
        }
    }

    /// The map number played at the given level.
    pub fn map_number_for_level(self, level_number: u32) -> u32 {
        match self {
            MapCategory::Arcade => match level_number {
                1..=2 => 1,
                3..=5 => 2,
                6..=9 => 3,
                10..=13 => 4,
                // From level 14 on, maps 3 and 4 alternate every four levels
                n => 3 + ((n - 14) / 4) % 2,
            },
            category => (level_number.max(1) - 1) % category.map_count() + 1,
        }
    }
}

/// Fails with a configuration error unless the category contains the map number.
pub fn validate_map_selection(category: MapCategory, number: u32) -> GameResult<()> {
    if (1..=category.map_count()).contains(&number) {
        Ok(())
    } else {
        Err(GameError::InvalidMapSelection { category, number })
    }
}

/// Supplies the map of each level.
pub trait MapSelector {
    fn select(&self, category: MapCategory, map_number: u32) -> GameResult<WorldMap>;
}

/// Serves the built-in arcade board for every valid selection.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinMapSelector;

impl MapSelector for BuiltinMapSelector {
    fn select(&self, category: MapCategory, map_number: u32) -> GameResult<WorldMap> {
        validate_map_selection(category, map_number)?;
        WorldMap::from_board(&RAW_BOARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> WorldMap {
        WorldMap::from_board(&RAW_BOARD).unwrap()
    }

    #[test]
    fn test_builtin_portals() {
        let map = builtin();
        assert_eq!(map.portals().len(), 1);
        let portal = map.portals()[0];
        assert_eq!(portal.left, IVec2::new(-1, 14));
        assert_eq!(portal.right, IVec2::new(28, 14));
        assert!(!map.in_bounds(portal.left));
        assert!(!map.is_blocked(portal.left));
    }

    #[test]
    fn test_house_geometry() {
        let map = builtin();
        let house = map.house();
        assert_eq!(house.min_tile, IVec2::new(10, 12));
        assert_eq!(house.entry_tile(), IVec2::new(13, 11));
        assert_eq!(house.entry_position(), Vec2::new(112.0, 92.0));
        assert_eq!(house.seat(Personality::Pinky), Vec2::new(112.0, 116.0));
        assert!(map.is_blocked(IVec2::new(13, 12)));
    }

    #[test]
    fn test_missing_house_uses_default() {
        let board = ["#####", "#P..#", "#####"];
        let map = WorldMap::from_board(&board).unwrap();
        assert_eq!(map.house().size, House::DEFAULT_SIZE);
        assert_eq!(map.player_start(), IVec2::new(1, 1));
    }

    #[test]
    fn test_remove_food_counts() {
        let mut map = builtin();
        let total = map.total_food();
        assert_eq!(map.remove_food(IVec2::new(1, 1)), Some(Food::Pellet));
        assert_eq!(map.remove_food(IVec2::new(1, 1)), None);
        assert_eq!(map.food_remaining(), total - 1);
        assert_eq!(map.eaten_food(), 1);
    }

    #[test]
    fn test_try_tile_out_of_bounds() {
        let map = builtin();
        assert!(matches!(map.try_tile(IVec2::new(-1, 0)), Err(MapError::OutOfBounds(-1, 0))));
        assert_eq!(map.tile(IVec2::new(-1, 0)), Tile::Wall);
    }

    #[test]
    fn test_portal_wrap() {
        let map = builtin();
        let left_outside = Vec2::new(-2.0 * TILE_SIZE + 1.0, 14.0 * TILE_SIZE + 4.0);
        let wrapped = map.wrap_portal(left_outside);
        assert_eq!(tile_at(wrapped).x, 28);
    }

    #[test]
    fn test_map_selection_validation() {
        assert!(validate_map_selection(MapCategory::Arcade, 4).is_ok());
        assert!(validate_map_selection(MapCategory::Arcade, 5).is_err());
        assert!(validate_map_selection(MapCategory::Mini, 0).is_err());
        assert_eq!(MapCategory::Arcade.map_number_for_level(1), 1);
        assert_eq!(MapCategory::Arcade.map_number_for_level(14), 3);
        assert_eq!(MapCategory::Arcade.map_number_for_level(18), 4);
        assert_eq!(MapCategory::Mini.map_number_for_level(7), 1);
    }
}
