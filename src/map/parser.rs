//! Map parsing functionality for converting raw board layouts into structured data.

use glam::IVec2;

use crate::error::ParseError;
use crate::map::{Food, Tile};

/// A single parsed board character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCell {
    pub tile: Tile,
    pub food: Option<Food>,
}

/// Represents the parsed data from a raw board layout.
#[derive(Debug)]
pub struct ParsedMap {
    pub width: i32,
    pub height: i32,
    /// The parsed tile layout, row-major.
    pub tiles: Vec<Tile>,
    /// The food layer, row-major.
    pub food: Vec<Option<Food>>,
    /// The positions of the house door tiles, in reading order.
    pub house_door: Vec<IVec2>,
    /// Pac-Man's starting tile.
    pub player_start: Option<IVec2>,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a tile and its food content.
    pub fn parse_character(c: char) -> Result<ParsedCell, ParseError> {
        let (tile, food) = match c {
            '#' => (Tile::Wall, None),
            '.' => (Tile::Empty, Some(Food::Pellet)),
            'o' => (Tile::Empty, Some(Food::Energizer)),
            ' ' => (Tile::Empty, None),
            'T' => (Tile::Tunnel, None),
            'P' => (Tile::Empty, None), // Pac-Man's starting position, treated as empty
            '=' => (Tile::Door, None),
            _ => return Err(ParseError::UnknownCharacter(c)),
        };
        Ok(ParsedCell { tile, food })
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty, has rows of differing widths,
    /// contains unknown characters, or has a house door that is present but not
    /// made of exactly two `=` characters. A board with no door at all is accepted;
    /// the caller substitutes a default house.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        let expected = raw_board.first().map(|row| row.chars().count()).ok_or(ParseError::Empty)?;
        if expected == 0 {
            return Err(ParseError::Empty);
        }

        let mut tiles = Vec::with_capacity(expected * raw_board.len());
        let mut food = Vec::with_capacity(expected * raw_board.len());
        let mut house_door = Vec::new();
        let mut player_start = None;

        for (y, line) in raw_board.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(ParseError::RaggedRow { row: y, found, expected });
            }

            for (x, character) in line.chars().enumerate() {
                let cell = Self::parse_character(character)?;
                let position = IVec2::new(x as i32, y as i32);

                match character {
                    '=' => house_door.push(position),
                    'P' => player_start = Some(position),
                    _ => {}
                }

                tiles.push(cell.tile);
                food.push(cell.food);
            }
        }

        if !house_door.is_empty() && house_door.len() != 2 {
            return Err(ParseError::InvalidHouseDoorCount(house_door.len()));
        }

        Ok(ParsedMap {
            width: expected as i32,
            height: raw_board.len() as i32,
            tiles,
            food,
            house_door,
            player_start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;

    #[test]
    fn test_parse_character() {
        assert_eq!(MapTileParser::parse_character('#').unwrap().tile, Tile::Wall);
        assert_eq!(MapTileParser::parse_character('o').unwrap().food, Some(Food::Energizer));
        assert_eq!(MapTileParser::parse_character('=').unwrap().tile, Tile::Door);
        assert!(MapTileParser::parse_character('?').is_err());
    }

    #[test]
    fn test_parse_builtin_board() {
        let parsed = MapTileParser::parse_board(&RAW_BOARD).unwrap();
        assert_eq!(parsed.width, 28);
        assert_eq!(parsed.height, 31);
        assert_eq!(parsed.house_door, vec![IVec2::new(13, 12), IVec2::new(14, 12)]);
        assert_eq!(parsed.player_start, Some(IVec2::new(13, 23)));
    }

    #[test]
    fn test_single_door_tile_rejected() {
        let board = ["####", "#=.#", "####"];
        let result = MapTileParser::parse_board(&board);
        assert!(matches!(result, Err(ParseError::InvalidHouseDoorCount(1))));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let board = ["####", "#.#", "####"];
        assert!(matches!(
            MapTileParser::parse_board(&board),
            Err(ParseError::RaggedRow { row: 1, .. })
        ));
    }
}
