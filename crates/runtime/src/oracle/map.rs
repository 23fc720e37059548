//! Static map layout served through [`game_core::MapOracle`].
use std::collections::BTreeMap;

use game_core::{MapDimensions, MapOracle, Position, StaticTile, TerrainKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map layout has no rows")]
    Empty,

    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Immutable tile layout.
///
/// Holds map structure that doesn't change during a run. Doors, rubble and
/// other dynamic blockers belong in the world as colliders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticMap {
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
}

impl StaticMap {
    /// Map of the given size filled with `terrain`.
    pub fn filled(dimensions: MapDimensions, terrain: TerrainKind) -> Self {
        Self {
            dimensions,
            tiles: vec![StaticTile::new(terrain); dimensions.area()],
        }
    }

    /// Parses an ASCII layout; see [`AsciiMap::parse`].
    pub fn from_ascii(layout: &str) -> Result<Self, MapError> {
        AsciiMap::parse(layout).map(|parsed| parsed.map)
    }

    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) {
        if let Some(index) = self.dimensions.index(position) {
            self.tiles[index] = StaticTile::new(terrain);
        }
    }
}

impl MapOracle for StaticMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.dimensions
            .index(position)
            .map(|index| self.tiles[index])
    }
}

/// A parsed ASCII layout and the letters found in it.
#[derive(Clone, Debug)]
pub struct AsciiMap {
    pub map: StaticMap,
    /// Tiles of every alphabetic glyph, in reading order.
    pub markers: BTreeMap<char, Vec<Position>>,
}

impl AsciiMap {
    /// Parses rows of glyphs: `#` wall, `~` water, space void, anything else
    /// floor. Letters are floor tiles that are also recorded as markers.
    ///
    /// The first row is the northern edge, so it receives the highest `y`.
    /// Blank leading and trailing lines are ignored.
    pub fn parse(layout: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = layout
            .lines()
            .skip_while(|line| line.trim().is_empty())
            .collect();
        let rows: Vec<&str> = match rows.iter().rposition(|line| !line.trim().is_empty()) {
            Some(last) => rows[..=last].to_vec(),
            None => return Err(MapError::Empty),
        };

        let width = rows[0].chars().count();
        let height = rows.len();
        let dimensions = MapDimensions::new(width as u32, height as u32);
        let mut map = StaticMap::filled(dimensions, TerrainKind::Floor);
        let mut markers: BTreeMap<char, Vec<Position>> = BTreeMap::new();

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }

            let y = (height - 1 - row) as i32;
            for (x, glyph) in line.chars().enumerate() {
                let position = Position::new(x as i32, y);
                map.set_terrain(position, TerrainKind::from_glyph(glyph));
                if glyph.is_alphabetic() {
                    markers.entry(glyph).or_default().push(position);
                }
            }
        }

        Ok(Self { map, markers })
    }

    /// First tile marked with `glyph`.
    pub fn marker(&self, glyph: char) -> Option<Position> {
        self.markers.get(&glyph)?.first().copied()
    }

    /// All tiles marked with `glyph`.
    pub fn markers_of(&self, glyph: char) -> &[Position] {
        self.markers.get(&glyph).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = "
#####
#P.G#
#.~.#
#####
";

    #[test]
    fn parses_terrain_with_north_row_first() {
        let parsed = AsciiMap::parse(LAYOUT).unwrap();
        let map = &parsed.map;

        assert_eq!(map.dimensions(), MapDimensions::new(5, 4));
        assert!(!map.is_walkable(Position::new(0, 0)));
        assert!(map.is_walkable(Position::new(1, 2)));
        assert_eq!(
            map.tile(Position::new(2, 1)).map(StaticTile::terrain),
            Some(TerrainKind::Water)
        );
        assert!(map.tile(Position::new(5, 0)).is_none());
    }

    #[test]
    fn letters_become_markers_on_floor() {
        let parsed = AsciiMap::parse(LAYOUT).unwrap();
        assert_eq!(parsed.marker('P'), Some(Position::new(1, 2)));
        assert_eq!(parsed.markers_of('G'), &[Position::new(3, 2)]);
        assert!(parsed.markers_of('X').is_empty());
        assert!(parsed.map.is_walkable(Position::new(3, 2)));
    }

    #[test]
    fn rejects_ragged_and_empty_layouts() {
        assert_eq!(StaticMap::from_ascii("\n  \n"), Err(MapError::Empty));
        assert_eq!(
            StaticMap::from_ascii("###\n##\n"),
            Err(MapError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }
}
