use std::fmt;

use glam::Vec2;

/// Unique identifier for any entity tracked in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    ///
    /// Perception classifies hostility against this identity alone: the
    /// player is an enemy to everyone else and everyone else is an enemy to
    /// the player.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }

    /// Returns true if `self` and `other` are on opposite sides.
    #[inline]
    pub const fn is_hostile_to(self, other: EntityId) -> bool {
        self.is_player() != other.is_player()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile containing the pixel-space point `pixel`.
    pub fn from_pixel(pixel: Vec2, tile_size: u32) -> Self {
        let size = tile_size.max(1) as f32;
        Self::new(
            (pixel.x / size).floor() as i32,
            (pixel.y / size).floor() as i32,
        )
    }

    /// Pixel-space center of this tile.
    pub fn center(self, tile_size: u32) -> Vec2 {
        let size = tile_size as f32;
        Vec2::new((self.x as f32 + 0.5) * size, (self.y as f32 + 0.5) * size)
    }

    /// Neighbouring tile one step toward `rotation`.
    pub fn step(self, rotation: Rotation) -> Self {
        let (dx, dy) = rotation.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when `other` is one cardinal step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Four-way facing. North is +y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Clockwise order, also the neighbour expansion order used by search.
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Rotation::North => (0, 1),
            Rotation::East => (1, 0),
            Rotation::South => (0, -1),
            Rotation::West => (-1, 0),
        }
    }

    /// Unit facing vector.
    pub fn to_vector(self) -> Vec2 {
        let (dx, dy) = self.delta();
        Vec2::new(dx as f32, dy as f32)
    }

    /// Closest four-way facing for `direction`; the dominant axis wins and
    /// horizontal wins ties.
    ///
    /// Returns `None` for a zero vector, which callers treat as "keep the
    /// current facing".
    pub fn from_vector(direction: Vec2) -> Option<Self> {
        if direction.length_squared() <= f32::EPSILON {
            return None;
        }
        let rotation = if direction.x.abs() >= direction.y.abs() {
            if direction.x > 0.0 {
                Rotation::East
            } else {
                Rotation::West
            }
        } else if direction.y > 0.0 {
            Rotation::North
        } else {
            Rotation::South
        };
        Some(rotation)
    }

    /// Facing needed to step from `from` to the adjacent tile `to`.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::from_vector(Vec2::new((to.x - from.x) as f32, (to.y - from.y) as f32))
    }

    pub const fn clockwise(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub const fn counter_clockwise(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub const fn opposite(self) -> Self {
        self.clockwise().clockwise()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_round_trip_lands_on_tile_center() {
        let tile = Position::new(3, 5);
        let center = tile.center(16);
        assert_eq!(center, Vec2::new(56.0, 88.0));
        assert_eq!(Position::from_pixel(center, 16), tile);
    }

    #[test]
    fn from_pixel_floors_negative_coordinates() {
        assert_eq!(
            Position::from_pixel(Vec2::new(-1.0, -17.0), 16),
            Position::new(-1, -2)
        );
    }

    #[test]
    fn rotation_from_zero_vector_is_none() {
        assert_eq!(Rotation::from_vector(Vec2::ZERO), None);
    }

    #[test]
    fn rotation_prefers_dominant_axis() {
        assert_eq!(Rotation::from_vector(Vec2::new(3.0, 1.0)), Some(Rotation::East));
        assert_eq!(Rotation::from_vector(Vec2::new(-1.0, -4.0)), Some(Rotation::South));
        assert_eq!(Rotation::from_vector(Vec2::new(-2.0, 2.0)), Some(Rotation::West));
    }

    #[test]
    fn clockwise_cycles_through_all_facings() {
        let mut rotation = Rotation::North;
        for expected in Rotation::ALL.iter().cycle().skip(1).take(4) {
            rotation = rotation.clockwise();
            assert_eq!(rotation, *expected);
        }
        assert_eq!(Rotation::East.counter_clockwise(), Rotation::North);
        assert_eq!(Rotation::West.opposite(), Rotation::East);
    }

    #[test]
    fn hostility_is_player_versus_everyone() {
        let guard = EntityId(4);
        let other = EntityId(9);
        assert!(EntityId::PLAYER.is_hostile_to(guard));
        assert!(guard.is_hostile_to(EntityId::PLAYER));
        assert!(!guard.is_hostile_to(other));
    }
}
