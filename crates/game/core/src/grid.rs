//! Per-frame walkability snapshot.
//!
//! [`WalkGrid`] merges static terrain from a [`MapOracle`] with the tiles
//! occupied by colliders. It is rebuilt once per frame and only read
//! afterwards by the pathfinder and the occlusion test.

use crate::env::{MapDimensions, MapOracle};
use crate::state::{Position, World};

/// Read access shared by the pathfinder and the occlusion test.
pub trait Walkability {
    fn dimensions(&self) -> MapDimensions;

    /// True for walls, occupied tiles, and anything outside the map.
    fn is_blocked(&self, position: Position) -> bool;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    fn is_walkable(&self, position: Position) -> bool {
        !self.is_blocked(position)
    }
}

/// Boolean blocked/free grid sized to the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkGrid {
    dimensions: MapDimensions,
    terrain: Vec<bool>,
    occupied: Vec<bool>,
}

impl WalkGrid {
    /// All-free grid.
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            terrain: vec![false; dimensions.area()],
            occupied: vec![false; dimensions.area()],
        }
    }

    /// Grid holding only the static terrain of `map`.
    pub fn from_map<M: MapOracle + ?Sized>(map: &M) -> Self {
        let mut grid = Self::new(map.dimensions());
        grid.load_terrain(map);
        grid
    }

    /// Recomputes terrain and occupancy for the current frame.
    pub fn refresh<M: MapOracle + ?Sized>(&mut self, map: &M, world: &World, tile_size: u32) {
        if self.dimensions != map.dimensions() {
            *self = Self::new(map.dimensions());
        }
        self.load_terrain(map);

        self.occupied.fill(false);
        for id in world.colliders.keys() {
            let Some(transform) = world.transform(*id) else {
                continue;
            };
            if let Some(index) = self.dimensions.index(transform.tile(tile_size)) {
                self.occupied[index] = true;
            }
        }
    }

    fn load_terrain<M: MapOracle + ?Sized>(&mut self, map: &M) {
        let dimensions = self.dimensions;
        for (index, position) in dimensions.positions().enumerate() {
            self.terrain[index] = !map.is_walkable(position);
        }
    }

    /// Marks static terrain as blocked or free.
    pub fn set_terrain_blocked(&mut self, position: Position, blocked: bool) {
        if let Some(index) = self.dimensions.index(position) {
            self.terrain[index] = blocked;
        }
    }

    /// Marks a tile as held by a dynamic occupant.
    pub fn set_occupied(&mut self, position: Position, occupied: bool) {
        if let Some(index) = self.dimensions.index(position) {
            self.occupied[index] = occupied;
        }
    }

    pub fn is_terrain_blocked(&self, position: Position) -> bool {
        self.dimensions
            .index(position)
            .is_none_or(|index| self.terrain[index])
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.dimensions
            .index(position)
            .is_some_and(|index| self.occupied[index])
    }

    /// View in which occupants on `tiles` are ignored; terrain still blocks.
    ///
    /// A path request clears its own tile and its goal's tile so that the
    /// requester and its target do not block their own route.
    pub fn with_cleared(&self, tiles: [Position; 2]) -> ClearedGrid<'_> {
        ClearedGrid { grid: self, tiles }
    }
}

impl Walkability for WalkGrid {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn is_blocked(&self, position: Position) -> bool {
        match self.dimensions.index(position) {
            Some(index) => self.terrain[index] || self.occupied[index],
            None => true,
        }
    }
}

/// See [`WalkGrid::with_cleared`].
#[derive(Clone, Copy, Debug)]
pub struct ClearedGrid<'a> {
    grid: &'a WalkGrid,
    tiles: [Position; 2],
}

impl Walkability for ClearedGrid<'_> {
    fn dimensions(&self) -> MapDimensions {
        self.grid.dimensions
    }

    fn is_blocked(&self, position: Position) -> bool {
        if self.tiles.contains(&position) {
            self.grid.is_terrain_blocked(position)
        } else {
            self.grid.is_blocked(position)
        }
    }
}
