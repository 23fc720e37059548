//! Traits describing read-only world data.
//!
//! The map oracle exposes static geometry; everything dynamic is layered on
//! top of it by the walkability grid.
mod map;

pub use map::{MapDimensions, MapOracle, StaticTile, TerrainKind};
