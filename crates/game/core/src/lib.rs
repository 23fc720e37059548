//! Deterministic NPC perception and decision logic.
//!
//! `game-core` owns the entity data model and every pure per-frame system:
//! the walkability grid, A* pathfinding, the tile occlusion test, the
//! perception pass, and the alertness state machine. Nothing here knows
//! about behavior trees or wall-clock time; the runtime crate drives these
//! systems in order once per simulation step.
pub mod ai;
pub mod config;
pub mod env;
pub mod error;
pub mod grid;
pub mod pathfinding;
pub mod perception;
pub mod sight;
pub mod state;

pub use ai::Transition;
pub use config::GameConfig;
pub use env::{MapDimensions, MapOracle, StaticTile, TerrainKind};
pub use error::{Capability, ErrorSeverity, GameError, MissingCapability};
pub use grid::{ClearedGrid, WalkGrid, Walkability};
pub use pathfinding::{Path, PathError, STEP_COST, find_path, search};
pub use state::{
    Ai, AiState, Collider, EntityBuilder, EntityId, MovementIntent, Position, Rotation, Transform,
    Vision, World,
};
