//! Component types attached to entities.

use std::collections::VecDeque;

use glam::Vec2;

use crate::config::GameConfig;

use super::{EntityId, Position, Rotation};

/// Pixel-space placement and facing.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec2,
    pub rotation: Rotation,
}

impl Transform {
    pub fn new(position: Vec2, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// Transform centered on `tile`.
    pub fn at_tile(tile: Position, rotation: Rotation, tile_size: u32) -> Self {
        Self::new(tile.center(tile_size), rotation)
    }

    pub fn tile(&self, tile_size: u32) -> Position {
        Position::from_pixel(self.position, tile_size)
    }

    pub fn facing(&self) -> Vec2 {
        self.rotation.to_vector()
    }
}

/// Ability to perceive other entities.
///
/// The visibility lists are rebuilt from scratch by every perception pass;
/// their order is the order entities were scanned in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vision {
    /// Radius in pixels.
    pub range: f32,
    /// Field of view in degrees, centred on the facing.
    pub angle: f32,
    visible_enemies: Vec<EntityId>,
    visible_allies: Vec<EntityId>,
}

impl Vision {
    pub fn new(range: f32, angle: f32) -> Self {
        Self {
            range,
            angle,
            visible_enemies: Vec::new(),
            visible_allies: Vec::new(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.vision_range, config.vision_angle)
    }

    pub fn visible_enemies(&self) -> &[EntityId] {
        &self.visible_enemies
    }

    pub fn visible_allies(&self) -> &[EntityId] {
        &self.visible_allies
    }

    pub fn sees_enemy(&self) -> bool {
        !self.visible_enemies.is_empty()
    }

    pub fn can_see(&self, entity: EntityId) -> bool {
        self.visible_enemies.contains(&entity) || self.visible_allies.contains(&entity)
    }

    pub(crate) fn replace(&mut self, enemies: Vec<EntityId>, allies: Vec<EntityId>) {
        self.visible_enemies = enemies;
        self.visible_allies = allies;
    }

    pub(crate) fn clear(&mut self) {
        self.visible_enemies.clear();
        self.visible_allies.clear();
    }
}

impl Default for Vision {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Alertness levels of an autonomous entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AiState {
    #[default]
    Unaware,
    Detecting,
    Searching,
    Engaging,
    Fleeing,
}

impl AiState {
    pub const ALL: [AiState; 5] = [
        AiState::Unaware,
        AiState::Detecting,
        AiState::Searching,
        AiState::Engaging,
        AiState::Fleeing,
    ];
}

/// Autonomous behavior state.
///
/// `state` and the timers are only changed by [`crate::ai::advance`];
/// behavior nodes communicate through `target_position`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ai {
    state: AiState,
    previous_state: AiState,
    detection_time: f32,
    search_time: f32,
    detection_threshold: f32,
    search_timeout: f32,
    /// Tile the entity wants to move to or look at.
    pub target_position: Option<Position>,
}

impl Ai {
    pub fn new(detection_threshold: f32, search_timeout: f32) -> Self {
        Self {
            state: AiState::Unaware,
            previous_state: AiState::Unaware,
            detection_time: 0.0,
            search_time: 0.0,
            detection_threshold,
            search_timeout,
            target_position: None,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.detection_threshold, config.search_timeout)
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn previous_state(&self) -> AiState {
        self.previous_state
    }

    pub fn detection_time(&self) -> f32 {
        self.detection_time
    }

    pub fn search_time(&self) -> f32 {
        self.search_time
    }

    pub fn detection_threshold(&self) -> f32 {
        self.detection_threshold
    }

    pub fn search_timeout(&self) -> f32 {
        self.search_timeout
    }

    pub(crate) fn set_state(&mut self, next: AiState) {
        self.previous_state = self.state;
        self.state = next;
    }

    pub(crate) fn set_detection_time(&mut self, value: f32) {
        self.detection_time = value;
    }

    pub(crate) fn set_search_time(&mut self, value: f32) {
        self.search_time = value;
    }
}

impl Default for Ai {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Marks an entity as occupying its tile for walkability purposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Collider;

/// Movement request handed to the movement collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementIntent {
    /// Goal the current path leads to.
    pub target: Option<Position>,
    /// Tiles still to visit, nearest first; the current tile is not included.
    pub path: VecDeque<Position>,
}

impl MovementIntent {
    /// Replaces the request with a path toward `target`.
    ///
    /// `path` is a search result that starts on the entity's current tile;
    /// that first tile is dropped.
    pub fn set_path(&mut self, target: Position, path: Vec<Position>) {
        self.target = Some(target);
        self.path = path.into_iter().skip(1).collect();
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.path.clear();
    }

    pub fn next_step(&self) -> Option<Position> {
        self.path.front().copied()
    }

    pub fn is_idle(&self) -> bool {
        self.path.is_empty()
    }
}
