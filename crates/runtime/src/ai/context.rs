//! Blackboard shared by the nodes of every behavior tree.
//!
//! The [`AiContext`] owns the simulation data the nodes work on:
//!
//! - the [`World`] with every entity's components
//! - the frame's [`WalkGrid`] for path requests
//! - the entity being ticked and the step's delta time
//! - one [`TreeMemory`] per entity for nodes that span several ticks
//!
//! Trees are shared by all entities, so anything a node must remember
//! between ticks is kept in the memory of the current entity, never in the
//! node itself.

use std::collections::BTreeMap;

use behavior_tree::{Blackboard, TreeMemory};
use game_core::{Ai, EntityId, Position, Transform, Vision, WalkGrid, World};

use crate::config::RuntimeConfig;

pub struct AiContext {
    /// Entity whose tree is being ticked.
    pub entity: EntityId,

    /// Seconds elapsed since the previous step.
    pub delta: f32,

    pub world: World,

    /// Walkability snapshot for the current step.
    pub grid: WalkGrid,

    pub config: RuntimeConfig,

    memories: BTreeMap<EntityId, TreeMemory>,
}

impl AiContext {
    pub fn new(world: World, grid: WalkGrid, config: RuntimeConfig) -> Self {
        Self {
            entity: EntityId::PLAYER,
            delta: 0.0,
            world,
            grid,
            config,
            memories: BTreeMap::new(),
        }
    }

    /// Selects the entity the next tick acts for.
    pub fn focus(&mut self, entity: EntityId) {
        self.entity = entity;
    }

    pub fn tile_size(&self) -> u32 {
        self.config.game.tile_size
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.world.transform(self.entity)
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.world.transform_mut(self.entity)
    }

    pub fn vision(&self) -> Option<&Vision> {
        self.world.vision(self.entity)
    }

    pub fn ai(&self) -> Option<&Ai> {
        self.world.ai(self.entity)
    }

    pub fn ai_mut(&mut self) -> Option<&mut Ai> {
        self.world.ai_mut(self.entity)
    }

    /// Tile the current entity stands on.
    pub fn tile(&self) -> Option<Position> {
        self.world.tile_of(self.entity, self.tile_size())
    }

    /// Closest visible enemy and the tile it stands on.
    ///
    /// Distance is measured in pixels; ties keep perception order.
    pub fn nearest_enemy(&self) -> Option<(EntityId, Position)> {
        let origin = self.transform()?.position;
        let vision = self.vision()?;

        vision
            .visible_enemies()
            .iter()
            .filter_map(|&enemy| {
                let transform = self.world.transform(enemy)?;
                let distance = origin.distance_squared(transform.position);
                Some((distance, enemy, transform.tile(self.tile_size())))
            })
            .fold(None, |best: Option<(f32, EntityId, Position)>, candidate| {
                match best {
                    Some(current) if current.0 <= candidate.0 => Some(current),
                    _ => Some(candidate),
                }
            })
            .map(|(_, enemy, tile)| (enemy, tile))
    }

    /// Tree memory of `entity`, if it has ever been ticked.
    pub fn memory_of(&self, entity: EntityId) -> Option<&TreeMemory> {
        self.memories.get(&entity)
    }

    /// Drops all tree memory of `entity`.
    pub fn forget(&mut self, entity: EntityId) {
        self.memories.remove(&entity);
    }

    /// Drops tree memory of entities no longer in the world.
    pub fn forget_despawned(&mut self) {
        let world = &self.world;
        self.memories.retain(|entity, _| world.contains(*entity));
    }
}

impl Blackboard for AiContext {
    fn memory(&mut self) -> &mut TreeMemory {
        self.memories.entry(self.entity).or_default()
    }
}

#[cfg(test)]
mod tests {
    use game_core::{MapDimensions, Rotation};

    use super::*;

    #[test]
    fn nearest_enemy_prefers_shorter_distance() {
        let mut world = World::new();
        world
            .spawn_player()
            .with_transform(Transform::at_tile(Position::new(0, 0), Rotation::East, 16))
            .with_vision(Vision::default());
        world
            .spawn()
            .with_transform(Transform::at_tile(Position::new(4, 0), Rotation::West, 16));
        let near = world
            .spawn()
            .with_transform(Transform::at_tile(Position::new(2, 0), Rotation::West, 16))
            .id();

        let grid = WalkGrid::new(MapDimensions::new(8, 8));
        let mut ctx = AiContext::new(world, grid, RuntimeConfig::default());
        ctx.focus(EntityId::PLAYER);
        assert_eq!(ctx.nearest_enemy(), None);

        game_core::perception::update(&mut ctx.world, &ctx.grid, &ctx.config.game);
        assert_eq!(ctx.vision().map(|v| v.visible_enemies().len()), Some(2));
        assert_eq!(ctx.nearest_enemy(), Some((near, Position::new(2, 0))));
    }

    #[test]
    fn memory_is_kept_per_entity() {
        let grid = WalkGrid::new(MapDimensions::new(1, 1));
        let mut ctx = AiContext::new(World::new(), grid, RuntimeConfig::default());
        let id = behavior_tree::NodeId::next();

        ctx.focus(EntityId(1));
        ctx.memory().entry(id).elapsed = 0.5;
        ctx.focus(EntityId(2));
        assert_eq!(ctx.memory().entry(id).elapsed, 0.0);

        let elapsed = ctx
            .memory_of(EntityId(1))
            .and_then(|memory| memory.get(id))
            .map(|state| state.elapsed);
        assert_eq!(elapsed, Some(0.5));
        ctx.forget(EntityId(1));
        assert!(ctx.memory_of(EntityId(1)).is_none());
    }

    #[test]
    fn forget_despawned_keeps_live_entities() {
        let mut world = World::new();
        let alive = world.spawn().id();
        let gone = world.spawn().id();
        let grid = WalkGrid::new(MapDimensions::new(1, 1));
        let mut ctx = AiContext::new(world, grid, RuntimeConfig::default());
        let id = behavior_tree::NodeId::next();

        for entity in [alive, gone] {
            ctx.focus(entity);
            ctx.memory().entry(id).run();
        }
        ctx.world.despawn(gone);
        ctx.forget_despawned();

        assert!(ctx.memory_of(alive).is_some());
        assert!(ctx.memory_of(gone).is_none());
    }
}
