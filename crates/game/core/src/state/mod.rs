//! Entity store.
//!
//! Entities are plain ids; each component type lives in its own map keyed by
//! id. Maps are ordered so every system visits entities in ascending id
//! order, which keeps perception lists and logs reproducible.
mod common;
mod components;

use std::collections::{BTreeMap, BTreeSet};

pub use common::{EntityId, Position, Rotation};
pub use components::{Ai, AiState, Collider, MovementIntent, Transform, Vision};

/// All entities and their components.
#[derive(Clone, Debug, Default)]
pub struct World {
    /// Sequential entity ID allocator (monotonically increasing).
    ///
    /// Never reused. ID 0 is reserved for [`EntityId::PLAYER`].
    next_entity_id: u32,
    entities: BTreeSet<EntityId>,
    pub transforms: BTreeMap<EntityId, Transform>,
    pub visions: BTreeMap<EntityId, Vision>,
    pub ais: BTreeMap<EntityId, Ai>,
    pub colliders: BTreeMap<EntityId, Collider>,
    pub intents: BTreeMap<EntityId, MovementIntent>,
}

impl World {
    pub fn new() -> Self {
        Self {
            next_entity_id: 1,
            ..Self::default()
        }
    }

    /// Creates a new entity with no components.
    pub fn spawn(&mut self) -> EntityBuilder<'_> {
        let id = EntityId(self.next_entity_id.max(1));
        self.next_entity_id = id.0 + 1;
        self.entities.insert(id);
        EntityBuilder { world: self, id }
    }

    /// Creates the player entity, or returns the existing one.
    pub fn spawn_player(&mut self) -> EntityBuilder<'_> {
        self.entities.insert(EntityId::PLAYER);
        EntityBuilder {
            world: self,
            id: EntityId::PLAYER,
        }
    }

    /// Removes an entity and all of its components.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.entities.remove(&id) {
            return false;
        }
        self.transforms.remove(&id);
        self.visions.remove(&id);
        self.ais.remove(&id);
        self.colliders.remove(&id);
        self.intents.remove(&id);
        true
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn transform(&self, id: EntityId) -> Option<&Transform> {
        self.transforms.get(&id)
    }

    pub fn transform_mut(&mut self, id: EntityId) -> Option<&mut Transform> {
        self.transforms.get_mut(&id)
    }

    pub fn vision(&self, id: EntityId) -> Option<&Vision> {
        self.visions.get(&id)
    }

    pub fn ai(&self, id: EntityId) -> Option<&Ai> {
        self.ais.get(&id)
    }

    pub fn ai_mut(&mut self, id: EntityId) -> Option<&mut Ai> {
        self.ais.get_mut(&id)
    }

    pub fn intent(&self, id: EntityId) -> Option<&MovementIntent> {
        self.intents.get(&id)
    }

    pub fn intent_mut(&mut self, id: EntityId) -> Option<&mut MovementIntent> {
        self.intents.get_mut(&id)
    }

    /// Tile currently occupied by `id`.
    pub fn tile_of(&self, id: EntityId, tile_size: u32) -> Option<Position> {
        self.transforms.get(&id).map(|t| t.tile(tile_size))
    }
}

/// Attaches components to a freshly spawned entity.
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    id: EntityId,
}

impl EntityBuilder<'_> {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn with_transform(self, transform: Transform) -> Self {
        self.world.transforms.insert(self.id, transform);
        self
    }

    pub fn with_vision(self, vision: Vision) -> Self {
        self.world.visions.insert(self.id, vision);
        self
    }

    pub fn with_ai(self, ai: Ai) -> Self {
        self.world.ais.insert(self.id, ai);
        self
    }

    pub fn with_collider(self) -> Self {
        self.world.colliders.insert(self.id, Collider);
        self
    }

    pub fn with_intent(self) -> Self {
        self.world.intents.insert(self.id, MovementIntent::default());
        self
    }
}
