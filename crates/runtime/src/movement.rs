//! Path follower.
//!
//! Moves entities along the paths behavior nodes stored in their
//! [`MovementIntent`](game_core::MovementIntent). Each step an entity
//! advances up to `move_tiles_per_step` tiles, snapping to tile centers and
//! turning toward every tile it enters. An occupied next tile makes it wait;
//! a path that no longer starts next to the entity is dropped.

use game_core::{EntityId, Position, Rotation, WalkGrid, Walkability, World};
use tracing::{debug, trace};

/// One tile advanced by one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub entity: EntityId,
    pub from: Position,
    pub to: Position,
}

/// Advances every entity with a pending path. Collider occupancy in `grid`
/// follows the moves so that two entities never enter the same tile.
pub fn advance(
    world: &mut World,
    grid: &mut WalkGrid,
    tile_size: u32,
    tiles_per_step: u32,
) -> Vec<Move> {
    let movers: Vec<EntityId> = world
        .intents
        .iter()
        .filter(|(_, intent)| !intent.is_idle())
        .map(|(&id, _)| id)
        .collect();

    let mut moves = Vec::new();
    for entity in movers {
        for _ in 0..tiles_per_step {
            match step(world, grid, tile_size, entity) {
                Some(moved) => moves.push(moved),
                None => break,
            }
        }
    }
    moves
}

fn step(world: &mut World, grid: &mut WalkGrid, tile_size: u32, entity: EntityId) -> Option<Move> {
    let from = world.tile_of(entity, tile_size)?;
    let to = world.intent(entity)?.next_step()?;

    if !from.is_adjacent(to) {
        debug!(%entity, %from, next = %to, "stale path dropped");
        if let Some(intent) = world.intent_mut(entity) {
            intent.clear();
        }
        return None;
    }
    if grid.is_blocked(to) {
        trace!(%entity, next = %to, "waiting for tile");
        return None;
    }

    let transform = world.transform_mut(entity)?;
    transform.position = to.center(tile_size);
    if let Some(rotation) = Rotation::between(from, to) {
        transform.rotation = rotation;
    }
    if let Some(intent) = world.intent_mut(entity) {
        intent.path.pop_front();
    }
    if world.colliders.contains_key(&entity) {
        grid.set_occupied(from, false);
        grid.set_occupied(to, true);
    }

    Some(Move { entity, from, to })
}
