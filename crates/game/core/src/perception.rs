//! Perception pass.
//!
//! Every entity with [`Vision`](crate::state::Vision) has its visibility
//! lists rebuilt from scratch: an entity is seen when it lies inside the
//! viewer's cone and the tile line between them is not occluded. Entities
//! are scanned in ascending id order; that order is kept in the lists.

use glam::Vec2;
use tracing::{trace, warn};

use crate::config::GameConfig;
use crate::error::{Capability, MissingCapability};
use crate::grid::Walkability;
use crate::sight;
use crate::state::{EntityId, World};

/// True when `target` lies within `range` pixels of `origin` and within
/// half of `angle` degrees of `facing`.
///
/// A target on the origin itself is always in view.
pub fn in_view_cone(origin: Vec2, facing: Vec2, target: Vec2, range: f32, angle: f32) -> bool {
    let offset = target - origin;
    let distance = offset.length();
    if distance > range {
        return false;
    }
    let Some(direction) = offset.try_normalize() else {
        return true;
    };
    let Some(facing) = facing.try_normalize() else {
        return false;
    };
    let cos = facing.dot(direction).clamp(-1.0, 1.0);
    cos.acos().to_degrees() <= angle * 0.5
}

/// Rebuilds the visibility lists of every perceiving entity.
pub fn update<G: Walkability + ?Sized>(world: &mut World, grid: &G, config: &GameConfig) {
    let perceivers: Vec<EntityId> = world.visions.keys().copied().collect();

    for viewer in perceivers {
        let Some(results) = scan(world, grid, config, viewer) else {
            warn!(
                error = %MissingCapability::new(viewer, Capability::Transform),
                "perception skipped"
            );
            if let Some(vision) = world.visions.get_mut(&viewer) {
                vision.clear();
            }
            continue;
        };

        let (enemies, allies) = results;
        if let Some(vision) = world.visions.get_mut(&viewer) {
            vision.replace(enemies, allies);
        }
    }
}

fn scan<G: Walkability + ?Sized>(
    world: &World,
    grid: &G,
    config: &GameConfig,
    viewer: EntityId,
) -> Option<(Vec<EntityId>, Vec<EntityId>)> {
    let vision = world.vision(viewer)?;
    let transform = world.transform(viewer)?;
    let viewer_tile = transform.tile(config.tile_size);

    let mut enemies = Vec::new();
    let mut allies = Vec::new();

    for (&other, other_transform) in &world.transforms {
        if other == viewer {
            continue;
        }
        if !in_view_cone(
            transform.position,
            transform.facing(),
            other_transform.position,
            vision.range,
            vision.angle,
        ) {
            continue;
        }

        let other_tile = other_transform.tile(config.tile_size);
        if sight::is_blocked_within(grid, viewer_tile, other_tile, config.max_sight_distance) {
            trace!(%viewer, target = %other, "occluded");
            continue;
        }

        trace!(%viewer, target = %other, "visible");
        if viewer.is_hostile_to(other) {
            enemies.push(other);
        } else {
            allies.push(other);
        }
    }

    Some((enemies, allies))
}
