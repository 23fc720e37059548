//! Action nodes for AI behavior trees.
//!
//! Action nodes change the entity: its facing, its target tile, or the path
//! handed to the movement stepper. Nodes that take several ticks keep their
//! progress in the entity's tree memory.

use behavior_tree::{Behavior, Blackboard, NodeId, Status};
use game_core::{
    Capability, GameError, MissingCapability, Position, Rotation, Walkability, pathfinding,
};
use tracing::{debug, warn};

use crate::ai::AiContext;

/// Returns Running until `duration` seconds of step time have passed.
///
/// The elapsed time is stored per entity, so one instance can be shared by
/// every entity ticking the same tree.
///
/// # Example
///
/// ```rust,ignore
/// // Pause, then turn
/// MemorySequence::new(vec![
///     Box::new(Wait::new(1.0)),
///     Box::new(TurnClockwise),
/// ])
/// ```
pub struct Wait {
    id: NodeId,
    duration: f32,
}

impl Wait {
    pub fn new(duration: f32) -> Self {
        Self {
            id: NodeId::next(),
            duration,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl Behavior<AiContext> for Wait {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let delta = ctx.delta;
        let state = ctx.memory().entry(self.id);
        state.elapsed += delta;

        if state.elapsed >= self.duration {
            state.finish(Status::Success);
            Status::Success
        } else {
            state.run();
            Status::Running
        }
    }

    fn halt(&self, ctx: &mut AiContext) {
        ctx.memory().reset(self.id);
    }
}

/// Turns a quarter turn clockwise.
pub struct TurnClockwise;

impl Behavior<AiContext> for TurnClockwise {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        match ctx.transform_mut() {
            Some(transform) => {
                transform.rotation = transform.rotation.clockwise();
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

/// Turns toward the closest visible enemy.
///
/// An enemy on the entity's own tile leaves the facing unchanged.
pub struct FaceNearestEnemy;

impl Behavior<AiContext> for FaceNearestEnemy {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let Some((enemy, _)) = ctx.nearest_enemy() else {
            return Status::Failure;
        };
        let Some(enemy_position) = ctx.world.transform(enemy).map(|t| t.position) else {
            return Status::Failure;
        };
        let Some(transform) = ctx.transform_mut() else {
            return Status::Failure;
        };

        if let Some(rotation) = Rotation::from_vector(enemy_position - transform.position) {
            transform.rotation = rotation;
        }
        Status::Success
    }
}

/// Sets the target tile to the closest visible enemy's tile.
pub struct TargetNearestEnemy;

impl Behavior<AiContext> for TargetNearestEnemy {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let Some((_, tile)) = ctx.nearest_enemy() else {
            return Status::Failure;
        };
        match ctx.ai_mut() {
            Some(ai) => {
                ai.target_position = Some(tile);
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

/// Requests an A* path from the entity's tile to its target tile.
///
/// Occupants of the start and goal tiles are ignored so that neither the
/// entity nor whoever stands on the goal blocks the request. On success the
/// path is stored in the entity's movement intent; when the goal has not
/// changed and a path is still being walked, the existing path is kept.
pub struct FindPathToTarget;

impl Behavior<AiContext> for FindPathToTarget {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let entity = ctx.entity;
        let Some(start) = ctx.tile() else {
            debug!(error = %MissingCapability::new(entity, Capability::Transform), "no path request");
            return Status::Failure;
        };
        let Some(goal) = ctx.ai().and_then(|ai| ai.target_position) else {
            return Status::Failure;
        };
        let Some(intent) = ctx.world.intent(entity) else {
            debug!(
                error = %MissingCapability::new(entity, Capability::MovementIntent),
                "no path request"
            );
            return Status::Failure;
        };
        if intent.target == Some(goal) && path_is_fresh(&ctx.grid, start, intent.next_step()) {
            return Status::Success;
        }

        let view = ctx.grid.with_cleared([start, goal]);
        match pathfinding::search(&view, start, goal) {
            Ok(path) => {
                debug!(%entity, %start, %goal, steps = path.steps(), "path found");
                if let Some(intent) = ctx.world.intent_mut(entity) {
                    intent.set_path(goal, path.into_tiles());
                }
                Status::Success
            }
            Err(error) => {
                if error.severity().is_recoverable() {
                    debug!(%entity, %error, code = error.error_code(), "no path");
                } else {
                    warn!(%entity, %error, code = error.error_code(), "invalid path request");
                }
                if let Some(intent) = ctx.world.intent_mut(entity) {
                    intent.clear();
                }
                Status::Failure
            }
        }
    }
}

/// A stored path is reused only while its next tile is still a free
/// neighbour of the entity.
fn path_is_fresh<G: Walkability>(grid: &G, start: Position, next: Option<Position>) -> bool {
    next.is_some_and(|next| start.is_adjacent(next) && !grid.is_blocked(next))
}

/// Running while the movement intent still holds tiles, Success once it is
/// empty.
pub struct AwaitArrival;

impl Behavior<AiContext> for AwaitArrival {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        match ctx.world.intent(ctx.entity) {
            Some(intent) if intent.is_idle() => Status::Success,
            Some(_) => Status::Running,
            None => Status::Failure,
        }
    }
}

/// Abandons the current path.
pub struct StopMoving;

impl Behavior<AiContext> for StopMoving {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        match ctx.world.intent_mut(ctx.entity) {
            Some(intent) => {
                intent.clear();
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

/// Targets a free tile up to `distance` tiles away from the nearest threat.
///
/// The direction pointing straight away from the threat is tried first,
/// then the two perpendicular ones. Fails when the entity is cornered.
pub struct TargetAwayFromThreat {
    pub distance: u32,
}

impl Behavior<AiContext> for TargetAwayFromThreat {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let Some((_, threat)) = ctx.nearest_enemy() else {
            return Status::Failure;
        };
        let Some(start) = ctx.tile() else {
            return Status::Failure;
        };

        let away = Rotation::between(threat, start)
            .or_else(|| ctx.transform().map(|t| t.rotation.opposite()))
            .unwrap_or(Rotation::North);

        let target = [away, away.clockwise(), away.counter_clockwise()]
            .into_iter()
            .map(|rotation| walk_until_blocked(&ctx.grid, start, rotation, self.distance))
            .find(|tile| *tile != start);

        let Some(target) = target else {
            debug!(entity = %ctx.entity, %start, "cornered");
            return Status::Failure;
        };
        match ctx.ai_mut() {
            Some(ai) => {
                ai.target_position = Some(target);
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

fn walk_until_blocked<G: Walkability>(
    grid: &G,
    start: Position,
    rotation: Rotation,
    distance: u32,
) -> Position {
    let mut tile = start;
    for _ in 0..distance {
        let next = tile.step(rotation);
        if grid.is_blocked(next) {
            break;
        }
        tile = next;
    }
    tile
}
