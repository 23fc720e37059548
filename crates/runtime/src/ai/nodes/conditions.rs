//! Condition nodes for AI behavior trees.
//!
//! Condition nodes check the entity's state and return Success or Failure.
//! They never modify the context.

use behavior_tree::{Behavior, Status};

use crate::ai::AiContext;

/// Succeeds when the last perception pass found at least one enemy.
///
/// # Example
///
/// ```rust,ignore
/// // Stare at whoever is in sight
/// Sequence::new(vec![
///     Box::new(HasVisibleEnemy),
///     Box::new(FaceNearestEnemy),
/// ])
/// ```
pub struct HasVisibleEnemy;

impl Behavior<AiContext> for HasVisibleEnemy {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.vision().is_some_and(|vision| vision.sees_enemy()))
    }
}

/// Succeeds while the entity still has tiles left to walk.
pub struct HasPath;

impl Behavior<AiContext> for HasPath {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let moving = ctx
            .world
            .intent(ctx.entity)
            .is_some_and(|intent| !intent.is_idle());
        Status::from_bool(moving)
    }
}

/// Succeeds when the entity has a target tile to move to or look at.
pub struct HasTarget;

impl Behavior<AiContext> for HasTarget {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.ai().is_some_and(|ai| ai.target_position.is_some()))
    }
}
