//! One complete tree per alertness state.
//!
//! Reactive sequences are used where every tick must re-check what the
//! entity sees; memory sequences where the tree walks through timed steps
//! and must resume where it paused.

use behavior_tree::{MemorySequence, Selector, Sequence};

use crate::ai::nodes::{StopMoving, Wait};
use crate::config::RuntimeConfig;

use super::{BehaviorTree, patterns};

/// Tiles a fleeing entity tries to put between itself and the threat.
pub const FLEE_DISTANCE: u32 = 4;

/// Idle watch: wait, then turn clockwise.
pub fn unaware(config: &RuntimeConfig) -> BehaviorTree {
    patterns::wait_then_turn(config.idle_wait_seconds)
}

/// Freeze and stare at the threat until the controller decides.
pub fn detecting() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(StopMoving),
        patterns::watch_threat(),
    ]))
}

/// Chase the nearest visible enemy.
pub fn engaging() -> BehaviorTree {
    patterns::chase_nearest_enemy()
}

/// Walk to the last known enemy tile, then look around.
pub fn searching(config: &RuntimeConfig) -> BehaviorTree {
    Box::new(MemorySequence::new(vec![
        patterns::optional(patterns::walk_to_target()),
        patterns::look_around(config.search_look_seconds),
    ]))
}

/// Run away while a threat is visible; otherwise hold still.
pub fn fleeing(config: &RuntimeConfig) -> BehaviorTree {
    Box::new(Selector::new(vec![
        patterns::run_from_threat(FLEE_DISTANCE),
        Box::new(Wait::new(config.idle_wait_seconds)),
    ]))
}

#[cfg(test)]
mod tests {
    use behavior_tree::{Behavior, Status};
    use game_core::{
        Ai, EntityId, MapDimensions, Position, Rotation, Transform, Vision, WalkGrid, World,
    };

    use super::*;
    use crate::ai::AiContext;
    use crate::movement;

    const TILE: u32 = 16;

    fn guard_context(at: Position, player: Option<Position>) -> (AiContext, EntityId) {
        let mut world = World::new();
        let guard = world
            .spawn()
            .with_transform(Transform::at_tile(at, Rotation::East, TILE))
            .with_vision(Vision::new(160.0, 360.0))
            .with_ai(Ai::default())
            .with_collider()
            .with_intent()
            .id();
        if let Some(tile) = player {
            world
                .spawn_player()
                .with_transform(Transform::at_tile(tile, Rotation::West, TILE))
                .with_collider();
        }

        let config = RuntimeConfig::default();
        let mut grid = WalkGrid::new(MapDimensions::new(10, 10));
        grid.set_occupied(at, true);
        if let Some(tile) = player {
            grid.set_occupied(tile, true);
        }
        let mut ctx = AiContext::new(world, grid, config);
        game_core::perception::update(&mut ctx.world, &ctx.grid, &ctx.config.game);
        ctx.focus(guard);
        ctx.delta = ctx.config.step_seconds;
        (ctx, guard)
    }

    fn walk(ctx: &mut AiContext) {
        let tiles = ctx.config.move_tiles_per_step;
        movement::advance(&mut ctx.world, &mut ctx.grid, TILE, tiles);
    }

    #[test]
    fn unaware_turns_after_idle_wait() {
        let (mut ctx, _) = guard_context(Position::new(2, 2), None);
        let tree = unaware(&ctx.config);

        for _ in 0..3 {
            assert_eq!(tree.tick(&mut ctx), Status::Running);
        }
        assert_eq!(tree.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.transform().map(|t| t.rotation), Some(Rotation::South));
    }

    #[test]
    fn detecting_faces_threat_without_moving() {
        let (mut ctx, guard) = guard_context(Position::new(5, 5), Some(Position::new(5, 2)));
        let tree = detecting();

        assert_eq!(tree.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.transform().map(|t| t.rotation), Some(Rotation::South));
        assert_eq!(
            ctx.ai().and_then(|ai| ai.target_position),
            Some(Position::new(5, 2))
        );
        assert!(ctx.world.intent(guard).unwrap().is_idle());
    }

    #[test]
    fn searching_walks_to_last_known_tile_then_looks_around() {
        let (mut ctx, _) = guard_context(Position::new(1, 1), None);
        let last_seen = Position::new(4, 1);
        if let Some(ai) = ctx.ai_mut() {
            ai.target_position = Some(last_seen);
        }
        let tree = searching(&ctx.config);

        let mut ticks = 0;
        let mut facings = Vec::new();
        loop {
            let status = tree.tick(&mut ctx);
            walk(&mut ctx);
            ticks += 1;
            facings.push(ctx.transform().map(|t| t.rotation));
            if status == Status::Success {
                break;
            }
            assert_eq!(status, Status::Running);
            assert!(ticks < 50, "search never finished");
        }

        assert_eq!(ctx.tile(), Some(last_seen));
        // Arrived facing east; four quarter turns bring it back.
        assert_eq!(facings.last(), Some(&Some(Rotation::East)));
        assert!(facings.contains(&Some(Rotation::West)));
    }

    #[test]
    fn searching_without_target_still_looks_around() {
        let (mut ctx, _) = guard_context(Position::new(1, 1), None);
        let tree = searching(&ctx.config);

        assert_eq!(tree.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.tile(), Some(Position::new(1, 1)));
    }

    #[test]
    fn engaging_paths_toward_visible_enemy() {
        let (mut ctx, guard) = guard_context(Position::new(1, 1), Some(Position::new(5, 1)));
        let tree = engaging();

        assert_eq!(tree.tick(&mut ctx), Status::Success);
        assert_eq!(
            ctx.world.intent(guard).unwrap().target,
            Some(Position::new(5, 1))
        );
        walk(&mut ctx);
        assert_eq!(ctx.tile(), Some(Position::new(2, 1)));
    }

    #[test]
    fn fleeing_runs_away_or_waits() {
        let (mut ctx, _) = guard_context(Position::new(5, 5), Some(Position::new(7, 5)));
        let tree = fleeing(&ctx.config);

        assert_eq!(tree.tick(&mut ctx), Status::Success);
        let target = ctx.ai().and_then(|ai| ai.target_position).unwrap();
        assert_eq!(target, Position::new(1, 5));
        walk(&mut ctx);
        assert_eq!(ctx.tile(), Some(Position::new(4, 5)));

        let (mut calm, _) = guard_context(Position::new(5, 5), None);
        assert_eq!(tree.tick(&mut calm), Status::Running);
    }
}
