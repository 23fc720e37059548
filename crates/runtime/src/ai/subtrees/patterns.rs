//! Reusable building blocks shared by the per-state trees.

use behavior_tree::{AlwaysSucceed, MemorySequence, Sequence};

use crate::ai::nodes::{
    AwaitArrival, FaceNearestEnemy, FindPathToTarget, HasTarget, HasVisibleEnemy,
    TargetAwayFromThreat, TargetNearestEnemy, TurnClockwise, Wait,
};

use super::BehaviorTree;

/// Wait, then turn a quarter. Resumes at the turn once the wait is over.
pub fn wait_then_turn(seconds: f32) -> BehaviorTree {
    Box::new(MemorySequence::new(vec![
        Box::new(Wait::new(seconds)),
        Box::new(TurnClockwise),
    ]))
}

/// Four timed quarter turns, ending where it started.
pub fn look_around(seconds: f32) -> BehaviorTree {
    Box::new(MemorySequence::new(vec![
        wait_then_turn(seconds),
        wait_then_turn(seconds),
        wait_then_turn(seconds),
        wait_then_turn(seconds),
    ]))
}

/// Path to the target tile and keep running until it is reached.
pub fn walk_to_target() -> BehaviorTree {
    Box::new(MemorySequence::new(vec![
        Box::new(HasTarget),
        Box::new(FindPathToTarget),
        Box::new(AwaitArrival),
    ]))
}

/// Turn toward the nearest visible enemy and remember its tile.
pub fn watch_threat() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(HasVisibleEnemy),
        Box::new(FaceNearestEnemy),
        Box::new(TargetNearestEnemy),
    ]))
}

/// Re-target the nearest enemy every tick and path toward it.
pub fn chase_nearest_enemy() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(HasVisibleEnemy),
        Box::new(TargetNearestEnemy),
        Box::new(FindPathToTarget),
    ]))
}

/// Pick a tile away from the nearest enemy and path to it.
pub fn run_from_threat(distance: u32) -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(HasVisibleEnemy),
        Box::new(TargetAwayFromThreat { distance }),
        Box::new(FindPathToTarget),
    ]))
}

/// Runs `child` but never lets it fail the parent.
pub fn optional(child: BehaviorTree) -> BehaviorTree {
    Box::new(AlwaysSucceed::new(child))
}
