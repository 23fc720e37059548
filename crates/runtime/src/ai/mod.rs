//! Behavior-tree driven NPC decisions.
//!
//! [`AiContext`] is the blackboard, [`nodes`] holds the game-specific leaves
//! and [`subtrees`] assembles them into one tree per alertness state.
pub mod context;
pub mod nodes;
pub mod subtrees;

pub use context::AiContext;
pub use subtrees::{BehaviorTree, BehaviorTrees};
