//! Game-specific behavior tree nodes.
//!
//! This module contains concrete implementations of behavior tree nodes
//! that read and write `game-core` components through [`AiContext`]:
//!
//! - `conditions`: Nodes that check entity state (Success/Failure, no writes)
//! - `actions`: Nodes that turn, target, request paths or wait
//!
//! A node whose entity lacks a component it needs returns Failure.
//!
//! [`AiContext`]: crate::ai::AiContext

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
