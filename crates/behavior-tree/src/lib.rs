//! Lightweight behavior tree library for real-time games.
//!
//! This library provides a minimal behavior tree implementation whose nodes
//! are built once and shared by many entities:
//!
//! - **Continuation**: actions may report `Running` and finish on a later tick
//! - **Pre-emption**: `halt` returns running nodes to idle
//! - **Shared trees**: nodes are immutable; per-entity progress lives in a
//!   [`TreeMemory`] reached through the [`Blackboard`] trait
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Idle, Success, Failure or Running
//! - Composite nodes: [`Sequence`], [`Selector`] (reactive) and
//!   [`MemorySequence`], [`MemorySelector`] (resume at the running child)
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`]
//! - Leaf nodes: [`Condition`], [`Action`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod memory;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{MemorySelector, MemorySequence, Selector, Sequence};
pub use decorator::{AlwaysSucceed, Inverter};
pub use leaf::{Action, Condition};
pub use memory::{Blackboard, NodeId, NodeState, TreeMemory};
pub use status::Status;
