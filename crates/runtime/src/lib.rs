//! Runtime orchestration for the NPC perception and decision pipeline.
//!
//! This crate wires `game-core` systems and the behavior-tree engine into a
//! single step function. Consumers build a [`Simulation`] from a map, a
//! populated [`game_core::World`] and a [`RuntimeConfig`], then call
//! [`Simulation::step`] once per frame.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the per-step orchestrator
//! - [`ai`] provides the blackboard, behavior nodes and per-state trees
//! - [`movement`] stands in for the physics collaborator that walks paths
//! - [`oracle`] serves static map data
//! - [`config`] loads runtime settings from files and the environment
pub mod ai;
pub mod config;
pub mod movement;
pub mod oracle;
pub mod simulation;

pub use ai::{AiContext, BehaviorTree, BehaviorTrees};
pub use config::{ConfigError, RuntimeConfig};
pub use movement::Move;
pub use oracle::{AsciiMap, MapError, StaticMap};
pub use simulation::{Simulation, StepReport};
