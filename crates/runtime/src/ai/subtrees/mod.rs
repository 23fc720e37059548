//! Behavior trees for each alertness state.
//!
//! Subtrees are organized into two layers:
//!
//! - **Patterns**: small reusable pieces (look around, walk to target)
//! - **Strategies**: one complete tree per [`AiState`]
//!
//! ```text
//! Unaware    wait, turn
//! Detecting  stop, face threat, mark its tile
//! Engaging   target threat, path to it
//! Searching  walk to last known tile, look around
//! Fleeing    target a tile away from threat, path to it
//! ```
//!
//! Trees are built once from the runtime configuration and shared by all
//! entities.

pub mod patterns;
pub mod strategies;

use behavior_tree::Behavior;
use game_core::AiState;

use super::context::AiContext;
use crate::config::RuntimeConfig;

/// Type alias for behavior trees to reduce verbosity.
pub type BehaviorTree = Box<dyn Behavior<AiContext>>;

/// The tree ticked for each state.
pub struct BehaviorTrees {
    unaware: BehaviorTree,
    detecting: BehaviorTree,
    searching: BehaviorTree,
    engaging: BehaviorTree,
    fleeing: BehaviorTree,
}

impl BehaviorTrees {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            unaware: strategies::unaware(config),
            detecting: strategies::detecting(),
            searching: strategies::searching(config),
            engaging: strategies::engaging(),
            fleeing: strategies::fleeing(config),
        }
    }

    pub fn for_state(&self, state: AiState) -> &BehaviorTree {
        match state {
            AiState::Unaware => &self.unaware,
            AiState::Detecting => &self.detecting,
            AiState::Searching => &self.searching,
            AiState::Engaging => &self.engaging,
            AiState::Fleeing => &self.fleeing,
        }
    }
}
