//! Per-entity execution memory for stateful nodes.
//!
//! Trees are built once and shared, so nodes hold no mutable fields. Nodes
//! that need to remember something between ticks (the child a memory
//! sequence paused on, the time a wait has accumulated) store it in a
//! [`TreeMemory`] under their own [`NodeId`]. The context hands out the
//! memory of the entity currently being ticked, which keys all transient
//! state by entity and node together.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::Status;

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identifier of a stateful node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Allocates a fresh identifier.
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Execution record of one node for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeState {
    /// Last status produced by the node (`Idle` after a halt).
    pub status: Status,
    /// True while the node is mid-execution (between a `Running` result
    /// and the tick that completes it).
    pub active: bool,
    /// Index of the child to resume from (memory composites).
    pub cursor: usize,
    /// Seconds accumulated by timing nodes.
    pub elapsed: f32,
}

impl NodeState {
    /// Marks the node as running.
    pub fn run(&mut self) {
        self.status = Status::Running;
        self.active = true;
    }

    /// Records a terminal status and clears continuation data.
    pub fn finish(&mut self, status: Status) {
        self.status = status;
        self.active = false;
        self.cursor = 0;
        self.elapsed = 0.0;
    }
}

/// Node states of one entity, keyed by node.
#[derive(Debug, Clone, Default)]
pub struct TreeMemory {
    nodes: BTreeMap<NodeId, NodeState>,
}

impl TreeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeState> {
        self.nodes.get(&id)
    }

    /// Returns the state for `id`, creating an idle record if absent.
    pub fn entry(&mut self, id: NodeId) -> &mut NodeState {
        self.nodes.entry(id).or_default()
    }

    /// Last recorded status of `id` (`Idle` when never ticked).
    pub fn status(&self, id: NodeId) -> Status {
        self.nodes.get(&id).map(|state| state.status).unwrap_or_default()
    }

    pub fn is_active(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|state| state.active)
    }

    /// Returns `id` to idle, dropping any continuation data.
    pub fn reset(&mut self, id: NodeId) {
        self.nodes.remove(&id);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Context capability required by stateful nodes.
pub trait Blackboard {
    /// Memory of the entity currently being ticked.
    fn memory(&mut self) -> &mut TreeMemory;
}

impl Blackboard for TreeMemory {
    fn memory(&mut self) -> &mut TreeMemory {
        self
    }
}
