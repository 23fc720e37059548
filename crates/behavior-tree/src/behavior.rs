//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C`, allowing nodes to access game state and make decisions.
//!
//! Nodes take `&self`: a single tree instance can be shared by many entities.
//! Anything that must survive between ticks (resume cursors, timers) lives in
//! the context, usually in a [`crate::TreeMemory`] selected for the entity
//! being ticked.

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this behavior node against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context/blackboard. Nodes can read
    ///   game state and modify it (e.g., to store intermediate results).
    ///
    /// # Returns
    ///
    /// - `Status::Success` if the behavior succeeded
    /// - `Status::Failure` if the behavior failed
    /// - `Status::Running` if the behavior needs further ticks
    fn tick(&self, ctx: &mut C) -> Status;

    /// Forces a running node back to idle.
    ///
    /// Control nodes forward the halt to their children. Called when a
    /// higher-priority branch pre-empts an in-progress action. Halting a
    /// node that is not running must be a no-op.
    fn halt(&self, _ctx: &mut C) {}
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }

    #[inline]
    fn halt(&self, ctx: &mut C) {
        (**self).halt(ctx)
    }
}
