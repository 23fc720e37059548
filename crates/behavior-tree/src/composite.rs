//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! Two families are provided:
//!
//! - [`Sequence`] / [`Selector`] are *reactive*: every tick restarts at the
//!   first child, so earlier conditions are re-checked while a later child is
//!   running. A child that was running but is no longer reached is halted.
//! - [`MemorySequence`] / [`MemorySelector`] remember which child returned
//!   `Running` (per entity, in [`TreeMemory`](crate::TreeMemory)) and resume
//!   there on the next tick without re-ticking the children before it.

use crate::{Behavior, Blackboard, NodeId, Status};

/// Executes child behaviors in sequence until one fails.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Running`, the sequence **stops immediately** and returns `Running`
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for (index, child) in self.children.iter().enumerate() {
            match child.tick(ctx) {
                Status::Success => continue,
                Status::Running => {
                    halt_all(&self.children[index + 1..], ctx);
                    return Status::Running;
                }
                Status::Failure | Status::Idle => {
                    halt_all(&self.children[index + 1..], ctx);
                    return Status::Failure;
                }
            }
        }
        Status::Success
    }

    fn halt(&self, ctx: &mut C) {
        halt_all(&self.children, ctx);
    }
}

/// Executes child behaviors in order until one succeeds.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
/// - If a child returns `Running`, the selector **stops immediately** and returns `Running`
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for (index, child) in self.children.iter().enumerate() {
            match child.tick(ctx) {
                Status::Failure | Status::Idle => continue,
                status => {
                    // A higher-priority child won: anything after it that was
                    // still running from an earlier tick is pre-empted.
                    halt_all(&self.children[index + 1..], ctx);
                    return status;
                }
            }
        }
        Status::Failure
    }

    fn halt(&self, ctx: &mut C) {
        halt_all(&self.children, ctx);
    }
}

/// Sequence that resumes at the child that last returned `Running`.
pub struct MemorySequence<C> {
    id: NodeId,
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> MemorySequence<C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "MemorySequence must have at least one child"
        );
        Self {
            id: NodeId::next(),
            children,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<C: Blackboard> Behavior<C> for MemorySequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let start = {
            let state = ctx.memory().entry(self.id);
            state.run();
            state.cursor.min(self.children.len() - 1)
        };

        for (index, child) in self.children.iter().enumerate().skip(start) {
            match child.tick(ctx) {
                Status::Success => continue,
                Status::Running => {
                    ctx.memory().entry(self.id).cursor = index;
                    return Status::Running;
                }
                Status::Failure | Status::Idle => {
                    ctx.memory().entry(self.id).finish(Status::Failure);
                    return Status::Failure;
                }
            }
        }

        ctx.memory().entry(self.id).finish(Status::Success);
        Status::Success
    }

    fn halt(&self, ctx: &mut C) {
        halt_all(&self.children, ctx);
        ctx.memory().reset(self.id);
    }
}

/// Selector that resumes at the child that last returned `Running`.
pub struct MemorySelector<C> {
    id: NodeId,
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> MemorySelector<C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "MemorySelector must have at least one child"
        );
        Self {
            id: NodeId::next(),
            children,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<C: Blackboard> Behavior<C> for MemorySelector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let start = {
            let state = ctx.memory().entry(self.id);
            state.run();
            state.cursor.min(self.children.len() - 1)
        };

        for (index, child) in self.children.iter().enumerate().skip(start) {
            match child.tick(ctx) {
                Status::Failure | Status::Idle => continue,
                Status::Running => {
                    ctx.memory().entry(self.id).cursor = index;
                    return Status::Running;
                }
                Status::Success => {
                    ctx.memory().entry(self.id).finish(Status::Success);
                    return Status::Success;
                }
            }
        }

        ctx.memory().entry(self.id).finish(Status::Failure);
        Status::Failure
    }

    fn halt(&self, ctx: &mut C) {
        halt_all(&self.children, ctx);
        ctx.memory().reset(self.id);
    }
}

fn halt_all<C>(children: &[Box<dyn Behavior<C>>], ctx: &mut C) {
    for child in children {
        child.halt(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeMemory;

    struct TestContext {
        value: i32,
        halted: i32,
        memory: TreeMemory,
    }

    impl TestContext {
        fn new() -> Self {
            Self {
                value: 0,
                halted: 0,
                memory: TreeMemory::new(),
            }
        }
    }

    impl Blackboard for TestContext {
        fn memory(&mut self) -> &mut TreeMemory {
            &mut self.memory
        }
    }

    struct Increment;
    impl Behavior<TestContext> for Increment {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            ctx.value += 1;
            Status::Success
        }
    }

    struct Decrement;
    impl Behavior<TestContext> for Decrement {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            ctx.value -= 1;
            Status::Success
        }
    }

    struct FailAlways;
    impl Behavior<TestContext> for FailAlways {
        fn tick(&self, _ctx: &mut TestContext) -> Status {
            Status::Failure
        }
    }

    /// Counts its ticks in `value` and reports `Running`; counts halts.
    struct RunForever;
    impl Behavior<TestContext> for RunForever {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            ctx.value += 100;
            Status::Running
        }

        fn halt(&self, ctx: &mut TestContext) {
            ctx.halted += 1;
        }
    }

    /// Runs for one tick, then succeeds.
    struct RunOnce {
        id: NodeId,
    }

    impl RunOnce {
        fn new() -> Self {
            Self { id: NodeId::next() }
        }
    }

    impl Behavior<TestContext> for RunOnce {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            let state = ctx.memory.entry(self.id);
            if state.active {
                state.finish(Status::Success);
                Status::Success
            } else {
                state.run();
                Status::Running
            }
        }

        fn halt(&self, ctx: &mut TestContext) {
            ctx.memory.reset(self.id);
        }
    }

    #[test]
    fn sequence_all_success() {
        let seq = Sequence::new(vec![
            Box::new(Increment),
            Box::new(Increment),
            Box::new(Increment),
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 3);
    }

    #[test]
    fn sequence_fails_on_first_failure() {
        let seq = Sequence::new(vec![
            Box::new(Increment),
            Box::new(FailAlways),
            Box::new(Increment), // Should not execute
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.value, 1); // Only first increment executed
    }

    #[test]
    fn sequence_reports_running_child() {
        let seq = Sequence::new(vec![
            Box::new(Increment),
            Box::new(RunForever),
            Box::new(Increment), // Should not execute
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(seq.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.value, 101);
    }

    #[test]
    fn sequence_restarts_from_first_child() {
        let seq = Sequence::new(vec![Box::new(Increment), Box::new(RunForever)]);

        let mut ctx = TestContext::new();
        seq.tick(&mut ctx);
        seq.tick(&mut ctx);
        // The first child is re-ticked each time.
        assert_eq!(ctx.value, 202);
    }

    #[test]
    fn selector_succeeds_on_first_success() {
        let sel = Selector::new(vec![
            Box::new(FailAlways),
            Box::new(Increment),
            Box::new(Decrement), // Should not execute
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1); // Only Increment executed
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let sel = Selector::new(vec![
            Box::new(FailAlways),
            Box::new(FailAlways),
            Box::new(FailAlways),
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(sel.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn selector_reports_running_child() {
        let sel = Selector::new(vec![Box::new(FailAlways), Box::new(RunForever)]);

        let mut ctx = TestContext::new();
        assert_eq!(sel.tick(&mut ctx), Status::Running);
    }

    #[test]
    fn selector_halts_lower_priority_children() {
        let sel = Selector::new(vec![Box::new(Increment), Box::new(RunForever)]);

        let mut ctx = TestContext::new();
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.halted, 1);
    }

    #[test]
    fn halt_reaches_every_child() {
        let seq = Sequence::new(vec![Box::new(RunForever), Box::new(RunForever)]);

        let mut ctx = TestContext::new();
        seq.halt(&mut ctx);
        assert_eq!(ctx.halted, 2);
    }

    #[test]
    fn memory_sequence_resumes_at_running_child() {
        let seq = MemorySequence::new(vec![
            Box::new(Increment),
            Box::new(RunOnce::new()),
            Box::new(Increment),
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(seq.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.value, 1);
        assert_eq!(ctx.memory.get(seq.id()).map(|s| s.cursor), Some(1));

        // Second tick skips the first child and finishes.
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
        assert_eq!(ctx.memory.status(seq.id()), Status::Success);
        assert!(!ctx.memory.is_active(seq.id()));
    }

    #[test]
    fn memory_sequence_halt_restarts_from_first_child() {
        let seq = MemorySequence::new(vec![Box::new(Increment), Box::new(RunOnce::new())]);

        let mut ctx = TestContext::new();
        assert_eq!(seq.tick(&mut ctx), Status::Running);
        seq.halt(&mut ctx);
        assert_eq!(ctx.memory.status(seq.id()), Status::Idle);

        assert_eq!(seq.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn memory_selector_resumes_at_running_child() {
        let sel = MemorySelector::new(vec![
            Box::new(FailAlways),
            Box::new(RunOnce::new()),
            Box::new(Increment),
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(sel.tick(&mut ctx), Status::Running);
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 0);
    }

    #[test]
    fn memory_selector_fails_when_all_fail() {
        let sel = MemorySelector::new(vec![Box::new(FailAlways), Box::new(FailAlways)]);

        let mut ctx = TestContext::new();
        assert_eq!(sel.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.memory.status(sel.id()), Status::Failure);
    }

    #[test]
    fn memory_state_is_separate_per_context() {
        let seq = MemorySequence::new(vec![Box::new(Increment), Box::new(RunOnce::new())]);

        let mut first = TestContext::new();
        let mut second = TestContext::new();
        assert_eq!(seq.tick(&mut first), Status::Running);
        assert_eq!(seq.tick(&mut second), Status::Running);
        assert_eq!(seq.tick(&mut first), Status::Success);
        assert_eq!(second.memory.status(seq.id()), Status::Running);
    }
}
