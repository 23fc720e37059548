//! Closure-backed leaf nodes.
//!
//! Game code usually implements [`Behavior`] directly on small structs, but
//! one-off checks and effects read better inline. [`Condition`] only receives
//! a shared reference to the context, so it cannot change anything.

use std::fmt;

use crate::{Behavior, Status};

type Predicate<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;
type Effect<C> = Box<dyn Fn(&mut C) -> Status + Send + Sync>;

/// Query-only leaf: `Success` when the predicate holds, `Failure` otherwise.
pub struct Condition<C> {
    name: &'static str,
    predicate: Predicate<C>,
}

impl<C> Condition<C> {
    pub fn new(name: &'static str, predicate: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name,
            predicate: Box::new(predicate),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C> Behavior<C> for Condition<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.predicate)(ctx))
    }
}

impl<C> fmt::Debug for Condition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").field("name", &self.name).finish()
    }
}

/// Leaf that runs an arbitrary effect against the context.
pub struct Action<C> {
    name: &'static str,
    effect: Effect<C>,
}

impl<C> Action<C> {
    pub fn new(
        name: &'static str,
        effect: impl Fn(&mut C) -> Status + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            effect: Box::new(effect),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C> Behavior<C> for Action<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        (self.effect)(ctx)
    }
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_maps_predicate_to_status() {
        let is_even = Condition::new("is_even", |value: &i32| value % 2 == 0);

        assert_eq!(is_even.tick(&mut 4), Status::Success);
        assert_eq!(is_even.tick(&mut 3), Status::Failure);
        assert_eq!(is_even.name(), "is_even");
    }

    #[test]
    fn action_mutates_context() {
        let double = Action::new("double", |value: &mut i32| {
            *value *= 2;
            Status::Success
        });

        let mut value = 21;
        assert_eq!(double.tick(&mut value), Status::Success);
        assert_eq!(value, 42);
    }
}
