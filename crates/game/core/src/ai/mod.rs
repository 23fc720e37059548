//! Alertness state machine.
//!
//! [`advance`] is the only code that changes [`Ai::state`]. It runs once per
//! entity per step, after perception, and reads nothing but whether an enemy
//! is currently visible and the step's delta time.
//!
//! Timers accumulate before they are compared, so an entity needs
//! `detection_threshold` seconds of continuous sight *after* entering
//! `Detecting` before it engages.

use tracing::{debug, warn};

use crate::error::{Capability, MissingCapability};
use crate::state::{Ai, AiState, EntityId, World};

/// A state change produced by [`advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: AiState,
    pub to: AiState,
}

/// Advances one entity's state machine by `delta` seconds.
pub fn advance(ai: &mut Ai, sees_enemy: bool, delta: f32) -> Option<Transition> {
    let from = ai.state();
    let to = match from {
        AiState::Unaware => sees_enemy.then_some(AiState::Detecting),

        AiState::Detecting if !sees_enemy => {
            ai.set_search_time(ai.search_time() + delta);
            ai.set_detection_time(0.0);
            match ai.previous_state() {
                AiState::Detecting => Some(AiState::Unaware),
                fallback => Some(fallback),
            }
        }
        AiState::Detecting => {
            let elapsed = ai.detection_time() + delta;
            if elapsed >= ai.detection_threshold() {
                ai.set_detection_time(0.0);
                Some(AiState::Engaging)
            } else {
                ai.set_detection_time(elapsed);
                None
            }
        }

        AiState::Searching if sees_enemy => Some(AiState::Detecting),
        AiState::Searching => {
            let elapsed = ai.search_time() + delta;
            if elapsed >= ai.search_timeout() {
                ai.set_search_time(0.0);
                Some(AiState::Unaware)
            } else {
                ai.set_search_time(elapsed);
                None
            }
        }

        AiState::Engaging => {
            ai.set_search_time(0.0);
            (!sees_enemy).then_some(AiState::Searching)
        }

        // No entry or exit conditions yet.
        AiState::Fleeing => None,
    };

    let to = to.filter(|next| *next != from)?;
    ai.set_state(to);
    Some(Transition { from, to })
}

/// Runs [`advance`] for every entity with an [`Ai`], in id order.
///
/// Entities without vision are skipped; their state is left untouched.
pub fn update(world: &mut World, delta: f32) -> Vec<(EntityId, Transition)> {
    let mut transitions = Vec::new();

    for (&entity, ai) in world.ais.iter_mut() {
        let Some(vision) = world.visions.get(&entity) else {
            warn!(
                error = %MissingCapability::new(entity, Capability::Vision),
                "state update skipped"
            );
            continue;
        };

        if let Some(transition) = advance(ai, vision.sees_enemy(), delta) {
            debug!(
                %entity,
                from = %transition.from,
                to = %transition.to,
                "ai state changed"
            );
            transitions.push((entity, transition));
        }
    }

    transitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Vision;

    fn ai() -> Ai {
        Ai::new(2.0, 5.0)
    }

    #[test]
    fn full_alert_cycle() {
        let mut ai = ai();

        let first = advance(&mut ai, true, 1.0);
        assert_eq!(
            first,
            Some(Transition {
                from: AiState::Unaware,
                to: AiState::Detecting
            })
        );

        assert_eq!(advance(&mut ai, true, 1.0), None);
        assert_eq!(ai.state(), AiState::Detecting);
        assert_eq!(ai.detection_time(), 1.0);

        advance(&mut ai, true, 1.0);
        assert_eq!(ai.state(), AiState::Engaging);
        assert_eq!(ai.detection_time(), 0.0);

        advance(&mut ai, false, 0.5);
        assert_eq!(ai.state(), AiState::Searching);
        assert_eq!(ai.previous_state(), AiState::Engaging);

        for _ in 0..4 {
            advance(&mut ai, false, 1.0);
            assert_eq!(ai.state(), AiState::Searching);
        }
        assert_eq!(ai.search_time(), 4.0);

        advance(&mut ai, false, 1.0);
        assert_eq!(ai.state(), AiState::Unaware);
        assert_eq!(ai.search_time(), 0.0);
    }

    #[test]
    fn losing_sight_while_detecting_falls_back() {
        let mut ai = ai();
        advance(&mut ai, true, 0.5);
        advance(&mut ai, true, 0.5);

        let transition = advance(&mut ai, false, 0.25).unwrap();
        assert_eq!(transition.from, AiState::Detecting);
        assert_eq!(transition.to, AiState::Unaware);
        assert_eq!(ai.detection_time(), 0.0);
        assert_eq!(ai.search_time(), 0.25);
    }

    #[test]
    fn redetection_while_searching_returns_to_searching_on_loss() {
        let mut ai = ai();
        advance(&mut ai, true, 0.1);
        advance(&mut ai, true, 2.0);
        advance(&mut ai, false, 0.1);
        assert_eq!(ai.state(), AiState::Searching);

        advance(&mut ai, true, 0.1);
        assert_eq!(ai.state(), AiState::Detecting);
        assert_eq!(ai.previous_state(), AiState::Searching);

        advance(&mut ai, false, 0.1);
        assert_eq!(ai.state(), AiState::Searching);
    }

    #[test]
    fn engaging_holds_while_visible_and_clears_search_time() {
        let mut ai = ai();
        advance(&mut ai, true, 0.1);
        advance(&mut ai, true, 2.0);
        ai.set_search_time(3.0);

        assert_eq!(advance(&mut ai, true, 1.0), None);
        assert_eq!(ai.state(), AiState::Engaging);
        assert_eq!(ai.search_time(), 0.0);
    }

    #[test]
    fn fleeing_is_sticky() {
        let mut ai = ai();
        ai.set_state(AiState::Fleeing);
        assert_eq!(advance(&mut ai, true, 10.0), None);
        assert_eq!(advance(&mut ai, false, 10.0), None);
        assert_eq!(ai.state(), AiState::Fleeing);
    }

    #[test]
    fn update_skips_entities_without_vision() {
        let mut world = World::new();
        let watcher = world.spawn().with_ai(ai()).with_vision(Vision::default()).id();
        let blind = world.spawn().with_ai(ai()).id();
        world
            .visions
            .get_mut(&watcher)
            .unwrap()
            .replace(vec![EntityId::PLAYER], Vec::new());

        let transitions = update(&mut world, 0.1);

        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].0, watcher);
        assert_eq!(world.ai(watcher).unwrap().state(), AiState::Detecting);
        assert_eq!(world.ai(blind).unwrap().state(), AiState::Unaware);
    }
}
