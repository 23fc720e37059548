//! Per-step orchestration of the NPC pipeline.
//!
//! One [`Simulation::step`] runs, strictly in order:
//!
//! 1. walkability grid refresh from the map and colliders
//! 2. perception for every entity with vision
//! 3. alertness transitions, halting the tree of each state that was left
//! 4. one tick of the current state's tree for every entity with AI
//! 5. the movement stepper
//!
//! Everything runs on the calling thread and finishes before `step` returns.

use behavior_tree::{Behavior, Status};
use game_core::{AiState, EntityId, MapOracle, Transition, WalkGrid, World, ai, perception};
use tracing::{debug, debug_span, trace};

use crate::ai::{AiContext, BehaviorTrees};
use crate::config::{ConfigError, RuntimeConfig};
use crate::movement::{self, Move};

/// What happened during one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub index: u64,
    pub transitions: Vec<(EntityId, Transition)>,
    pub ticks: Vec<(EntityId, AiState, Status)>,
    pub moves: Vec<Move>,
}

pub struct Simulation {
    map: Box<dyn MapOracle>,
    trees: BehaviorTrees,
    ctx: AiContext,
    steps: u64,
}

impl Simulation {
    /// Validates `config` and builds the per-state trees.
    pub fn new(
        map: impl MapOracle + 'static,
        world: World,
        config: RuntimeConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let trees = BehaviorTrees::new(&config);
        let grid = WalkGrid::from_map(&map);
        Ok(Self {
            map: Box::new(map),
            trees,
            ctx: AiContext::new(world, grid, config),
            steps: 0,
        })
    }

    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    /// Direct access for scripted actors and tests. State changes made here
    /// take effect on the next step; tree memory of entities despawned here
    /// is dropped when the next step ticks the trees.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.ctx.world
    }

    pub fn grid(&self) -> &WalkGrid {
        &self.ctx.grid
    }

    pub fn map(&self) -> &dyn MapOracle {
        self.map.as_ref()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.ctx.config
    }

    pub fn context(&self) -> &AiContext {
        &self.ctx
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Removes an entity together with its tree memory.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        self.ctx.forget(entity);
        self.ctx.world.despawn(entity)
    }

    /// Advances by the configured fixed delta.
    pub fn step(&mut self) -> StepReport {
        let delta = self.ctx.config.step_seconds;
        self.step_with(delta)
    }

    /// Advances by `delta` seconds.
    pub fn step_with(&mut self, delta: f32) -> StepReport {
        let index = self.steps;
        let span = debug_span!("step", index);
        let _enter = span.enter();

        let tile_size = self.ctx.config.game.tile_size;
        self.ctx.delta = delta;

        self.ctx
            .grid
            .refresh(self.map.as_ref(), &self.ctx.world, tile_size);
        perception::update(&mut self.ctx.world, &self.ctx.grid, &self.ctx.config.game);

        let transitions = ai::update(&mut self.ctx.world, delta);
        for (entity, transition) in &transitions {
            self.ctx.focus(*entity);
            self.trees.for_state(transition.from).halt(&mut self.ctx);
        }

        let ticks = self.tick_trees();

        let moves = movement::advance(
            &mut self.ctx.world,
            &mut self.ctx.grid,
            tile_size,
            self.ctx.config.move_tiles_per_step,
        );

        debug!(
            transitions = transitions.len(),
            moves = moves.len(),
            "step complete"
        );
        self.steps += 1;

        StepReport {
            index,
            transitions,
            ticks,
            moves,
        }
    }

    fn tick_trees(&mut self) -> Vec<(EntityId, AiState, Status)> {
        self.ctx.forget_despawned();

        let thinkers: Vec<(EntityId, AiState)> = self
            .ctx
            .world
            .ais
            .iter()
            .map(|(&id, ai)| (id, ai.state()))
            .collect();

        let mut ticks = Vec::with_capacity(thinkers.len());
        for (entity, state) in thinkers {
            let span = debug_span!("entity", %entity, %state);
            let _enter = span.enter();

            self.ctx.focus(entity);
            let status = self.trees.for_state(state).tick(&mut self.ctx);
            trace!(?status, "tree ticked");
            ticks.push((entity, state, status));
        }
        ticks
    }
}
