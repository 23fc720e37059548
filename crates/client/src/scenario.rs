//! Scripted demo: the player walks a loop past two guards.
use anyhow::{Context, Result};
use game_core::{
    Ai, EntityId, Position, Rotation, Transform, Vision, Walkability, World, find_path,
};
use runtime::{AsciiMap, RuntimeConfig, Simulation, StepReport};
use tracing::{info, warn};

/// `P` player, `G` guards, `a`-`d` corners of the player's walk.
const DEMO_MAP: &str = "
####################
#a................b#
#..G.....#.........#
#........#....G....#
#..~~....#.........#
#........####..#...#
#.P................#
#d................c#
####################
";

const ROUTE: [char; 4] = ['c', 'b', 'a', 'd'];

pub struct Scenario {
    sim: Simulation,
    guards: Vec<EntityId>,
    route: Vec<Position>,
    next_waypoint: usize,
}

impl Scenario {
    pub fn demo(config: RuntimeConfig) -> Result<Self> {
        let parsed = AsciiMap::parse(DEMO_MAP)?;
        let tile_size = config.game.tile_size;
        let mut world = World::new();

        let start = parsed.marker('P').context("demo map has no player")?;
        world
            .spawn_player()
            .with_transform(Transform::at_tile(start, Rotation::East, tile_size))
            .with_collider()
            .with_intent();

        let facings = [Rotation::East, Rotation::West];
        let guards = parsed
            .markers_of('G')
            .iter()
            .zip(facings.into_iter().cycle())
            .map(|(&tile, facing)| spawn_guard(&mut world, &config, tile, facing))
            .collect::<Vec<_>>();

        let route = ROUTE
            .iter()
            .map(|&glyph| parsed.marker(glyph).context("demo map is missing a waypoint"))
            .collect::<Result<Vec<_>>>()?;

        info!(guards = guards.len(), waypoints = route.len(), "scenario ready");
        Ok(Self {
            sim: Simulation::new(parsed.map, world, config)?,
            guards,
            route,
            next_waypoint: 0,
        })
    }

    pub fn step(&mut self) -> StepReport {
        self.steer_player();
        let report = self.sim.step();
        for (entity, transition) in &report.transitions {
            info!(
                step = report.index,
                %entity,
                from = %transition.from,
                to = %transition.to,
                "alert level changed"
            );
        }
        report
    }

    /// Sends the player to the next corner whenever it stops.
    fn steer_player(&mut self) {
        let tile_size = self.sim.config().game.tile_size;
        let world = self.sim.world();
        let Some(from) = world.tile_of(EntityId::PLAYER, tile_size) else {
            return;
        };
        if !world.intent(EntityId::PLAYER).is_some_and(|intent| intent.is_idle()) {
            return;
        }

        if from == self.route[self.next_waypoint] {
            self.next_waypoint = (self.next_waypoint + 1) % self.route.len();
        }
        let goal = self.route[self.next_waypoint];

        let view = self.sim.grid().with_cleared([from, goal]);
        if view.is_blocked(goal) {
            warn!(%goal, "waypoint is walled off");
            return;
        }
        let path = find_path(&view, from, goal);
        if path.is_empty() {
            // A guard is in the way; try again next step.
            return;
        }
        if let Some(intent) = self.sim.world_mut().intent_mut(EntityId::PLAYER) {
            intent.set_path(goal, path);
        }
    }

    pub fn log_summary(&self) {
        let tile_size = self.sim.config().game.tile_size;
        for &guard in &self.guards {
            let world = self.sim.world();
            let (Some(ai), Some(tile)) = (world.ai(guard), world.tile_of(guard, tile_size)) else {
                continue;
            };
            info!(
                %guard,
                state = %ai.state(),
                %tile,
                "guard after {} steps",
                self.sim.steps()
            );
        }
    }
}

fn spawn_guard(
    world: &mut World,
    config: &RuntimeConfig,
    tile: Position,
    facing: Rotation,
) -> EntityId {
    world
        .spawn()
        .with_transform(Transform::at_tile(tile, facing, config.game.tile_size))
        .with_vision(Vision::from_config(&config.game))
        .with_ai(Ai::from_config(&config.game))
        .with_collider()
        .with_intent()
        .id()
}
