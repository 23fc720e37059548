//! A* search over the four-connected walkability grid.
//!
//! Each cardinal step costs [`STEP_COST`]; the heuristic is the Euclidean
//! distance scaled by the same factor and rounded down, so it never
//! overestimates. Nodes with equal `f` are expanded in insertion order,
//! which makes the returned path reproducible for a given grid.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::{ErrorSeverity, GameError};
use crate::grid::Walkability;
use crate::state::{Position, Rotation};

/// Cost of one cardinal move.
pub const STEP_COST: u32 = 10;

/// Tiles from start to goal, both inclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(Vec<Position>);

impl Path {
    pub fn tiles(&self) -> &[Position] {
        &self.0
    }

    pub fn start(&self) -> Option<Position> {
        self.0.first().copied()
    }

    pub fn goal(&self) -> Option<Position> {
        self.0.last().copied()
    }

    /// Number of moves; one less than the number of tiles.
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn cost(&self) -> u32 {
        self.steps() as u32 * STEP_COST
    }

    pub fn into_tiles(self) -> Vec<Position> {
        self.0
    }
}

impl From<Path> for Vec<Position> {
    fn from(path: Path) -> Self {
        path.0
    }
}

/// Why [`search`] produced no path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("tile {position} lies outside the map")]
    OutOfBounds { position: Position },

    #[error("tile {position} is blocked")]
    Blocked { position: Position },

    #[error("no route from {start} to {goal}")]
    Unreachable { start: Position, goal: Position },
}

impl PathError {
    /// True when the request itself was invalid rather than the goal
    /// being walled off.
    pub fn is_invalid_request(&self) -> bool {
        !matches!(self, Self::Unreachable { .. })
    }
}

impl GameError for PathError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds { .. } | Self::Blocked { .. } => ErrorSeverity::Validation,
            Self::Unreachable { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "PATH_OUT_OF_BOUNDS",
            Self::Blocked { .. } => "PATH_BLOCKED",
            Self::Unreachable { .. } => "PATH_UNREACHABLE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    g: u32,
    seq: u64,
    position: Position,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert so the lowest f (then the oldest
        // entry) is popped first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn heuristic(from: Position, to: Position) -> u32 {
    let dx = (to.x - from.x) as f32;
    let dy = (to.y - from.y) as f32;
    ((dx * dx + dy * dy).sqrt() * STEP_COST as f32) as u32
}

fn check_endpoint<G: Walkability + ?Sized>(grid: &G, position: Position) -> Result<(), PathError> {
    if !grid.contains(position) {
        return Err(PathError::OutOfBounds { position });
    }
    if grid.is_blocked(position) {
        return Err(PathError::Blocked { position });
    }
    Ok(())
}

/// Finds a shortest cardinal path from `start` to `goal`.
///
/// All search state is local to the call and dropped on every return.
pub fn search<G: Walkability + ?Sized>(
    grid: &G,
    start: Position,
    goal: Position,
) -> Result<Path, PathError> {
    check_endpoint(grid, start)?;
    check_endpoint(grid, goal)?;

    if start == goal {
        return Ok(Path(vec![start]));
    }

    let mut open = BinaryHeap::new();
    let mut best_g: HashMap<Position, u32> = HashMap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut closed: HashSet<Position> = HashSet::new();
    let mut seq = 0u64;

    best_g.insert(start, 0);
    open.push(OpenNode {
        f: heuristic(start, goal),
        g: 0,
        seq,
        position: start,
    });

    while let Some(current) = open.pop() {
        if current.position == goal {
            return Ok(Path(reconstruct(&came_from, start, goal)));
        }
        if !closed.insert(current.position) {
            continue;
        }

        for rotation in Rotation::ALL {
            let next = current.position.step(rotation);
            if closed.contains(&next) || grid.is_blocked(next) {
                continue;
            }

            let g = current.g + STEP_COST;
            if best_g.get(&next).is_some_and(|&known| known <= g) {
                continue;
            }

            best_g.insert(next, g);
            came_from.insert(next, current.position);
            seq += 1;
            open.push(OpenNode {
                f: g + heuristic(next, goal),
                g,
                seq,
                position: next,
            });
        }
    }

    Err(PathError::Unreachable { start, goal })
}

fn reconstruct(
    came_from: &HashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut tiles = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&previous) => {
                tiles.push(previous);
                current = previous;
            }
            None => break,
        }
    }
    tiles.reverse();
    tiles
}

/// Path from `start` to `goal` inclusive, or an empty vector when there is
/// none for any reason. Use [`search`] to learn which.
pub fn find_path<G: Walkability + ?Sized>(grid: &G, start: Position, goal: Position) -> Vec<Position> {
    search(grid, start, goal)
        .map(Path::into_tiles)
        .unwrap_or_default()
}
