//! Tile-grid occlusion test.
//!
//! A ray is marched from the center of the start tile toward the center of
//! the end tile, visiting every tile it crosses (Amanatides and Woo). The
//! start and end tiles themselves never occlude, so an occupant on either
//! end does not hide itself.
//!
//! A ray that passes exactly through a tile corner steps diagonally. It is
//! blocked there only when both tiles sharing that corner are blocked: it
//! grazes past a single wall corner but cannot slip between two blocked
//! tiles that touch diagonally. The rule is symmetric, so sight from `a` to
//! `b` always matches sight from `b` to `a`.

use glam::Vec2;

use crate::config::GameConfig;
use crate::grid::Walkability;
use crate::state::Position;

/// Boundary distances closer than this are treated as one corner crossing.
const CORNER_EPSILON: f32 = 1e-4;

/// True when a blocked tile lies strictly between `start` and `end`.
///
/// Traversal gives up after [`GameConfig::DEFAULT_MAX_SIGHT_DISTANCE`] tiles
/// and reports the line as clear.
pub fn is_blocked<G: Walkability + ?Sized>(grid: &G, start: Position, end: Position) -> bool {
    is_blocked_within(grid, start, end, GameConfig::DEFAULT_MAX_SIGHT_DISTANCE)
}

/// Negation of [`is_blocked`].
pub fn has_line_of_sight<G: Walkability + ?Sized>(grid: &G, start: Position, end: Position) -> bool {
    !is_blocked(grid, start, end)
}

/// [`is_blocked`] with an explicit traversal bound in tiles.
pub fn is_blocked_within<G: Walkability + ?Sized>(
    grid: &G,
    start: Position,
    end: Position,
    max_tiles: u32,
) -> bool {
    let origin = Vec2::new(start.x as f32 + 0.5, start.y as f32 + 0.5);
    let target = Vec2::new(end.x as f32 + 0.5, end.y as f32 + 0.5);
    let Some(direction) = (target - origin).try_normalize() else {
        return false;
    };
    let limit = (max_tiles as f32).min(origin.distance(target));

    let step_x = direction.x.signum() as i32;
    let step_y = direction.y.signum() as i32;
    let delta_x = axis_delta(direction.x);
    let delta_y = axis_delta(direction.y);

    // Ray starts at a tile center, so the first boundary on each moving
    // axis is half a tile away.
    let mut next_x = 0.5 * delta_x;
    let mut next_y = 0.5 * delta_y;
    let mut tile = start;

    loop {
        let travelled = if (next_x - next_y).abs() <= CORNER_EPSILON {
            let t = next_x.max(next_y);
            if t > limit {
                return false;
            }
            let beside_x = Position::new(tile.x + step_x, tile.y);
            let beside_y = Position::new(tile.x, tile.y + step_y);
            if grid.is_blocked(beside_x) && grid.is_blocked(beside_y) {
                return true;
            }
            tile.x += step_x;
            tile.y += step_y;
            next_x += delta_x;
            next_y += delta_y;
            t
        } else if next_x < next_y {
            tile.x += step_x;
            let t = next_x;
            next_x += delta_x;
            t
        } else {
            tile.y += step_y;
            let t = next_y;
            next_y += delta_y;
            t
        };

        if travelled > limit || tile == end {
            return false;
        }
        if grid.is_blocked(tile) {
            return true;
        }
    }
}

/// Ray length needed to cross one tile along an axis.
fn axis_delta(component: f32) -> f32 {
    if component == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / component).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapDimensions;
    use crate::grid::WalkGrid;

    fn open_grid() -> WalkGrid {
        WalkGrid::new(MapDimensions::new(10, 10))
    }

    #[test]
    fn self_is_never_blocked() {
        let mut grid = open_grid();
        let tile = Position::new(4, 4);
        assert!(!is_blocked(&grid, tile, tile));

        grid.set_terrain_blocked(tile, true);
        assert!(!is_blocked(&grid, tile, tile));
    }

    #[test]
    fn wall_between_blocks_horizontal_line() {
        let mut grid = open_grid();
        let start = Position::new(1, 5);
        let end = Position::new(7, 5);
        assert!(has_line_of_sight(&grid, start, end));

        grid.set_terrain_blocked(Position::new(4, 5), true);
        assert!(is_blocked(&grid, start, end));
        assert!(is_blocked(&grid, end, start));
    }

    #[test]
    fn wall_off_the_line_does_not_block() {
        let mut grid = open_grid();
        grid.set_terrain_blocked(Position::new(4, 6), true);
        assert!(!is_blocked(&grid, Position::new(1, 5), Position::new(7, 5)));
    }

    #[test]
    fn diagonal_line_is_blocked_by_tile_it_crosses() {
        let mut grid = open_grid();
        let start = Position::new(0, 0);
        let end = Position::new(6, 3);
        grid.set_terrain_blocked(Position::new(3, 1), true);
        assert!(is_blocked(&grid, start, end));
    }

    #[test]
    fn single_corner_does_not_block_either_direction() {
        let mut grid = open_grid();
        let a = Position::new(0, 0);
        let b = Position::new(1, 1);
        grid.set_terrain_blocked(Position::new(1, 0), true);

        assert!(!is_blocked(&grid, a, b));
        assert!(!is_blocked(&grid, b, a));
    }

    #[test]
    fn diagonal_gap_between_walls_blocks() {
        let mut grid = open_grid();
        let a = Position::new(1, 1);
        let b = Position::new(4, 4);
        grid.set_terrain_blocked(Position::new(3, 2), true);
        grid.set_terrain_blocked(Position::new(2, 3), true);

        assert!(is_blocked(&grid, a, b));
        assert!(is_blocked(&grid, b, a));
    }

    #[test]
    fn sight_is_symmetric() {
        let mut grid = WalkGrid::new(MapDimensions::new(7, 7));
        for wall in [(1, 0), (3, 2), (2, 4), (5, 5), (4, 1), (1, 5)] {
            grid.set_terrain_blocked(Position::new(wall.0, wall.1), true);
        }

        let tiles: Vec<Position> = (0..7)
            .flat_map(|y| (0..7).map(move |x| Position::new(x, y)))
            .collect();
        for &a in &tiles {
            for &b in &tiles {
                assert_eq!(
                    is_blocked(&grid, a, b),
                    is_blocked(&grid, b, a),
                    "{a} <-> {b}"
                );
            }
        }
    }

    #[test]
    fn occupied_endpoints_do_not_occlude() {
        let mut grid = open_grid();
        let start = Position::new(2, 2);
        let end = Position::new(2, 8);
        grid.set_occupied(start, true);
        grid.set_occupied(end, true);
        assert!(!is_blocked(&grid, start, end));
    }

    #[test]
    fn adjacent_tiles_see_each_other() {
        let mut grid = open_grid();
        grid.set_terrain_blocked(Position::new(5, 5), true);
        assert!(!is_blocked(&grid, Position::new(4, 5), Position::new(5, 5)));
    }

    #[test]
    fn traversal_bound_reports_clear() {
        let mut grid = open_grid();
        let start = Position::new(0, 0);
        let end = Position::new(9, 0);
        grid.set_terrain_blocked(Position::new(6, 0), true);

        assert!(is_blocked_within(&grid, start, end, 64));
        assert!(!is_blocked_within(&grid, start, end, 3));
    }
}
