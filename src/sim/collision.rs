//! Tile collision model
//!
//! Movement is resolved per axis: the X displacement is accepted only if the
//! destination point is not a wall, then the Y displacement is tested from
//! the (possibly updated) X position. Testing the axes independently lets
//! entities slide along walls instead of stopping dead on diagonal contact.
//!
//! Only the destination point is tested (no swept volume), so speeds are
//! assumed bounded below half a tile per frame; the frame-delta clamp in the
//! step function keeps that assumption honest.

use glam::Vec2;

use super::maze::Maze;

/// Outcome of an axis-separated move
#[derive(Debug, Clone, Copy)]
pub struct MoveResult {
    /// Resolved position after both axis tests
    pub pos: Vec2,
    /// X displacement was rejected by a wall
    pub blocked_x: bool,
    /// Y displacement was rejected by a wall
    pub blocked_y: bool,
}

/// Resolve a proposed displacement against the maze, one axis at a time.
pub fn resolve_move(pos: Vec2, delta: Vec2, maze: &Maze) -> MoveResult {
    let mut out = pos;
    let mut blocked_x = false;
    let mut blocked_y = false;

    let nx = pos.x + delta.x;
    if !maze.is_wall(nx, pos.y) {
        out.x = nx;
    } else {
        blocked_x = true;
    }

    let ny = pos.y + delta.y;
    if !maze.is_wall(out.x, ny) {
        out.y = ny;
    } else {
        blocked_y = true;
    }

    MoveResult {
        pos: out,
        blocked_x,
        blocked_y,
    }
}

/// Circle-approximation overlap test used for every entity pair.
/// Not exact for rectangular sprites; applied consistently everywhere.
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn maze() -> Maze {
        let mut rng = Pcg32::seed_from_u64(42);
        Maze::generate(96, 54, 40.0, 30, &mut rng)
    }

    /// Find an open position with a wall directly to its right
    fn wall_to_the_right(maze: &Maze) -> Vec2 {
        for ty in 2..maze.height() - 2 {
            for tx in 2..maze.width() - 2 {
                let x = tx as f32 * 40.0 + 20.0;
                let y = ty as f32 * 40.0 + 20.0;
                if !maze.is_wall(x, y) && maze.is_wall(x + 40.0, y) && !maze.is_wall(x, y + 40.0) {
                    return Vec2::new(x, y);
                }
            }
        }
        panic!("no suitable cell in generated maze");
    }

    #[test]
    fn blocked_axis_leaves_other_axis_free() {
        let maze = maze();
        let pos = wall_to_the_right(&maze);

        let result = resolve_move(pos, Vec2::new(40.0, 40.0), &maze);
        assert!(result.blocked_x);
        assert!(!result.blocked_y);
        assert_eq!(result.pos.x, pos.x);
        assert_eq!(result.pos.y, pos.y + 40.0);
    }

    #[test]
    fn open_move_is_accepted_verbatim() {
        let maze = maze();
        // Bottom corridor is guaranteed open
        let pos = Vec2::new(400.0, 53.5 * 40.0);
        let result = resolve_move(pos, Vec2::new(10.0, 0.0), &maze);
        assert!(!result.blocked_x && !result.blocked_y);
        assert_eq!(result.pos, pos + Vec2::new(10.0, 0.0));
    }

    #[test]
    fn overlap_uses_summed_radii() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert!(circles_overlap(a, 6.0, b, 5.0));
        assert!(!circles_overlap(a, 4.0, b, 5.0));
        // Touching exactly is not overlap
        assert!(!circles_overlap(a, 5.0, b, 5.0));
    }
}
