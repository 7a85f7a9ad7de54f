//! Procedural maze grid
//!
//! Carves a 2-tile-wide corridor maze with randomized depth-first
//! backtracking on a 3-tile stride, then opens extra shortcut blocks and
//! forces the bottom two rows open as a guaranteed traversable band.
//!
//! Corridors are 2 tiles wide so entities larger than one tile pass without
//! wall-hugging logic. The carved skeleton is connected by construction;
//! reachability of the random shortcut openings is NOT guaranteed and the
//! generator does not verify it.

use glam::Vec2;
use rand::Rng;

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Open,
    Wall,
}

/// Binary occupancy grid with world-space wall queries
#[derive(Debug, Clone)]
pub struct Maze {
    width: usize,
    height: usize,
    tile_size: f32,
    grid: Vec<Tile>,
}

/// Directions probed from a block anchor: 3-tile stride on one axis
const CARVE_DIRS: [(i32, i32); 4] = [(0, -3), (3, 0), (0, 3), (-3, 0)];

/// Attempt budget for rejection-sampling a random floor position
const FLOOR_SAMPLE_ATTEMPTS: usize = 1000;

impl Maze {
    /// Generate a maze of `width_tiles` x `height_tiles` cells.
    ///
    /// Determinism follows the supplied RNG: seed it for reproducible grids.
    pub fn generate(
        width_tiles: usize,
        height_tiles: usize,
        tile_size: f32,
        shortcuts: usize,
        rng: &mut impl Rng,
    ) -> Self {
        let mut maze = Self {
            width: width_tiles,
            height: height_tiles,
            tile_size,
            grid: vec![Tile::Wall; width_tiles * height_tiles],
        };

        maze.carve_skeleton(rng);

        // Extra loops/shortcuts; overlap with existing floors is fine.
        // Degenerate grids collapse the sample range to a single anchor;
        // out-of-range cells of the block are dropped silently.
        for _ in 0..shortcuts {
            let x = rng.random_range(0..maze.width.saturating_sub(3).max(1)) + 2;
            let y = rng.random_range(0..maze.height.saturating_sub(3).max(1)) + 2;
            maze.open_block(x as i32, y as i32);
        }

        // Guaranteed horizontal corridor along the bottom edge
        for x in 0..maze.width {
            if maze.height >= 2 {
                maze.set_open(x, maze.height - 2);
            }
            if maze.height >= 1 {
                maze.set_open(x, maze.height - 1);
            }
        }

        maze
    }

    /// Depth-first carve of 2x2 blocks connected by 2-tile-wide corridors.
    /// Returns the anchors of every block opened, in visit order.
    fn carve_skeleton(&mut self, rng: &mut impl Rng) -> Vec<(i32, i32)> {
        let (start_x, start_y) = (2i32, 2i32);
        self.open_block(start_x, start_y);

        let mut stack = vec![(start_x, start_y)];
        let mut carved = vec![(start_x, start_y)];

        while let Some(&(x, y)) = stack.last() {
            let mut candidates: Vec<(i32, i32, i32, i32)> = Vec::with_capacity(4);
            for (dx, dy) in CARVE_DIRS {
                let (nx, ny) = (x + dx, y + dy);
                // Target block must sit strictly inside the interior and be uncarved
                if nx > 1
                    && nx < self.width as i32 - 2
                    && ny > 1
                    && ny < self.height as i32 - 2
                    && self.tile(nx, ny) == Tile::Wall
                {
                    candidates.push((nx, ny, dx, dy));
                }
            }

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let (nx, ny, dx, dy) = candidates[rng.random_range(0..candidates.len())];

            // Open both rows/columns spanned by the 2-tile-wide corridor
            if dx != 0 {
                let step = dx.signum();
                for i in 0..=dx.abs() {
                    let cx = x + i * step;
                    self.set_open_i(cx, y);
                    self.set_open_i(cx, y + 1);
                }
            } else {
                let step = dy.signum();
                for i in 0..=dy.abs() {
                    let cy = y + i * step;
                    self.set_open_i(x, cy);
                    self.set_open_i(x + 1, cy);
                }
            }

            self.open_block(nx, ny);
            stack.push((nx, ny));
            carved.push((nx, ny));
        }

        carved
    }

    /// Whether the world-space position sits on a wall tile.
    /// Out-of-bounds coordinates always count as wall.
    pub fn is_wall(&self, world_x: f32, world_y: f32) -> bool {
        let tx = (world_x / self.tile_size).floor() as i64;
        let ty = (world_y / self.tile_size).floor() as i64;
        if tx < 0 || tx >= self.width as i64 || ty < 0 || ty >= self.height as i64 {
            return true;
        }
        self.grid[ty as usize * self.width + tx as usize] == Tile::Wall
    }

    /// Center of a random all-open 2x2 block.
    ///
    /// Rejection-samples up to a fixed attempt budget; on exhaustion returns
    /// a fixed safe position near the maze entrance (silent degradation).
    pub fn random_floor_position(&self, rng: &mut impl Rng) -> Vec2 {
        for _ in 0..FLOOR_SAMPLE_ATTEMPTS {
            let x = rng.random_range(0..self.width.saturating_sub(4).max(1)) + 2;
            let y = rng.random_range(0..self.height.saturating_sub(4).max(1)) + 2;

            if self.block_open(x as i32, y as i32) {
                return Vec2::new(x as f32 + 1.0, y as f32 + 1.0) * self.tile_size;
            }
        }
        Vec2::splat(self.tile_size * 3.0)
    }

    /// Grid width in tiles
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles
    pub fn height(&self) -> usize {
        self.height
    }

    /// World extent covered by the grid
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    /// Cell lookup by tile coordinates; out of range reads as wall
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return Tile::Wall;
        }
        self.grid[y as usize * self.width + x as usize]
    }

    fn block_open(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == Tile::Open
            && self.tile(x + 1, y) == Tile::Open
            && self.tile(x, y + 1) == Tile::Open
            && self.tile(x + 1, y + 1) == Tile::Open
    }

    fn open_block(&mut self, x: i32, y: i32) {
        self.set_open_i(x, y);
        self.set_open_i(x + 1, y);
        self.set_open_i(x, y + 1);
        self.set_open_i(x + 1, y + 1);
    }

    fn set_open(&mut self, x: usize, y: usize) {
        self.grid[y * self.width + x] = Tile::Open;
    }

    fn set_open_i(&mut self, x: i32, y: i32) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            self.set_open(x as usize, y as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn walled(width: usize, height: usize) -> Maze {
        Maze {
            width,
            height,
            tile_size: 40.0,
            grid: vec![Tile::Wall; width * height],
        }
    }

    #[test]
    fn carved_skeleton_is_connected() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut maze = walled(96, 54);
        let carved = maze.carve_skeleton(&mut rng);
        assert!(!carved.is_empty());

        // Flood fill over open cells from the start block
        let mut seen = vec![false; maze.width * maze.height];
        let mut queue = vec![(2i32, 2i32)];
        seen[2 * maze.width + 2] = true;
        while let Some((x, y)) = queue.pop() {
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let (nx, ny) = (x + dx, y + dy);
                if maze.tile(nx, ny) == Tile::Open {
                    let idx = ny as usize * maze.width + nx as usize;
                    if !seen[idx] {
                        seen[idx] = true;
                        queue.push((nx, ny));
                    }
                }
            }
        }

        for (bx, by) in carved {
            assert!(
                seen[by as usize * maze.width + bx as usize],
                "carved block ({bx},{by}) unreachable from start"
            );
        }
    }

    #[test]
    fn bottom_band_is_open() {
        let mut rng = Pcg32::seed_from_u64(3);
        let maze = Maze::generate(96, 54, 40.0, 30, &mut rng);
        for x in 0..maze.width() {
            assert_eq!(maze.tile(x as i32, 52), Tile::Open);
            assert_eq!(maze.tile(x as i32, 53), Tile::Open);
        }
    }

    #[test]
    fn random_floor_position_is_open_block_center() {
        let mut rng = Pcg32::seed_from_u64(11);
        let maze = Maze::generate(96, 54, 40.0, 30, &mut rng);
        for _ in 0..50 {
            let pos = maze.random_floor_position(&mut rng);
            assert!(!maze.is_wall(pos.x, pos.y));
        }
    }

    #[test]
    fn degenerate_grid_generates_without_panic() {
        let mut rng = Pcg32::seed_from_u64(2);
        for (w, h) in [(1, 1), (3, 3), (3, 54), (96, 4)] {
            let maze = Maze::generate(w, h, 40.0, 30, &mut rng);
            // Too small for an interior 2x2 block: sampling degrades to the
            // fixed fallback instead of failing
            let pos = maze.random_floor_position(&mut rng);
            assert!(pos.x.is_finite() && pos.y.is_finite());
        }
    }

    #[test]
    fn fallback_position_on_exhaustion() {
        // All-wall grid: sampling can never succeed
        let maze = walled(96, 54);
        let mut rng = Pcg32::seed_from_u64(1);
        let pos = maze.random_floor_position(&mut rng);
        assert_eq!(pos, Vec2::splat(120.0));
    }

    proptest! {
        #[test]
        fn out_of_bounds_reads_as_wall(x in -1.0e6f32..1.0e6, y in -1.0e6f32..1.0e6) {
            let mut rng = Pcg32::seed_from_u64(5);
            let maze = Maze::generate(96, 54, 40.0, 30, &mut rng);
            let size = maze.world_size();
            if x < 0.0 || x >= size.x || y < 0.0 || y >= size.y {
                prop_assert!(maze.is_wall(x, y));
            }
        }
    }
}
