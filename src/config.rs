//! Per-level tuning surface
//!
//! Every constant the simulation consumes lives here so a driver (or a test)
//! can inject its own values. The defaults are the reference balance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Number of levels in a full run
pub const LEVEL_COUNT: u32 = 3;

/// Maximum frame delta fed to the simulation (seconds). Larger deltas are
/// clamped to bound position updates and limit tunneling through walls.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Pursuer speed used when a deserialized config supplies an empty table
pub const FALLBACK_PURSUER_SPEED: f32 = 120.0;

/// Level configuration (world geometry, entity tuning, camera tuning)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Square maze tile edge length (world units)
    pub tile_size: f32,
    /// World extent (world units); the maze grid is derived from this
    pub world_size: Vec2,
    /// Viewport extent the camera frames (world units = pixels here)
    pub viewport: Vec2,

    /// Player sprite extent
    pub player_size: f32,
    /// Player movement speed (units/s)
    pub player_speed: f32,
    /// Starting lives
    pub max_lives: u32,
    /// Post-damage invulnerability window (seconds)
    pub invulnerability_time: f32,

    /// Pursuer sprite extent
    pub pursuer_size: f32,
    /// Pursuer movement speed per level index (units/s)
    pub pursuer_speeds: Vec<f32>,
    /// Number of pursuers in the wave spawn
    pub pursuer_count: usize,
    /// Chase trigger distance to the player
    pub detection_radius: f32,
    /// How long a patrol heading is held before re-randomizing (seconds)
    pub patrol_hold_time: f32,
    /// Delay from level start to the wave spawn (seconds)
    pub wave_delay: f32,

    /// Projectile sprite extent
    pub projectile_size: f32,
    /// Projectile speed (units/s)
    pub projectile_speed: f32,
    /// Minimum time between shots (seconds)
    pub fire_cooldown: f32,

    /// Objectives placed per level
    pub objective_count: usize,
    /// Objective sprite extent
    pub objective_size: f32,
    /// Dwell distance that accumulates disable progress
    pub disable_radius: f32,
    /// Dwell time required to disable an objective (seconds)
    pub disable_time: f32,

    /// Manual camera pan speed from key intents (units/s)
    pub camera_pan_speed: f32,
    /// Fraction of remaining distance the camera covers per frame
    pub camera_lerp: f32,
    /// Screen-edge margin that triggers automatic follow (top/left/right)
    pub camera_margin: f32,
    /// Screen-edge margin for the bottom edge
    pub camera_margin_bottom: f32,
    /// Extra vertical clamp slack so the open bottom corridor stays visible
    pub camera_bottom_slack: f32,

    /// Extra 2x2 openings carved after the maze skeleton
    pub maze_shortcuts: usize,

    /// Score awarded per pursuer kill
    pub score_per_kill: u64,
    /// Score awarded per disabled objective
    pub score_per_objective: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            tile_size: 40.0,
            world_size: Vec2::new(3840.0, 2160.0),
            viewport: Vec2::new(1280.0, 720.0),

            player_size: 55.0,
            player_speed: 200.0,
            max_lives: 5,
            invulnerability_time: 2.0,

            pursuer_size: 68.0,
            pursuer_speeds: vec![80.0, 120.0, 160.0],
            pursuer_count: 25,
            detection_radius: 250.0,
            patrol_hold_time: 2.0,
            wave_delay: 2.0,

            projectile_size: 8.0,
            projectile_speed: 400.0,
            fire_cooldown: 0.2,

            objective_count: 7,
            objective_size: 35.0,
            disable_radius: 50.0,
            disable_time: 3.0,

            camera_pan_speed: 400.0,
            camera_lerp: 0.15,
            camera_margin: 100.0,
            camera_margin_bottom: 100.0,
            camera_bottom_slack: 300.0,

            maze_shortcuts: 30,

            score_per_kill: 100,
            score_per_objective: 500,
        }
    }
}

impl LevelConfig {
    /// Pursuer speed for a 1-based level index. The last entry repeats past
    /// the end; an empty table (possible from deserialized configs) falls
    /// back to a fixed speed rather than failing.
    pub fn pursuer_speed(&self, level: u32) -> f32 {
        let idx =
            (level.saturating_sub(1) as usize).min(self.pursuer_speeds.len().saturating_sub(1));
        self.pursuer_speeds
            .get(idx)
            .copied()
            .unwrap_or(FALLBACK_PURSUER_SPEED)
    }

    /// Maze grid width in tiles
    pub fn width_tiles(&self) -> usize {
        (self.world_size.x / self.tile_size) as usize
    }

    /// Maze grid height in tiles
    pub fn height_tiles(&self) -> usize {
        (self.world_size.y / self.tile_size) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pursuer_speed_repeats_last_entry() {
        let config = LevelConfig::default();
        assert_eq!(config.pursuer_speed(1), 80.0);
        assert_eq!(config.pursuer_speed(3), 160.0);
        assert_eq!(config.pursuer_speed(99), 160.0);
    }

    #[test]
    fn empty_speed_table_falls_back() {
        let config = LevelConfig {
            pursuer_speeds: Vec::new(),
            ..Default::default()
        };
        assert_eq!(config.pursuer_speed(1), FALLBACK_PURSUER_SPEED);
    }
}
