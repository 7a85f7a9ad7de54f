//! Dead-zone follow camera
//!
//! The camera chases the player only when the player's screen-space position
//! drifts within a margin of a viewport edge, and then only covers a fixed
//! fraction of the remaining distance per frame. Small player movements near
//! screen center move nothing, which kills micro-jitter.

use glam::Vec2;

use super::state::InputSnapshot;
use crate::config::LevelConfig;

/// Camera position is the world coordinate of the viewport's top-left corner
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    /// Advance the camera one frame: manual pan, edge-triggered lerp follow,
    /// then the world-bound clamp.
    pub fn update(
        &mut self,
        dt: f32,
        player_pos: Vec2,
        input: &InputSnapshot,
        config: &LevelConfig,
        world_size: Vec2,
    ) {
        let target = player_pos - config.viewport / 2.0;

        // Manual pan: additive and uncapped by the follow target
        if input.pan_keys.left {
            self.pos.x -= config.camera_pan_speed * dt;
        }
        if input.pan_keys.right {
            self.pos.x += config.camera_pan_speed * dt;
        }
        if input.pan_keys.up {
            self.pos.y -= config.camera_pan_speed * dt;
        }
        if input.pan_keys.down {
            self.pos.y += config.camera_pan_speed * dt;
        }
        self.pos += input.pan_delta;

        // Follow only once the player nears a viewport edge
        let screen = player_pos - self.pos;
        let follow_x =
            screen.x < config.camera_margin || screen.x > config.viewport.x - config.camera_margin;
        let follow_y = screen.y < config.camera_margin
            || screen.y > config.viewport.y - config.camera_margin_bottom;

        if follow_x {
            self.pos.x += (target.x - self.pos.x) * config.camera_lerp;
        }
        if follow_y {
            self.pos.y += (target.y - self.pos.y) * config.camera_lerp;
        }

        // The vertical slack keeps the guaranteed-open bottom corridor visible
        let max = Vec2::new(
            (world_size.x - config.viewport.x).max(0.0),
            (world_size.y - config.viewport.y + config.camera_bottom_slack).max(0.0),
        );
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }
}
