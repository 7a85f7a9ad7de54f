//! Render primitive extraction
//!
//! Pure view of the simulation state for the rendering collaborator: sprite
//! keys plus screen-space rectangles for every live entity, per-tile maze
//! occupancy with the camera offset for tile drawing, and objective progress
//! fractions for the progress rings. The core always produces a valid key/rect pair; missing
//! art is the renderer's problem (it draws a fallback block).

use glam::Vec2;

use super::maze::Maze;
use super::state::{GameState, PursuerState};

/// Key the renderer maps to a sprite resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKey {
    Player { facing_right: bool },
    Pursuer { facing_right: bool, variant: u8, chasing: bool },
    Projectile,
    Objective { active: bool, variant: u8 },
}

/// Axis-aligned screen-space rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl ScreenRect {
    fn centered(world_pos: Vec2, size: f32, camera: Vec2) -> Self {
        Self {
            pos: world_pos - camera - Vec2::splat(size / 2.0),
            size: Vec2::splat(size),
        }
    }
}

/// One drawable entity
#[derive(Debug, Clone, Copy)]
pub struct SpriteInstance {
    pub key: SpriteKey,
    pub rect: ScreenRect,
    /// Disable progress (0..1); nonzero only for objectives
    pub progress: f32,
}

/// Everything the renderer needs for one frame: per-tile occupancy, the
/// camera offset to subtract when drawing, and every live entity
#[derive(Debug, Clone)]
pub struct RenderScene<'a> {
    pub camera: Vec2,
    /// Tile occupancy view (query via [`Maze::tile`] and the dimensions)
    pub maze: &'a Maze,
    pub sprites: Vec<SpriteInstance>,
}

/// Build the frame's render scene. Emits every live entity; culling is the
/// renderer's concern.
pub fn build_scene(state: &GameState) -> RenderScene<'_> {
    let camera = state.camera.pos;
    let mut sprites = Vec::with_capacity(
        1 + state.pursuers.len() + state.projectiles.len() + state.objectives.len(),
    );

    for objective in &state.objectives {
        sprites.push(SpriteInstance {
            key: SpriteKey::Objective {
                active: objective.active,
                variant: objective.variant,
            },
            rect: ScreenRect::centered(objective.pos, objective.size, camera),
            progress: objective.progress_fraction(state.config.disable_time),
        });
    }

    for pursuer in &state.pursuers {
        sprites.push(SpriteInstance {
            key: SpriteKey::Pursuer {
                facing_right: pursuer.facing_right,
                variant: pursuer.variant,
                chasing: pursuer.state == PursuerState::Chase,
            },
            rect: ScreenRect::centered(pursuer.pos, pursuer.size, camera),
            progress: 0.0,
        });
    }

    sprites.push(SpriteInstance {
        key: SpriteKey::Player {
            facing_right: state.player.facing_right,
        },
        rect: ScreenRect::centered(state.player.pos, state.player.size, camera),
        progress: 0.0,
    });

    for projectile in &state.projectiles {
        sprites.push(SpriteInstance {
            key: SpriteKey::Projectile,
            rect: ScreenRect::centered(projectile.pos, projectile.size, camera),
            progress: 0.0,
        });
    }

    RenderScene {
        camera,
        maze: &state.maze,
        sprites,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelConfig;

    #[test]
    fn scene_contains_every_live_entity() {
        let mut state = GameState::new(4, LevelConfig::default());
        state.spawn_wave();

        let scene = build_scene(&state);
        let players = scene
            .sprites
            .iter()
            .filter(|s| matches!(s.key, SpriteKey::Player { .. }))
            .count();
        let pursuers = scene
            .sprites
            .iter()
            .filter(|s| matches!(s.key, SpriteKey::Pursuer { .. }))
            .count();
        let objectives = scene
            .sprites
            .iter()
            .filter(|s| matches!(s.key, SpriteKey::Objective { .. }))
            .count();

        assert_eq!(players, 1);
        assert_eq!(pursuers, state.pursuers.len());
        assert_eq!(objectives, 7);
    }

    #[test]
    fn rects_are_camera_relative_and_centered() {
        let mut state = GameState::new(4, LevelConfig::default());
        state.camera.pos = Vec2::new(100.0, 50.0);
        state.player.pos = Vec2::new(300.0, 250.0);

        let scene = build_scene(&state);
        let player = scene
            .sprites
            .iter()
            .find(|s| matches!(s.key, SpriteKey::Player { .. }))
            .unwrap();

        assert_eq!(player.rect.pos, Vec2::new(200.0 - 27.5, 200.0 - 27.5));
        assert_eq!(player.rect.size, Vec2::splat(55.0));
    }

    #[test]
    fn maze_occupancy_is_exposed() {
        use crate::sim::maze::Tile;

        let state = GameState::new(4, LevelConfig::default());
        let scene = build_scene(&state);

        assert_eq!(scene.maze.width(), state.config.width_tiles());
        assert_eq!(scene.maze.height(), state.config.height_tiles());
        assert_eq!(scene.camera, state.camera.pos);
        // Bottom corridor is open, grid edges read as wall
        assert_eq!(scene.maze.tile(0, scene.maze.height() as i32 - 1), Tile::Open);
        assert_eq!(scene.maze.tile(-1, 0), Tile::Wall);
    }

    #[test]
    fn objective_progress_fraction_is_exposed() {
        let mut state = GameState::new(4, LevelConfig::default());
        state.objectives[0].progress = 1.5;

        let scene = build_scene(&state);
        let with_progress = scene
            .sprites
            .iter()
            .find(|s| s.progress > 0.0)
            .expect("objective with progress");
        assert!((with_progress.progress - 0.5).abs() < 1e-4);
    }
}
