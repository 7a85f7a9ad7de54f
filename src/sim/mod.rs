//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit step function, no implicit scheduling
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The step owns every entity collection for the duration of a frame; nothing
//! outside mutates simulation state mid-step.

pub mod camera;
pub mod collision;
pub mod maze;
pub mod scene;
pub mod state;
pub mod step;

pub use camera::Camera;
pub use collision::{MoveResult, circles_overlap, resolve_move};
pub use maze::{Maze, Tile};
pub use scene::{RenderScene, ScreenRect, SpriteInstance, SpriteKey, build_scene};
pub use state::{
    GameEvent, GamePhase, GameState, InputSnapshot, Objective, PanKeys, Player, Projectile,
    Pursuer, PursuerState,
};
pub use step::step;
