//! Rewind Maze - a top-down maze-pursuit arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, entities, collisions, camera)
//! - `config`: Injectable per-level tuning surface
//!
//! The crate is the simulation substrate only. Rendering, audio, menus and
//! input capture are external collaborators: they feed an [`sim::InputSnapshot`]
//! into [`sim::step`] each frame and consume the returned [`sim::GameEvent`]s
//! plus a [`sim::RenderScene`] built from the state.

pub mod config;
pub mod sim;

pub use config::LevelConfig;
pub use sim::{GameEvent, GamePhase, GameState, InputSnapshot, RenderScene, step};
