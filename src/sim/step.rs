//! Per-frame simulation step
//!
//! `step` is an explicit function of (state, input, dt) with no scheduling of
//! its own; any driver works, from a fixed-timestep test harness to a
//! real-time renderer. One call completes every entity update for the frame,
//! so the render pass never observes a torn state.
//!
//! Update ordering per frame: spawn timing, player, camera, fire, pursuers,
//! projectiles, projectile x pursuer, pursuer x player, objectives,
//! termination checks.

use super::collision::circles_overlap;
use super::state::{GameEvent, GamePhase, GameState, InputSnapshot, Projectile};
use crate::config::MAX_FRAME_DT;

/// Advance the simulation by one frame and return the frame's events.
///
/// Events are a return value consumed exactly once by the caller, never
/// stored flags. Does nothing unless the phase is `Playing`.
pub fn step(state: &mut GameState, input: &InputSnapshot, dt: f32) -> Vec<GameEvent> {
    if state.phase != GamePhase::Playing {
        return Vec::new();
    }

    // Bound the position-update magnitude on slow frames
    let dt = dt.min(MAX_FRAME_DT);
    let mut events = Vec::new();

    state.level_timer += dt;
    if !state.wave_spawned && state.level_timer >= state.config.wave_delay {
        state.spawn_wave();
    }

    let player_speed = state.config.player_speed;
    state
        .player
        .update(dt, input, &state.maze, state.camera.pos, player_speed);

    state.camera.update(
        dt,
        state.player.pos,
        input,
        &state.config,
        state.maze.world_size(),
    );

    if input.fire && state.fire_cooldown <= 0.0 {
        state.projectiles.push(Projectile::new(
            state.player.pos,
            state.player.aim_angle,
            state.config.projectile_speed,
            state.config.projectile_size,
        ));
        state.fire_cooldown = state.config.fire_cooldown;
    }
    state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);

    for pursuer in &mut state.pursuers {
        pursuer.update(
            dt,
            state.player.pos,
            &state.maze,
            &mut state.rng,
            state.config.detection_radius,
            state.config.patrol_hold_time,
        );
    }

    for projectile in &mut state.projectiles {
        projectile.update(dt, &state.maze);
    }

    // Projectile x pursuer: both die, one kill event each
    for projectile in &mut state.projectiles {
        for pursuer in &mut state.pursuers {
            if !projectile.dead
                && !pursuer.dead
                && circles_overlap(
                    projectile.pos,
                    projectile.size / 2.0,
                    pursuer.pos,
                    pursuer.size / 2.0,
                )
            {
                projectile.dead = true;
                pursuer.dead = true;
                state.score += state.config.score_per_kill;
                state.robots_killed += 1;
                events.push(GameEvent::RobotKilled { pos: pursuer.pos });
            }
        }
    }
    state.projectiles.retain(|p| !p.dead);
    state.pursuers.retain(|p| !p.dead);

    // Pursuer x player: invulnerability gates repeat hits within the frame
    for pursuer in &state.pursuers {
        if circles_overlap(
            pursuer.pos,
            pursuer.size / 2.0,
            state.player.pos,
            state.player.size / 2.0,
        ) && state
            .player
            .take_damage(state.config.invulnerability_time)
        {
            events.push(GameEvent::PlayerDamaged {
                pos: state.player.pos,
            });
            if state.player.lives == 0 {
                state.phase = GamePhase::GameOver;
                events.push(GameEvent::PlayerDied);
                log::info!("player died on level {}", state.level);
            }
        }
    }

    for objective in &mut state.objectives {
        if objective.update(
            dt,
            state.player.pos,
            state.config.disable_radius,
            state.config.disable_time,
        ) {
            state.score += state.config.score_per_objective;
            state.objectives_disabled += 1;
            events.push(GameEvent::ObjectiveDisabled {
                pos: objective.pos,
            });
        }
    }

    if state.phase == GamePhase::Playing && state.active_objectives() == 0 {
        state.phase = GamePhase::LevelComplete;
        events.push(GameEvent::LevelCleared);
        log::info!("level {} cleared, score {}", state.level, state.score);
    }

    events
}
