//! Headless demo driver
//!
//! Runs the simulation with a scripted input and logs the emitted events.
//! Useful for smoke-testing balance changes without a renderer attached.
//!
//! Usage: rewind-maze [seed] [config.json]

use std::time::Instant;

use rewind_maze::LevelConfig;
use rewind_maze::sim::{GameEvent, GamePhase, GameState, InputSnapshot, step};

const DT: f32 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 42,
    };
    let config: LevelConfig = match args.next() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => LevelConfig::default(),
    };

    log::info!("running headless with seed {seed}");
    let started = Instant::now();
    let mut state = GameState::new(seed, config);

    // Scripted input: wander right/down along the open bottom corridor,
    // firing continuously
    for frame in 0u64.. {
        let input = InputSnapshot {
            right: frame % 400 < 300,
            down: frame % 400 >= 300,
            fire: true,
            aim_angle: Some((frame as f32 * 0.01).sin() * std::f32::consts::PI),
            ..Default::default()
        };

        for event in step(&mut state, &input, DT) {
            match event {
                GameEvent::RobotKilled { pos } => log::info!("kill at {pos}"),
                GameEvent::ObjectiveDisabled { pos } => log::info!("objective down at {pos}"),
                GameEvent::PlayerDamaged { .. } => {
                    log::info!("hit, {} lives left", state.player.lives)
                }
                GameEvent::PlayerDied => log::info!("player died"),
                GameEvent::LevelCleared => log::info!("level {} cleared", state.level),
            }
        }

        match state.phase {
            GamePhase::LevelComplete => state.advance_level(),
            GamePhase::GameOver | GamePhase::Victory => break,
            _ => {}
        }

        // Bail out of runs the script cannot finish
        if frame > 60 * 600 {
            log::warn!("demo timed out after 10 simulated minutes");
            break;
        }
    }

    log::info!(
        "finished: phase {:?}, score {}, {} kills, wall time {:?}",
        state.phase,
        state.score,
        state.robots_killed,
        started.elapsed()
    );
    Ok(())
}
