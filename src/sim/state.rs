//! Game state and core simulation types
//!
//! The step function owns every entity collection exclusively; entities never
//! hold references to each other. Cross-entity effects (collisions, damage)
//! are computed by the loop iterating the collections and flipping liveness
//! or state flags.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::collision::resolve_move;
use super::maze::Maze;
use crate::config::{LEVEL_COUNT, LevelConfig};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Step function frozen; render may still run
    Paused,
    /// All objectives disabled; awaiting `advance_level`
    LevelComplete,
    /// Lives exhausted (terminal)
    GameOver,
    /// All levels cleared (terminal)
    Victory,
}

/// Discrete events emitted by the step function for HUD/audio/storage
/// collaborators. Payloads carry only what VFX placement needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RobotKilled { pos: Vec2 },
    ObjectiveDisabled { pos: Vec2 },
    PlayerDamaged { pos: Vec2 },
    PlayerDied,
    LevelCleared,
}

/// Per-frame input snapshot produced by the input collaborator
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire intent (subject to cooldown)
    pub fire: bool,
    /// Pointer position in screen space, if a pointer is present
    pub pointer: Option<Vec2>,
    /// Explicit aim angle (joystick), used when no pointer is supplied
    pub aim_angle: Option<f32>,
    /// Touch-drag camera pan delta, added to the camera verbatim
    pub pan_delta: Vec2,
    /// Keyboard camera pan intents
    pub pan_keys: PanKeys,
}

/// Directional camera-pan key states
#[derive(Debug, Clone, Copy, Default)]
pub struct PanKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// The player entity
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub vel: Vec2,
    pub lives: u32,
    pub invulnerable: bool,
    pub invulnerable_timer: f32,
    /// Aim angle in radians (world space)
    pub aim_angle: f32,
    pub facing_right: bool,
    /// Any directional intent this frame
    pub moving: bool,
    /// Latched once the player has ever moved
    pub has_moved: bool,
}

impl Player {
    pub fn new(pos: Vec2, size: f32, lives: u32) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            lives,
            invulnerable: false,
            invulnerable_timer: 0.0,
            aim_angle: 0.0,
            facing_right: true,
            moving: false,
            has_moved: false,
        }
    }

    /// Advance the player one frame from the input snapshot.
    ///
    /// `camera_pos` is needed to lift the screen-space pointer into world
    /// space for aiming.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        maze: &Maze,
        camera_pos: Vec2,
        speed: f32,
    ) {
        self.moving = false;
        let mut dir = Vec2::ZERO;

        if input.up {
            dir.y -= 1.0;
            self.moving = true;
        }
        if input.down {
            dir.y += 1.0;
            self.moving = true;
        }
        if input.left {
            dir.x -= 1.0;
            self.moving = true;
            self.facing_right = false;
        }
        if input.right {
            dir.x += 1.0;
            self.moving = true;
            self.facing_right = true;
        }

        if self.moving {
            self.has_moved = true;
        }

        // Normalize so diagonal movement is not faster than axial
        self.vel = dir.normalize_or_zero() * speed;
        self.pos = resolve_move(self.pos, self.vel * dt, maze).pos;

        if let Some(pointer) = input.pointer {
            let world = pointer + camera_pos;
            let to_pointer = world - self.pos;
            self.aim_angle = to_pointer.y.atan2(to_pointer.x);
        } else if let Some(angle) = input.aim_angle {
            self.aim_angle = angle;
        }

        if self.invulnerable {
            self.invulnerable_timer -= dt;
            if self.invulnerable_timer <= 0.0 {
                self.invulnerable = false;
            }
        }
    }

    /// Apply one hit. Returns whether damage actually landed, so the caller
    /// can gate the damage event; no-op while invulnerable or at zero lives.
    pub fn take_damage(&mut self, invulnerability_time: f32) -> bool {
        if !self.invulnerable && self.lives > 0 {
            self.lives -= 1;
            self.invulnerable = true;
            self.invulnerable_timer = invulnerability_time;
            return true;
        }
        false
    }
}

/// Pursuer behavior state, reassessed every frame against the detection
/// radius. No hysteresis: flicker at the boundary is accepted behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuerState {
    Patrol,
    Chase,
}

/// An AI-controlled hostile entity
#[derive(Debug, Clone)]
pub struct Pursuer {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub vel: Vec2,
    pub dead: bool,
    pub state: PursuerState,
    pub patrol_angle: f32,
    pub patrol_timer: f32,
    /// Visual variant (1..=4)
    pub variant: u8,
    pub facing_right: bool,
}

impl Pursuer {
    pub fn new(pos: Vec2, size: f32, speed: f32, variant: u8, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            size,
            speed,
            vel: Vec2::ZERO,
            dead: false,
            state: PursuerState::Patrol,
            patrol_angle: rng.random_range(0.0..std::f32::consts::TAU),
            patrol_timer: 0.0,
            variant,
            facing_right: true,
        }
    }

    /// Patrol/chase decision plus axis-separated movement.
    pub fn update(
        &mut self,
        dt: f32,
        player_pos: Vec2,
        maze: &Maze,
        rng: &mut impl Rng,
        detection_radius: f32,
        patrol_hold_time: f32,
    ) {
        if self.pos.distance(player_pos) < detection_radius {
            self.state = PursuerState::Chase;
            let dir = (player_pos - self.pos).normalize_or_zero();
            self.vel = dir * self.speed;
            self.facing_right = dir.x >= 0.0;
        } else {
            self.state = PursuerState::Patrol;
            self.patrol_timer += dt;
            if self.patrol_timer > patrol_hold_time {
                self.patrol_angle = rng.random_range(0.0..std::f32::consts::TAU);
                self.patrol_timer = 0.0;
            }
            self.vel = Vec2::from_angle(self.patrol_angle) * self.speed * 0.5;
            self.facing_right = self.patrol_angle.cos() >= 0.0;
        }

        let result = resolve_move(self.pos, self.vel * dt, maze);
        self.pos = result.pos;

        // A blocked axis means the heading is useless; re-roll it so the
        // pursuer never idles against a wall
        if result.blocked_x || result.blocked_y {
            self.patrol_angle = rng.random_range(0.0..std::f32::consts::TAU);
        }

        let world = maze.world_size();
        if self.pos.x < 0.0 || self.pos.x > world.x || self.pos.y < 0.0 || self.pos.y > world.y {
            self.patrol_angle = rng.random_range(0.0..std::f32::consts::TAU);
        }
    }
}

/// A fired projectile; velocity is fixed at spawn
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub dead: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, angle: f32, speed: f32, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            size,
            dead: false,
        }
    }

    /// Advance; dies on wall point-contact or on leaving world bounds.
    pub fn update(&mut self, dt: f32, maze: &Maze) {
        self.pos += self.vel * dt;

        if maze.is_wall(self.pos.x, self.pos.y) {
            self.dead = true;
        }

        let world = maze.world_size();
        if self.pos.x < 0.0 || self.pos.x > world.x || self.pos.y < 0.0 || self.pos.y > world.y {
            self.dead = true;
        }
    }
}

/// A timed objective disabled by player proximity dwell
#[derive(Debug, Clone)]
pub struct Objective {
    pub pos: Vec2,
    pub size: f32,
    pub active: bool,
    /// Accumulated dwell time (seconds)
    pub progress: f32,
    /// Visual variant tied to the level
    pub variant: u8,
}

impl Objective {
    pub fn new(pos: Vec2, size: f32, variant: u8) -> Self {
        Self {
            pos,
            size,
            active: true,
            progress: 0.0,
            variant,
        }
    }

    /// Accumulate dwell while the player is within `radius`; leaving resets
    /// progress to zero. Returns true exactly once, on the frame the disable
    /// completes; `active` is terminal after that.
    pub fn update(&mut self, dt: f32, player_pos: Vec2, radius: f32, disable_time: f32) -> bool {
        if !self.active {
            return false;
        }

        if self.pos.distance(player_pos) < radius {
            self.progress += dt;
            if self.progress >= disable_time {
                self.active = false;
                return true;
            }
        } else {
            self.progress = 0.0;
        }
        false
    }

    /// Disable progress as a 0..1 fraction for progress-ring rendering
    pub fn progress_fraction(&self, disable_time: f32) -> f32 {
        (self.progress / disable_time).clamp(0.0, 1.0)
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: LevelConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// 1-based level index
    pub level: u32,
    pub phase: GamePhase,

    pub maze: Maze,
    pub player: Player,
    pub pursuers: Vec<Pursuer>,
    pub projectiles: Vec<Projectile>,
    pub objectives: Vec<Objective>,
    pub camera: Camera,

    pub score: u64,
    pub robots_killed: u32,
    pub objectives_disabled: u32,

    /// Seconds elapsed since level start (drives the wave spawn)
    pub level_timer: f32,
    pub wave_spawned: bool,
    pub fire_cooldown: f32,
}

impl GameState {
    /// Create a fresh run at level 1 with the given seed
    pub fn new(seed: u64, config: LevelConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (maze, player, objectives, camera) = Self::build_level(&config, 1, &mut rng);

        Self {
            config,
            seed,
            rng,
            level: 1,
            phase: GamePhase::Playing,
            maze,
            player,
            pursuers: Vec::new(),
            projectiles: Vec::new(),
            objectives,
            camera,
            score: 0,
            robots_killed: 0,
            objectives_disabled: 0,
            level_timer: 0.0,
            wave_spawned: false,
            fire_cooldown: 0.0,
        }
    }

    /// Construct the mutable world for a level. Used whole-sale so level
    /// transitions swap state atomically between frames.
    fn build_level(
        config: &LevelConfig,
        level: u32,
        rng: &mut Pcg32,
    ) -> (Maze, Player, Vec<Objective>, Camera) {
        let maze = Maze::generate(
            config.width_tiles(),
            config.height_tiles(),
            config.tile_size,
            config.maze_shortcuts,
            rng,
        );

        let spawn = Vec2::splat(config.tile_size * 3.0);
        let player = Player::new(spawn, config.player_size, config.max_lives);

        let variant = level.clamp(1, LEVEL_COUNT) as u8;
        let objectives = (0..config.objective_count)
            .map(|_| {
                let pos = maze.random_floor_position(rng);
                Objective::new(pos, config.objective_size, variant)
            })
            .collect();

        (maze, player, objectives, Camera::default())
    }

    /// Discard and rebuild the world for the current level
    fn reset_level(&mut self) {
        let (maze, player, objectives, camera) =
            Self::build_level(&self.config, self.level, &mut self.rng);
        self.maze = maze;
        self.player = player;
        self.objectives = objectives;
        self.camera = camera;
        self.pursuers.clear();
        self.projectiles.clear();
        self.level_timer = 0.0;
        self.wave_spawned = false;
        self.fire_cooldown = 0.0;
        log::info!("level {} started", self.level);
    }

    /// Move on from a completed level; past the last level the run ends in
    /// `Victory`
    pub fn advance_level(&mut self) {
        self.level += 1;
        if self.level > LEVEL_COUNT {
            self.phase = GamePhase::Victory;
            log::info!("run complete, final score {}", self.score);
        } else {
            self.reset_level();
            self.phase = GamePhase::Playing;
        }
    }

    /// Restart the run from level 1 with fresh counters (same RNG stream)
    pub fn restart(&mut self) {
        self.level = 1;
        self.score = 0;
        self.robots_killed = 0;
        self.objectives_disabled = 0;
        self.reset_level();
        self.phase = GamePhase::Playing;
    }

    /// Pause control surface, held by the input collaborator via injection
    /// rather than ambient globals
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// One burst of pursuers at random floor positions. Variants are dealt
    /// as six each of 1..=4 plus one random, cycling if the count exceeds
    /// the deck.
    pub fn spawn_wave(&mut self) {
        self.wave_spawned = true;
        let speed = self.config.pursuer_speed(self.level);

        let mut deck: Vec<u8> = (1..=4u8).flat_map(|v| std::iter::repeat_n(v, 6)).collect();
        deck.push(self.rng.random_range(1..=4));

        for i in 0..self.config.pursuer_count {
            let pos = self.maze.random_floor_position(&mut self.rng);
            let variant = deck[i % deck.len()];
            self.pursuers.push(Pursuer::new(
                pos,
                self.config.pursuer_size,
                speed,
                variant,
                &mut self.rng,
            ));
        }
        log::debug!(
            "wave spawned: {} pursuers at speed {speed}",
            self.pursuers.len()
        );
    }

    /// Objectives still awaiting disable
    pub fn active_objectives(&self) -> usize {
        self.objectives.iter().filter(|o| o.active).count()
    }
}
