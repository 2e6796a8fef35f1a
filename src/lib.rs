//! Gloomcast - a grid-based first-person raycasting shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (map, actors, combat, game state)
//! - `raycast`: Per-column ray marching and screen-space projection
//! - `runner`: Abstract frame loop seam (scheduler, input, presentation)

pub mod raycast;
pub mod runner;
pub mod sim;

pub use sim::{Difficulty, GamePhase, GameState, GridMap, SpawnError, Tile, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per display refresh)
    pub const TICK_HZ: u64 = 60;
    /// Wall-clock milliseconds covered by one tick
    pub const MS_PER_TICK: f64 = 1000.0 / TICK_HZ as f64;

    /// Map dimensions in cells
    pub const MAP_WIDTH: usize = 300;
    pub const MAP_HEIGHT: usize = 300;

    /// Player spawn point
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 50.0;
    /// Half-extent of the guaranteed-open region carved around the spawn
    pub const START_CARVE_HALF: usize = 2;

    pub const START_HEALTH: i32 = 100;
    pub const START_ARMOR: i32 = 25;

    /// Movement
    pub const MOVE_SPEED: f32 = 0.8;
    pub const TURN_STEP: f32 = 0.08;
    pub const MOUSE_LOOK_FACTOR: f32 = 0.005;
    /// Lateral probe offset approximating the player's body radius
    pub const PLAYER_PROBE: f32 = 2.0;

    /// Enemy AI ranges (world units)
    pub const ENEMY_CONTACT_RANGE: f32 = 2.0;
    pub const ENEMY_ATTACK_RANGE: f32 = 5.0;
    pub const ATTACK_COOLDOWN_TICKS: i32 = 30;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 2.0;
    pub const PROJECTILE_LIFE: u32 = 200;
    pub const PROJECTILE_HIT_RADIUS: f32 = 2.0;
    /// Shotgun heading offsets relative to the player heading
    pub const SHOTGUN_SPREAD: [f32; 5] = [-0.3, -0.15, 0.0, 0.15, 0.3];

    /// Raycaster
    pub const FOV: f32 = std::f32::consts::FRAC_PI_3;
    pub const RAY_STEP: f32 = 0.1;
    pub const RAY_MAX_STEPS: u32 = 1000;
    /// Radius around an enemy that counts as a ray hit
    pub const RAY_ENEMY_RADIUS: f32 = 1.5;
    /// Distance used for shading when a ray exhausts its range
    pub const RAY_FALLBACK_DISTANCE: f32 = 100.0;
    pub const MIN_COLUMN_HEIGHT: f32 = 5.0;
    pub const MIN_BRIGHTNESS: f32 = 50.0;

    /// Spawning
    pub const SPAWN_MARGIN: f32 = 20.0;
    pub const INITIAL_SPAWN_EXCLUSION: f32 = 40.0;
    pub const RESPAWN_EXCLUSION: f32 = 30.0;
    pub const SPAWN_RETRY_BUDGET: u32 = 1000;
    /// Respawn roll only happens below this live-enemy count
    pub const RESPAWN_MIN_ENEMIES: usize = 3;
    pub const RESPAWN_CHANCE: f64 = 0.02;
}
