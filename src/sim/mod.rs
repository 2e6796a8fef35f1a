//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Single-threaded: one tick completes before the next begins
//! - No rendering or platform dependencies

pub mod map;
pub mod spawn;
pub mod state;
pub mod tick;

pub use map::{GridMap, Tile};
pub use spawn::{sample_spawn_point, spawn_enemy};
pub use state::{
    Difficulty, Enemy, GamePhase, GameState, GameSummary, Player, Projectile, SpawnError,
    TierParams, WEAPONS, WeaponSpec,
};
pub use tick::{TickInput, tick};
