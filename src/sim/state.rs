//! Game state and core simulation types
//!
//! Everything needed to reproduce a run from a seed lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::map::GridMap;
use super::spawn;
use crate::consts::*;

/// Current phase of the driver state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Constructed but no game started yet
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Player health reached zero
    GameOver,
}

/// Difficulty tier selected at game start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }

    /// Unknown strings yield `None`; callers fall back to Normal.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// The tier parameter table. Consulted once when an enemy spawns; the
    /// stats stay fixed for that enemy's lifetime.
    pub fn params(self) -> TierParams {
        match self {
            Difficulty::Easy => TierParams {
                enemy_health: 15,
                enemy_speed: 0.2,
                vision_range: 40.0,
                attack_damage: 5,
                initial_enemies: 3,
            },
            Difficulty::Normal => TierParams {
                enemy_health: 25,
                enemy_speed: 0.35,
                vision_range: 60.0,
                attack_damage: 10,
                initial_enemies: 5,
            },
            Difficulty::Hard => TierParams {
                enemy_health: 40,
                enemy_speed: 0.5,
                vision_range: 80.0,
                attack_damage: 15,
                initial_enemies: 8,
            },
        }
    }
}

/// Per-tier enemy stats and initial population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    pub enemy_health: i32,
    pub enemy_speed: f32,
    pub vision_range: f32,
    pub attack_damage: i32,
    pub initial_enemies: usize,
}

/// Static weapon catalog entry. Runtime ammo lives in [`GameState::ammo`],
/// indexed by the same slot.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub name: &'static str,
    pub max_ammo: u32,
    pub damage: i32,
    /// Minimum wall-clock gap between shots
    pub fire_interval_ms: f64,
    pub icon: &'static str,
}

/// The four weapon slots. Selection is an index into this table.
pub const WEAPONS: [WeaponSpec; 4] = [
    WeaponSpec {
        name: "PISTOL",
        max_ammo: 999,
        damage: 10,
        fire_interval_ms: 5.0,
        icon: "🔫",
    },
    WeaponSpec {
        name: "SHOTGUN",
        max_ammo: 50,
        damage: 30,
        fire_interval_ms: 15.0,
        icon: "🔫🔫",
    },
    WeaponSpec {
        name: "ROCKET",
        max_ammo: 20,
        damage: 100,
        fire_interval_ms: 20.0,
        icon: "💣",
    },
    WeaponSpec {
        name: "BFG",
        max_ammo: 40,
        damage: 150,
        fire_interval_ms: 30.0,
        icon: "🧨",
    },
];

fn full_ammo() -> [u32; 4] {
    std::array::from_fn(|i| WEAPONS[i].max_ammo)
}

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Radians, unbounded. Never wrapped to a canonical range.
    pub heading: f32,
    pub health: i32,
    pub armor: i32,
    /// Index into [`WEAPONS`]
    pub weapon_index: usize,
}

impl Player {
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            heading: 0.0,
            health: START_HEALTH,
            armor: START_ARMOR,
            weapon_index: 0,
        }
    }
}

/// An enemy actor. Stats derive from the difficulty tier at spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub health: i32,
    pub speed: f32,
    pub vision_range: f32,
    pub attack_damage: i32,
    /// Decrements every tick and may go negative; only `<= 0` matters
    pub attack_cooldown: i32,
}

impl Enemy {
    pub fn from_tier(id: u32, pos: Vec2, tier: &TierParams) -> Self {
        Self {
            id,
            pos,
            health: tier.enemy_health,
            speed: tier.enemy_speed,
            vision_range: tier.vision_range,
            attack_damage: tier.attack_damage,
            attack_cooldown: 0,
        }
    }
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    pub damage: i32,
    /// Remaining ticks; zero means expired
    pub life: u32,
}

impl Projectile {
    pub fn new(pos: Vec2, heading: f32, damage: i32) -> Self {
        Self {
            pos,
            heading,
            speed: PROJECTILE_SPEED,
            damage,
            life: PROJECTILE_LIFE,
        }
    }
}

/// Fatal initialization failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    /// Rejection sampling found no open cell within the retry budget
    #[error("no open spawn cell found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// End-of-game report for the lifecycle consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub kills: u32,
    /// Whole seconds, floored from the tick counter
    pub elapsed_seconds: u64,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG; all map/spawn randomness flows through here
    pub rng: Pcg32,
    /// Immutable after construction
    pub map: GridMap,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub player: Player,
    /// Live enemies; removal is by id, never by index during iteration
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Runtime ammo per weapon slot
    pub ammo: [u32; 4],
    pub kills: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Wall-clock timestamp of the last shot, derived from the tick counter
    pub last_fire_ms: f64,
    next_id: u32,
}

impl GameState {
    /// Create a fresh state with a generated map. No game is running until
    /// [`start`] is called.
    ///
    /// [`start`]: GameState::start
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let map = GridMap::generate(&mut rng);
        Self::with_map_and_rng(seed, map, rng)
    }

    /// Create a state over a handcrafted map. Test and scenario hook.
    pub fn with_map(seed: u64, map: GridMap) -> Self {
        Self::with_map_and_rng(seed, map, Pcg32::seed_from_u64(seed))
    }

    fn with_map_and_rng(seed: u64, map: GridMap, rng: Pcg32) -> Self {
        Self {
            seed,
            rng,
            map,
            phase: GamePhase::NotStarted,
            difficulty: Difficulty::default(),
            player: Player::spawn(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            ammo: full_ammo(),
            kills: 0,
            time_ticks: 0,
            last_fire_ms: f64::NEG_INFINITY,
            next_id: 1,
        }
    }

    /// Reset stats and spawn the initial enemy population, then enter
    /// Running. Spawn exhaustion aborts the start and leaves the previous
    /// phase untouched.
    pub fn start(&mut self, difficulty: Difficulty) -> Result<(), SpawnError> {
        self.difficulty = difficulty;
        self.player = Player::spawn();
        self.ammo = full_ammo();
        self.kills = 0;
        self.time_ticks = 0;
        self.last_fire_ms = f64::NEG_INFINITY;
        self.projectiles.clear();
        self.enemies.clear();

        let tier = difficulty.params();
        for _ in 0..tier.initial_enemies {
            if let Err(err) = spawn::spawn_enemy(self, INITIAL_SPAWN_EXCLUSION) {
                // No partial population may survive an aborted start.
                self.enemies.clear();
                return Err(err);
            }
        }

        self.phase = GamePhase::Running;
        log::info!(
            "new game: {} difficulty, {} enemies, seed {}",
            difficulty.as_str(),
            self.enemies.len(),
            self.seed
        );
        Ok(())
    }

    /// Allocate a new enemy ID
    pub fn next_enemy_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Wall-clock milliseconds elapsed in the current game
    pub fn now_ms(&self) -> f64 {
        self.time_ticks as f64 * MS_PER_TICK
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            kills: self.kills,
            elapsed_seconds: self.time_ticks / TICK_HZ,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table_matches_catalog() {
        let normal = Difficulty::Normal.params();
        assert_eq!(normal.enemy_health, 25);
        assert_eq!(normal.enemy_speed, 0.35);
        assert_eq!(normal.vision_range, 60.0);
        assert_eq!(normal.attack_damage, 10);
        assert_eq!(normal.initial_enemies, 5);

        assert_eq!(Difficulty::Easy.params().initial_enemies, 3);
        assert_eq!(Difficulty::Hard.params().initial_enemies, 8);
        assert_eq!(Difficulty::Hard.params().enemy_health, 40);
    }

    #[test]
    fn unknown_difficulty_falls_back_to_normal() {
        assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        let tier = Difficulty::from_str("nightmare").unwrap_or_default();
        assert_eq!(tier, Difficulty::Normal);
    }

    #[test]
    fn start_resets_stats_and_ammo() {
        let mut state = GameState::new(11);
        state.start(Difficulty::Normal).unwrap();
        state.player.health = 12;
        state.ammo[1] = 0;
        state.kills = 9;
        state.time_ticks = 777;

        state.start(Difficulty::Easy).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.health, START_HEALTH);
        assert_eq!(state.player.armor, START_ARMOR);
        assert_eq!(state.ammo[1], WEAPONS[1].max_ammo);
        assert_eq!(state.kills, 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.enemies.len(), 3);
    }

    #[test]
    fn initial_enemies_spawn_clear_of_player() {
        let mut state = GameState::new(5);
        state.start(Difficulty::Normal).unwrap();
        assert_eq!(state.enemies.len(), 5);
        for enemy in &state.enemies {
            assert!(enemy.pos.distance(state.player.pos) >= INITIAL_SPAWN_EXCLUSION);
            assert!(!state.map.is_wall(enemy.pos.x, enemy.pos.y));
            assert_eq!(enemy.health, 25);
        }
    }

    #[test]
    fn start_aborts_on_spawn_exhaustion() {
        use super::super::map::{GridMap, Tile};
        let solid = GridMap::from_cells(64, 64, vec![Tile::Wall; 64 * 64]);
        let mut state = GameState::with_map(1, solid);
        let err = state.start(Difficulty::Normal).unwrap_err();
        assert_eq!(
            err,
            SpawnError::Exhausted {
                attempts: SPAWN_RETRY_BUDGET
            }
        );
        assert_eq!(state.phase, GamePhase::NotStarted);
    }

    #[test]
    fn failed_restart_leaves_no_enemies_behind() {
        use super::super::map::{GridMap, Tile};
        let mut state = GameState::new(6);
        state.start(Difficulty::Normal).unwrap();
        assert_eq!(state.enemies.len(), 5);

        // Swap in a map no spawn can land on, then try to restart.
        state.map = GridMap::from_cells(64, 64, vec![Tile::Wall; 64 * 64]);
        assert!(state.start(Difficulty::Hard).is_err());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn summary_floors_elapsed_seconds() {
        let mut state = GameState::new(2);
        state.time_ticks = 119;
        assert_eq!(state.summary().elapsed_seconds, 1);
        state.time_ticks = 120;
        assert_eq!(state.summary().elapsed_seconds, 2);
    }
}
