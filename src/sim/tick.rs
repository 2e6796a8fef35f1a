//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Tick order:
//! input (turn, move, weapon, fire) -> enemy AI -> projectiles -> lose check
//! -> respawn roll.

use glam::Vec2;
use rand::Rng;

use super::spawn;
use super::state::{GamePhase, GameState, Player, Projectile, WEAPONS};
use crate::consts::*;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone)]
pub struct TickInput {
    pub move_forward: bool,
    pub move_back: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Horizontal mouse delta since the last tick, in pixels
    pub mouse_look_dx: f32,
    pub sensitivity: f32,
    pub fire_held: bool,
    /// Weapon slot selection, 0..=3
    pub weapon_select: Option<usize>,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            move_forward: false,
            move_back: false,
            turn_left: false,
            turn_right: false,
            mouse_look_dx: 0.0,
            sensitivity: 1.0,
            fire_held: false,
            weapon_select: None,
        }
    }
}

/// Advance the game by one tick. No-op unless the game is Running.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    apply_input(state, input);
    update_enemies(state);

    // Drop expired projectiles, then advance survivors
    state.projectiles.retain(|p| p.life > 0);
    update_projectiles(state);

    if state.player.health <= 0 {
        state.phase = GamePhase::GameOver;
        let summary = state.summary();
        log::info!(
            "game over: {} kills in {}s",
            summary.kills,
            summary.elapsed_seconds
        );
        return;
    }

    maybe_respawn(state);
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;

    if input.turn_left {
        player.heading -= TURN_STEP;
    }
    if input.turn_right {
        player.heading += TURN_STEP;
    }
    // Heading is deliberately unbounded; trig downstream is total anyway.
    player.heading += input.mouse_look_dx * MOUSE_LOOK_FACTOR * input.sensitivity;

    // Selection is unconditional: an empty weapon can still be raised.
    if let Some(slot) = input.weapon_select {
        if slot < WEAPONS.len() {
            player.weapon_index = slot;
        }
    }

    if input.move_forward {
        try_move(&state.map, player, 1.0);
    }
    if input.move_back {
        try_move(&state.map, player, -1.0);
    }

    if input.fire_held {
        fire_weapon(state);
    }
}

/// Move the player along its heading if the destination and both lateral
/// probe points are open. Rejected moves leave the position untouched; there
/// is no partial slide.
fn try_move(map: &super::map::GridMap, player: &mut Player, sign: f32) {
    let delta = Vec2::new(player.heading.cos(), player.heading.sin()) * MOVE_SPEED * sign;
    let dest = player.pos + delta;
    if !map.is_wall(dest.x, dest.y)
        && !map.is_wall(dest.x + PLAYER_PROBE, dest.y)
        && !map.is_wall(dest.x - PLAYER_PROBE, dest.y)
    {
        player.pos = dest;
    }
}

/// Fire the active weapon, gated by its fire interval and remaining ammo.
fn fire_weapon(state: &mut GameState) {
    let slot = state.player.weapon_index;
    let weapon = &WEAPONS[slot];

    let now = state.now_ms();
    if now - state.last_fire_ms < weapon.fire_interval_ms || state.ammo[slot] == 0 {
        return;
    }
    state.last_fire_ms = now;
    state.ammo[slot] -= 1;

    let origin = state.player.pos;
    let heading = state.player.heading;
    if slot == 1 {
        // Shotgun: fixed five-way fan
        for offset in SHOTGUN_SPREAD {
            state
                .projectiles
                .push(Projectile::new(origin, heading + offset, weapon.damage));
        }
    } else {
        state
            .projectiles
            .push(Projectile::new(origin, heading, weapon.damage));
    }
}

/// Per-enemy state machine: pursue inside vision range, attack inside attack
/// range once the cooldown expires. Move and attack gates both read the same
/// distance, computed once per tick.
fn update_enemies(state: &mut GameState) {
    let player_pos = state.player.pos;
    let mut damage = 0;

    for enemy in &mut state.enemies {
        let to_player = player_pos - enemy.pos;
        let dist = to_player.length();

        // Distances at contact range suppress movement to avoid jitter.
        if dist > ENEMY_CONTACT_RANGE && dist < enemy.vision_range {
            let dest = enemy.pos + to_player / dist * enemy.speed;
            // Single-point commit, no probe radius (enemies may clip corners)
            if !state.map.is_wall(dest.x, dest.y) {
                enemy.pos = dest;
            }
        }

        if enemy.attack_cooldown <= 0 && dist < ENEMY_ATTACK_RANGE {
            damage += enemy.attack_damage;
            enemy.attack_cooldown = ATTACK_COOLDOWN_TICKS;
        }

        enemy.attack_cooldown -= 1;
    }

    state.player.health -= damage;
}

/// Advance each projectile: walls stop it dead, the first enemy within the
/// hit radius takes the damage and the projectile expires (single-hit).
fn update_projectiles(state: &mut GameState) {
    let mut kills = 0;

    for projectile in &mut state.projectiles {
        let dir = Vec2::new(projectile.heading.cos(), projectile.heading.sin());
        projectile.pos += dir * projectile.speed;
        projectile.life = projectile.life.saturating_sub(1);

        if state.map.is_wall(projectile.pos.x, projectile.pos.y) {
            projectile.life = 0;
            continue;
        }

        let hit = state
            .enemies
            .iter()
            .position(|e| e.pos.distance(projectile.pos) < PROJECTILE_HIT_RADIUS);
        if let Some(idx) = hit {
            state.enemies[idx].health -= projectile.damage;
            if state.enemies[idx].health <= 0 {
                let dead = state.enemies[idx].id;
                state.enemies.retain(|e| e.id != dead);
                kills += 1;
            }
            projectile.life = 0;
        }
    }

    state.kills += kills;
}

/// Occasional reinforcement while the live population is low. Mid-game
/// exhaustion skips the spawn instead of aborting the run.
fn maybe_respawn(state: &mut GameState) {
    if state.enemies.len() >= RESPAWN_MIN_ENEMIES {
        return;
    }
    if state.rng.random::<f64>() >= RESPAWN_CHANCE {
        return;
    }
    if let Err(err) = spawn::spawn_enemy(state, RESPAWN_EXCLUSION) {
        log::warn!("respawn skipped: {err}");
    }
}
