//! End-to-end game flow: start, attrition, game over report.

use glam::Vec2;
use gloomcast::consts::*;
use gloomcast::sim::{Difficulty, Enemy, GamePhase, GameState, TickInput, tick};

#[test]
fn normal_start_spawns_five_enemies_clear_of_the_player() {
    let mut state = GameState::new(42);
    state.start(Difficulty::Normal).unwrap();

    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.enemies.len(), 5);
    for enemy in &state.enemies {
        assert!(
            enemy.pos.distance(state.player.pos) >= INITIAL_SPAWN_EXCLUSION,
            "enemy {} spawned at {:?}, too close to {:?}",
            enemy.id,
            enemy.pos,
            state.player.pos
        );
        assert!(!state.map.is_wall(enemy.pos.x, enemy.pos.y));
    }
}

#[test]
fn enemy_attrition_drives_the_game_to_game_over() {
    let mut state = GameState::new(101);
    state.start(Difficulty::Normal).unwrap();

    // Replace the spawned population with one enemy already in the player's
    // face; the player never fights back.
    let tier = Difficulty::Normal.params();
    state.enemies.clear();
    state
        .enemies
        .push(Enemy::from_tier(99, state.player.pos + Vec2::new(3.0, 0.0), &tier));

    let idle = TickInput::default();
    let mut ticks = 0u64;
    while state.phase == GamePhase::Running {
        tick(&mut state, &idle);
        ticks += 1;
        assert!(ticks < 5000, "attrition should kill an idle player quickly");
    }

    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.player.health <= 0);
    let summary = state.summary();
    assert_eq!(summary.kills, 0);
    assert_eq!(summary.elapsed_seconds, state.time_ticks / TICK_HZ);
    assert_eq!(state.time_ticks, ticks);

    // Death halts the simulation: nothing advances afterwards.
    tick(&mut state, &idle);
    assert_eq!(state.time_ticks, ticks);
}

#[test]
fn restart_after_game_over_resets_the_run() {
    let mut state = GameState::new(7);
    state.start(Difficulty::Hard).unwrap();
    state.player.health = -1;
    tick(&mut state, &TickInput::default());
    assert_eq!(state.phase, GamePhase::GameOver);

    state.start(Difficulty::Easy).unwrap();
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.player.health, START_HEALTH);
    assert_eq!(state.enemies.len(), 3);
    assert_eq!(state.time_ticks, 0);
}
