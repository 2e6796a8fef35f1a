//! Rejection-sampled enemy placement
//!
//! Candidates are drawn uniformly from the map interior and rejected while
//! they land on a wall or inside the exclusion radius around the player.
//! The loop is bounded: exhausting the budget is an error, not a hang.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::map::GridMap;
use super::state::{Enemy, GameState, SpawnError};
use crate::consts::*;

/// Sample one valid spawn position, or fail after the retry budget.
pub fn sample_spawn_point(
    map: &GridMap,
    rng: &mut Pcg32,
    avoid: Vec2,
    exclusion: f32,
) -> Result<Vec2, SpawnError> {
    let max_x = map.width() as f32 - SPAWN_MARGIN;
    let max_y = map.height() as f32 - SPAWN_MARGIN;
    // A map narrower than twice the margin has no interior to sample.
    if max_x <= SPAWN_MARGIN || max_y <= SPAWN_MARGIN {
        return Err(SpawnError::Exhausted { attempts: 0 });
    }

    for _ in 0..SPAWN_RETRY_BUDGET {
        let x = rng.random_range(SPAWN_MARGIN..max_x);
        let y = rng.random_range(SPAWN_MARGIN..max_y);
        if map.is_wall(x, y) {
            continue;
        }
        let pos = Vec2::new(x, y);
        if pos.distance(avoid) < exclusion {
            continue;
        }
        return Ok(pos);
    }
    Err(SpawnError::Exhausted {
        attempts: SPAWN_RETRY_BUDGET,
    })
}

/// Spawn one enemy with stats from the active tier.
pub fn spawn_enemy(state: &mut GameState, exclusion: f32) -> Result<(), SpawnError> {
    let pos = sample_spawn_point(&state.map, &mut state.rng, state.player.pos, exclusion)?;
    let tier = state.difficulty.params();
    let id = state.next_enemy_id();
    state.enemies.push(Enemy::from_tier(id, pos, &tier));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::map::Tile;
    use rand::SeedableRng;

    #[test]
    fn samples_respect_exclusion_and_walls() {
        let map = GridMap::empty_with_border(100, 100);
        let mut rng = Pcg32::seed_from_u64(9);
        let avoid = Vec2::new(50.0, 50.0);
        for _ in 0..64 {
            let pos = sample_spawn_point(&map, &mut rng, avoid, 30.0).unwrap();
            assert!(pos.distance(avoid) >= 30.0);
            assert!(!map.is_wall(pos.x, pos.y));
            assert!(pos.x >= SPAWN_MARGIN && pos.x < 100.0 - SPAWN_MARGIN);
            assert!(pos.y >= SPAWN_MARGIN && pos.y < 100.0 - SPAWN_MARGIN);
        }
    }

    #[test]
    fn exhaustion_is_bounded() {
        let solid = GridMap::from_cells(50, 50, vec![Tile::Wall; 50 * 50]);
        let mut rng = Pcg32::seed_from_u64(1);
        let err = sample_spawn_point(&solid, &mut rng, Vec2::ZERO, 0.0).unwrap_err();
        assert_eq!(
            err,
            SpawnError::Exhausted {
                attempts: SPAWN_RETRY_BUDGET
            }
        );
    }

    #[test]
    fn map_smaller_than_the_margin_is_exhausted_immediately() {
        let tiny = GridMap::empty_with_border(20, 20);
        let mut rng = Pcg32::seed_from_u64(2);
        let err = sample_spawn_point(&tiny, &mut rng, Vec2::ZERO, 0.0).unwrap_err();
        assert_eq!(err, SpawnError::Exhausted { attempts: 0 });
    }

    #[test]
    fn spawned_enemy_uses_tier_stats() {
        let mut state = GameState::with_map(4, GridMap::empty_with_border(200, 200));
        state.difficulty = crate::sim::Difficulty::Hard;
        spawn_enemy(&mut state, RESPAWN_EXCLUSION).unwrap();
        let enemy = &state.enemies[0];
        assert_eq!(enemy.health, 40);
        assert_eq!(enemy.attack_damage, 15);
        assert_eq!(enemy.id, 1);
    }
}
