//! Per-column raycaster and screen-space projection
//!
//! One ray per screen column, marched in fixed steps across the occupancy
//! grid. A wall sample terminates the scan; enemy proximity along the way
//! records a candidate hit that survives only if it is strictly nearer than
//! the wall. Output is a pure depth/hit buffer; drawing is the consumer's
//! problem.

use glam::Vec2;

use crate::consts::*;
use crate::sim::map::GridMap;
use crate::sim::state::{Enemy, GameState, WEAPONS};

/// Two-value wall palette, picked per column on a wall hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallShade {
    /// Brighter variant (~30% of columns)
    Lit,
    Dim,
}

/// Depth and hit classification for one screen column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayColumn {
    /// Distance to the hit, or infinity if the ray exhausted its range
    pub distance: f32,
    /// Id of the enemy struck, if an enemy won the column
    pub hit_enemy: Option<u32>,
    pub shade: WallShade,
}

/// Active weapon readout for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponStatus {
    pub name: &'static str,
    pub icon: &'static str,
    pub ammo: u32,
}

/// Top-down projection inputs for the minimap overlay
#[derive(Debug, Clone)]
pub struct MinimapData<'a> {
    pub occupancy: &'a GridMap,
    pub player_pos: Vec2,
    pub player_heading: f32,
    pub enemy_positions: Vec<Vec2>,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// One entry per screen column, left to right
    pub columns: Vec<RayColumn>,
    pub player_heading: f32,
    pub weapon: WeaponStatus,
    pub minimap: MinimapData<'a>,
}

/// March a single ray. `shade_seed` feeds the cosmetic palette pick so the
/// gameplay RNG stream is never touched from the render path.
pub fn cast_column(
    map: &GridMap,
    enemies: &[Enemy],
    origin: Vec2,
    angle: f32,
    shade_seed: u32,
) -> RayColumn {
    let dir = Vec2::new(angle.cos(), angle.sin());
    let mut distance = f32::INFINITY;
    let mut hit_enemy = None;
    let mut shade = WallShade::Dim;

    for step in 0..RAY_MAX_STEPS {
        let d = step as f32 * RAY_STEP;
        let sample = origin + dir * d;

        if map.is_wall(sample.x, sample.y) {
            // The wall terminates the scan, so it also wins exact ties
            // against an enemy candidate recorded at the same distance.
            if d <= distance {
                distance = d;
                hit_enemy = None;
                shade = pick_shade(shade_seed);
            }
            break;
        }

        for enemy in enemies {
            if enemy.pos.distance(sample) < RAY_ENEMY_RADIUS && d < distance {
                distance = d;
                hit_enemy = Some(enemy.id);
                break;
            }
        }
    }

    RayColumn {
        distance,
        hit_enemy,
        shade,
    }
}

/// Build the full frame for the presentation consumer.
pub fn render_frame(state: &GameState, column_count: usize) -> Frame<'_> {
    let origin = state.player.pos;
    let heading = state.player.heading;

    let mut columns = Vec::with_capacity(column_count);
    for col in 0..column_count {
        let angle = heading - FOV / 2.0 + (col as f32 / column_count as f32) * FOV;
        let seed = (state.time_ticks as u32)
            .wrapping_mul(2654435761)
            .wrapping_add(col as u32 * 7919);
        columns.push(cast_column(&state.map, &state.enemies, origin, angle, seed));
    }

    let weapon = &WEAPONS[state.player.weapon_index];
    Frame {
        columns,
        player_heading: heading,
        weapon: WeaponStatus {
            name: weapon.name,
            icon: weapon.icon,
            ammo: state.ammo[state.player.weapon_index],
        },
        minimap: MinimapData {
            occupancy: &state.map,
            player_pos: origin,
            player_heading: heading,
            enemy_positions: state.enemies.iter().map(|e| e.pos).collect(),
        },
    }
}

fn pick_shade(seed: u32) -> WallShade {
    if seed % 1000 < 300 {
        WallShade::Lit
    } else {
        WallShade::Dim
    }
}

/// Distance used for shading a column whose ray exhausted its range.
#[inline]
pub fn shading_distance(distance: f32) -> f32 {
    if distance.is_finite() {
        distance
    } else {
        RAY_FALLBACK_DISTANCE
    }
}

/// Projected wall-slice height for a column, clamped to a visible minimum.
#[inline]
pub fn column_height(distance: f32, viewport_height: f32) -> f32 {
    (viewport_height / (distance + 0.5)).max(MIN_COLUMN_HEIGHT)
}

/// Top edge of a slice, centering it vertically in the viewport.
#[inline]
pub fn column_top(height: f32, viewport_height: f32) -> f32 {
    (viewport_height - height) / 2.0
}

/// Depth-based color intensity, clamped to stay visible at range.
#[inline]
pub fn brightness(distance: f32) -> f32 {
    (255.0 - distance * 5.0).max(MIN_BRIGHTNESS)
}
