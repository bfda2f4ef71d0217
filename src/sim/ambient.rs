//! Ambient simulation: wandering enemies and glitch intensity
//!
//! Purely atmospheric. Nothing here feeds back into puzzle correctness.

use glam::Vec2;
use rand::Rng;

use super::state::{EnemyEntity, EnemyKind};
use crate::catalog::LevelDescriptor;
use crate::consts::*;
use crate::tuning::Tuning;

/// Enemy kinds a level may spawn: two at first, one more every three levels
pub fn available_kinds(level_id: u8) -> &'static [EnemyKind] {
    let count = (usize::from(level_id / 3) + 2).min(EnemyKind::ALL.len());
    &EnemyKind::ALL[..count]
}

/// Fresh enemy set for a level, ids starting at `first_id`
pub fn spawn_enemies<R: Rng + ?Sized>(
    level: &LevelDescriptor,
    first_id: u32,
    rng: &mut R,
) -> Vec<EnemyEntity> {
    let kinds = available_kinds(level.id);
    (0..u32::from(level.enemy_count))
        .map(|i| EnemyEntity {
            id: first_id + i,
            kind: kinds[rng.random_range(0..kinds.len())],
            position: Vec2::new(
                rng.random_range(ENEMY_SPAWN_MIN..=ENEMY_SPAWN_MAX),
                rng.random_range(ENEMY_SPAWN_MIN..=ENEMY_SPAWN_MAX),
            ),
        })
        .collect()
}

/// Nudge every enemy by a random step; smaller steps while the player hides
pub fn move_enemies<R: Rng + ?Sized>(
    enemies: &mut [EnemyEntity],
    player_hidden: bool,
    tuning: &Tuning,
    rng: &mut R,
) {
    let span = if player_hidden {
        tuning.enemy_step_span_hidden
    } else {
        tuning.enemy_step_span
    };
    let lo = Vec2::splat(ENEMY_BOUND_MIN);
    let hi = Vec2::splat(ENEMY_BOUND_MAX);
    for enemy in enemies.iter_mut() {
        let step = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * span;
        enemy.position = (enemy.position + step).clamp(lo, hi);
    }
}

/// Glitch intensity a level opens with
pub fn glitch_baseline(level_id: u8) -> f32 {
    0.2 + f32::from(level_id.saturating_sub(1)) * 0.04
}

/// One ramp step of the glitch effect, scaled by how corrupt the level is
pub fn ramp_glitch(intensity: f32, corruption_rate: f32) -> f32 {
    (intensity + corruption_rate * 0.05).min(1.0)
}
