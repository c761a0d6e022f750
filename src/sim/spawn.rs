//! Entity spawning rules
//!
//! Placement and direction randomness all flows through the seeded RNG on
//! `GameState`, so spawn sequences replay exactly for a given seed.

use glam::Vec2;
use rand::Rng;

use super::collision::nearest_enemy;
use super::state::GameState;
use super::upgrade::Modifiers;
use crate::consts::*;

/// Spawn a fragment at a uniform-random spot away from the player.
///
/// Rejection-sampled: a candidate inside the 100-unit exclusion box on both
/// axes at once is retried. Accepted positions always satisfy
/// `|x - playerX| >= 100 || |y - playerY| >= 100`.
pub fn spawn_fragment(state: &mut GameState) {
    let mut fragment = state.fragment_pool.acquire();
    loop {
        let x = state.rng.random_range(0.0..FIELD_WIDTH - FRAGMENT_SPAWN_INSET);
        let y = state.rng.random_range(0.0..FIELD_HEIGHT - FRAGMENT_SPAWN_INSET);
        let too_close = (x - state.player.pos.x).abs() < SPAWN_EXCLUSION
            && (y - state.player.pos.y).abs() < SPAWN_EXCLUSION;
        if !too_close {
            fragment.pos = Vec2::new(x, y);
            break;
        }
    }
    state.fragments.push(fragment);
}

/// Spawn an enemy just outside one of the four screen edges, picked with
/// equal probability, at a uniform coordinate along that edge.
///
/// The enemy snapshots the current base speed; later enemy-speed downgrades
/// only affect future spawns.
pub fn spawn_enemy(state: &mut GameState) {
    let mut enemy = state.enemy_pool.acquire();
    let side = state.rng.random_range(0..4u8);
    enemy.pos = match side {
        // Up
        0 => Vec2::new(state.rng.random_range(0.0..FIELD_WIDTH), -ENEMY_SPAWN_OFFSET),
        // Right
        1 => Vec2::new(
            FIELD_WIDTH + ENEMY_SPAWN_OFFSET,
            state.rng.random_range(0.0..FIELD_HEIGHT),
        ),
        // Down
        2 => Vec2::new(
            state.rng.random_range(0.0..FIELD_WIDTH),
            FIELD_HEIGHT + ENEMY_SPAWN_OFFSET,
        ),
        // Left
        _ => Vec2::new(-ENEMY_SPAWN_OFFSET, state.rng.random_range(0.0..FIELD_HEIGHT)),
    };
    enemy.speed = state.enemy_speed;
    state.enemies.push(enemy);
}

/// Fire a bullet at the nearest live enemy.
///
/// Policy guards, all silent no-ops with no energy cost: energy below the
/// 15-point cost, no live enemy to aim at, or a target sitting exactly on
/// the player center (which would make the direction degenerate). On
/// success the bullet leaves the player center with a unit direction fixed
/// for its whole flight, and energy drops by 15. The fire timer is the
/// caller's concern and resets either way.
pub fn try_fire_bullet(state: &mut GameState) {
    if state.player.energy < BULLET_ENERGY_COST {
        return;
    }
    let origin = state.player.center();
    let Some(target) = nearest_enemy(&state.enemies, origin) else {
        return;
    };
    let offset = state.enemies[target].center() - origin;
    let distance = offset.length();
    if distance == 0.0 {
        return;
    }

    let mut bullet = state.bullet_pool.acquire();
    bullet.pos = origin;
    bullet.dir = offset / distance;
    bullet.speed = state.bullet_speed;
    bullet.life = 0;
    state.bullets.push(bullet);
    state.player.energy -= BULLET_ENERGY_COST;
}

/// Minimum live-fragment target: `min(3 + level/2, 10)`, reduced by 2 with
/// a floor of 1 when the less-fragment modifier is active.
pub fn min_fragment_target(level: u32, modifiers: &Modifiers) -> usize {
    let mut target = (3 + level / 2).min(MIN_FRAGMENT_CAP);
    if modifiers.less_fragment {
        target = target.saturating_sub(2).max(1);
    }
    target as usize
}

/// Top the fragment population up to the current minimum target.
pub fn top_up_fragments(state: &mut GameState) {
    let target = min_fragment_target(state.level, &state.modifiers);
    while state.fragments.len() < target {
        spawn_fragment(state);
    }
}
