//! Circle-circle collision tests and per-tick combat resolution
//!
//! The resolver runs in a fixed order every tick: fragments, then enemies,
//! then bullets. Each pass reports back to the tick via `PassOutcome` so a
//! milestone or a terminal state can abort the rest of the frame with all
//! live arrays and pools still consistent.

use glam::Vec2;

use super::state::{Enemy, GameState};
use crate::consts::*;

/// What a resolver pass asks the tick to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Continue,
    /// A 10-fragment milestone fired; pause for card selection
    LevelUp,
    Win,
    Loss,
}

/// Two circles collide iff the squared center distance is at most the
/// squared sum of radii. No square root; symmetric in its arguments.
#[inline]
pub fn circles_collide(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// Index of the live enemy nearest to `from` by Euclidean distance.
/// Ties break toward the earlier array slot.
pub fn nearest_enemy(enemies: &[Enemy], from: Vec2) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, enemy) in enemies.iter().enumerate() {
        let dist_sq = enemy.center().distance_squared(from);
        if best.is_none_or(|(_, b)| dist_sq < b) {
            best = Some((i, dist_sq));
        }
    }
    best.map(|(i, _)| i)
}

/// Whether a point lies more than `margin` units outside any field boundary.
#[inline]
pub fn beyond_field(pos: Vec2, margin: f32) -> bool {
    pos.x < -margin || pos.x > FIELD_WIDTH + margin || pos.y < -margin || pos.y > FIELD_HEIGHT + margin
}

/// Pass 1: player vs fragments.
///
/// Collected fragments are released back to the pool, score +1, energy +10
/// (+15 with the fragment-value modifier). Every positive multiple of 10
/// aborts the tick: a win at 100, a level-up pause otherwise.
pub fn collect_fragments(state: &mut GameState) -> PassOutcome {
    let center = state.player.center();
    let mut i = 0;
    while i < state.fragments.len() {
        if circles_collide(
            center,
            PLAYER_RADIUS,
            state.fragments[i].center(),
            FRAGMENT_RADIUS,
        ) {
            let fragment = state.fragments.remove(i);
            state.fragment_pool.release(fragment);
            state.score += 1;
            let gain = if state.modifiers.fragment_value {
                FRAGMENT_ENERGY_BONUS
            } else {
                FRAGMENT_ENERGY
            };
            state.player.gain_energy(gain);

            if state.score % LEVEL_UP_INTERVAL == 0 {
                if state.score >= WIN_SCORE {
                    return PassOutcome::Win;
                }
                return PassOutcome::LevelUp;
            }
        } else {
            i += 1;
        }
    }
    PassOutcome::Continue
}

/// Pass 2: enemy movement and player contact.
///
/// Each enemy re-derives its velocity from the vector to the player every
/// tick (zero-distance guarded), then tests against the player circle; any
/// contact is an immediate loss. Enemies more than 50 units outside the
/// field are reclaimed.
pub fn advance_enemies(state: &mut GameState) -> PassOutcome {
    let player_center = state.player.center();
    let player_anchor = state.player.pos;
    let mut i = 0;
    while i < state.enemies.len() {
        let offset = player_anchor - state.enemies[i].pos;
        let distance = offset.length();
        if distance > 0.0 {
            let step = offset / distance * state.enemies[i].speed;
            state.enemies[i].pos += step;
        }

        if circles_collide(
            player_center,
            PLAYER_RADIUS,
            state.enemies[i].center(),
            ENEMY_RADIUS,
        ) {
            return PassOutcome::Loss;
        }

        if beyond_field(state.enemies[i].pos, ENEMY_DESPAWN_MARGIN) {
            let enemy = state.enemies.remove(i);
            state.enemy_pool.release(enemy);
        } else {
            i += 1;
        }
    }
    PassOutcome::Continue
}

/// Pass 3: bullet movement, hits and expiry.
///
/// The first enemy in scan order colliding with a bullet is killed (+5
/// energy with the energy-on-kill modifier). Bullets are reclaimed on hit,
/// after 300 ticks alive, or more than 20 units outside the field.
pub fn advance_bullets(state: &mut GameState) {
    let mut i = 0;
    while i < state.bullets.len() {
        {
            let bullet = &mut state.bullets[i];
            bullet.pos += bullet.dir * bullet.speed;
            bullet.life += 1;
        }

        let mut hit = false;
        for j in 0..state.enemies.len() {
            if circles_collide(
                state.bullets[i].pos,
                BULLET_RADIUS,
                state.enemies[j].center(),
                ENEMY_RADIUS,
            ) {
                let enemy = state.enemies.remove(j);
                state.enemy_pool.release(enemy);
                if state.modifiers.energy_on_kill {
                    state.player.gain_energy(KILL_ENERGY);
                }
                hit = true;
                break;
            }
        }

        let expired = hit
            || state.bullets[i].life > BULLET_MAX_LIFE
            || beyond_field(state.bullets[i].pos, BULLET_DESPAWN_MARGIN);
        if expired {
            let bullet = state.bullets.remove(i);
            state.bullet_pool.release(bullet);
        } else {
            i += 1;
        }
    }
}
