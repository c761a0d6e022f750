//! Per-frame simulation tick
//!
//! Invoked once per rendered frame while the game is running and unpaused.
//! Fixed update order: input movement, auto-fire timer, fragment pass, enemy
//! pass, bullet pass, fragment top-up, enemy spawn timer. Any early return
//! (level-up, win, loss) leaves live arrays and pools consistent.

use std::cmp::Ordering;

use glam::Vec2;

use super::collision::{self, PassOutcome};
use super::spawn;
use super::state::{GamePhase, GameState};
use super::upgrade;
use crate::consts::*;

/// Held-key state for a single tick, already merged across equivalent
/// bindings (arrows/WASD) by the input collaborator.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Demo autopilot: chase fragments, veer away from close enemies
    pub idle_mode: bool,
}

/// Advance the simulation by one tick.
///
/// `timestamp_ms` is the host's frame timestamp, used only for the fps
/// diagnostic. Exits immediately with no side effects unless the phase is
/// `Running` - a stale scheduled frame after a pause or a terminal state is
/// harmless.
pub fn tick(state: &mut GameState, input: &TickInput, timestamp_ms: f64) {
    if state.phase != GamePhase::Running {
        return;
    }

    // Diagnostic frame rate from the timestamp delta
    if state.last_frame_ms > 0.0 {
        let delta = timestamp_ms - state.last_frame_ms;
        if delta > 0.0 {
            state.fps = (1000.0 / delta).round() as u32;
        }
    }
    state.last_frame_ms = timestamp_ms;
    state.time_ticks += 1;

    let input = if input.idle_mode {
        idle_input(state)
    } else {
        input.clone()
    };

    // Held-direction movement, clamped to the playfield
    let speed = state.player.speed;
    let mut pos = state.player.pos;
    if input.up {
        pos.y -= speed;
    }
    if input.down {
        pos.y += speed;
    }
    if input.left {
        pos.x -= speed;
    }
    if input.right {
        pos.x += speed;
    }
    pos.x = pos.x.clamp(0.0, FIELD_WIDTH - PLAYER_SIZE);
    pos.y = pos.y.clamp(0.0, FIELD_HEIGHT - PLAYER_SIZE);
    state.player.pos = pos;

    // Auto-fire; the timer resets even when the shot is gated away
    state.fire_timer += 1;
    if state.fire_timer > state.fire_interval {
        spawn::try_fire_bullet(state);
        state.fire_timer = 0;
    }

    match collision::collect_fragments(state) {
        PassOutcome::Win => {
            state.phase = GamePhase::Won;
            log::info!("run won: score={} level={}", state.score, state.level);
            return;
        }
        PassOutcome::LevelUp => {
            enter_level_up(state);
            return;
        }
        _ => {}
    }

    if collision::advance_enemies(state) == PassOutcome::Loss {
        state.phase = GamePhase::Lost;
        log::info!("run lost: score={} level={}", state.score, state.level);
        return;
    }

    collision::advance_bullets(state);

    spawn::top_up_fragments(state);

    state.enemy_spawn_timer += 1;
    if state.enemy_spawn_timer > state.enemy_spawn_interval
        && state.enemies.len() < ENEMY_BASE_CAP + state.level as usize
    {
        spawn::spawn_enemy(state);
        state.enemy_spawn_timer = 0;
    }
}

/// Pause for card selection on a 10-fragment milestone.
fn enter_level_up(state: &mut GameState) {
    state.level += 1;
    state.cards = upgrade::generate_cards(&mut state.rng);
    state.phase = GamePhase::LevelUpChoice;
    log::info!("level up: score={} level={}", state.score, state.level);
}

/// Autopilot for headless demo runs: steer toward the nearest fragment and
/// add a repulsion term for each enemy inside close range.
fn idle_input(state: &GameState) -> TickInput {
    let center = state.player.center();
    let mut steer = Vec2::ZERO;

    let nearest_fragment = state.fragments.iter().min_by(|a, b| {
        let da = a.center().distance_squared(center);
        let db = b.center().distance_squared(center);
        da.partial_cmp(&db).unwrap_or(Ordering::Equal)
    });
    if let Some(fragment) = nearest_fragment {
        steer += (fragment.center() - center).normalize_or_zero();
    }

    for enemy in &state.enemies {
        let away = center - enemy.center();
        let distance = away.length();
        if distance > 0.0 && distance < 140.0 {
            steer += away / distance * ((140.0 - distance) / 70.0);
        }
    }

    TickInput {
        up: steer.y < -0.2,
        down: steer.y > 0.2,
        left: steer.x < -0.2,
        right: steer.x > 0.2,
        idle_mode: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_fragment_on_player(state: &mut GameState) {
        let mut fragment = state.fragment_pool.acquire();
        fragment.pos = state.player.center() - Vec2::splat(FRAGMENT_RADIUS);
        state.fragments.push(fragment);
    }

    #[test]
    fn test_tenth_fragment_triggers_level_up_pause() {
        let mut state = GameState::new(3);
        state.score = 9;
        place_fragment_on_player(&mut state);

        tick(&mut state, &TickInput::default(), 16.0);

        assert_eq!(state.score, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::LevelUpChoice);
        assert_eq!(state.cards.len(), 3);
        for i in 0..state.cards.len() {
            for j in i + 1..state.cards.len() {
                assert_ne!(state.cards[i].upgrade, state.cards[j].upgrade);
                assert_ne!(state.cards[i].downgrade, state.cards[j].downgrade);
            }
        }

        // Paused: further ticks are side-effect free
        let frozen = state.clone();
        tick(&mut state, &TickInput::default(), 32.0);
        assert_eq!(frozen, state);
    }

    #[test]
    fn test_choose_card_resumes_ticking() {
        let mut state = GameState::new(3);
        state.score = 9;
        place_fragment_on_player(&mut state);
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.phase, GamePhase::LevelUpChoice);

        state.choose_card(1);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.cards.is_empty());

        let ticks_before = state.time_ticks;
        tick(&mut state, &TickInput::default(), 32.0);
        assert_eq!(state.time_ticks, ticks_before + 1);
    }

    #[test]
    fn test_hundredth_fragment_wins_over_level_up() {
        let mut state = GameState::new(3);
        state.score = 99;
        place_fragment_on_player(&mut state);

        tick(&mut state, &TickInput::default(), 16.0);

        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.score, 100);
        assert!(state.cards.is_empty());
    }

    #[test]
    fn test_gated_shot_leaves_energy_untouched() {
        let mut state = GameState::new(3);
        state.player.energy = 10.0;
        // A target exists, far enough away to stay harmless this tick
        let mut enemy = state.enemy_pool.acquire();
        enemy.pos = Vec2::new(0.0, 0.0);
        state.enemies.push(enemy);
        // Timer one short of the threshold so this tick elapses it
        state.fire_timer = state.fire_interval;

        tick(&mut state, &TickInput::default(), 16.0);

        assert!(state.bullets.is_empty());
        assert_eq!(state.player.energy, 10.0);
        assert_eq!(state.fire_timer, 0);
    }

    #[test]
    fn test_enemy_contact_loses_the_run() {
        let mut state = GameState::new(3);
        let mut enemy = state.enemy_pool.acquire();
        enemy.pos = state.player.pos + Vec2::new(10.0, 2.0);
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.phase, GamePhase::Lost);

        // Terminal: further ticks are side-effect free
        let frozen = state.clone();
        tick(&mut state, &TickInput::default(), 32.0);
        assert_eq!(frozen, state);
    }

    #[test]
    fn test_movement_clamps_to_playfield() {
        let mut state = GameState::new(3);
        state.player.pos = Vec2::new(2.0, 2.0);
        let input = TickInput {
            up: true,
            left: true,
            ..TickInput::default()
        };
        tick(&mut state, &input, 16.0);
        assert_eq!(state.player.pos, Vec2::ZERO);

        state.player.pos = Vec2::new(FIELD_WIDTH - PLAYER_SIZE - 2.0, FIELD_HEIGHT - PLAYER_SIZE - 2.0);
        let input = TickInput {
            down: true,
            right: true,
            ..TickInput::default()
        };
        tick(&mut state, &input, 32.0);
        assert_eq!(
            state.player.pos,
            Vec2::new(FIELD_WIDTH - PLAYER_SIZE, FIELD_HEIGHT - PLAYER_SIZE)
        );
    }

    #[test]
    fn test_first_tick_tops_up_fragments() {
        let mut state = GameState::new(3);
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.fragments.len(), 3);
    }

    #[test]
    fn test_enemy_spawns_respect_live_cap() {
        let mut state = GameState::new(3);
        // Fill to the level-1 cap of six, parked far from the player
        for k in 0..6 {
            let mut enemy = state.enemy_pool.acquire();
            enemy.pos = Vec2::new(40.0 * k as f32, 0.0);
            enemy.speed = 0.0;
            state.enemies.push(enemy);
        }
        state.enemy_spawn_timer = state.enemy_spawn_interval + 1;

        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.enemies.len(), 6);
        // Timer keeps running while capped, so a slot frees up fast
        assert!(state.enemy_spawn_timer > state.enemy_spawn_interval);
    }

    #[test]
    fn test_long_idle_run_preserves_invariants() {
        let mut state = GameState::new(0xD1F7);
        let input = TickInput {
            idle_mode: true,
            ..TickInput::default()
        };
        let mut now = 0.0;
        for _ in 0..20_000 {
            now += 16.0;
            tick(&mut state, &input, now);
            assert!(state.player.energy >= 0.0 && state.player.energy <= ENERGY_MAX);
            assert_eq!(
                state.fragments.len() + state.fragment_pool.free_count(),
                state.fragment_pool.constructed_count()
            );
            assert_eq!(
                state.enemies.len() + state.enemy_pool.free_count(),
                state.enemy_pool.constructed_count()
            );
            assert_eq!(
                state.bullets.len() + state.bullet_pool.free_count(),
                state.bullet_pool.constructed_count()
            );
            if state.phase == GamePhase::LevelUpChoice {
                state.choose_card(0);
            }
            if state.is_over() {
                break;
            }
        }
    }
}
