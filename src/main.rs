//! Fragment Drift entry point
//!
//! Headless demo runner: plays a full run with the autopilot and logs the
//! outcome. Useful for balance soaks and regression checks without a
//! renderer attached; a graphical host would drive `sim::tick` from its
//! frame callback instead.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use fragment_drift::sim::{GamePhase, GameState, TickInput, tick};

/// Synthetic frame spacing fed to the fps diagnostic (60 Hz)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Hard stop for a run that never reaches a terminal state
const MAX_TICKS: u64 = 1_000_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("starting demo run, seed={seed}");

    let mut state = GameState::new(seed);
    let input = TickInput {
        idle_mode: true,
        ..TickInput::default()
    };
    let mut now_ms = 0.0;

    for _ in 0..MAX_TICKS {
        now_ms += FRAME_MS;
        tick(&mut state, &input, now_ms);

        if state.phase == GamePhase::LevelUpChoice {
            for (i, card) in state.cards.iter().enumerate() {
                log::info!(
                    "card {}: {} / {}",
                    i + 1,
                    card.upgrade.description(),
                    card.downgrade.description()
                );
            }
            let count = state.cards.len();
            let pick = state.rng.random_range(0..count);
            log::info!("autopilot picks card {}", pick + 1);
            state.choose_card(pick);
        }

        if state.is_over() {
            break;
        }
    }

    match state.phase {
        GamePhase::Won => log::info!(
            "victory: score={} level={} ticks={}",
            state.score,
            state.level,
            state.time_ticks
        ),
        GamePhase::Lost => log::info!(
            "defeat: score={} level={} ticks={}",
            state.score,
            state.level,
            state.time_ticks
        ),
        _ => log::warn!(
            "run hit the tick cap: score={} level={}",
            state.score,
            state.level
        ),
    }

    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&state) {
            Ok(json) => log::debug!("final state: {json}"),
            Err(err) => log::warn!("state snapshot failed: {err}"),
        }
    }
}
