//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical tick per rendered frame
//! - Seeded RNG only
//! - Stable iteration order (live arrays, scan order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use collision::{PassOutcome, beyond_field, circles_collide, nearest_enemy};
pub use pool::Pool;
pub use state::{Bullet, Enemy, Fragment, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
pub use upgrade::{Card, DowngradeKind, Modifiers, UpgradeKind, generate_cards};
