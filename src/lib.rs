//! Fragment Drift - a single-screen arcade survival game
//!
//! Core module:
//! - `sim`: deterministic simulation (pooling, spawning, collisions,
//!   difficulty/upgrade state machine)
//!
//! Rendering, screen transitions and raw input wiring are host concerns. The
//! host invokes `sim::tick` once per displayed frame, feeds it a merged
//! held-key mapping, and reads positions/score/energy back for drawing. When
//! the sim pauses for a card choice, the host resumes it via
//! `GameState::choose_card`.

pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical units, top-left origin)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults - 40x40 logical box, anchored top-left
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const PLAYER_START_SPEED: f32 = 6.0;

    /// Energy economy
    pub const ENERGY_MAX: f32 = 100.0;
    pub const BULLET_ENERGY_COST: f32 = 15.0;
    pub const FRAGMENT_ENERGY: f32 = 10.0;
    /// Per-fragment energy with the fragment-value modifier active
    pub const FRAGMENT_ENERGY_BONUS: f32 = 15.0;
    /// Per-kill energy with the energy-on-kill modifier active
    pub const KILL_ENERGY: f32 = 5.0;

    /// Fragment defaults
    pub const FRAGMENT_RADIUS: f32 = 12.5;
    /// Inset keeping random fragment placement on the field
    pub const FRAGMENT_SPAWN_INSET: f32 = 30.0;
    /// Half-width of the no-spawn box around the player (per axis)
    pub const SPAWN_EXCLUSION: f32 = 100.0;
    /// Hard cap on the minimum-fragment target
    pub const MIN_FRAGMENT_CAP: u32 = 10;

    /// Enemy defaults - 35x35 visual box, collision radius 17.5
    pub const ENEMY_RADIUS: f32 = 17.5;
    pub const ENEMY_START_SPEED: f32 = 1.0;
    /// Distance outside the boundary at which enemies enter
    pub const ENEMY_SPAWN_OFFSET: f32 = 40.0;
    /// Distance outside the boundary at which enemies are reclaimed
    pub const ENEMY_DESPAWN_MARGIN: f32 = 50.0;
    /// Live-enemy cap is this plus the current level
    pub const ENEMY_BASE_CAP: usize = 5;
    /// Ticks between enemy spawns (lower = faster)
    pub const ENEMY_SPAWN_INTERVAL_START: u32 = 150;
    pub const ENEMY_SPAWN_INTERVAL_FLOOR: u32 = 20;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const BULLET_START_SPEED: f32 = 8.0;
    pub const BULLET_DESPAWN_MARGIN: f32 = 20.0;
    /// Ticks a bullet may live before it is reclaimed
    pub const BULLET_MAX_LIFE: u32 = 300;
    /// Ticks between shots (lower = faster)
    pub const FIRE_INTERVAL_START: u32 = 30;
    pub const FIRE_INTERVAL_FLOOR: u32 = 5;

    /// Score milestones
    pub const LEVEL_UP_INTERVAL: u32 = 10;
    pub const WIN_SCORE: u32 = 100;
    /// Candidate pairs generated per level-up
    pub const CARDS_PER_LEVEL: usize = 3;
}
