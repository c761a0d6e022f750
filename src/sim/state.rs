//! Game state and core simulation types
//!
//! Entities are transient pooled records with no identity beyond their slot;
//! everything the simulation mutates hangs off `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::Pool;
use super::upgrade::{self, Card, Modifiers};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active simulation, ticking every frame
    Running,
    /// Paused for the card-selection flow; resumed by `choose_card`
    LevelUpChoice,
    /// Run ended with 100 fragments collected
    Won,
    /// Run ended on enemy contact
    Lost,
}

/// The player avatar. Exactly one instance; reset on restart, never destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left anchor of the 40x40 logical box
    pub pos: Vec2,
    /// Movement speed (units per tick)
    pub speed: f32,
    /// Firing resource, clamped to [0, 100]
    pub energy: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            speed: PLAYER_START_SPEED,
            energy: ENERGY_MAX,
        }
    }
}

impl Player {
    /// Center of the collision circle (radius 20)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(PLAYER_RADIUS)
    }

    /// Add energy, clamped to the [0, 100] band.
    pub fn gain_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).clamp(0.0, ENERGY_MAX);
    }
}

/// A collectible fragment (radius 12.5)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Top-left anchor
    pub pos: Vec2,
}

impl Fragment {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(FRAGMENT_RADIUS)
    }
}

/// A homing enemy (35x35 visual box, collision radius 17.5)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left anchor
    pub pos: Vec2,
    /// Speed snapshot taken at spawn time (units per tick)
    pub speed: f32,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            speed: ENEMY_START_SPEED,
        }
    }
}

impl Enemy {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(ENEMY_RADIUS)
    }
}

/// An auto-fired projectile (radius 5). Position is the circle center.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit direction fixed at spawn, toward the then-nearest enemy
    pub dir: Vec2,
    /// Speed in units per tick
    pub speed: f32,
    /// Ticks alive; reclaimed past `BULLET_MAX_LIFE`
    pub life: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Fragments collected; monotonically non-decreasing within a run
    pub score: u32,
    /// Difficulty level; monotonically non-decreasing within a run
    pub level: u32,
    pub player: Player,

    /// Live entities, in spawn order (scan order breaks collision ties)
    pub fragments: Vec<Fragment>,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub fragment_pool: Pool<Fragment>,
    pub enemy_pool: Pool<Enemy>,
    pub bullet_pool: Pool<Bullet>,

    // Run-scoped tunables, mutated by card effects
    pub bullet_speed: f32,
    pub fire_interval: u32,
    pub enemy_speed: f32,
    pub enemy_spawn_interval: u32,

    // Frame-count accumulators compared against the intervals above
    pub fire_timer: u32,
    pub enemy_spawn_timer: u32,

    /// Special-effect flags; grows monotonically until restart
    pub modifiers: Modifiers,
    /// Pending candidate cards; non-empty only during `LevelUpChoice`
    pub cards: Vec<Card>,

    /// Simulation tick counter
    pub time_ticks: u64,
    /// Timestamp of the previous tick (ms), for the fps diagnostic
    pub last_frame_ms: f64,
    /// Diagnostic frame rate derived from tick timestamps
    pub fps: u32,
}

impl GameState {
    /// Create a new game state with the given seed.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            level: 1,
            player: Player::default(),
            fragments: Vec::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            fragment_pool: Pool::new(),
            enemy_pool: Pool::new(),
            bullet_pool: Pool::new(),
            bullet_speed: BULLET_START_SPEED,
            fire_interval: FIRE_INTERVAL_START,
            enemy_speed: ENEMY_START_SPEED,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL_START,
            fire_timer: 0,
            enemy_spawn_timer: 0,
            modifiers: Modifiers::default(),
            cards: Vec::new(),
            time_ticks: 0,
            last_frame_ms: 0.0,
            fps: 0,
        };
        state.restart();
        state
    }

    /// Reset to initial defaults for a fresh run.
    ///
    /// Live entities are returned to their pools rather than dropped, so pool
    /// capacity carries across restarts. Idempotent: calling this twice in a
    /// row yields identical state.
    pub fn restart(&mut self) {
        for fragment in self.fragments.drain(..) {
            self.fragment_pool.release(fragment);
        }
        for enemy in self.enemies.drain(..) {
            self.enemy_pool.release(enemy);
        }
        for bullet in self.bullets.drain(..) {
            self.bullet_pool.release(bullet);
        }

        self.rng = Pcg32::seed_from_u64(self.seed);
        self.phase = GamePhase::Running;
        self.score = 0;
        self.level = 1;
        self.player = Player::default();
        self.bullet_speed = BULLET_START_SPEED;
        self.fire_interval = FIRE_INTERVAL_START;
        self.enemy_speed = ENEMY_START_SPEED;
        self.enemy_spawn_interval = ENEMY_SPAWN_INTERVAL_START;
        // Pre-armed so the very first tick attempts a shot
        self.fire_timer = self.fire_interval + 1;
        self.enemy_spawn_timer = 0;
        self.modifiers = Modifiers::default();
        self.cards.clear();
        self.time_ticks = 0;
        self.last_frame_ms = 0.0;
        self.fps = 0;
    }

    /// Resume from the card-selection pause by picking the card at `index`.
    ///
    /// Both halves of the pair apply immediately; ticking resumes on the next
    /// scheduled frame. A no-op outside `LevelUpChoice` or for a bad index.
    pub fn choose_card(&mut self, index: usize) {
        if self.phase != GamePhase::LevelUpChoice {
            return;
        }
        let Some(card) = self.cards.get(index).copied() else {
            return;
        };
        upgrade::apply_card(self, card);
        log::debug!(
            "card applied: {} / {}",
            card.upgrade.description(),
            card.downgrade.description()
        );
        self.cards.clear();
        self.phase = GamePhase::Running;
    }

    /// Whether the run has reached a terminal state.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Won | GamePhase::Lost)
    }
}
