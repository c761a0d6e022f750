//! Level-up cards and modifier effects
//!
//! Every ten fragments the simulation pauses and offers three cards, each
//! pairing one upgrade with one downgrade. Effects are tagged variants
//! applied by a central dispatcher: numeric effects mutate the run tunables
//! directly, flag effects register into the modifier registry and are
//! consulted where they matter (combat, spawning).

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::*;

/// Bounded retries for distinct-id sampling before repeats are accepted.
/// Never reached while the catalogs stay larger than the draw count.
const MAX_DRAW_ATTEMPTS: usize = 32;

/// Player-facing benefits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    MoveSpeed,
    FireRate,
    BulletSpeed,
    EnergyOnKill,
    FragmentValue,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::MoveSpeed,
        UpgradeKind::FireRate,
        UpgradeKind::BulletSpeed,
        UpgradeKind::EnergyOnKill,
        UpgradeKind::FragmentValue,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            UpgradeKind::MoveSpeed => "Move speed +10%",
            UpgradeKind::FireRate => "Fire rate +15%",
            UpgradeKind::BulletSpeed => "Bullet speed +15%",
            UpgradeKind::EnergyOnKill => "Recover 5 energy per kill",
            UpgradeKind::FragmentValue => "Fragments restore 5 extra energy",
        }
    }
}

/// Difficulty costs paired against each upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DowngradeKind {
    EnemySpeed,
    EnemySpawn,
    /// Reserved: recorded but has no effect on hit resolution yet
    EnemyEvasion,
    /// Reserved: recorded but has no effect on the energy economy yet
    EnergyDrain,
    LessFragment,
}

impl DowngradeKind {
    pub const ALL: [DowngradeKind; 5] = [
        DowngradeKind::EnemySpeed,
        DowngradeKind::EnemySpawn,
        DowngradeKind::EnemyEvasion,
        DowngradeKind::EnergyDrain,
        DowngradeKind::LessFragment,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            DowngradeKind::EnemySpeed => "Enemies move 8% faster",
            DowngradeKind::EnemySpawn => "Enemies spawn 10% faster",
            DowngradeKind::EnemyEvasion => "Enemies are harder to hit",
            DowngradeKind::EnergyDrain => "Energy drains 15% faster",
            DowngradeKind::LessFragment => "Fewer fragments spawn",
        }
    }
}

/// One evolution choice: a benefit paired with a cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub upgrade: UpgradeKind,
    pub downgrade: DowngradeKind,
}

/// Special-effect flags consulted elsewhere in the simulation.
///
/// Grows monotonically across a run; cleared only on restart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub energy_on_kill: bool,
    pub fragment_value: bool,
    pub less_fragment: bool,
    pub enemy_evasion: bool,
    pub energy_drain: bool,
}

/// Generate the three candidate pairs for a level-up.
///
/// Within one generation no upgrade id and no downgrade id repeats; the
/// catalogs hold five entries each so three distinct draws always succeed.
pub fn generate_cards(rng: &mut Pcg32) -> Vec<Card> {
    let mut used_upgrades: Vec<UpgradeKind> = Vec::new();
    let mut used_downgrades: Vec<DowngradeKind> = Vec::new();

    (0..CARDS_PER_LEVEL)
        .map(|_| {
            let upgrade = draw_distinct(rng, &UpgradeKind::ALL, &used_upgrades);
            used_upgrades.push(upgrade);
            let downgrade = draw_distinct(rng, &DowngradeKind::ALL, &used_downgrades);
            used_downgrades.push(downgrade);
            Card { upgrade, downgrade }
        })
        .collect()
}

/// Uniform draw avoiding already-used entries. Falls back to accepting a
/// repeat after a bounded number of attempts, so a shrunken catalog can
/// never loop forever.
fn draw_distinct<T: Copy + PartialEq>(rng: &mut Pcg32, catalog: &[T], used: &[T]) -> T {
    for _ in 0..MAX_DRAW_ATTEMPTS {
        let pick = catalog[rng.random_range(0..catalog.len())];
        if !used.contains(&pick) {
            return pick;
        }
    }
    catalog[rng.random_range(0..catalog.len())]
}

/// Apply both halves of a selected card.
pub fn apply_card(state: &mut GameState, card: Card) {
    apply_upgrade(state, card.upgrade);
    apply_downgrade(state, card.downgrade);
}

fn apply_upgrade(state: &mut GameState, kind: UpgradeKind) {
    match kind {
        UpgradeKind::MoveSpeed => state.player.speed *= 1.10,
        UpgradeKind::FireRate => {
            state.fire_interval =
                ((state.fire_interval as f32 * 0.85) as u32).max(FIRE_INTERVAL_FLOOR);
        }
        UpgradeKind::BulletSpeed => state.bullet_speed *= 1.15,
        UpgradeKind::EnergyOnKill => state.modifiers.energy_on_kill = true,
        UpgradeKind::FragmentValue => state.modifiers.fragment_value = true,
    }
}

fn apply_downgrade(state: &mut GameState, kind: DowngradeKind) {
    match kind {
        DowngradeKind::EnemySpeed => state.enemy_speed *= 1.08,
        DowngradeKind::EnemySpawn => {
            state.enemy_spawn_interval =
                ((state.enemy_spawn_interval as f32 * 0.90) as u32).max(ENEMY_SPAWN_INTERVAL_FLOOR);
        }
        DowngradeKind::EnemyEvasion => state.modifiers.enemy_evasion = true,
        DowngradeKind::EnergyDrain => state.modifiers.energy_drain = true,
        DowngradeKind::LessFragment => state.modifiers.less_fragment = true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_generate_cards_has_distinct_ids() {
        for seed in 0..200 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let cards = generate_cards(&mut rng);
            assert_eq!(cards.len(), 3);
            for i in 0..cards.len() {
                for j in i + 1..cards.len() {
                    assert_ne!(cards[i].upgrade, cards[j].upgrade);
                    assert_ne!(cards[i].downgrade, cards[j].downgrade);
                }
            }
        }
    }

    #[test]
    fn test_draw_distinct_falls_back_when_catalog_exhausted() {
        let mut rng = Pcg32::seed_from_u64(1);
        let catalog = [UpgradeKind::MoveSpeed];
        let used = [UpgradeKind::MoveSpeed];
        // Must terminate and hand back a repeat
        assert_eq!(draw_distinct(&mut rng, &catalog, &used), UpgradeKind::MoveSpeed);
    }

    #[test]
    fn test_numeric_upgrades_mutate_tunables() {
        let mut state = GameState::new(1);
        apply_upgrade(&mut state, UpgradeKind::MoveSpeed);
        assert!((state.player.speed - 6.6).abs() < 1e-5);

        apply_upgrade(&mut state, UpgradeKind::FireRate);
        assert_eq!(state.fire_interval, 25);

        apply_upgrade(&mut state, UpgradeKind::BulletSpeed);
        assert!((state.bullet_speed - 9.2).abs() < 1e-5);
    }

    #[test]
    fn test_fire_interval_respects_floor() {
        let mut state = GameState::new(1);
        state.fire_interval = FIRE_INTERVAL_FLOOR;
        apply_upgrade(&mut state, UpgradeKind::FireRate);
        assert_eq!(state.fire_interval, FIRE_INTERVAL_FLOOR);
    }

    #[test]
    fn test_enemy_spawn_interval_respects_floor() {
        let mut state = GameState::new(1);
        state.enemy_spawn_interval = 21;
        apply_downgrade(&mut state, DowngradeKind::EnemySpawn);
        assert_eq!(state.enemy_spawn_interval, ENEMY_SPAWN_INTERVAL_FLOOR);
    }

    #[test]
    fn test_flag_effects_register_into_modifiers() {
        let mut state = GameState::new(1);
        apply_card(
            &mut state,
            Card {
                upgrade: UpgradeKind::EnergyOnKill,
                downgrade: DowngradeKind::LessFragment,
            },
        );
        assert!(state.modifiers.energy_on_kill);
        assert!(state.modifiers.less_fragment);

        // Reserved placeholders are recorded but change no tunable
        let before_speed = state.enemy_speed;
        apply_downgrade(&mut state, DowngradeKind::EnemyEvasion);
        apply_downgrade(&mut state, DowngradeKind::EnergyDrain);
        assert!(state.modifiers.enemy_evasion);
        assert!(state.modifiers.energy_drain);
        assert_eq!(state.enemy_speed, before_speed);
    }
}
