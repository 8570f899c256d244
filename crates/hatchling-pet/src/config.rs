//! Tunable rules for pet decay, leveling, and achievements.
//!
//! The [`PetRules`] struct bundles every tunable so that callers (the
//! runner, tests) can override defaults. `hatchling-core` deserializes it
//! from the `pet` section of `hatchling-config.yaml`; any field left out of
//! the file keeps the default listed here.

use serde::Deserialize;

/// Per-minute decay rates for each vital.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecayRates {
    /// Fullness lost per minute (default: 1.0).
    pub hunger: f64,
    /// Health lost per minute (default: 0.5).
    pub health: f64,
    /// Happiness lost per minute (default: 0.8).
    pub happiness: f64,
    /// Energy lost per minute (default: 1.2).
    pub energy: f64,
    /// Cleanliness lost per minute (default: 0.7).
    pub cleanliness: f64,
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            hunger: 1.0,
            health: 0.5,
            happiness: 0.8,
            energy: 1.2,
            cleanliness: 0.7,
        }
    }
}

/// Configuration for the pet engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PetRules {
    /// Per-minute decay rates.
    pub decay: DecayRates,

    /// Fraction of hunger and health decay removed at intelligence 100
    /// (default: 0.3).
    pub intelligence_decay_reduction: f64,

    /// Happiness decay is divided by `1 + charm/100 * charm_mood_bonus`
    /// (default: 0.2).
    pub charm_mood_bonus: f64,

    /// Energy regained per minute of sleep, before the agility bonus
    /// (default: 3.0).
    pub sleep_energy_regen: f64,

    /// Extra energy regeneration fraction at agility 100 (default: 0.5).
    pub agility_regen_bonus: f64,

    /// Extra fullness lost per minute of sleep (default: 1.5).
    pub sleep_hunger_drain: f64,

    /// The pet falls sick when health drops below this (default: 30).
    pub sick_health_below: f64,

    /// The pet falls sick when cleanliness drops below this (default: 20).
    pub sick_cleanliness_below: f64,

    /// Bonus experience accrues while hunger, health, happiness, and
    /// cleanliness all exceed this (default: 70).
    pub thriving_threshold: f64,

    /// Bonus experience per hour while thriving (default: 3).
    pub thriving_xp_per_hour: f64,

    /// Experience granted by every achievement unlock (default: 50).
    pub achievement_reward: u32,

    /// Added to every skill on an experience-driven level-up (default: 2).
    pub level_up_skill_bonus: u32,

    /// Added to every skill on a manual level-up (default: 3).
    pub manual_level_up_skill_bonus: u32,

    /// How long a play session keeps the pet in the playing state, in
    /// milliseconds (default: 3000).
    pub play_duration_ms: i64,

    /// Names longer than this many characters are truncated (default: 24).
    pub max_name_chars: usize,

    /// Age in days that unlocks the senior-pet achievement (default: 7).
    pub senior_age_days: u32,

    /// Cumulative sleep minutes that unlock the slept-well achievement
    /// (default: 480).
    pub slept_well_minutes: f64,
}

impl Default for PetRules {
    fn default() -> Self {
        Self {
            decay: DecayRates::default(),
            intelligence_decay_reduction: 0.3,
            charm_mood_bonus: 0.2,
            sleep_energy_regen: 3.0,
            agility_regen_bonus: 0.5,
            sleep_hunger_drain: 1.5,
            sick_health_below: 30.0,
            sick_cleanliness_below: 20.0,
            thriving_threshold: 70.0,
            thriving_xp_per_hour: 3.0,
            achievement_reward: 50,
            level_up_skill_bonus: 2,
            manual_level_up_skill_bonus: 3,
            play_duration_ms: 3_000,
            max_name_chars: 24,
            senior_age_days: 7,
            slept_well_minutes: 480.0,
        }
    }
}

impl PetRules {
    /// Multiplier applied to hunger and health decay for a given
    /// intelligence level.
    ///
    /// Formula: `1 - intelligence / 100 * intelligence_decay_reduction`.
    pub fn intelligence_factor(&self, intelligence: u32) -> f64 {
        1.0 - f64::from(intelligence) / 100.0 * self.intelligence_decay_reduction
    }

    /// Divisor applied to happiness decay for a given charm level.
    ///
    /// Formula: `1 + charm / 100 * charm_mood_bonus`.
    pub fn charm_factor(&self, charm: u32) -> f64 {
        1.0 + f64::from(charm) / 100.0 * self.charm_mood_bonus
    }

    /// Multiplier applied to sleep energy regeneration for a given agility
    /// level.
    ///
    /// Formula: `1 + agility / 100 * agility_regen_bonus`.
    pub fn agility_factor(&self, agility: u32) -> f64 {
        1.0 + f64::from(agility) / 100.0 * self.agility_regen_bonus
    }
}
