//! Pet state engine for Hatchling.
//!
//! This crate is the logic layer: everything that operates on a
//! [`PetState`](hatchling_types::PetState) without touching I/O. It sits
//! between `hatchling-types` (the data) and `hatchling-core` (clock,
//! persistence, and the timer loop).
//!
//! # Modules
//!
//! - [`achievements`] -- Achievement registry and evaluator
//! - [`actions`] -- Action costs, preconditions, and handlers
//! - [`config`] -- Tunable rules ([`PetRules`])
//! - [`effects`] -- Derived side effects queued during a transition
//! - [`error`] -- Error types ([`PetError`])
//! - [`leveling`] -- Experience and level-up mechanics
//! - [`mood`] -- Display-only mood and status bands
//! - [`store`] -- The [`PetStore`] that owns the pet
//! - [`vitals`] -- Time-based decay, sickness, and aging

pub mod achievements;
pub mod actions;
pub mod config;
pub mod effects;
pub mod error;
pub mod leveling;
pub mod mood;
pub mod store;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use actions::{ActionOutcome, SkipReason};
pub use config::{DecayRates, PetRules};
pub use effects::{Effect, EffectQueue};
pub use error::PetError;
pub use leveling::{
    LevelGain, XP_CLEAN, XP_FEED, XP_HEAL, XP_PER_LEVEL, XP_PET_BONUS, XP_PLAY, XP_TRAIN,
    apply_level_ups, gain_experience,
};
pub use mood::{Mood, StatusBand};
pub use store::{PetStore, StoreEvent, StoreObserver, Transition};
pub use vitals::{DecayReport, SicknessChange, apply_decay};
