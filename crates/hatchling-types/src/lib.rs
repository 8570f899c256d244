//! Shared type definitions for the Hatchling virtual-pet engine.
//!
//! This crate is the single source of truth for the data that flows between
//! the pet logic, the persistence adapter, and any front end. Types flow
//! downstream to `TypeScript` via `ts-rs` for a browser UI.
//!
//! # Modules
//!
//! - [`enums`] -- Log kinds, skills, interaction kinds, achievement ids
//! - [`structs`] -- The [`PetState`] aggregate, vitals, skills, action log
//! - [`actions`] -- The [`PetAction`] requests a front end dispatches

pub mod actions;
pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::PetAction;
pub use enums::{AchievementId, ActionKind, InteractionKind, SkillKind};
pub use structs::{
    ACTION_LOG_CAPACITY, ActionLog, ActionRecord, DEFAULT_PET_NAME, DEFAULT_SPECIES, PetState,
    SKILL_MAX, STAT_MAX, STAT_MIN, Skills, Vitals, clamp_stat,
};
