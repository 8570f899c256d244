//! Action requests a front end dispatches to the pet store.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{InteractionKind, SkillKind};

/// A user-initiated mutation of the pet.
///
/// These are the only way a front end changes the pet; decay is driven by
/// the periodic timer instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum PetAction {
    /// Feed the pet.
    Feed,
    /// Play with the pet (needs energy).
    Play,
    /// Bathe the pet.
    Clean,
    /// Toggle sleep.
    Rest,
    /// General training (needs energy and an appetite).
    Train,
    /// Restore full health and cure sickness.
    Heal,
    /// Train one skill (needs more energy and appetite than `Train`).
    TrainSkill(SkillKind),
    /// A direct gesture on the pet.
    Interact(InteractionKind),
    /// Give the pet a new name.
    Rename(String),
}

impl PetAction {
    /// Short lowercase label used in logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Clean => "clean",
            Self::Rest => "rest",
            Self::Train => "train",
            Self::Heal => "heal",
            Self::TrainSkill(_) => "train-skill",
            Self::Interact(_) => "interact",
            Self::Rename(_) => "rename",
        }
    }
}
