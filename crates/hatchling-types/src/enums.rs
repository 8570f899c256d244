//! Enumeration types for the Hatchling pet engine.
//!
//! Wire names match the persisted `pet-storage` blob so that snapshots
//! written by earlier front ends keep loading.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Action log kinds
// ---------------------------------------------------------------------------

/// The kind of an entry in the pet's action log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ActionKind {
    /// The pet was hatched (initialized).
    Initialize,
    /// The pet was fed.
    Feed,
    /// The pet played.
    Play,
    /// The pet was bathed.
    Clean,
    /// The pet fell asleep.
    Sleep,
    /// The pet woke up.
    Wake,
    /// The pet completed general training.
    Train,
    /// The pet trained one specific skill.
    TrainSkill,
    /// The pet was healed.
    Heal,
    /// The user interacted with the pet directly.
    Interact,
    /// The pet was renamed.
    Rename,
    /// An achievement was unlocked.
    Achievement,
    /// The pet gained a level.
    LevelUp,
    /// A health status transition (fell sick, recovered).
    Status,
    /// A kind written by a newer or older version that this one does not know.
    #[serde(other)]
    Other,
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// One of the four trainable skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SkillKind {
    /// Slows hunger and health decay.
    Intelligence,
    /// Speeds energy recovery while asleep.
    Agility,
    /// Raw physical stat, raised by training and leveling.
    Strength,
    /// Slows happiness decay.
    Charm,
}

impl SkillKind {
    /// Every skill, in display order.
    pub const ALL: [Self; 4] = [Self::Intelligence, Self::Agility, Self::Strength, Self::Charm];

    /// Return the lowercase wire name of the skill.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intelligence => "intelligence",
            Self::Agility => "agility",
            Self::Strength => "strength",
            Self::Charm => "charm",
        }
    }

    /// Parse a skill from its wire name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|skill| skill.as_str().eq_ignore_ascii_case(name))
    }
}

impl core::fmt::Display for SkillKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

/// A direct gesture the user performed on the pet.
///
/// Gesture recognition happens in the front end; the engine only sees the
/// resulting kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum InteractionKind {
    /// Stroking the pet. The only gesture that can wake a sleeping pet.
    Pet,
    /// Double-clicking the pet.
    DoubleClick,
    /// Dragging the pet around.
    Drag,
    /// A light pat.
    Pat,
}

impl InteractionKind {
    /// Every interaction kind.
    pub const ALL: [Self; 4] = [Self::Pet, Self::DoubleClick, Self::Drag, Self::Pat];

    /// Return the kebab-case command name of the interaction.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pet => "pet",
            Self::DoubleClick => "double-click",
            Self::Drag => "drag",
            Self::Pat => "pat",
        }
    }

    /// Parse an interaction from its command name.
    ///
    /// Accepts both `double-click` and the wire form `doubleClick`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("doubleclick") {
            return Some(Self::DoubleClick);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

/// Identifier of a one-shot achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum AchievementId {
    /// Fed the pet for the first time.
    FirstFeed,
    /// Played with the pet for the first time.
    #[serde(alias = "first-play")]
    GamePartner,
    /// Bathed the pet for the first time.
    #[serde(alias = "first-clean")]
    CleanFreak,
    /// Completed a training session.
    StudyMaster,
    /// Healed the pet.
    PetDoctor,
    /// Interacted with the pet five times within the recent log.
    InteractionMaster,
    /// The pet reached seven days of age.
    #[serde(alias = "pet-birthday")]
    SeniorPet,
    /// Full health on a pet at least one day old.
    HealthyLiving,
    /// Happiness reached 100.
    SuperHappy,
    /// The pet slept for a cumulative eight hours.
    SleptWell,
    /// The pet was given a custom name.
    PetRenamer,
}

impl AchievementId {
    /// Every achievement, in evaluation order.
    pub const ALL: [Self; 11] = [
        Self::FirstFeed,
        Self::GamePartner,
        Self::CleanFreak,
        Self::StudyMaster,
        Self::PetDoctor,
        Self::InteractionMaster,
        Self::SeniorPet,
        Self::HealthyLiving,
        Self::SuperHappy,
        Self::SleptWell,
        Self::PetRenamer,
    ];

    /// Return the canonical kebab-case identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstFeed => "first-feed",
            Self::GamePartner => "game-partner",
            Self::CleanFreak => "clean-freak",
            Self::StudyMaster => "study-master",
            Self::PetDoctor => "pet-doctor",
            Self::InteractionMaster => "interaction-master",
            Self::SeniorPet => "senior-pet",
            Self::HealthyLiving => "healthy-living",
            Self::SuperHappy => "super-happy",
            Self::SleptWell => "slept-well",
            Self::PetRenamer => "pet-renamer",
        }
    }

    /// Human-readable title shown when the achievement unlocks.
    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstFeed => "First Meal",
            Self::GamePartner => "Game Partner",
            Self::CleanFreak => "Clean Freak",
            Self::StudyMaster => "Study Master",
            Self::PetDoctor => "Pet Doctor",
            Self::InteractionMaster => "Interaction Master",
            Self::SeniorPet => "Senior Pet",
            Self::HealthyLiving => "Healthy Living",
            Self::SuperHappy => "Super Happy",
            Self::SleptWell => "Slept Well",
            Self::PetRenamer => "Name Master",
        }
    }

    /// Parse an identifier, accepting the legacy aliases used by older
    /// front ends (`first-play`, `first-clean`, `pet-birthday`).
    ///
    /// Returns `None` for identifiers this version does not know.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "first-play" => Some(Self::GamePartner),
            "first-clean" => Some(Self::CleanFreak),
            "pet-birthday" => Some(Self::SeniorPet),
            other => Self::ALL.into_iter().find(|a| a.as_str() == other),
        }
    }
}

impl core::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
