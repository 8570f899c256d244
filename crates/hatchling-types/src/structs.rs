//! Core pet structs: the [`PetState`] aggregate and its parts.
//!
//! [`PetState`] doubles as the persisted snapshot. Fields that only make
//! sense while the process runs (`is_playing`, `play_ends_at`) are skipped
//! by serde. Every other field falls back to its initialization default when
//! missing, so older snapshots keep loading.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AchievementId, ActionKind, SkillKind};

/// Lower bound of every vital and skill.
pub const STAT_MIN: f64 = 0.0;

/// Upper bound of every vital and skill.
pub const STAT_MAX: f64 = 100.0;

/// Upper bound of every skill, as an integer.
pub const SKILL_MAX: u32 = 100;

/// Number of entries the action log retains.
pub const ACTION_LOG_CAPACITY: usize = 10;

/// Name given to a pet hatched without one.
pub const DEFAULT_PET_NAME: &str = "Little Pet";

/// Species given to a pet hatched without one.
pub const DEFAULT_SPECIES: &str = "Kitten";

// ---------------------------------------------------------------------------
// Vitals
// ---------------------------------------------------------------------------

/// The five decaying vitals, each within `[0, 100]`.
///
/// `hunger` measures fullness: 100 is fully fed, 0 is starving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct Vitals {
    /// Fullness (0 = starving).
    pub hunger: f64,
    /// Physical health.
    pub health: f64,
    /// Mood.
    pub happiness: f64,
    /// Stamina spent by play and training.
    pub energy: f64,
    /// Hygiene.
    pub cleanliness: f64,
}

impl Vitals {
    /// Clamp every vital into `[0, 100]`.
    ///
    /// NaN collapses to the lower bound.
    pub fn clamp_all(&mut self) {
        self.hunger = clamp_stat(self.hunger);
        self.health = clamp_stat(self.health);
        self.happiness = clamp_stat(self.happiness);
        self.energy = clamp_stat(self.energy);
        self.cleanliness = clamp_stat(self.cleanliness);
    }

    /// Return every vital in declaration order.
    pub const fn as_array(&self) -> [f64; 5] {
        [self.hunger, self.health, self.happiness, self.energy, self.cleanliness]
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            hunger: 50.0,
            health: 100.0,
            happiness: 80.0,
            energy: 100.0,
            cleanliness: 100.0,
        }
    }
}

/// Clamp a single stat into `[0, 100]`, mapping NaN to 0.
pub fn clamp_stat(value: f64) -> f64 {
    if value.is_nan() {
        return STAT_MIN;
    }
    value.clamp(STAT_MIN, STAT_MAX)
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// The four trainable skills, each within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct Skills {
    /// Reduces hunger and health decay.
    pub intelligence: u32,
    /// Speeds energy recovery while asleep.
    pub agility: u32,
    /// Physical strength.
    pub strength: u32,
    /// Reduces happiness decay.
    pub charm: u32,
}

impl Skills {
    /// Return the level of one skill.
    pub const fn get(&self, skill: SkillKind) -> u32 {
        match skill {
            SkillKind::Intelligence => self.intelligence,
            SkillKind::Agility => self.agility,
            SkillKind::Strength => self.strength,
            SkillKind::Charm => self.charm,
        }
    }

    /// Return a mutable reference to one skill.
    pub const fn get_mut(&mut self, skill: SkillKind) -> &mut u32 {
        match skill {
            SkillKind::Intelligence => &mut self.intelligence,
            SkillKind::Agility => &mut self.agility,
            SkillKind::Strength => &mut self.strength,
            SkillKind::Charm => &mut self.charm,
        }
    }

    /// Raise one skill by `amount`, saturating at [`SKILL_MAX`].
    pub fn raise(&mut self, skill: SkillKind, amount: u32) {
        let slot = self.get_mut(skill);
        *slot = slot.saturating_add(amount).min(SKILL_MAX);
    }

    /// Raise every skill by `amount`, saturating at [`SKILL_MAX`].
    pub fn raise_all(&mut self, amount: u32) {
        for skill in SkillKind::ALL {
            self.raise(skill, amount);
        }
    }

    /// Clamp every skill to [`SKILL_MAX`].
    pub fn clamp_all(&mut self) {
        for skill in SkillKind::ALL {
            let slot = self.get_mut(skill);
            *slot = (*slot).min(SKILL_MAX);
        }
    }
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            intelligence: 10,
            agility: 10,
            strength: 10,
            charm: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Action log
// ---------------------------------------------------------------------------

/// A single entry in the pet's action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActionRecord {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Epoch milliseconds at which it happened.
    #[ts(type = "number")]
    pub timestamp: i64,
    /// Text shown to the user.
    pub description: String,
}

impl ActionRecord {
    /// Build a record.
    pub fn new(kind: ActionKind, timestamp: i64, description: impl Into<String>) -> Self {
        Self {
            kind,
            timestamp,
            description: description.into(),
        }
    }
}

/// Ordered, capacity-bounded log of the most recent actions.
///
/// Holds at most [`ACTION_LOG_CAPACITY`] records. Pushing onto a full log
/// evicts the oldest record first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ActionRecord>", into = "Vec<ActionRecord>")]
pub struct ActionLog {
    records: VecDeque<ActionRecord>,
}

impl ActionLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            records: VecDeque::new(),
        }
    }

    /// Append a record, evicting the oldest if the log is full.
    pub fn push(&mut self, record: ActionRecord) {
        while self.records.len() >= ACTION_LOG_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ActionRecord> {
        self.records.iter()
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&ActionRecord> {
        self.records.back()
    }

    /// Whether any retained record has the given kind.
    pub fn contains_kind(&self, kind: ActionKind) -> bool {
        self.records.iter().any(|r| r.kind == kind)
    }

    /// Number of retained records with the given kind.
    pub fn count_kind(&self, kind: ActionKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }
}

impl From<Vec<ActionRecord>> for ActionLog {
    fn from(records: Vec<ActionRecord>) -> Self {
        let skip = records.len().saturating_sub(ACTION_LOG_CAPACITY);
        Self {
            records: records.into_iter().skip(skip).collect(),
        }
    }
}

impl From<ActionLog> for Vec<ActionRecord> {
    fn from(log: ActionLog) -> Self {
        log.records.into()
    }
}

// ---------------------------------------------------------------------------
// PetState
// ---------------------------------------------------------------------------

/// The single pet aggregate.
///
/// Owned by a store and mutated only through its operations. Serializes to
/// the camelCase `pet-storage` snapshot shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PetState {
    /// Display name.
    pub name: String,
    /// Species label, e.g. "Kitten".
    #[serde(rename = "type")]
    pub species: String,
    /// Age in whole days.
    pub age: u32,
    /// Milliseconds elapsed toward the next whole day of age.
    #[ts(type = "number")]
    pub age_carry_ms: i64,
    /// The five decaying vitals.
    #[serde(flatten)]
    pub vitals: Vitals,
    /// Whether the pet is asleep.
    pub is_sleeping: bool,
    /// Whether the pet is mid-play. Runtime only.
    #[serde(skip)]
    pub is_playing: bool,
    /// When the current play session ends, in epoch milliseconds. Runtime only.
    #[serde(skip)]
    pub play_ends_at: Option<i64>,
    /// Whether the pet is sick. Derived by the decay engine.
    pub is_sick: bool,
    /// Cumulative minutes spent asleep.
    pub total_sleep_minutes: f64,
    /// Epoch milliseconds of the last decay application.
    #[ts(type = "number")]
    pub last_update: i64,
    /// Most recent actions, oldest first.
    #[ts(as = "Vec<ActionRecord>")]
    pub actions: ActionLog,
    /// Unlocked achievements. Serialized as `{ "<id>": true }`.
    #[serde(with = "achievement_set")]
    #[ts(as = "BTreeMap<AchievementId, bool>")]
    pub achievements: BTreeSet<AchievementId>,
    /// Trainable skills.
    pub skills: Skills,
    /// Current level (at least 1).
    pub level: u32,
    /// Experience toward the next level (below `level * 100`).
    pub experience: u32,
}

impl PetState {
    /// Create a freshly hatched pet.
    ///
    /// Blank names and species fall back to [`DEFAULT_PET_NAME`] and
    /// [`DEFAULT_SPECIES`]. The log starts with a single `initialize` entry.
    pub fn hatch(name: Option<&str>, species: Option<&str>, now: i64) -> Self {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let species = species.map(str::trim).filter(|s| !s.is_empty());
        let mut actions = ActionLog::new();
        actions.push(ActionRecord::new(
            ActionKind::Initialize,
            now,
            "A new pet has hatched!",
        ));
        Self {
            name: name.unwrap_or(DEFAULT_PET_NAME).to_owned(),
            species: species.unwrap_or(DEFAULT_SPECIES).to_owned(),
            last_update: now,
            actions,
            ..Self::default()
        }
    }

    /// Whether an achievement has been unlocked.
    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.contains(&id)
    }

    /// Experience needed to reach the next level (`level * 100`).
    pub const fn experience_to_next_level(&self) -> u32 {
        self.level.saturating_mul(100)
    }
}

impl Default for PetState {
    fn default() -> Self {
        Self {
            name: DEFAULT_PET_NAME.to_owned(),
            species: DEFAULT_SPECIES.to_owned(),
            age: 0,
            age_carry_ms: 0,
            vitals: Vitals::default(),
            is_sleeping: false,
            is_playing: false,
            play_ends_at: None,
            is_sick: false,
            total_sleep_minutes: 0.0,
            last_update: 0,
            actions: ActionLog::new(),
            achievements: BTreeSet::new(),
            skills: Skills::default(),
            level: 1,
            experience: 0,
        }
    }
}

/// Serde adapter for the achievement set.
///
/// Writes `{ "<id>": true, ... }`. Reads either that map (entries set to
/// `false` are ignored) or a plain list of ids. Unknown ids are dropped.
mod achievement_set {
    use super::{AchievementId, BTreeMap, BTreeSet};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Flags(BTreeMap<String, bool>),
        List(Vec<String>),
    }

    pub(super) fn serialize<S: Serializer>(
        set: &BTreeSet<AchievementId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(set.len()))?;
        for id in set {
            map.serialize_entry(id.as_str(), &true)?;
        }
        map.end()
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeSet<AchievementId>, D::Error> {
        let ids: Vec<String> = match Repr::deserialize(deserializer)? {
            Repr::Flags(flags) => flags
                .into_iter()
                .filter_map(|(id, unlocked)| unlocked.then_some(id))
                .collect(),
            Repr::List(list) => list,
        };
        Ok(ids.iter().filter_map(|id| AchievementId::from_id(id)).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn hatch_uses_defaults_for_blank_input() {
        let pet = PetState::hatch(Some("   "), None, 1_000);
        assert_eq!(pet.name, DEFAULT_PET_NAME);
        assert_eq!(pet.species, DEFAULT_SPECIES);
        assert_eq!(pet.last_update, 1_000);
        assert_eq!(pet.actions.len(), 1);
        assert_eq!(pet.actions.last().map(|r| r.kind), Some(ActionKind::Initialize));
        assert_eq!(pet.level, 1);
        assert_eq!(pet.skills, Skills::default());
    }

    #[test]
    fn action_log_evicts_oldest_first() {
        let mut log = ActionLog::new();
        for i in 0..15_i64 {
            log.push(ActionRecord::new(ActionKind::Feed, i, format!("entry {i}")));
        }
        assert_eq!(log.len(), ACTION_LOG_CAPACITY);
        assert_eq!(log.iter().next().map(|r| r.timestamp), Some(5));
        assert_eq!(log.last().map(|r| r.timestamp), Some(14));
    }

    #[test]
    fn oversized_log_is_truncated_on_load() {
        let records: Vec<ActionRecord> = (0..25_i64)
            .map(|i| ActionRecord::new(ActionKind::Play, i, "x"))
            .collect();
        let log = ActionLog::from(records);
        assert_eq!(log.len(), ACTION_LOG_CAPACITY);
        assert_eq!(log.iter().next().map(|r| r.timestamp), Some(15));
    }

    #[test]
    fn snapshot_uses_camel_case_and_flat_vitals() {
        let pet = PetState::hatch(Some("Mochi"), Some("Puppy"), 42);
        let value = serde_json::to_value(&pet).unwrap();
        assert_eq!(value["name"], "Mochi");
        assert_eq!(value["type"], "Puppy");
        assert_eq!(value["hunger"], 50.0);
        assert_eq!(value["lastUpdate"], 42);
        assert_eq!(value["isSleeping"], false);
        assert!(value.get("isPlaying").is_none());
        assert!(value.get("vitals").is_none());
        assert_eq!(value["actions"][0]["type"], "initialize");
    }

    #[test]
    fn achievements_serialize_as_flag_map() {
        let mut pet = PetState::default();
        pet.achievements.insert(AchievementId::FirstFeed);
        let value = serde_json::to_value(&pet).unwrap();
        assert_eq!(value["achievements"]["first-feed"], true);
    }

    #[test]
    fn legacy_snapshot_fills_missing_fields() {
        let json = r#"{
            "name": "Old Timer",
            "hunger": 12.5,
            "achievements": { "first-play": true, "first-feed": false, "unknown": true },
            "actions": [{ "type": "dance", "timestamp": 5, "description": "?" }]
        }"#;
        let pet: PetState = serde_json::from_str(json).unwrap();
        assert_eq!(pet.name, "Old Timer");
        assert_eq!(pet.species, DEFAULT_SPECIES);
        assert_eq!(pet.vitals.hunger, 12.5);
        assert_eq!(pet.vitals.health, 100.0);
        assert_eq!(pet.level, 1);
        assert!(pet.has_achievement(AchievementId::GamePartner));
        assert!(!pet.has_achievement(AchievementId::FirstFeed));
        assert_eq!(pet.achievements.len(), 1);
        assert_eq!(pet.actions.last().map(|r| r.kind), Some(ActionKind::Other));
    }

    #[test]
    fn achievements_accept_a_plain_list() {
        let json = r#"{ "achievements": ["senior-pet", "pet-doctor"] }"#;
        let pet: PetState = serde_json::from_str(json).unwrap();
        assert!(pet.has_achievement(AchievementId::SeniorPet));
        assert!(pet.has_achievement(AchievementId::PetDoctor));
    }

    #[test]
    fn clamp_maps_nan_and_out_of_range() {
        let mut vitals = Vitals {
            hunger: f64::NAN,
            health: 140.0,
            happiness: -3.0,
            energy: 55.5,
            cleanliness: 100.0,
        };
        vitals.clamp_all();
        assert_eq!(vitals.as_array(), [0.0, 100.0, 0.0, 55.5, 100.0]);
    }

    #[test]
    fn skills_saturate_at_max() {
        let mut skills = Skills::default();
        skills.raise(SkillKind::Charm, 500);
        skills.raise_all(2);
        assert_eq!(skills.charm, SKILL_MAX);
        assert_eq!(skills.agility, 12);
    }
}
