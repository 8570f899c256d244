//! Achievement registry and evaluator.
//!
//! Each achievement is a predicate over the pet state. The store calls
//! [`evaluate`] once at the end of every transition; each locked
//! achievement whose predicate holds is returned for unlocking. Unlocking
//! itself ([`unlock`]) is idempotent, so re-evaluating a satisfied
//! predicate after the unlock does nothing.

use hatchling_types::{
    AchievementId, ActionKind, ActionRecord, DEFAULT_PET_NAME, PetState, STAT_MAX,
};

use crate::config::PetRules;

/// Interaction records in the log needed for the interaction master.
pub const INTERACTIONS_FOR_MASTER: usize = 5;

/// Predicate deciding whether an achievement has been earned.
pub type Predicate = fn(&PetState, &PetRules) -> bool;

/// Every built-in achievement with its predicate, in evaluation order.
pub const REGISTRY: [(AchievementId, Predicate); 11] = [
    (AchievementId::FirstFeed, |s, _| s.actions.contains_kind(ActionKind::Feed)),
    (AchievementId::GamePartner, |s, _| s.actions.contains_kind(ActionKind::Play)),
    (AchievementId::CleanFreak, |s, _| s.actions.contains_kind(ActionKind::Clean)),
    (AchievementId::StudyMaster, |s, _| s.actions.contains_kind(ActionKind::Train)),
    (AchievementId::PetDoctor, |s, _| s.actions.contains_kind(ActionKind::Heal)),
    (AchievementId::InteractionMaster, |s, _| {
        s.actions.count_kind(ActionKind::Interact) >= INTERACTIONS_FOR_MASTER
    }),
    (AchievementId::SeniorPet, |s, r| s.age >= r.senior_age_days),
    (AchievementId::HealthyLiving, |s, _| {
        s.vitals.health >= STAT_MAX && s.age >= 1
    }),
    (AchievementId::SuperHappy, |s, _| s.vitals.happiness >= STAT_MAX),
    (AchievementId::SleptWell, |s, r| {
        s.total_sleep_minutes >= r.slept_well_minutes
    }),
    (AchievementId::PetRenamer, |s, _| s.name != DEFAULT_PET_NAME),
];

/// Return the locked achievements whose predicates now hold, in registry
/// order.
pub fn evaluate(state: &PetState, rules: &PetRules) -> Vec<AchievementId> {
    REGISTRY
        .iter()
        .filter(|(id, earned)| !state.has_achievement(*id) && earned(state, rules))
        .map(|(id, _)| *id)
        .collect()
}

/// Mark an achievement as unlocked and log it.
///
/// Returns `false` (and changes nothing) if it was already unlocked. The
/// caller grants the experience reward.
pub fn unlock(state: &mut PetState, id: AchievementId, rules: &PetRules, now: i64) -> bool {
    if !state.achievements.insert(id) {
        return false;
    }
    state.actions.push(ActionRecord::new(
        ActionKind::Achievement,
        now,
        format!(
            "Achievement unlocked: {}! +{} XP",
            id.title(),
            rules.achievement_reward
        ),
    ));
    true
}
