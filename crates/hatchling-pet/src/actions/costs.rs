//! Vital deltas, thresholds, and experience rewards for each action.
//!
//! Hunger is fullness: feeding raises it, and the training thresholds cap it
//! (a pet that is too full refuses to train).

use hatchling_types::{InteractionKind, PetAction};

use crate::leveling;

// ---------------------------------------------------------------------------
// Care actions
// ---------------------------------------------------------------------------

/// Fullness restored by feeding.
pub const FEED_HUNGER: f64 = 20.0;

/// Health restored by feeding.
pub const FEED_HEALTH: f64 = 5.0;

/// Happiness gained from playing.
pub const PLAY_HAPPINESS: f64 = 25.0;

/// Energy spent playing.
pub const PLAY_ENERGY: f64 = 20.0;

/// Health restored by a bath. Cleanliness is reset to the maximum.
pub const CLEAN_HEALTH: f64 = 10.0;

/// Happiness lost to a general training session.
pub const TRAIN_HAPPINESS: f64 = 5.0;

/// Energy spent on a general training session.
pub const TRAIN_ENERGY: f64 = 30.0;

/// Fullness above which general training is refused.
pub const TRAIN_MAX_HUNGER: f64 = 70.0;

/// Points added to the trained skill.
pub const SKILL_TRAINING_GAIN: u32 = 5;

/// Energy spent training one skill.
pub const SKILL_TRAINING_ENERGY: f64 = 40.0;

/// Fullness gained training one skill.
pub const SKILL_TRAINING_HUNGER: f64 = 15.0;

/// Fullness above which skill training is refused.
pub const SKILL_TRAINING_MAX_HUNGER: f64 = 60.0;

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

/// Chance that petting wakes a sleeping pet.
pub const WAKE_BY_PETTING_CHANCE: f64 = 0.3;

/// Happiness gained when petting wakes the pet.
pub const WAKE_BY_PETTING_HAPPINESS: f64 = 5.0;

/// Chance that petting an awake pet grants bonus experience.
pub const PET_BONUS_CHANCE: f64 = 0.2;

/// Chance that the pet enjoys being dragged.
pub const DRAG_ENJOY_CHANCE: f64 = 0.7;

/// Happiness lost when a drag makes the pet dizzy.
pub const DRAG_DIZZY_HAPPINESS: f64 = 3.0;

/// Energy spent on a double-click.
pub const DOUBLE_CLICK_ENERGY: f64 = 5.0;

/// Health restored by a pat.
pub const PAT_HEALTH: f64 = 2.0;

/// Return the happiness a successful interaction adds.
///
/// Values:
/// - Pet: 8
/// - `DoubleClick`: 15
/// - Drag (enjoyed): 5
/// - Pat: 10
pub const fn interaction_happiness(kind: InteractionKind) -> f64 {
    match kind {
        InteractionKind::Pet => 8.0,
        InteractionKind::DoubleClick => 15.0,
        InteractionKind::Drag => 5.0,
        InteractionKind::Pat => 10.0,
    }
}

/// Return the minimum energy an action requires, if it has one.
///
/// Values:
/// - Play: 20
/// - Train: 30
/// - `TrainSkill`: 40
pub const fn energy_required(action: &PetAction) -> Option<f64> {
    match action {
        PetAction::Play => Some(PLAY_ENERGY),
        PetAction::Train => Some(TRAIN_ENERGY),
        PetAction::TrainSkill(_) => Some(SKILL_TRAINING_ENERGY),
        _ => None,
    }
}

/// Return the fullness above which an action is refused, if it has a cap.
pub const fn hunger_limit(action: &PetAction) -> Option<f64> {
    match action {
        PetAction::Train => Some(TRAIN_MAX_HUNGER),
        PetAction::TrainSkill(_) => Some(SKILL_TRAINING_MAX_HUNGER),
        _ => None,
    }
}

/// Return the fixed experience an applied action grants.
///
/// Petting's bonus is probabilistic and granted by the handler itself.
#[allow(clippy::match_same_arms)] // Feed and clean happen to share a reward.
pub const fn experience_reward(action: &PetAction) -> u32 {
    match action {
        PetAction::Feed => leveling::XP_FEED,
        PetAction::Play => leveling::XP_PLAY,
        PetAction::Clean => leveling::XP_CLEAN,
        PetAction::Train => leveling::XP_TRAIN,
        PetAction::Heal => leveling::XP_HEAL,
        PetAction::Rest
        | PetAction::TrainSkill(_)
        | PetAction::Interact(_)
        | PetAction::Rename(_) => 0,
    }
}
