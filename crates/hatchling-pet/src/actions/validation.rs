//! Precondition checks for pet actions.
//!
//! Checks run in order and stop at the first failure:
//! 1. Sleep -- only petting reaches a sleeping pet
//! 2. Name -- a rename needs a non-blank name
//! 3. Energy -- play and training need a minimum energy
//! 4. Appetite -- training is refused when the pet is too full
//!
//! A failed check is not an error. The handler turns it into
//! [`ActionOutcome::Skipped`](super::ActionOutcome::Skipped) and leaves the
//! state untouched.

use core::fmt;

use hatchling_types::{InteractionKind, PetAction, PetState};

use super::costs;

/// Why an action was refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// The pet is asleep and the gesture did not reach it.
    Asleep,
    /// The pet lacks the energy for this action.
    TooTired {
        /// Current energy.
        energy: f64,
        /// Energy the action requires.
        required: f64,
    },
    /// The pet is too full to train.
    TooFull {
        /// Current fullness.
        hunger: f64,
        /// Highest fullness at which the action is allowed.
        limit: f64,
    },
    /// A rename was requested with an empty or whitespace-only name.
    BlankName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asleep => f.write_str("the pet is asleep"),
            Self::TooTired { energy, required } => {
                write!(f, "too tired (energy {energy:.0}, needs {required:.0})")
            }
            Self::TooFull { hunger, limit } => {
                write!(f, "too full to train (fullness {hunger:.0}, limit {limit:.0})")
            }
            Self::BlankName => f.write_str("the new name is blank"),
        }
    }
}

/// Check every deterministic precondition of `action` against `state`.
///
/// Petting a sleeping pet passes: whether it wakes is decided by the
/// handler's roll.
pub fn validate_action(action: &PetAction, state: &PetState) -> Result<(), SkipReason> {
    validate_sleep(action, state)?;
    validate_name(action)?;
    validate_energy(action, state)?;
    validate_appetite(action, state)
}

/// Stage 1: a sleeping pet ignores every gesture except petting.
fn validate_sleep(action: &PetAction, state: &PetState) -> Result<(), SkipReason> {
    match action {
        PetAction::Interact(kind) if state.is_sleeping && *kind != InteractionKind::Pet => {
            Err(SkipReason::Asleep)
        }
        _ => Ok(()),
    }
}

/// Stage 2: renames need a name once surrounding whitespace is removed.
fn validate_name(action: &PetAction) -> Result<(), SkipReason> {
    match action {
        PetAction::Rename(name) if name.trim().is_empty() => Err(SkipReason::BlankName),
        _ => Ok(()),
    }
}

/// Stage 3: minimum energy.
fn validate_energy(action: &PetAction, state: &PetState) -> Result<(), SkipReason> {
    match costs::energy_required(action) {
        Some(required) if state.vitals.energy < required => Err(SkipReason::TooTired {
            energy: state.vitals.energy,
            required,
        }),
        _ => Ok(()),
    }
}

/// Stage 4: maximum fullness.
fn validate_appetite(action: &PetAction, state: &PetState) -> Result<(), SkipReason> {
    match costs::hunger_limit(action) {
        Some(limit) if state.vitals.hunger > limit => Err(SkipReason::TooFull {
            hunger: state.vitals.hunger,
            limit,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use hatchling_types::SkillKind;

    use super::*;

    fn pet() -> PetState {
        PetState::hatch(None, None, 0)
    }

    #[test]
    fn feed_always_passes() {
        let mut state = pet();
        state.vitals.hunger = 100.0;
        state.vitals.energy = 0.0;
        assert_eq!(validate_action(&PetAction::Feed, &state), Ok(()));
    }

    #[test]
    fn play_needs_twenty_energy() {
        let mut state = pet();
        state.vitals.energy = 10.0;
        assert_eq!(
            validate_action(&PetAction::Play, &state),
            Err(SkipReason::TooTired {
                energy: 10.0,
                required: 20.0
            })
        );
        state.vitals.energy = 20.0;
        assert_eq!(validate_action(&PetAction::Play, &state), Ok(()));
    }

    #[test]
    fn train_refused_when_too_full() {
        let mut state = pet();
        state.vitals.hunger = 70.5;
        assert!(matches!(
            validate_action(&PetAction::Train, &state),
            Err(SkipReason::TooFull { .. })
        ));
        state.vitals.hunger = 70.0;
        assert_eq!(validate_action(&PetAction::Train, &state), Ok(()));
    }

    #[test]
    fn skill_training_has_stricter_gates() {
        let mut state = pet();
        state.vitals.energy = 35.0;
        state.vitals.hunger = 50.0;
        let action = PetAction::TrainSkill(SkillKind::Strength);
        assert!(matches!(
            validate_action(&action, &state),
            Err(SkipReason::TooTired { .. })
        ));
        state.vitals.energy = 40.0;
        state.vitals.hunger = 65.0;
        assert!(matches!(
            validate_action(&action, &state),
            Err(SkipReason::TooFull { .. })
        ));
    }

    #[test]
    fn sleeping_pet_only_accepts_petting() {
        let mut state = pet();
        state.is_sleeping = true;
        assert_eq!(
            validate_action(&PetAction::Interact(InteractionKind::Pat), &state),
            Err(SkipReason::Asleep)
        );
        assert_eq!(
            validate_action(&PetAction::Interact(InteractionKind::Pet), &state),
            Ok(())
        );
    }

    #[test]
    fn blank_rename_is_refused() {
        let state = pet();
        assert_eq!(
            validate_action(&PetAction::Rename(String::from("   ")), &state),
            Err(SkipReason::BlankName)
        );
    }
}
