//! Execution handlers for pet actions.
//!
//! [`execute`] validates the action, applies its vital deltas, writes one
//! log entry, and queues any experience it earns. Achievements are not
//! checked here; the store evaluates them once the whole transition has
//! run.

use hatchling_types::{
    ActionKind, ActionRecord, InteractionKind, PetAction, PetState, STAT_MAX, SkillKind,
};
use rand::Rng;

use crate::config::PetRules;
use crate::effects::EffectQueue;
use crate::leveling;
use crate::vitals::adjust;

use super::costs;
use super::validation::{self, SkipReason};
use super::ActionOutcome;

/// Run `action` against `state`.
///
/// Returns [`ActionOutcome::Skipped`] with the state untouched when a
/// precondition fails. Randomness (wake and interaction rolls) is drawn
/// from `rng`.
pub fn execute(
    action: &PetAction,
    state: &mut PetState,
    rules: &PetRules,
    now: i64,
    rng: &mut impl Rng,
    effects: &mut EffectQueue,
) -> ActionOutcome {
    if let Err(reason) = validation::validate_action(action, state) {
        return ActionOutcome::Skipped(reason);
    }

    let outcome = match action {
        PetAction::Feed => feed(state, now),
        PetAction::Play => play(state, rules, now),
        PetAction::Clean => clean(state, now),
        PetAction::Rest => rest(state, now),
        PetAction::Train => train(state, now),
        PetAction::Heal => heal(state, now),
        PetAction::TrainSkill(skill) => train_skill(state, *skill, now),
        PetAction::Interact(kind) => interact(state, *kind, now, rng, effects),
        PetAction::Rename(name) => rename(state, name, rules, now),
    };

    if outcome.is_applied() {
        effects.grant_experience(costs::experience_reward(action));
    }
    outcome
}

fn log(state: &mut PetState, kind: ActionKind, now: i64, description: impl Into<String>) {
    state.actions.push(ActionRecord::new(kind, now, description));
}

fn feed(state: &mut PetState, now: i64) -> ActionOutcome {
    let v = &mut state.vitals;
    v.hunger = adjust(v.hunger, costs::FEED_HUNGER);
    v.health = adjust(v.health, costs::FEED_HEALTH);
    log(state, ActionKind::Feed, now, "Yum, fed successfully!");
    ActionOutcome::Applied
}

fn play(state: &mut PetState, rules: &PetRules, now: i64) -> ActionOutcome {
    let v = &mut state.vitals;
    v.happiness = adjust(v.happiness, costs::PLAY_HAPPINESS);
    v.energy = adjust(v.energy, -costs::PLAY_ENERGY);
    state.is_playing = true;
    state.play_ends_at = Some(now.saturating_add(rules.play_duration_ms));
    log(state, ActionKind::Play, now, "Play time!");
    ActionOutcome::Applied
}

fn clean(state: &mut PetState, now: i64) -> ActionOutcome {
    let v = &mut state.vitals;
    v.cleanliness = STAT_MAX;
    v.health = adjust(v.health, costs::CLEAN_HEALTH);
    log(state, ActionKind::Clean, now, "Bath time feels great!");
    ActionOutcome::Applied
}

fn rest(state: &mut PetState, now: i64) -> ActionOutcome {
    state.is_sleeping = !state.is_sleeping;
    if state.is_sleeping {
        log(state, ActionKind::Sleep, now, "Sleeping...");
    } else {
        log(state, ActionKind::Wake, now, "Woke up!");
    }
    ActionOutcome::Applied
}

fn train(state: &mut PetState, now: i64) -> ActionOutcome {
    let v = &mut state.vitals;
    v.happiness = adjust(v.happiness, -costs::TRAIN_HAPPINESS);
    v.energy = adjust(v.energy, -costs::TRAIN_ENERGY);
    log(state, ActionKind::Train, now, "Training complete!");
    ActionOutcome::Applied
}

fn heal(state: &mut PetState, now: i64) -> ActionOutcome {
    state.vitals.health = STAT_MAX;
    state.is_sick = false;
    log(state, ActionKind::Heal, now, "Healed successfully!");
    ActionOutcome::Applied
}

fn train_skill(state: &mut PetState, skill: SkillKind, now: i64) -> ActionOutcome {
    state.skills.raise(skill, costs::SKILL_TRAINING_GAIN);
    let v = &mut state.vitals;
    v.energy = adjust(v.energy, -costs::SKILL_TRAINING_ENERGY);
    v.hunger = adjust(v.hunger, costs::SKILL_TRAINING_HUNGER);
    log(state, ActionKind::TrainSkill, now, format!("Trained {skill}!"));
    ActionOutcome::Applied
}

fn interact(
    state: &mut PetState,
    kind: InteractionKind,
    now: i64,
    rng: &mut impl Rng,
    effects: &mut EffectQueue,
) -> ActionOutcome {
    if state.is_sleeping {
        // Validation only lets petting through to a sleeping pet.
        if !rng.random_bool(costs::WAKE_BY_PETTING_CHANCE) {
            return ActionOutcome::Skipped(SkipReason::Asleep);
        }
        state.is_sleeping = false;
        state.vitals.happiness = adjust(state.vitals.happiness, costs::WAKE_BY_PETTING_HAPPINESS);
        log(state, ActionKind::Interact, now, "Woke up from the petting!");
        return ActionOutcome::Applied;
    }

    let v = &mut state.vitals;
    let description = match kind {
        InteractionKind::Pet => {
            v.happiness = adjust(v.happiness, costs::interaction_happiness(kind));
            if rng.random_bool(costs::PET_BONUS_CHANCE) {
                effects.grant_experience(leveling::XP_PET_BONUS);
            }
            "Happily petted!"
        }
        InteractionKind::DoubleClick => {
            v.happiness = adjust(v.happiness, costs::interaction_happiness(kind));
            v.energy = adjust(v.energy, -costs::DOUBLE_CLICK_ENERGY);
            "Jumps up excitedly!"
        }
        InteractionKind::Drag => {
            if rng.random_bool(costs::DRAG_ENJOY_CHANCE) {
                v.happiness = adjust(v.happiness, costs::interaction_happiness(kind));
                "Loves being dragged!"
            } else {
                v.happiness = adjust(v.happiness, -costs::DRAG_DIZZY_HAPPINESS);
                "A little dizzy..."
            }
        }
        InteractionKind::Pat => {
            v.happiness = adjust(v.happiness, costs::interaction_happiness(kind));
            v.health = adjust(v.health, costs::PAT_HEALTH);
            "Feels so nice to be patted!"
        }
    };
    log(state, ActionKind::Interact, now, description);
    ActionOutcome::Applied
}

fn rename(state: &mut PetState, name: &str, rules: &PetRules, now: i64) -> ActionOutcome {
    let name: String = name.trim().chars().take(rules.max_name_chars).collect();
    log(state, ActionKind::Rename, now, format!("Renamed to {name}"));
    state.name = name;
    ActionOutcome::Applied
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::effects::Effect;

    fn run(action: &PetAction, state: &mut PetState) -> (ActionOutcome, EffectQueue) {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut effects = EffectQueue::new();
        let outcome = execute(action, state, &PetRules::default(), 1_000, &mut rng, &mut effects);
        (outcome, effects)
    }

    fn fresh() -> PetState {
        PetState::hatch(Some("Pip"), None, 0)
    }

    #[test]
    fn feed_raises_hunger_and_queues_experience() {
        let mut state = fresh();
        state.vitals.health = 97.0;
        let (outcome, mut effects) = run(&PetAction::Feed, &mut state);
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(state.vitals.hunger, 70.0);
        assert_eq!(state.vitals.health, 100.0);
        assert_eq!(effects.pop(), Some(Effect::GrantExperience(5)));
        assert_eq!(state.actions.count_kind(ActionKind::Feed), 1);
    }

    #[test]
    fn tired_pet_refuses_to_play() {
        let mut state = fresh();
        state.vitals.energy = 10.0;
        let before = state.clone();
        let (outcome, effects) = run(&PetAction::Play, &mut state);
        assert!(matches!(outcome, ActionOutcome::Skipped(SkipReason::TooTired { .. })));
        assert_eq!(state, before);
        assert!(effects.is_empty());
    }

    #[test]
    fn play_starts_a_session() {
        let mut state = fresh();
        let (_, _) = run(&PetAction::Play, &mut state);
        assert!(state.is_playing);
        assert_eq!(state.play_ends_at, Some(4_000));
        assert_eq!(state.vitals.energy, 80.0);
        assert_eq!(state.vitals.happiness, 100.0);
    }

    #[test]
    fn clean_resets_cleanliness() {
        let mut state = fresh();
        state.vitals.cleanliness = 12.0;
        state.vitals.health = 50.0;
        let _ = run(&PetAction::Clean, &mut state);
        assert_eq!(state.vitals.cleanliness, 100.0);
        assert_eq!(state.vitals.health, 60.0);
    }

    #[test]
    fn rest_toggles_sleep() {
        let mut state = fresh();
        let _ = run(&PetAction::Rest, &mut state);
        assert!(state.is_sleeping);
        assert_eq!(state.actions.last().map(|r| r.kind), Some(ActionKind::Sleep));
        let (_, effects) = run(&PetAction::Rest, &mut state);
        assert!(!state.is_sleeping);
        assert_eq!(state.actions.last().map(|r| r.kind), Some(ActionKind::Wake));
        assert!(effects.is_empty());
    }

    #[test]
    fn heal_cures_sickness() {
        let mut state = fresh();
        state.is_sick = true;
        state.vitals.health = 10.0;
        let (_, mut effects) = run(&PetAction::Heal, &mut state);
        assert!(!state.is_sick);
        assert_eq!(state.vitals.health, 100.0);
        assert_eq!(effects.pop(), Some(Effect::GrantExperience(20)));
    }

    #[test]
    fn skill_training_raises_one_skill() {
        let mut state = fresh();
        state.vitals.hunger = 40.0;
        let (outcome, effects) = run(&PetAction::TrainSkill(SkillKind::Charm), &mut state);
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(state.skills.charm, 15);
        assert_eq!(state.skills.agility, 10);
        assert_eq!(state.vitals.energy, 60.0);
        assert_eq!(state.vitals.hunger, 55.0);
        assert!(effects.is_empty());
        let description = state.actions.last().map(|r| r.description.as_str());
        assert_eq!(description, Some("Trained charm!"));
    }

    #[test]
    fn rename_trims_and_truncates() {
        let mut state = fresh();
        let long = format!("  {}  ", "x".repeat(40));
        let _ = run(&PetAction::Rename(long), &mut state);
        assert_eq!(state.name.chars().count(), 24);
        assert_eq!(state.actions.last().map(|r| r.kind), Some(ActionKind::Rename));
    }

    #[test]
    fn blank_rename_keeps_name() {
        let mut state = fresh();
        let (outcome, _) = run(&PetAction::Rename(String::from(" \t ")), &mut state);
        assert_eq!(outcome, ActionOutcome::Skipped(SkipReason::BlankName));
        assert_eq!(state.name, "Pip");
    }

    #[test]
    fn pat_raises_happiness_and_health() {
        let mut state = fresh();
        state.vitals.happiness = 50.0;
        state.vitals.health = 50.0;
        let _ = run(&PetAction::Interact(InteractionKind::Pat), &mut state);
        assert_eq!(state.vitals.happiness, 60.0);
        assert_eq!(state.vitals.health, 52.0);
    }

    #[test]
    fn double_click_costs_energy() {
        let mut state = fresh();
        state.vitals.happiness = 50.0;
        let _ = run(&PetAction::Interact(InteractionKind::DoubleClick), &mut state);
        assert_eq!(state.vitals.happiness, 65.0);
        assert_eq!(state.vitals.energy, 95.0);
    }

    #[test]
    fn drag_either_delights_or_dizzies() {
        let mut rng = SmallRng::seed_from_u64(99);
        let rules = PetRules::default();
        for _ in 0..50 {
            let mut state = fresh();
            state.vitals.happiness = 50.0;
            let mut effects = EffectQueue::new();
            let outcome = execute(
                &PetAction::Interact(InteractionKind::Drag),
                &mut state,
                &rules,
                1,
                &mut rng,
                &mut effects,
            );
            assert_eq!(outcome, ActionOutcome::Applied);
            assert!(state.vitals.happiness == 55.0 || state.vitals.happiness == 47.0);
        }
    }

    #[test]
    fn petting_eventually_wakes_a_sleeping_pet() {
        let mut rng = SmallRng::seed_from_u64(3);
        let rules = PetRules::default();
        let mut state = fresh();
        state.is_sleeping = true;
        let mut woke = false;
        for _ in 0..200 {
            let mut effects = EffectQueue::new();
            let outcome = execute(
                &PetAction::Interact(InteractionKind::Pet),
                &mut state,
                &rules,
                1,
                &mut rng,
                &mut effects,
            );
            if outcome.is_applied() {
                woke = true;
                break;
            }
            assert!(state.is_sleeping);
        }
        assert!(woke);
        assert!(!state.is_sleeping);
        let description = state.actions.last().map(|r| r.description.as_str());
        assert_eq!(description, Some("Woke up from the petting!"));
    }

    #[test]
    fn failed_wake_roll_leaves_state_unchanged() {
        let mut rng = SmallRng::seed_from_u64(11);
        let rules = PetRules::default();
        for _ in 0..100 {
            let mut state = fresh();
            state.is_sleeping = true;
            let before = state.clone();
            let mut effects = EffectQueue::new();
            let outcome = execute(
                &PetAction::Interact(InteractionKind::Pet),
                &mut state,
                &rules,
                1,
                &mut rng,
                &mut effects,
            );
            if !outcome.is_applied() {
                assert_eq!(state, before);
            }
        }
    }
}
