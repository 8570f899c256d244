//! Time-based vital mechanics.
//!
//! [`apply_decay`] projects the wall-clock time elapsed since
//! `last_update` onto the pet:
//!
//! - Every vital decays linearly with elapsed minutes. Intelligence slows
//!   hunger and health decay; charm slows happiness decay.
//! - A sleeping pet regains energy (faster with agility) and grows hungrier.
//! - Sickness is re-derived from the decayed vitals. Only a transition
//!   writes to the log.
//! - Age advances by whole days; the remainder carries over.
//! - A thriving pet earns bonus experience per hour, returned to the caller
//!   so the store can grant it through its effect queue.
//!
//! The function is deterministic in `now`. Zero elapsed time leaves a
//! consistent state untouched.

use hatchling_types::{ActionKind, ActionRecord, PetState, Vitals, clamp_stat};

use crate::config::PetRules;

/// Milliseconds in one minute.
pub const MS_PER_MINUTE: i64 = 60_000;

/// Milliseconds in one day of pet age.
pub const MS_PER_DAY: i64 = 86_400_000;

/// A change in the pet's sickness flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SicknessChange {
    /// The pet was healthy and is now sick.
    FellSick,
    /// The pet was sick and is now well.
    Recovered,
}

/// Result of applying decay for one interval.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayReport {
    /// Milliseconds of wall-clock time that were applied.
    pub elapsed_ms: i64,
    /// Sickness transition, if one occurred.
    pub sickness: Option<SicknessChange>,
    /// Whole days added to the pet's age.
    pub days_aged: u32,
    /// Bonus experience earned by a thriving pet. Not yet granted.
    pub bonus_xp: u32,
}

impl DecayReport {
    /// Whether anything at all happened.
    pub const fn is_noop(&self) -> bool {
        self.elapsed_ms == 0 && self.sickness.is_none() && self.days_aged == 0 && self.bonus_xp == 0
    }
}

/// Add `delta` to a vital and clamp the result into `[0, 100]`.
pub fn adjust(value: f64, delta: f64) -> f64 {
    clamp_stat(value + delta)
}

/// Whether the vitals meet any sickness condition.
///
/// Sick when health is below [`PetRules::sick_health_below`], the pet is
/// starving (hunger at 0), or cleanliness is below
/// [`PetRules::sick_cleanliness_below`].
pub fn sickness_condition(vitals: &Vitals, rules: &PetRules) -> bool {
    vitals.health < rules.sick_health_below
        || vitals.hunger <= 0.0
        || vitals.cleanliness < rules.sick_cleanliness_below
}

/// Whether the pet is thriving: hunger, health, happiness, and cleanliness
/// all above [`PetRules::thriving_threshold`]. Energy does not count.
pub fn is_thriving(vitals: &Vitals, rules: &PetRules) -> bool {
    let t = rules.thriving_threshold;
    vitals.hunger > t && vitals.health > t && vitals.happiness > t && vitals.cleanliness > t
}

/// Apply the decay accumulated between `state.last_update` and `now`.
///
/// # Order of operations
///
/// 1. Decay every vital, modulated by skills, and clamp
/// 2. Apply sleep regeneration and sleep hunger
/// 3. Re-derive sickness; log a transition
/// 4. Age by whole elapsed days
/// 5. Compute the thriving bonus
/// 6. Advance `last_update`
///
/// A `now` earlier than `last_update` applies nothing and leaves
/// `last_update` where it was.
pub fn apply_decay(state: &mut PetState, rules: &PetRules, now: i64) -> DecayReport {
    let elapsed_ms = now.saturating_sub(state.last_update).max(0);
    let minutes = millis_to_minutes(elapsed_ms);
    let hours = minutes / 60.0;

    // 1. Linear decay
    let intelligence = rules.intelligence_factor(state.skills.intelligence);
    let charm = rules.charm_factor(state.skills.charm);
    let vitals = &mut state.vitals;
    vitals.hunger -= rules.decay.hunger * minutes * intelligence;
    vitals.health -= rules.decay.health * minutes * intelligence;
    vitals.happiness -= rules.decay.happiness * minutes / charm;
    vitals.energy -= rules.decay.energy * minutes;
    vitals.cleanliness -= rules.decay.cleanliness * minutes;
    vitals.clamp_all();

    // 2. Sleep
    if state.is_sleeping {
        let agility = rules.agility_factor(state.skills.agility);
        vitals.energy = adjust(vitals.energy, minutes * rules.sleep_energy_regen * agility);
        vitals.hunger = adjust(vitals.hunger, -(minutes * rules.sleep_hunger_drain));
        state.total_sleep_minutes += minutes;
    }

    // 3. Sickness
    let sickness = update_sickness(state, rules, now);

    // 4. Age
    let carried = state.age_carry_ms.max(0).saturating_add(elapsed_ms);
    let days = u32::try_from(carried.checked_div(MS_PER_DAY).unwrap_or(0)).unwrap_or(u32::MAX);
    state.age_carry_ms = carried.checked_rem(MS_PER_DAY).unwrap_or(0);
    state.age = state.age.saturating_add(days);

    // 5. Thriving bonus
    let bonus_xp = if elapsed_ms > 0 && is_thriving(&state.vitals, rules) {
        whole_xp(hours * rules.thriving_xp_per_hour)
    } else {
        0
    };

    // 6. Clock
    state.last_update = state.last_update.max(now);

    DecayReport {
        elapsed_ms,
        sickness,
        days_aged: days,
        bonus_xp,
    }
}

/// Re-derive the sickness flag, logging exactly one entry on a transition.
fn update_sickness(state: &mut PetState, rules: &PetRules, now: i64) -> Option<SicknessChange> {
    let sick = sickness_condition(&state.vitals, rules);
    if sick == state.is_sick {
        return None;
    }
    state.is_sick = sick;
    let (change, description) = if sick {
        (
            SicknessChange::FellSick,
            format!("{} got sick! Needs treatment.", state.name),
        )
    } else {
        (
            SicknessChange::Recovered,
            format!("{} feels better!", state.name),
        )
    };
    state
        .actions
        .push(ActionRecord::new(ActionKind::Status, now, description));
    Some(change)
}

/// Convert milliseconds to fractional minutes.
#[allow(clippy::cast_precision_loss)] // Elapsed spans far below 2^52 ms.
fn millis_to_minutes(ms: i64) -> f64 {
    ms as f64 / MS_PER_MINUTE as f64
}

/// Floor a non-negative experience amount into a `u32`, saturating.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Range checked above.
fn whole_xp(amount: f64) -> u32 {
    let floored = amount.floor();
    if floored.is_nan() || floored < 1.0 {
        0
    } else if floored >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        floored as u32
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    const START: i64 = 1_700_000_000_000;

    fn test_state() -> PetState {
        PetState::hatch(Some("Mochi"), None, START)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_elapsed_changes_nothing() {
        let mut state = test_state();
        let before = state.clone();
        let report = apply_decay(&mut state, &PetRules::default(), START);
        assert!(report.is_noop());
        assert_eq!(state, before);
    }

    #[test]
    fn ten_minutes_of_decay_awake() {
        let mut state = test_state();
        state.vitals.energy = 50.0;
        let rules = PetRules::default();
        let _ = apply_decay(&mut state, &rules, START + 10 * MS_PER_MINUTE);
        // intelligence 10 -> factor 0.97; charm 10 -> factor 1.02
        assert!(close(state.vitals.hunger, 50.0 - 10.0 * 0.97));
        assert!(close(state.vitals.health, 100.0 - 5.0 * 0.97));
        assert!(close(state.vitals.happiness, 80.0 - 8.0 / 1.02));
        assert!(close(state.vitals.energy, 38.0));
        assert!(close(state.vitals.cleanliness, 93.0));
        assert_eq!(state.last_update, START + 10 * MS_PER_MINUTE);
    }

    #[test]
    fn sleeping_restores_energy_and_drains_hunger() {
        let rules = PetRules::default();
        let mut awake = test_state();
        awake.vitals.energy = 50.0;
        let mut asleep = awake.clone();
        asleep.is_sleeping = true;

        let now = START + 10 * MS_PER_MINUTE;
        let _ = apply_decay(&mut awake, &rules, now);
        let _ = apply_decay(&mut asleep, &rules, now);

        assert!(asleep.vitals.energy > awake.vitals.energy);
        assert!(asleep.vitals.hunger < awake.vitals.hunger);
        // agility 10 -> factor 1.05: 38 + 10 * 3 * 1.05
        assert!(close(asleep.vitals.energy, 69.5));
        assert!(close(asleep.total_sleep_minutes, 10.0));
        assert!(close(awake.total_sleep_minutes, 0.0));
    }

    #[test]
    fn vitals_never_go_negative() {
        let mut state = test_state();
        let _ = apply_decay(&mut state, &PetRules::default(), START + 30 * MS_PER_DAY);
        for v in state.vitals.as_array() {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn falling_sick_logs_once() {
        let rules = PetRules::default();
        let mut state = test_state();
        state.vitals.cleanliness = 20.5;
        let log_len = state.actions.len();

        let report = apply_decay(&mut state, &rules, START + MS_PER_MINUTE);
        assert_eq!(report.sickness, Some(SicknessChange::FellSick));
        assert!(state.is_sick);
        assert_eq!(state.actions.len(), log_len + 1);
        assert_eq!(state.actions.last().map(|r| r.kind), Some(ActionKind::Status));

        // Still sick: steady state, no further entry.
        let report = apply_decay(&mut state, &rules, START + 2 * MS_PER_MINUTE);
        assert_eq!(report.sickness, None);
        assert_eq!(state.actions.len(), log_len + 1);
    }

    #[test]
    fn starving_pet_is_sick() {
        let rules = PetRules::default();
        let mut state = test_state();
        state.vitals.hunger = 0.5;
        let _ = apply_decay(&mut state, &rules, START + MS_PER_MINUTE);
        assert_eq!(state.vitals.hunger, 0.0);
        assert!(state.is_sick);
    }

    #[test]
    fn recovery_is_logged() {
        let rules = PetRules::default();
        let mut state = test_state();
        state.is_sick = true;
        let report = apply_decay(&mut state, &rules, START + MS_PER_MINUTE);
        assert_eq!(report.sickness, Some(SicknessChange::Recovered));
        assert!(!state.is_sick);
        let description = state.actions.last().map(|r| r.description.clone()).unwrap();
        assert_eq!(description, "Mochi feels better!");
    }

    #[test]
    fn age_accumulates_across_minute_ticks() {
        let rules = PetRules::default();
        let mut state = test_state();
        state.vitals.hunger = 100.0;
        let mut now = START;
        for _ in 0..(24 * 60) {
            now += MS_PER_MINUTE;
            let _ = apply_decay(&mut state, &rules, now);
        }
        assert_eq!(state.age, 1);
        assert_eq!(state.age_carry_ms, 0);
    }

    #[test]
    fn long_absence_ages_by_whole_days() {
        let rules = PetRules::default();
        let mut state = test_state();
        let report = apply_decay(&mut state, &rules, START + 3 * MS_PER_DAY + 5);
        assert_eq!(report.days_aged, 3);
        assert_eq!(state.age, 3);
        assert_eq!(state.age_carry_ms, 5);
    }

    #[test]
    fn thriving_pet_earns_bonus_xp() {
        let mut rules = PetRules::default();
        rules.decay = crate::config::DecayRates {
            hunger: 0.0,
            health: 0.0,
            happiness: 0.0,
            energy: 0.0,
            cleanliness: 0.0,
        };
        let mut state = test_state();
        state.vitals.hunger = 90.0;
        let report = apply_decay(&mut state, &rules, START + 150 * MS_PER_MINUTE);
        // 2.5 hours * 3 = 7.5 -> 7
        assert_eq!(report.bonus_xp, 7);
    }

    #[test]
    fn unhappy_pet_earns_no_bonus() {
        let mut state = test_state();
        state.vitals.happiness = 40.0;
        state.vitals.hunger = 90.0;
        let report = apply_decay(&mut state, &PetRules::default(), START + 60 * MS_PER_MINUTE);
        assert_eq!(report.bonus_xp, 0);
    }

    #[test]
    fn backwards_clock_is_ignored() {
        let mut state = test_state();
        let before = state.clone();
        let report = apply_decay(&mut state, &PetRules::default(), START - MS_PER_DAY);
        assert!(report.is_noop());
        assert_eq!(state, before);
    }

    #[test]
    fn whole_xp_floors_and_saturates() {
        assert_eq!(whole_xp(0.99), 0);
        assert_eq!(whole_xp(2.7), 2);
        assert_eq!(whole_xp(-4.0), 0);
        assert_eq!(whole_xp(f64::NAN), 0);
        assert_eq!(whole_xp(1e20), u32::MAX);
    }
}
