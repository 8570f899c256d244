//! Terminal rendering of the pet.
//!
//! [`TerminalObserver`] prints the notable events of every transition as
//! it is committed, including the ones the decay timer causes while the
//! user is idle.

use std::fmt::Write as _;
use std::io::Write as _;

use hatchling_pet::{Mood, SicknessChange, StatusBand, StoreEvent, StoreObserver};
use hatchling_types::{AchievementId, PetState};

/// Prints store events to stdout.
#[derive(Debug, Default)]
pub struct TerminalObserver;

impl StoreObserver for TerminalObserver {
    fn on_change(&mut self, state: &PetState, events: &[StoreEvent]) {
        let lines = describe_events(state, events);
        if lines.is_empty() {
            return;
        }
        let mut out = std::io::stdout().lock();
        for line in lines {
            // Nothing useful to do if the terminal is gone.
            let _ = writeln!(out, "{line}");
        }
    }
}

/// The lines worth showing for one transition. Decay on its own is silent.
pub fn describe_events(state: &PetState, events: &[StoreEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            StoreEvent::Initialized => Some(format!(
                "{} the {} has hatched!",
                state.name, state.species
            )),
            StoreEvent::ActionApplied { description, .. } => {
                Some(format!("{}: {description}", state.name))
            }
            StoreEvent::SicknessChanged(SicknessChange::FellSick) => {
                Some(format!("{} has fallen sick. Try `heal`.", state.name))
            }
            StoreEvent::SicknessChanged(SicknessChange::Recovered) => {
                Some(format!("{} is feeling better.", state.name))
            }
            StoreEvent::Aged(_) => Some(format!(
                "{} is now {} day{} old.",
                state.name,
                state.age,
                if state.age == 1 { "" } else { "s" }
            )),
            StoreEvent::LeveledUp(gain) => {
                Some(format!("Level up! {} is level {}.", state.name, gain.to))
            }
            StoreEvent::AchievementUnlocked(id) => Some(format!("Achievement unlocked: {}", id.title())),
            StoreEvent::PlayEnded => Some(format!("{} is done playing.", state.name)),
            StoreEvent::Decayed { .. } | StoreEvent::ExperienceGained(_) => None,
        })
        .collect()
}

/// Multi-line summary used by the `status` command.
pub fn render_status(state: &PetState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} the {} | level {} ({}/{} XP) | age {} | {}",
        state.name,
        state.species,
        state.level,
        state.experience,
        state.experience_to_next_level(),
        state.age,
        Mood::of(state)
    );
    let v = &state.vitals;
    for (label, value) in [
        ("fullness", v.hunger),
        ("health", v.health),
        ("happiness", v.happiness),
        ("energy", v.energy),
        ("cleanliness", v.cleanliness),
    ] {
        let _ = writeln!(out, "  {label:<12}{value:>6.1}  {}", band_label(StatusBand::of(value)));
    }
    let s = &state.skills;
    let _ = writeln!(
        out,
        "  skills      intelligence {} | agility {} | strength {} | charm {}",
        s.intelligence, s.agility, s.strength, s.charm
    );
    let _ = write!(
        out,
        "  achievements {}/{}",
        state.achievements.len(),
        AchievementId::ALL.len()
    );
    out
}

const fn band_label(band: StatusBand) -> &'static str {
    match band {
        StatusBand::Good => "good",
        StatusBand::Fair => "fair",
        StatusBand::Poor => "poor",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hatchling_pet::{PetRules, PetStore};

    use super::*;

    #[test]
    fn decay_alone_prints_nothing() {
        let state = PetState::hatch(None, None, 0);
        let events = [
            StoreEvent::Decayed { elapsed_ms: 60_000 },
            StoreEvent::ExperienceGained(1),
        ];
        assert!(describe_events(&state, &events).is_empty());
    }

    #[test]
    fn feeding_a_fresh_pet_shows_the_meal_then_the_unlock() {
        let mut store = PetStore::new(PetRules::default(), 1_000);
        let transition = store.feed(1_000).unwrap();
        let lines = describe_events(store.state(), &transition.events);
        assert_eq!(
            lines,
            vec![
                "Little Pet: Yum, fed successfully!".to_owned(),
                "Achievement unlocked: First Meal".to_owned(),
            ]
        );
    }

    #[test]
    fn action_line_survives_a_level_up() {
        let mut state = PetState::hatch(Some("Miso"), None, 1_000);
        state.experience = 95;
        let _ = state.achievements.insert(AchievementId::FirstFeed);
        let mut store = PetStore::from_state(state, PetRules::default());
        let transition = store.feed(1_000).unwrap();
        let lines = describe_events(store.state(), &transition.events);
        assert_eq!(
            lines.first().map(String::as_str),
            Some("Miso: Yum, fed successfully!")
        );
        assert!(lines.contains(&"Level up! Miso is level 2.".to_owned()));
    }

    #[test]
    fn status_lists_every_vital() {
        let mut state = PetState::hatch(Some("Miso"), None, 0);
        state.vitals.energy = 35.0;
        let text = render_status(&state);
        assert!(text.starts_with("Miso the Kitten | level 1 (0/100 XP) | age 0 | happy"));
        assert!(text.contains("energy"));
        assert!(text.contains("35.0  poor"));
        assert!(text.ends_with("achievements 0/11"));
    }
}
