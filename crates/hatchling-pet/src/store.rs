//! The pet store: the single owner of a [`PetState`].
//!
//! Every public operation is one transition:
//!
//! 1. An expired play session ends
//! 2. The operation runs (action handler, decay, or direct grant) and
//!    queues derived [`Effect`]s
//! 3. The effect queue drains
//! 4. Achievements are evaluated; new unlocks queue effects, and 3-4 repeat
//!    until nothing changes
//! 5. Subscribed observers are notified once
//!
//! Each transition runs on a working copy that replaces the state only when
//! the whole transition succeeded, so observers and callers never see a
//! primary action without its derived effects.

use core::fmt;

use hatchling_types::{AchievementId, InteractionKind, PetAction, PetState, SkillKind};
use rand::Rng;
use tracing::{debug, info};

use crate::achievements;
use crate::actions::{ActionOutcome, handlers};
use crate::config::PetRules;
use crate::effects::{Effect, EffectQueue};
use crate::error::PetError;
use crate::leveling::{self, LevelGain};
use crate::vitals::{self, SicknessChange};

// ---------------------------------------------------------------------------
// Events and observers
// ---------------------------------------------------------------------------

/// Something that happened during a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A new pet was hatched, replacing any previous one.
    Initialized,
    /// An action passed its preconditions and ran.
    ActionApplied {
        /// The action that ran.
        action: PetAction,
        /// The log entry the action wrote, before any derived effects.
        description: String,
    },
    /// Decay was applied for this many milliseconds.
    Decayed {
        /// Wall-clock time applied.
        elapsed_ms: i64,
    },
    /// The pet fell sick or recovered.
    SicknessChanged(SicknessChange),
    /// The pet grew older by this many whole days.
    Aged(u32),
    /// Experience was added.
    ExperienceGained(u32),
    /// The pet gained one or more levels.
    LeveledUp(LevelGain),
    /// An achievement was unlocked.
    AchievementUnlocked(AchievementId),
    /// A play session ended.
    PlayEnded,
}

/// Result of one store operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The action's outcome, for operations that dispatch an action.
    pub outcome: Option<ActionOutcome>,
    /// Everything that changed, in order.
    pub events: Vec<StoreEvent>,
}

impl Transition {
    /// Whether the state changed.
    pub fn changed(&self) -> bool {
        !self.events.is_empty()
    }

    /// Levels reached during this transition.
    pub fn levels_reached(&self) -> impl Iterator<Item = u32> + '_ {
        self.events.iter().flat_map(|e| match e {
            StoreEvent::LeveledUp(gain) => gain.levels(),
            _ => LevelGain::none(0).levels(),
        })
    }

    /// Achievements unlocked during this transition.
    pub fn unlocked(&self) -> impl Iterator<Item = AchievementId> + '_ {
        self.events.iter().filter_map(|e| match e {
            StoreEvent::AchievementUnlocked(id) => Some(*id),
            _ => None,
        })
    }
}

/// Receives a notification after every transition that changed the pet.
pub trait StoreObserver: Send {
    /// Called once per transition with the committed state.
    fn on_change(&mut self, state: &PetState, events: &[StoreEvent]);
}

// ---------------------------------------------------------------------------
// PetStore
// ---------------------------------------------------------------------------

/// Owns the pet and applies every mutation as an atomic transition.
pub struct PetStore {
    state: PetState,
    rules: PetRules,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl fmt::Debug for PetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PetStore")
            .field("state", &self.state)
            .field("rules", &self.rules)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PetStore {
    /// Create a store around a freshly hatched default pet.
    pub fn new(rules: PetRules, now: i64) -> Self {
        Self::from_state(PetState::hatch(None, None, now), rules)
    }

    /// Create a store around an existing (restored) pet.
    pub fn from_state(state: PetState, rules: PetRules) -> Self {
        Self {
            state,
            rules,
            observers: Vec::new(),
        }
    }

    /// The current pet.
    pub const fn state(&self) -> &PetState {
        &self.state
    }

    /// Consume the store, returning the pet.
    pub fn into_state(self) -> PetState {
        self.state
    }

    /// When the current play session ends, if one is running.
    pub fn play_ends_at(&self) -> Option<i64> {
        self.state.play_ends_at.filter(|_| self.state.is_playing)
    }

    /// Register an observer for change notifications.
    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Hatch a new pet, replacing the current one.
    pub fn initialize(
        &mut self,
        name: Option<&str>,
        species: Option<&str>,
        now: i64,
    ) -> Result<Transition, PetError> {
        self.transition(now, |state, _, _, events| {
            *state = PetState::hatch(name, species, now);
            info!(name = %state.name, species = %state.species, "pet hatched");
            events.push(StoreEvent::Initialized);
            Ok(None)
        })
    }

    /// Dispatch a user action.
    ///
    /// A failed precondition yields `outcome: Some(Skipped(_))` and leaves
    /// the pet unchanged; that is not an error.
    pub fn dispatch(
        &mut self,
        action: &PetAction,
        now: i64,
        rng: &mut impl Rng,
    ) -> Result<Transition, PetError> {
        self.transition(now, |state, rules, effects, events| {
            let outcome = handlers::execute(action, state, rules, now, rng, effects);
            match outcome {
                ActionOutcome::Applied => {
                    debug!(action = action.label(), "action applied");
                    let description = state
                        .actions
                        .last()
                        .map(|record| record.description.clone())
                        .unwrap_or_default();
                    events.push(StoreEvent::ActionApplied {
                        action: action.clone(),
                        description,
                    });
                }
                ActionOutcome::Skipped(reason) => {
                    debug!(action = action.label(), %reason, "action skipped");
                }
            }
            Ok(Some(outcome))
        })
    }

    /// Feed the pet.
    pub fn feed(&mut self, now: i64) -> Result<Transition, PetError> {
        self.dispatch(&PetAction::Feed, now, &mut rand::rng())
    }

    /// Play with the pet.
    pub fn play(&mut self, now: i64) -> Result<Transition, PetError> {
        self.dispatch(&PetAction::Play, now, &mut rand::rng())
    }

    /// Bathe the pet.
    pub fn clean(&mut self, now: i64) -> Result<Transition, PetError> {
        self.dispatch(&PetAction::Clean, now, &mut rand::rng())
    }

    /// Toggle sleep.
    pub fn rest(&mut self, now: i64) -> Result<Transition, PetError> {
        self.dispatch(&PetAction::Rest, now, &mut rand::rng())
    }

    /// General training.
    pub fn train(&mut self, now: i64) -> Result<Transition, PetError> {
        self.dispatch(&PetAction::Train, now, &mut rand::rng())
    }

    /// Heal the pet.
    pub fn heal(&mut self, now: i64) -> Result<Transition, PetError> {
        self.dispatch(&PetAction::Heal, now, &mut rand::rng())
    }

    /// Train one skill.
    pub fn train_skill(&mut self, skill: SkillKind, now: i64) -> Result<Transition, PetError> {
        self.dispatch(&PetAction::TrainSkill(skill), now, &mut rand::rng())
    }

    /// Perform a gesture on the pet.
    pub fn interact(
        &mut self,
        kind: InteractionKind,
        now: i64,
        rng: &mut impl Rng,
    ) -> Result<Transition, PetError> {
        self.dispatch(&PetAction::Interact(kind), now, rng)
    }

    /// Rename the pet.
    pub fn rename(&mut self, name: &str, now: i64) -> Result<Transition, PetError> {
        self.dispatch(&PetAction::Rename(name.to_owned()), now, &mut rand::rng())
    }

    /// Apply the decay accumulated since the last update.
    pub fn update_state(&mut self, now: i64) -> Result<Transition, PetError> {
        self.transition(now, |state, rules, effects, events| {
            let report = vitals::apply_decay(state, rules, now);
            if report.is_noop() {
                return Ok(None);
            }
            if report.elapsed_ms > 0 {
                debug!(
                    elapsed_ms = report.elapsed_ms,
                    hunger = state.vitals.hunger,
                    energy = state.vitals.energy,
                    bonus_xp = report.bonus_xp,
                    "decay applied"
                );
                events.push(StoreEvent::Decayed {
                    elapsed_ms: report.elapsed_ms,
                });
            }
            if let Some(change) = report.sickness {
                info!(name = %state.name, ?change, "sickness changed");
                events.push(StoreEvent::SicknessChanged(change));
            }
            if report.days_aged > 0 {
                events.push(StoreEvent::Aged(report.days_aged));
            }
            effects.grant_experience(report.bonus_xp);
            Ok(None)
        })
    }

    /// Grant experience directly.
    pub fn gain_experience(&mut self, amount: u32, now: i64) -> Result<Transition, PetError> {
        self.transition(now, |_, _, effects, _| {
            effects.grant_experience(amount);
            Ok(None)
        })
    }

    /// Unlock an achievement directly. Already-unlocked ids are a no-op.
    pub fn unlock_achievement(
        &mut self,
        id: AchievementId,
        now: i64,
    ) -> Result<Transition, PetError> {
        self.transition(now, |_, _, effects, _| {
            effects.push(Effect::UnlockAchievement(id));
            Ok(None)
        })
    }

    /// Advance one level manually.
    pub fn force_level_up(&mut self, now: i64) -> Result<Transition, PetError> {
        self.transition(now, |state, rules, _, events| {
            let from = state.level;
            let level = leveling::force_level_up(state, rules, now)?;
            info!(level, "level up (manual)");
            events.push(StoreEvent::LeveledUp(LevelGain { from, to: level }));
            Ok(None)
        })
    }

    /// End the play session if its deadline has passed.
    pub fn expire_play(&mut self, now: i64) -> Result<Transition, PetError> {
        self.transition(now, |_, _, _, _| Ok(None))
    }

    // -----------------------------------------------------------------------
    // Transition machinery
    // -----------------------------------------------------------------------

    fn transition<F>(&mut self, now: i64, step: F) -> Result<Transition, PetError>
    where
        F: FnOnce(
            &mut PetState,
            &PetRules,
            &mut EffectQueue,
            &mut Vec<StoreEvent>,
        ) -> Result<Option<ActionOutcome>, PetError>,
    {
        let mut next = self.state.clone();
        let mut effects = EffectQueue::new();
        let mut events = Vec::new();

        if end_play_if_due(&mut next, now) {
            events.push(StoreEvent::PlayEnded);
        }

        let outcome = step(&mut next, &self.rules, &mut effects, &mut events)?;

        loop {
            while let Some(effect) = effects.pop() {
                apply_effect(&mut next, effect, &self.rules, now, &mut effects, &mut events)?;
            }
            let earned = achievements::evaluate(&next, &self.rules);
            if earned.is_empty() {
                break;
            }
            for id in earned {
                effects.push(Effect::UnlockAchievement(id));
            }
        }

        self.state = next;
        if !events.is_empty() {
            for observer in &mut self.observers {
                observer.on_change(&self.state, &events);
            }
        }
        Ok(Transition { outcome, events })
    }
}

/// Clear the playing flag once its deadline is reached.
fn end_play_if_due(state: &mut PetState, now: i64) -> bool {
    if !state.is_playing || state.play_ends_at.is_some_and(|end| end > now) {
        return false;
    }
    state.is_playing = false;
    state.play_ends_at = None;
    true
}

fn apply_effect(
    state: &mut PetState,
    effect: Effect,
    rules: &PetRules,
    now: i64,
    effects: &mut EffectQueue,
    events: &mut Vec<StoreEvent>,
) -> Result<(), PetError> {
    match effect {
        Effect::GrantExperience(amount) => {
            let gain = leveling::gain_experience(state, amount, rules, now)?;
            events.push(StoreEvent::ExperienceGained(amount));
            if !gain.is_empty() {
                info!(from = gain.from, to = gain.to, "level up");
                events.push(StoreEvent::LeveledUp(gain));
            }
        }
        Effect::UnlockAchievement(id) => {
            if achievements::unlock(state, id, rules, now) {
                info!(achievement = %id, "achievement unlocked");
                events.push(StoreEvent::AchievementUnlocked(id));
                effects.grant_experience(rules.achievement_reward);
            }
        }
    }
    Ok(())
}
