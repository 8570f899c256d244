//! Experience tracking and level-up mechanics.
//!
//! Experience accumulates additively from every source: actions, the
//! thriving bonus, and achievement rewards. Advancing from level N to
//! N+1 costs `N * 100` experience. A single large grant can pay for several
//! level-ups; all of them are priced at the level the grant started from,
//! so 250 experience at level 1 buys two levels and leaves 50.
//!
//! Each level gained adds [`PetRules::level_up_skill_bonus`] to all four
//! skills and appends a `levelup` log entry.

use hatchling_types::{ACTION_LOG_CAPACITY, ActionKind, ActionRecord, PetState};

use crate::config::PetRules;
use crate::error::PetError;

// ---------------------------------------------------------------------------
// Experience rewards
// ---------------------------------------------------------------------------

/// Experience required per level: advancing from level N costs `N * 100`.
pub const XP_PER_LEVEL: u32 = 100;

/// Experience awarded for feeding.
pub const XP_FEED: u32 = 5;

/// Experience awarded for playing.
pub const XP_PLAY: u32 = 10;

/// Experience awarded for cleaning.
pub const XP_CLEAN: u32 = 5;

/// Experience awarded for a training session.
pub const XP_TRAIN: u32 = 15;

/// Experience awarded for healing.
pub const XP_HEAL: u32 = 20;

/// Experience occasionally awarded for petting.
pub const XP_PET_BONUS: u32 = 3;

/// Return the experience needed to advance past `level`.
pub fn level_threshold(level: u32) -> Result<u32, PetError> {
    level
        .checked_mul(XP_PER_LEVEL)
        .ok_or_else(|| PetError::overflow("level threshold overflow"))
}

/// Levels gained by one grant: every level in `from + 1 ..= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGain {
    /// Level before the grant.
    pub from: u32,
    /// Level after the grant.
    pub to: u32,
}

impl LevelGain {
    /// A gain of zero levels at `level`.
    pub const fn none(level: u32) -> Self {
        Self {
            from: level,
            to: level,
        }
    }

    /// Whether no level was gained.
    pub const fn is_empty(self) -> bool {
        self.to <= self.from
    }

    /// Number of levels gained.
    pub const fn count(self) -> u32 {
        self.to.saturating_sub(self.from)
    }

    /// Each level reached, in order.
    pub fn levels(self) -> impl Iterator<Item = u32> {
        (self.from..self.to).map(|level| level.saturating_add(1))
    }
}

/// Add experience and apply every level-up it pays for.
pub fn gain_experience(
    state: &mut PetState,
    amount: u32,
    rules: &PetRules,
    now: i64,
) -> Result<LevelGain, PetError> {
    if amount == 0 {
        return Ok(LevelGain::none(state.level));
    }
    state.experience = state
        .experience
        .checked_add(amount)
        .ok_or_else(|| PetError::overflow("experience overflow"))?;
    apply_level_ups(state, rules, now)
}

/// Convert banked experience into levels until it falls below the
/// threshold of the current level.
///
/// Every level-up in one call costs the threshold of the level the call
/// started at, so on return `experience < level * 100` holds. The whole
/// gain is computed in one step; only the last [`ACTION_LOG_CAPACITY`]
/// levels get a log entry.
///
/// A level of 0 (only possible in a hand-edited snapshot) is raised to 1
/// first.
pub fn apply_level_ups(
    state: &mut PetState,
    rules: &PetRules,
    now: i64,
) -> Result<LevelGain, PetError> {
    if state.level == 0 {
        state.level = 1;
    }

    let from = state.level;
    let threshold = level_threshold(from)?;
    let gained = state
        .experience
        .checked_div(threshold)
        .ok_or_else(|| PetError::overflow("level threshold is zero"))?;
    if gained == 0 {
        return Ok(LevelGain::none(from));
    }

    state.experience = state
        .experience
        .checked_rem(threshold)
        .ok_or_else(|| PetError::overflow("level threshold is zero"))?;
    state.level = from
        .checked_add(gained)
        .ok_or_else(|| PetError::overflow("level increment overflow"))?;
    state
        .skills
        .raise_all(rules.level_up_skill_bonus.saturating_mul(gained));

    let gain = LevelGain {
        from,
        to: state.level,
    };
    let logged = u32::try_from(ACTION_LOG_CAPACITY).unwrap_or(u32::MAX);
    for level in gain.levels().skip(usize::try_from(gained.saturating_sub(logged)).unwrap_or(0)) {
        state.actions.push(ActionRecord::new(
            ActionKind::LevelUp,
            now,
            format!("Level up! Now level {level}"),
        ));
    }

    Ok(gain)
}

/// Manually advance one level.
///
/// Adds [`PetRules::manual_level_up_skill_bonus`] to every skill. Banked
/// experience is left alone; the higher threshold keeps it below the next
/// level. Returns the new level.
pub fn force_level_up(state: &mut PetState, rules: &PetRules, now: i64) -> Result<u32, PetError> {
    state.level = state
        .level
        .checked_add(1)
        .ok_or_else(|| PetError::overflow("level increment overflow"))?;
    state.skills.raise_all(rules.manual_level_up_skill_bonus);
    state.actions.push(ActionRecord::new(
        ActionKind::LevelUp,
        now,
        format!("Level up! Now level {}", state.level),
    ));
    Ok(state.level)
}
