//! Derived side effects of a transition.
//!
//! Handlers and the decay engine never grant experience or unlock
//! achievements directly. They push an [`Effect`] and the store drains the
//! queue before the transition becomes visible, so a primary action and
//! everything it causes land together.

use std::collections::VecDeque;

use hatchling_types::AchievementId;

/// A follow-up mutation produced during a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Add experience, possibly leveling up.
    GrantExperience(u32),
    /// Unlock an achievement if it is still locked.
    UnlockAchievement(AchievementId),
}

/// FIFO queue of pending effects for one transition.
#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    pending: VecDeque<Effect>,
}

impl EffectQueue {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Schedule an effect.
    pub fn push(&mut self, effect: Effect) {
        self.pending.push_back(effect);
    }

    /// Schedule an experience grant. Zero amounts are dropped.
    pub fn grant_experience(&mut self, amount: u32) {
        if amount > 0 {
            self.push(Effect::GrantExperience(amount));
        }
    }

    /// Take the oldest pending effect.
    pub fn pop(&mut self) -> Option<Effect> {
        self.pending.pop_front()
    }

    /// Number of pending effects.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
