//! Guarded action transitions.
//!
//! # Submodules
//!
//! - [`costs`] -- Vital deltas, thresholds, and experience per action.
//! - [`validation`] -- Precondition checks.
//! - [`handlers`] -- Execution logic for each action.

pub mod costs;
pub mod handlers;
pub mod validation;

pub use validation::SkipReason;

/// Result of dispatching one action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    /// The action ran and changed the pet.
    Applied,
    /// A precondition failed; the pet is unchanged and nothing was logged.
    Skipped(SkipReason),
}

impl ActionOutcome {
    /// Whether the action ran.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
