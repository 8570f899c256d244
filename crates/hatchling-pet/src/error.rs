//! Error types for the hatchling-pet crate.
//!
//! Refused actions (too tired, asleep, blank name) are not errors; they are
//! reported as skipped outcomes. Errors here are reserved for arithmetic
//! that cannot be represented.

/// Errors that can occur during pet state operations.
#[derive(Debug, thiserror::Error)]
pub enum PetError {
    /// An arithmetic overflow occurred in an experience or level computation.
    #[error("arithmetic overflow in pet computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}

impl PetError {
    /// Build an [`PetError::ArithmeticOverflow`] from a static description.
    pub(crate) fn overflow(context: &str) -> Self {
        Self::ArithmeticOverflow {
            context: String::from(context),
        }
    }
}
