//! Display-only views derived from the pet state.

use core::fmt;

use hatchling_types::PetState;

/// The pet's overall mood, derived on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    /// The sickness flag is set.
    Sick,
    /// Asleep.
    Sleeping,
    /// In a play session.
    Playing,
    /// Health below 30.
    Unwell,
    /// Fullness below 20.
    Hungry,
    /// Happiness above 70.
    Happy,
    /// Happiness above 30.
    Content,
    /// Anything else.
    Sad,
}

impl Mood {
    /// Derive the mood: the first matching condition wins.
    pub fn of(state: &PetState) -> Self {
        let v = &state.vitals;
        if state.is_sick {
            Self::Sick
        } else if state.is_sleeping {
            Self::Sleeping
        } else if state.is_playing {
            Self::Playing
        } else if v.health < 30.0 {
            Self::Unwell
        } else if v.hunger < 20.0 {
            Self::Hungry
        } else if v.happiness > 70.0 {
            Self::Happy
        } else if v.happiness > 30.0 {
            Self::Content
        } else {
            Self::Sad
        }
    }

    /// Lowercase label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sick => "sick",
            Self::Sleeping => "sleeping",
            Self::Playing => "playing",
            Self::Unwell => "unwell",
            Self::Hungry => "hungry",
            Self::Happy => "happy",
            Self::Content => "content",
            Self::Sad => "sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse band for a single vital, used to color status bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBand {
    /// 70 and above.
    Good,
    /// 40 up to 70.
    Fair,
    /// Below 40.
    Poor,
}

impl StatusBand {
    /// Classify a vital value.
    pub fn of(value: f64) -> Self {
        if value >= 70.0 {
            Self::Good
        } else if value >= 40.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}
