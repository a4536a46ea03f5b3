use serde::{Deserialize, Serialize};
use std::fmt;

/// Playback epoch. Bumped on every start and cancel.
///
/// Every deferred callback carries the generation it was scheduled under and
/// is inert once the live generation moves on. Unlike a boolean "playing"
/// flag, this also tells "restarted twice" apart from "cancelled then
/// restarted".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Advances the epoch and returns the new value.
    pub fn bump(&mut self) -> Generation {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    pub fn is_current(&self, live: Generation) -> bool {
        *self == live
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}
