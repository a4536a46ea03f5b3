use serde::{Deserialize, Serialize};

/// Logical timestamp in milliseconds since the scheduler's clock origin.
///
/// The engine never reads a wall clock. Drivers translate real time into
/// ticks; tests move ticks by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Tick {
    pub ms: u64,
}

impl Tick {
    pub const ZERO: Tick = Tick { ms: 0 };

    pub fn new() -> Self {
        Self::ZERO
    }

    pub fn at(ms: u64) -> Self {
        Tick { ms }
    }

    pub fn after(&self, delay_ms: u64) -> Self {
        Tick { ms: self.ms.saturating_add(delay_ms) }
    }

    pub fn since(&self, earlier: Tick) -> u64 {
        self.ms.saturating_sub(earlier.ms)
    }
}
