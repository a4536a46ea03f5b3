use std::collections::BTreeMap;

use super::cancel::Generation;
use super::time::Tick;

/// What a timer does when it fires. Each variant carries the cursor it was
/// scheduled for so the scheduler can refuse work that no longer lines up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Show the first `chars` characters of the turn at `cursor`.
    RevealChar { cursor: usize, chars: usize },
    /// Typing of the turn at `cursor` is finished; commit it.
    TypingDone { cursor: usize },
    /// Post-delay elapsed; begin typing the turn at `cursor`.
    NextStep { cursor: usize },
    /// Loop pause elapsed; clear and restart from turn 0.
    LoopRestart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub deadline: Tick,
    pub generation: Generation,
    pub kind: TimerKind,
}

impl Timer {
    pub fn is_reveal(&self) -> bool {
        matches!(self.kind, TimerKind::RevealChar { .. })
    }
}

/// Pending timers owned by exactly one scheduler.
///
/// Ordered by deadline, then by scheduling order, so timers sharing a
/// deadline fire first-in first-out.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: BTreeMap<(Tick, u64), Timer>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, timer: Timer) {
        self.seq += 1;
        self.entries.insert((timer.deadline, self.seq), timer);
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops the pending reveal ticks as a group.
    pub fn clear_reveal(&mut self) {
        self.entries.retain(|_, t| !t.is_reveal());
    }

    pub fn next_deadline(&self) -> Option<Tick> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Tick) -> Option<Timer> {
        let key = *self.entries.keys().next()?;
        if key.0 > now {
            return None;
        }
        self.entries.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timer> {
        self.entries.values()
    }
}
