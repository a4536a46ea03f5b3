use serde::{Deserialize, Serialize};

use crate::kernel::cancel::Generation;
use crate::kernel::timer::TimerKind;

// Allowed: IDs, Generations, Durations, Counts, Enums
// Forbidden: Turn text, metric labels/values, action labels

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TelemetryEvent {
    Started {
        generation: Generation,
        turns: usize,
    },

    Cancelled {
        generation: Generation,
        cursor: usize,
    },

    TurnCommitted {
        generation: Generation,
        index: usize,
        typing_ms: u64,
    },

    LoopCompleted {
        generation: Generation,
        loops: u64,
    },

    /// A timer from an older generation fired. Expected during restarts.
    StaleTimerIgnored {
        captured: Generation,
        live: Generation,
        kind: TimerKindTag,
    },

    /// A step tried to run out of turn and was refused.
    ReentrancyRejected {
        generation: Generation,
        cursor: usize,
        revealed: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKindTag {
    RevealChar,
    TypingDone,
    NextStep,
    LoopRestart,
}

impl From<&TimerKind> for TimerKindTag {
    fn from(kind: &TimerKind) -> Self {
        match kind {
            TimerKind::RevealChar { .. } => TimerKindTag::RevealChar,
            TimerKind::TypingDone { .. } => TimerKindTag::TypingDone,
            TimerKind::NextStep { .. } => TimerKindTag::NextStep,
            TimerKind::LoopRestart => TimerKindTag::LoopRestart,
        }
    }
}
