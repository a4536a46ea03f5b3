use serde::Serialize;

use super::cancel::Generation;
use crate::script::ScriptKey;

/// Change notifications pushed to the host after each state transition.
/// The host re-renders from [`PlaybackState`](super::state::PlaybackState);
/// these say what changed, not what to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PlaybackEvent {
    Started {
        generation: Generation,
        key: ScriptKey,
        turns: usize,
    },
    Cancelled {
        generation: Generation,
    },
    TypingStarted {
        cursor: usize,
    },
    DraftGrew {
        cursor: usize,
        chars: usize,
    },
    TurnCommitted {
        index: usize,
    },
    /// Script exhausted; the loop pause has begun.
    LoopPaused {
        loop_delay_ms: u64,
    },
    LoopReset {
        loops: u64,
    },
}
