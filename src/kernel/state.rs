use serde::Serialize;

use crate::script::Turn;

/// Strict state delta. This is the ONLY way playback state mutates.
#[derive(Debug, Clone)]
pub enum StateDelta {
    /// Fresh run: nothing revealed, cursor at 0.
    Reset,
    TypingStarted,
    DraftGrew(String),
    /// Typing finished and the turn is appended.
    TurnCommitted(Turn),
    /// Loop pause elapsed; the conversation clears for the next cycle.
    LoopReset,
}

/// What the host renders. Read-only outside the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaybackState {
    revealed: Vec<Turn>,
    typing: bool,
    cursor: usize,
    /// Live prefix of the turn being typed, for roles configured to reveal.
    draft: String,
    /// Completed cycles in the current generation.
    loops: u64,
    // Monotonic mutation counter.
    version: u64,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revealed(&self) -> &[Turn] {
        &self.revealed
    }

    pub fn typing(&self) -> bool {
        self.typing
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn loops(&self) -> u64 {
        self.loops
    }

    /// Monotonic mutation counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Pure reduction: State + Delta -> Mutated State
    pub fn reduce(&mut self, delta: StateDelta) {
        self.version += 1;

        match delta {
            StateDelta::Reset => {
                self.revealed.clear();
                self.typing = false;
                self.cursor = 0;
                self.draft.clear();
                self.loops = 0;
            }
            StateDelta::TypingStarted => {
                self.typing = true;
                self.draft.clear();
            }
            StateDelta::DraftGrew(prefix) => {
                self.draft = prefix;
            }
            StateDelta::TurnCommitted(turn) => {
                self.typing = false;
                self.draft.clear();
                self.revealed.push(turn);
                self.cursor = self.revealed.len();
            }
            StateDelta::LoopReset => {
                self.revealed.clear();
                self.cursor = 0;
                self.loops += 1;
            }
        }
    }
}
