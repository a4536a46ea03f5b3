use crate::error::ScriptError;
use crate::kernel::config::RevealConfig;
use crate::kernel::time::Tick;

/// Result of applying one reveal tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Prefix grew to `chars` characters.
    Grew { chars: usize },
    /// The full text is visible. Emitted once.
    Done,
    /// Cancelled, already done, or a tick that would not grow the prefix.
    Ignored,
}

/// Incrementally reveals one string.
///
/// The revealer only holds the text and how much of it is visible; it does
/// not own timers. [`Revealer::schedule`] yields one deadline per character,
/// which the owner queues under its own generation so the whole group can be
/// dropped at once.
#[derive(Debug, Clone)]
pub struct Revealer {
    text: String,
    // Byte offset just past each character.
    ends: Vec<usize>,
    shown: usize,
    cancelled: bool,
}

impl Revealer {
    pub fn new(text: impl Into<String>) -> Result<Self, ScriptError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ScriptError::EmptyRevealText);
        }
        let ends = text
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        Ok(Self {
            text,
            ends,
            shown: 0,
            cancelled: false,
        })
    }

    /// One `(deadline, chars)` pair per character. The first character lands
    /// after `initial_delay_ms`, each following one `char_ms` later.
    pub fn schedule(&self, start: Tick, config: &RevealConfig) -> Vec<(Tick, usize)> {
        let first = start.after(config.initial_delay_ms);
        (1..=self.ends.len())
            .map(|chars| {
                let offset = (chars as u64 - 1).saturating_mul(config.char_ms);
                (first.after(offset), chars)
            })
            .collect()
    }

    pub fn reveal_to(&mut self, chars: usize) -> RevealStep {
        if self.cancelled || self.is_done() || chars <= self.shown {
            return RevealStep::Ignored;
        }
        self.shown = chars.min(self.ends.len());
        if self.is_done() {
            RevealStep::Done
        } else {
            RevealStep::Grew { chars: self.shown }
        }
    }

    /// Freezes the prefix where it is.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_done(&self) -> bool {
        self.shown == self.ends.len()
    }

    pub fn shown_chars(&self) -> usize {
        self.shown
    }

    pub fn total_chars(&self) -> usize {
        self.ends.len()
    }

    pub fn prefix(&self) -> &str {
        match self.shown {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
