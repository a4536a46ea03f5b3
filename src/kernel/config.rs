use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::script::{Role, Turn};

/// Pacing constants for one conversation surface.
///
/// Pages historically tuned these independently, so nothing here is global:
/// a scheduler has a default and each script may override it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Simulated typing time per character of turn text.
    pub per_char_ms: u64,
    /// Upper bound on simulated typing time for a single turn.
    pub cap_ms: u64,
    pub post_delay: PostDelayConfig,
    /// Pause after the last turn before playback restarts from the top.
    pub loop_delay_ms: u64,
    /// Character-by-character reveal. `None` disables the live draft.
    pub reveal: Option<RevealConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDelayConfig {
    pub initiator_ms: u64,
    pub agent_ms: u64,
    pub outcome_ms: u64,
    /// Added on top of the role delay when a turn carries an action label.
    pub action_extra_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub char_ms: u64,
    pub initial_delay_ms: u64,
    /// Roles whose text is revealed progressively while typing.
    pub roles: Vec<Role>,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            per_char_ms: 30,
            cap_ms: 2_000,
            post_delay: PostDelayConfig::default(),
            loop_delay_ms: 6_000,
            reveal: Some(RevealConfig::default()),
        }
    }
}

impl Default for PostDelayConfig {
    fn default() -> Self {
        Self {
            initiator_ms: 4_000,
            agent_ms: 4_500,
            outcome_ms: 6_000,
            action_extra_ms: 1_500,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            char_ms: 30,
            initial_delay_ms: 0,
            roles: vec![Role::Initiator],
        }
    }
}

impl PacingConfig {
    /// Tighter pacing used by the smaller embedded panels.
    pub fn compact() -> Self {
        Self {
            per_char_ms: 20,
            cap_ms: 1_500,
            post_delay: PostDelayConfig {
                initiator_ms: 3_500,
                agent_ms: 4_000,
                outcome_ms: 5_000,
                action_extra_ms: 1_000,
            },
            loop_delay_ms: 5_000,
            reveal: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PacingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_char_ms == 0 {
            return Err(ConfigError::ZeroPerChar);
        }
        if self.cap_ms < self.per_char_ms {
            return Err(ConfigError::CapBelowPerChar {
                per_char_ms: self.per_char_ms,
                cap_ms: self.cap_ms,
            });
        }
        if let Some(reveal) = &self.reveal {
            if reveal.char_ms == 0 {
                return Err(ConfigError::ZeroCharRate);
            }
        }
        Ok(())
    }

    /// `min(chars * per_char_ms, cap_ms)`.
    pub fn typing_duration_ms(&self, chars: usize) -> u64 {
        (chars as u64)
            .saturating_mul(self.per_char_ms)
            .min(self.cap_ms)
    }

    pub fn post_delay_ms(&self, turn: &Turn) -> u64 {
        let base = match turn.role {
            Role::Initiator => self.post_delay.initiator_ms,
            Role::Agent => self.post_delay.agent_ms,
            Role::Outcome => self.post_delay.outcome_ms,
        };
        match turn.action_label {
            Some(_) => base.saturating_add(self.post_delay.action_extra_ms),
            None => base,
        }
    }

    pub fn reveal_for(&self, role: Role) -> Option<&RevealConfig> {
        self.reveal.as_ref().filter(|r| r.roles.contains(&role))
    }
}
