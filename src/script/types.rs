use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::ScriptError;
use crate::kernel::config::PacingConfig;

/// Who "speaks" a turn. The host maps this to a visual side; the engine maps
/// it to a post-delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Initiator,
    Agent,
    Outcome,
}

/// Supplementary display data. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            metrics: Vec::new(),
            action_label: None,
        }
    }

    pub fn initiator(text: impl Into<String>) -> Self {
        Self::new(Role::Initiator, text)
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    pub fn outcome(text: impl Into<String>) -> Self {
        Self::new(Role::Outcome, text)
    }

    pub fn with_metric(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.metrics.push(Metric::new(label, value));
        self
    }

    pub fn with_action(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }

    /// Length in characters, not bytes. Drives typing duration.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Script identity. The host compares keys to decide whether a selection
/// change requires a restart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptKey(pub String);

impl ScriptKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl fmt::Display for ScriptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered, non-empty, immutable sequence of turns.
///
/// Construction validates the authoring invariants, so every `Script` that
/// exists is playable. Cloning is cheap: turns are shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScriptDef", into = "ScriptDef")]
pub struct Script {
    key: ScriptKey,
    turns: Arc<[Turn]>,
    pacing: Option<PacingConfig>,
}

impl Script {
    pub fn new(key: impl Into<String>, turns: Vec<Turn>) -> Result<Self, ScriptError> {
        validate_turns(&turns)?;
        Ok(Self {
            key: ScriptKey::new(key),
            turns: turns.into(),
            pacing: None,
        })
    }

    /// Per-script pacing override. Takes precedence over the scheduler's config.
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = Some(pacing);
        self
    }

    pub fn key(&self) -> &ScriptKey {
        &self.key
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn turn(&self, index: usize) -> Option<&Turn> {
        self.turns.get(index)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false for a constructed script; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn pacing(&self) -> Option<&PacingConfig> {
        self.pacing.as_ref()
    }
}

fn validate_turns(turns: &[Turn]) -> Result<(), ScriptError> {
    if turns.is_empty() {
        return Err(ScriptError::EmptyScript);
    }
    if let Some(index) = turns.iter().position(|t| t.text.is_empty()) {
        return Err(ScriptError::EmptyTurnText { index });
    }
    Ok(())
}

/// Wire shape for authored scripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScriptDef {
    key: String,
    turns: Vec<Turn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pacing: Option<PacingConfig>,
}

impl TryFrom<ScriptDef> for Script {
    type Error = ScriptError;

    fn try_from(def: ScriptDef) -> Result<Self, Self::Error> {
        let script = Script::new(def.key, def.turns)?;
        Ok(match def.pacing {
            Some(p) => script.with_pacing(p),
            None => script,
        })
    }
}

impl From<Script> for ScriptDef {
    fn from(script: Script) -> Self {
        Self {
            key: script.key.0,
            turns: script.turns.to_vec(),
            pacing: script.pacing,
        }
    }
}
