use thiserror::Error;

/// Authoring errors. Scripts are trusted data, so these are caller defects
/// surfaced at construction time rather than during playback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("script must contain at least one turn")]
    EmptyScript,
    #[error("turn {index} has empty text")]
    EmptyTurnText { index: usize },
    #[error("reveal text must not be empty")]
    EmptyRevealText,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("per_char_ms must be positive")]
    ZeroPerChar,
    #[error("reveal char_ms must be positive")]
    ZeroCharRate,
    #[error("cap_ms must be at least per_char_ms ({per_char_ms}), got {cap_ms}")]
    CapBelowPerChar { per_char_ms: u64, cap_ms: u64 },
    #[error("failed to parse pacing config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read pacing config: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("player task is no longer running")]
    PlayerClosed,
}
