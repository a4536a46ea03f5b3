use tracing::{debug, warn};

use super::player::{PlaybackSnapshot, Player};
use crate::error::PlaybackError;
use crate::kernel::cancel::Generation;
use crate::script::{Script, ScriptKey};

/// Glue between a UI surface and its [`Player`].
///
/// Starts exactly once per mount and once per script-identity change, and
/// cancels on unmount. Re-selecting the script that is already playing is a
/// no-op, so hosts can call [`HostBinding::select`] on every render.
pub struct HostBinding {
    player: Player,
    mounted: Option<ScriptKey>,
}

impl HostBinding {
    pub fn new(player: Player) -> Self {
        Self { player, mounted: None }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn mounted(&self) -> Option<&ScriptKey> {
        self.mounted.as_ref()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.player.snapshot()
    }

    pub async fn mount(&mut self, script: Script) -> Result<Generation, PlaybackError> {
        let key = script.key().clone();
        let generation = self.player.start(script).await?;
        self.mounted = Some(key);
        Ok(generation)
    }

    /// Restarts only when `script` differs from the mounted one. Returns the
    /// new generation if playback restarted.
    pub async fn select(&mut self, script: Script) -> Result<Option<Generation>, PlaybackError> {
        if self.mounted.as_ref() == Some(script.key()) {
            debug!(script = %script.key(), "selection unchanged");
            return Ok(None);
        }
        self.mount(script).await.map(Some)
    }

    pub async fn unmount(&mut self) -> Result<(), PlaybackError> {
        if self.mounted.take().is_some() {
            self.player.cancel().await?;
        }
        Ok(())
    }

    pub async fn close(mut self) {
        if let Err(e) = self.unmount().await {
            warn!(player = %self.player.id(), error = %e, "unmount on close failed");
        }
        self.player.shutdown().await;
    }
}
