use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::error::PlaybackError;
use crate::kernel::cancel::Generation;
use crate::kernel::config::PacingConfig;
use crate::kernel::event::PlaybackEvent;
use crate::kernel::scheduler::{Phase, Scheduler};
use crate::kernel::state::PlaybackState;
use crate::kernel::time::Tick;
use crate::script::{Script, ScriptKey};

const COMMAND_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 256;

/// Everything a host needs to re-render one panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub script: Option<ScriptKey>,
    pub generation: Generation,
    pub phase: Phase,
    pub state: PlaybackState,
}

impl PlaybackSnapshot {
    fn capture(scheduler: &Scheduler) -> Self {
        Self {
            script: scheduler.script_key().cloned(),
            generation: scheduler.generation(),
            phase: scheduler.phase(),
            state: scheduler.state().clone(),
        }
    }
}

enum Command {
    Start {
        script: Script,
        ack: oneshot::Sender<Result<Generation, PlaybackError>>,
    },
    Cancel {
        ack: oneshot::Sender<Generation>,
    },
}

/// Runs one [`Scheduler`] on the tokio clock.
///
/// The scheduler lives inside a single spawned task, so timer fires and
/// commands are serialized. `start` and `cancel` resolve only after the task
/// has applied them: once `cancel().await` returns, the generation is bumped
/// and the queue is empty.
pub struct Player {
    id: Uuid,
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<PlaybackSnapshot>,
    events: broadcast::Sender<PlaybackEvent>,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
    _guard: DropGuard,
}

impl Player {
    pub fn spawn(config: PacingConfig) -> Result<Self, PlaybackError> {
        let scheduler = Scheduler::new(config)?;
        let id = scheduler.id();

        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (snap_tx, snap_rx) = watch::channel(PlaybackSnapshot::capture(&scheduler));
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let shutdown = CancellationToken::new();

        let driver = Driver {
            scheduler,
            commands: cmd_rx,
            snapshots: snap_tx,
            events: event_tx.clone(),
            shutdown: shutdown.clone(),
            origin: Instant::now(),
        };
        let task = tokio::spawn(driver.run().instrument(tracing::info_span!("player", %id)));

        Ok(Self {
            id,
            commands: cmd_tx,
            snapshots: snap_rx,
            events: event_tx,
            _guard: shutdown.clone().drop_guard(),
            shutdown,
            task,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn start(&self, script: Script) -> Result<Generation, PlaybackError> {
        let (ack, rx) = oneshot::channel();
        self.commands
            .send(Command::Start { script, ack })
            .await
            .map_err(|_| PlaybackError::PlayerClosed)?;
        rx.await.map_err(|_| PlaybackError::PlayerClosed)?
    }

    /// Returns the new (inert) generation.
    pub async fn cancel(&self) -> Result<Generation, PlaybackError> {
        let (ack, rx) = oneshot::channel();
        self.commands
            .send(Command::Cancel { ack })
            .await
            .map_err(|_| PlaybackError::PlayerClosed)?;
        rx.await.map_err(|_| PlaybackError::PlayerClosed)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Latest-value view; intermediate snapshots may be skipped.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshots.clone()
    }

    /// Every change notification, in order.
    pub fn events(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Cancels playback and waits for the task to exit.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            warn!(player = %self.id, error = %e, "player task ended abnormally");
        }
    }
}

struct Driver {
    scheduler: Scheduler,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<PlaybackSnapshot>,
    events: broadcast::Sender<PlaybackEvent>,
    shutdown: CancellationToken,
    origin: Instant,
}

impl Driver {
    fn clock(&self) -> Tick {
        Tick::at(self.origin.elapsed().as_millis() as u64)
    }

    fn deadline(&self) -> Option<Instant> {
        self.scheduler
            .next_deadline()
            .map(|t| self.origin + Duration::from_millis(t.ms))
    }

    fn publish(&self, events: Vec<PlaybackEvent>) {
        self.snapshots.send_replace(PlaybackSnapshot::capture(&self.scheduler));
        for event in events {
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
    }

    async fn run(mut self) {
        info!("player started");

        loop {
            let deadline = self.deadline();
            let wake = async move {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    let events = self.scheduler.cancel();
                    self.publish(events);
                    break;
                }

                cmd = self.commands.recv() => match cmd {
                    Some(Command::Start { script, ack }) => {
                        let now = self.clock();
                        let result = self.scheduler.start(script, now);
                        let reply = match result {
                            Ok(events) => {
                                self.publish(events);
                                Ok(self.scheduler.generation())
                            }
                            Err(e) => Err(e),
                        };
                        let _ = ack.send(reply);
                    }
                    Some(Command::Cancel { ack }) => {
                        let events = self.scheduler.cancel();
                        self.publish(events);
                        let _ = ack.send(self.scheduler.generation());
                    }
                    None => {
                        let events = self.scheduler.cancel();
                        self.publish(events);
                        break;
                    }
                },

                _ = wake => {
                    let now = self.clock();
                    let events = self.scheduler.advance_to(now);
                    self.publish(events);
                }
            }
        }

        info!("player stopped");
    }
}
