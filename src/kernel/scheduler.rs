use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::cancel::Generation;
use super::config::PacingConfig;
use super::event::PlaybackEvent;
use super::reveal::{RevealStep, Revealer};
use super::state::{PlaybackState, StateDelta};
use super::telemetry::event::TelemetryEvent;
use super::telemetry::recorder::TelemetryRecorder;
use super::time::Tick;
use super::timer::{Timer, TimerKind, TimerQueue};
use crate::error::PlaybackError;
use crate::script::{Script, ScriptKey, Turn};

/// Where the scheduler is in the step cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Phase {
    /// Never started, or cancelled.
    #[default]
    Idle,
    /// A turn's text is being typed; `typing == true`.
    Typing,
    /// Turn committed, waiting out its role's post-delay.
    PostDelay,
    /// Script exhausted, waiting out the loop delay.
    LoopPause,
}

/// The active playback: one script under one generation.
#[derive(Debug)]
struct Run {
    script: Script,
    pacing: PacingConfig,
    typing_since: Tick,
    revealer: Option<Revealer>,
}

/// Drives a script turn by turn on a logical clock and loops forever.
///
/// The scheduler is a pure state machine: it never sleeps or reads a clock.
/// A driver (see [`crate::driver::player`]) or a test supplies time through
/// [`Scheduler::advance_to`], or pops and fires individual timers.
///
/// **PLAYBACK LAW**: every timer carries the generation it was scheduled
/// under. `start` and `cancel` bump the generation and clear the queue, so no
/// timer from an earlier run can mutate state, even one already popped and
/// delivered late.
#[derive(Debug)]
pub struct Scheduler {
    id: Uuid,
    config: PacingConfig,
    run: Option<Run>,
    state: PlaybackState,
    phase: Phase,
    generation: Generation,
    timers: TimerQueue,
    now: Tick,
    telemetry: TelemetryRecorder,
}

impl Scheduler {
    pub fn new(config: PacingConfig) -> Result<Self, PlaybackError> {
        config.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            run: None,
            state: PlaybackState::new(),
            phase: Phase::Idle,
            generation: Generation::new(),
            timers: TimerQueue::new(),
            now: Tick::new(),
            telemetry: TelemetryRecorder::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn script(&self) -> Option<&Script> {
        self.run.as_ref().map(|r| &r.script)
    }

    pub fn script_key(&self) -> Option<&ScriptKey> {
        self.script().map(Script::key)
    }

    pub fn next_deadline(&self) -> Option<Tick> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn telemetry(&self) -> &TelemetryRecorder {
        &self.telemetry
    }

    /// Validates raw turns and starts them. Authoring errors are rejected
    /// before the current run is touched.
    pub fn start_turns(
        &mut self,
        key: impl Into<String>,
        turns: Vec<Turn>,
        now: Tick,
    ) -> Result<Vec<PlaybackEvent>, PlaybackError> {
        let script = Script::new(key, turns)?;
        self.start(script, now)
    }

    /// Cancels any active run and begins `script` from turn 0.
    ///
    /// Safe to call repeatedly. A rejected start leaves the current run
    /// untouched.
    pub fn start(
        &mut self,
        script: Script,
        now: Tick,
    ) -> Result<Vec<PlaybackEvent>, PlaybackError> {
        let pacing = script.pacing().cloned().unwrap_or_else(|| self.config.clone());
        pacing.validate()?;

        self.now = self.now.max(now);
        let mut events = self.cancel();
        let generation = self.generation;
        let key = script.key().clone();
        let turns = script.len();

        self.run = Some(Run {
            script,
            pacing,
            typing_since: self.now,
            revealer: None,
        });
        self.state.reduce(StateDelta::Reset);
        self.telemetry.record(TelemetryEvent::Started { generation, turns });
        info!(scheduler = %self.id, %generation, script = %key, turns, "playback started");

        events.push(PlaybackEvent::Started { generation, key, turns });
        events.extend(self.begin_step(0, self.now));
        Ok(events)
    }

    /// Bumps the generation and drops every pending timer. State freezes as
    /// it is; nothing mutates it again until the next `start`.
    pub fn cancel(&mut self) -> Vec<PlaybackEvent> {
        let previous = self.generation;
        let generation = self.generation.bump();
        self.timers.clear();
        self.phase = Phase::Idle;

        match self.run.take() {
            Some(mut run) => {
                if let Some(revealer) = run.revealer.as_mut() {
                    revealer.cancel();
                }
                self.telemetry.record(TelemetryEvent::Cancelled {
                    generation: previous,
                    cursor: self.state.cursor(),
                });
                info!(
                    scheduler = %self.id,
                    %previous,
                    %generation,
                    script = %run.script.key(),
                    "playback cancelled"
                );
                vec![PlaybackEvent::Cancelled { generation: previous }]
            }
            None => Vec::new(),
        }
    }

    /// Fires every timer due at or before `now`, in deadline order.
    pub fn advance_to(&mut self, now: Tick) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        while let Some(timer) = self.timers.pop_due(now) {
            events.extend(self.fire(timer));
        }
        self.now = self.now.max(now);
        events
    }

    /// Removes the earliest due timer without firing it. Drivers that hand
    /// timers across a suspension point use this with [`Scheduler::fire`].
    pub fn pop_due(&mut self, now: Tick) -> Option<Timer> {
        self.timers.pop_due(now)
    }

    /// Applies one timer. Stale or out-of-order timers are no-ops.
    ///
    /// Follow-up timers are scheduled relative to the timer's own deadline,
    /// not to when it was delivered, so a late driver does not accumulate drift.
    pub fn fire(&mut self, timer: Timer) -> Vec<PlaybackEvent> {
        if !timer.generation.is_current(self.generation) {
            debug!(
                scheduler = %self.id,
                captured = %timer.generation,
                live = %self.generation,
                kind = ?timer.kind,
                "stale timer ignored"
            );
            self.telemetry.record(TelemetryEvent::StaleTimerIgnored {
                captured: timer.generation,
                live: self.generation,
                kind: (&timer.kind).into(),
            });
            return Vec::new();
        }

        let at = timer.deadline;
        self.now = self.now.max(at);

        match timer.kind {
            TimerKind::RevealChar { cursor, chars } => self.on_reveal(cursor, chars),
            TimerKind::TypingDone { cursor } => self.on_typing_done(cursor, at),
            TimerKind::NextStep { cursor } => {
                if self.phase != Phase::PostDelay || self.state.cursor() != cursor {
                    self.reject(cursor);
                    return Vec::new();
                }
                self.begin_step(cursor, at)
            }
            TimerKind::LoopRestart => self.on_loop_restart(at),
        }
    }

    fn begin_step(&mut self, cursor: usize, at: Tick) -> Vec<PlaybackEvent> {
        let generation = self.generation;
        let Some(run) = self.run.as_mut() else {
            return Vec::new();
        };
        let Some(turn) = run.script.turn(cursor) else {
            return Vec::new();
        };

        let typing_ms = run.pacing.typing_duration_ms(turn.char_len());
        run.typing_since = at;
        run.revealer = None;

        if let Some(reveal) = run.pacing.reveal_for(turn.role) {
            if let Ok(revealer) = Revealer::new(turn.text.clone()) {
                for (deadline, chars) in revealer.schedule(at, reveal) {
                    self.timers.schedule(Timer {
                        deadline,
                        generation,
                        kind: TimerKind::RevealChar { cursor, chars },
                    });
                }
                run.revealer = Some(revealer);
            }
        }

        self.timers.schedule(Timer {
            deadline: at.after(typing_ms),
            generation,
            kind: TimerKind::TypingDone { cursor },
        });
        self.phase = Phase::Typing;
        self.state.reduce(StateDelta::TypingStarted);
        debug!(scheduler = %self.id, %generation, cursor, typing_ms, "typing started");

        vec![PlaybackEvent::TypingStarted { cursor }]
    }

    fn on_reveal(&mut self, cursor: usize, chars: usize) -> Vec<PlaybackEvent> {
        if self.phase != Phase::Typing || self.state.cursor() != cursor {
            self.reject(cursor);
            return Vec::new();
        }
        let Some(revealer) = self.run.as_mut().and_then(|r| r.revealer.as_mut()) else {
            return Vec::new();
        };

        match revealer.reveal_to(chars) {
            RevealStep::Grew { .. } | RevealStep::Done => {
                let shown = revealer.shown_chars();
                self.state.reduce(StateDelta::DraftGrew(revealer.prefix().to_string()));
                vec![PlaybackEvent::DraftGrew { cursor, chars: shown }]
            }
            RevealStep::Ignored => Vec::new(),
        }
    }

    fn on_typing_done(&mut self, cursor: usize, at: Tick) -> Vec<PlaybackEvent> {
        // Re-entrancy guard: only the step that owns the cursor may commit.
        if self.phase != Phase::Typing
            || self.state.cursor() != cursor
            || self.state.revealed().len() != cursor
        {
            self.reject(cursor);
            return Vec::new();
        }

        let generation = self.generation;
        let Some(run) = self.run.as_mut() else {
            return Vec::new();
        };
        let Some(turn) = run.script.turn(cursor).cloned() else {
            return Vec::new();
        };

        self.timers.clear_reveal();
        if let Some(revealer) = run.revealer.as_mut() {
            revealer.cancel();
        }
        let typing_ms = at.since(run.typing_since);
        let post_delay_ms = run.pacing.post_delay_ms(&turn);
        let loop_delay_ms = run.pacing.loop_delay_ms;
        let len = run.script.len();

        self.state.reduce(StateDelta::TurnCommitted(turn));
        self.telemetry.record(TelemetryEvent::TurnCommitted {
            generation,
            index: cursor,
            typing_ms,
        });
        debug!(scheduler = %self.id, %generation, index = cursor, "turn committed");

        let mut events = vec![PlaybackEvent::TurnCommitted { index: cursor }];
        let next = cursor + 1;
        if next < len {
            self.phase = Phase::PostDelay;
            self.timers.schedule(Timer {
                deadline: at.after(post_delay_ms),
                generation,
                kind: TimerKind::NextStep { cursor: next },
            });
        } else {
            self.phase = Phase::LoopPause;
            self.timers.schedule(Timer {
                deadline: at.after(loop_delay_ms),
                generation,
                kind: TimerKind::LoopRestart,
            });
            events.push(PlaybackEvent::LoopPaused { loop_delay_ms });
        }
        events
    }

    fn on_loop_restart(&mut self, at: Tick) -> Vec<PlaybackEvent> {
        if self.phase != Phase::LoopPause {
            self.reject(self.state.cursor());
            return Vec::new();
        }

        self.state.reduce(StateDelta::LoopReset);
        let loops = self.state.loops();
        self.telemetry.record(TelemetryEvent::LoopCompleted {
            generation: self.generation,
            loops,
        });
        info!(scheduler = %self.id, generation = %self.generation, loops, "loop restarted");

        let mut events = vec![PlaybackEvent::LoopReset { loops }];
        events.extend(self.begin_step(0, at));
        events
    }

    fn reject(&mut self, cursor: usize) {
        let revealed = self.state.revealed().len();
        warn!(
            scheduler = %self.id,
            generation = %self.generation,
            cursor,
            live_cursor = self.state.cursor(),
            revealed,
            phase = ?self.phase,
            "out-of-turn step ignored"
        );
        self.telemetry.record(TelemetryEvent::ReentrancyRejected {
            generation: self.generation,
            cursor,
            revealed,
        });
    }
}
