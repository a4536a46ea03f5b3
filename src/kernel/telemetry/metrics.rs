use std::collections::VecDeque;

use super::event::TelemetryEvent;

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub playback: PlaybackStats,
    pub anomalies: AnomalyStats,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackStats {
    pub starts: u64,
    pub cancels: u64,
    pub turns_committed: u64,
    pub loops_completed: u64,
    pub total_typing_ms: u64,
    pub avg_typing_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AnomalyStats {
    pub stale_timers: u64,
    pub reentrancy_rejects: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::Started { .. } => snap.playback.starts += 1,
            TelemetryEvent::Cancelled { .. } => snap.playback.cancels += 1,
            TelemetryEvent::TurnCommitted { typing_ms, .. } => {
                snap.playback.turns_committed += 1;
                snap.playback.total_typing_ms += typing_ms;
            }
            TelemetryEvent::LoopCompleted { .. } => snap.playback.loops_completed += 1,
            TelemetryEvent::StaleTimerIgnored { .. } => snap.anomalies.stale_timers += 1,
            TelemetryEvent::ReentrancyRejected { .. } => snap.anomalies.reentrancy_rejects += 1,
        }
    }

    if snap.playback.turns_committed > 0 {
        snap.playback.avg_typing_ms =
            snap.playback.total_typing_ms as f64 / snap.playback.turns_committed as f64;
    }

    snap
}
