//! Playback telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer. The scheduler writes to it and
//! never reads it back when deciding what to do next.
//!
//! # CONTENT INVARIANT
//! Events carry indices, generations and durations only. Turn text, metrics
//! and action labels never enter telemetry.

pub mod event;
pub mod metrics;
pub mod recorder;
