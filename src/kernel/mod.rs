pub mod cancel;
pub mod config;
pub mod event;
pub mod reveal;
pub mod scheduler;
pub mod state;
pub mod telemetry;
pub mod time;
pub mod timer;
