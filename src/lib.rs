pub mod driver;
pub mod error;
pub mod kernel;
pub mod script;

pub use driver::binding::HostBinding;
pub use driver::player::{PlaybackSnapshot, Player};
pub use error::{ConfigError, PlaybackError, ScriptError};
pub use kernel::config::PacingConfig;
pub use kernel::scheduler::{Phase, Scheduler};
pub use script::{Metric, Role, Script, ScriptKey, Turn};
