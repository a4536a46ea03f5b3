pub mod demo;
pub mod types;

pub use types::{Metric, Role, Script, ScriptKey, Turn};
