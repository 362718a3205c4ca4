pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::ScriptConfig;
pub use error::{Result, ScriptError};
