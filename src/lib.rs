pub mod catalog;
pub mod commands;
pub mod completions;
pub mod config;
pub mod error;
pub mod profiles;
pub mod secrets;
pub mod suggestion;

pub use error::{CompleteError, Result};
pub use suggestion::Suggestion;
