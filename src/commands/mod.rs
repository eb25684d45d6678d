//! Subcommand implementations for the `platform-complete` binary.

pub mod complete;
pub mod context;
pub mod profiles;
pub mod suggest;
