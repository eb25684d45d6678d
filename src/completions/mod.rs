//! Option-aware completion for `--id`, `--name` and `--profile`.
//!
//! The dispatcher looks at the flag before the cursor, picks a suggestion
//! source (local profiles or the service catalog) and fuzzy-filters the
//! result against the partial word being typed.

/// Exit status of `complete` when a line is not ours, telling the shell hook
/// to fall back to its own completion.
pub const NOT_HANDLED_STATUS: u8 = 3;

mod dispatcher;
pub mod fuzzy;
pub mod generator;
pub mod line;


pub use dispatcher::{CompletableOption, Completion, CompletionDispatcher};
pub use fuzzy::filter_fuzzy;
pub use generator::{generate_completions, write_hook, Shell};
pub use line::CommandLine;
