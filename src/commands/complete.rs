//! `platform-complete complete <TEXT>`: the hook shells call on TAB.

use anyhow::Result;
use std::io::Write;

use crate::completions::{Completion, CompletionDispatcher};

/// Complete `text_before_cursor`, writing one `value<TAB>description` line per
/// suggestion. Returns whether the request was handled; nothing is written
/// when it was not.
pub fn execute(
    dispatcher: &CompletionDispatcher,
    text_before_cursor: &str,
    out: &mut dyn Write,
) -> Result<bool> {
    let completion = dispatcher.complete(text_before_cursor)?;

    if let Completion::Handled(suggestions) = &completion {
        for suggestion in suggestions {
            writeln!(out, "{suggestion}")?;
        }
    }

    Ok(completion.is_handled())
}
