//! `platform-complete suggest <ids|names>`: dump catalog suggestions.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use std::io::Write;

use crate::catalog::SuggestionField;
use crate::completions::CompletionDispatcher;

/// Which catalog field to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SuggestKind {
    /// Provider identifiers, annotated with customer names
    Ids,
    /// Customer names, annotated with provider identifiers
    Names,
}

impl From<SuggestKind> for SuggestionField {
    fn from(kind: SuggestKind) -> Self {
        match kind {
            SuggestKind::Ids => SuggestionField::ProviderId,
            SuggestKind::Names => SuggestionField::CustomerName,
        }
    }
}

/// List the default profile's catalog. `--profile` picks that profile.
pub fn execute(
    dispatcher: &CompletionDispatcher,
    kind: SuggestKind,
    out: &mut dyn Write,
) -> Result<()> {
    let suggestions = dispatcher.catalog_suggestions(None, kind.into())?;

    if suggestions.is_empty() {
        writeln!(out, "{}", "No catalog entries found".dimmed())?;
        return Ok(());
    }

    for suggestion in suggestions {
        writeln!(
            out,
            "{}  {}",
            suggestion.value.bold(),
            suggestion.description.dimmed()
        )?;
    }
    Ok(())
}
