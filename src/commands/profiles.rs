//! `platform-complete profiles`: list locally configured profiles.

use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use crate::profiles::ProfileStore;

pub fn execute(profiles: &ProfileStore, out: &mut dyn Write) -> Result<()> {
    if profiles.names().is_empty() {
        writeln!(out, "{}", "No AWS profiles found".dimmed())?;
        return Ok(());
    }

    for name in profiles.names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
