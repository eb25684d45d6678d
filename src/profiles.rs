//! Discovery of local AWS profile names.
//!
//! Profiles are read from the shared config file (`[profile NAME]` headers)
//! and the shared credentials file (`[NAME]` headers). Nothing else in either
//! file is interpreted.

use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{CompleteError, Result};
use crate::suggestion::Suggestion;

/// Marker preceding profile names in config-file section headers.
const PROFILE_MARKER: &str = "profile ";

/// Which of the two AWS files a reader holds; only the config file carries
/// the `profile ` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFileKind {
    Config,
    Credentials,
}

/// Locations of the shared config and credentials files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePaths {
    pub config: PathBuf,
    pub credentials: PathBuf,
}

impl ProfilePaths {
    /// `~/.aws/config` and `~/.aws/credentials` under `home`.
    pub fn from_home(home: &Path) -> Self {
        let aws_dir = home.join(".aws");
        Self {
            config: aws_dir.join("config"),
            credentials: aws_dir.join("credentials"),
        }
    }

    /// Resolve paths the way the AWS tooling does: `AWS_CONFIG_FILE` and
    /// `AWS_SHARED_CREDENTIALS_FILE` win over the home directory defaults.
    pub fn discover() -> Result<Self> {
        let config = env::var_os("AWS_CONFIG_FILE").map(PathBuf::from);
        let credentials = env::var_os("AWS_SHARED_CREDENTIALS_FILE").map(PathBuf::from);

        match (config, credentials) {
            (Some(config), Some(credentials)) => Ok(Self {
                config,
                credentials,
            }),
            (config, credentials) => {
                let home = dirs::home_dir().ok_or(CompleteError::HomeDirUnavailable)?;
                let defaults = Self::from_home(&home);
                Ok(Self {
                    config: config.unwrap_or(defaults.config),
                    credentials: credentials.unwrap_or(defaults.credentials),
                })
            }
        }
    }
}

/// Profile names found on this machine, with a parallel suggestion list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStore {
    names: Vec<String>,
    suggestions: Vec<Suggestion>,
}

impl ProfileStore {
    /// Scan the config file, then the credentials file. A missing file is
    /// skipped; a file that exists but cannot be read is fatal.
    pub fn load(paths: &ProfilePaths) -> Result<Self> {
        let mut names = Vec::new();

        for (path, kind) in [
            (&paths.config, ProfileFileKind::Config),
            (&paths.credentials, ProfileFileKind::Credentials),
        ] {
            if !path.exists() {
                tracing::debug!(path = %path.display(), "profile file not present");
                continue;
            }

            let file = File::open(path).map_err(|source| CompleteError::ProfileFile {
                path: path.clone(),
                source,
            })?;
            let found = parse_profiles(BufReader::new(file), kind).map_err(|source| {
                CompleteError::ProfileFile {
                    path: path.clone(),
                    source,
                }
            })?;

            tracing::debug!(path = %path.display(), count = found.len(), "read profiles");
            names.extend(found);
        }

        Ok(Self::from_names(names))
    }

    pub fn from_names(names: Vec<String>) -> Self {
        let suggestions = names.iter().map(Suggestion::bare).collect();
        Self { names, suggestions }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// Extract profile names from section headers, in file order.
///
/// Any line containing `[` counts as a header. Brackets are removed, and for
/// config files a leading `profile ` marker is removed too.
pub fn parse_profiles<R: BufRead>(
    reader: R,
    kind: ProfileFileKind,
) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if !line.contains('[') {
            continue;
        }

        let stripped: String = line
            .trim()
            .chars()
            .filter(|c| *c != '[' && *c != ']')
            .collect();
        let name = match kind {
            ProfileFileKind::Config => stripped
                .strip_prefix(PROFILE_MARKER)
                .map(str::trim_start)
                .unwrap_or(stripped.as_str()),
            ProfileFileKind::Credentials => stripped.as_str(),
        };

        names.push(name.to_string());
    }

    Ok(names)
}
