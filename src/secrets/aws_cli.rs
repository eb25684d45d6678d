//! Secrets Manager access through the `aws` command-line tool.
//!
//! Shelling out keeps profile handling (SSO, assume-role chains, credential
//! processes) identical to what the user already has working in their shell.

use serde::Deserialize;
use std::path::PathBuf;
use std::process::Command;

use super::SecretStore;
use crate::config::Settings;
use crate::error::{CompleteError, Result};

/// The subset of `get-secret-value` output we read.
#[derive(Debug, Deserialize)]
struct GetSecretValueOutput {
    #[serde(rename = "SecretString")]
    secret_string: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AwsCliSecretStore {
    program: PathBuf,
    region: String,
    version_stage: String,
}

impl AwsCliSecretStore {
    /// Store running the configured `aws` executable. It is looked up on
    /// PATH at call time, so building the store never fails.
    pub fn new(settings: &Settings) -> Self {
        Self::with_program(PathBuf::from(&settings.aws_cli), settings)
    }

    pub fn with_program(program: PathBuf, settings: &Settings) -> Self {
        Self {
            program,
            region: settings.region.clone(),
            version_stage: settings.version_stage.clone(),
        }
    }
}

impl SecretStore for AwsCliSecretStore {
    fn get_secret_string(&self, profile: &str, secret_id: &str) -> Result<String> {
        let fetch_error = |reason: String| CompleteError::SecretFetch {
            profile: profile.to_string(),
            secret_id: secret_id.to_string(),
            reason,
        };

        // A missing CLI fails every namespace alike, so it is fatal here
        let program = which::which(&self.program).map_err(|e| {
            CompleteError::Config(format!(
                "aws CLI '{}' not found: {e}. Install it from https://aws.amazon.com/cli/",
                self.program.display()
            ))
        })?;

        let output = Command::new(&program)
            .args([
                "secretsmanager",
                "get-secret-value",
                "--secret-id",
                secret_id,
                "--version-stage",
                &self.version_stage,
                "--profile",
                profile,
                "--region",
                &self.region,
                "--output",
                "json",
            ])
            .output()
            .map_err(|e| fetch_error(format!("failed to run {}: {e}", program.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(fetch_error(stderr.trim().to_string()));
        }

        let parsed: GetSecretValueOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| fetch_error(format!("unexpected get-secret-value output: {e}")))?;

        // Binary secrets leave SecretString unset
        Ok(parsed.secret_string.unwrap_or_default())
    }
}
