//! Catalog token resolution from the secret store.
//!
//! A profile maps to exactly one environment: whichever namespace yields a
//! token first. The eng namespace is always tried before prod, each once.

mod aws_cli;

use secrecy::SecretString;
use std::fmt;

use crate::config::Settings;
use crate::error::{CompleteError, Result};

pub use aws_cli::AwsCliSecretStore;

/// Environments a catalog can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Eng,
    Prod,
}

impl Environment {
    /// Resolution order.
    pub const ALL: [Environment; 2] = [Environment::Eng, Environment::Prod];

    pub fn label(self) -> &'static str {
        match self {
            Environment::Eng => "eng",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalog token and the environment it was issued for.
#[derive(Debug)]
pub struct Credentials {
    pub token: SecretString,
    pub environment: Environment,
}

impl Credentials {
    pub fn new(token: impl Into<String>, environment: Environment) -> Self {
        Self {
            token: SecretString::new(token.into()),
            environment,
        }
    }
}

/// Read access to string secrets, scoped by local profile.
pub trait SecretStore {
    fn get_secret_string(&self, profile: &str, secret_id: &str) -> Result<String>;
}

/// Two-tier token lookup: eng namespace, then prod namespace.
pub struct SecretResolver {
    store: Box<dyn SecretStore>,
    attempts: Vec<(Environment, String)>,
}

impl SecretResolver {
    pub fn new(store: Box<dyn SecretStore>, settings: &Settings) -> Self {
        let attempts = Environment::ALL
            .iter()
            .map(|env| (*env, settings.secret_id(*env)))
            .collect();
        Self { store, attempts }
    }

    /// Resolve credentials for `profile`. Fails when every namespace fails,
    /// or at once when the store reports a fatal error.
    pub fn resolve(&self, profile: &str) -> Result<Credentials> {
        for (environment, secret_id) in &self.attempts {
            match self.store.get_secret_string(profile, secret_id) {
                Ok(token) => {
                    tracing::debug!(profile, %environment, "resolved catalog token");
                    return Ok(Credentials::new(token, *environment));
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::debug!(
                        profile,
                        secret_id = %secret_id,
                        error = %e,
                        "namespace lookup failed"
                    );
                }
            }
        }

        let tried = self
            .attempts
            .iter()
            .map(|(_, id)| id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(CompleteError::SecretUnavailable {
            profile: profile.to_string(),
            tried,
        })
    }
}
