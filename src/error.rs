//! Error type shared by every completion component.
//!
//! Errors fall into two tiers. Fatal errors mean the environment cannot
//! support completion at all (no home directory, unreadable profile files,
//! no usable secret, an unbuildable catalog client, broken configuration).
//! Recoverable errors only degrade a single request to "no suggestions".

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompleteError {
    #[error("could not determine home directory")]
    HomeDirUnavailable,

    #[error("failed to read profile file {}: {}", .path.display(), .source)]
    ProfileFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("secret '{secret_id}' unavailable for profile '{profile}': {reason}")]
    SecretFetch {
        profile: String,
        secret_id: String,
        reason: String,
    },

    #[error("no catalog token for profile '{profile}' under any namespace (tried {tried})")]
    SecretUnavailable { profile: String, tried: String },

    #[error("failed to build catalog client for {address}: {reason}")]
    ClientBuild { address: String, reason: String },

    #[error("catalog query failed: {0}")]
    CatalogQuery(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CompleteError {
    /// Whether this error must stop the process rather than degrade a
    /// single completion request.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            CompleteError::SecretFetch { .. } | CompleteError::CatalogQuery(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CompleteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(CompleteError::HomeDirUnavailable.is_fatal());
        assert!(CompleteError::Config("bad".to_string()).is_fatal());
        assert!(CompleteError::SecretUnavailable {
            profile: "default".to_string(),
            tried: "mm-eng/consul, mm-prod/consul".to_string(),
        }
        .is_fatal());
        assert!(CompleteError::ClientBuild {
            address: "http://consul-eng.example".to_string(),
            reason: "boom".to_string(),
        }
        .is_fatal());
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(!CompleteError::CatalogQuery("timeout".to_string()).is_fatal());
        assert!(!CompleteError::SecretFetch {
            profile: "default".to_string(),
            secret_id: "mm-eng/consul".to_string(),
            reason: "AccessDenied".to_string(),
        }
        .is_fatal());
    }

    #[test]
    fn test_profile_file_message_includes_path() {
        let err = CompleteError::ProfileFile {
            path: PathBuf::from("/home/user/.aws/config"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/home/user/.aws/config"));
        assert!(msg.contains("denied"));
    }
}
