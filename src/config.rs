//! Settings for secret lookup and catalog access.
//!
//! Every field has a default, so an absent config file is equivalent to an
//! empty one. Values are read from `<config_dir>/platform-complete/config.toml`
//! unless a path is given explicitly.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{CompleteError, Result};
use crate::secrets::Environment;

/// Placeholder substituted with the environment label in `address_template`.
pub const ENV_PLACEHOLDER: &str = "{env}";

const CONFIG_DIR_NAME: &str = "platform-complete";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// AWS region the secret store lives in
    pub region: String,
    /// Secret namespace holding tokens for the eng environment
    pub eng_namespace: String,
    /// Secret namespace holding tokens for the prod environment
    pub prod_namespace: String,
    /// Secret name under each namespace
    pub secret_name: String,
    /// Secret version stage to read
    pub version_stage: String,
    /// Name or path of the aws CLI executable
    pub aws_cli: String,
    /// Catalog address with `{env}` standing in for the environment label
    pub address_template: String,
    /// Value of `Meta.app` selecting completable nodes
    pub app_tag: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: "us-west-2".to_string(),
            eng_namespace: "mm-eng".to_string(),
            prod_namespace: "mm-prod".to_string(),
            secret_name: "consul".to_string(),
            version_stage: "AWSCURRENT".to_string(),
            aws_cli: "aws".to_string(),
            address_template: "http://consul-{env}.mixmode.ai".to_string(),
            app_tag: "platform".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Default location of the config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load settings from an explicit path. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CompleteError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            CompleteError::Config(format!("failed to parse {}: {e}", path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path` when given, otherwise from the default location,
    /// falling back to defaults when no default file exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => Self::load(&default),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.address_template.contains(ENV_PLACEHOLDER) {
            return Err(CompleteError::Config(format!(
                "address_template must contain {ENV_PLACEHOLDER}: {}",
                self.address_template
            )));
        }
        if self.app_tag.trim().is_empty() {
            return Err(CompleteError::Config("app_tag cannot be empty".to_string()));
        }
        if self.eng_namespace.is_empty() || self.prod_namespace.is_empty() {
            return Err(CompleteError::Config(
                "secret namespaces cannot be empty".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(CompleteError::Config(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Catalog address for an environment.
    pub fn catalog_address(&self, env: Environment) -> String {
        self.address_template.replace(ENV_PLACEHOLDER, env.label())
    }

    /// Secret id (`<namespace>/<secret_name>`) holding the token for `env`.
    pub fn secret_id(&self, env: Environment) -> String {
        let namespace = match env {
            Environment::Eng => &self.eng_namespace,
            Environment::Prod => &self.prod_namespace,
        };
        format!("{namespace}/{}", self.secret_name)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
