//! Wiring of real collaborators into a dispatcher.
//!
//! Only the profile files are read up front. Secrets and catalog clients are
//! fetched by the dispatcher when a request needs them.

use crate::catalog::ConsulClientFactory;
use crate::completions::CompletionDispatcher;
use crate::config::Settings;
use crate::error::Result;
use crate::profiles::{ProfilePaths, ProfileStore};
use crate::secrets::{AwsCliSecretStore, SecretResolver};

/// Load profiles from the standard AWS file locations.
pub fn load_profiles() -> Result<ProfileStore> {
    let paths = ProfilePaths::discover()?;
    ProfileStore::load(&paths)
}

/// Build a dispatcher whose default catalog client belongs to
/// `default_profile`, connected on first use.
pub fn build_dispatcher(
    settings: &Settings,
    default_profile: &str,
) -> Result<CompletionDispatcher> {
    let profiles = load_profiles()?;
    let store = AwsCliSecretStore::new(settings);

    Ok(CompletionDispatcher::with_default_profile(
        default_profile,
        profiles,
        SecretResolver::new(Box::new(store), settings),
        Box::new(ConsulClientFactory::new(settings.clone())),
        settings.app_tag.clone(),
    ))
}
