use std::cell::OnceCell;

use crate::catalog::{fetch_suggestions, CatalogClient, ClientFactory, SuggestionField};
use crate::error::{CompleteError, Result};
use crate::profiles::ProfileStore;
use crate::secrets::SecretResolver;
use crate::suggestion::Suggestion;

use super::fuzzy::filter_fuzzy;
use super::line::CommandLine;

/// Result of a completion request.
///
/// `NotHandled` tells the caller to fall through to another completion
/// source; `Handled` with an empty list means "nothing matches".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Handled(Vec<Suggestion>),
    NotHandled,
}

impl Completion {
    pub fn is_handled(&self) -> bool {
        matches!(self, Completion::Handled(_))
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Completion::Handled(suggestions) => suggestions,
            Completion::NotHandled => &[],
        }
    }
}

/// Options whose values this dispatcher can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletableOption {
    Id,
    Name,
    Profile,
}

impl CompletableOption {
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "-id" | "--id" => Some(CompletableOption::Id),
            "-name" | "--name" => Some(CompletableOption::Name),
            "-profile" | "--profile" => Some(CompletableOption::Profile),
            _ => None,
        }
    }
}

/// Routes a completion request to profile or catalog suggestions based on
/// the option flag preceding the cursor.
pub struct CompletionDispatcher {
    default_client: OnceCell<Box<dyn CatalogClient>>,
    /// Profile the default client is built for on first use, when it was
    /// not supplied up front.
    default_profile: Option<String>,
    profiles: ProfileStore,
    resolver: SecretResolver,
    factory: Box<dyn ClientFactory>,
    app_tag: String,
}

impl CompletionDispatcher {
    /// `default_client` serves catalog requests whose line names no known
    /// profile.
    pub fn new(
        default_client: Box<dyn CatalogClient>,
        profiles: ProfileStore,
        resolver: SecretResolver,
        factory: Box<dyn ClientFactory>,
        app_tag: impl Into<String>,
    ) -> Self {
        Self {
            default_client: OnceCell::from(default_client),
            default_profile: None,
            profiles,
            resolver,
            factory,
            app_tag: app_tag.into(),
        }
    }

    /// Like [`CompletionDispatcher::new`], but the default client for
    /// `default_profile` is only resolved and connected the first time a
    /// line without a named profile asks for catalog suggestions.
    pub fn with_default_profile(
        default_profile: impl Into<String>,
        profiles: ProfileStore,
        resolver: SecretResolver,
        factory: Box<dyn ClientFactory>,
        app_tag: impl Into<String>,
    ) -> Self {
        Self {
            default_client: OnceCell::new(),
            default_profile: Some(default_profile.into()),
            profiles,
            resolver,
            factory,
            app_tag: app_tag.into(),
        }
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// Complete the word at the end of `text_before_cursor`.
    ///
    /// Errors are fatal ones only: resolving or connecting for a profile
    /// named on the line. Catalog query failures yield an empty `Handled`.
    pub fn complete(&self, text_before_cursor: &str) -> Result<Completion> {
        let line = CommandLine::new(text_before_cursor);

        let Some(flag) = line.previous_option() else {
            return Ok(Completion::NotHandled);
        };
        let Some(option) = CompletableOption::from_flag(flag) else {
            tracing::debug!(flag, "option not completable");
            return Ok(Completion::NotHandled);
        };

        let active_profile = line.find_profile(|token| self.profiles.contains(token));
        let fragment = line.word_before_cursor();
        tracing::debug!(?option, ?active_profile, fragment, "dispatching completion");

        let candidates = match option {
            CompletableOption::Id => {
                self.catalog_suggestions(active_profile, SuggestionField::ProviderId)?
            }
            CompletableOption::Name => {
                self.catalog_suggestions(active_profile, SuggestionField::CustomerName)?
            }
            CompletableOption::Profile => self.profiles.suggestions().to_vec(),
        };

        Ok(Completion::Handled(filter_fuzzy(&candidates, fragment)))
    }

    /// Unfiltered catalog suggestions, from a fresh client for `profile` when
    /// given, otherwise from the default client.
    pub fn catalog_suggestions(
        &self,
        profile: Option<&str>,
        field: SuggestionField,
    ) -> Result<Vec<Suggestion>> {
        match profile {
            Some(profile) => {
                let client = self.connect(profile)?;
                Ok(fetch_suggestions(client.as_ref(), &self.app_tag, field))
            }
            None => Ok(fetch_suggestions(
                self.default_client()?,
                &self.app_tag,
                field,
            )),
        }
    }

    fn default_client(&self) -> Result<&dyn CatalogClient> {
        if let Some(client) = self.default_client.get() {
            return Ok(client.as_ref());
        }

        let profile = self.default_profile.as_deref().ok_or_else(|| {
            CompleteError::Config("no default catalog client configured".to_string())
        })?;
        let client = self.connect(profile)?;
        tracing::info!(profile, "default catalog client ready");
        Ok(self.default_client.get_or_init(|| client).as_ref())
    }

    fn connect(&self, profile: &str) -> Result<Box<dyn CatalogClient>> {
        let credentials = self.resolver.resolve(profile)?;
        self.factory.connect(&credentials)
    }
}
