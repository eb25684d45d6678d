//! Blocking Consul HTTP API client.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;
use secrecy::ExposeSecret;

use super::{CatalogClient, CatalogNode, ClientFactory};
use crate::config::Settings;
use crate::error::{CompleteError, Result};
use crate::secrets::Credentials;

const TOKEN_HEADER: &str = "X-Consul-Token";
const NODES_PATH: &str = "v1/catalog/nodes";

/// Catalog client bound to one Consul address and token.
#[derive(Debug, Clone)]
pub struct ConsulCatalog {
    http: Client,
    nodes_url: Url,
}

impl ConsulCatalog {
    /// Build a client for `address`. Fails if the address is not a URL or the
    /// token is not a valid header value.
    pub fn new(address: &str, credentials: &Credentials, settings: &Settings) -> Result<Self> {
        let build_error = |reason: String| CompleteError::ClientBuild {
            address: address.to_string(),
            reason,
        };

        let base = Url::parse(address).map_err(|e| build_error(e.to_string()))?;
        let nodes_url = base
            .join(NODES_PATH)
            .map_err(|e| build_error(e.to_string()))?;

        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(credentials.token.expose_secret())
            .map_err(|_| build_error("token is not a valid header value".to_string()))?;
        token.set_sensitive(true);
        headers.insert(TOKEN_HEADER, token);

        let http = Client::builder()
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.request_timeout())
            .user_agent(concat!("platform-complete/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| build_error(e.to_string()))?;

        Ok(Self { http, nodes_url })
    }
}

impl CatalogClient for ConsulCatalog {
    fn nodes(&self, filter: &str) -> Result<Vec<CatalogNode>> {
        let mut url = self.nodes_url.clone();
        url.query_pairs_mut().append_pair("filter", filter);

        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| CompleteError::CatalogQuery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CompleteError::CatalogQuery(format!(
                "HTTP {} - {}",
                status.as_u16(),
                body.trim()
            )));
        }

        response
            .json::<Vec<CatalogNode>>()
            .map_err(|e| CompleteError::CatalogQuery(format!("invalid catalog response: {e}")))
    }
}

/// Builds [`ConsulCatalog`] clients at the address for each environment.
#[derive(Debug, Clone)]
pub struct ConsulClientFactory {
    settings: Settings,
}

impl ConsulClientFactory {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl ClientFactory for ConsulClientFactory {
    fn connect(&self, credentials: &Credentials) -> Result<Box<dyn CatalogClient>> {
        let address = self.settings.catalog_address(credentials.environment);
        tracing::debug!(address = %address, "building catalog client");
        let catalog = ConsulCatalog::new(&address, credentials, &self.settings)?;
        Ok(Box::new(catalog))
    }
}
