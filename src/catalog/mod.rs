//! Service-discovery catalog access and node-to-suggestion mapping.

mod consul;

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

use crate::error::Result;
use crate::secrets::Credentials;
use crate::suggestion::Suggestion;

pub use consul::{ConsulCatalog, ConsulClientFactory};

pub const PROVIDER_ID_KEY: &str = "provider_id";
pub const CUSTOMER_NAME_KEY: &str = "customer_name";

/// A catalog node as returned by `/v1/catalog/nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogNode {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub datacenter: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub meta: HashMap<String, String>,
}

fn null_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

impl CatalogNode {
    /// Metadata value for `key`, empty when unset.
    pub fn meta_value(&self, key: &str) -> &str {
        self.meta.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Read-only view of a service-discovery catalog.
pub trait CatalogClient {
    /// Nodes matching a catalog filter expression.
    fn nodes(&self, filter: &str) -> Result<Vec<CatalogNode>>;
}

/// Builds catalog clients for resolved credentials.
pub trait ClientFactory {
    fn connect(&self, credentials: &Credentials) -> Result<Box<dyn CatalogClient>>;
}

/// Which node metadata field is offered as the completion value. The other
/// field becomes the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionField {
    ProviderId,
    CustomerName,
}

impl SuggestionField {
    fn keys(self) -> (&'static str, &'static str) {
        match self {
            SuggestionField::ProviderId => (PROVIDER_ID_KEY, CUSTOMER_NAME_KEY),
            SuggestionField::CustomerName => (CUSTOMER_NAME_KEY, PROVIDER_ID_KEY),
        }
    }

    pub fn to_suggestion(self, node: &CatalogNode) -> Suggestion {
        let (value_key, description_key) = self.keys();
        Suggestion::new(
            node.meta_value(value_key),
            format!("({})", node.meta_value(description_key)),
        )
    }
}

/// Filter expression selecting nodes tagged with `app_tag`.
pub fn app_filter(app_tag: &str) -> String {
    format!("Meta.app == \"{app_tag}\"")
}

/// Suggestions for every node tagged `app_tag`.
///
/// Query failures are logged and produce no suggestions.
pub fn fetch_suggestions(
    client: &dyn CatalogClient,
    app_tag: &str,
    field: SuggestionField,
) -> Vec<Suggestion> {
    let filter = app_filter(app_tag);
    match client.nodes(&filter) {
        Ok(nodes) => nodes.iter().map(|node| field.to_suggestion(node)).collect(),
        Err(e) => {
            tracing::warn!(filter = %filter, error = %e, "catalog query failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompleteError;
    use std::cell::RefCell;

    struct StaticCatalog {
        nodes: Vec<CatalogNode>,
        filters: RefCell<Vec<String>>,
    }

    impl CatalogClient for StaticCatalog {
        fn nodes(&self, filter: &str) -> Result<Vec<CatalogNode>> {
            self.filters.borrow_mut().push(filter.to_string());
            Ok(self.nodes.clone())
        }
    }

    struct BrokenCatalog;

    impl CatalogClient for BrokenCatalog {
        fn nodes(&self, _filter: &str) -> Result<Vec<CatalogNode>> {
            Err(CompleteError::CatalogQuery("connection refused".to_string()))
        }
    }

    fn node(provider_id: &str, customer_name: &str) -> CatalogNode {
        CatalogNode {
            node: format!("platform-{provider_id}"),
            meta: HashMap::from([
                ("app".to_string(), "platform".to_string()),
                (PROVIDER_ID_KEY.to_string(), provider_id.to_string()),
                (CUSTOMER_NAME_KEY.to_string(), customer_name.to_string()),
            ]),
            ..CatalogNode::default()
        }
    }

    #[test]
    fn test_provider_id_suggestions() {
        let catalog = StaticCatalog {
            nodes: vec![node("p-100", "Acme"), node("p-200", "Globex")],
            filters: RefCell::new(Vec::new()),
        };

        let suggestions = fetch_suggestions(&catalog, "platform", SuggestionField::ProviderId);
        assert_eq!(
            suggestions,
            vec![
                Suggestion::new("p-100", "(Acme)"),
                Suggestion::new("p-200", "(Globex)"),
            ]
        );
        assert_eq!(*catalog.filters.borrow(), vec!["Meta.app == \"platform\""]);
    }

    #[test]
    fn test_customer_name_suggestions_swap_fields() {
        let catalog = StaticCatalog {
            nodes: vec![node("p-100", "Acme")],
            filters: RefCell::new(Vec::new()),
        };

        let suggestions =
            fetch_suggestions(&catalog, "platform", SuggestionField::CustomerName);
        assert_eq!(suggestions, vec![Suggestion::new("Acme", "(p-100)")]);
    }

    #[test]
    fn test_duplicates_pass_through() {
        let catalog = StaticCatalog {
            nodes: vec![node("p-1", "Acme"), node("p-1", "Acme")],
            filters: RefCell::new(Vec::new()),
        };

        let suggestions = fetch_suggestions(&catalog, "platform", SuggestionField::ProviderId);
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_missing_metadata_reads_empty() {
        let bare = CatalogNode::default();
        assert_eq!(
            SuggestionField::ProviderId.to_suggestion(&bare),
            Suggestion::new("", "()")
        );
    }

    #[test]
    fn test_query_failure_yields_no_suggestions() {
        let suggestions =
            fetch_suggestions(&BrokenCatalog, "platform", SuggestionField::ProviderId);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_node_deserializes_consul_shape() {
        let json = r#"{
            "ID": "40e4a748-2192-161a-0510-9bf59fe950b5",
            "Node": "platform-7",
            "Address": "10.1.10.12",
            "Datacenter": "dc1",
            "TaggedAddresses": {"lan": "10.1.10.12"},
            "Meta": {"app": "platform", "provider_id": "p-7", "customer_name": "Initech"},
            "CreateIndex": 13,
            "ModifyIndex": 14
        }"#;
        let node: CatalogNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.node, "platform-7");
        assert_eq!(node.meta_value(PROVIDER_ID_KEY), "p-7");
        assert_eq!(node.meta_value(CUSTOMER_NAME_KEY), "Initech");
    }

    #[test]
    fn test_node_deserializes_missing_or_null_meta() {
        let node: CatalogNode = serde_json::from_str(r#"{"Node": "bare"}"#).unwrap();
        assert!(node.meta.is_empty());

        let node: CatalogNode =
            serde_json::from_str(r#"{"Node": "bare", "Meta": null}"#).unwrap();
        assert_eq!(node.meta_value(PROVIDER_ID_KEY), "");
    }
}
