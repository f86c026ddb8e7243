/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

use crate::models::common::{int_from_any, Paginated};
use serde::{Deserialize, Serialize};

/// A catalog entry describing a kind of connector.
///
/// Read-only from the harness's perspective. `spec` is only populated
/// under `VIEW_FULL`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectorDefinition {
    /// Canonical name, `connector-definitions/{id}`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "documentationUrl")]
    pub documentation_url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, alias = "type")]
    pub connector_type: Option<String>,
    #[serde(default)]
    pub spec: Option<serde_json::Value>,
    #[serde(default)]
    pub tombstone: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub vendor: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectorDefinitionPage {
    #[serde(default)]
    pub connector_definitions: Vec<ConnectorDefinition>,
    #[serde(default, alias = "nextPageToken")]
    pub next_page_token: String,
    #[serde(default, alias = "totalSize", deserialize_with = "int_from_any")]
    pub total_size: i64,
}

impl Paginated for ConnectorDefinitionPage {
    type Item = ConnectorDefinition;

    fn items(&self) -> &[ConnectorDefinition] {
        &self.connector_definitions
    }

    fn next_page_token(&self) -> &str {
        &self.next_page_token
    }

    fn total_size(&self) -> i64 {
        self.total_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Verifies a basic-view page decodes with a null spec and a string total.
    fn test_basic_page_decodes() {
        let page: ConnectorDefinitionPage = serde_json::from_value(serde_json::json!({
            "connector_definitions": [
                {"name": "connector-definitions/airbyte-destination", "id": "airbyte-destination", "spec": null}
            ],
            "next_page_token": "",
            "total_size": "1"
        }))
        .unwrap();

        assert_eq!(page.items().len(), 1);
        assert_eq!(page.total_size(), 1);
        assert!(page.items()[0].spec.is_none());
        assert!(page.next_page_token().is_empty());
    }
}
