/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

use crate::models::common::{int_from_any, Paginated};
use serde::{Deserialize, Serialize};

/// A catalog entry describing a built-in operator.
///
/// `spec` is only populated under `VIEW_FULL`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorDefinition {
    /// Canonical name, `operator-definitions/{id}`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "documentation_url")]
    pub documentation_url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub spec: Option<serde_json::Value>,
    #[serde(default)]
    pub tombstone: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub custom: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorDefinitionPage {
    #[serde(default, alias = "operator_definitions")]
    pub operator_definitions: Vec<OperatorDefinition>,
    #[serde(default, alias = "next_page_token")]
    pub next_page_token: String,
    #[serde(default, alias = "total_size", deserialize_with = "int_from_any")]
    pub total_size: i64,
}

impl Paginated for OperatorDefinitionPage {
    type Item = OperatorDefinition;

    fn items(&self) -> &[OperatorDefinition] {
        &self.operator_definitions
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
    use serde_json::json;

    #[test]
    /// Verifies both spellings of a page decode the same way.
    fn test_page_decodes_either_case() {
        let camel: OperatorDefinitionPage = serde_json::from_value(json!({
            "operatorDefinitions": [{"name": "operator-definitions/op-json", "id": "op-json", "spec": null}],
            "nextPageToken": "next",
            "totalSize": "4"
        }))
        .unwrap();
        let snake: OperatorDefinitionPage = serde_json::from_value(json!({
            "operator_definitions": [{"name": "operator-definitions/op-json", "id": "op-json"}],
            "next_page_token": "next",
            "total_size": 4
        }))
        .unwrap();

        assert_eq!(camel, snake);
        assert_eq!(camel.total_size(), 4);
        assert!(camel.items()[0].spec.is_none());
    }
}
