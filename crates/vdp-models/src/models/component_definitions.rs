/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Component Definitions Module
//!
//! The component catalog. Unlike the other lists it is offset paginated:
//! callers pass `page` and `pageSize`, and the response echoes the page it
//! actually served (a negative `page` is served and reported as page 0).

use crate::models::common::int_from_any;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `COMPONENT_TYPE_OPERATOR`, `COMPONENT_TYPE_AI`, ...
    #[serde(default, rename = "type", alias = "component_type")]
    pub component_type: String,
    /// `RELEASE_STAGE_ALPHA`, `RELEASE_STAGE_GA`, ...
    #[serde(default, alias = "release_stage")]
    pub release_stage: String,
    /// `VIEW_FULL` only
    #[serde(default)]
    pub spec: Option<serde_json::Value>,
    #[serde(default)]
    pub tombstone: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub vendor: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinitionPage {
    #[serde(default, alias = "component_definitions")]
    pub component_definitions: Vec<ComponentDefinition>,
    #[serde(default, alias = "total_size", deserialize_with = "int_from_any")]
    pub total_size: i64,
    #[serde(default, alias = "page_size", deserialize_with = "int_from_any")]
    pub page_size: i64,
    #[serde(default, deserialize_with = "int_from_any")]
    pub page: i64,
}

impl ComponentDefinitionPage {
    pub fn first_id(&self) -> Option<&str> {
        self.component_definitions.first().map(|d| d.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Verifies an offset page decodes and an omitted page number reads as 0.
    fn test_offset_page_decodes() {
        let page: ComponentDefinitionPage = serde_json::from_value(serde_json::json!({
            "componentDefinitions": [
                {"id": "json", "title": "JSON", "type": "COMPONENT_TYPE_OPERATOR",
                 "releaseStage": "RELEASE_STAGE_ALPHA", "spec": null}
            ],
            "totalSize": 42,
            "pageSize": 1
        }))
        .unwrap();

        assert_eq!(page.page, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_size, 42);
        assert_eq!(page.first_id(), Some("json"));
        assert_eq!(page.component_definitions[0].component_type, "COMPONENT_TYPE_OPERATOR");
        assert!(page.component_definitions[0].spec.is_none());
    }
}
