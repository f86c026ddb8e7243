/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Connectors Module
//!
//! A connector is a configured instance of a connector definition living
//! under a namespace, `{namespace}/connectors/{id}`.
//!
//! ## Core Data Model
//!
//! - `id`: caller supplied, last segment of `name`
//! - `uid`: server generated UUID, stable across renames (the permalink)
//! - `connector_definition_name`: the definition it instantiates
//! - `configuration`: opaque object, only returned under `VIEW_FULL`
//! - `owner`: only returned under `VIEW_FULL`
//! - `state`: driven by Connect, Disconnect and Test
//!
//! ## Usage Example
//!
//! ```rust
//! use vdp_models::NewConnector;
//! use serde_json::json;
//!
//! let body = NewConnector::new(
//!     "abcdefghij",
//!     "connector-definitions/airbyte-destination",
//!     json!({"destination": "airbyte-destination-csv", "destination_path": "/local/test"}),
//! );
//! assert_eq!(body.id, "abcdefghij");
//! ```

use crate::models::common::{int_from_any, Paginated};
use crate::models::owner::Owner;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectorState {
    #[default]
    #[serde(rename = "STATE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "STATE_DISCONNECTED")]
    Disconnected,
    #[serde(rename = "STATE_CONNECTED")]
    Connected,
    #[serde(rename = "STATE_ERROR")]
    Error,
}

impl ConnectorState {
    /// Maps the protobuf enum number, unknown numbers are `Unspecified`.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => ConnectorState::Disconnected,
            2 => ConnectorState::Connected,
            3 => ConnectorState::Error,
            _ => ConnectorState::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorState::Unspecified => "STATE_UNSPECIFIED",
            ConnectorState::Disconnected => "STATE_DISCONNECTED",
            ConnectorState::Connected => "STATE_CONNECTED",
            ConnectorState::Error => "STATE_ERROR",
        }
    }
}

impl fmt::Display for ConnectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Connector {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "connectorDefinitionName")]
    pub connector_definition_name: String,
    /// Embedded definition, `VIEW_FULL` only
    #[serde(default, alias = "connectorDefinitionDetail")]
    pub connector_definition_detail: Option<serde_json::Value>,
    #[serde(default)]
    pub description: String,
    /// `VIEW_FULL` only
    #[serde(default)]
    pub configuration: Option<serde_json::Value>,
    #[serde(default)]
    pub state: ConnectorState,
    #[serde(default)]
    pub tombstone: bool,
    /// `VIEW_FULL` only
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default, alias = "createTime")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, alias = "updateTime")]
    pub update_time: Option<DateTime<Utc>>,
}

/// Create request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConnector {
    pub id: String,
    pub connector_definition_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub configuration: serde_json::Value,
}

impl NewConnector {
    pub fn new(
        id: impl Into<String>,
        definition: impl Into<String>,
        configuration: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            connector_definition_name: definition.into(),
            description: None,
            configuration,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Body of Watch and Test responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateResponse {
    #[serde(default)]
    pub state: ConnectorState,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectorPage {
    #[serde(default)]
    pub connectors: Vec<Connector>,
    #[serde(default, alias = "nextPageToken")]
    pub next_page_token: String,
    #[serde(default, alias = "totalSize", deserialize_with = "int_from_any")]
    pub total_size: i64,
}

impl Paginated for ConnectorPage {
    type Item = Connector;

    fn items(&self) -> &[Connector] {
        &self.connectors
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
    /// Verifies a basic-view connector decodes with elided fields as `None`.
    ///
    /// This test:
    /// 1. Decodes a connector with a null configuration and no owner
    /// 2. Checks the state string maps onto the enum
    fn test_basic_view_connector() {
        let connector: Connector = serde_json::from_value(json!({
            "name": "users/admin/connectors/abc",
            "uid": "2b2d9a4e-1c1f-4b8e-9a5f-6e7d8c9b0a1f",
            "id": "abc",
            "connector_definition_name": "connector-definitions/airbyte-destination",
            "configuration": null,
            "state": "STATE_CONNECTED",
            "tombstone": false,
            "create_time": "2024-01-02T03:04:05Z"
        }))
        .unwrap();

        assert!(connector.configuration.is_none());
        assert!(connector.owner.is_none());
        assert_eq!(connector.state, ConnectorState::Connected);
        assert!(connector.create_time.is_some());
    }

    #[test]
    /// Verifies camelCase payloads decode into the same shape.
    fn test_camel_case_connector() {
        let connector: Connector = serde_json::from_value(json!({
            "id": "abc",
            "connectorDefinitionName": "connector-definitions/airbyte-destination",
            "configuration": {"destination_path": "/tmp"},
            "updateTime": "2024-01-02T03:04:05Z"
        }))
        .unwrap();

        assert_eq!(
            connector.connector_definition_name,
            "connector-definitions/airbyte-destination"
        );
        assert_eq!(connector.configuration.unwrap()["destination_path"], "/tmp");
        assert_eq!(connector.state, ConnectorState::Unspecified);
    }

    #[test]
    /// Verifies the create body omits an unset description.
    fn test_new_connector_serialization() {
        let body = NewConnector::new("abc", "connector-definitions/x", json!({}));
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("description").is_none());

        let value = serde_json::to_value(body.with_description("")).unwrap();
        assert_eq!(value["description"], "");
    }

    #[test]
    fn test_state_from_i32() {
        assert_eq!(ConnectorState::from_i32(2), ConnectorState::Connected);
        assert_eq!(ConnectorState::from_i32(1).to_string(), "STATE_DISCONNECTED");
        assert_eq!(ConnectorState::from_i32(42), ConnectorState::Unspecified);
    }
}
