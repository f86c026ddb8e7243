/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Common Module
//!
//! Pieces shared by every resource: the response view, the list-page
//! abstraction and lenient number decoding for counters.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Response-shaping parameter accepted by Get and List calls.
///
/// `Basic` elides heavyweight or sensitive sub-objects (`spec`,
/// `configuration`, `recipe`, `owner`), `Full` populates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum View {
    /// Let the server pick, which is `Basic` for every resource
    #[default]
    #[serde(rename = "VIEW_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "VIEW_BASIC")]
    Basic,
    #[serde(rename = "VIEW_FULL")]
    Full,
}

impl View {
    /// Wire name, or `None` when the parameter should be omitted.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            View::Unspecified => None,
            View::Basic => Some("VIEW_BASIC"),
            View::Full => Some("VIEW_FULL"),
        }
    }

    /// Protobuf enum number.
    pub fn as_i32(&self) -> i32 {
        match self {
            View::Unspecified => 0,
            View::Basic => 1,
            View::Full => 2,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param().unwrap_or("VIEW_UNSPECIFIED"))
    }
}

/// A token-paginated list response.
pub trait Paginated {
    type Item;

    /// Records on this page
    fn items(&self) -> &[Self::Item];
    /// Token for the next page, empty on the last page
    fn next_page_token(&self) -> &str;
    /// Total number of records matching the request
    fn total_size(&self) -> i64;
}

/// Decodes an integer that may arrive as a JSON number or a JSON string.
///
/// 64-bit protobuf integers are rendered as strings by the REST gateway.
pub fn int_from_any<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Raw::Number(n)) => Ok(n),
        Some(Raw::Text(s)) if s.is_empty() => Ok(0),
        Some(Raw::Text(s)) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Counter {
        #[serde(default, deserialize_with = "int_from_any")]
        total: i64,
    }

    #[test]
    /// Verifies counters decode from numbers, strings, null and absence.
    fn test_int_from_any() {
        let n: Counter = serde_json::from_str(r#"{"total": 12}"#).unwrap();
        let s: Counter = serde_json::from_str(r#"{"total": "12"}"#).unwrap();
        let null: Counter = serde_json::from_str(r#"{"total": null}"#).unwrap();
        let missing: Counter = serde_json::from_str(r#"{}"#).unwrap();

        assert_eq!(n.total, 12);
        assert_eq!(s.total, 12);
        assert_eq!(null.total, 0);
        assert_eq!(missing.total, 0);
        assert!(serde_json::from_str::<Counter>(r#"{"total": "many"}"#).is_err());
    }

    #[test]
    /// Verifies the view renders its wire name and omits the unspecified view.
    fn test_view_param() {
        assert_eq!(View::Full.as_param(), Some("VIEW_FULL"));
        assert_eq!(View::Basic.to_string(), "VIEW_BASIC");
        assert_eq!(View::default().as_param(), None);
    }
}
