/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Pipeline releases, `{namespace}/pipelines/{pid}/releases/{rid}`.

use crate::models::common::{int_from_any, Paginated};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRelease {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    /// `VIEW_FULL` only
    #[serde(default)]
    pub recipe: Option<serde_json::Value>,
    #[serde(default, alias = "raw_recipe")]
    pub raw_recipe: Option<String>,
    #[serde(default, alias = "create_time")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, alias = "update_time")]
    pub update_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewRelease {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasePage {
    #[serde(default, alias = "pipeline_releases")]
    pub releases: Vec<PipelineRelease>,
    #[serde(default, alias = "next_page_token")]
    pub next_page_token: String,
    #[serde(default, alias = "total_size", deserialize_with = "int_from_any")]
    pub total_size: i64,
}

impl Paginated for ReleasePage {
    type Item = PipelineRelease;

    fn items(&self) -> &[PipelineRelease] {
        &self.releases
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
    /// Verifies both list renderings of releases decode.
    fn test_release_page_aliases() {
        let camel: ReleasePage = serde_json::from_str(
            r#"{"releases":[{"id":"v1","name":"users/a/pipelines/p/releases/v1"}],"totalSize":1}"#,
        )
        .unwrap();
        let snake: ReleasePage = serde_json::from_str(
            r#"{"pipeline_releases":[{"id":"v1"}],"next_page_token":"","total_size":"1"}"#,
        )
        .unwrap();

        assert_eq!(camel.items()[0].id, "v1");
        assert_eq!(snake.items().len(), 1);
        assert_eq!(snake.total_size(), 1);
    }
}
