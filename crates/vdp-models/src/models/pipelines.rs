/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Pipelines Module
//!
//! A pipeline is a component graph (its recipe) owned by a namespace,
//! `{namespace}/pipelines/{id}`. The id is generated by the server.
//!
//! ## Core Data Model
//!
//! - `name`: canonical identifier, `id` is always its last segment
//! - `recipe`: the parsed component graph, `VIEW_FULL` only
//! - `rawRecipe`: the YAML the pipeline was created from
//! - `creatorName`: `users/{id}` of the creator
//! - `createTime` / `updateTime`: an update always moves `updateTime` forward
//!
//! Pipeline payloads are camelCase on the wire; snake_case aliases are
//! accepted so both gateway renderings decode.

use crate::models::common::{int_from_any, Paginated};
use crate::models::owner::Owner;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "display_name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    /// `VIEW_FULL` only
    #[serde(default)]
    pub recipe: Option<serde_json::Value>,
    #[serde(default, alias = "raw_recipe")]
    pub raw_recipe: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default, alias = "creator_name")]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "create_time")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, alias = "update_time")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Pipeline {
    /// Returns the component graph as JSON.
    ///
    /// Prefers the server-rendered `recipe`; falls back to parsing
    /// `rawRecipe` when only the YAML source was returned.
    pub fn recipe_value(&self) -> Result<Option<serde_json::Value>, serde_yaml::Error> {
        if let Some(recipe) = &self.recipe {
            return Ok(Some(recipe.clone()));
        }
        match self.raw_recipe.as_deref().filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => Ok(Some(serde_yaml::from_str(raw)?)),
            None => Ok(None),
        }
    }
}

/// Create request body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPipeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_recipe: Option<String>,
}

impl NewPipeline {
    pub fn from_recipe(raw_recipe: impl Into<String>) -> Self {
        Self {
            raw_recipe: Some(raw_recipe.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelinePage {
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,
    #[serde(default, alias = "next_page_token")]
    pub next_page_token: String,
    #[serde(default, alias = "total_size", deserialize_with = "int_from_any")]
    pub total_size: i64,
}

impl Paginated for PipelinePage {
    type Item = Pipeline;

    fn items(&self) -> &[Pipeline] {
        &self.pipelines
    }

    fn next_page_token(&self) -> &str {
        &self.next_page_token
    }

    fn total_size(&self) -> i64 {
        self.total_size
    }
}

/// Result of a synchronous trigger.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggerResponse {
    #[serde(default)]
    pub outputs: Vec<serde_json::Value>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}
