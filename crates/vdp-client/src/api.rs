/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # API Module
//!
//! The operations the harness drives, independent of the transport.
//!
//! Each resource gets its own trait; [`Backend`] bundles them together with
//! the connection-level concerns (namespace, credentials). The REST and gRPC
//! clients both implement every trait, so a check is written once against
//! `&dyn Backend` and runs over either surface.
//!
//! Every operation returns `Ok(Reply<T>)` once a response was observed,
//! whatever its status. Request bodies for mutating calls are plain JSON so
//! checks can send partial, malformed or extra fields on purpose.

use crate::auth::Credentials;
use crate::error::Result;
use crate::status::Reply;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use vdp_models::{
    ComponentDefinitionPage, Connector, ConnectorDefinition, ConnectorDefinitionPage,
    ConnectorPage, Operation, OperatorDefinition, OperatorDefinitionPage, Pipeline, PipelinePage,
    PipelineRelease, ReleasePage, StateResponse, TriggerResponse, View,
};

/// Which surface a client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Rest,
    Grpc,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Rest => write!(f, "rest"),
            Transport::Grpc => write!(f, "grpc"),
        }
    }
}

/// Paging, view and filter parameters of a List call.
///
/// Unset fields are not sent, leaving the server default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
    pub page: Option<i32>,
    pub view: View,
    pub filter: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, size: i32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    pub fn page(mut self, page: i32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Query-string pairs in the order they are sent.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        if let Some(token) = self.page_token.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("page_token", token.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(view) = self.view.as_param() {
            pairs.push(("view", view.to_string()));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.clone()));
        }
        pairs
    }
}

#[async_trait]
pub trait ConnectorDefinitionApi: Send + Sync {
    async fn list_connector_definitions(
        &self,
        query: &ListQuery,
    ) -> Result<Reply<ConnectorDefinitionPage>>;

    async fn get_connector_definition(
        &self,
        id: &str,
        view: View,
    ) -> Result<Reply<ConnectorDefinition>>;
}

/// Connectors under the client's namespace, addressed by id.
#[async_trait]
pub trait ConnectorApi: Send + Sync {
    async fn create_connector(&self, body: &Value) -> Result<Reply<Connector>>;
    async fn list_connectors(&self, query: &ListQuery) -> Result<Reply<ConnectorPage>>;
    async fn get_connector(&self, id: &str, view: View) -> Result<Reply<Connector>>;
    /// Partial update; `mask` names the fields to apply.
    async fn update_connector(
        &self,
        id: &str,
        body: &Value,
        mask: &[&str],
    ) -> Result<Reply<Connector>>;
    async fn delete_connector(&self, id: &str) -> Result<Reply<()>>;
    async fn rename_connector(&self, id: &str, new_id: &str) -> Result<Reply<Connector>>;
    async fn connect_connector(&self, id: &str) -> Result<Reply<Connector>>;
    async fn disconnect_connector(&self, id: &str) -> Result<Reply<Connector>>;
    async fn watch_connector(&self, id: &str) -> Result<Reply<StateResponse>>;
    async fn test_connector(&self, id: &str) -> Result<Reply<StateResponse>>;
    async fn execute_connector(&self, id: &str, inputs: &[Value]) -> Result<Reply<Value>>;
    /// Resolves a connector by its permalink uid.
    async fn lookup_connector(&self, uid: &str, view: View) -> Result<Reply<Connector>>;
}

#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// `None` sends a request without a body.
    async fn create_pipeline(&self, body: Option<&Value>) -> Result<Reply<Pipeline>>;
    async fn list_pipelines(&self, query: &ListQuery) -> Result<Reply<PipelinePage>>;
    async fn get_pipeline(&self, id: &str, view: View) -> Result<Reply<Pipeline>>;
    async fn update_pipeline(
        &self,
        id: &str,
        body: &Value,
        mask: &[&str],
    ) -> Result<Reply<Pipeline>>;
    async fn delete_pipeline(&self, id: &str) -> Result<Reply<()>>;
    async fn rename_pipeline(&self, id: &str, new_id: &str) -> Result<Reply<Pipeline>>;
    async fn lookup_pipeline(&self, uid: &str, view: View) -> Result<Reply<Pipeline>>;
    /// Synchronous trigger.
    async fn trigger_pipeline(&self, id: &str, inputs: &[Value]) -> Result<Reply<TriggerResponse>>;
    /// Starts a trigger and returns the long-running operation tracking it.
    async fn trigger_pipeline_async(&self, id: &str, inputs: &[Value])
        -> Result<Reply<Operation>>;
    /// Fetches an operation by its id, without the `operations/` prefix.
    async fn get_operation(&self, id: &str) -> Result<Reply<Operation>>;
}

#[async_trait]
pub trait ReleaseApi: Send + Sync {
    async fn create_release(&self, pipeline_id: &str, body: &Value)
        -> Result<Reply<PipelineRelease>>;
    async fn list_releases(
        &self,
        pipeline_id: &str,
        query: &ListQuery,
    ) -> Result<Reply<ReleasePage>>;
    async fn get_release(
        &self,
        pipeline_id: &str,
        release_id: &str,
        view: View,
    ) -> Result<Reply<PipelineRelease>>;
    async fn delete_release(&self, pipeline_id: &str, release_id: &str) -> Result<Reply<()>>;
}

#[async_trait]
pub trait ComponentDefinitionApi: Send + Sync {
    async fn list_component_definitions(
        &self,
        query: &ListQuery,
    ) -> Result<Reply<ComponentDefinitionPage>>;
}

#[async_trait]
pub trait OperatorDefinitionApi: Send + Sync {
    async fn list_operator_definitions(
        &self,
        query: &ListQuery,
    ) -> Result<Reply<OperatorDefinitionPage>>;

    async fn get_operator_definition(
        &self,
        id: &str,
        view: View,
    ) -> Result<Reply<OperatorDefinition>>;
}

/// Private service calls. No credentials are attached.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_connectors_admin(&self, query: &ListQuery) -> Result<Reply<ConnectorPage>>;
    async fn lookup_connector_admin(&self, uid: &str, view: View) -> Result<Reply<Connector>>;
    async fn list_pipelines_admin(&self, query: &ListQuery) -> Result<Reply<PipelinePage>>;
    async fn lookup_pipeline_admin(&self, uid: &str, view: View) -> Result<Reply<Pipeline>>;
}

#[async_trait]
pub trait HealthApi: Send + Sync {
    async fn health(&self) -> Result<Reply<()>>;
}

/// One connection to the backend under test.
pub trait Backend:
    ConnectorDefinitionApi
    + ConnectorApi
    + PipelineApi
    + ReleaseApi
    + ComponentDefinitionApi
    + OperatorDefinitionApi
    + AdminApi
    + HealthApi
    + Send
    + Sync
{
    fn transport(&self) -> Transport;

    /// Namespace every namespaced resource lives under, e.g. `users/admin`
    fn namespace(&self) -> &str;

    fn credentials(&self) -> &Credentials;

    /// The same connection, sending `credentials` instead.
    fn with_credentials(&self, credentials: Credentials) -> Box<dyn Backend>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Verifies only the set parameters are sent, in a stable order.
    ///
    /// This test:
    /// 1. Builds a query with size, an empty token, a view and a filter
    /// 2. Checks the empty token is dropped and the rest keep their order
    fn test_list_query_pairs() {
        let query = ListQuery::new()
            .page_size(3)
            .page_token("")
            .view(View::Full)
            .filter("q_title=\"JSO\"");

        assert_eq!(
            query.to_pairs(),
            vec![
                ("page_size", "3".to_string()),
                ("view", "VIEW_FULL".to_string()),
                ("filter", "q_title=\"JSO\"".to_string()),
            ]
        );
        assert!(ListQuery::new().to_pairs().is_empty());
    }

    #[test]
    fn test_negative_values_are_sent() {
        let pairs = ListQuery::new().page_size(-1).page(-2).to_pairs();
        assert_eq!(pairs[0], ("page_size", "-1".to_string()));
        assert_eq!(pairs[1], ("page", "-2".to_string()));
    }
}
