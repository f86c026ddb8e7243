/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # REST Module
//!
//! The [`Backend`] over the JSON gateway.
//!
//! Public calls go to `{public}/v1beta/...` with the client's credentials
//! attached; admin calls go to `{private}/v1beta/admin/...` without any.
//! Single-resource responses are wrapped in an envelope named after the
//! resource (`{"connector": {...}}`), list responses are not.

use crate::api::{
    AdminApi, Backend, ComponentDefinitionApi, ConnectorApi, ConnectorDefinitionApi, HealthApi,
    ListQuery, OperatorDefinitionApi, PipelineApi, ReleaseApi, Transport,
};
use crate::auth::Credentials;
use crate::error::{ClientError, Result};
use crate::status::{Reply, Status};
use async_trait::async_trait;
use log::debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use vdp_models::{
    ComponentDefinitionPage, Connector, ConnectorDefinition, ConnectorDefinitionPage,
    ConnectorPage, Operation, OperatorDefinition, OperatorDefinitionPage, Pipeline, PipelinePage,
    PipelineRelease, ReleasePage, StateResponse, TriggerResponse, View,
};
use vdp_utils::Endpoints;

const API_VERSION: &str = "v1beta";

/// Which service a request targets.
#[derive(Debug, Clone, Copy)]
enum Service {
    Public,
    Private,
}

/// REST client for the pipeline backend.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    public: String,
    private: String,
    namespace: String,
    credentials: Credentials,
}

impl RestClient {
    /// Builds a client for the resolved endpoints.
    pub fn new(endpoints: &Endpoints, namespace: &str, timeout: Duration) -> Result<Self> {
        Self::from_urls(
            &endpoints.pipeline_public_rest,
            &endpoints.pipeline_private_rest,
            namespace,
            timeout,
        )
    }

    /// Builds a client from explicit base URLs.
    pub fn from_urls(
        public: &str,
        private: &str,
        namespace: &str,
        timeout: Duration,
    ) -> Result<Self> {
        url::Url::parse(public)?;
        url::Url::parse(private)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            public: public.trim_end_matches('/').to_string(),
            private: private.trim_end_matches('/').to_string(),
            namespace: namespace.to_string(),
            credentials: Credentials::Anonymous,
        })
    }

    fn url(&self, service: Service, path: &str) -> String {
        let base = match service {
            Service::Public => &self.public,
            Service::Private => &self.private,
        };
        format!("{}/{}/{}", base, API_VERSION, path.trim_start_matches('/'))
    }

    fn ns_path(&self, rest: &str) -> String {
        format!("{}/{}", self.namespace, rest)
    }

    async fn send(
        &self,
        method: Method,
        service: Service,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<(Status, String)> {
        let url = self.url(service, path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Service::Public = service {
            for (name, value) in self.credentials.headers() {
                request = request.header(name, value);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = Status::Http(response.status().as_u16());
        let text = response.text().await?;
        Ok((status, text))
    }

    /// Sends a request and decodes the body, or the field `envelope` of it.
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        service: Service,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
        envelope: Option<&str>,
    ) -> Result<Reply<T>> {
        let (status, text) = self.send(method, service, path, query, body).await?;
        decode(status, &text, envelope)
    }

    /// Sends a request whose successful response carries no body.
    async fn call_empty(
        &self,
        method: Method,
        service: Service,
        path: &str,
    ) -> Result<Reply<()>> {
        let (status, text) = self.send(method, service, path, &[], None).await?;
        if status.is_success() {
            Ok(Reply::ok(status, ()))
        } else {
            Ok(Reply::failed(status, error_message(&text)))
        }
    }
}

/// Decodes a response body into a [`Reply`].
///
/// A successful response that does not decode yields an undecodable reply
/// rather than an error, so the caller can record it and carry on.
pub(crate) fn decode<T: DeserializeOwned>(
    status: Status,
    text: &str,
    envelope: Option<&str>,
) -> Result<Reply<T>> {
    if !status.is_success() {
        return Ok(Reply::failed(status, error_message(text)));
    }
    match decode_body(text, envelope) {
        Ok(body) => Ok(Reply::ok(status, body)),
        Err(ClientError::Decode(reason)) => {
            debug!("undecodable {} response: {}", status, reason);
            Ok(Reply::undecodable(status, reason))
        }
        Err(e) => Err(e),
    }
}

fn decode_body<T: DeserializeOwned>(text: &str, envelope: Option<&str>) -> Result<T> {
    let mut value: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text)?
    };
    if let Some(key) = envelope {
        value = match value.get_mut(key) {
            Some(inner) => inner.take(),
            None => {
                return Err(ClientError::Decode(format!(
                    "response has no `{}` field",
                    key
                )))
            }
        };
    }
    Ok(serde_json::from_value(value)?)
}

/// Extracts the server's error text from an error body.
fn error_message(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| text.trim().to_string())
}

fn view_query(view: View) -> Vec<(&'static str, String)> {
    view.as_param()
        .map(|v| vec![("view", v.to_string())])
        .unwrap_or_default()
}

#[async_trait]
impl ConnectorDefinitionApi for RestClient {
    async fn list_connector_definitions(
        &self,
        query: &ListQuery,
    ) -> Result<Reply<ConnectorDefinitionPage>> {
        self.call(
            Method::GET,
            Service::Public,
            "connector-definitions",
            &query.to_pairs(),
            None,
            None,
        )
        .await
    }

    async fn get_connector_definition(
        &self,
        id: &str,
        view: View,
    ) -> Result<Reply<ConnectorDefinition>> {
        self.call(
            Method::GET,
            Service::Public,
            &format!("connector-definitions/{}", id),
            &view_query(view),
            None,
            Some("connector_definition"),
        )
        .await
    }
}

#[async_trait]
impl ConnectorApi for RestClient {
    async fn create_connector(&self, body: &Value) -> Result<Reply<Connector>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path("connectors"),
            &[],
            Some(body),
            Some("connector"),
        )
        .await
    }

    async fn list_connectors(&self, query: &ListQuery) -> Result<Reply<ConnectorPage>> {
        self.call(
            Method::GET,
            Service::Public,
            &self.ns_path("connectors"),
            &query.to_pairs(),
            None,
            None,
        )
        .await
    }

    async fn get_connector(&self, id: &str, view: View) -> Result<Reply<Connector>> {
        self.call(
            Method::GET,
            Service::Public,
            &self.ns_path(&format!("connectors/{}", id)),
            &view_query(view),
            None,
            Some("connector"),
        )
        .await
    }

    async fn update_connector(
        &self,
        id: &str,
        body: &Value,
        mask: &[&str],
    ) -> Result<Reply<Connector>> {
        self.call(
            Method::PATCH,
            Service::Public,
            &self.ns_path(&format!("connectors/{}", id)),
            &mask_query(mask),
            Some(body),
            Some("connector"),
        )
        .await
    }

    async fn delete_connector(&self, id: &str) -> Result<Reply<()>> {
        self.call_empty(
            Method::DELETE,
            Service::Public,
            &self.ns_path(&format!("connectors/{}", id)),
        )
        .await
    }

    async fn rename_connector(&self, id: &str, new_id: &str) -> Result<Reply<Connector>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path(&format!("connectors/{}/rename", id)),
            &[],
            Some(&json!({ "new_connector_id": new_id })),
            Some("connector"),
        )
        .await
    }

    async fn connect_connector(&self, id: &str) -> Result<Reply<Connector>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path(&format!("connectors/{}/connect", id)),
            &[],
            Some(&json!({})),
            Some("connector"),
        )
        .await
    }

    async fn disconnect_connector(&self, id: &str) -> Result<Reply<Connector>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path(&format!("connectors/{}/disconnect", id)),
            &[],
            Some(&json!({})),
            Some("connector"),
        )
        .await
    }

    async fn watch_connector(&self, id: &str) -> Result<Reply<StateResponse>> {
        self.call(
            Method::GET,
            Service::Public,
            &self.ns_path(&format!("connectors/{}/watch", id)),
            &[],
            None,
            None,
        )
        .await
    }

    async fn test_connector(&self, id: &str) -> Result<Reply<StateResponse>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path(&format!("connectors/{}/testConnection", id)),
            &[],
            Some(&json!({})),
            None,
        )
        .await
    }

    async fn execute_connector(&self, id: &str, inputs: &[Value]) -> Result<Reply<Value>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path(&format!("connectors/{}/execute", id)),
            &[],
            Some(&json!({ "inputs": inputs })),
            None,
        )
        .await
    }

    async fn lookup_connector(&self, uid: &str, view: View) -> Result<Reply<Connector>> {
        self.call(
            Method::GET,
            Service::Public,
            &format!("connectors/{}/lookUp", uid),
            &view_query(view),
            None,
            Some("connector"),
        )
        .await
    }
}

fn mask_query(mask: &[&str]) -> Vec<(&'static str, String)> {
    if mask.is_empty() {
        Vec::new()
    } else {
        vec![("update_mask", mask.join(","))]
    }
}

#[async_trait]
impl PipelineApi for RestClient {
    async fn create_pipeline(&self, body: Option<&Value>) -> Result<Reply<Pipeline>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path("pipelines"),
            &[],
            body,
            Some("pipeline"),
        )
        .await
    }

    async fn list_pipelines(&self, query: &ListQuery) -> Result<Reply<PipelinePage>> {
        self.call(
            Method::GET,
            Service::Public,
            &self.ns_path("pipelines"),
            &query.to_pairs(),
            None,
            None,
        )
        .await
    }

    async fn get_pipeline(&self, id: &str, view: View) -> Result<Reply<Pipeline>> {
        self.call(
            Method::GET,
            Service::Public,
            &self.ns_path(&format!("pipelines/{}", id)),
            &view_query(view),
            None,
            Some("pipeline"),
        )
        .await
    }

    async fn update_pipeline(
        &self,
        id: &str,
        body: &Value,
        mask: &[&str],
    ) -> Result<Reply<Pipeline>> {
        self.call(
            Method::PATCH,
            Service::Public,
            &self.ns_path(&format!("pipelines/{}", id)),
            &mask_query(mask),
            Some(body),
            Some("pipeline"),
        )
        .await
    }

    async fn delete_pipeline(&self, id: &str) -> Result<Reply<()>> {
        self.call_empty(
            Method::DELETE,
            Service::Public,
            &self.ns_path(&format!("pipelines/{}", id)),
        )
        .await
    }

    async fn rename_pipeline(&self, id: &str, new_id: &str) -> Result<Reply<Pipeline>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path(&format!("pipelines/{}/rename", id)),
            &[],
            Some(&json!({ "new_pipeline_id": new_id })),
            Some("pipeline"),
        )
        .await
    }

    async fn lookup_pipeline(&self, uid: &str, view: View) -> Result<Reply<Pipeline>> {
        self.call(
            Method::GET,
            Service::Public,
            &format!("pipelines/{}/lookUp", uid),
            &view_query(view),
            None,
            Some("pipeline"),
        )
        .await
    }

    async fn trigger_pipeline(&self, id: &str, inputs: &[Value]) -> Result<Reply<TriggerResponse>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path(&format!("pipelines/{}/trigger", id)),
            &[],
            Some(&json!({ "inputs": inputs })),
            None,
        )
        .await
    }

    async fn trigger_pipeline_async(
        &self,
        id: &str,
        inputs: &[Value],
    ) -> Result<Reply<Operation>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path(&format!("pipelines/{}/triggerAsync", id)),
            &[],
            Some(&json!({ "inputs": inputs })),
            Some("operation"),
        )
        .await
    }

    async fn get_operation(&self, id: &str) -> Result<Reply<Operation>> {
        self.call(
            Method::GET,
            Service::Public,
            &format!("operations/{}", id),
            &[],
            None,
            Some("operation"),
        )
        .await
    }
}

#[async_trait]
impl ReleaseApi for RestClient {
    async fn create_release(
        &self,
        pipeline_id: &str,
        body: &Value,
    ) -> Result<Reply<PipelineRelease>> {
        self.call(
            Method::POST,
            Service::Public,
            &self.ns_path(&format!("pipelines/{}/releases", pipeline_id)),
            &[],
            Some(body),
            Some("release"),
        )
        .await
    }

    async fn list_releases(
        &self,
        pipeline_id: &str,
        query: &ListQuery,
    ) -> Result<Reply<ReleasePage>> {
        self.call(
            Method::GET,
            Service::Public,
            &self.ns_path(&format!("pipelines/{}/releases", pipeline_id)),
            &query.to_pairs(),
            None,
            None,
        )
        .await
    }

    async fn get_release(
        &self,
        pipeline_id: &str,
        release_id: &str,
        view: View,
    ) -> Result<Reply<PipelineRelease>> {
        self.call(
            Method::GET,
            Service::Public,
            &self.ns_path(&format!("pipelines/{}/releases/{}", pipeline_id, release_id)),
            &view_query(view),
            None,
            Some("release"),
        )
        .await
    }

    async fn delete_release(&self, pipeline_id: &str, release_id: &str) -> Result<Reply<()>> {
        self.call_empty(
            Method::DELETE,
            Service::Public,
            &self.ns_path(&format!("pipelines/{}/releases/{}", pipeline_id, release_id)),
        )
        .await
    }
}

#[async_trait]
impl ComponentDefinitionApi for RestClient {
    async fn list_component_definitions(
        &self,
        query: &ListQuery,
    ) -> Result<Reply<ComponentDefinitionPage>> {
        self.call(
            Method::GET,
            Service::Public,
            "component-definitions",
            &query.to_pairs(),
            None,
            None,
        )
        .await
    }
}

#[async_trait]
impl OperatorDefinitionApi for RestClient {
    async fn list_operator_definitions(
        &self,
        query: &ListQuery,
    ) -> Result<Reply<OperatorDefinitionPage>> {
        self.call(
            Method::GET,
            Service::Public,
            "operator-definitions",
            &query.to_pairs(),
            None,
            None,
        )
        .await
    }

    async fn get_operator_definition(
        &self,
        id: &str,
        view: View,
    ) -> Result<Reply<OperatorDefinition>> {
        self.call(
            Method::GET,
            Service::Public,
            &format!("operator-definitions/{}", id),
            &view_query(view),
            None,
            Some("operatorDefinition"),
        )
        .await
    }
}

#[async_trait]
impl AdminApi for RestClient {
    async fn list_connectors_admin(&self, query: &ListQuery) -> Result<Reply<ConnectorPage>> {
        self.call(
            Method::GET,
            Service::Private,
            "admin/connectors",
            &query.to_pairs(),
            None,
            None,
        )
        .await
    }

    async fn lookup_connector_admin(&self, uid: &str, view: View) -> Result<Reply<Connector>> {
        self.call(
            Method::GET,
            Service::Private,
            &format!("admin/connectors/{}/lookUp", uid),
            &view_query(view),
            None,
            Some("connector"),
        )
        .await
    }

    async fn list_pipelines_admin(&self, query: &ListQuery) -> Result<Reply<PipelinePage>> {
        self.call(
            Method::GET,
            Service::Private,
            "admin/pipelines",
            &query.to_pairs(),
            None,
            None,
        )
        .await
    }

    async fn lookup_pipeline_admin(&self, uid: &str, view: View) -> Result<Reply<Pipeline>> {
        self.call(
            Method::GET,
            Service::Private,
            &format!("admin/pipelines/{}/lookUp", uid),
            &view_query(view),
            None,
            Some("pipeline"),
        )
        .await
    }
}

#[async_trait]
impl HealthApi for RestClient {
    async fn health(&self) -> Result<Reply<()>> {
        let (status, text) = self
            .send(Method::GET, Service::Public, "health/pipeline", &[], None)
            .await?;
        if status.is_success() {
            Ok(Reply::ok(status, ()))
        } else {
            Ok(Reply::failed(status, error_message(&text)))
        }
    }
}

impl Backend for RestClient {
    fn transport(&self) -> Transport {
        Transport::Rest
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn with_credentials(&self, credentials: Credentials) -> Box<dyn Backend> {
        Box::new(RestClient {
            credentials,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Verifies envelope extraction and error message handling.
    ///
    /// This test:
    /// 1. Decodes a wrapped connector from a 201 response
    /// 2. Decodes a 404 into a failed reply carrying the server message
    /// 3. Checks a missing envelope or a malformed body is an undecodable reply
    fn test_decode() {
        let reply: Reply<Connector> = decode(
            Status::Http(201),
            r#"{"connector": {"id": "abc", "state": "STATE_DISCONNECTED"}}"#,
            Some("connector"),
        )
        .unwrap();
        assert_eq!(reply.body.unwrap().id, "abc");

        let missing: Reply<Connector> = decode(
            Status::Http(404),
            r#"{"code": 5, "message": "connector not found"}"#,
            Some("connector"),
        )
        .unwrap();
        assert!(missing.body.is_none());
        assert_eq!(missing.message.as_deref(), Some("connector not found"));

        let unwrapped =
            decode::<Connector>(Status::Http(200), r#"{"other": {}}"#, Some("connector")).unwrap();
        assert!(unwrapped.is_undecodable());
        assert!(unwrapped.message.unwrap().contains("no `connector` field"));

        let garbled = decode::<ConnectorPage>(Status::Http(200), "not json", None).unwrap();
        assert!(garbled.is_undecodable());
        assert!(!garbled.is(crate::status::Expect::Ok));
    }

    #[test]
    fn test_plain_text_error_message() {
        assert_eq!(error_message("upstream connect error\n"), "upstream connect error");
    }

    #[test]
    /// Verifies URLs are joined under the API version without double slashes.
    fn test_url_building() {
        let client = RestClient::from_urls(
            "http://localhost:8080/vdp/",
            "http://localhost:3081",
            "users/admin",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.url(Service::Public, &client.ns_path("connectors/x")),
            "http://localhost:8080/vdp/v1beta/users/admin/connectors/x"
        );
        assert_eq!(
            client.url(Service::Private, "/admin/pipelines"),
            "http://localhost:3081/v1beta/admin/pipelines"
        );
        assert!(RestClient::from_urls("nope", "http://x", "users/a", Duration::from_secs(1)).is_err());
    }
}
