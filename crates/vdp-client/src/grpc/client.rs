/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! The [`Backend`] over gRPC.
//!
//! A `GrpcClient` owns one channel per service. Dropping the client (and
//! every credential view derived from it) closes them.

use super::convert;
use super::proto::{self, paths};
use crate::api::{
    AdminApi, Backend, ComponentDefinitionApi, ConnectorApi, ConnectorDefinitionApi, HealthApi,
    ListQuery, OperatorDefinitionApi, PipelineApi, ReleaseApi, Transport,
};
use crate::auth::Credentials;
use crate::error::{ClientError, Result};
use crate::status::{Reply, Status};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::time::Duration;
use tonic::metadata::MetadataValue;
use tonic::transport::{Channel, Endpoint};
use vdp_models::{
    ComponentDefinitionPage, Connector, ConnectorDefinition, ConnectorDefinitionPage,
    ConnectorPage, Operation, OperatorDefinition, OperatorDefinitionPage, Pipeline, PipelinePage,
    PipelineRelease, ReleasePage, StateResponse, TriggerResponse, View,
};
use vdp_utils::Endpoints;

#[derive(Debug, Clone, Copy)]
enum Service {
    Public,
    Private,
}

#[derive(Clone)]
pub struct GrpcClient {
    public: tonic::client::Grpc<Channel>,
    private: tonic::client::Grpc<Channel>,
    namespace: String,
    credentials: Credentials,
}

impl GrpcClient {
    /// Opens the public channel and prepares the private one.
    ///
    /// The private channel connects on first use, since the private host is
    /// not reachable in every deployment.
    pub async fn connect(endpoints: &Endpoints, namespace: &str, timeout: Duration) -> Result<Self> {
        Self::connect_to(
            &endpoints.pipeline_public_grpc,
            &endpoints.pipeline_private_grpc,
            namespace,
            timeout,
        )
        .await
    }

    /// Opens channels to explicit `host:port` addresses.
    pub async fn connect_to(
        public: &str,
        private: &str,
        namespace: &str,
        timeout: Duration,
    ) -> Result<Self> {
        debug!("opening gRPC channel to {}", public);
        let public = endpoint(public, timeout)?.connect().await?;
        let private = endpoint(private, timeout)?.connect_lazy();
        Ok(Self {
            public: tonic::client::Grpc::new(public),
            private: tonic::client::Grpc::new(private),
            namespace: namespace.to_string(),
            credentials: Credentials::Anonymous,
        })
    }

    fn resource(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.namespace, collection, id)
    }

    /// Issues one unary call and returns the raw outcome.
    async fn unary<Req, Resp>(
        &self,
        service: Service,
        path: &'static str,
        message: Req,
    ) -> Result<std::result::Result<Resp, tonic::Status>>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = match service {
            Service::Public => self.public.clone(),
            Service::Private => self.private.clone(),
        };
        grpc.ready()
            .await
            .map_err(|e| ClientError::Grpc(format!("Service was not ready: {}", e)))?;

        let mut request = tonic::Request::new(message);
        if let Service::Public = service {
            for (name, value) in self.credentials.headers() {
                request
                    .metadata_mut()
                    .insert(name, MetadataValue::try_from(value.as_str())?);
            }
        }

        debug!("gRPC {}", path);
        let codec = tonic::codec::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static(path);
        Ok(grpc
            .unary(request, path, codec)
            .await
            .map(tonic::Response::into_inner))
    }

    /// Issues a call and maps a successful response with `f`.
    async fn call<Req, Resp, T, F>(
        &self,
        service: Service,
        path: &'static str,
        message: Req,
        f: F,
    ) -> Result<Reply<T>>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
        F: FnOnce(Resp) -> Result<T> + Send,
    {
        match self.unary::<Req, Resp>(service, path, message).await? {
            Ok(response) => {
                let status = Status::Grpc(tonic::Code::Ok);
                match f(response) {
                    Ok(body) => Ok(Reply::ok(status, body)),
                    Err(ClientError::Decode(reason)) => Ok(Reply::undecodable(status, reason)),
                    Err(e) => Err(e),
                }
            }
            Err(status) => Ok(Reply::failed(
                Status::Grpc(status.code()),
                status.message().to_string(),
            )),
        }
    }
}

fn endpoint(host: &str, timeout: Duration) -> Result<Endpoint> {
    Ok(Endpoint::from_shared(format!("http://{}", host))
        .map_err(|e| ClientError::Config(format!("invalid gRPC host `{}`: {}", host, e)))?
        .timeout(timeout))
}

fn missing(field: &str) -> ClientError {
    ClientError::Decode(format!("response has no `{}`", field))
}

fn view_param(view: View) -> Option<i32> {
    view.as_param().map(|_| view.as_i32())
}

fn connector_reply(r: proto::ConnectorResponse) -> Result<Connector> {
    r.connector.map(convert::connector).ok_or_else(|| missing("connector"))
}

fn pipeline_reply(r: proto::PipelineResponse) -> Result<Pipeline> {
    r.pipeline.map(convert::pipeline).ok_or_else(|| missing("pipeline"))
}

fn operation_reply(r: proto::OperationResponse) -> Result<Operation> {
    let operation = r.operation.ok_or_else(|| missing("operation"))?;
    convert::operation(operation).map_err(|e| ClientError::Decode(e.to_string()))
}

fn release_reply(r: proto::ReleaseResponse) -> Result<PipelineRelease> {
    r.release.map(convert::release).ok_or_else(|| missing("release"))
}

fn connector_page(r: proto::ListConnectorsResponse) -> Result<ConnectorPage> {
    Ok(ConnectorPage {
        connectors: r.connectors.into_iter().map(convert::connector).collect(),
        next_page_token: r.next_page_token,
        total_size: i64::from(r.total_size),
    })
}

fn pipeline_page(r: proto::ListPipelinesResponse) -> Result<PipelinePage> {
    Ok(PipelinePage {
        pipelines: r.pipelines.into_iter().map(convert::pipeline).collect(),
        next_page_token: r.next_page_token,
        total_size: i64::from(r.total_size),
    })
}

fn state_reply(r: proto::StateResponse) -> Result<StateResponse> {
    Ok(StateResponse {
        state: vdp_models::ConnectorState::from_i32(r.state),
    })
}

fn admin_request(query: &ListQuery) -> proto::ListAdminRequest {
    proto::ListAdminRequest {
        page_size: query.page_size,
        page_token: query.page_token.clone(),
        view: view_param(query.view),
        filter: query.filter.clone(),
    }
}

#[async_trait]
impl ConnectorDefinitionApi for GrpcClient {
    async fn list_connector_definitions(
        &self,
        query: &ListQuery,
    ) -> Result<Reply<ConnectorDefinitionPage>> {
        let request = proto::ListConnectorDefinitionsRequest {
            page_size: query.page_size,
            page_token: query.page_token.clone(),
            view: view_param(query.view),
            filter: query.filter.clone(),
        };
        self.call(
            Service::Public,
            paths::LIST_CONNECTOR_DEFINITIONS,
            request,
            |r: proto::ListConnectorDefinitionsResponse| {
                Ok(ConnectorDefinitionPage {
                    connector_definitions: r
                        .connector_definitions
                        .into_iter()
                        .map(convert::connector_definition)
                        .collect(),
                    next_page_token: r.next_page_token,
                    total_size: i64::from(r.total_size),
                })
            },
        )
        .await
    }

    async fn get_connector_definition(
        &self,
        id: &str,
        view: View,
    ) -> Result<Reply<ConnectorDefinition>> {
        let request = proto::GetConnectorDefinitionRequest {
            name: format!("connector-definitions/{}", id),
            view: view_param(view),
        };
        self.call(
            Service::Public,
            paths::GET_CONNECTOR_DEFINITION,
            request,
            |r: proto::GetConnectorDefinitionResponse| {
                r.connector_definition
                    .map(convert::connector_definition)
                    .ok_or_else(|| missing("connector_definition"))
            },
        )
        .await
    }
}

#[async_trait]
impl ConnectorApi for GrpcClient {
    async fn create_connector(&self, body: &Value) -> Result<Reply<Connector>> {
        let request = proto::CreateUserConnectorRequest {
            connector: Some(convert::connector_from_json(body, None)),
            parent: self.namespace.clone(),
        };
        self.call(Service::Public, paths::CREATE_USER_CONNECTOR, request, connector_reply)
            .await
    }

    async fn list_connectors(&self, query: &ListQuery) -> Result<Reply<ConnectorPage>> {
        let request = proto::ListUserConnectorsRequest {
            page_size: query.page_size,
            page_token: query.page_token.clone(),
            view: view_param(query.view),
            filter: query.filter.clone(),
            parent: self.namespace.clone(),
        };
        self.call(Service::Public, paths::LIST_USER_CONNECTORS, request, connector_page)
            .await
    }

    async fn get_connector(&self, id: &str, view: View) -> Result<Reply<Connector>> {
        let request = proto::NamedRequest {
            name: self.resource("connectors", id),
            view: view_param(view),
        };
        self.call(Service::Public, paths::GET_USER_CONNECTOR, request, connector_reply)
            .await
    }

    async fn update_connector(
        &self,
        id: &str,
        body: &Value,
        mask: &[&str],
    ) -> Result<Reply<Connector>> {
        let request = proto::UpdateUserConnectorRequest {
            connector: Some(convert::connector_from_json(
                body,
                Some(self.resource("connectors", id)),
            )),
            update_mask: Some(convert::field_mask(mask, body)),
        };
        self.call(Service::Public, paths::UPDATE_USER_CONNECTOR, request, connector_reply)
            .await
    }

    async fn delete_connector(&self, id: &str) -> Result<Reply<()>> {
        let request = proto::NamedRequest {
            name: self.resource("connectors", id),
            view: None,
        };
        self.call(Service::Public, paths::DELETE_USER_CONNECTOR, request, |_: proto::Empty| Ok(()))
            .await
    }

    async fn rename_connector(&self, id: &str, new_id: &str) -> Result<Reply<Connector>> {
        let request = proto::RenameUserConnectorRequest {
            name: self.resource("connectors", id),
            new_connector_id: new_id.to_string(),
        };
        self.call(Service::Public, paths::RENAME_USER_CONNECTOR, request, connector_reply)
            .await
    }

    async fn connect_connector(&self, id: &str) -> Result<Reply<Connector>> {
        let request = proto::NamedRequest {
            name: self.resource("connectors", id),
            view: None,
        };
        self.call(Service::Public, paths::CONNECT_USER_CONNECTOR, request, connector_reply)
            .await
    }

    async fn disconnect_connector(&self, id: &str) -> Result<Reply<Connector>> {
        let request = proto::NamedRequest {
            name: self.resource("connectors", id),
            view: None,
        };
        self.call(Service::Public, paths::DISCONNECT_USER_CONNECTOR, request, connector_reply)
            .await
    }

    async fn watch_connector(&self, id: &str) -> Result<Reply<StateResponse>> {
        let request = proto::NamedRequest {
            name: self.resource("connectors", id),
            view: None,
        };
        self.call(Service::Public, paths::WATCH_USER_CONNECTOR, request, state_reply)
            .await
    }

    async fn test_connector(&self, id: &str) -> Result<Reply<StateResponse>> {
        let request = proto::NamedRequest {
            name: self.resource("connectors", id),
            view: None,
        };
        self.call(Service::Public, paths::TEST_USER_CONNECTOR, request, state_reply)
            .await
    }

    async fn execute_connector(&self, id: &str, inputs: &[Value]) -> Result<Reply<Value>> {
        let request = proto::ExecuteUserConnectorRequest {
            name: self.resource("connectors", id),
            inputs: inputs.iter().filter_map(convert::json_to_struct).collect(),
        };
        self.call(
            Service::Public,
            paths::EXECUTE_USER_CONNECTOR,
            request,
            |r: proto::OutputsResponse| {
                let outputs: Vec<Value> = r.outputs.iter().map(convert::struct_to_json).collect();
                Ok(serde_json::json!({ "outputs": outputs }))
            },
        )
        .await
    }

    async fn lookup_connector(&self, uid: &str, view: View) -> Result<Reply<Connector>> {
        let request = proto::LookUpRequest {
            permalink: format!("connectors/{}", uid),
            view: view_param(view),
        };
        self.call(Service::Public, paths::LOOK_UP_CONNECTOR, request, connector_reply)
            .await
    }
}

#[async_trait]
impl PipelineApi for GrpcClient {
    async fn create_pipeline(&self, body: Option<&Value>) -> Result<Reply<Pipeline>> {
        let request = proto::CreateUserPipelineRequest {
            pipeline: body.map(|b| convert::pipeline_from_json(b, None)),
            parent: self.namespace.clone(),
        };
        self.call(Service::Public, paths::CREATE_USER_PIPELINE, request, pipeline_reply)
            .await
    }

    async fn list_pipelines(&self, query: &ListQuery) -> Result<Reply<PipelinePage>> {
        let request = proto::ListUserPipelinesRequest {
            page_size: query.page_size,
            page_token: query.page_token.clone(),
            view: view_param(query.view),
            filter: query.filter.clone(),
            parent: self.namespace.clone(),
        };
        self.call(Service::Public, paths::LIST_USER_PIPELINES, request, pipeline_page)
            .await
    }

    async fn get_pipeline(&self, id: &str, view: View) -> Result<Reply<Pipeline>> {
        let request = proto::NamedRequest {
            name: self.resource("pipelines", id),
            view: view_param(view),
        };
        self.call(Service::Public, paths::GET_USER_PIPELINE, request, pipeline_reply)
            .await
    }

    async fn update_pipeline(
        &self,
        id: &str,
        body: &Value,
        mask: &[&str],
    ) -> Result<Reply<Pipeline>> {
        let request = proto::UpdateUserPipelineRequest {
            pipeline: Some(convert::pipeline_from_json(
                body,
                Some(self.resource("pipelines", id)),
            )),
            update_mask: Some(convert::field_mask(mask, body)),
        };
        self.call(Service::Public, paths::UPDATE_USER_PIPELINE, request, pipeline_reply)
            .await
    }

    async fn delete_pipeline(&self, id: &str) -> Result<Reply<()>> {
        let request = proto::NamedRequest {
            name: self.resource("pipelines", id),
            view: None,
        };
        self.call(Service::Public, paths::DELETE_USER_PIPELINE, request, |_: proto::Empty| Ok(()))
            .await
    }

    async fn rename_pipeline(&self, id: &str, new_id: &str) -> Result<Reply<Pipeline>> {
        let request = proto::RenameUserPipelineRequest {
            name: self.resource("pipelines", id),
            new_pipeline_id: new_id.to_string(),
        };
        self.call(Service::Public, paths::RENAME_USER_PIPELINE, request, pipeline_reply)
            .await
    }

    async fn lookup_pipeline(&self, uid: &str, view: View) -> Result<Reply<Pipeline>> {
        let request = proto::LookUpRequest {
            permalink: format!("pipelines/{}", uid),
            view: view_param(view),
        };
        self.call(Service::Public, paths::LOOK_UP_PIPELINE, request, pipeline_reply)
            .await
    }

    async fn trigger_pipeline(&self, id: &str, inputs: &[Value]) -> Result<Reply<TriggerResponse>> {
        let request = proto::TriggerUserPipelineRequest {
            name: self.resource("pipelines", id),
            inputs: inputs.iter().filter_map(convert::json_to_struct).collect(),
        };
        self.call(
            Service::Public,
            paths::TRIGGER_USER_PIPELINE,
            request,
            |r: proto::OutputsResponse| {
                Ok(TriggerResponse {
                    outputs: r.outputs.iter().map(convert::struct_to_json).collect(),
                    metadata: r.metadata.as_ref().map(convert::struct_to_json),
                })
            },
        )
        .await
    }

    async fn trigger_pipeline_async(
        &self,
        id: &str,
        inputs: &[Value],
    ) -> Result<Reply<Operation>> {
        let request = proto::TriggerUserPipelineRequest {
            name: self.resource("pipelines", id),
            inputs: inputs.iter().filter_map(convert::json_to_struct).collect(),
        };
        self.call(
            Service::Public,
            paths::TRIGGER_ASYNC_USER_PIPELINE,
            request,
            operation_reply,
        )
        .await
    }

    async fn get_operation(&self, id: &str) -> Result<Reply<Operation>> {
        let request = proto::GetOperationRequest {
            operation_id: id.to_string(),
        };
        self.call(Service::Public, paths::GET_OPERATION, request, operation_reply)
            .await
    }
}

#[async_trait]
impl ReleaseApi for GrpcClient {
    async fn create_release(
        &self,
        pipeline_id: &str,
        body: &Value,
    ) -> Result<Reply<PipelineRelease>> {
        let request = proto::CreateUserPipelineReleaseRequest {
            release: Some(convert::release_from_json(body)),
            parent: self.resource("pipelines", pipeline_id),
        };
        self.call(Service::Public, paths::CREATE_USER_PIPELINE_RELEASE, request, release_reply)
            .await
    }

    async fn list_releases(
        &self,
        pipeline_id: &str,
        query: &ListQuery,
    ) -> Result<Reply<ReleasePage>> {
        let request = proto::ListUserPipelineReleasesRequest {
            page_size: query.page_size,
            page_token: query.page_token.clone(),
            view: view_param(query.view),
            filter: query.filter.clone(),
            parent: self.resource("pipelines", pipeline_id),
        };
        self.call(
            Service::Public,
            paths::LIST_USER_PIPELINE_RELEASES,
            request,
            |r: proto::ListReleasesResponse| {
                Ok(ReleasePage {
                    releases: r.releases.into_iter().map(convert::release).collect(),
                    next_page_token: r.next_page_token,
                    total_size: i64::from(r.total_size),
                })
            },
        )
        .await
    }

    async fn get_release(
        &self,
        pipeline_id: &str,
        release_id: &str,
        view: View,
    ) -> Result<Reply<PipelineRelease>> {
        let request = proto::NamedRequest {
            name: format!("{}/releases/{}", self.resource("pipelines", pipeline_id), release_id),
            view: view_param(view),
        };
        self.call(Service::Public, paths::GET_USER_PIPELINE_RELEASE, request, release_reply)
            .await
    }

    async fn delete_release(&self, pipeline_id: &str, release_id: &str) -> Result<Reply<()>> {
        let request = proto::NamedRequest {
            name: format!("{}/releases/{}", self.resource("pipelines", pipeline_id), release_id),
            view: None,
        };
        self.call(
            Service::Public,
            paths::DELETE_USER_PIPELINE_RELEASE,
            request,
            |_: proto::Empty| Ok(()),
        )
        .await
    }
}

#[async_trait]
impl ComponentDefinitionApi for GrpcClient {
    async fn list_component_definitions(
        &self,
        query: &ListQuery,
    ) -> Result<Reply<ComponentDefinitionPage>> {
        let request = proto::ListComponentDefinitionsRequest {
            page_size: query.page_size,
            view: view_param(query.view),
            filter: query.filter.clone(),
            page: query.page,
        };
        self.call(
            Service::Public,
            paths::LIST_COMPONENT_DEFINITIONS,
            request,
            |r: proto::ListComponentDefinitionsResponse| {
                Ok(ComponentDefinitionPage {
                    component_definitions: r
                        .component_definitions
                        .into_iter()
                        .map(convert::component_definition)
                        .collect(),
                    total_size: i64::from(r.total_size),
                    page_size: i64::from(r.page_size),
                    page: i64::from(r.page),
                })
            },
        )
        .await
    }
}

#[async_trait]
impl OperatorDefinitionApi for GrpcClient {
    async fn list_operator_definitions(
        &self,
        query: &ListQuery,
    ) -> Result<Reply<OperatorDefinitionPage>> {
        let request = proto::ListOperatorDefinitionsRequest {
            page_size: query.page_size,
            page_token: query.page_token.clone(),
            view: view_param(query.view),
            filter: query.filter.clone(),
        };
        self.call(
            Service::Public,
            paths::LIST_OPERATOR_DEFINITIONS,
            request,
            |r: proto::ListOperatorDefinitionsResponse| {
                Ok(OperatorDefinitionPage {
                    operator_definitions: r
                        .operator_definitions
                        .into_iter()
                        .map(convert::operator_definition)
                        .collect(),
                    next_page_token: r.next_page_token,
                    total_size: i64::from(r.total_size),
                })
            },
        )
        .await
    }

    async fn get_operator_definition(
        &self,
        id: &str,
        view: View,
    ) -> Result<Reply<OperatorDefinition>> {
        let request = proto::GetOperatorDefinitionRequest {
            name: format!("operator-definitions/{}", id),
            view: view_param(view),
        };
        self.call(
            Service::Public,
            paths::GET_OPERATOR_DEFINITION,
            request,
            |r: proto::GetOperatorDefinitionResponse| {
                r.operator_definition
                    .map(convert::operator_definition)
                    .ok_or_else(|| missing("operator_definition"))
            },
        )
        .await
    }
}

#[async_trait]
impl AdminApi for GrpcClient {
    async fn list_connectors_admin(&self, query: &ListQuery) -> Result<Reply<ConnectorPage>> {
        self.call(
            Service::Private,
            paths::LIST_CONNECTORS_ADMIN,
            admin_request(query),
            connector_page,
        )
        .await
    }

    async fn lookup_connector_admin(&self, uid: &str, view: View) -> Result<Reply<Connector>> {
        let request = proto::LookUpRequest {
            permalink: format!("connectors/{}", uid),
            view: view_param(view),
        };
        self.call(Service::Private, paths::LOOK_UP_CONNECTOR_ADMIN, request, connector_reply)
            .await
    }

    async fn list_pipelines_admin(&self, query: &ListQuery) -> Result<Reply<PipelinePage>> {
        self.call(
            Service::Private,
            paths::LIST_PIPELINES_ADMIN,
            admin_request(query),
            pipeline_page,
        )
        .await
    }

    async fn lookup_pipeline_admin(&self, uid: &str, view: View) -> Result<Reply<Pipeline>> {
        let request = proto::LookUpRequest {
            permalink: format!("pipelines/{}", uid),
            view: view_param(view),
        };
        self.call(Service::Private, paths::LOOK_UP_PIPELINE_ADMIN, request, pipeline_reply)
            .await
    }
}

#[async_trait]
impl HealthApi for GrpcClient {
    async fn health(&self) -> Result<Reply<()>> {
        self.call(
            Service::Public,
            paths::LIVENESS,
            proto::Empty {},
            |_: proto::LivenessResponse| Ok(()),
        )
        .await
    }
}

impl Backend for GrpcClient {
    fn transport(&self) -> Transport {
        Transport::Grpc
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn with_credentials(&self, credentials: Credentials) -> Box<dyn Backend> {
        Box::new(GrpcClient {
            credentials,
            ..self.clone()
        })
    }
}
