/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Messages of `vdp.pipeline.v1beta`, limited to what the harness sends
//! and reads. Enum-typed fields are carried as their `int32` wire value.

///////////////////////////////////////////////////////////////////////////////
// Shared ////////////////////////////////////////////////////////////////////

/// The public profile of a user.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserProfile {
    #[prost(string, tag = "1")]
    pub display_name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub bio: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub avatar: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub public_email: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub company_name: ::prost::alloc::string::String,
    #[prost(map = "string, string", tag = "6")]
    pub social_profile_links:
        ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub uid: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "4")]
    pub profile: ::core::option::Option<UserProfile>,
}
/// The owner of a namespaced resource.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Owner {
    #[prost(message, optional, tag = "1")]
    pub user: ::core::option::Option<User>,
    #[prost(message, optional, tag = "2")]
    pub organization: ::core::option::Option<::prost_types::Struct>,
}

///////////////////////////////////////////////////////////////////////////////
// Connector definitions //////////////////////////////////////////////////////

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConnectorDefinition {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub uid: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub documentation_url: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub icon: ::prost::alloc::string::String,
    /// Only set under `VIEW_FULL`.
    #[prost(message, optional, tag = "7")]
    pub spec: ::core::option::Option<::prost_types::Struct>,
    #[prost(int32, tag = "8")]
    pub r#type: i32,
    #[prost(bool, tag = "9")]
    pub tombstone: bool,
    #[prost(bool, tag = "10")]
    pub public: bool,
    #[prost(bool, tag = "11")]
    pub custom: bool,
    #[prost(string, tag = "12")]
    pub vendor: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListConnectorDefinitionsRequest {
    #[prost(int32, optional, tag = "1")]
    pub page_size: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "2")]
    pub page_token: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(int32, optional, tag = "3")]
    pub view: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub filter: ::core::option::Option<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListConnectorDefinitionsResponse {
    #[prost(message, repeated, tag = "1")]
    pub connector_definitions: ::prost::alloc::vec::Vec<ConnectorDefinition>,
    #[prost(string, tag = "2")]
    pub next_page_token: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub total_size: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetConnectorDefinitionRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(int32, optional, tag = "2")]
    pub view: ::core::option::Option<i32>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetConnectorDefinitionResponse {
    #[prost(message, optional, tag = "1")]
    pub connector_definition: ::core::option::Option<ConnectorDefinition>,
}

///////////////////////////////////////////////////////////////////////////////
// Connectors /////////////////////////////////////////////////////////////////

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Connector {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub uid: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub connector_definition_name: ::prost::alloc::string::String,
    #[prost(int32, tag = "5")]
    pub r#type: i32,
    #[prost(string, tag = "7")]
    pub description: ::prost::alloc::string::String,
    /// Only set under `VIEW_FULL`.
    #[prost(message, optional, tag = "8")]
    pub configuration: ::core::option::Option<::prost_types::Struct>,
    #[prost(int32, tag = "9")]
    pub state: i32,
    #[prost(bool, tag = "10")]
    pub tombstone: bool,
    #[prost(message, optional, tag = "12")]
    pub owner: ::core::option::Option<Owner>,
    #[prost(message, optional, tag = "13")]
    pub create_time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "14")]
    pub update_time: ::core::option::Option<::prost_types::Timestamp>,
    /// Only set under `VIEW_FULL`.
    #[prost(message, optional, tag = "16")]
    pub connector_definition: ::core::option::Option<ConnectorDefinition>,
}
/// Response carrying a single connector.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConnectorResponse {
    #[prost(message, optional, tag = "1")]
    pub connector: ::core::option::Option<Connector>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateUserConnectorRequest {
    #[prost(message, optional, tag = "1")]
    pub connector: ::core::option::Option<Connector>,
    #[prost(string, tag = "2")]
    pub parent: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListUserConnectorsRequest {
    #[prost(int32, optional, tag = "1")]
    pub page_size: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "2")]
    pub page_token: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(int32, optional, tag = "3")]
    pub view: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub filter: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, tag = "5")]
    pub parent: ::prost::alloc::string::String,
}
/// Response of both the user and the admin connector list.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListConnectorsResponse {
    #[prost(message, repeated, tag = "1")]
    pub connectors: ::prost::alloc::vec::Vec<Connector>,
    #[prost(string, tag = "2")]
    pub next_page_token: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub total_size: i32,
}
/// Request addressing a resource by name, optionally with a view.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NamedRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(int32, optional, tag = "2")]
    pub view: ::core::option::Option<i32>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateUserConnectorRequest {
    #[prost(message, optional, tag = "1")]
    pub connector: ::core::option::Option<Connector>,
    #[prost(message, optional, tag = "2")]
    pub update_mask: ::core::option::Option<::prost_types::FieldMask>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Empty {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RenameUserConnectorRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub new_connector_id: ::prost::alloc::string::String,
}
/// Response of Watch and Test.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StateResponse {
    #[prost(int32, tag = "1")]
    pub state: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteUserConnectorRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub inputs: ::prost::alloc::vec::Vec<::prost_types::Struct>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OutputsResponse {
    #[prost(message, repeated, tag = "1")]
    pub outputs: ::prost::alloc::vec::Vec<::prost_types::Struct>,
    #[prost(message, optional, tag = "2")]
    pub metadata: ::core::option::Option<::prost_types::Struct>,
}
/// Request addressing a resource by permalink (`connectors/{uid}`, `pipelines/{uid}`).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LookUpRequest {
    #[prost(string, tag = "1")]
    pub permalink: ::prost::alloc::string::String,
    #[prost(int32, optional, tag = "2")]
    pub view: ::core::option::Option<i32>,
}
/// Paging parameters of the admin lists.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListAdminRequest {
    #[prost(int32, optional, tag = "1")]
    pub page_size: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "2")]
    pub page_token: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(int32, optional, tag = "3")]
    pub view: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub filter: ::core::option::Option<::prost::alloc::string::String>,
}

///////////////////////////////////////////////////////////////////////////////
// Pipelines //////////////////////////////////////////////////////////////////

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pipeline {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub uid: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, optional, tag = "4")]
    pub description: ::core::option::Option<::prost::alloc::string::String>,
    /// Only set under `VIEW_FULL`.
    #[prost(message, optional, tag = "5")]
    pub recipe: ::core::option::Option<::prost_types::Struct>,
    #[prost(message, optional, tag = "6")]
    pub create_time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "7")]
    pub update_time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "8")]
    pub owner: ::core::option::Option<Owner>,
    #[prost(string, optional, tag = "9")]
    pub creator_name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, tag = "10")]
    pub raw_recipe: ::prost::alloc::string::String,
    #[prost(string, optional, tag = "11")]
    pub display_name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "12")]
    pub slug: ::core::option::Option<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelineResponse {
    #[prost(message, optional, tag = "1")]
    pub pipeline: ::core::option::Option<Pipeline>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateUserPipelineRequest {
    #[prost(message, optional, tag = "1")]
    pub pipeline: ::core::option::Option<Pipeline>,
    #[prost(string, tag = "2")]
    pub parent: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListUserPipelinesRequest {
    #[prost(int32, optional, tag = "1")]
    pub page_size: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "2")]
    pub page_token: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(int32, optional, tag = "3")]
    pub view: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub filter: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, tag = "5")]
    pub parent: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListPipelinesResponse {
    #[prost(message, repeated, tag = "1")]
    pub pipelines: ::prost::alloc::vec::Vec<Pipeline>,
    #[prost(string, tag = "2")]
    pub next_page_token: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub total_size: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateUserPipelineRequest {
    #[prost(message, optional, tag = "1")]
    pub pipeline: ::core::option::Option<Pipeline>,
    #[prost(message, optional, tag = "2")]
    pub update_mask: ::core::option::Option<::prost_types::FieldMask>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RenameUserPipelineRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub new_pipeline_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TriggerUserPipelineRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub inputs: ::prost::alloc::vec::Vec<::prost_types::Struct>,
}
/// `google.rpc.Status`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcStatus {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub details: ::prost::alloc::vec::Vec<::prost_types::Any>,
}
/// `google.longrunning.Operation`; the `result` oneof is read as two
/// optional fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Operation {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub metadata: ::core::option::Option<::prost_types::Any>,
    #[prost(bool, tag = "3")]
    pub done: bool,
    #[prost(message, optional, tag = "4")]
    pub error: ::core::option::Option<RpcStatus>,
    #[prost(message, optional, tag = "5")]
    pub response: ::core::option::Option<::prost_types::Any>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperationResponse {
    #[prost(message, optional, tag = "1")]
    pub operation: ::core::option::Option<Operation>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationRequest {
    #[prost(string, tag = "1")]
    pub operation_id: ::prost::alloc::string::String,
}

///////////////////////////////////////////////////////////////////////////////
// Releases ///////////////////////////////////////////////////////////////////

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelineRelease {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub uid: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, optional, tag = "4")]
    pub description: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "5")]
    pub recipe: ::core::option::Option<::prost_types::Struct>,
    #[prost(message, optional, tag = "6")]
    pub create_time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "7")]
    pub update_time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(string, tag = "8")]
    pub raw_recipe: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReleaseResponse {
    #[prost(message, optional, tag = "1")]
    pub release: ::core::option::Option<PipelineRelease>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateUserPipelineReleaseRequest {
    #[prost(message, optional, tag = "1")]
    pub release: ::core::option::Option<PipelineRelease>,
    #[prost(string, tag = "2")]
    pub parent: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListUserPipelineReleasesRequest {
    #[prost(int32, optional, tag = "1")]
    pub page_size: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "2")]
    pub page_token: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(int32, optional, tag = "3")]
    pub view: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub filter: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, tag = "5")]
    pub parent: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListReleasesResponse {
    #[prost(message, repeated, tag = "1")]
    pub releases: ::prost::alloc::vec::Vec<PipelineRelease>,
    #[prost(string, tag = "2")]
    pub next_page_token: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub total_size: i32,
}

///////////////////////////////////////////////////////////////////////////////
// Component definitions //////////////////////////////////////////////////////

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ComponentDefinition {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub uid: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub description: ::prost::alloc::string::String,
    #[prost(int32, tag = "6")]
    pub r#type: i32,
    #[prost(int32, tag = "7")]
    pub release_stage: i32,
    #[prost(message, optional, tag = "8")]
    pub spec: ::core::option::Option<::prost_types::Struct>,
    #[prost(bool, tag = "9")]
    pub tombstone: bool,
    #[prost(bool, tag = "10")]
    pub public: bool,
    #[prost(string, tag = "11")]
    pub vendor: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListComponentDefinitionsRequest {
    #[prost(int32, optional, tag = "1")]
    pub page_size: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "2")]
    pub view: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "3")]
    pub filter: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(int32, optional, tag = "4")]
    pub page: ::core::option::Option<i32>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListComponentDefinitionsResponse {
    #[prost(message, repeated, tag = "1")]
    pub component_definitions: ::prost::alloc::vec::Vec<ComponentDefinition>,
    #[prost(int32, tag = "2")]
    pub total_size: i32,
    #[prost(int32, tag = "3")]
    pub page_size: i32,
    #[prost(int32, tag = "4")]
    pub page: i32,
}

///////////////////////////////////////////////////////////////////////////////
// Operator definitions ///////////////////////////////////////////////////////

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperatorDefinition {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub uid: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub documentation_url: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub icon: ::prost::alloc::string::String,
    /// Only set under `VIEW_FULL`.
    #[prost(message, optional, tag = "7")]
    pub spec: ::core::option::Option<::prost_types::Struct>,
    #[prost(bool, tag = "8")]
    pub tombstone: bool,
    #[prost(bool, tag = "9")]
    pub public: bool,
    #[prost(bool, tag = "10")]
    pub custom: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListOperatorDefinitionsRequest {
    #[prost(int32, optional, tag = "1")]
    pub page_size: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "2")]
    pub page_token: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(int32, optional, tag = "3")]
    pub view: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub filter: ::core::option::Option<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListOperatorDefinitionsResponse {
    #[prost(message, repeated, tag = "1")]
    pub operator_definitions: ::prost::alloc::vec::Vec<OperatorDefinition>,
    #[prost(string, tag = "2")]
    pub next_page_token: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub total_size: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperatorDefinitionRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(int32, optional, tag = "2")]
    pub view: ::core::option::Option<i32>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperatorDefinitionResponse {
    #[prost(message, optional, tag = "1")]
    pub operator_definition: ::core::option::Option<OperatorDefinition>,
}

///////////////////////////////////////////////////////////////////////////////
// Health /////////////////////////////////////////////////////////////////////

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HealthCheckResponse {
    #[prost(int32, tag = "1")]
    pub status: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LivenessResponse {
    #[prost(message, optional, tag = "1")]
    pub health_check_response: ::core::option::Option<HealthCheckResponse>,
}

///////////////////////////////////////////////////////////////////////////////
// Method paths ///////////////////////////////////////////////////////////////

pub mod paths {
    macro_rules! public {
        ($method:literal) => {
            concat!("/vdp.pipeline.v1beta.PipelinePublicService/", $method)
        };
    }
    macro_rules! private {
        ($method:literal) => {
            concat!("/vdp.pipeline.v1beta.PipelinePrivateService/", $method)
        };
    }

    pub const LIVENESS: &str = public!("Liveness");

    pub const LIST_CONNECTOR_DEFINITIONS: &str = public!("ListConnectorDefinitions");
    pub const GET_CONNECTOR_DEFINITION: &str = public!("GetConnectorDefinition");

    pub const CREATE_USER_CONNECTOR: &str = public!("CreateUserConnector");
    pub const LIST_USER_CONNECTORS: &str = public!("ListUserConnectors");
    pub const GET_USER_CONNECTOR: &str = public!("GetUserConnector");
    pub const UPDATE_USER_CONNECTOR: &str = public!("UpdateUserConnector");
    pub const DELETE_USER_CONNECTOR: &str = public!("DeleteUserConnector");
    pub const RENAME_USER_CONNECTOR: &str = public!("RenameUserConnector");
    pub const CONNECT_USER_CONNECTOR: &str = public!("ConnectUserConnector");
    pub const DISCONNECT_USER_CONNECTOR: &str = public!("DisconnectUserConnector");
    pub const WATCH_USER_CONNECTOR: &str = public!("WatchUserConnector");
    pub const TEST_USER_CONNECTOR: &str = public!("TestUserConnector");
    pub const EXECUTE_USER_CONNECTOR: &str = public!("ExecuteUserConnector");
    pub const LOOK_UP_CONNECTOR: &str = public!("LookUpConnector");

    pub const CREATE_USER_PIPELINE: &str = public!("CreateUserPipeline");
    pub const LIST_USER_PIPELINES: &str = public!("ListUserPipelines");
    pub const GET_USER_PIPELINE: &str = public!("GetUserPipeline");
    pub const UPDATE_USER_PIPELINE: &str = public!("UpdateUserPipeline");
    pub const DELETE_USER_PIPELINE: &str = public!("DeleteUserPipeline");
    pub const RENAME_USER_PIPELINE: &str = public!("RenameUserPipeline");
    pub const LOOK_UP_PIPELINE: &str = public!("LookUpPipeline");
    pub const TRIGGER_USER_PIPELINE: &str = public!("TriggerUserPipeline");
    pub const TRIGGER_ASYNC_USER_PIPELINE: &str = public!("TriggerAsyncUserPipeline");
    pub const GET_OPERATION: &str = public!("GetOperation");

    pub const CREATE_USER_PIPELINE_RELEASE: &str = public!("CreateUserPipelineRelease");
    pub const LIST_USER_PIPELINE_RELEASES: &str = public!("ListUserPipelineReleases");
    pub const GET_USER_PIPELINE_RELEASE: &str = public!("GetUserPipelineRelease");
    pub const DELETE_USER_PIPELINE_RELEASE: &str = public!("DeleteUserPipelineRelease");

    pub const LIST_COMPONENT_DEFINITIONS: &str = public!("ListComponentDefinitions");

    pub const LIST_OPERATOR_DEFINITIONS: &str = public!("ListOperatorDefinitions");
    pub const GET_OPERATOR_DEFINITION: &str = public!("GetOperatorDefinition");

    pub const LIST_CONNECTORS_ADMIN: &str = private!("ListConnectorsAdmin");
    pub const LOOK_UP_CONNECTOR_ADMIN: &str = private!("LookUpConnectorAdmin");
    pub const LIST_PIPELINES_ADMIN: &str = private!("ListPipelinesAdmin");
    pub const LOOK_UP_PIPELINE_ADMIN: &str = private!("LookUpPipelineAdmin");
}
