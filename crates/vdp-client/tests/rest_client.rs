/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

use serde_json::json;
use std::time::Duration;
use vdp_client::api::{AdminApi, ConnectorApi, HealthApi, OperatorDefinitionApi, PipelineApi};
use vdp_client::{Backend, ClientError, Credentials, Expect, ListQuery, MgmtClient, RestClient};
use vdp_models::{ConnectorState, View, OPERATION_PREFIX};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NS: &str = "users/admin";

fn client(server: &MockServer) -> RestClient {
    RestClient::from_urls(&server.uri(), &server.uri(), NS, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
/// Verifies a created connector is decoded from its envelope and the status kept.
///
/// This test:
/// 1. Mounts a 201 response for the namespaced create path
/// 2. Creates a connector with bearer credentials
/// 3. Checks the reply satisfies Created and carries the decoded connector
async fn test_create_connector() {
    let server = MockServer::start().await;
    let body = json!({
        "id": "dest-csv",
        "connector_definition_name": "connector-definitions/airbyte-destination-csv",
        "configuration": {"destination_path": "/local"}
    });

    Mock::given(method("POST"))
        .and(path("/v1beta/users/admin/connectors"))
        .and(header("authorization", "Bearer token-123"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "connector": {
                "name": "users/admin/connectors/dest-csv",
                "uid": "9b0c8a2f-2d4e-4c1a-8f5e-2a7d1c3b4e5f",
                "id": "dest-csv",
                "connector_definition_name": "connector-definitions/airbyte-destination-csv",
                "state": "STATE_DISCONNECTED",
                "tombstone": false,
                "configuration": {"destination_path": "/local"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = client(&server).with_credentials(Credentials::Bearer("token-123".into()));
    let reply = backend.create_connector(&body).await.unwrap();

    assert!(reply.is(Expect::Created));
    assert!(!reply.is(Expect::Ok));
    let connector = reply.require(Expect::Created).unwrap();
    assert_eq!(connector.id, "dest-csv");
    assert_eq!(connector.state, ConnectorState::Disconnected);
}

#[tokio::test]
/// Verifies error statuses become failed replies instead of errors.
async fn test_not_found_is_a_reply() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/pipelines/this-id-does-not-exist"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"code": 5, "message": "pipeline not found"})),
        )
        .mount(&server)
        .await;

    let reply = client(&server)
        .get_pipeline("this-id-does-not-exist", View::Unspecified)
        .await
        .unwrap();

    assert!(reply.is(Expect::NotFound));
    assert!(reply.body().is_none());
    assert_eq!(reply.message.as_deref(), Some("pipeline not found"));
    assert!(matches!(
        reply.require(Expect::Ok),
        Err(ClientError::Unexpected { .. })
    ));
}

#[tokio::test]
/// Verifies each identity sends its own header.
///
/// This test:
/// 1. Mounts mocks that only match a Basic header or a user uid header
/// 2. Lists connectors with the invalid and the foreign identity
/// 3. Checks each call reached the mock meant for it
async fn test_identity_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/connectors"))
        .and(header(
            "authorization",
            "Basic aW52YWxpZC11c2VyOmludmFsaWQtcGFzc3dvcmQ=",
        ))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/connectors"))
        .and(header_exists("instill-user-uid"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .expect(1)
        .mount(&server)
        .await;

    let base = client(&server);
    let invalid = base.with_credentials(Credentials::Invalid);
    let foreign = base.with_credentials(Credentials::foreign());

    let reply = invalid.list_connectors(&ListQuery::new()).await.unwrap();
    assert!(reply.is(Expect::Unauthenticated));
    let reply = foreign.list_connectors(&ListQuery::new()).await.unwrap();
    assert!(reply.is(Expect::Unauthenticated));
}

#[tokio::test]
/// Verifies paging, view and filter travel as query parameters.
async fn test_list_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/pipelines"))
        .and(query_param("page_size", "3"))
        .and(query_param("view", "VIEW_FULL"))
        .and(query_param("filter", "createTime>timestamp(\"2000-06-19T23:31:08.657Z\")"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pipelines": [{"id": "a"}, {"id": "b"}, {"id": "c"}],
            "next_page_token": "tok",
            "total_size": "7"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery::new()
        .page_size(3)
        .view(View::Full)
        .filter("createTime>timestamp(\"2000-06-19T23:31:08.657Z\")");
    let page = client(&server)
        .list_pipelines(&query)
        .await
        .unwrap()
        .require(Expect::Ok)
        .unwrap();

    assert_eq!(page.pipelines.len(), 3);
    assert_eq!(page.next_page_token, "tok");
    assert_eq!(page.total_size, 7);
}

#[tokio::test]
/// Verifies the update mask is sent only when given.
async fn test_update_mask() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1beta/users/admin/connectors/dest-csv"))
        .and(query_param("update_mask", "description,configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connector": {"id": "dest-csv", "description": "updated"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server)
        .update_connector(
            "dest-csv",
            &json!({"description": "updated", "configuration": {}}),
            &["description", "configuration"],
        )
        .await
        .unwrap();

    assert!(reply.is(Expect::Ok));
    assert_eq!(reply.body().unwrap().description, "updated");
}

#[tokio::test]
/// Verifies a bodiless delete, and that admin calls carry no credentials.
///
/// This test:
/// 1. Deletes a connector against a 204 mock
/// 2. Lists admin pipelines with bearer credentials set
/// 3. Checks the admin request had no authorization header
async fn test_delete_and_admin_calls() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1beta/users/admin/connectors/dest-csv"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/admin/pipelines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pipelines": [],
            "total_size": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = client(&server).with_credentials(Credentials::Bearer("t".into()));
    let reply = backend.delete_connector("dest-csv").await.unwrap();
    assert!(reply.is(Expect::NoContent));

    let page = backend
        .list_pipelines_admin(&ListQuery::new())
        .await
        .unwrap()
        .require(Expect::Ok)
        .unwrap();
    assert_eq!(page.total_size, 0);

    let requests = server.received_requests().await.unwrap();
    let admin = requests
        .iter()
        .find(|r| r.url.path() == "/v1beta/admin/pipelines")
        .unwrap();
    assert!(!admin.headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/health/pipeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "health_check_response": {"status": "SERVING_STATUS_SERVING"}
        })))
        .mount(&server)
        .await;

    assert!(client(&server).health().await.unwrap().is(Expect::Ok));
}

#[tokio::test]
/// Verifies login yields bearer credentials and rejects bad responses.
///
/// This test:
/// 1. Logs in against a mock returning a token
/// 2. Logs in against a mock returning 401
/// 3. Checks the first gives Bearer and the second a login error
async fn test_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/auth/login"))
        .and(body_json(json!({"username": "admin", "password": "password"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "abc"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/auth/login"))
        .and(body_json(json!({"username": "admin", "password": "wrong"})))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "denied"})))
        .mount(&server)
        .await;

    let mgmt = MgmtClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    assert_eq!(
        mgmt.login("admin", "password").await.unwrap(),
        Credentials::Bearer("abc".into())
    );
    assert!(matches!(
        mgmt.login("admin", "wrong").await,
        Err(ClientError::Login(_))
    ));
}

#[tokio::test]
async fn test_authenticated_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/user"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"name": "users/admin", "uid": "u-1", "id": "admin"}
        })))
        .mount(&server)
        .await;

    let mgmt = MgmtClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let user = mgmt
        .authenticated_user(&Credentials::Bearer("abc".into()))
        .await
        .unwrap()
        .require(Expect::Ok)
        .unwrap();
    assert_eq!(user.id, "admin");
}

#[tokio::test]
/// Verifies admin calls go to the private base and never to the public one.
///
/// This test:
/// 1. Starts separate public and private servers
/// 2. Lists and looks up connectors through the admin API with credentials set
/// 3. Checks both requests reached the private server without an authorization header
async fn test_admin_calls_use_the_private_service() {
    let public = MockServer::start().await;
    let private = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/admin/connectors"))
        .and(query_param("view", "VIEW_FULL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connectors": [{"id": "dest-csv", "uid": "9b0c8a2f-2d4e-4c1a-8f5e-2a7d1c3b4e5f"}],
            "next_page_token": "",
            "total_size": 1
        })))
        .expect(1)
        .mount(&private)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/admin/connectors/9b0c8a2f-2d4e-4c1a-8f5e-2a7d1c3b4e5f/lookUp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connector": {"id": "dest-csv", "uid": "9b0c8a2f-2d4e-4c1a-8f5e-2a7d1c3b4e5f"}
        })))
        .expect(1)
        .mount(&private)
        .await;

    let client = RestClient::from_urls(&public.uri(), &private.uri(), NS, Duration::from_secs(5))
        .unwrap();
    let page = client
        .list_connectors_admin(&ListQuery::new().view(View::Full))
        .await
        .unwrap()
        .require(Expect::Ok)
        .unwrap();
    assert_eq!(page.total_size, 1);

    let found = client
        .lookup_connector_admin("9b0c8a2f-2d4e-4c1a-8f5e-2a7d1c3b4e5f", View::Unspecified)
        .await
        .unwrap();
    assert!(found.is(Expect::Ok));
    assert_eq!(found.body().unwrap().id, "dest-csv");

    assert!(public.received_requests().await.unwrap().is_empty());
    let requests = private.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| !r.headers.contains_key("authorization")));
}

#[tokio::test]
/// Verifies a 200 that does not decode is a reply that satisfies nothing.
///
/// This test:
/// 1. Serves a connector without its envelope and a list that is not JSON
/// 2. Checks both calls return Ok with no body and a decode message
/// 3. Checks neither reply satisfies Ok while an empty `{}` list is an empty page
async fn test_undecodable_success_is_a_reply() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/connectors/dest-csv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/connectors"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>upstream</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/pipelines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client(&server);
    let got = client.get_connector("dest-csv", View::Unspecified).await.unwrap();
    assert!(got.is_undecodable());
    assert!(!got.is(Expect::Ok));
    assert!(got.message.as_deref().unwrap().starts_with("decode:"));

    let listed = client.list_connectors(&ListQuery::new()).await.unwrap();
    assert!(listed.body().is_none());
    assert!(!listed.is(Expect::Ok));
    assert!(matches!(
        listed.require(Expect::Ok),
        Err(ClientError::Unexpected { .. })
    ));

    // Zero values are omitted on the wire, so `{}` is an empty page
    let empty = client.list_pipelines(&ListQuery::new()).await.unwrap();
    assert!(empty.is(Expect::Ok));
    assert_eq!(empty.body().map(|page| page.total_size), Some(0));
}

#[tokio::test]
/// Verifies an async trigger returns an operation that can be fetched by id.
///
/// This test:
/// 1. Mounts a triggerAsync mock returning a running operation
/// 2. Mounts an operations mock returning the finished operation
/// 3. Checks the name prefix, the id used for the fetch and the outputs
async fn test_trigger_async_and_get_operation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/users/admin/pipelines/echo/triggerAsync"))
        .and(body_json(json!({"inputs": [{"input": "hi"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "operation": {"name": "operations/op-1", "done": false}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/operations/op-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "operation": {
                "name": "operations/op-1",
                "done": true,
                "response": {"outputs": [{"answer": "hi"}]}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let started = client
        .trigger_pipeline_async("echo", &[json!({"input": "hi"})])
        .await
        .unwrap()
        .require(Expect::Ok)
        .unwrap();
    assert!(started.name.starts_with(OPERATION_PREFIX));
    assert!(!started.done);

    let finished = client
        .get_operation(started.id())
        .await
        .unwrap()
        .require(Expect::Ok)
        .unwrap();
    assert!(finished.done);
    assert_eq!(finished.outputs().unwrap()[0]["answer"], "hi");
}

#[tokio::test]
/// Verifies operator definitions are listed unwrapped and fetched from their envelope.
async fn test_operator_definitions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/operator-definitions"))
        .and(query_param("page_size", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "operatorDefinitions": [{"name": "operator-definitions/op-json", "id": "op-json", "spec": null}],
            "nextPageToken": "next",
            "totalSize": 3
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/operator-definitions/op-json"))
        .and(query_param("view", "VIEW_FULL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "operatorDefinition": {"name": "operator-definitions/op-json", "id": "op-json", "spec": {"x": 1}}
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let page = client
        .list_operator_definitions(&ListQuery::new().page_size(1))
        .await
        .unwrap()
        .require(Expect::Ok)
        .unwrap();
    assert_eq!(page.operator_definitions.len(), 1);
    assert_eq!(page.next_page_token, "next");
    assert_eq!(page.total_size, 3);

    let def = client
        .get_operator_definition("op-json", View::Full)
        .await
        .unwrap()
        .require(Expect::Ok)
        .unwrap();
    assert_eq!(def.name, "operator-definitions/op-json");
    assert!(def.spec.is_some());
}
