/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

use serde_json::json;
use vdp_client::Transport;
use vdp_harness::assertions::expected_profile;
use vdp_harness::scenario;
use vdp_harness::Session;
use vdp_utils::config::{Endpoints, Mode, Protocol, Settings};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(server: &MockServer) -> Session {
    let mut settings = Settings::new(None).unwrap();
    settings.client.timeout_seconds = 5;
    let endpoints = Endpoints {
        mode: Mode::Direct,
        protocol: Protocol::Http,
        pipeline_public_rest: server.uri(),
        pipeline_private_rest: server.uri(),
        mgmt_public_rest: server.uri(),
        pipeline_public_grpc: "localhost:1".to_string(),
        pipeline_private_grpc: "localhost:1".to_string(),
    };
    Session::with_endpoints(settings, endpoints, Transport::Rest)
}

#[tokio::test]
/// Verifies setup logs in, captures the owner and purges the namespace.
///
/// This test:
/// 1. Scripts login, the authenticated user and one leftover connector
/// 2. Runs setup
/// 3. Checks the bearer credentials, the owner id and the purge delete
async fn test_setup_purges_leftovers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/user"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "instill", "uid": "c1a8f0a2-6b8e-4a41-9a5c-3c1b7f1d9e20", "profile": expected_profile()}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/connectors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connectors": [{"id": "leftover", "name": "users/admin/connectors/leftover"}],
            "next_page_token": "",
            "total_size": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/pipelines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pipelines": [],
            "nextPageToken": "",
            "totalSize": 0
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1beta/users/admin/connectors/leftover"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session(&server);
    scenario::setup(&mut session).await.unwrap();

    assert_eq!(session.credentials().label(), "bearer");
    assert_eq!(session.expected_owner_id(), "instill");
    assert_eq!(session.recorder().summary().total(), 0);
}

#[tokio::test]
/// Verifies a failed login skips the default checks but still tears down.
///
/// This test:
/// 1. Rejects the login
/// 2. Runs a whole session
/// 3. Checks the setup failure is recorded and no check group ran
async fn test_failed_login_skips_default_checks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/connectors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"connectors": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/pipelines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pipelines": []})))
        .mount(&server)
        .await;

    let report = scenario::run_session(session(&server)).await.unwrap();

    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.passed, 0);
    assert_eq!(report.failures[0].group, "Setup");
    assert!(report.failures[0].name.contains("login"));
    assert!(!report.summary.is_success());
}

#[tokio::test]
/// Verifies teardown records one delete per leftover and reports a failed one.
///
/// This test:
/// 1. Lists two connectors and one pipeline, and fails the pipeline delete
/// 2. Runs teardown
/// 3. Checks both connector deletes passed and the pipeline delete failed
async fn test_teardown_reports_failed_deletes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/connectors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connectors": [
                {"id": "a", "name": "users/admin/connectors/a"},
                {"id": "b", "name": "users/admin/connectors/b"}
            ],
            "next_page_token": "",
            "total_size": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/users/admin/pipelines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pipelines": [{"id": "p", "name": "users/admin/pipelines/p"}],
            "nextPageToken": "",
            "totalSize": 1
        })))
        .mount(&server)
        .await;
    for id in ["a", "b"] {
        Mock::given(method("DELETE"))
            .and(path(format!("/v1beta/users/admin/connectors/{}", id)))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/v1beta/users/admin/pipelines/p"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"code": 13, "message": "boom"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session(&server);
    scenario::teardown(&session).await.unwrap();

    let rec = session.recorder();
    let summary = rec.summary();
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        rec.failures()[0].name,
        "delete pipeline p response status is NoContent"
    );
}
