/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

use serial_test::serial;
use std::env;
use std::fs;
use tempfile::tempdir;
use vdp_utils::{AuthMode, Mode, Settings};

const LEGACY_VARS: [&str; 3] = ["API_GATEWAY_URL", "API_GATEWAY_PROTOCOL", "TEST_FOLDER_ABS_PATH"];

fn clear_legacy_env() {
    for var in LEGACY_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
/// Tests the loading of settings from both a file and environment variables.
///
/// This test:
/// 1. Creates a temporary TOML configuration file overriding hosts and auth.
/// 2. Sets a VDP__ environment variable to override one of the file settings.
/// 3. Loads the settings using Settings::new().
/// 4. Verifies file values and the environment override both landed.
fn test_settings_from_file_and_env() {
    clear_legacy_env();
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("harness.toml");

    let test_config = r#"
        [hosts]
        public_rest = "http://localhost:8080/vdp"
        private_rest = "http://localhost:3081"
        mgmt_rest = "http://localhost:8080/core"
        public_grpc = "localhost:8080"
        private_grpc = "localhost:3081"

        [auth]
        mode = "basic"
        username = "admin"
        password = "secret"

        [log]
        level = "info"
    "#;
    fs::write(&file_path, test_config).expect("Failed to write test config file");

    env::set_var("VDP__LOG__LEVEL", "debug");

    let settings = Settings::new(Some(file_path.to_str().unwrap().to_string()))
        .expect("Failed to load settings");

    assert_eq!(settings.hosts.public_rest, "http://localhost:8080/vdp");
    assert_eq!(settings.auth.mode, AuthMode::Basic);
    assert_eq!(settings.auth.password, "secret");
    assert_eq!(
        settings.log.level, "debug",
        "Log level should be overridden by the environment variable"
    );

    let endpoints = settings.resolve().expect("file settings should resolve");
    assert_eq!(endpoints.mode, Mode::Direct);
    assert_eq!(endpoints.pipeline_private_grpc, "localhost:3081");

    temp_dir.close().expect("Failed to remove temp dir");
    env::remove_var("VDP__LOG__LEVEL");
}

#[test]
#[serial]
/// Tests the embedded defaults when no configuration file is provided.
///
/// This test:
/// 1. Calls Settings::new() with None as the config file path.
/// 2. Checks the namespace, credentials and client timeout defaults.
fn test_settings_default() {
    clear_legacy_env();
    let settings = Settings::new(None).expect("Failed to load default settings");

    assert_eq!(settings.fixtures.namespace, "users/admin");
    assert_eq!(settings.auth.username, "admin");
    assert_eq!(settings.auth.mode, AuthMode::Login);
    assert_eq!(settings.client.timeout_seconds, 600);
    assert!(settings.gateway.url.is_none());
}

#[test]
#[serial]
/// Tests that the deployment variables switch the run into api-gateway mode.
///
/// This test:
/// 1. Sets API_GATEWAY_URL and API_GATEWAY_PROTOCOL in the process environment.
/// 2. Loads and resolves the settings.
/// 3. Verifies the public REST base is derived from the gateway.
fn test_gateway_variables_from_process_env() {
    clear_legacy_env();
    env::set_var("API_GATEWAY_URL", "gateway.local:8080");
    env::set_var("API_GATEWAY_PROTOCOL", "http");

    let endpoints = Settings::new(None)
        .expect("Failed to load settings")
        .resolve()
        .expect("gateway settings should resolve");

    assert_eq!(endpoints.mode, Mode::ApiGateway);
    assert_eq!(endpoints.pipeline_public_rest, "http://gateway.local:8080/vdp");

    clear_legacy_env();
}

#[test]
#[serial]
/// Tests that an unsupported gateway protocol is a configuration error.
fn test_invalid_protocol_from_process_env() {
    clear_legacy_env();
    env::set_var("API_GATEWAY_URL", "gateway.local:8080");
    env::set_var("API_GATEWAY_PROTOCOL", "grpc");

    let settings = Settings::new(None).expect("loading does not validate the protocol");
    assert!(settings.resolve().is_err());

    clear_legacy_env();
}
