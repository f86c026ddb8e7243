/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # VDP Config Module
//! This module resolves everything the conformance harness needs to know about
//! the backend it is pointed at: base URLs for the REST and gRPC surfaces,
//! credentials, fixture locations and client timing.
//!
//! # Variable Naming Convention
//!
//! - Struct fields use snake_case (e.g., `public_rest`, `db_id_prefix`)
//! - Environment variables use SCREAMING_SNAKE_CASE and are prefixed with "VDP__"
//!   (e.g., `VDP__HOSTS__PUBLIC_REST`)
//! - Configuration file keys use snake_case (e.g., `hosts.public_rest`, `log.level`)
//!
//! # Configuration Overriding
//!
//! The configuration values are loaded and overridden in the following order (later sources take precedence):
//!
//! 1. Default values from the embedded `default.toml` file
//! 2. Values from an optional external configuration file (if provided)
//! 3. Environment variables with the "VDP__" prefix and "__" as separators
//! 4. The deployment variables shared with the rest of the test tooling:
//!    `API_GATEWAY_URL`, `API_GATEWAY_PROTOCOL` and `TEST_FOLDER_ABS_PATH`
//!
//! # Available Environment Variables
//!
//! - `API_GATEWAY_URL`: `host:port` of the API gateway. When set, the harness runs in
//!   api-gateway mode and every public URL is derived from it.
//!   Default: unset (direct mode)
//!
//! - `API_GATEWAY_PROTOCOL`: scheme used for the gateway, `http` or `https`.
//!   Any other value is rejected when endpoints are resolved.
//!   Default: "http"
//!
//! - `TEST_FOLDER_ABS_PATH`: repository root holding `integration-test/data/*` images.
//!
//! - `VDP__LOG__LEVEL`: Sets the log level. Default: "info"
//!
//! - `VDP__LOG__FORMAT`: "text" or "json". Default: "text"
//!
//! - `VDP__AUTH__MODE`: "login" (bearer token from the management login) or "basic".
//!   Default: "login"
//!
//! - `VDP__FIXTURES__NAMESPACE`: namespace the resources are created under.
//!   Default: "users/admin"
//!
//! - `VDP__CLIENT__TIMEOUT_SECONDS`: per request timeout. Default: 600

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use url::Url;

// Include the default settings file as a string constant
const DEFAULT_SETTINGS: &str = include_str!("../default.toml");

/// Legacy variable selecting api-gateway mode
pub const GATEWAY_URL_VAR: &str = "API_GATEWAY_URL";
/// Legacy variable selecting the gateway scheme
pub const GATEWAY_PROTOCOL_VAR: &str = "API_GATEWAY_PROTOCOL";
/// Legacy variable pointing at the fixture tree
pub const TEST_FOLDER_VAR: &str = "TEST_FOLDER_ABS_PATH";

/// Represents the main settings structure for the harness
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Logging configuration
    pub log: Log,
    /// API gateway configuration
    pub gateway: Gateway,
    /// Direct service hosts
    pub hosts: Hosts,
    /// Credentials used by the authenticated scenario variant
    pub auth: Auth,
    /// Fixture configuration
    pub fixtures: Fixtures,
    /// Client timing
    pub client: ClientSettings,
}

/// Represents the logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,
    /// Log output format: "text" (human-readable) or "json" (structured)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "text".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct Gateway {
    /// `host:port` of the API gateway, if the run goes through one
    pub url: Option<String>,
    /// Scheme for gateway REST calls
    pub protocol: String,
}

/// Hosts used when no gateway is configured.
///
/// The private hosts are also used in api-gateway mode, the gateway never
/// exposes the private service.
#[derive(Debug, Deserialize, Clone)]
pub struct Hosts {
    pub public_rest: String,
    pub private_rest: String,
    pub mgmt_rest: String,
    pub public_grpc: String,
    pub private_grpc: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Log in against the management service and send a bearer token
    Login,
    /// Send HTTP Basic credentials on every call
    Basic,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Auth {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Fixtures {
    /// Namespace prefix for every namespaced resource, e.g. `users/admin`
    pub namespace: String,
    /// Directory holding the sample images
    pub test_data_dir: Option<PathBuf>,
    /// Prefix for caller supplied ids so a sweep can find them later
    pub db_id_prefix: String,
    /// Pipelines created by the list checks
    pub pipeline_list_count: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// How many times a connector state is polled before giving up
    pub watch_poll_attempts: u32,
    /// Pause between two state polls in milliseconds
    pub watch_poll_interval_ms: u64,
    /// Pause after a fire-and-forget execute before the connector is deleted
    pub execute_settle_ms: u64,
}

/// Scheme for REST calls through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// Parses a protocol name, only `http` and `https` are accepted.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(ConfigError::Message(format!(
                "only allow `http` or `https` for {}, got `{}`",
                GATEWAY_PROTOCOL_VAR, other
            ))),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Https => write!(f, "https"),
        }
    }
}

/// Execution mode of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// All public traffic goes through the API gateway; foreign-identity checks run
    ApiGateway,
    /// Services are reached directly; private/admin checks run
    Direct,
}

impl Mode {
    pub fn is_api_gateway(&self) -> bool {
        matches!(self, Mode::ApiGateway)
    }
}

/// Resolved base addresses for a run.
///
/// REST values are `proto://host[:port][/prefix]` without a trailing slash,
/// gRPC values are `host:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub mode: Mode,
    pub protocol: Protocol,
    pub pipeline_public_rest: String,
    pub pipeline_private_rest: String,
    pub mgmt_public_rest: String,
    pub pipeline_public_grpc: String,
    pub pipeline_private_grpc: String,
}

impl Settings {
    /// Creates a new `Settings` instance
    ///
    /// # Arguments
    ///
    /// * `file` - An optional path to a configuration file
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing the `Settings` instance or a `ConfigError`
    pub fn new(file: Option<String>) -> Result<Self, ConfigError> {
        let mut s = Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml));

        s = match file {
            Some(x) => s.add_source(File::with_name(x.as_str())),
            None => s,
        };

        s = s.add_source(Environment::with_prefix("VDP").separator("__"));

        let settings: Settings = s.build()?.try_deserialize()?;
        Ok(settings.with_legacy_env(|key| std::env::var(key).ok()))
    }

    /// Applies the shared deployment variables on top of the layered settings.
    ///
    /// `lookup` is the variable source, `std::env::var` in production.
    pub fn with_legacy_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(GATEWAY_URL_VAR).filter(|v| !v.is_empty()) {
            self.gateway.url = Some(url);
        }
        if let Some(protocol) = lookup(GATEWAY_PROTOCOL_VAR).filter(|v| !v.is_empty()) {
            self.gateway.protocol = protocol;
        }
        if let Some(root) = lookup(TEST_FOLDER_VAR).filter(|v| !v.is_empty()) {
            self.fixtures.test_data_dir =
                Some(PathBuf::from(root).join("integration-test").join("data"));
        }
        self
    }

    /// Resolves the base addresses for this run.
    ///
    /// Fails when the gateway protocol is not `http`/`https` or a REST base
    /// is not a valid absolute URL.
    pub fn resolve(&self) -> Result<Endpoints, ConfigError> {
        let protocol = Protocol::parse(&self.gateway.protocol)?;

        let endpoints = match self.gateway.url.as_deref().filter(|u| !u.is_empty()) {
            Some(gateway) => {
                let gateway = gateway.trim_end_matches('/');
                Endpoints {
                    mode: Mode::ApiGateway,
                    protocol,
                    pipeline_public_rest: format!("{}://{}/vdp", protocol, gateway),
                    pipeline_private_rest: trim(&self.hosts.private_rest),
                    mgmt_public_rest: format!("{}://{}/core", protocol, gateway),
                    pipeline_public_grpc: gateway.to_string(),
                    pipeline_private_grpc: self.hosts.private_grpc.clone(),
                }
            }
            None => Endpoints {
                mode: Mode::Direct,
                protocol,
                pipeline_public_rest: trim(&self.hosts.public_rest),
                pipeline_private_rest: trim(&self.hosts.private_rest),
                mgmt_public_rest: trim(&self.hosts.mgmt_rest),
                pipeline_public_grpc: self.hosts.public_grpc.clone(),
                pipeline_private_grpc: self.hosts.private_grpc.clone(),
            },
        };

        for base in [
            &endpoints.pipeline_public_rest,
            &endpoints.pipeline_private_rest,
            &endpoints.mgmt_public_rest,
        ] {
            Url::parse(base)
                .map_err(|e| ConfigError::Message(format!("invalid base url `{}`: {}", base, e)))?;
        }

        Ok(endpoints)
    }
}

fn trim(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn defaults() -> Settings {
        Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .build()
            .expect("default settings should build")
            .try_deserialize()
            .expect("default settings should deserialize")
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    /// Verifies the direct-mode addresses come straight from the hosts table.
    ///
    /// This test:
    /// 1. Resolves the embedded defaults with no gateway configured
    /// 2. Checks the mode is Direct and every address matches the defaults
    fn test_resolve_direct_defaults() {
        let endpoints = defaults().resolve().expect("defaults should resolve");

        assert_eq!(endpoints.mode, Mode::Direct);
        assert_eq!(endpoints.pipeline_public_rest, "http://api-gateway:8080/vdp");
        assert_eq!(endpoints.pipeline_private_rest, "http://pipeline-backend:3081");
        assert_eq!(endpoints.mgmt_public_rest, "http://api-gateway:8080/core");
        assert_eq!(endpoints.pipeline_public_grpc, "api-gateway:8080");
        assert_eq!(endpoints.pipeline_private_grpc, "pipeline-backend:3081");
    }

    #[test]
    /// Verifies gateway mode derives public addresses from the gateway URL.
    ///
    /// This test:
    /// 1. Applies API_GATEWAY_URL and API_GATEWAY_PROTOCOL=https
    /// 2. Checks the public REST/mgmt URLs carry the scheme and prefixes
    /// 3. Checks the private host is untouched
    fn test_resolve_gateway_mode() {
        let settings = defaults().with_legacy_env(lookup(&[
            ("API_GATEWAY_URL", "localhost:8080"),
            ("API_GATEWAY_PROTOCOL", "https"),
        ]));
        let endpoints = settings.resolve().expect("gateway settings should resolve");

        assert!(endpoints.mode.is_api_gateway());
        assert_eq!(endpoints.pipeline_public_rest, "https://localhost:8080/vdp");
        assert_eq!(endpoints.mgmt_public_rest, "https://localhost:8080/core");
        assert_eq!(endpoints.pipeline_public_grpc, "localhost:8080");
        assert_eq!(endpoints.pipeline_private_rest, "http://pipeline-backend:3081");
    }

    #[test]
    /// Verifies an unknown protocol fails resolution instead of guessing.
    fn test_resolve_rejects_unknown_protocol() {
        let settings = defaults().with_legacy_env(lookup(&[
            ("API_GATEWAY_URL", "localhost:8080"),
            ("API_GATEWAY_PROTOCOL", "ftp"),
        ]));
        let err = settings.resolve().expect_err("ftp must be rejected");
        assert!(err.to_string().contains("API_GATEWAY_PROTOCOL"));
    }

    #[test]
    /// Verifies an empty gateway variable keeps the run in direct mode.
    fn test_empty_gateway_url_is_direct() {
        let settings = defaults().with_legacy_env(lookup(&[("API_GATEWAY_URL", "")]));
        assert_eq!(settings.resolve().unwrap().mode, Mode::Direct);
    }

    #[test]
    /// Verifies TEST_FOLDER_ABS_PATH points the fixtures at integration-test/data.
    fn test_test_folder_sets_data_dir() {
        let settings = defaults().with_legacy_env(lookup(&[("TEST_FOLDER_ABS_PATH", "/repo")]));
        assert_eq!(
            settings.fixtures.test_data_dir,
            Some(PathBuf::from("/repo/integration-test/data"))
        );
    }

    #[test]
    /// Verifies a malformed REST host is reported at resolution time.
    fn test_resolve_rejects_malformed_url() {
        let mut settings = defaults();
        settings.hosts.public_rest = "api-gateway:8080/vdp".to_string();
        settings.hosts.private_rest = "not a url".to_string();
        assert!(settings.resolve().is_err());
    }
}
