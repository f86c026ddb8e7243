/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Session Module
//!
//! State shared by every check of one run.
//!
//! A [`Session`] is built once from the resolved settings and handed to each
//! check by reference. Checks open their own connection with
//! [`Session::connect`]; the returned [`Scope`] closes it when dropped, on
//! every exit path including `?` short circuits.

use std::ops::Deref;
use std::time::Duration;

use log::debug;
use vdp_client::{Backend, Credentials, GrpcClient, MgmtClient, RestClient, Transport};
use vdp_models::User;
use vdp_utils::config::{Endpoints, Settings};

use crate::check::Recorder;
use crate::error::Result;

pub struct Session {
    pub settings: Settings,
    pub endpoints: Endpoints,
    transport: Transport,
    credentials: Credentials,
    foreign: Credentials,
    expected_owner: Option<User>,
    recorder: Recorder,
}

impl Session {
    /// Resolves endpoints from `settings` and builds an anonymous session.
    pub fn new(settings: Settings, transport: Transport) -> Result<Self> {
        let endpoints = settings.resolve()?;
        Ok(Self::with_endpoints(settings, endpoints, transport))
    }

    pub fn with_endpoints(settings: Settings, endpoints: Endpoints, transport: Transport) -> Self {
        Self {
            settings,
            endpoints,
            transport,
            credentials: Credentials::Anonymous,
            foreign: Credentials::foreign(),
            expected_owner: None,
            recorder: Recorder::new(),
        }
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn namespace(&self) -> &str {
        &self.settings.fixtures.namespace
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.settings.client.timeout_seconds)
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// The random identity that owns nothing, fixed for the whole run.
    pub fn foreign_credentials(&self) -> &Credentials {
        &self.foreign
    }

    pub fn set_expected_owner(&mut self, user: User) {
        self.expected_owner = Some(user);
    }

    /// Login id owners are compared against.
    ///
    /// Falls back to the configured username when the authenticated user
    /// could not be fetched during setup.
    pub fn expected_owner_id(&self) -> &str {
        self.expected_owner
            .as_ref()
            .map(|user| user.id.as_str())
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.settings.auth.username)
    }

    pub fn is_api_gateway(&self) -> bool {
        self.endpoints.mode.is_api_gateway()
    }

    pub fn mgmt(&self) -> Result<MgmtClient> {
        Ok(MgmtClient::new(&self.endpoints.mgmt_public_rest, self.timeout())?)
    }

    /// Opens a connection carrying the session credentials.
    pub async fn connect(&self) -> Result<Scope> {
        let backend: Box<dyn Backend> = match self.transport {
            Transport::Rest => Box::new(RestClient::new(
                &self.endpoints,
                self.namespace(),
                self.timeout(),
            )?),
            Transport::Grpc => Box::new(
                GrpcClient::connect(&self.endpoints, self.namespace(), self.timeout()).await?,
            ),
        };
        debug!("opened {} connection", self.transport);
        Ok(Scope {
            backend: backend.with_credentials(self.credentials.clone()),
        })
    }
}

/// A connection held for the duration of one check group.
pub struct Scope {
    backend: Box<dyn Backend>,
}

impl Scope {
    /// The same connection under another identity.
    pub fn as_identity(&self, credentials: Credentials) -> Box<dyn Backend> {
        self.backend.with_credentials(credentials)
    }
}

impl Deref for Scope {
    type Target = dyn Backend;

    fn deref(&self) -> &Self::Target {
        self.backend.as_ref()
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        debug!("closed {} connection", self.backend.transport());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdp_utils::config::{Mode, Protocol};

    fn session() -> Session {
        let settings = Settings::new(None).unwrap();
        let endpoints = Endpoints {
            mode: Mode::Direct,
            protocol: Protocol::Http,
            pipeline_public_rest: "http://127.0.0.1:1".into(),
            pipeline_private_rest: "http://127.0.0.1:1".into(),
            mgmt_public_rest: "http://127.0.0.1:1".into(),
            pipeline_public_grpc: "127.0.0.1:1".into(),
            pipeline_private_grpc: "127.0.0.1:1".into(),
        };
        Session::with_endpoints(settings, endpoints, Transport::Rest)
    }

    #[test]
    /// Verifies the expected owner falls back to the configured username.
    fn test_expected_owner_fallback() {
        let mut session = session();
        assert_eq!(session.expected_owner_id(), session.settings.auth.username);

        session.set_expected_owner(User {
            id: "someone".into(),
            ..Default::default()
        });
        assert_eq!(session.expected_owner_id(), "someone");
    }

    #[tokio::test]
    /// Verifies a REST scope carries the session credentials and its identity can be swapped.
    async fn test_connect_carries_credentials() {
        let mut session = session();
        session.set_credentials(Credentials::Bearer("t".into()));

        let scope = session.connect().await.unwrap();
        assert_eq!(scope.credentials(), &Credentials::Bearer("t".into()));
        assert_eq!(scope.namespace(), "users/admin");

        let foreign = scope.as_identity(session.foreign_credentials().clone());
        assert!(matches!(foreign.credentials(), Credentials::ForeignIdentity(_)));
        assert!(!session.is_api_gateway());
    }
}
