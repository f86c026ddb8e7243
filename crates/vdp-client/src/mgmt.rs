/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Management service calls: login and the authenticated user.

use crate::auth::Credentials;
use crate::error::{ClientError, Result};
use crate::rest::decode;
use crate::status::{Reply, Status};
use log::debug;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use vdp_models::User;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Clone)]
pub struct MgmtClient {
    http: reqwest::Client,
    base: String,
}

impl MgmtClient {
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        url::Url::parse(base)?;
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// Logs in and returns bearer credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credentials> {
        let url = format!("{}/v1beta/auth/login", self.base);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Login(format!("HTTP {}: {}", status.as_u16(), text)));
        }

        let login: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| ClientError::Login(format!("no access token in response: {}", e)))?;
        if login.access_token.is_empty() {
            return Err(ClientError::Login("empty access token".to_string()));
        }
        Ok(Credentials::Bearer(login.access_token))
    }

    /// Fetches the user the credentials resolve to.
    pub async fn authenticated_user(&self, credentials: &Credentials) -> Result<Reply<User>> {
        let url = format!("{}/v1beta/user", self.base);
        debug!("GET {}", url);

        let mut request = self.http.get(&url);
        for (name, value) in credentials.headers() {
            request = request.header(name, value);
        }
        let response = request.send().await?;
        let status = Status::Http(response.status().as_u16());
        let text = response.text().await?;
        decode(status, &text, Some("user"))
    }
}
