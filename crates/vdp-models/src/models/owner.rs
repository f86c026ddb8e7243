/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Owner Module
//!
//! Ownership information attached to connectors and pipelines under
//! `VIEW_FULL`, and the authenticated user returned by the management service.
//!
//! The profile is kept as an opaque JSON object. Callers compare it
//! structurally against an expected profile, so unknown keys must survive
//! decoding.

use serde::{Deserialize, Serialize};

/// Owner of a namespaced resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Owner {
    /// Set when the owner is a user
    #[serde(default)]
    pub user: Option<User>,
    /// Set when the owner is an organization
    #[serde(default)]
    pub organization: Option<serde_json::Value>,
}

/// A user as rendered inside an owner or by the management service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    /// Resource name, e.g. `users/admin`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
    /// Login id, e.g. `admin`
    #[serde(default)]
    pub id: String,
    /// Public profile (display name, bio, avatar, ...)
    #[serde(default)]
    pub profile: Option<serde_json::Value>,
}

/// Envelope of `GET /v1beta/user`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}
