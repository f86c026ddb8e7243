/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Clients for the pipeline backend under test.
//!
//! [`RestClient`] and [`GrpcClient`] expose the same operations through the
//! traits in [`api`]; [`MgmtClient`] covers the management calls needed to
//! obtain credentials.

pub mod api;
pub mod auth;
pub mod error;
pub mod grpc;
pub mod mgmt;
pub mod rest;
pub mod status;

pub use api::{Backend, ListQuery, Transport};
pub use auth::Credentials;
pub use error::{ClientError, Result};
pub use grpc::GrpcClient;
pub use mgmt::MgmtClient;
pub use rest::RestClient;
pub use status::{Expect, Reply, Status};
