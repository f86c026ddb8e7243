/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # VDP Harness
//!
//! Conformance checks for the pipeline backend's public and private APIs.
//!
//! The harness drives a live backend through [`vdp_client`] over REST or
//! gRPC, asserts on every reply and records the outcome of each assertion in
//! the session's [`Recorder`]. A run passes only when every check passed.
//!
//! - [`session`]: configuration, credentials and connection scopes of a run
//! - [`check`]: the outcome recorder
//! - [`assertions`]: pure predicates over response fields
//! - [`pagination`]: page token traversal
//! - [`fixtures`]: request bodies and sample payloads
//! - [`checks`]: one module per resource and identity variant
//! - [`scenario`]: setup, the default check sequence and teardown

pub mod assertions;
pub mod check;
pub mod checks;
pub mod cli;
pub mod error;
pub mod fixtures;
pub mod pagination;
pub mod scenario;
pub mod session;

pub use check::{Outcome, Recorder, Summary};
pub use error::{HarnessError, Result};
pub use scenario::Report;
pub use session::{Scope, Session};
