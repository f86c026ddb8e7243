/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Typed shapes of the resources exposed by the pipeline backend.
//!
//! Field names follow the REST representation. Every struct accepts both the
//! snake_case and camelCase spelling of a field since the backend mixes them
//! across resources. Fields that only appear under `VIEW_FULL` are `Option`s.

pub mod models;

pub use models::*;
