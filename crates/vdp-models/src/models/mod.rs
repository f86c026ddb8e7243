/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Data models for the resources the harness drives
pub mod common;
pub mod component_definitions;
pub mod connector_definitions;
pub mod connectors;
pub mod operations;
pub mod operator_definitions;
pub mod owner;
pub mod pipelines;
pub mod releases;

pub use common::{Paginated, View};
pub use component_definitions::{ComponentDefinition, ComponentDefinitionPage};
pub use connector_definitions::{ConnectorDefinition, ConnectorDefinitionPage};
pub use connectors::{Connector, ConnectorPage, ConnectorState, NewConnector, StateResponse};
pub use operations::{Operation, OperationError, OPERATION_PREFIX};
pub use operator_definitions::{OperatorDefinition, OperatorDefinitionPage};
pub use owner::{Owner, User};
pub use pipelines::{NewPipeline, Pipeline, PipelinePage, TriggerResponse};
pub use releases::{NewRelease, PipelineRelease, ReleasePage};
