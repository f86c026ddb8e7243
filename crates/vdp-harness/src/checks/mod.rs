/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Checks Module
//!
//! One submodule per resource, one `check_*` function per operation group.
//!
//! Every check function has the shape
//! `async fn(&Session) -> Result<(), HarnessError>`. Assertions are recorded
//! on the session's recorder and never abort the group; an `Err` means a
//! step the rest of the group depends on failed, and the runner records the
//! skip. Resources a group creates are deleted by that group; the teardown
//! sweep catches whatever a skipped group left behind.

pub mod component_definitions;
pub mod connector_definitions;
pub mod connectors;
pub mod connectors_foreign;
pub mod connectors_private;
pub mod invariants;
pub mod operator_definitions;
pub mod pipelines;
pub mod pipelines_foreign;
pub mod pipelines_invalid_auth;
pub mod pipelines_private;
pub mod releases;
pub mod trigger;

use std::time::Duration;

use log::debug;
use serde_json::Value;
use vdp_client::{Backend, Expect, ListQuery};
use vdp_models::{Connector, ConnectorState, Pipeline};

use crate::check::Recorder;
use crate::error::Result;
use crate::session::Session;

/// Restricts connector listings to data connectors.
pub const DATA_CONNECTOR_FILTER: &str = "connector_type=CONNECTOR_TYPE_DATA";

/// Largest page the backend hands out.
pub const MAX_PAGE_SIZE: i64 = 100;

/// An id no test ever creates.
pub const MISSING_ID: &str = "this-id-does-not-exist";

pub(crate) fn data_connectors() -> ListQuery {
    ListQuery::new().filter(DATA_CONNECTOR_FILTER)
}

/// Creates a connector and records the status; the created connector is
/// required for the rest of the group.
pub(crate) async fn create_connector(
    recorder: &Recorder,
    backend: &dyn Backend,
    body: &Value,
) -> Result<Connector> {
    let reply = backend.create_connector(body).await?;
    recorder.status("create connector", &reply, Expect::Created);
    Ok(reply.require(Expect::Created)?)
}

pub(crate) async fn delete_connector(
    recorder: &Recorder,
    backend: &dyn Backend,
    id: &str,
) -> Result<()> {
    let reply = backend.delete_connector(id).await?;
    recorder.status(&format!("delete connector {}", id), &reply, Expect::NoContent);
    Ok(())
}

/// Connects a connector, recording the status.
pub(crate) async fn connect(
    recorder: &Recorder,
    backend: &dyn Backend,
    id: &str,
    expect: Expect,
) -> Result<bool> {
    let reply = backend.connect_connector(id).await?;
    Ok(recorder.status(&format!("connect connector {}", id), &reply, expect))
}

pub(crate) async fn disconnect(
    recorder: &Recorder,
    backend: &dyn Backend,
    id: &str,
) -> Result<bool> {
    let reply = backend.disconnect_connector(id).await?;
    Ok(recorder.status(
        &format!("disconnect connector {}", id),
        &reply,
        Expect::Ok,
    ))
}

/// Polls Watch until the connector reports `wanted`.
///
/// Returns whether the state was reached within the configured attempts.
/// A failed Watch call counts as a miss and polling goes on.
pub(crate) async fn wait_for_state(
    session: &Session,
    backend: &dyn Backend,
    id: &str,
    wanted: ConnectorState,
) -> Result<bool> {
    let attempts = session.settings.client.watch_poll_attempts.max(1);
    let interval = Duration::from_millis(session.settings.client.watch_poll_interval_ms);

    for attempt in 1..=attempts {
        let reply = backend.watch_connector(id).await?;
        let state = reply.body().map(|s| s.state);
        if state == Some(wanted) {
            return Ok(true);
        }
        debug!(
            "connector {} is {:?} after {} of {} polls, waiting for {}",
            id, state, attempt, attempts, wanted
        );
        if attempt < attempts {
            tokio::time::sleep(interval).await;
        }
    }
    Ok(false)
}

/// Records that Watch reaches `wanted`.
pub(crate) async fn check_state(
    session: &Session,
    backend: &dyn Backend,
    id: &str,
    wanted: ConnectorState,
) -> Result<bool> {
    let reached = wait_for_state(session, backend, id, wanted).await?;
    Ok(session
        .recorder()
        .check(format!("watch connector {} reports {}", id, wanted), reached))
}

/// Creates a pipeline and records the status; the created pipeline is
/// required for the rest of the group.
pub(crate) async fn create_pipeline(
    recorder: &Recorder,
    backend: &dyn Backend,
    body: &Value,
) -> Result<Pipeline> {
    let reply = backend.create_pipeline(Some(body)).await?;
    recorder.status("create pipeline", &reply, Expect::Created);
    Ok(reply.require(Expect::Created)?)
}

pub(crate) async fn delete_pipeline(
    recorder: &Recorder,
    backend: &dyn Backend,
    id: &str,
) -> Result<()> {
    let reply = backend.delete_pipeline(id).await?;
    recorder.status(&format!("delete pipeline {}", id), &reply, Expect::NoContent);
    Ok(())
}
