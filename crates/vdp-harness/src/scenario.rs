/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Scenario Module
//!
//! Drives one run through its three phases.
//!
//! 1. **setup**: obtain credentials, capture the authenticated user as the
//!    expected owner and purge connectors and pipelines left by earlier runs
//! 2. **default**: health, then every check group in a fixed order. Direct
//!    mode runs the private admin groups, api-gateway mode runs the foreign
//!    identity groups instead
//! 3. **teardown**: delete whatever is still in the namespace
//!
//! Each group runs under [`run_check!`]: the group is opened on the recorder,
//! and a group that stops on a [`HarnessError`] is recorded as a failed check
//! before the next group starts.

use log::{debug, error, info, warn};
use vdp_client::{Backend, Credentials, Expect, ListQuery, Transport};
use vdp_models::{Connector, Pipeline};
use vdp_utils::config::{AuthMode, Settings};

use crate::check::{Outcome, Summary};
use crate::checks::{self, data_connectors};
use crate::error::Result;
use crate::pagination::traverse;
use crate::session::Session;

/// Page size used to sweep a namespace.
const SWEEP_PAGE_SIZE: i32 = 100;

/// Totals of a run plus every failed check.
#[derive(Debug, Clone)]
pub struct Report {
    pub summary: Summary,
    pub failures: Vec<Outcome>,
}

/// Runs one check group and records a skip if it stopped early.
macro_rules! run_check {
    ($session:expr, $name:expr, $check:expr) => {{
        let recorder = $session.recorder();
        recorder.begin_group($name);
        if let Err(e) = $check.await {
            warn!("{} stopped early: {}", $name, e);
            recorder.precondition_failed(&e);
        }
        recorder.end_group();
    }};
}

/// Runs setup, the default scenario and teardown, and returns the totals.
///
/// When setup fails the default scenario is skipped; teardown always runs.
pub async fn run(settings: Settings, transport: Transport) -> Result<Report> {
    run_session(Session::new(settings, transport)?).await
}

/// Runs every phase on an already constructed session.
pub async fn run_session(mut session: Session) -> Result<Report> {
    info!(
        "running {} checks in {} mode against {}",
        session.transport(),
        if session.is_api_gateway() { "api-gateway" } else { "direct" },
        session.endpoints.pipeline_public_rest
    );

    session.recorder().begin_group("Setup");
    let ready = setup(&mut session).await;
    if let Err(e) = &ready {
        error!("setup failed: {}", e);
        session.recorder().precondition_failed(e);
    }
    session.recorder().end_group();

    if ready.is_ok() {
        run_default(&session).await;
    }
    run_check!(session, "Teardown: delete everything left in the namespace", teardown(&session));

    let rec = session.recorder();
    Ok(Report {
        summary: rec.summary(),
        failures: rec.failures(),
    })
}

/// Authenticates the session and clears the namespace.
///
/// Only a failed login is fatal; the purge is best effort.
pub async fn setup(session: &mut Session) -> Result<()> {
    let mgmt = session.mgmt()?;
    let auth = session.settings.auth.clone();
    let credentials = match auth.mode {
        AuthMode::Login => mgmt.login(&auth.username, &auth.password).await?,
        AuthMode::Basic => Credentials::basic(&auth.username, &auth.password),
    };
    info!("authenticated as {} with {}", auth.username, credentials.label());

    let user = mgmt.authenticated_user(&credentials).await?;
    match user.body {
        Some(user) => session.set_expected_owner(user),
        None => warn!(
            "could not fetch the authenticated user ({}), expecting owner {}",
            user.status, auth.username
        ),
    }
    session.set_credentials(credentials);

    if let Err(e) = purge(session).await {
        warn!("could not purge leftovers from earlier runs: {}", e);
    }
    Ok(())
}

/// Deletes connectors and pipelines left by earlier runs without recording.
async fn purge(session: &Session) -> Result<()> {
    let backend = session.connect().await?;
    let connectors = list_connectors(&*backend).await?;
    let pipelines = list_pipelines(&*backend).await?;
    info!(
        "purging {} connectors and {} pipelines left by earlier runs",
        connectors.len(),
        pipelines.len()
    );
    for connector in connectors {
        let reply = backend.delete_connector(&connector.id).await?;
        debug!("purge connector {}: {}", connector.id, reply.status);
    }
    for pipeline in pipelines {
        let reply = backend.delete_pipeline(&pipeline.id).await?;
        debug!("purge pipeline {}: {}", pipeline.id, reply.status);
    }
    Ok(())
}

/// The default check sequence.
pub async fn run_default(session: &Session) {
    use checks::{
        component_definitions, connector_definitions, connectors, connectors_foreign,
        connectors_private, invariants, operator_definitions, pipelines, pipelines_foreign,
        pipelines_invalid_auth, pipelines_private, releases, trigger,
    };

    run_check!(session, "Pipelines API: Health check", check_health(session));

    run_check!(session, "Connector definitions API: List", connector_definitions::check_list(session));
    run_check!(session, "Connector definitions API: Get", connector_definitions::check_get(session));

    if session.is_api_gateway() {
        run_check!(session, "Connector API: Create [foreign identity]", connectors_foreign::check_create(session));
        run_check!(session, "Connector API: List [foreign identity]", connectors_foreign::check_list(session));
        run_check!(session, "Connector API: Get [foreign identity]", connectors_foreign::check_get(session));
        run_check!(session, "Connector API: Update [foreign identity]", connectors_foreign::check_update(session));
        run_check!(session, "Connector API: Look up [foreign identity]", connectors_foreign::check_lookup(session));
        run_check!(session, "Connector API: Change state [foreign identity]", connectors_foreign::check_state(session));
        run_check!(session, "Connector API: Rename [foreign identity]", connectors_foreign::check_rename(session));
        run_check!(session, "Connector API: Execute [foreign identity]", connectors_foreign::check_execute(session));
        run_check!(session, "Connector API: Test [foreign identity]", connectors_foreign::check_test(session));

        run_check!(session, "Pipelines API: Create [foreign identity]", pipelines_foreign::check_create(session));
        run_check!(session, "Pipelines API: List [foreign identity]", pipelines_foreign::check_list(session));
        run_check!(session, "Pipelines API: Get [foreign identity]", pipelines_foreign::check_get(session));
        run_check!(session, "Pipelines API: Update [foreign identity]", pipelines_foreign::check_update(session));
        run_check!(session, "Pipelines API: Rename [foreign identity]", pipelines_foreign::check_rename(session));
        run_check!(session, "Pipelines API: Look up [foreign identity]", pipelines_foreign::check_lookup(session));
    } else {
        run_check!(session, "Connector API: List by admin", connectors_private::check_list(session));
        run_check!(session, "Connector API: Look up by admin", connectors_private::check_lookup(session));
        run_check!(session, "Pipelines API: List by admin", pipelines_private::check_list(session));
        run_check!(session, "Pipelines API: Look up by admin", pipelines_private::check_lookup(session));
    }

    run_check!(session, "Connector API: Create", connectors::check_create(session));
    run_check!(session, "Connector API: List", connectors::check_list(session));
    run_check!(session, "Connector API: Get", connectors::check_get(session));
    run_check!(session, "Connector API: Update", connectors::check_update(session));
    run_check!(session, "Connector API: Look up", connectors::check_lookup(session));
    run_check!(session, "Connector API: Connect", connectors::check_connect(session));
    run_check!(session, "Connector API: Change state", connectors::check_state_transitions(session));
    run_check!(session, "Connector API: Rename", connectors::check_rename(session));
    run_check!(session, "Connector API: Execute", connectors::check_execute(session));
    run_check!(session, "Connector API: Test", connectors::check_test(session));

    run_check!(session, "Pipelines API: Create", pipelines::check_create(session));
    run_check!(session, "Pipelines API: List", pipelines::check_list(session));
    run_check!(session, "Pipelines API: Get", pipelines::check_get(session));
    run_check!(session, "Pipelines API: Update", pipelines::check_update(session));
    run_check!(session, "Pipelines API: Rename", pipelines::check_rename(session));
    run_check!(session, "Pipelines API: Look up", pipelines::check_lookup(session));

    run_check!(session, "Pipelines API: Create [invalid auth]", pipelines_invalid_auth::check_create(session));
    run_check!(session, "Pipelines API: List [invalid auth]", pipelines_invalid_auth::check_list(session));
    run_check!(session, "Pipelines API: Get [invalid auth]", pipelines_invalid_auth::check_get(session));
    run_check!(session, "Pipelines API: Update [invalid auth]", pipelines_invalid_auth::check_update(session));
    run_check!(session, "Pipelines API: Rename [invalid auth]", pipelines_invalid_auth::check_rename(session));

    run_check!(session, "Releases API: Lifecycle", releases::check_lifecycle(session));

    run_check!(session, "Component API: List", component_definitions::check_list(session));
    run_check!(session, "Component API: Views", component_definitions::check_views(session));
    run_check!(session, "Component API: Filters", component_definitions::check_filters(session));
    run_check!(session, "Component API: List operator definitions", operator_definitions::check_list(session));
    run_check!(session, "Component API: Get operator definition", operator_definitions::check_get(session));

    run_check!(session, "Invariants: name is the canonical identifier", invariants::check_canonical_name(session));
    run_check!(session, "Invariants: backend only accepts canonical ids", invariants::check_canonical_id(session));
    run_check!(session, "Invariants: release name format", invariants::check_release_name(session));

    run_check!(session, "Pipelines API: Trigger", trigger::check_trigger(session));
    run_check!(session, "Pipelines API: Trigger with images", trigger::check_trigger_images(session));
    run_check!(session, "Pipelines API: Trigger an async pipeline", trigger::check_trigger_async(session));
}

pub async fn check_health(session: &Session) -> Result<()> {
    let backend = session.connect().await?;
    let reply = backend.health().await?;
    session.recorder().status("health check", &reply, Expect::Ok);
    Ok(())
}

/// Deletes every connector and pipeline still in the namespace.
pub async fn teardown(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    for connector in list_connectors(&*backend).await? {
        let reply = backend.delete_connector(&connector.id).await?;
        rec.status(&format!("delete connector {}", connector.id), &reply, Expect::NoContent);
    }
    for pipeline in list_pipelines(&*backend).await? {
        let reply = backend.delete_pipeline(&pipeline.id).await?;
        rec.status(&format!("delete pipeline {}", pipeline.id), &reply, Expect::NoContent);
    }
    Ok(())
}

async fn list_connectors(backend: &dyn Backend) -> Result<Vec<Connector>> {
    let walked = traverse(&data_connectors(), SWEEP_PAGE_SIZE, |q| async move {
        backend.list_connectors(&q).await
    })
    .await?;
    Ok(walked.items)
}

async fn list_pipelines(backend: &dyn Backend) -> Result<Vec<Pipeline>> {
    let walked = traverse(&ListQuery::new(), SWEEP_PAGE_SIZE, |q| async move {
        backend.list_pipelines(&q).await
    })
    .await?;
    Ok(walked.items)
}
