/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Connector calls made under an identity that owns nothing.
//!
//! Resources are created and deleted with the session credentials; only the
//! call under test switches identity. Every such call must be rejected with
//! 401, including List. Gateway mode only.

use serde_json::json;
use vdp_client::Expect;
use vdp_models::View;

use super::{connect, create_connector, data_connectors, delete_connector};
use crate::error::Result;
use crate::fixtures::{self, random_string};
use crate::session::Session;

pub async fn check_create(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let foreign = backend.as_identity(session.foreign_credentials().clone());

    let reply = foreign.create_connector(&fixtures::new_connector_body()).await?;
    rec.status("create connector as a foreign identity", &reply, Expect::Unauthenticated);
    Ok(())
}

pub async fn check_list(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let foreign = backend.as_identity(session.foreign_credentials().clone());

    let reply = foreign.list_connectors(&data_connectors()).await?;
    rec.status("list connectors as a foreign identity", &reply, Expect::Unauthenticated);
    Ok(())
}

pub async fn check_get(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;
    connect(rec, &*backend, &created.id, Expect::Ok).await?;

    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign.get_connector(&created.id, View::Unspecified).await?;
    rec.status("get connector as a foreign identity", &reply, Expect::Unauthenticated);

    delete_connector(rec, &*backend, &created.id).await
}

pub async fn check_update(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;

    let body = json!({
        "id": created.id,
        "connector_definition_name": created.connector_definition_name,
        "tombstone": true,
        "description": random_string(50),
        "configuration": {"destination_path": "/tmp"}
    });
    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign
        .update_connector(&created.id, &body, &["description", "configuration"])
        .await?;
    rec.status("update connector as a foreign identity", &reply, Expect::Unauthenticated);

    delete_connector(rec, &*backend, &created.id).await
}

pub async fn check_lookup(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;

    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign.lookup_connector(&created.uid, View::Unspecified).await?;
    rec.status("look up connector as a foreign identity", &reply, Expect::Unauthenticated);

    delete_connector(rec, &*backend, &created.id).await
}

/// Connect and Disconnect from the unspecified state.
pub async fn check_state(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;

    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign.disconnect_connector(&created.id).await?;
    rec.status("disconnect connector as a foreign identity", &reply, Expect::Unauthenticated);
    let reply = foreign.connect_connector(&created.id).await?;
    rec.status("connect connector as a foreign identity", &reply, Expect::Unauthenticated);

    delete_connector(rec, &*backend, &created.id).await
}

pub async fn check_rename(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;

    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign
        .rename_connector(&created.id, &format!("some_id_not_{}", created.id))
        .await?;
    rec.status("rename connector as a foreign identity", &reply, Expect::Unauthenticated);

    delete_connector(rec, &*backend, &created.id).await
}

pub async fn check_execute(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;
    connect(rec, &*backend, &created.id, Expect::Ok).await?;

    let inputs = fixtures::model_outputs()
        .into_iter()
        .next()
        .map(|(_, inputs)| inputs)
        .unwrap_or_default();
    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign.execute_connector(&created.id, &inputs).await?;
    rec.status("execute connector as a foreign identity", &reply, Expect::Unauthenticated);

    delete_connector(rec, &*backend, &created.id).await
}

pub async fn check_test(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;
    connect(rec, &*backend, &created.id, Expect::Ok).await?;

    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign.test_connector(&created.id).await?;
    rec.status("test connector as a foreign identity", &reply, Expect::Unauthenticated);

    delete_connector(rec, &*backend, &created.id).await
}
