/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Pipeline calls made under an identity that owns nothing. Gateway mode only.
//!
//! Unlike connectors, the pipeline List succeeds with a caller scoped page
//! and a Get reports the pipeline as missing rather than unauthorized.

use serde_json::json;
use vdp_client::{Expect, ListQuery};
use vdp_models::View;

use super::{create_pipeline, delete_pipeline};
use crate::error::Result;
use crate::fixtures::{self, random_string};
use crate::session::Session;

pub async fn check_create(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let foreign = backend.as_identity(session.foreign_credentials().clone());

    let reply = foreign
        .create_pipeline(Some(&fixtures::new_pipeline_body()))
        .await?;
    rec.status("create pipeline as a foreign identity", &reply, Expect::Unauthenticated);
    Ok(())
}

pub async fn check_list(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let foreign = backend.as_identity(session.foreign_credentials().clone());

    let reply = foreign.list_pipelines(&ListQuery::new()).await?;
    rec.status("list pipelines as a foreign identity", &reply, Expect::Ok);
    Ok(())
}

pub async fn check_get(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign.get_pipeline(&created.id, View::Unspecified).await?;
    rec.status("get pipeline as a foreign identity", &reply, Expect::NotFound);

    delete_pipeline(rec, &*backend, &created.id).await
}

pub async fn check_update(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign
        .update_pipeline(
            &created.id,
            &json!({"description": random_string(50)}),
            &["description"],
        )
        .await?;
    rec.status("update pipeline as a foreign identity", &reply, Expect::Unauthenticated);

    delete_pipeline(rec, &*backend, &created.id).await
}

pub async fn check_rename(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let new_id = format!("{}{}", session.settings.fixtures.db_id_prefix, random_string(10));
    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign.rename_pipeline(&created.id, &new_id).await?;
    rec.status("rename pipeline as a foreign identity", &reply, Expect::Unauthenticated);

    delete_pipeline(rec, &*backend, &created.id).await
}

pub async fn check_lookup(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let foreign = backend.as_identity(session.foreign_credentials().clone());
    let reply = foreign.lookup_pipeline(&created.uid, View::Unspecified).await?;
    rec.status("look up pipeline as a foreign identity", &reply, Expect::Unauthenticated);

    delete_pipeline(rec, &*backend, &created.id).await
}
