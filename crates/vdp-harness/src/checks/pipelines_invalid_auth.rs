/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Pipeline calls with credentials the backend cannot parse.

use serde_json::json;
use vdp_client::{Backend, Credentials, Expect, ListQuery};
use vdp_models::View;

use super::{create_pipeline, delete_pipeline};
use crate::error::Result;
use crate::fixtures::{self, random_string};
use crate::session::{Scope, Session};

fn invalid(backend: &Scope) -> Box<dyn Backend> {
    backend.as_identity(Credentials::Invalid)
}

pub async fn check_create(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let reply = invalid(&backend)
        .create_pipeline(Some(&fixtures::new_pipeline_body()))
        .await?;
    rec.status("create pipeline with invalid auth", &reply, Expect::Unauthenticated);
    Ok(())
}

pub async fn check_list(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let reply = invalid(&backend).list_pipelines(&ListQuery::new()).await?;
    rec.status("list pipelines with invalid auth", &reply, Expect::Unauthenticated);
    Ok(())
}

pub async fn check_get(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let reply = invalid(&backend)
        .get_pipeline(&created.id, View::Unspecified)
        .await?;
    rec.status("get pipeline with invalid auth", &reply, Expect::Unauthenticated);

    delete_pipeline(rec, &*backend, &created.id).await
}

pub async fn check_update(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let reply = invalid(&backend)
        .update_pipeline(
            &created.id,
            &json!({"description": random_string(50)}),
            &["description"],
        )
        .await?;
    rec.status("update pipeline with invalid auth", &reply, Expect::Unauthenticated);

    delete_pipeline(rec, &*backend, &created.id).await
}

pub async fn check_rename(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let new_id = format!("{}{}", session.settings.fixtures.db_id_prefix, random_string(10));
    let reply = invalid(&backend).rename_pipeline(&created.id, &new_id).await?;
    rec.status("rename pipeline with invalid auth", &reply, Expect::Unauthenticated);

    delete_pipeline(rec, &*backend, &created.id).await
}
