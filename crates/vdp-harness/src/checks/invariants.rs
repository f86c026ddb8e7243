/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Resource Name Invariants
//!
//! A resource's `name` is its only canonical identifier and its `id` is
//! always the last segment of that name. Backend calls accept canonical
//! ids only.

use serde_json::{json, Value};
use vdp_client::{Backend, Expect};
use vdp_models::{NewRelease, Pipeline, View};

use super::delete_pipeline;
use crate::assertions::{id_from_name, is_pipeline_name, is_release_name};
use crate::check::Recorder;
use crate::error::{HarnessError, Result};
use crate::fixtures::{random_string, SIMPLE_RECIPE_YAML};
use crate::session::Session;

const CREATED: [Expect; 2] = [Expect::Ok, Expect::Created];

fn pipeline_body(session: &Session, kind: &str, suffix: &str) -> Value {
    json!({
        "id": format!("{}{}-{}", session.settings.fixtures.db_id_prefix, kind, suffix),
        "description": format!("Pipeline for {} testing", kind),
        "rawRecipe": SIMPLE_RECIPE_YAML,
    })
}

async fn create(
    recorder: &Recorder,
    backend: &dyn Backend,
    body: &Value,
) -> Result<Pipeline> {
    let reply = backend.create_pipeline(Some(body)).await?;
    recorder.status_any("create pipeline", &reply, &CREATED);
    if !reply.is_any(&CREATED) {
        return Err(HarnessError::precondition(format!(
            "create pipeline returned {}",
            reply.status
        )));
    }
    reply
        .body
        .ok_or_else(|| HarnessError::precondition("create pipeline returned no pipeline"))
}

/// `name` is the full canonical path and `id` is derived from it.
pub async fn check_canonical_name(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let pipeline = create(rec, &*backend, &pipeline_body(session, "invariant", &random_string(8)))
        .await?;

    let owner_path = format!("users/{}", session.expected_owner_id());
    rec.table(
        "pipeline name",
        &[
            ("contains the namespace", pipeline.name.contains(&owner_path)),
            ("contains the resource type", pipeline.name.contains("/pipelines/")),
            ("ends with id", pipeline.name.ends_with(&pipeline.id)),
            ("matches the canonical pattern", is_pipeline_name(&pipeline.name)),
            ("id equals the last segment", id_from_name(&pipeline.name) == pipeline.id),
        ],
    );

    delete_pipeline(rec, &*backend, &pipeline.id).await
}

/// Lookups by canonical id resolve; anything else does not.
pub async fn check_canonical_id(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let pipeline = create(rec, &*backend, &pipeline_body(session, "canonical", &random_string(8)))
        .await?;

    let got = backend.get_pipeline(&pipeline.id, View::Unspecified).await?;
    rec.status("get pipeline by canonical id", &got, Expect::Ok);
    rec.check(
        "get pipeline by canonical id returns the pipeline",
        got.body().map_or(false, |p| p.id == pipeline.id),
    );

    let missing = backend
        .get_pipeline("non-existent-pipeline-id", View::Unspecified)
        .await?;
    rec.status_any(
        "get pipeline by unknown id",
        &missing,
        &[Expect::NotFound, Expect::InvalidArgument],
    );

    delete_pipeline(rec, &*backend, &pipeline.id).await
}

/// Release names nest under their pipeline's name.
pub async fn check_release_name(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let suffix = random_string(8);
    let pipeline = create(rec, &*backend, &pipeline_body(session, "release", &suffix)).await?;

    let release = NewRelease {
        id: format!("v1-{}", suffix),
        description: Some("Test release".to_string()),
    };
    let body = serde_json::to_value(&release).unwrap_or(Value::Null);
    let reply = backend.create_release(&pipeline.id, &body).await?;
    rec.status_any("create release", &reply, &CREATED);

    if let Some(created) = reply.body().filter(|_| reply.is_any(&CREATED)) {
        rec.table(
            "release name",
            &[
                ("matches the canonical pattern", is_release_name(&created.name)),
                (
                    "contains the pipeline",
                    created.name.contains(&format!("pipelines/{}", pipeline.id)),
                ),
                ("ends with the release id", created.name.ends_with(&created.id)),
            ],
        );
        let deleted = backend.delete_release(&pipeline.id, &created.id).await?;
        rec.status("delete release", &deleted, Expect::NoContent);
    }

    delete_pipeline(rec, &*backend, &pipeline.id).await
}
