/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Releases of a pipeline: create, list, get under each view, delete.

use serde_json::Value;
use vdp_client::{Expect, ListQuery};
use vdp_models::{NewRelease, View};

use super::{create_pipeline, delete_pipeline};
use crate::assertions::{after_epoch, is_release_name, is_uuid};
use crate::error::Result;
use crate::fixtures::{self, random_string};
use crate::session::Session;

pub async fn check_lifecycle(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let pipeline = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let release = NewRelease {
        id: format!("v1-{}", random_string(8)),
        description: Some(random_string(50)),
    };
    let body = serde_json::to_value(&release).unwrap_or(Value::Null);
    let created = backend.create_release(&pipeline.id, &body).await?;
    rec.status_any("create release", &created, &[Expect::Created, Expect::Ok]);
    let Some(created) = created.body else {
        return delete_pipeline(rec, &*backend, &pipeline.id).await;
    };
    rec.table(
        "created release",
        &[
            ("id", created.id == release.id),
            ("name", is_release_name(&created.name)),
            ("uid is a UUID", is_uuid(&created.uid)),
            (
                "description",
                Some(&created.description) == release.description.as_ref(),
            ),
            ("createTime", after_epoch(created.create_time)),
        ],
    );

    let listed = backend.list_releases(&pipeline.id, &ListQuery::new()).await?;
    rec.status("list releases", &listed, Expect::Ok);
    rec.table(
        "list releases",
        &[
            (
                "totalSize is 1",
                listed.body().map_or(false, |page| page.total_size == 1),
            ),
            (
                "holds the created release",
                listed
                    .body()
                    .map_or(false, |page| page.releases.iter().any(|r| r.id == created.id)),
            ),
        ],
    );

    let basic = backend
        .get_release(&pipeline.id, &created.id, View::Basic)
        .await?;
    rec.status("get release view=VIEW_BASIC", &basic, Expect::Ok);
    rec.check(
        "get release view=VIEW_BASIC recipe is null",
        basic.body().map_or(false, |r| r.recipe.is_none()),
    );

    let full = backend
        .get_release(&pipeline.id, &created.id, View::Full)
        .await?;
    rec.status("get release view=VIEW_FULL", &full, Expect::Ok);
    rec.check(
        "get release view=VIEW_FULL recipe is not null",
        full.body().map_or(false, |r| r.recipe.is_some()),
    );

    let deleted = backend.delete_release(&pipeline.id, &created.id).await?;
    rec.status("delete release", &deleted, Expect::NoContent);

    delete_pipeline(rec, &*backend, &pipeline.id).await
}
