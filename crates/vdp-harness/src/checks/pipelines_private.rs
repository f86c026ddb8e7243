/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Admin pipeline calls against the private service. Direct mode only.

use vdp_client::{Expect, ListQuery};
use vdp_models::View;

use super::pipelines::{check_list_views, Listing, CREATED_SINCE_2000};
use super::{create_pipeline, delete_pipeline};
use crate::error::Result;
use crate::fixtures;
use crate::session::Session;

pub async fn check_list(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let empty = Listing::Admin.list(&*backend, &ListQuery::new()).await?;
    rec.status("list pipelines by admin before create", &empty, Expect::Ok);

    let mut ids = Vec::new();
    for _ in 0..session.settings.fixtures.pipeline_list_count {
        let reply = backend.create_pipeline(Some(&fixtures::new_pipeline_body())).await?;
        if rec.status("create pipeline for admin listing", &reply, Expect::Created) {
            if let Some(pipeline) = reply.body() {
                ids.push(pipeline.id.clone());
            }
        }
    }

    let listed = Listing::Admin.list(&*backend, &ListQuery::new()).await?;
    rec.status("list pipelines by admin", &listed, Expect::Ok);
    rec.check(
        "list pipelines by admin pipelines[0].recipe is null",
        listed
            .body()
            .and_then(|page| page.pipelines.first())
            .map_or(false, |p| p.recipe.is_none()),
    );

    check_list_views(session, &*backend, Listing::Admin).await?;

    let filtered = Listing::Admin
        .list(&*backend, &ListQuery::new().filter(CREATED_SINCE_2000))
        .await?;
    rec.status("list pipelines by admin filtered by createTime", &filtered, Expect::Ok);
    rec.check(
        "list pipelines by admin filtered by createTime returns results",
        filtered.body().map_or(false, |page| !page.pipelines.is_empty()),
    );

    for id in ids {
        delete_pipeline(rec, &*backend, &id).await?;
    }
    Ok(())
}

pub async fn check_lookup(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let found = backend
        .lookup_pipeline_admin(&created.uid, View::Unspecified)
        .await?;
    rec.status("look up pipeline by admin", &found, Expect::Ok);
    rec.check(
        "pipeline looked up by admin has the created uid",
        found.body().map_or(false, |p| p.uid == created.uid),
    );

    delete_pipeline(rec, &*backend, &created.id).await
}
