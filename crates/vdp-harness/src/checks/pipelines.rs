/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Pipeline lifecycle under the session's own identity.
//!
//! Pipeline ids are generated by the backend, so every group reads the id
//! back from the create reply.

use serde_json::{json, Value};
use vdp_client::{Backend, Expect, ListQuery, Reply};
use vdp_models::{Pipeline, PipelinePage, View};

use super::{create_pipeline, delete_pipeline, MAX_PAGE_SIZE, MISSING_ID};
use crate::assertions::{after_epoch, is_uuid, is_valid_owner, slugify, validate_recipe};
use crate::error::Result;
use crate::fixtures::{self, random_string, PIPELINE_DISPLAY_NAME};
use crate::pagination::{check_traversal, same_first_page, traverse};
use crate::session::Session;

/// Matches every pipeline created after mid 2000.
pub const CREATED_SINCE_2000: &str = r#"createTime>timestamp("2000-06-19T23:31:08.657Z")"#;

fn has_creator(pipeline: &Pipeline) -> bool {
    pipeline
        .creator_name
        .as_deref()
        .map_or(false, |creator| creator.starts_with("users/"))
}

pub async fn check_create(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let body = fixtures::new_pipeline_body();
    let created = create_pipeline(rec, &*backend, &body).await?;
    rec.table(
        "created pipeline",
        &[
            ("has id", !created.id.is_empty()),
            ("has name", created.name.contains("/pipelines/")),
            (
                "echoes displayName",
                created.display_name.as_deref() == Some(PIPELINE_DISPLAY_NAME),
            ),
            (
                "slug derived from displayName",
                created.slug.as_deref() == Some(slugify(PIPELINE_DISPLAY_NAME).as_str()),
            ),
            ("echoes description", created.description == body["description"]),
            ("recipe is valid", validate_recipe(created.recipe.as_ref(), false)),
            (
                "owner is valid",
                is_valid_owner(created.owner.as_ref(), session.expected_owner_id()),
            ),
            ("creatorName is valid", has_creator(&created)),
            ("createTime", after_epoch(created.create_time)),
            ("updateTime", after_epoch(created.update_time)),
        ],
    );

    let empty = backend.create_pipeline(Some(&json!({}))).await?;
    rec.status("create pipeline with empty body", &empty, Expect::InvalidArgument);
    let none = backend.create_pipeline(None).await?;
    rec.status("create pipeline with null body", &none, Expect::InvalidArgument);

    delete_pipeline(rec, &*backend, &created.id).await
}

/// Pagination and view elision over a namespace holding at least
/// `pipeline_list_count` pipelines.
pub async fn check_list(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let count = i64::from(session.settings.fixtures.pipeline_list_count);

    let baseline = backend.list_pipelines(&ListQuery::new()).await?;
    rec.status("list pipelines before create", &baseline, Expect::Ok);
    rec.check(
        "list pipelines totalSize >= 0",
        baseline.body().map_or(false, |page| page.total_size >= 0),
    );

    let mut ids = Vec::new();
    for _ in 0..count {
        let reply = backend.create_pipeline(Some(&fixtures::new_pipeline_body())).await?;
        if rec.status("create pipeline for listing", &reply, Expect::Created) {
            if let Some(pipeline) = reply.body() {
                ids.push(pipeline.id.clone());
            }
        }
    }

    let listed = backend.list_pipelines(&ListQuery::new()).await?;
    rec.status("list pipelines", &listed, Expect::Ok);
    let page = listed.require(Expect::Ok)?;
    let first = page.pipelines.first();
    rec.table(
        "list pipelines",
        &[
            ("pipelines.length == 10", page.pipelines.len() == 10),
            ("pipelines[0].recipe is null", first.map_or(false, |p| p.recipe.is_none())),
            (
                "totalSize covers the created pipelines",
                page.total_size >= count,
            ),
            (
                "pipelines[0].owner is valid",
                first.map_or(false, |p| {
                    is_valid_owner(p.owner.as_ref(), session.expected_owner_id())
                }),
            ),
            ("pipelines[0].creatorName is valid", first.map_or(false, has_creator)),
        ],
    );
    let total = page.total_size;

    check_list_views(session, &*backend, Listing::Namespace).await?;

    if total > MAX_PAGE_SIZE {
        let first_hundred = backend
            .list_pipelines(&ListQuery::new().page_size(MAX_PAGE_SIZE as i32))
            .await?
            .require(Expect::Ok)?;
        let next = backend
            .list_pipelines(
                &ListQuery::new()
                    .page_size(MAX_PAGE_SIZE as i32)
                    .page_token(first_hundred.next_page_token),
            )
            .await?;
        rec.status("list pipelines with pageToken", &next, Expect::Ok);
        rec.check(
            "list pipelines with pageToken returns results",
            page_len(&next).map_or(false, |len| len > 0),
        );
    }

    let filtered = backend
        .list_pipelines(&ListQuery::new().filter(CREATED_SINCE_2000))
        .await?;
    rec.status("list pipelines filtered by createTime", &filtered, Expect::Ok);
    rec.check(
        "list pipelines filtered by createTime returns results",
        page_len(&filtered).map_or(false, |len| len > 0),
    );

    for id in ids {
        delete_pipeline(rec, &*backend, &id).await?;
    }
    Ok(())
}

fn page_len(reply: &Reply<PipelinePage>) -> Option<usize> {
    reply.body().map(|page| page.pipelines.len())
}

/// Which listing a view check drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Listing {
    Namespace,
    /// Private admin listing; connector references render as permalinks
    Admin,
}

impl Listing {
    fn label(&self) -> &'static str {
        match self {
            Listing::Namespace => "list pipelines",
            Listing::Admin => "list pipelines by admin",
        }
    }

    pub(crate) async fn list(
        &self,
        backend: &dyn Backend,
        query: &ListQuery,
    ) -> vdp_client::Result<Reply<PipelinePage>> {
        match self {
            Listing::Namespace => backend.list_pipelines(query).await,
            Listing::Admin => backend.list_pipelines_admin(query).await,
        }
    }
}

/// Records recipe elision and paging of a pipeline listing.
pub(crate) async fn check_list_views(
    session: &Session,
    backend: &dyn Backend,
    listing: Listing,
) -> Result<()> {
    let rec = session.recorder();
    let label = listing.label();
    let private = listing == Listing::Admin;

    let full = listing.list(backend, &ListQuery::new().view(View::Full)).await?;
    rec.status(&format!("{} view=VIEW_FULL", label), &full, Expect::Ok);
    let first = full.body().and_then(|page| page.pipelines.first());
    rec.table(
        &format!("{} view=VIEW_FULL", label),
        &[
            ("pipelines[0] has recipe", first.map_or(false, |p| p.recipe.is_some())),
            (
                "pipelines[0] recipe is valid",
                first.map_or(false, |p| validate_recipe(p.recipe.as_ref(), private)),
            ),
        ],
    );

    let basic = listing.list(backend, &ListQuery::new().view(View::Basic)).await?;
    rec.status(&format!("{} view=VIEW_BASIC", label), &basic, Expect::Ok);
    rec.check(
        format!("{} view=VIEW_BASIC pipelines[0].recipe is null", label),
        basic
            .body()
            .and_then(|page| page.pipelines.first())
            .map_or(false, |p| p.recipe.is_none()),
    );

    let default = listing.list(backend, &ListQuery::new()).await?;
    for size in [0, -1] {
        let subject = format!("{} pageSize={}", label, size);
        let reply = listing.list(backend, &ListQuery::new().page_size(size)).await?;
        rec.status(&subject, &reply, Expect::Ok);
        rec.check(
            format!("{} returns the default page", subject),
            reply
                .body()
                .zip(default.body())
                .map_or(false, |(page, default)| {
                    same_first_page(page, default, |p| p.uid.clone())
                }),
        );
    }

    let small = listing.list(backend, &ListQuery::new().page_size(3)).await?;
    rec.check(format!("{} pageSize=3 returns 3", label), page_len(&small) == Some(3));
    let total = small.body().map_or(0, |page| page.total_size);
    let capped = listing.list(backend, &ListQuery::new().page_size(101)).await?;
    rec.check(
        format!("{} pageSize=101 is capped", label),
        page_len(&capped) == Some(total.min(MAX_PAGE_SIZE) as usize),
    );

    let walked = traverse(&ListQuery::new(), 3, |q| async move {
        listing.list(backend, &q).await
    })
    .await?;
    check_traversal(rec, label, &walked, |p| p.uid.clone());
    Ok(())
}

pub async fn check_get(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let body = fixtures::new_pipeline_body();
    let created = create_pipeline(rec, &*backend, &body).await?;

    let got = backend.get_pipeline(&created.id, View::Unspecified).await?;
    rec.status("get pipeline", &got, Expect::Ok);
    let pipeline = got.body();
    rec.table(
        "get pipeline",
        &[
            ("name", pipeline.map_or(false, |p| p.name.contains("/pipelines/"))),
            ("id", pipeline.map_or(false, |p| p.id == created.id)),
            (
                "description",
                pipeline.map_or(false, |p| p.description == body["description"]),
            ),
            ("recipe is null", pipeline.map_or(false, |p| p.recipe.is_none())),
        ],
    );

    let full = backend.get_pipeline(&created.id, View::Full).await?;
    rec.status("get pipeline view=VIEW_FULL", &full, Expect::Ok);
    let pipeline = full.body();
    rec.table(
        "get pipeline view=VIEW_FULL",
        &[
            ("recipe is not null", pipeline.map_or(false, |p| p.recipe.is_some())),
            (
                "owner is valid",
                pipeline.map_or(false, |p| {
                    is_valid_owner(p.owner.as_ref(), session.expected_owner_id())
                }),
            ),
            ("creatorName is valid", pipeline.map_or(false, has_creator)),
        ],
    );

    let missing = backend.get_pipeline(MISSING_ID, View::Unspecified).await?;
    rec.status("get missing pipeline", &missing, Expect::NotFound);

    delete_pipeline(rec, &*backend, &created.id).await
}

/// Masked updates; `id` and `name` in the body are output only and ignored.
pub async fn check_update(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;
    let id = created.id.as_str();

    let mut body = json!({
        "name": "pipelines/some-string-to-be-ignored",
        "description": random_string(50),
    });
    let updated = backend.update_pipeline(id, &body, &["description"]).await?;
    rec.status("update pipeline", &updated, Expect::Ok);
    let pipeline = updated.body();
    rec.table(
        "updated pipeline",
        &[
            (
                "name is output only",
                pipeline.map_or(false, |p| p.name.ends_with(&format!("/pipelines/{}", id))),
            ),
            ("id is immutable", pipeline.map_or(false, |p| p.id == id)),
            ("state is output only", pipeline.map_or(false, |p| p.state == created.state)),
            (
                "description",
                pipeline.map_or(false, |p| p.description == body["description"]),
            ),
            (
                "owner is valid",
                pipeline.map_or(false, |p| {
                    is_valid_owner(p.owner.as_ref(), session.expected_owner_id())
                }),
            ),
            ("createTime", pipeline.map_or(false, |p| after_epoch(p.create_time))),
            ("updateTime", pipeline.map_or(false, |p| after_epoch(p.update_time))),
            (
                "updateTime > createTime",
                pipeline.map_or(false, |p| p.update_time > p.create_time),
            ),
        ],
    );

    for description in [String::new(), random_string(10)] {
        body["description"] = Value::String(description.clone());
        let reply = backend.update_pipeline(id, &body, &["description"]).await?;
        rec.check(
            format!("update pipeline description to {:?}", description),
            reply.body().map_or(false, |p| p.description == description),
        );
    }

    body["id"] = json!(format!(
        "{}{}",
        session.settings.fixtures.db_id_prefix,
        random_string(10)
    ));
    let different = backend.update_pipeline(id, &body, &["description"]).await?;
    rec.status("update pipeline with a different id in the body", &different, Expect::Ok);
    body["id"] = json!(id);
    let same = backend.update_pipeline(id, &body, &["description"]).await?;
    rec.status("update pipeline with the same id in the body", &same, Expect::Ok);

    let missing = backend.update_pipeline(MISSING_ID, &body, &["description"]).await?;
    rec.status("update missing pipeline", &missing, Expect::NotFound);

    delete_pipeline(rec, &*backend, id).await
}

pub async fn check_rename(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let new_id = format!("{}{}", session.settings.fixtures.db_id_prefix, random_string(10));
    let renamed = backend.rename_pipeline(&created.id, &new_id).await?;
    rec.status("rename pipeline", &renamed, Expect::Ok);
    let pipeline = renamed.body();
    rec.table(
        "renamed pipeline",
        &[
            (
                "new name",
                pipeline.map_or(false, |p| p.name.ends_with(&format!("/pipelines/{}", new_id))),
            ),
            ("new id", pipeline.map_or(false, |p| p.id == new_id)),
        ],
    );

    if renamed.is(Expect::Ok) {
        delete_pipeline(rec, &*backend, &new_id).await
    } else {
        delete_pipeline(rec, &*backend, &created.id).await
    }
}

pub async fn check_lookup(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let found = backend.lookup_pipeline(&created.uid, View::Unspecified).await?;
    rec.status("look up pipeline", &found, Expect::Ok);
    let pipeline = found.body();
    rec.table(
        "looked up pipeline",
        &[
            ("uid is a UUID", is_uuid(&created.uid)),
            ("name", pipeline.map_or(false, |p| p.name == created.name)),
            ("id", pipeline.map_or(false, |p| p.id == created.id)),
        ],
    );

    delete_pipeline(rec, &*backend, &created.id).await
}
