/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Component definition catalog.
//!
//! This listing is offset paginated: `page` selects a zero based page of
//! `pageSize` records and the reply echoes both.

use vdp_client::{Expect, ListQuery, Reply};
use vdp_models::{ComponentDefinitionPage, View};

use crate::error::Result;
use crate::session::Session;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Definition the catalog lists first.
pub const FEATURED_ID: &str = "instill-model";

fn len(reply: &Reply<ComponentDefinitionPage>) -> Option<usize> {
    reply.body().map(|page| page.component_definitions.len())
}

pub async fn check_list(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let listed = backend.list_component_definitions(&ListQuery::new()).await?;
    rec.status("list component definitions", &listed, Expect::Ok);
    let default = listed.require(Expect::Ok)?;
    rec.table(
        "list component definitions",
        &[
            ("totalSize > 0", default.total_size > 0),
            ("page 0", default.page == 0),
            (
                "default page size",
                default.component_definitions.len() == DEFAULT_PAGE_SIZE,
            ),
            ("pageSize echoed", default.page_size == DEFAULT_PAGE_SIZE as i64),
            ("featured definition on top", default.first_id() == Some(FEATURED_ID)),
        ],
    );
    let total = default.total_size;
    let big = (total + 10) as i32;

    for size in [0, -1] {
        let reply = backend
            .list_component_definitions(&ListQuery::new().page_size(size))
            .await?;
        rec.status(&format!("list component definitions pageSize={}", size), &reply, Expect::Ok);
        rec.check(
            format!("list component definitions pageSize={} falls back to the default", size),
            len(&reply) == Some(default.component_definitions.len()),
        );
    }

    let one = backend
        .list_component_definitions(&ListQuery::new().page_size(1))
        .await?;
    rec.check("list component definitions pageSize=1 returns 1", len(&one) == Some(1));

    let all = backend
        .list_component_definitions(&ListQuery::new().page_size(big))
        .await?;
    rec.check(
        "list component definitions beyond the total returns every record",
        len(&all) == Some(total as usize),
    );

    let second = backend
        .list_component_definitions(&ListQuery::new().page_size(2).page(2))
        .await?;
    rec.status("list component definitions pageSize=2 page=2", &second, Expect::Ok);
    let page = second.body();
    rec.table(
        "list component definitions pageSize=2 page=2",
        &[
            ("returns 2", len(&second) == Some(2)),
            ("reports page 2", page.map_or(false, |p| p.page == 2)),
            (
                "receives a different page",
                page.map_or(false, |p| p.first_id() != default.first_id()),
            ),
        ],
    );

    let negative = backend
        .list_component_definitions(&ListQuery::new().page_size(2).page(-2))
        .await?;
    rec.status("list component definitions pageSize=2 page=-2", &negative, Expect::Ok);
    rec.table(
        "list component definitions pageSize=2 page=-2",
        &[
            ("returns 2", len(&negative) == Some(2)),
            ("reports page 0", negative.body().map_or(false, |p| p.page == 0)),
        ],
    );

    let beyond = backend
        .list_component_definitions(&ListQuery::new().page_size(big).page(2))
        .await?;
    rec.status("list component definitions past the last page", &beyond, Expect::Ok);
    rec.check(
        "list component definitions past the last page is empty",
        len(&beyond) == Some(0),
    );

    Ok(())
}

/// `spec` is only rendered in the full view.
pub async fn check_views(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let cases = [
        (View::Unspecified, false),
        (View::Basic, false),
        (View::Full, true),
    ];
    for (view, has_spec) in cases {
        let reply = backend
            .list_component_definitions(&ListQuery::new().page_size(1).view(view))
            .await?;
        rec.status(&format!("list component definitions view={}", view), &reply, Expect::Ok);
        rec.check(
            format!("list component definitions view={} spec present is {}", view, has_spec),
            reply
                .body()
                .and_then(|page| page.component_definitions.first())
                .map_or(false, |d| d.spec.is_some() == has_spec),
        );
    }
    Ok(())
}

pub async fn check_filters(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let total = backend
        .list_component_definitions(&ListQuery::new())
        .await?
        .require(Expect::Ok)?
        .total_size;

    for needle in ["JSO", "jso"] {
        let filter = format!("qTitle=\"{}\"", needle);
        let reply = backend
            .list_component_definitions(&ListQuery::new().page_size(1).filter(filter.as_str()))
            .await?;
        rec.status(&format!("list component definitions {}", filter), &reply, Expect::Ok);
        let page = reply.body();
        rec.table(
            &format!("list component definitions {}", filter),
            &[
                ("single result", page.map_or(false, |p| p.total_size == 1)),
                (
                    "title is JSON",
                    page.and_then(|p| p.component_definitions.first())
                        .map_or(false, |d| d.title == "JSON"),
                ),
            ],
        );
    }

    let operators = backend
        .list_component_definitions(
            &ListQuery::new()
                .page_size(1)
                .filter("componentType=COMPONENT_TYPE_OPERATOR"),
        )
        .await?;
    rec.status("list component definitions of type operator", &operators, Expect::Ok);
    let page = operators.body();
    rec.table(
        "list component definitions of type operator",
        &[
            ("total size is smaller", page.map_or(false, |p| p.total_size < total)),
            (
                "type is COMPONENT_TYPE_OPERATOR",
                page.and_then(|p| p.component_definitions.first())
                    .map_or(false, |d| d.component_type == "COMPONENT_TYPE_OPERATOR"),
            ),
        ],
    );

    let alpha = backend
        .list_component_definitions(
            &ListQuery::new()
                .page_size(1)
                .filter("releaseStage=RELEASE_STAGE_ALPHA"),
        )
        .await?;
    rec.status("list component definitions in alpha", &alpha, Expect::Ok);
    let page = alpha.body();
    rec.table(
        "list component definitions in alpha",
        &[
            ("number of results", page.map_or(false, |p| p.total_size == total)),
            (
                "releaseStage is alpha",
                page.and_then(|p| p.component_definitions.first())
                    .map_or(false, |d| d.release_stage == "RELEASE_STAGE_ALPHA"),
            ),
        ],
    );
    Ok(())
}
