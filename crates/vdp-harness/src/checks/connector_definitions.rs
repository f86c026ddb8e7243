/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Connector definition catalog, read only.

use vdp_client::{Expect, ListQuery};
use vdp_models::View;

use super::MAX_PAGE_SIZE;
use crate::assertions::deep_equal;
use crate::error::{HarnessError, Result};
use crate::pagination::{check_traversal, same_first_page, traverse};
use crate::session::Session;

pub async fn check_list(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let listed = backend.list_connector_definitions(&ListQuery::new()).await?;
    rec.status("list connector definitions", &listed, Expect::Ok);
    let default = listed.require(Expect::Ok)?;
    rec.check("list connector definitions total_size > 0", default.total_size > 0);

    for size in [0, -1] {
        let subject = format!("list connector definitions page_size={}", size);
        let reply = backend
            .list_connector_definitions(&ListQuery::new().page_size(size))
            .await?;
        rec.status(&subject, &reply, Expect::Ok);
        rec.check(
            format!("{} returns the default page", subject),
            reply
                .body()
                .map_or(false, |page| same_first_page(page, &default, |d| d.uid.clone())),
        );
    }

    let one = backend
        .list_connector_definitions(&ListQuery::new().page_size(1))
        .await?;
    rec.status("list connector definitions page_size=1", &one, Expect::Ok);
    let one = one.require(Expect::Ok)?;
    rec.check(
        "list connector definitions page_size=1 returns 1",
        one.connector_definitions.len() == 1,
    );

    let next = backend
        .list_connector_definitions(
            &ListQuery::new()
                .page_size(1)
                .page_token(one.next_page_token.as_str()),
        )
        .await?;
    rec.status("list connector definitions next page", &next, Expect::Ok);
    rec.table(
        "list connector definitions next page",
        &[
            (
                "returns 1",
                next.body().map_or(false, |p| p.connector_definitions.len() == 1),
            ),
            (
                "is disjoint from the first page",
                next.body()
                    .and_then(|p| p.connector_definitions.first())
                    .zip(one.connector_definitions.first())
                    .map_or(false, |(a, b)| a.uid != b.uid),
            ),
        ],
    );

    for (view, has_spec) in [(View::Basic, false), (View::Full, true), (View::Unspecified, false)] {
        let reply = backend
            .list_connector_definitions(&ListQuery::new().page_size(1).view(view))
            .await?;
        rec.status(&format!("list connector definitions view={}", view), &reply, Expect::Ok);
        rec.check(
            format!("list connector definitions view={} spec present is {}", view, has_spec),
            reply
                .body()
                .and_then(|p| p.connector_definitions.first())
                .map_or(false, |d| d.spec.is_some() == has_spec),
        );
    }

    let whole = backend
        .list_connector_definitions(&ListQuery::new().page_size(default.total_size as i32 + 1))
        .await?;
    rec.status("list connector definitions page_size>total_size", &whole, Expect::Ok);
    rec.table(
        "list connector definitions page_size>total_size",
        &[
            (
                "returns every definition",
                whole.body().map_or(false, |p| {
                    p.connector_definitions.len() as i64
                        == default.total_size.min(MAX_PAGE_SIZE)
                }),
            ),
            (
                "next_page_token is empty",
                whole.body().map_or(false, |p| p.next_page_token.is_empty()),
            ),
        ],
    );

    let walked = traverse(&ListQuery::new(), 3, |q| {
        let backend = &*backend;
        async move { backend.list_connector_definitions(&q).await }
    })
    .await?;
    check_traversal(rec, "list connector definitions", &walked, |d| d.uid.clone());

    Ok(())
}

/// A Get returns exactly the record the List returned.
pub async fn check_get(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let def = backend
        .list_connector_definitions(&ListQuery::new())
        .await?
        .require(Expect::Ok)?
        .connector_definitions
        .into_iter()
        .next()
        .ok_or_else(|| HarnessError::precondition("no connector definitions listed"))?;

    let got = backend
        .get_connector_definition(&def.id, View::Unspecified)
        .await?;
    rec.status(&format!("get connector definition {}", def.id), &got, Expect::Ok);
    let listed = serde_json::to_value(&def).unwrap_or_default();
    rec.table(
        &format!("get connector definition {}", def.id),
        &[
            (
                "has the exact record",
                got.body()
                    .and_then(|d| serde_json::to_value(d).ok())
                    .map_or(false, |fetched| deep_equal(&fetched, &listed)),
            ),
            ("has a non-empty name", got.body().map_or(false, |d| !d.name.is_empty())),
            ("has the listed name", got.body().map_or(false, |d| d.name == def.name)),
        ],
    );

    for (view, has_spec) in [(View::Basic, false), (View::Full, true), (View::Unspecified, false)] {
        let reply = backend.get_connector_definition(&def.id, view).await?;
        rec.status(&format!("get connector definition view={}", view), &reply, Expect::Ok);
        rec.check(
            format!("get connector definition view={} spec present is {}", view, has_spec),
            reply.body().map_or(false, |d| d.spec.is_some() == has_spec),
        );
    }
    Ok(())
}
