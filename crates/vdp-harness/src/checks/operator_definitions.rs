/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Operator definition catalog, read only and token paginated.

use vdp_client::{Expect, ListQuery, Reply};
use vdp_models::{OperatorDefinitionPage, Paginated, View};

use crate::assertions::deep_equal;
use crate::error::{HarnessError, Result};
use crate::pagination::{check_traversal, same_first_page, traverse};
use crate::session::Session;

const SUBJECT: &str = "list operator definitions";

fn first_has_spec(reply: &Reply<OperatorDefinitionPage>) -> Option<bool> {
    reply
        .body()
        .and_then(|page| page.operator_definitions.first())
        .map(|d| d.spec.is_some())
}

pub async fn check_list(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let listed = backend.list_operator_definitions(&ListQuery::new()).await?;
    rec.status(SUBJECT, &listed, Expect::Ok);
    let default = listed.require(Expect::Ok)?;
    rec.check(format!("{} totalSize > 0", SUBJECT), default.total_size > 0);

    for size in [0, -1] {
        let reply = backend
            .list_operator_definitions(&ListQuery::new().page_size(size))
            .await?;
        rec.status(&format!("{} pageSize={}", SUBJECT, size), &reply, Expect::Ok);
        rec.check(
            format!("{} pageSize={} returns the default page", SUBJECT, size),
            reply
                .body()
                .map_or(false, |page| same_first_page(page, &default, |d| d.uid.clone())),
        );
    }

    let one = backend
        .list_operator_definitions(&ListQuery::new().page_size(1))
        .await?;
    rec.status(&format!("{} pageSize=1", SUBJECT), &one, Expect::Ok);
    let one = one.require(Expect::Ok)?;
    rec.check(format!("{} pageSize=1 returns 1", SUBJECT), one.items().len() == 1);

    let next = backend
        .list_operator_definitions(
            &ListQuery::new()
                .page_size(1)
                .page_token(one.next_page_token.as_str()),
        )
        .await?;
    rec.status(&format!("{} next page", SUBJECT), &next, Expect::Ok);
    rec.check(
        format!("{} next page returns 1", SUBJECT),
        next.body().map_or(false, |p| p.items().len() == 1),
    );

    for (view, has_spec) in [(View::Basic, false), (View::Full, true), (View::Unspecified, false)] {
        let reply = backend
            .list_operator_definitions(&ListQuery::new().page_size(1).view(view))
            .await?;
        rec.status(&format!("{} view={}", SUBJECT, view), &reply, Expect::Ok);
        rec.check(
            format!("{} view={} spec present is {}", SUBJECT, view, has_spec),
            first_has_spec(&reply) == Some(has_spec),
        );
    }

    let whole = backend
        .list_operator_definitions(&ListQuery::new().page_size(default.total_size as i32 + 1))
        .await?;
    rec.status(&format!("{} pageSize>totalSize", SUBJECT), &whole, Expect::Ok);
    rec.check(
        format!("{} pageSize>totalSize nextPageToken is empty", SUBJECT),
        whole.body().map_or(false, |p| p.next_page_token.is_empty()),
    );

    let walked = traverse(&ListQuery::new(), 2, |q| {
        let backend = &*backend;
        async move { backend.list_operator_definitions(&q).await }
    })
    .await?;
    check_traversal(rec, SUBJECT, &walked, |d| d.uid.clone());
    Ok(())
}

/// A Get returns exactly the record the List returned, with `spec` only
/// under the full view.
pub async fn check_get(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let def = backend
        .list_operator_definitions(&ListQuery::new())
        .await?
        .require(Expect::Ok)?
        .operator_definitions
        .into_iter()
        .next()
        .ok_or_else(|| HarnessError::precondition("no operator definitions listed"))?;
    let subject = format!("get operator definition {}", def.id);

    let got = backend.get_operator_definition(&def.id, View::Unspecified).await?;
    rec.status(&subject, &got, Expect::Ok);
    let listed = serde_json::to_value(&def).unwrap_or_default();
    rec.table(
        &subject,
        &[
            (
                "has the exact record",
                got.body()
                    .and_then(|d| serde_json::to_value(d).ok())
                    .map_or(false, |fetched| deep_equal(&fetched, &listed)),
            ),
            ("has the listed name", got.body().map_or(false, |d| d.name == def.name)),
        ],
    );

    for (view, has_spec) in [(View::Basic, false), (View::Full, true)] {
        let reply = backend.get_operator_definition(&def.id, view).await?;
        rec.status(&format!("{} view={}", subject, view), &reply, Expect::Ok);
        rec.check(
            format!("{} view={} spec present is {}", subject, view, has_spec),
            reply.body().map_or(false, |d| d.spec.is_some() == has_spec),
        );
    }

    let missing = backend
        .get_operator_definition(super::MISSING_ID, View::Unspecified)
        .await?;
    rec.status("get missing operator definition", &missing, Expect::NotFound);
    Ok(())
}
