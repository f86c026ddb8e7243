/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Connector lifecycle under the session's own identity.

use std::time::Duration;

use serde_json::json;
use vdp_client::{Backend, Expect, ListQuery, Reply};
use vdp_models::{ConnectorPage, ConnectorState, Paginated, View};

use super::{
    check_state, connect, create_connector, data_connectors, delete_connector, disconnect,
    MAX_PAGE_SIZE,
};
use crate::assertions::{is_uuid, is_valid_owner};
use crate::error::Result;
use crate::fixtures::{self, random_string, CSV_DESTINATION_DEFINITION};
use crate::pagination::{check_traversal, same_first_page, traverse};
use crate::session::Session;

/// Connectors created by the list group.
const LIST_COUNT: i64 = 10;

pub async fn check_create(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let body = fixtures::new_connector_body();
    let created = create_connector(rec, &*backend, &body).await?;
    rec.table(
        "created connector",
        &[
            (
                "echoes connector_definition_name",
                created.connector_definition_name == CSV_DESTINATION_DEFINITION,
            ),
            ("uid is a UUID", is_uuid(&created.uid)),
            ("echoes description", created.description == body["description"]),
            (
                "owner is valid",
                is_valid_owner(created.owner.as_ref(), session.expected_owner_id()),
            ),
        ],
    );

    let duplicate = backend.create_connector(&body).await?;
    rec.status("create connector with a taken id", &duplicate, Expect::AlreadyExists);

    connect(rec, &*backend, &created.id, Expect::Ok).await?;
    check_state(session, &*backend, &created.id, ConnectorState::Connected).await?;

    let got = backend.get_connector(&created.id, View::Unspecified).await?;
    rec.status("get connector", &got, Expect::Ok);
    rec.check(
        "get connector state is STATE_CONNECTED",
        got.body().map_or(false, |c| c.state == ConnectorState::Connected),
    );

    delete_connector(rec, &*backend, &created.id).await
}

/// Which listing a list group drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Listing {
    /// The namespace listing, with the session credentials
    Namespace,
    /// The private admin listing, without credentials
    Admin,
}

impl Listing {
    fn label(&self) -> &'static str {
        match self {
            Listing::Namespace => "list connectors",
            Listing::Admin => "list connectors by admin",
        }
    }

    async fn list(
        &self,
        backend: &dyn Backend,
        query: &ListQuery,
    ) -> vdp_client::Result<Reply<ConnectorPage>> {
        match self {
            Listing::Namespace => backend.list_connectors(query).await,
            Listing::Admin => backend.list_connectors_admin(query).await,
        }
    }
}

pub async fn check_list(session: &Session) -> Result<()> {
    check_listing(session, Listing::Namespace).await
}

/// Pagination and view elision of a connector listing.
///
/// The namespace may hold connectors from other runs, so counts are taken
/// relative to a baseline.
pub(crate) async fn check_listing(session: &Session, listing: Listing) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let label = listing.label();

    let baseline = listing.list(&*backend, &data_connectors()).await?;
    rec.status(&format!("{} before create", label), &baseline, Expect::Ok);
    let baseline = baseline.require(Expect::Ok)?.total_size;

    let mut ids = Vec::new();
    for _ in 0..LIST_COUNT {
        let reply = backend.create_connector(&fixtures::new_connector_body()).await?;
        if rec.status("create connector for listing", &reply, Expect::Created) {
            if let Some(connector) = reply.body() {
                ids.push(connector.id.clone());
            }
        }
    }

    let default = listing.list(&*backend, &data_connectors()).await?;
    rec.status(label, &default, Expect::Ok);
    let default = default.require(Expect::Ok)?;
    rec.check(
        format!("{} total_size is {}", label, baseline + LIST_COUNT),
        default.total_size == baseline + LIST_COUNT,
    );

    for size in [0, -1] {
        let subject = format!("{} page_size={}", label, size);
        let reply = listing
            .list(&*backend, &data_connectors().page_size(size))
            .await?;
        rec.status(&subject, &reply, Expect::Ok);
        rec.check(
            format!("{} returns the default page", subject),
            reply
                .body()
                .map_or(false, |page| same_first_page(page, &default, |c| c.uid.clone())),
        );
    }

    let one = listing
        .list(&*backend, &data_connectors().page_size(1))
        .await?;
    rec.status(&format!("{} page_size=1", label), &one, Expect::Ok);
    let one = one.require(Expect::Ok)?;
    rec.check(
        format!("{} page_size=1 returns 1 record", label),
        one.connectors.len() == 1,
    );

    let next = listing
        .list(
            &*backend,
            &data_connectors()
                .page_size(1)
                .page_token(one.next_page_token.clone()),
        )
        .await?;
    rec.status(&format!("{} with page_token", label), &next, Expect::Ok);
    rec.table(
        &format!("{} with page_token", label),
        &[
            (
                "returns 1 record",
                next.body().map_or(false, |p| p.connectors.len() == 1),
            ),
            (
                "returns a different record",
                next.body().and_then(|p| p.connectors.first()).map(|c| &c.uid)
                    != one.connectors.first().map(|c| &c.uid),
            ),
        ],
    );

    for view in [View::Basic, View::Unspecified] {
        let subject = format!("{} view={}", label, view);
        let page = listing
            .list(&*backend, &data_connectors().page_size(1).view(view))
            .await?;
        rec.status(&subject, &page, Expect::Ok);
        let first = page.body().and_then(|p| p.connectors.first());
        rec.table(
            &subject,
            &[
                (
                    "configuration is null",
                    first.map_or(false, |c| c.configuration.is_none()),
                ),
                ("owner is absent", first.map_or(false, |c| c.owner.is_none())),
            ],
        );
    }

    let subject = format!("{} view={}", label, View::Full);
    let full = listing
        .list(&*backend, &data_connectors().page_size(1).view(View::Full))
        .await?;
    rec.status(&subject, &full, Expect::Ok);
    let first = full.body().and_then(|p| p.connectors.first());
    rec.table(
        &subject,
        &[
            (
                "configuration is not null",
                first.map_or(false, |c| c.configuration.is_some()),
            ),
            (
                "connector_definition_detail is not null",
                first.map_or(false, |c| c.connector_definition_detail.is_some()),
            ),
            (
                "owner is valid",
                first.map_or(false, |c| {
                    is_valid_owner(c.owner.as_ref(), session.expected_owner_id())
                }),
            ),
        ],
    );

    let all = listing
        .list(
            &*backend,
            &data_connectors().page_size(default.total_size() as i32 + 1),
        )
        .await?;
    let subject = format!("{} page_size>total_size", label);
    rec.status(&subject, &all, Expect::Ok);
    rec.table(
        &subject,
        &[
            (
                "returns every connector",
                all.body().map_or(false, |p| {
                    p.connectors.len() as i64 == default.total_size.min(MAX_PAGE_SIZE)
                }),
            ),
            (
                "has an empty next_page_token",
                all.body().map_or(false, |p| p.next_page_token.is_empty()),
            ),
        ],
    );

    let query = data_connectors();
    let walked = traverse(&query, 3, |q| {
        let backend = &*backend;
        async move { listing.list(backend, &q).await }
    })
    .await?;
    check_traversal(rec, label, &walked, |c| c.uid.clone());

    for id in ids {
        delete_connector(rec, &*backend, &id).await?;
    }
    Ok(())
}

pub async fn check_get(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;
    connect(rec, &*backend, &created.id, Expect::Ok).await?;

    let got = backend.get_connector(&created.id, View::Unspecified).await?;
    rec.status("get connector", &got, Expect::Ok);
    let connector = got.body();
    rec.table(
        "get connector",
        &[
            ("id", connector.map_or(false, |c| c.id == created.id)),
            (
                "connector_definition_name",
                connector.map_or(false, |c| {
                    c.connector_definition_name == CSV_DESTINATION_DEFINITION
                }),
            ),
            ("owner is absent", connector.map_or(false, |c| c.owner.is_none())),
        ],
    );
    check_state(session, &*backend, &created.id, ConnectorState::Connected).await?;

    let full = backend.get_connector(&created.id, View::Full).await?;
    rec.status("get connector view=VIEW_FULL", &full, Expect::Ok);
    rec.table(
        "get connector view=VIEW_FULL",
        &[
            (
                "configuration is not null",
                full.body().map_or(false, |c| c.configuration.is_some()),
            ),
            (
                "owner is valid",
                full.body().map_or(false, |c| {
                    is_valid_owner(c.owner.as_ref(), session.expected_owner_id())
                }),
            ),
        ],
    );

    let missing = backend.get_connector(super::MISSING_ID, View::Unspecified).await?;
    rec.status("get missing connector", &missing, Expect::NotFound);

    delete_connector(rec, &*backend, &created.id).await
}

/// Field mask updates, including clearing a field and ignored output-only fields.
pub async fn check_update(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;

    let description = random_string(50);
    let body = json!({
        "id": created.id,
        "connector_definition_name": created.connector_definition_name,
        "tombstone": true,
        "description": description,
        "configuration": {"destination_path": "/tmp"}
    });
    let updated = backend
        .update_connector(&created.id, &body, &["description", "configuration"])
        .await?;
    rec.status("update connector", &updated, Expect::Ok);
    let connector = updated.body();
    rec.table(
        "updated connector",
        &[
            ("id", connector.map_or(false, |c| c.id == created.id)),
            (
                "connector_definition_name",
                connector.map_or(false, |c| {
                    c.connector_definition_name == CSV_DESTINATION_DEFINITION
                }),
            ),
            ("description", connector.map_or(false, |c| c.description == description)),
            ("tombstone is ignored", connector.map_or(false, |c| !c.tombstone)),
            (
                "configuration",
                connector.map_or(false, |c| {
                    c.configuration
                        .as_ref()
                        .and_then(|conf| conf.get("destination_path"))
                        == Some(&json!("/tmp"))
                }),
            ),
            (
                "owner is valid",
                connector.map_or(false, |c| {
                    is_valid_owner(c.owner.as_ref(), session.expected_owner_id())
                }),
            ),
        ],
    );

    let cleared = backend
        .update_connector(&created.id, &json!({"description": ""}), &["description"])
        .await?;
    rec.status("update connector with empty description", &cleared, Expect::Ok);
    rec.check(
        "updated connector description is empty",
        cleared.body().map_or(false, |c| c.description.is_empty()),
    );
    let fetched = backend.get_connector(&created.id, View::Unspecified).await?;
    rec.check(
        "fetched connector description is empty",
        fetched.body().map_or(false, |c| c.description.is_empty()),
    );

    let renamed_body = json!({
        "name": format!("{}/connectors/{}", session.namespace(), random_string(5)),
        "description": random_string(50),
    });
    let ignored = backend
        .update_connector(&created.id, &renamed_body, &["description"])
        .await?;
    rec.status("update connector with an output-only name", &ignored, Expect::Ok);
    rec.check(
        "update connector keeps the name",
        ignored.body().map_or(false, |c| c.id == created.id),
    );

    delete_connector(rec, &*backend, &created.id).await
}

pub async fn check_lookup(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;

    let found = backend.lookup_connector(&created.uid, View::Unspecified).await?;
    rec.status("look up connector", &found, Expect::Ok);
    let connector = found.body();
    rec.table(
        "looked up connector",
        &[
            ("uid", connector.map_or(false, |c| c.uid == created.uid)),
            (
                "connector_definition_name",
                connector.map_or(false, |c| {
                    c.connector_definition_name == CSV_DESTINATION_DEFINITION
                }),
            ),
            ("owner is absent", connector.map_or(false, |c| c.owner.is_none())),
        ],
    );

    delete_connector(rec, &*backend, &created.id).await
}

/// Connect on an incomplete configuration fails; on a complete one it succeeds.
pub async fn check_connect(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;

    let cases = [
        (
            json!({"destination": "airbyte-destination-csv"}),
            Expect::InvalidArgument,
        ),
        (fixtures::csv_destination_config(), Expect::Ok),
    ];
    for (configuration, expect) in cases {
        let id = random_string(10);
        let created = create_connector(
            rec,
            &*backend,
            &fixtures::connector_body(id.clone(), configuration),
        )
        .await?;
        rec.table(
            "created connector",
            &[
                (
                    "name",
                    created.name == format!("{}/connectors/{}", session.namespace(), id),
                ),
                ("uid is a UUID", is_uuid(&created.uid)),
                (
                    "connector_definition_name",
                    created.connector_definition_name == CSV_DESTINATION_DEFINITION,
                ),
                (
                    "owner is valid",
                    is_valid_owner(created.owner.as_ref(), session.expected_owner_id()),
                ),
            ],
        );

        connect(rec, &*backend, &created.id, expect).await?;
        disconnect(rec, &*backend, &created.id).await?;
        delete_connector(rec, &*backend, &created.id).await?;
    }
    Ok(())
}

/// Connect and Disconnect are idempotent.
pub async fn check_state_transitions(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;
    let id = created.id.as_str();

    connect(rec, &*backend, id, Expect::Ok).await?;
    check_state(session, &*backend, id, ConnectorState::Connected).await?;
    connect(rec, &*backend, id, Expect::Ok).await?;

    disconnect(rec, &*backend, id).await?;
    check_state(session, &*backend, id, ConnectorState::Disconnected).await?;
    disconnect(rec, &*backend, id).await?;

    connect(rec, &*backend, id, Expect::Ok).await?;
    check_state(session, &*backend, id, ConnectorState::Connected).await?;

    delete_connector(rec, &*backend, id).await
}

pub async fn check_rename(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;

    let new_id = format!("some_id_not_{}", created.id);
    let renamed = backend.rename_connector(&created.id, &new_id).await?;
    rec.status("rename connector", &renamed, Expect::Ok);
    rec.check(
        format!("renamed connector id is {}", new_id),
        renamed.body().map_or(false, |c| c.id == new_id),
    );

    if renamed.is(Expect::Ok) {
        delete_connector(rec, &*backend, &new_id).await
    } else {
        delete_connector(rec, &*backend, &created.id).await
    }
}

/// Writes every kind of task output to a connected destination.
///
/// Execute is a fire-and-forget write, so each call is followed by a pause
/// before the next one.
pub async fn check_execute(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;
    connect(rec, &*backend, &created.id, Expect::Ok).await?;
    check_state(session, &*backend, &created.id, ConnectorState::Connected).await?;

    let settle = Duration::from_millis(session.settings.client.execute_settle_ms);
    for (task, inputs) in fixtures::model_outputs() {
        let reply = backend.execute_connector(&created.id, &inputs).await?;
        rec.status(&format!("execute connector with {} outputs", task), &reply, Expect::Ok);
        tokio::time::sleep(settle).await;
    }

    delete_connector(rec, &*backend, &created.id).await
}

pub async fn check_test(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;
    connect(rec, &*backend, &created.id, Expect::Ok).await?;

    let tested = backend.test_connector(&created.id).await?;
    rec.status("test connector", &tested, Expect::Ok);
    rec.check(
        "test connector state is STATE_CONNECTED",
        tested
            .body()
            .map_or(false, |s| s.state == ConnectorState::Connected),
    );

    delete_connector(rec, &*backend, &created.id).await
}
