/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Admin connector calls against the private service. Direct mode only.

use vdp_client::Expect;
use vdp_models::View;

use super::connectors::{check_listing, Listing};
use super::{create_connector, delete_connector};
use crate::error::Result;
use crate::fixtures::{self, CSV_DESTINATION_DEFINITION};
use crate::session::Session;

pub async fn check_list(session: &Session) -> Result<()> {
    check_listing(session, Listing::Admin).await
}

pub async fn check_lookup(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let created = create_connector(rec, &*backend, &fixtures::new_connector_body()).await?;

    let found = backend
        .lookup_connector_admin(&created.uid, View::Unspecified)
        .await?;
    rec.status("look up connector by admin", &found, Expect::Ok);
    let connector = found.body();
    rec.table(
        "connector looked up by admin",
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
