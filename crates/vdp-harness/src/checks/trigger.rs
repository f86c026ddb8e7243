/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Triggers of the echo recipe.
//!
//! The recipe copies its `input` variable to the `answer` output, so every
//! output must carry back the input it was triggered with, in order. Async
//! triggers return a long-running operation that is polled until done.

use std::time::Duration;

use log::{debug, info};
use serde_json::{json, Value};
use vdp_client::{Backend, Expect, Reply};
use vdp_models::{Operation, OPERATION_PREFIX};

use super::{create_pipeline, delete_pipeline};
use crate::error::Result;
use crate::fixtures::{self, random_string, SampleImages};
use crate::session::Session;

/// Triggers the pipeline with one input per value and records that each
/// output echoes its input.
async fn trigger_echo(
    session: &Session,
    backend: &dyn Backend,
    pipeline_id: &str,
    subject: &str,
    values: &[String],
) -> Result<()> {
    let rec = session.recorder();
    let reply = backend.trigger_pipeline(pipeline_id, &echo_inputs(values)).await?;
    rec.status(&format!("trigger pipeline with {}", subject), &reply, Expect::Ok);
    let outputs = reply.body().map(|r| r.outputs.as_slice()).unwrap_or_default();
    rec.table(
        &format!("trigger pipeline with {}", subject),
        &[
            ("one output per input", outputs.len() == values.len()),
            ("outputs echo the inputs", echoes(outputs, values)),
        ],
    );
    Ok(())
}

fn echo_inputs(values: &[String]) -> Vec<Value> {
    values.iter().map(|v| json!({ "input": v })).collect()
}

fn echoes(outputs: &[Value], values: &[String]) -> bool {
    outputs.len() == values.len()
        && outputs
            .iter()
            .zip(values)
            .all(|(output, value)| output["answer"] == value.as_str())
}

pub async fn check_trigger(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let pipeline = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    trigger_echo(session, &*backend, &pipeline.id, "a single input", &["a".to_string()]).await?;

    let batch: Vec<String> = (0..3).map(|_| random_string(10)).collect();
    trigger_echo(session, &*backend, &pipeline.id, "a batch of inputs", &batch).await?;

    delete_pipeline(rec, &*backend, &pipeline.id).await
}

/// Round trips the sample images through the echo recipe as base64 strings.
///
/// Needs the fixture directory; without one the group records nothing.
pub async fn check_trigger_images(session: &Session) -> Result<()> {
    let Some(dir) = session.settings.fixtures.test_data_dir.as_deref() else {
        info!("no test data directory configured, skipping image triggers");
        return Ok(());
    };
    let images = SampleImages::load(dir)?;

    let rec = session.recorder();
    let backend = session.connect().await?;
    let pipeline = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    trigger_echo(
        session,
        &*backend,
        &pipeline.id,
        "a base64 image",
        &[images.dog_jpg.clone()],
    )
    .await?;
    trigger_echo(
        session,
        &*backend,
        &pipeline.id,
        "multiple base64 images",
        &[images.dog_jpg, images.cat_jpg, images.bear_jpg, images.dog_rgba_png],
    )
    .await?;

    delete_pipeline(rec, &*backend, &pipeline.id).await
}

/// Starts an async trigger and follows its operation to completion.
pub async fn check_trigger_async(session: &Session) -> Result<()> {
    let rec = session.recorder();
    let backend = session.connect().await?;
    let pipeline = create_pipeline(rec, &*backend, &fixtures::new_pipeline_body()).await?;

    let values: Vec<String> = (0..2).map(|_| random_string(10)).collect();
    let started = backend
        .trigger_pipeline_async(&pipeline.id, &echo_inputs(&values))
        .await?;
    rec.status("trigger pipeline asynchronously", &started, Expect::Ok);
    rec.check(
        format!("async trigger operation name starts with {}", OPERATION_PREFIX),
        started
            .body()
            .map_or(false, |op| op.name.starts_with(OPERATION_PREFIX)),
    );

    if let Some(operation) = started.body() {
        let polled = wait_for_operation(session, &*backend, operation).await?;
        rec.status("get operation", &polled, Expect::Ok);
        let finished = polled.body();
        rec.table(
            "async trigger operation",
            &[
                ("is done", finished.map_or(false, |op| op.done)),
                ("has no error", finished.map_or(false, |op| op.error.is_none())),
                (
                    "outputs echo the inputs",
                    finished
                        .and_then(Operation::outputs)
                        .map_or(false, |outputs| echoes(outputs, &values)),
                ),
            ],
        );
    }

    delete_pipeline(rec, &*backend, &pipeline.id).await
}

/// Polls an operation until it reports done or the attempts run out, and
/// returns the last reply.
async fn wait_for_operation(
    session: &Session,
    backend: &dyn Backend,
    operation: &Operation,
) -> Result<Reply<Operation>> {
    let attempts = session.settings.client.watch_poll_attempts.max(1);
    let interval = Duration::from_millis(session.settings.client.watch_poll_interval_ms);

    let mut attempt = 1;
    loop {
        let reply = backend.get_operation(operation.id()).await?;
        let done = reply.body().map_or(false, |op| op.done);
        if done || attempt >= attempts {
            return Ok(reply);
        }
        debug!(
            "operation {} still running after {} of {} polls",
            operation.name, attempt, attempts
        );
        attempt += 1;
        tokio::time::sleep(interval).await;
    }
}
