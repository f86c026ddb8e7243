/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Page traversal for token paginated List calls.

use std::collections::HashSet;
use std::future::Future;

use log::debug;
use vdp_client::{Expect, ListQuery, Reply};
use vdp_models::Paginated;

use crate::check::Recorder;
use crate::error::{HarnessError, Result};

/// Every record seen while following `next_page_token` to the end.
#[derive(Debug, Clone)]
pub struct Traversal<T> {
    pub items: Vec<T>,
    /// `total_size` reported by the first page
    pub total_size: i64,
    pub pages: usize,
    /// Whether the walk ended on an empty token rather than the page limit
    pub exhausted: bool,
}

/// Follows page tokens from the first page until the token comes back empty.
///
/// `base` carries the view and filter; its paging fields are overwritten.
/// The walk stops after enough pages to cover `total_size` twice over so a
/// backend that keeps handing out tokens cannot loop forever.
pub async fn traverse<P, F, Fut>(
    base: &ListQuery,
    page_size: i32,
    mut fetch: F,
) -> Result<Traversal<P::Item>>
where
    P: Paginated,
    P::Item: Clone,
    F: FnMut(ListQuery) -> Fut,
    Fut: Future<Output = vdp_client::Result<Reply<P>>>,
{
    if page_size <= 0 {
        return Err(HarnessError::precondition("page traversal needs a positive page size"));
    }

    let mut traversal = Traversal {
        items: Vec::new(),
        total_size: 0,
        pages: 0,
        exhausted: false,
    };
    let mut token = String::new();
    let mut limit = 1;

    while traversal.pages < limit {
        let query = ListQuery {
            page_size: Some(page_size),
            page_token: Some(token.clone()),
            page: None,
            ..base.clone()
        };
        let page = fetch(query).await?.require(Expect::Ok)?;
        if traversal.pages == 0 {
            traversal.total_size = page.total_size();
            limit = 2 * (page.total_size().max(0) as usize / page_size as usize + 1);
        }
        traversal.pages += 1;
        traversal.items.extend_from_slice(page.items());
        token = page.next_page_token().to_string();
        debug!(
            "page {}: {} records, next token {:?}",
            traversal.pages,
            page.items().len(),
            token
        );
        if token.is_empty() {
            traversal.exhausted = true;
            break;
        }
    }
    Ok(traversal)
}

/// Records that a traversal reconciles with the reported total.
///
/// Returns true when every case passed.
pub fn check_traversal<T>(
    recorder: &Recorder,
    subject: &str,
    traversal: &Traversal<T>,
    key: impl Fn(&T) -> String,
) -> bool {
    let distinct = traversal.items.iter().map(&key).collect::<HashSet<_>>().len();
    recorder.table(
        subject,
        &[
            ("traversal ends with an empty page token", traversal.exhausted),
            (
                "traversal yields total_size records",
                traversal.items.len() as i64 == traversal.total_size,
            ),
            ("traversal yields no duplicates", distinct == traversal.items.len()),
        ],
    )
}

/// True when two pages hold the same number of records and start with the same one.
pub fn same_first_page<P: Paginated>(a: &P, b: &P, key: impl Fn(&P::Item) -> String) -> bool {
    a.items().len() == b.items().len()
        && a.items().first().map(&key) == b.items().first().map(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vdp_client::Status;
    use vdp_models::{Pipeline, PipelinePage};

    /// Serves `total` pipelines in token pages, like the backend does.
    fn serve(total: usize, query: &ListQuery) -> Reply<PipelinePage> {
        let size = query.page_size.filter(|s| *s > 0).unwrap_or(10) as usize;
        let start = query
            .page_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .and_then(|t| t.parse::<usize>().ok())
            .unwrap_or(0);
        let end = (start + size).min(total);
        let pipelines = (start..end)
            .map(|i| Pipeline {
                id: format!("p-{}", i),
                ..Default::default()
            })
            .collect();
        let next_page_token = if end < total { end.to_string() } else { String::new() };
        Reply::ok(
            Status::Http(200),
            PipelinePage {
                pipelines,
                next_page_token,
                total_size: total as i64,
            },
        )
    }

    #[tokio::test]
    /// Verifies traversal collects every record exactly once.
    ///
    /// This test:
    /// 1. Walks 23 records in pages of 10
    /// 2. Checks three pages were fetched and the walk ended on an empty token
    /// 3. Records the reconciliation checks and expects them all to pass
    async fn test_traverse_collects_every_page() {
        let traversal = traverse(&ListQuery::new(), 10, |q| async move { Ok(serve(23, &q)) })
            .await
            .unwrap();

        assert_eq!(traversal.pages, 3);
        assert_eq!(traversal.items.len(), 23);
        assert!(traversal.exhausted);

        let recorder = Recorder::new();
        assert!(check_traversal(&recorder, "pipelines", &traversal, |p| p.id.clone()));
        assert_eq!(recorder.summary().failed, 0);
    }

    #[tokio::test]
    async fn test_traverse_empty_collection() {
        let traversal = traverse(&ListQuery::new(), 5, |q| async move { Ok(serve(0, &q)) })
            .await
            .unwrap();
        assert_eq!(traversal.pages, 1);
        assert!(traversal.items.is_empty());
        assert!(traversal.exhausted);
    }

    #[tokio::test]
    /// Verifies a backend that never stops handing out tokens is cut off and reported.
    ///
    /// This test:
    /// 1. Serves the same non-empty token forever
    /// 2. Checks the walk stops at its page limit
    /// 3. Checks the duplicate and exhaustion cases fail
    async fn test_traverse_stops_on_endless_tokens() {
        let calls = AtomicUsize::new(0);
        let traversal = traverse(&ListQuery::new(), 2, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Ok(Reply::ok(
                    Status::Http(200),
                    PipelinePage {
                        pipelines: vec![Pipeline {
                            id: "same".into(),
                            ..Default::default()
                        }],
                        next_page_token: "again".into(),
                        total_size: 3,
                    },
                ))
            }
        })
        .await
        .unwrap();

        assert!(!traversal.exhausted);
        assert_eq!(calls.load(Ordering::SeqCst), 4);

        let recorder = Recorder::new();
        assert!(!check_traversal(&recorder, "pipelines", &traversal, |p| p.id.clone()));
        assert_eq!(recorder.summary().failed, 3);
    }

    #[tokio::test]
    async fn test_traverse_failed_page_is_an_error() {
        let result = traverse(&ListQuery::new(), 5, |_| async move {
            Ok(Reply::<PipelinePage>::failed(Status::Http(401), "Unauthorized"))
        })
        .await;
        assert!(matches!(result, Err(HarnessError::Client(_))));

        let result = traverse(&ListQuery::new(), 0, |q| async move { Ok(serve(1, &q)) }).await;
        assert!(matches!(result, Err(HarnessError::Precondition(_))));
    }

    #[test]
    fn test_same_first_page() {
        let a = serve(12, &ListQuery::new()).body.unwrap();
        let b = serve(12, &ListQuery::new().page_size(0)).body.unwrap();
        let c = serve(12, &ListQuery::new().page_size(3)).body.unwrap();
        assert!(same_first_page(&a, &b, |p| p.id.clone()));
        assert!(!same_first_page(&a, &c, |p| p.id.clone()));
    }
}
