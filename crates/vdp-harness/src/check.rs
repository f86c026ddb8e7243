/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Check Module
//!
//! Records the outcome of every assertion of a run.
//!
//! Checks are non-fatal: a failed check is logged at `warn`, counted and the
//! caller carries on. The run passes only when every recorded check passed.
//! Checks are attributed to the group that is open when they are recorded.

use crate::error::HarnessError;
use log::{info, warn};
use std::sync::Mutex;
use vdp_client::{Expect, Reply};

/// One recorded assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub group: String,
    pub name: String,
    pub passed: bool,
}

/// Totals of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Fraction of passed checks, 1.0 for an empty run.
    pub fn rate(&self) -> f64 {
        if self.total() == 0 {
            1.0
        } else {
            self.passed as f64 / self.total() as f64
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Default)]
struct State {
    group: Option<String>,
    outcomes: Vec<Outcome>,
}

/// Collects check outcomes. Shared by reference across a run.
#[derive(Default)]
pub struct Recorder {
    state: Mutex<State>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut state)
    }

    /// Opens a group; later checks are attributed to it.
    pub fn begin_group(&self, name: &str) {
        info!("group: {}", name);
        self.with_state(|s| s.group = Some(name.to_string()));
    }

    /// Closes the open group and logs its totals.
    pub fn end_group(&self) {
        self.with_state(|s| {
            if let Some(group) = s.group.take() {
                let (passed, failed) = s
                    .outcomes
                    .iter()
                    .filter(|o| o.group == group)
                    .fold((0, 0), |(p, f), o| if o.passed { (p + 1, f) } else { (p, f + 1) });
                info!("group done: {} ({} passed, {} failed)", group, passed, failed);
            }
        });
    }

    /// Records a single assertion and returns it.
    pub fn check(&self, name: impl AsRef<str>, passed: bool) -> bool {
        let name = name.as_ref();
        if passed {
            info!("✓ {}", name);
        } else {
            warn!("✗ {}", name);
        }
        self.with_state(|s| {
            let group = s.group.clone().unwrap_or_default();
            s.outcomes.push(Outcome {
                group,
                name: name.to_string(),
                passed,
            });
        });
        passed
    }

    /// Records a table of named predicates about one subject.
    ///
    /// Returns true when every case passed.
    pub fn table(&self, subject: &str, cases: &[(&str, bool)]) -> bool {
        cases
            .iter()
            .fold(true, |all, (name, passed)| {
                self.check(format!("{} {}", subject, name), *passed) && all
            })
    }

    /// Records whether a reply has the expected status.
    pub fn status<T>(&self, name: &str, reply: &Reply<T>, expect: Expect) -> bool {
        self.status_any(name, reply, &[expect])
    }

    /// Records whether a reply has one of the expected statuses.
    pub fn status_any<T>(&self, name: &str, reply: &Reply<T>, expects: &[Expect]) -> bool {
        let passed = reply.is_any(expects);
        if !passed {
            warn!(
                "{}: got {}{}",
                name,
                reply.status,
                reply
                    .message
                    .as_deref()
                    .map(|m| format!(" ({})", m))
                    .unwrap_or_default()
            );
        }
        let wanted = expects
            .iter()
            .map(|e| format!("{:?}", e))
            .collect::<Vec<_>>()
            .join("|");
        self.check(format!("{} response status is {}", name, wanted), passed)
    }

    /// Records that the rest of the open group was skipped.
    pub fn precondition_failed(&self, err: &HarnessError) {
        self.check(format!("skipped remaining checks: {}", err), false);
    }

    pub fn summary(&self) -> Summary {
        self.with_state(|s| {
            let passed = s.outcomes.iter().filter(|o| o.passed).count();
            Summary {
                passed,
                failed: s.outcomes.len() - passed,
            }
        })
    }

    pub fn failures(&self) -> Vec<Outcome> {
        self.with_state(|s| s.outcomes.iter().filter(|o| !o.passed).cloned().collect())
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.with_state(|s| s.outcomes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdp_client::Status;

    #[test]
    /// Verifies outcomes are attributed to the open group and totals add up.
    ///
    /// This test:
    /// 1. Records one check outside any group and two inside a group
    /// 2. Closes the group and records another check
    /// 3. Checks attribution, the summary and the failure list
    fn test_group_attribution() {
        let recorder = Recorder::new();
        recorder.check("outside", true);
        recorder.begin_group("Connector API: Create");
        recorder.check("created", true);
        recorder.check("owner is valid", false);
        recorder.end_group();
        recorder.check("after", true);

        let outcomes = recorder.outcomes();
        assert_eq!(outcomes[0].group, "");
        assert_eq!(outcomes[1].group, "Connector API: Create");
        assert_eq!(outcomes[3].group, "");

        let summary = recorder.summary();
        assert_eq!(summary.passed, 3);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_success());
        assert_eq!(recorder.failures()[0].name, "owner is valid");
    }

    #[test]
    /// Verifies a table records every case even after a failure.
    fn test_table_records_every_case() {
        let recorder = Recorder::new();
        let all = recorder.table(
            "GET connector",
            &[("id", true), ("state", false), ("owner", true)],
        );
        assert!(!all);
        assert_eq!(recorder.summary().total(), 3);
        assert_eq!(recorder.outcomes()[1].name, "GET connector state");
    }

    #[test]
    fn test_status_check() {
        let recorder = Recorder::new();
        let created: Reply<()> = Reply::ok(Status::Http(201), ());
        assert!(recorder.status("POST connectors", &created, Expect::Created));
        assert!(!recorder.status("POST connectors", &created, Expect::Ok));
        assert!(recorder.status_any("GET", &created, &[Expect::Ok, Expect::Created]));
        assert_eq!(
            recorder.outcomes()[0].name,
            "POST connectors response status is Created"
        );
    }

    #[test]
    fn test_rate() {
        assert_eq!(Summary { passed: 0, failed: 0 }.rate(), 1.0);
        assert_eq!(Summary { passed: 3, failed: 1 }.rate(), 0.75);
    }
}
