//! Sinks that receive verdicts after each evaluation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uno_core::{deep_equal, Value};

use crate::evaluator::Verdict;

/// Receives every verdict an [`crate::Evaluator`] produces.
pub trait Reporter: Send + Sync {
    fn report(&self, verdict: &Verdict);
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn report(&self, verdict: &Verdict) {
        (**self).report(verdict)
    }
}

/// Logs passing checks at `info` and failing checks at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, verdict: &Verdict) {
        if verdict.pass {
            info!(target: "uno", "{}", verdict.message);
        } else {
            error!(target: "uno", "{}", verdict.message);
        }
    }
}

/// Generic assertion sink exposing a single `ok(pass, message)` operation.
pub trait AssertionSink: Send + Sync {
    fn ok(&self, pass: bool, message: &str);
}

impl<S: AssertionSink + ?Sized> AssertionSink for Arc<S> {
    fn ok(&self, pass: bool, message: &str) {
        (**self).ok(pass, message)
    }
}

/// Adapts an [`AssertionSink`] into a [`Reporter`].
#[derive(Debug, Clone)]
pub struct SinkReporter<S> {
    sink: S,
}

impl<S: AssertionSink> SinkReporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: AssertionSink> Reporter for SinkReporter<S> {
    fn report(&self, verdict: &Verdict) {
        self.sink.ok(verdict.pass, &verdict.message);
    }
}

/// Recorded `ok` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    pub pass: bool,
    pub message: String,
}

/// In-memory [`AssertionSink`].
#[derive(Debug, Default)]
pub struct AssertionLog {
    entries: Mutex<Vec<Assertion>>,
}

impl AssertionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Assertion> {
        lock(&self.entries).clone()
    }

    pub fn passed(&self) -> usize {
        lock(&self.entries).iter().filter(|a| a.pass).count()
    }

    pub fn failed(&self) -> usize {
        lock(&self.entries).iter().filter(|a| !a.pass).count()
    }
}

impl AssertionSink for AssertionLog {
    fn ok(&self, pass: bool, message: &str) {
        lock(&self.entries).push(Assertion {
            pass,
            message: message.to_string(),
        });
    }
}

/// A re-runnable check registered under a synthesized identifier.
#[derive(Debug, Clone, Serialize)]
pub struct NamedCheck {
    pub name: String,
    pub expected: Value,
    pub result: Value,
}

impl NamedCheck {
    /// Asserts the recorded result against the expected value.
    pub fn run(&self) -> bool {
        deep_equal(&self.expected, &self.result)
    }
}

/// Registers one [`NamedCheck`] per verdict under `"test" + name`.
///
/// A later verdict with the same rendered name replaces the earlier check.
#[derive(Debug, Default)]
pub struct NamedCheckRegistry {
    checks: Mutex<IndexMap<String, NamedCheck>>,
}

impl NamedCheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(name: &str) -> String {
        format!("test{name}")
    }

    pub fn identifiers(&self) -> Vec<String> {
        lock(&self.checks).keys().cloned().collect()
    }

    pub fn get(&self, identifier: &str) -> Option<NamedCheck> {
        lock(&self.checks).get(identifier).cloned()
    }

    pub fn run(&self, identifier: &str) -> Option<bool> {
        lock(&self.checks).get(identifier).map(NamedCheck::run)
    }

    pub fn run_all(&self) -> Vec<(String, bool)> {
        lock(&self.checks)
            .iter()
            .map(|(id, check)| (id.clone(), check.run()))
            .collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.checks).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.checks).is_empty()
    }
}

impl Reporter for NamedCheckRegistry {
    fn report(&self, verdict: &Verdict) {
        let check = NamedCheck {
            name: verdict.name.clone(),
            expected: verdict.expected.clone(),
            result: verdict.result.clone(),
        };
        lock(&self.checks).insert(Self::identifier(&verdict.name), check);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
