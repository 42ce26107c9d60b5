use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::debug;
use uno_core::errors::UnoError;
use uno_core::{deep_equal, render, SubstitutionMapping, Value, ValueFormatter};

use crate::invocation::{Call, Invocation};
use crate::naming::function_name;
use crate::report::Reporter;
use crate::settings::Settings;

/// Outcome of one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub pass: bool,
    /// The target failed instead of returning; `result` holds the failure.
    pub threw: bool,
    /// Rendered display name.
    pub name: String,
    pub message: String,
    pub result: Value,
    pub expected: Value,
}

/// Runs a target against an expected outcome and reports the verdict.
pub struct Evaluator {
    settings: Settings,
    formatter: ValueFormatter,
    reporters: Vec<Box<dyn Reporter>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("settings", &self.settings)
            .field("reporters", &self.reporters.len())
            .finish()
    }
}

impl Evaluator {
    /// Builds an evaluator around validated `settings`.
    pub fn new(settings: Settings) -> Result<Self, UnoError> {
        settings.validate()?;
        Ok(Self::with_settings(settings))
    }

    fn with_settings(settings: Settings) -> Self {
        let formatter = settings.formatter();
        Self {
            settings,
            formatter,
            reporters: Vec::new(),
        }
    }

    /// Adds a sink that receives every verdict.
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporters.push(Box::new(reporter));
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Convenience form of [`Evaluator::evaluate`] returning only pass/fail.
    pub fn check(&self, invocation: &Invocation) -> Result<bool, UnoError> {
        self.evaluate(invocation).map(|verdict| verdict.pass)
    }

    /// Invokes the target and compares its outcome with the expected value.
    ///
    /// Errors are reserved for malformed calls. A target that fails is
    /// compared like a returned value and only changes the message wording.
    pub fn evaluate(&self, invocation: &Invocation) -> Result<Verdict, UnoError> {
        let call = invocation.validate()?;
        if let Some(count) = call.repeat {
            debug!(count, "repeat count accepted; checks run once");
        }

        let (result, threw) = invoke(&call);
        let pass = deep_equal(&result, call.expected);

        let mapping = self.mapping(&call, &result);
        let template = call.name.unwrap_or(&self.settings.name);
        let name = render(template, &mapping, &self.formatter);
        let message = if pass {
            format!("{} test passed: {}", self.settings.group, name)
        } else {
            format!(
                "Test failed: {name}\n     input:\t{}\n  {}\t{}\n  expected:\t{}\n",
                self.formatter.call_site(call.args),
                if threw { "threw:" } else { "returned:" },
                self.formatter.display(&result),
                self.formatter.display(call.expected),
            )
        };
        debug!(%name, pass, threw, "check evaluated");

        let verdict = Verdict {
            pass,
            threw,
            name,
            message,
            result,
            expected: call.expected.clone(),
        };
        for reporter in &self.reporters {
            reporter.report(&verdict);
        }
        Ok(verdict)
    }

    fn mapping(&self, call: &Call<'_>, result: &Value) -> SubstitutionMapping {
        let formatted = |value: &Value| {
            self.formatter
                .format(value)
                .map(Value::String)
                .unwrap_or(Value::Undefined)
        };
        let mut mapping = SubstitutionMapping::new();
        mapping.alias(
            &["input", "in", "args", "arguments"],
            self.formatter.call_site(call.args),
        );
        mapping.alias(&["output", "out", "result"], formatted(result));
        mapping.alias(&["method", "fn", "f", "function"], function_name(call.target));
        mapping.insert("expected", formatted(call.expected));
        mapping
    }
}

fn invoke(call: &Call<'_>) -> (Value, bool) {
    let null = Value::Null;
    let receiver = call.receiver.unwrap_or(&null);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| call.target.call(receiver, call.args)));
    match outcome {
        Ok(Ok(value)) => (value, false),
        Ok(Err(failure)) => (failure, true),
        Err(payload) => (Value::String(panic_message(payload.as_ref())), true),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic".to_string()
    }
}
