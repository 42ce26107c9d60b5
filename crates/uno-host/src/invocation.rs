use uno_core::errors::{ErrorInfo, UnoError};
use uno_core::{classify, Function, Value};

static UNDEFINED: Value = Value::Undefined;

/// Smallest and largest accepted number of supplied positions.
pub const MIN_ARGUMENTS: usize = 3;
pub const MAX_ARGUMENTS: usize = 5;

/// One check, with every position optional.
///
/// The number of supplied positions is the call's argument count; it must
/// stay within [`MIN_ARGUMENTS`]..=[`MAX_ARGUMENTS`].
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Display template; the evaluator's default template when absent.
    pub name: Option<String>,
    /// Context the target is invoked with.
    pub receiver: Option<Value>,
    pub target: Option<Value>,
    pub args: Option<Value>,
    /// Expected outcome; `undefined` when absent.
    pub expected: Option<Value>,
    /// Repetition count. Validated, otherwise unused.
    pub repeat: Option<Value>,
}

/// An [`Invocation`] that passed validation.
#[derive(Debug, Clone, Copy)]
pub struct Call<'a> {
    pub name: Option<&'a str>,
    pub receiver: Option<&'a Value>,
    pub target: &'a Function,
    pub args: &'a [Value],
    pub expected: &'a Value,
    pub repeat: Option<f64>,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// `target(args...)` is expected to produce `expected`.
    pub fn call(
        target: impl Into<Value>,
        args: impl Into<Value>,
        expected: impl Into<Value>,
    ) -> Self {
        Self {
            target: Some(target.into()),
            args: Some(args.into()),
            expected: Some(expected.into()),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn on(mut self, receiver: impl Into<Value>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn target(mut self, target: impl Into<Value>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn args(mut self, args: impl Into<Value>) -> Self {
        self.args = Some(args.into());
        self
    }

    pub fn expecting(mut self, expected: impl Into<Value>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn repeat(mut self, count: impl Into<Value>) -> Self {
        self.repeat = Some(count.into());
        self
    }

    pub fn argument_count(&self) -> usize {
        [
            self.name.is_some(),
            self.receiver.is_some(),
            self.target.is_some(),
            self.args.is_some(),
            self.expected.is_some(),
            self.repeat.is_some(),
        ]
        .into_iter()
        .filter(|supplied| *supplied)
        .count()
    }

    /// Checks the call shape in order: target, args, repeat, count, name.
    pub fn validate(&self) -> Result<Call<'_>, UnoError> {
        let target = match &self.target {
            Some(Value::Function(target)) => target,
            other => {
                return Err(UnoError::Argument(
                    ErrorInfo::new(
                        "uno_host.argument_target",
                        "`fn` is missing or not a function",
                    )
                    .with_context("found", found(other.as_ref())),
                ))
            }
        };
        let args = match &self.args {
            Some(Value::Array(args)) => args.as_slice(),
            other => {
                return Err(UnoError::Argument(
                    ErrorInfo::new(
                        "uno_host.argument_args",
                        "`args` is missing or not an [array]",
                    )
                    .with_context("found", found(other.as_ref())),
                ))
            }
        };
        let repeat = match &self.repeat {
            None | Some(Value::Undefined) => None,
            Some(Value::Number(n)) if !n.is_nan() => Some(*n),
            Some(other) => {
                return Err(UnoError::Argument(
                    ErrorInfo::new(
                        "uno_host.argument_repeat",
                        "`count` should be an integer or undefined",
                    )
                    .with_context("found", found(Some(other))),
                ))
            }
        };
        let count = self.argument_count();
        if !(MIN_ARGUMENTS..=MAX_ARGUMENTS).contains(&count) {
            return Err(UnoError::Argument(
                ErrorInfo::new("uno_host.argument_count", "arguments are invalid")
                    .with_context("count", count.to_string())
                    .with_hint(format!(
                        "supply between {MIN_ARGUMENTS} and {MAX_ARGUMENTS} arguments"
                    )),
            ));
        }
        if matches!(self.name.as_deref(), Some("")) {
            return Err(UnoError::argument(
                "uno_host.argument_name",
                "`name` must not be empty",
            ));
        }
        Ok(Call {
            name: self.name.as_deref(),
            receiver: self.receiver.as_ref(),
            target,
            args,
            expected: self.expected.as_ref().unwrap_or(&UNDEFINED),
            repeat,
        })
    }
}

fn found(value: Option<&Value>) -> String {
    value
        .map(|value| classify(value).to_string())
        .unwrap_or_else(|| "nothing".to_string())
}
