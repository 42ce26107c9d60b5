//! Call evaluator for uno checks: runs a target, compares the outcome with
//! the expected value, renders a display name and forwards the verdict to
//! any attached reporters.

mod evaluator;
mod invocation;
mod naming;
mod report;
mod settings;

pub use evaluator::{Evaluator, Verdict};
pub use invocation::{Call, Invocation, MAX_ARGUMENTS, MIN_ARGUMENTS};
pub use naming::{function_name, ANONYMOUS};
pub use report::{
    Assertion, AssertionLog, AssertionSink, ConsoleReporter, NamedCheck, NamedCheckRegistry,
    Reporter, SinkReporter,
};
pub use settings::{
    load_settings, load_settings_patch, Settings, SettingsPatch, DEFAULT_GROUP, DEFAULT_NAME,
};
pub use uno_core::VERSION;
