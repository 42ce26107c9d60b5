#![deny(missing_docs)]
#![doc = "Value model and inspection primitives for uno: type tags, deep equality and display formatting."]

pub mod classify;
pub mod equal;
pub mod errors;
pub mod format;
pub mod template;
pub mod value;

pub use classify::{classify, TypeTag};
pub use equal::{deep_equal, identical};
pub use errors::{ErrorInfo, UnoError};
pub use format::{format_number, format_value, json_text, ValueFormatter};
pub use template::{format_template, render, SubstitutionMapping};
pub use value::{iso_string, Equatable, Function, Kind, NativeFn, Object, RegExp, Value};

/// Version identifier of the uno crates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
