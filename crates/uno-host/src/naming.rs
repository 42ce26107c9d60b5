use std::sync::OnceLock;

use regex::Regex;
use uno_core::Function;

/// Display name for targets whose header carries no name.
pub const ANONYMOUS: &str = "function";

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"function\s*([\w$]*)\s*\(").expect("static pattern"))
}

/// Name parsed from the target's definition header, e.g. `round` from
/// `function round(x)`. Anonymous or unparsable headers yield `"function"`.
pub fn function_name(target: &Function) -> String {
    header_pattern()
        .captures(target.header())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(ANONYMOUS)
        .to_string()
}
