//! Version strings reported by `--version`

use regex::Regex;
use std::sync::LazyLock;

static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?\d+\.\d+(?:\.\d+)?").unwrap());

/// First `v1.2` / `1.2.3` token in a `--version` output
pub fn parse_version(output: &str) -> Option<String> {
    VERSION.find(output).map(|m| m.as_str().to_string())
}
