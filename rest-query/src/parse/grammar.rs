//! Token grammars, compiled once and shared read-only across threads.

use regex::Regex;
use std::sync::LazyLock;

/// A field-selection token: plain identifier characters, possibly empty.
pub(crate) static FIELD_TOKEN: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z0-9_]*$"));

/// `field<op>value`. The value class excludes quotes, whitespace, `;`, `%` and the
/// operator characters.
pub(crate) static FILTER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([A-Za-z0-9_]+)(!=|~=|<=|>=|<>|=|<|>)([A-Za-z0-9_:.*äüöÄÜÖß-]+)$")
});

/// `[+|-]field`.
pub(crate) static ORDER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(-|\+|)([A-Za-z0-9_äüöÄÜÖß]+)$"));

// The patterns are literals; failing to compile one is a programming error.
#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("grammar pattern must compile")
}
