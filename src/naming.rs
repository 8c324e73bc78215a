//! Project name validation and placeholder substitution helpers
//!
//! Substitution is plain find/replace over file text. It does not parse
//! Python, so anything that happens to contain the placeholder (a string
//! literal, a longer identifier) is rewritten as well.

use regex::Regex;
use std::sync::LazyLock;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("name pattern is a valid regex")
});

/// Check that a project name is usable as a Python package identifier
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Apply every `(find, replace)` pair in a single left-to-right pass
///
/// At each position the longest matching `find` wins, and replaced text is
/// never scanned again. A pair whose `find` equals its `replace` shields that
/// text from shorter patterns without counting as a replacement. Returns the
/// new text and the number of replacements made.
pub fn substitute(content: &str, replacements: &[(String, String)]) -> (String, usize) {
    let mut out = String::with_capacity(content.len());
    let mut count = 0;
    let mut rest = content;

    loop {
        let next = replacements
            .iter()
            .filter(|(find, _)| !find.is_empty())
            .filter_map(|(find, replace)| rest.find(find.as_str()).map(|at| (at, find, replace)))
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())));

        let Some((at, find, replace)) = next else {
            out.push_str(rest);
            return (out, count);
        };

        out.push_str(&rest[..at]);
        out.push_str(replace);
        if find != replace {
            count += 1;
        }
        rest = &rest[at + find.len()..];
    }
}

/// Import-statement rewrites turning `package` into `name`
pub fn import_rewrites(package: &str, name: &str) -> Vec<(String, String)> {
    vec![
        (format!("from {package}"), format!("from {name}")),
        (format!("import {package}"), format!("import {name}")),
    ]
}
