use regex::Regex;
use std::sync::LazyLock;

use crate::error::MergeError;

// Go's convention for marking generated files, with any generator identity.
static GENERATED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^// Code generated .* DO NOT EDIT\.\r?$").expect("valid marker regex")
});

static PACKAGE_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^package[ \t]+([\p{L}_][\p{L}\p{N}_]*)[ \t]*(?://.*)?\r?$")
        .expect("valid package regex")
});

/// Where the package clause of an existing generated file ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderAnchor {
    /// Package named by the clause.
    pub package_name: String,
    /// Byte offset just past the package line, including its newline when
    /// there is one.
    pub insert_at: usize,
    /// False when the package line is the last line and has no newline.
    pub terminated: bool,
}

fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with("//")
}

/// Find the generated-code header and the package clause that follows it.
///
/// Only blank lines and line comments may precede the marker, and the first
/// line of code after it must be the package clause.
pub fn locate_header(content: &str) -> Result<HeaderAnchor, MergeError> {
    let mut offset = 0;
    let mut seen_marker = false;

    for line in content.split_inclusive('\n') {
        offset += line.len();
        let text = line.strip_suffix('\n').unwrap_or(line);

        if !seen_marker {
            if GENERATED_MARKER.is_match(text) {
                seen_marker = true;
            } else if !is_blank_or_comment(text) {
                return Err(MergeError::MissingHeader);
            }
            continue;
        }

        if is_blank_or_comment(text) {
            continue;
        }

        let package_name = PACKAGE_CLAUSE
            .captures(text)
            .and_then(|clause| clause.get(1))
            .map(|name| name.as_str().to_string())
            .ok_or(MergeError::MissingPackageClause)?;

        return Ok(HeaderAnchor {
            package_name,
            insert_at: offset,
            terminated: line.ends_with('\n'),
        });
    }

    Err(if seen_marker {
        MergeError::MissingPackageClause
    } else {
        MergeError::MissingHeader
    })
}
