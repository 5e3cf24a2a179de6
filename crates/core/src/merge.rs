//! Combining a freshly rendered unit with the current content of a target
//! file.
//!
//! The engine is purely textual. It never parses Go; it anchors on the
//! package clause for import insertion and on end-of-buffer for the new unit.

use serde::Serialize;

use crate::error::MergeError;
use crate::header::locate_header;
use crate::request::GenerationRequest;
use crate::template::{render_header, render_import, render_unit};

/// How the shell must write `MergeOutcome::content` back.
///
/// Both policies rewrite the whole target from offset zero and truncate any
/// leftover bytes; they differ in whether the old content survives inside the
/// new buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// Prior content was discarded.
    Overwrite,
    /// Prior content is carried over with additions.
    Rewrite,
}

impl WritePolicy {
    pub fn discards_existing(self) -> bool {
        matches!(self, WritePolicy::Overwrite)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub content: Vec<u8>,
    pub policy: WritePolicy,
    /// Package clause found in the existing content (append mode only).
    pub existing_package: Option<String>,
}

/// Compute the full new content of the target for `request`.
///
/// In non-append mode `existing` is ignored. In append mode it must already
/// start with a generated-code header and package clause; otherwise an error
/// is returned and nothing should be written.
pub fn merge(request: &GenerationRequest, existing: &[u8]) -> Result<MergeOutcome, MergeError> {
    if request.append {
        append(request, existing)
    } else {
        Ok(MergeOutcome {
            content: fresh(request).into_bytes(),
            policy: WritePolicy::Overwrite,
            existing_package: None,
        })
    }
}

fn fresh(request: &GenerationRequest) -> String {
    let mut out = render_header(&request.package_name);
    for path in &request.imports {
        out.push_str(&render_import(path));
    }
    out.push_str(&render_unit(&request.option_name, &request.element_type));
    out
}

fn append(request: &GenerationRequest, existing: &[u8]) -> Result<MergeOutcome, MergeError> {
    let existing =
        std::str::from_utf8(existing).map_err(|e| MergeError::NotUtf8(e.to_string()))?;
    if existing.contains("\r\n") {
        return Err(MergeError::CrlfLineEndings);
    }
    let anchor = locate_header(existing)?;

    let (head, rest) = existing.split_at(anchor.insert_at);
    let mut out = String::with_capacity(existing.len() + 512);
    out.push_str(head);

    if request.imports.is_empty() {
        out.push_str(rest);
    } else {
        if !anchor.terminated {
            out.push('\n');
        }
        // The blank line under the package clause stays directly under it.
        out.push('\n');
        for path in &request.imports {
            out.push_str(&render_import(path));
        }
        out.push_str(rest.strip_prefix('\n').unwrap_or(rest));
    }

    // Separator only; prior bytes are never dropped.
    if !out.ends_with('\n') {
        out.push('\n');
    }
    if !out.ends_with("\n\n") {
        out.push('\n');
    }
    out.push_str(&render_unit(&request.option_name, &request.element_type));

    Ok(MergeOutcome {
        content: out.into_bytes(),
        policy: WritePolicy::Rewrite,
        existing_package: Some(anchor.package_name),
    })
}
