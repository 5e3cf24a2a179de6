use thiserror::Error;

/// Reasons the merge engine refuses to produce new content.
///
/// Every variant is raised before any output is assembled, so a caller that
/// only writes on `Ok` never leaves a target half-written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("existing content has no \"// Code generated ... DO NOT EDIT.\" header")]
    MissingHeader,

    #[error("existing content has a generated-code header but no package clause after it")]
    MissingPackageClause,

    #[error("existing content uses CRLF line endings; only LF files can be appended to")]
    CrlfLineEndings,

    #[error("existing content is not valid UTF-8: {0}")]
    NotUtf8(String),
}
