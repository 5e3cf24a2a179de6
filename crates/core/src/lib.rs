//! Core library for optional
//!
//! This crate implements the **Functional Core** of the `optional` generator,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`optional_core`** (this crate): rendering and merging, zero I/O
//! - **`optional`**: flag parsing, `go generate` environment, file write-back
//!
//! Every function here is a pure transformation of its inputs, so the whole
//! merge policy can be tested with fixture strings and no filesystem.
//!
//! # Module Organization
//!
//! - [`request`]: [`GenerationRequest`] and the [`ElementType`] descriptor
//! - [`template`]: header, import and unit text blocks
//! - [`header`]: locating the generated-code header and package clause
//! - [`merge`]: combining a new unit with a target's existing content
//! - [`error`]: failures of the merge step
//!
//! # Example Usage
//!
//! ```rust
//! use optional_core::{merge, GenerationRequest, WritePolicy};
//!
//! let first = GenerationRequest::new("main", "String", "string");
//! let outcome = merge(&first, b"").unwrap();
//! assert_eq!(outcome.policy, WritePolicy::Overwrite);
//!
//! let second = GenerationRequest::new("main", "Int", "int").with_append(true);
//! let outcome = merge(&second, &outcome.content).unwrap();
//! let text = String::from_utf8(outcome.content).unwrap();
//! assert!(text.contains("type OptionalString struct"));
//! assert!(text.contains("type OptionalInt struct"));
//! ```

pub mod error;
pub mod header;
pub mod merge;
pub mod request;
pub mod template;

pub use error::MergeError;
pub use merge::{merge, MergeOutcome, WritePolicy};
pub use request::{default_option_name, ElementType, GenerationRequest};
