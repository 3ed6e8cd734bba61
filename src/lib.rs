//! Asset bundling for client-side JavaScript and CSS.
//!
//! Source files declare their dependencies inline: JavaScript with
//! `//= require` comments, CSS with `@import url(...)` statements. Blend
//! scans a file for those declarations, resolves each one against a set of
//! search roots, and writes a merged output file with the required content
//! spliced in place of the declaration.

pub mod domain;
pub use domain::{
    Config, ConfigError, Environment, Requirement, RequirementKind, Resource, ResourceError,
    ResourceKind, Span,
};

pub mod storage;
pub use storage::MergeError;
