//! Core domain model for asset bundling.
//!
//! This module contains the value objects describing files on disk
//! ([`Resource`]), the dependency declarations found inside them
//! ([`Requirement`]), and the search roots used to resolve those
//! declarations ([`Environment`]).

mod config;
pub use config::{Config, ConfigError};
mod environment;
pub use environment::Environment;
/// Requirement declarations detected inside a resource's content.
pub mod requirement;
pub use requirement::{InvalidRequirementError, Requirement, RequirementKind, Span};
/// Resource model and classification.
pub mod resource;
pub use resource::{Resource, ResourceError, ResourceKind};
