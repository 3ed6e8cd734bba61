//! Filesystem-backed operations on resources.
//!
//! Discovery walks the environment's search roots to build a candidate
//! pool; merge splices pool content into a resource and writes the result.
//! Both are one-shot and unmemoised: every call re-reads the disk.

pub(crate) mod discovery;
pub(crate) mod merge;
pub use merge::MergeError;
