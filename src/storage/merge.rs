//! Splicing of required content into a resource.

use std::{fs, io, path::Path, path::PathBuf};

use crate::domain::{Environment, Resource, ResourceError};

/// Error returned when merging a resource fails.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The source resource has no content to merge.
    #[error("resource {path} has no content to merge")]
    MissingContent {
        /// Path of the contentless resource.
        path: PathBuf,
    },
    /// Discovering the candidate pool failed.
    #[error(transparent)]
    Discovery(#[from] ResourceError),
    /// The output directory or file could not be written.
    #[error("failed to write merged output")]
    Io(#[from] io::Error),
}

/// Resolves `resource`'s requirements against `environment` and writes the
/// merged content to `output_path`.
///
/// The candidate pool is discovered once per call. Requirements resolve to
/// the first pool member with a matching base name; unresolved
/// declarations stay in the output untouched.
pub(crate) fn merge_into(
    resource: &Resource,
    environment: &Environment,
    output_path: &Path,
) -> Result<(), MergeError> {
    let Some(content) = resource.content() else {
        return Err(MergeError::MissingContent {
            path: resource.path().to_path_buf(),
        });
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let Some(requirements) = resource.requirements() else {
        // Nothing to splice; a byte copy also preserves non-text files.
        fs::copy(resource.path(), output_path)?;
        tracing::debug!("copied {} unchanged", resource.path().display());
        return Ok(());
    };

    let pool =
        Resource::find_all_of_kind(resource.kind(), environment)?.unwrap_or_default();
    let mut merged = content.to_string();

    // Splice back to front: the spans were computed against the original
    // content, and an earlier splice must not shift the spans still to be
    // applied.
    for requirement in requirements.iter().rev() {
        let matched = pool
            .iter()
            .find(|candidate| candidate.base_name() == requirement.name());
        match matched {
            Some(candidate) => {
                merged.replace_range(
                    requirement.span().range(),
                    candidate.content().unwrap_or_default(),
                );
                tracing::debug!(
                    "spliced {} from {}",
                    requirement.name(),
                    candidate.path().display()
                );
            }
            None => {
                tracing::debug!("no resource found for requirement {requirement}");
            }
        }
    }

    fs::write(output_path, merged)?;
    tracing::info!(
        "merged {} into {}",
        resource.path().display(),
        output_path.display()
    );
    Ok(())
}
