//! Recursive discovery of resources under a set of search roots.

use std::path::Path;

use walkdir::WalkDir;

use crate::domain::{Environment, Resource, ResourceError, ResourceKind};

/// Walks every root in `environment` and builds the pool of resources
/// whose kind matches `kind`.
///
/// Root order is preserved; within a root the walk is sorted by file name
/// so repeated calls over an unchanged tree produce the same order. An
/// empty pool is reported as `Ok(None)`.
pub(crate) fn find_all_of_kind(
    kind: ResourceKind,
    environment: &Environment,
) -> Result<Option<Vec<Resource>>, ResourceError> {
    let mut resources = Vec::new();
    for root in environment.paths() {
        collect_in_root(kind, root, &mut resources)?;
    }

    tracing::debug!(
        "discovered {} {kind} resource(s) across {} root(s)",
        resources.len(),
        environment.paths().len()
    );

    if resources.is_empty() {
        Ok(None)
    } else {
        Ok(Some(resources))
    }
}

fn collect_in_root(
    kind: ResourceKind,
    root: &Path,
    resources: &mut Vec<Resource>,
) -> Result<(), ResourceError> {
    let entries = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file());

    for entry in entries {
        let resource = Resource::new(entry.path())?;
        if resource.kind() == kind {
            resources.push(resource);
        }
    }

    Ok(())
}
