use std::{env, io, path::PathBuf};

/// The ordered set of search-root directories used during discovery.
///
/// Roots are searched in the order they were added; that order decides
/// which resource wins when two candidates share a base name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    paths: Vec<PathBuf>,
}

impl Environment {
    /// Creates an environment from an ordered set of root directories.
    #[must_use]
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an environment from `roots` with the current working
    /// directory appended as the last root.
    ///
    /// # Errors
    ///
    /// Returns an error if the current working directory cannot be
    /// determined.
    pub fn with_current_dir(
        roots: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> io::Result<Self> {
        let mut environment = Self::new(roots);
        environment.push(env::current_dir()?);
        Ok(environment)
    }

    /// Appends a search root after the existing ones.
    pub fn push(&mut self, root: impl Into<PathBuf>) {
        self.paths.push(root.into());
    }

    /// The search roots, in search order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Whether the environment has no search roots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn roots_keep_insertion_order() {
        let mut environment = Environment::new(["lib", "vendor"]);
        environment.push("extra");

        let paths: Vec<_> = environment.paths().iter().map(PathBuf::as_path).collect();
        assert_eq!(
            paths,
            [Path::new("lib"), Path::new("vendor"), Path::new("extra")]
        );
    }

    #[test]
    fn with_current_dir_appends_cwd_last() {
        let environment = Environment::with_current_dir(["lib"]).unwrap();
        assert_eq!(environment.paths().len(), 2);
        assert_eq!(environment.paths()[0], Path::new("lib"));
        assert_eq!(environment.paths()[1], env::current_dir().unwrap());
    }

    #[test]
    fn default_environment_is_empty() {
        assert!(Environment::default().is_empty());
    }
}
