use std::{fs, io, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::Environment;

/// Project configuration, stored as `blend.toml` next to the sources.
///
/// Everything has a sensible default so a project without a configuration
/// file still works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra directories searched when resolving requirements, in order.
    pub search_paths: Vec<PathBuf>,

    /// Directory merged output files are written to.
    pub output_dir: PathBuf,

    /// Whether the working directory is appended as the last search root.
    pub include_cwd: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            output_dir: PathBuf::from("output"),
            include_cwd: true,
        }
    }
}

/// Error returned when the configuration cannot be loaded or saved.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access configuration file")]
    Io(#[from] io::Error),
    /// The file exists but is not valid TOML for this configuration.
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialised.
    #[error("failed to serialise configuration")]
    Serialise(#[from] toml::ser::Error),
}

impl Config {
    /// The configuration file name looked up in a project root.
    pub const FILE_NAME: &'static str = "blend.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content
    /// is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialised or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Builds the search environment described by this configuration,
    /// rooted at `root`.
    ///
    /// Relative search paths are resolved against `root`; `root` itself is
    /// appended as the final search root when `include_cwd` is set.
    #[must_use]
    pub fn environment(&self, root: &Path) -> Environment {
        let mut environment = Environment::new(self.search_paths.iter().map(|p| root.join(p)));
        if self.include_cwd {
            environment.push(root);
        }
        environment
    }
}
