use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use blend::{Environment, Resource, ResourceKind};
use clap::Parser;
use tracing::instrument;

use crate::cli::terminal::Colorize;

/// Command arguments for `blend merge`.
#[derive(Debug, Default, Parser)]
#[command(about = "Merge entry files into the output directory")]
pub struct Merge {
    /// Entry files to merge. With no arguments, every JavaScript and CSS
    /// file directly inside the project root is merged.
    files: Vec<PathBuf>,

    /// Override the configured output directory.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl Merge {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = super::load_config(root);
        let environment = config.environment(root);
        let output_dir = self
            .output
            .unwrap_or_else(|| root.join(&config.output_dir));

        let entries = if self.files.is_empty() {
            default_entries(root)?
        } else {
            self.files
        };
        if entries.is_empty() {
            anyhow::bail!("no JavaScript or CSS files to merge in {}", root.display());
        }

        let mut failures = 0usize;
        for entry in &entries {
            match merge_entry(entry, &environment, &output_dir) {
                Ok(output) => {
                    println!(
                        "{} {}",
                        format!("merged {}", entry.display()).success(),
                        format!("-> {}", output.display()).dim()
                    );
                }
                Err(e) => {
                    eprintln!("{}", format!("failed {}: {e:#}", entry.display()).warning());
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            anyhow::bail!("{failures} of {} file(s) failed to merge", entries.len());
        }
        Ok(())
    }
}

fn merge_entry(
    entry: &Path,
    environment: &Environment,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let resource =
        Resource::new(entry).with_context(|| format!("cannot open {}", entry.display()))?;
    let file_name = entry
        .file_name()
        .with_context(|| format!("{} has no file name", entry.display()))?;
    let output = output_dir.join(file_name);

    resource
        .merge_requirements_from_environment(environment, &output)
        .with_context(|| format!("cannot merge {}", entry.display()))?;

    Ok(output)
}

/// Collects the JavaScript and CSS files directly inside `root`, sorted by
/// path. Subdirectories are search territory, not entry points.
fn default_entries(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    let dir = fs::read_dir(root).with_context(|| format!("cannot read {}", root.display()))?;

    for entry in dir {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .unwrap_or_default();
        if ResourceKind::from_extension(&extension) != ResourceKind::Unknown {
            entries.push(path);
        }
    }

    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn default_entries_pick_up_top_level_assets_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.js"), "").unwrap();
        fs::write(tmp.path().join("a.css"), "").unwrap();
        fs::write(tmp.path().join("index.html"), "").unwrap();
        fs::create_dir(tmp.path().join("lib")).unwrap();
        fs::write(tmp.path().join("lib/nested.js"), "").unwrap();

        let entries = default_entries(tmp.path()).unwrap();

        assert_eq!(
            entries,
            [tmp.path().join("a.css"), tmp.path().join("b.js")]
        );
    }

    #[test]
    fn merge_entry_writes_into_the_output_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("app.js"), "//= require <util>").unwrap();
        fs::write(tmp.path().join("util.js"), "u();").unwrap();

        let environment = Environment::new([tmp.path()]);
        let output = merge_entry(
            &tmp.path().join("app.js"),
            &environment,
            &tmp.path().join("output"),
        )
        .unwrap();

        assert_eq!(output, tmp.path().join("output/app.js"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "u();");
    }

    #[test]
    fn command_merges_default_entries_against_the_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("app.js"), "//= require <util>").unwrap();
        fs::create_dir(tmp.path().join("lib")).unwrap();
        fs::write(tmp.path().join("lib/util.js"), "u();").unwrap();

        let command = Merge::default();
        command.run(tmp.path()).unwrap();

        let merged = fs::read_to_string(tmp.path().join("output/app.js")).unwrap();
        assert_eq!(merged, "u();");
    }
}
