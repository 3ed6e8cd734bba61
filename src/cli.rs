//! Command line interface for blend.

use std::path::{Path, PathBuf};

mod list;
mod merge;
mod terminal;

use blend::Config;
use clap::ArgAction;
use list::List;
use merge::Merge;
use tracing::instrument;

/// Top-level CLI arguments.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the project root
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// Runs the selected subcommand, defaulting to `merge`.
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Merge(Merge::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
enum Command {
    /// Merge entry files into the output directory (default)
    Merge(Merge),

    /// List discoverable resources and their base names
    List(List),

    /// Initialize a blend.toml configuration file
    Init,
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Merge(command) => command.run(&root)?,
            Self::List(command) => command.run(&root)?,
            Self::Init => Init::run(&root)?,
        }
        Ok(())
    }
}

struct Init;

impl Init {
    #[instrument]
    fn run(root: &Path) -> anyhow::Result<()> {
        let config_path = root.join(Config::FILE_NAME);
        if config_path.exists() {
            anyhow::bail!(
                "Project already initialized (found existing {})",
                Config::FILE_NAME
            );
        }

        let config = Config::default();
        config
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", Config::FILE_NAME))?;

        println!("Initialized blend project in {}", root.display());
        println!("  Created: {}", Config::FILE_NAME);
        println!();
        println!("Next steps:");
        println!("  blend merge app.js");

        Ok(())
    }
}

/// Loads `blend.toml` from the project root, falling back to defaults when
/// the file is missing or unreadable.
fn load_config(root: &Path) -> Config {
    let path = root.join(Config::FILE_NAME);
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}
