use std::path::Path;

use blend::{Environment, Resource, ResourceKind};
use clap::{Parser, ValueEnum};
use tracing::instrument;

use crate::cli::terminal::Colorize;

/// Command arguments for `blend list`.
#[derive(Debug, Parser)]
#[command(about = "List discoverable resources and their base names")]
pub struct List {
    /// Resource kind to list (default: both)
    #[arg(long, value_enum)]
    kind: Option<KindArg>,
}

/// Resource kinds selectable on the command line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum KindArg {
    Js,
    Css,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Js => Self::Javascript,
            KindArg::Css => Self::Css,
        }
    }
}

impl List {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = super::load_config(root);
        let environment = config.environment(root);

        let kinds: Vec<ResourceKind> = self.kind.map_or_else(
            || vec![ResourceKind::Javascript, ResourceKind::Css],
            |kind| vec![kind.into()],
        );

        for kind in kinds {
            print_kind(kind, &environment)?;
        }

        Ok(())
    }
}

fn print_kind(kind: ResourceKind, environment: &Environment) -> anyhow::Result<()> {
    let Some(resources) = Resource::find_all_of_kind(kind, environment)? else {
        println!("{}", format!("no {kind} resources found").dim());
        return Ok(());
    };

    println!("{kind} ({}):", resources.len());
    for resource in resources {
        let path = resource.path().display().to_string().dim();
        match resource.requirements().map_or(0, <[_]>::len) {
            0 => println!("  {}  {path}", resource.base_name()),
            n => println!("  {}  {path}  [{n} requirement(s)]", resource.base_name()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_argument_maps_to_resource_kind() {
        assert_eq!(ResourceKind::from(KindArg::Js), ResourceKind::Javascript);
        assert_eq!(ResourceKind::from(KindArg::Css), ResourceKind::Css);
    }
}
