//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_dir, global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Rows {
            file,
            toggle,
            expand_all,
            reveal,
        }) => _rows(&container, file.as_deref(), toggle, *expand_all, reveal.as_deref()),
        Some(Commands::Tree { file }) => _tree(&container, file.as_deref()),
        Some(Commands::Leaves { file }) => _leaves(&container, file.as_deref()),
        Some(Commands::Config { command }) => _config(&container, cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `treeflat --help`".to_string(),
        )),
    }
}

fn forest_path(container: &ServiceContainer, file: Option<&Path>) -> CliResult<PathBuf> {
    Ok(container.outline.resolve_forest_path(file)?)
}

#[instrument(skip(container))]
fn _rows(
    container: &ServiceContainer,
    file: Option<&Path>,
    toggles: &[usize],
    expand_all: bool,
    reveal: Option<&str>,
) -> CliResult<()> {
    let path = forest_path(container, file)?;
    let mut projector = container.outline.open(&path)?;

    if expand_all {
        projector.expand_all();
    }
    if let Some(id) = reveal {
        let flat_index = projector.reveal(id).map_err(|e| {
            CliError::InvalidArgs(format!("--reveal {id}: {e}"))
        })?;
        debug!("revealed {} at row {}", id, flat_index);
    }
    container.outline.apply_toggles(&mut projector, toggles)?;

    if projector.is_empty() {
        output::warning(&format!("{} has no nodes", path.display()));
        return Ok(());
    }
    for (index, view) in container.outline.row_views(&projector).iter().enumerate() {
        output::row(index, view);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let path = forest_path(container, file)?;
    let forest = container.outline.load_forest(&path)?;
    output::header(&path.display());
    for tree in forest.to_tree_strings() {
        output::info(&tree);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _leaves(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let path = forest_path(container, file)?;
    let forest = container.outline.load_forest(&path)?;
    output::info(&forest.leaf_nodes().iter().join("\n"));
    Ok(())
}

fn _config(container: &ServiceContainer, cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            output::info(&format!("global: {global}"));
            if let Some(explicit) = &cli.config {
                output::info(&format!("explicit: {}", explicit.display()));
            }
        }
        ConfigCommands::Init { force } => {
            let (dir, path) = global_config_dir()
                .zip(global_config_path())
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                )));
            }
            container
                .fs
                .create_dir_all(&dir)
                .map_err(|e| InfraError::io(format!("create {}", dir.display()), e))?;
            container
                .fs
                .write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}
