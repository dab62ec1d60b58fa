//! Command dispatch

use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{parse_records, NodePicker, RecordLoader};
use crate::application::{HierarchySession, TableRenderer, NO_DATA_MESSAGE};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::browse::run_browse;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Forest, TreeBuilder, Uid};
use crate::infrastructure::{RealFileSystem, SkimSelector};

const STDIN_MARKER: &str = "-";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = effective_settings(cli)?;
    if !settings.color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Show {
            file,
            expand_all,
            expand,
            remove,
        } => cmd_show(&settings, file, *expand_all, expand, remove),
        Commands::Browse { file } => cmd_browse(&settings, file),
        Commands::Tree { file } => cmd_tree(&settings, file),
        Commands::Ids { file } => cmd_ids(&settings, file),
        Commands::Pick { file } => cmd_pick(&settings, file),
        Commands::Config { command } => cmd_config(&settings, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Settings from file and environment, with command line flags on top.
fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.strict {
        settings.strict_groups = true;
    }
    if cli.no_color {
        settings.color = false;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Load the records and build the forest. `-` reads stdin.
#[instrument(skip(settings))]
fn load_forest(settings: &Settings, file: &Path) -> CliResult<Forest> {
    let records = if file.as_os_str() == STDIN_MARKER {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::io("read records from stdin", e))?;
        parse_records(&content)?
    } else {
        RecordLoader::new(Arc::new(RealFileSystem)).load(file)?
    };

    let forest = TreeBuilder::new(settings.group_policy()).build(&records)?;
    Ok(forest)
}

fn renderer(settings: &Settings) -> TableRenderer {
    TableRenderer::new(settings.indent, settings.color)
}

#[instrument(skip(settings))]
fn cmd_show(
    settings: &Settings,
    file: &Path,
    expand_all: bool,
    expand: &[Uid],
    remove: &[Uid],
) -> CliResult<()> {
    let forest = load_forest(settings, file)?;
    let mut session = HierarchySession::new(forest, settings.display_options());

    session.apply_flags(remove, expand_all, expand);

    let table = renderer(settings).render(&session.rows());
    output::info(table.trim_end_matches('\n'));
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_browse(settings: &Settings, file: &Path) -> CliResult<()> {
    if file.as_os_str() == STDIN_MARKER {
        return Err(CliError::InvalidArgs(
            "browse reads commands from stdin, records must come from a file".to_string(),
        ));
    }
    let forest = load_forest(settings, file)?;
    let mut session = HierarchySession::new(forest, settings.display_options());

    output::header("Hierarchy Table");
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_browse(&mut session, &renderer(settings), stdin.lock(), stdout.lock())
        .map_err(|e| CliError::io("interactive session", e))
}

#[instrument(skip(settings))]
fn cmd_tree(settings: &Settings, file: &Path) -> CliResult<()> {
    let forest = load_forest(settings, file)?;
    if forest.is_empty() {
        output::info(NO_DATA_MESSAGE);
        return Ok(());
    }
    for outline in forest.outlines(&settings.display_options()) {
        output::info(outline.to_string().trim_end());
    }
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_ids(settings: &Settings, file: &Path) -> CliResult<()> {
    let forest = load_forest(settings, file)?;
    let display = settings.display_options();
    for (depth, node) in &forest {
        output::info(&format!(
            "{}\t{}\t{}",
            node.uid,
            depth,
            display.title(&node.attributes)
        ));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_pick(settings: &Settings, file: &Path) -> CliResult<()> {
    if file.as_os_str() == STDIN_MARKER {
        return Err(CliError::InvalidArgs(
            "pick needs the terminal, records must come from a file".to_string(),
        ));
    }
    let forest = load_forest(settings, file)?;
    let display = settings.display_options();
    let picker = NodePicker::new(Arc::new(SkimSelector));

    let Some(uid) = picker.pick(&forest, &display)? else {
        output::warning("nothing selected");
        return Ok(());
    };
    let Some(node) = forest.find(uid) else {
        output::warning(&format!("node {} not found", uid));
        return Ok(());
    };

    output::header(&display.title(&node.attributes));
    output::action("id", &node.uid);
    if let Some(relation) = &node.relation {
        output::action("relation", relation);
    }
    output::action("children", &node.children.len());
    for (key, value) in display.cells(&node.attributes) {
        output::detail(&format!("{key}: {value}"));
    }
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(settings.to_toml()?.trim_end()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
        ConfigCommands::Init => output::info(Settings::template().trim_end()),
    }
    Ok(())
}
