//! Command dispatch: one handler per subcommand

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{CareerExplorer, ClickOutcome};
use crate::cli::args::{Cli, Commands, ConfigCommands, Format};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::TreeRender;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Details, LayoutResult, TreeNode};
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { ids }) => cmd_tree(cli, *ids),
        Some(Commands::View { expand }) => cmd_view(cli, expand),
        Some(Commands::Layout { expand, format }) => cmd_layout(cli, expand, *format),
        Some(Commands::Scene { expand }) => cmd_scene(cli, expand),
        Some(Commands::Click { ids }) => cmd_click(cli, ids),
        Some(Commands::Details { id }) => cmd_details(cli, id),
        Some(Commands::Leaves) => cmd_leaves(cli),
        Some(Commands::Search { query }) => cmd_search(cli, query),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("get current directory", e).into()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = project_dir(cli)?;
    let mut settings = Settings::load(Some(&dir))?;
    if let Some(taxonomy) = &cli.taxonomy {
        settings.taxonomy = Some(taxonomy.clone());
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn explorer(cli: &Cli) -> CliResult<CareerExplorer> {
    let container = ServiceContainer::new(load_settings(cli)?);
    Ok(container.explorer()?)
}

/// Explorer with every node in `expand` revealed.
fn expanded_explorer(cli: &Cli, expand: &[String]) -> CliResult<CareerExplorer> {
    let mut explorer = explorer(cli)?;
    for id in expand {
        explorer.reveal(id)?;
    }
    Ok(explorer)
}

fn to_json<T: serde::Serialize>(what: &'static str, value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|source| InfraError::Json { what, source }.into())
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, ids: bool) -> CliResult<()> {
    let explorer = explorer(cli)?;
    output::info(&explorer.tree().to_full_tree(ids));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_view(cli: &Cli, expand: &[String]) -> CliResult<()> {
    let explorer = expanded_explorer(cli, expand)?;
    output::info(&explorer.tree().to_visible_tree(explorer.state()));
    let layout = explorer.layout();
    output::detail(&format!(
        "{} nodes visible, {} expanded",
        layout.nodes.len(),
        explorer.state().len()
    ));
    Ok(())
}

fn print_layout_table(layout: &LayoutResult) {
    output::header(&format!(
        "{:<48} {:>9} {:>9} {:>5}  flags",
        "id", "x", "y", "depth"
    ));
    for node in &layout.nodes {
        let flags = [
            (node.has_children, "children"),
            (node.expanded, "expanded"),
            (node.has_details, "details"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .join(",");
        output::info(&format!(
            "{:<48} {:>9.1} {:>9.1} {:>5}  {}",
            node.id, node.position.x, node.position.y, node.depth, flags
        ));
    }
    output::detail(&format!(
        "{} nodes, {} edges",
        layout.nodes.len(),
        layout.edges.len()
    ));
}

#[instrument(skip(cli))]
fn cmd_layout(cli: &Cli, expand: &[String], format: Format) -> CliResult<()> {
    let layout = expanded_explorer(cli, expand)?.layout();
    match format {
        Format::Table => print_layout_table(&layout),
        Format::Json => output::info(&to_json("layout", &layout)?),
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_scene(cli: &Cli, expand: &[String]) -> CliResult<()> {
    let scene = expanded_explorer(cli, expand)?.scene();
    output::info(&to_json("scene", &scene)?);
    Ok(())
}

fn print_details(node: &TreeNode, details: &Details) {
    output::header(&node.data.label);
    output::detail(&format!("Courses:    {}", details.courses.iter().join(", ")));
    output::detail(&format!("Scope:      {}", details.scope));
    output::detail(&format!("Duration:   {}", details.duration));
    output::detail(&format!("Avg salary: {}", details.avg_salary));
}

/// Click each id in order, printing the outcome; opened details are shown and closed again.
fn replay_clicks(explorer: &mut CareerExplorer, ids: &[String]) -> CliResult<()> {
    for id in ids {
        match explorer.click(id)? {
            ClickOutcome::Expanded(id) => output::action("expanded", &id),
            ClickOutcome::Collapsed { id, removed } => {
                output::action("collapsed", &format!("{} ({} ids closed)", id, removed))
            }
            ClickOutcome::DetailsOpened(_) => {
                if let Some((node, details)) = explorer.details() {
                    print_details(node, details);
                }
                explorer.close_details();
            }
            ClickOutcome::Ignored(id) => output::warning(&format!("{} has nothing to show", id)),
        }
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_click(cli: &Cli, ids: &[String]) -> CliResult<()> {
    let mut explorer = explorer(cli)?;
    replay_clicks(&mut explorer, ids)?;
    let layout = explorer.layout();
    output::success(&format!(
        "{} nodes, {} edges visible",
        layout.nodes.len(),
        layout.edges.len()
    ));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_details(cli: &Cli, id: &str) -> CliResult<()> {
    let explorer = explorer(cli)?;
    let node = explorer.node(id)?;
    match &node.data.details {
        Some(details) => {
            print_details(node, details);
            Ok(())
        }
        None => Err(CliError::InvalidArgs(format!("{} has no details", id))),
    }
}

#[instrument(skip(cli))]
fn cmd_leaves(cli: &Cli) -> CliResult<()> {
    let explorer = explorer(cli)?;
    for leaf in explorer.tree().leaf_nodes() {
        output::info(&format!("{}\t{}", leaf.data.id, leaf.data.label));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_search(cli: &Cli, query: &str) -> CliResult<()> {
    let explorer = explorer(cli)?;
    let hits = explorer.search(query);
    if hits.is_empty() {
        output::warning(&format!("no nodes match {:?}", query));
    }
    for node in hits {
        output::info(&format!("{}\t{}", node.data.id, node.data.label));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no global config directory on this platform"),
            }
            let local = local_config_path(&project_dir(cli)?);
            output::action("local", &local.display());
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no global config directory on this platform".to_string())
                })?
            } else {
                local_config_path(&project_dir(cli)?)
            };
            // Existing config layers may be invalid; init does not read them
            ServiceContainer::new(Settings::default()).init_config(&path)?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
