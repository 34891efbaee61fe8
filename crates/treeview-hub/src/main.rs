mod embedded;
mod host;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use treeview_core::{ConfigProvider, Environment, PageTreeProvider, PreferenceStore, db};
use treeview_panel::{
    CommandOutcome, PanelController, TreeViewCommand, VisibilityState, dispatch, resolve_position,
};

use host::{HostPaths, LocalHost};

/// Drive the tree view panel from the command line.
///
/// Panels are written as HTML files under `<data-dir>/panels/`.
#[derive(Parser, Debug)]
#[command(name = "treeview", version)]
struct Cli {
    /// Config file (default: <config dir>/treeview.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory for preferences and rendered panels
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Plugin root to load assets from instead of the bundled ones
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Page tree JSON (default: <data-dir>/tree.json)
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Simulated viewport width in pixels
    #[arg(long)]
    viewport_width: Option<u32>,

    /// Behave like a headless server host
    #[arg(long)]
    server: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Show the tree if hidden, hide it if shown
    Toggle,
    /// Show (or re-render) the tree
    Show,
    /// Hide the tree
    Hide,
    /// Show the tree only if it was left open
    ShowIfEnabled,
    /// Print preference, rendered panel and resolved position
    Status,
    /// Read commands from stdin (toggle, invoke <function>, resize <px>, status, help, quit)
    Session,
}

impl Command {
    fn tree_view_command(self) -> Option<TreeViewCommand> {
        match self {
            Command::Toggle => Some(TreeViewCommand::Toggle),
            Command::Show => Some(TreeViewCommand::Show),
            Command::Hide => Some(TreeViewCommand::Hide),
            Command::ShowIfEnabled => Some(TreeViewCommand::ShowIfEnabled),
            Command::Status | Command::Session => None,
        }
    }
}

fn resolve_paths(cli: &Cli) -> Result<HostPaths> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => db::data_dir()?,
    };
    let config_file = match &cli.config {
        Some(file) => file.clone(),
        None => db::project_dirs()?.config_dir().join("treeview.toml"),
    };
    let custom_styles_file = config_file
        .parent()
        .map(|dir| dir.join("custom.css"))
        .context("Config path has no parent directory")?;
    let tree_file = cli
        .tree
        .clone()
        .unwrap_or_else(|| data_dir.join("tree.json"));

    Ok(HostPaths {
        data_dir,
        config_file,
        custom_styles_file,
        tree_file,
        assets_dir: cli.assets.clone(),
    })
}

pub(crate) fn print_outcome(outcome: &CommandOutcome) {
    match outcome.position() {
        Some(position) => println!("tree view shown ({position})"),
        None => println!("tree view hidden"),
    }
}

pub(crate) async fn print_status(controller: &PanelController<LocalHost>) -> Result<()> {
    let host = controller.host();
    let config = host.plug_config().await?;
    let tree = host.page_tree(&config).await?;
    let enabled = host.is_tree_view_enabled().await?;
    let resolved = resolve_position(&config, host.viewport_width());

    println!("enabled:   {enabled}");
    match controller.current_position() {
        Some(position) => println!("rendered:  {position}"),
        None => println!("rendered:  none"),
    }
    println!("resolves:  {resolved}");
    println!("pages:     {}", tree.page_count());
    println!("panels:    {}", host.paths().panels_dir().display());
    if let Some(current) = tree.current_page.as_deref() {
        let title = tree.find(current).map_or(current, |n| n.title.as_str());
        println!("current:   {title}");
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let paths = resolve_paths(&cli)?;
    let host = LocalHost::open(paths, cli.server, cli.viewport_width)?;

    // Each invocation is a new process; the panel file on disk is what is shown.
    let state = host
        .rendered_position()
        .map(VisibilityState::shown_at)
        .unwrap_or_default();
    let mut controller = PanelController::with_state(host, state);

    match cli.command.tree_view_command() {
        Some(command) => {
            let outcome = dispatch(&mut controller, command).await?;
            // A suppressed hook failure was already logged.
            if !matches!(&outcome, CommandOutcome::Hook(hook) if hook.is_suppressed()) {
                print_outcome(&outcome);
            }
            Ok(())
        }
        None if cli.command == Command::Session => session::run(&mut controller).await,
        None => print_status(&controller).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
