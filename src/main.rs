use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use typeblock::index::BlockDiagnostic;
use typeblock::model::Point;
use typeblock::panel::{HeadlessUi, InputUpdate, UiRuntime, WorkspaceHost};
use typeblock::{PanelConfig, PanelController, Workspace};

#[derive(Parser, Debug)]
#[command(author, version, about = "Query type-block suggestions and matches for a workspace", long_about = None)]
struct Cli {
    /// Workspace JSON file (`{"blocks": [...]}`)
    #[arg(value_name = "WORKSPACE_JSON")]
    workspace: Utf8PathBuf,

    /// Text typed into the panel
    #[arg(value_name = "QUERY")]
    query: String,

    /// Panel configuration (.json or .toml)
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Step to the next match this many times
    #[arg(long, default_value_t = 0)]
    next: usize,

    /// Step to the previous match this many times (after --next)
    #[arg(long, default_value_t = 0)]
    previous: usize,
}

#[derive(Serialize)]
struct Report {
    #[serde(flatten)]
    update: InputUpdate,
    /// Scroll targets visited by --next/--previous, in order.
    visited: Vec<Point>,
    cursor: usize,
    skipped: Vec<BlockDiagnostic>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let workspace = Workspace::load(&cli.workspace)
        .with_context(|| format!("Failed to load workspace {}", cli.workspace))?;
    let config = match &cli.config {
        Some(path) => PanelConfig::load(path).with_context(|| format!("Failed to load config {}", path))?,
        None => PanelConfig::default(),
    };

    let input_id = config.elements.input_text.clone();
    let mut host = WorkspaceHost::new(workspace);
    let mut panel = PanelController::new(config, HeadlessUi::new())?;
    panel.show(&host).context("Failed to build the option index")?;

    panel.ui_mut().set_text(&input_id, &cli.query);
    let update = panel.on_input_changed(&mut host)?;

    let mut visited = Vec::new();
    for _ in 0..cli.next {
        visited.extend(panel.next(&mut host));
    }
    for _ in 0..cli.previous {
        visited.extend(panel.previous(&mut host));
    }

    let report = Report {
        update,
        visited,
        cursor: panel.navigator().cursor(),
        skipped: panel.diagnostics().to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
