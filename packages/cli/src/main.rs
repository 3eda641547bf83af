mod client;
mod config;
mod render;
mod shell;
mod store;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::Language;
use tracing::Level;
use workspace_core::api::{JudgeService, ProblemCatalog};
use workspace_core::{KeyValueStore, ProblemWorkspace, SplitLayout};

use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::store::FileStore;

#[derive(Parser)]
#[command(
    name = "localcode",
    about = "Terminal client for the LocalCode coding-practice platform",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive problem workspace
    Problem {
        /// Problem ID
        id: i32,
        /// Editor language
        #[arg(long, default_value = "java")]
        language: Language,
        /// Workspace tab to open (description, solutions, submissions)
        #[arg(long)]
        tab: Option<String>,
    },
    /// Run the saved draft against the sample test cases
    Run {
        /// Problem ID
        id: i32,
        /// Editor language
        #[arg(long, default_value = "java")]
        language: Language,
        /// Read code from a file instead of the saved draft
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Submit the saved draft for full evaluation
    Submit {
        /// Problem ID
        id: i32,
        /// Editor language
        #[arg(long, default_value = "java")]
        language: Language,
        /// Read code from a file instead of the saved draft
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Inspect or clear locally saved drafts
    Drafts {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Inspect or adjust the stored description/editor split
    Layout {
        #[command(subcommand)]
        command: LayoutCommands,
    },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Print the saved draft for a problem/language pair
    Show {
        id: i32,
        #[arg(long, default_value = "java")]
        language: Language,
    },
    /// Delete the saved draft for a problem/language pair
    Clear {
        id: i32,
        #[arg(long, default_value = "java")]
        language: Language,
    },
}

#[derive(Subcommand)]
enum LayoutCommands {
    /// Print the stored split for a problem
    Show { id: i32 },
    /// Set the description pane width (20-80, clamped)
    Set { id: i32, left: f64 },
    /// Forget the stored split for a problem
    Reset { id: i32 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Keep the interactive output clean; failures still reach the terminal.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(Level::WARN)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load config")?;

    let api = Arc::new(ApiClient::new(&config.server)?);
    let judge: Arc<dyn JudgeService> = api.clone();
    let catalog: Arc<dyn ProblemCatalog> = api;
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(storage_path(&config)?));

    match cli.command {
        Commands::Problem { id, language, tab } => {
            shell::problem_shell(judge, catalog, store, id, language, tab).await?;
        }
        Commands::Run { id, language, file } => {
            execute(judge, catalog, store, id, language, file, Flow::Run).await?;
        }
        Commands::Submit { id, language, file } => {
            execute(judge, catalog, store, id, language, file, Flow::Submit).await?;
        }
        Commands::Drafts { command } => drafts(store, command),
        Commands::Layout { command } => layout(store, command),
    }

    Ok(())
}

fn storage_path(config: &AppConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = &config.storage.path {
        return Ok(path.clone());
    }
    let base = dirs::data_dir().context("Could not determine the platform data directory")?;
    Ok(base.join("localcode").join("storage.json"))
}

enum Flow {
    Run,
    Submit,
}

/// One-shot run/submit against the saved draft (or an explicit file).
async fn execute(
    judge: Arc<dyn JudgeService>,
    catalog: Arc<dyn ProblemCatalog>,
    store: Arc<dyn KeyValueStore>,
    id: i32,
    language: Language,
    file: Option<PathBuf>,
    flow: Flow,
) -> anyhow::Result<()> {
    let mut workspace = ProblemWorkspace::open(judge, catalog, store, id, language).await?;
    if let Some(path) = file {
        let code = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        workspace.set_code(code);
    }

    let attempt = match flow {
        Flow::Run => workspace.run().await,
        Flow::Submit => workspace.submit().await,
    };

    match attempt {
        Ok(_) => {
            render::outcomes(&workspace.outcomes());
            if let Some(submission) = workspace.submission() {
                render::submission(&submission);
            }
            if let Some(error) = workspace.last_error() {
                render::error_banner(&error);
            }
        }
        Err(error) => render::validation(&error),
    }
    Ok(())
}

fn drafts(store: Arc<dyn KeyValueStore>, command: DraftCommands) {
    let drafts = workspace_core::draft::DraftStore::new(store);
    match command {
        DraftCommands::Show { id, language } => match drafts.load(id, language) {
            Some(code) => println!("{code}"),
            None => println!("No draft saved for problem {id} ({language})"),
        },
        DraftCommands::Clear { id, language } => {
            drafts.clear(id, language);
            println!("Cleared draft for problem {id} ({language})");
        }
    }
}

fn layout(store: Arc<dyn KeyValueStore>, command: LayoutCommands) {
    let layout = SplitLayout::new(store);
    match command {
        LayoutCommands::Show { id } => {
            let sizes = layout.load(id);
            println!("{:.0} / {:.0}", sizes[0], sizes[1]);
        }
        LayoutCommands::Set { id, left } => {
            let applied = layout.on_drag_end(id, [left, 100.0 - left]);
            println!("{:.0} / {:.0}", applied[0], applied[1]);
        }
        LayoutCommands::Reset { id } => {
            layout.reset(id);
            println!("Reset split for problem {id}");
        }
    }
}
