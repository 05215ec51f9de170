mod app;
mod commands;
mod event;
mod theme;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ratatui::DefaultTerminal;
use tracing::info;

use app::App;
use roster_core::services::{
    AdminGate, GateTimings, InstantPacer, Pacer, RosterService, ThreadRandom, TokioPacer,
};
use roster_infrastructure::JsonFileStore;
use roster_shared::telemetry::{init_telemetry, LogSink};
use roster_shared::AppConfig;

#[derive(Parser)]
#[command(name = "roster", version)]
#[command(about = "Participant registration and random group assignment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the persisted roster (overrides config)
    #[arg(long, env = "ROSTER_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Admin passcode for groups, export, config updates and clear
    #[arg(long, global = true)]
    passcode: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (Terminal User Interface) - Default
    Tui,
    /// Register a participant and print the assigned group
    Register {
        name: String,
    },
    /// Print participants partitioned into groups
    Groups,
    /// Export the roster as CSV
    Export {
        /// Output file (defaults to the configured export file name)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,
        /// Write to stdout instead of a file
        #[arg(long)]
        stdout: bool,
    },
    /// Show or update group configuration
    Config {
        #[arg(long)]
        expected: Option<u32>,
        #[arg(long)]
        group_size: Option<u32>,
    },
    /// Remove every registration, keeping configuration
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }

    let command = cli.command.unwrap_or(Commands::Tui);
    let sink = match command {
        Commands::Tui => LogSink::File,
        _ => LogSink::FileAndStderr,
    };
    init_telemetry(&config.logging, sink)?;
    info!("Using data directory {}", config.storage.data_dir.display());

    let store = Arc::new(JsonFileStore::from_settings(&config.storage));
    let gate = AdminGate::new(
        config.admin.passcode.clone(),
        GateTimings {
            check: config.pacing.gate_check(),
            granted: config.pacing.gate_granted(),
            denied: config.pacing.gate_denied(),
        },
    );

    match command {
        Commands::Tui => {
            color_eyre::install().ok();
            let pacer = Arc::new(TokioPacer);
            let roster = RosterService::open(store, ThreadRandom, pacer.clone())
                .await?
                .with_registration_pause(config.pacing.registration());
            let app = App::new(roster, gate, pacer, PathBuf::from(&config.export.file_name));
            start_tui(app).await
        }
        command => run_command(command, &config, store, &gate, cli.passcode.as_deref()).await,
    }
}

async fn run_command(
    command: Commands,
    config: &AppConfig,
    store: Arc<JsonFileStore>,
    gate: &AdminGate,
    passcode: Option<&str>,
) -> anyhow::Result<()> {
    // One-shot commands skip the UX pauses
    let mut roster = RosterService::open(store, ThreadRandom, Arc::new(InstantPacer)).await?;
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Tui => {}
        Commands::Register { name } => commands::register(&mut roster, &name, &mut out).await?,
        Commands::Groups => {
            commands::authorize(gate, passcode)?;
            commands::groups(&roster, &mut out)?;
        }
        Commands::Export { output, stdout } => {
            commands::authorize(gate, passcode)?;
            let path = match (stdout, output) {
                (true, _) => None,
                (false, Some(path)) => Some(path),
                (false, None) => Some(PathBuf::from(&config.export.file_name)),
            };
            commands::export(&roster, path.as_deref(), &mut out).await?;
        }
        Commands::Config { expected, group_size } => {
            if expected.is_some() || group_size.is_some() {
                commands::authorize(gate, passcode)?;
            }
            commands::config(&mut roster, expected, group_size, &mut out).await?;
        }
        Commands::Clear { yes } => {
            commands::authorize(gate, passcode)?;
            commands::clear(&mut roster, yes, &mut out).await?;
        }
    }

    Ok(())
}

async fn start_tui<P: Pacer>(
    app: App<JsonFileStore, ThreadRandom, P>,
) -> anyhow::Result<()> {
    // Initialize terminal (ratatui::init handles raw mode + alternate screen)
    let terminal = ratatui::init();

    // Run app
    let result = run_app(terminal, app).await;

    // Restore terminal (always, even on error)
    ratatui::restore();

    result
}

async fn run_app<P: Pacer>(
    mut terminal: DefaultTerminal,
    mut app: App<JsonFileStore, ThreadRandom, P>,
) -> anyhow::Result<()> {
    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Paced work runs after the frame showing its in-progress state
        if app.pending.is_some() {
            app.run_pending().await?;
            continue;
        }

        // Poll events (non-blocking with 100ms timeout)
        if let Some(evt) = event::poll_event(100)? {
            event::handle_event(&mut app, evt).await?;
        }
    }
    Ok(())
}
