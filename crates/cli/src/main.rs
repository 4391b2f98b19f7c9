mod config;
mod error;

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use runtime::{NONCE_SLOT, NONCE_SLOT_LABEL};
use storage::{Event, EventKind, GUARD_SLOT, GUARD_SLOT_LABEL, SlotStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use error::{Error, Result};

const CONFIG_FILE: &str = "guardctl.toml";

#[derive(Parser)]
#[command(name = "guardctl")]
#[command(about = "Inspect the guard of a multi-party account", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Override the database path from the configuration
    #[arg(short, long)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active guard and account nonce
    Status,
    /// Show the account event log
    Events {
        /// Filter by event kind (changed_guard, execution_success, ...)
        #[arg(short, long)]
        kind: Option<String>,
        /// Show only the last N events
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show the guard history
    History,
    /// Show the raw storage slots used by the account
    Slots,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guardctl=info,registry=info,runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;
    if let Some(database) = cli.database {
        config.database = database;
    }

    match cli.command {
        Some(Commands::Status) | None => cmd_status(&config),
        Some(Commands::Events { kind, limit }) => cmd_events(&config, kind.as_deref(), limit),
        Some(Commands::History) => cmd_events(&config, Some("changed_guard"), usize::MAX),
        Some(Commands::Slots) => cmd_slots(&config),
    }
}

fn cmd_status(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let guard = store.read_slot(*GUARD_SLOT)?.to_address();
    let nonce = store.read_slot(*NONCE_SLOT)?.to_u64();

    println!("Account: {}", config.account.address);
    match guard {
        Some(address) => println!("Guard:   {address}"),
        None => println!("Guard:   disabled"),
    }
    println!("Nonce:   {nonce}");
    if !config.account.modules.is_empty() {
        println!("Modules:");
        for module in &config.account.modules {
            println!("  {module}");
        }
    }
    Ok(())
}

fn cmd_events(config: &Config, kind: Option<&str>, limit: usize) -> Result<()> {
    let store = open_store(config)?;
    let events = store.load_events(kind)?;

    if events.is_empty() {
        println!("No events found.");
        return Ok(());
    }

    let skip = events.len().saturating_sub(limit);
    for event in events.iter().skip(skip) {
        print_event(event);
    }
    Ok(())
}

fn cmd_slots(config: &Config) -> Result<()> {
    let store = open_store(config)?;

    println!("{:<28}  {:<66}  VALUE", "LABEL", "KEY");
    println!("{}", "-".repeat(164));
    for (label, key) in [(GUARD_SLOT_LABEL, *GUARD_SLOT), (NONCE_SLOT_LABEL, *NONCE_SLOT)] {
        println!(
            "{:<28}  {:<66}  {}",
            label,
            key.to_string(),
            store.read_slot(key)?
        );
    }
    Ok(())
}

fn print_event(event: &Event) {
    let time = event.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");

    match &event.kind {
        EventKind::ChangedGuard { guard: Some(guard) } => {
            println!("[{time}] GUARD SET: {guard}");
        }
        EventKind::ChangedGuard { guard: None } => {
            println!("[{time}] GUARD DISABLED");
        }
        EventKind::ExecutionSuccess { tx_hash } => {
            println!("[{time}] EXECUTED: {tx_hash}");
        }
        EventKind::ExecutionFailure { tx_hash, reason } => {
            println!("[{time}] FAILED: {tx_hash} ({reason})");
        }
        EventKind::ExecutionFromModuleSuccess { module } => {
            println!("[{time}] MODULE EXECUTED: {module}");
        }
        EventKind::ExecutionFromModuleFailure { module, reason } => {
            println!("[{time}] MODULE FAILED: {module} ({reason})");
        }
    }
}

fn open_store(config: &Config) -> Result<SlotStore> {
    if !config.database.exists() {
        return Err(Error::DatabaseNotFound {
            path: config.database.clone(),
        });
    }
    tracing::debug!(path = %config.database.display(), "opening account database");
    Ok(SlotStore::open(&config.database)?)
}
