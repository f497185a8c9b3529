//! ShelfTrack interactive inventory menu.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Open the database once and hand it to the inventory service.
//! - Drive the text menu over stdin/stdout.

use anyhow::Context;
use clap::Parser;
use log::info;
use shelftrack_core::db::open_db;
use shelftrack_core::{
    core_version, default_log_level, init_logging, seed_sample_data, InventoryService,
    SqliteRecordStore,
};
use std::io;
use std::path::PathBuf;

mod input;
mod menu;

/// Book and author inventory manager backed by SQLite.
#[derive(Debug, Parser)]
#[command(name = "shelftrack", version, about)]
struct Cli {
    /// SQLite database file; created when missing.
    #[arg(long, env = "SHELFTRACK_DB", default_value = "ebookstore.db")]
    db: PathBuf,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long, env = "SHELFTRACK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "SHELFTRACK_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Insert the sample catalogue when the database is empty.
    #[arg(long, env = "SHELFTRACK_SEED")]
    seed: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_ref() {
        let log_dir = std::path::absolute(log_dir)
            .with_context(|| format!("cannot resolve log directory `{}`", log_dir.display()))?;
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir).map_err(anyhow::Error::msg)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={} db={}",
        core_version(),
        cli.db.display()
    );

    let conn = open_db(&cli.db)
        .with_context(|| format!("cannot open database `{}`", cli.db.display()))?;
    let store = SqliteRecordStore::try_new(&conn).context("database is not ready")?;
    let service = InventoryService::new(store);

    if cli.seed && seed_sample_data(&service).context("cannot seed sample data")? {
        println!("Sample authors and books added\n");
    }

    let stdin = io::stdin();
    let console = input::Console::new(stdin.lock(), io::stdout());
    menu::Menu::new(service, console).run()
}
