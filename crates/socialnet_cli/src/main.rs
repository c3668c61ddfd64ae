//! `socialnet` interactive entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the selected backend.
//! - Hand stdin/stdout to the menu loop.

mod config;
mod menu;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{Backend, CliConfig};
use log::info;
use menu::Menu;
use socialnet_core::{init_logging, MemoryStore, SocialService, SqliteStore, Store};
use std::io;

fn main() -> Result<()> {
    let config = CliConfig::parse();

    let log_dir = config
        .resolved_log_dir()
        .context("failed to resolve log directory")?;
    init_logging(config.log_level(), &log_dir.to_string_lossy()).map_err(|err| anyhow!(err))?;

    match config.backend {
        Backend::Memory => run_session(SocialService::new(MemoryStore::new())),
        Backend::Sqlite => {
            let store = SqliteStore::open(&config.db_path).with_context(|| {
                format!("failed to open database `{}`", config.db_path.display())
            })?;
            run_session(SocialService::new(store))
        }
    }
}

fn run_session<S: Store>(mut service: SocialService<S>) -> Result<()> {
    info!(
        "event=session_start module=cli status=ok backend={} version={}",
        service.backend_name(),
        socialnet_core::core_version()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut service, stdin.lock(), stdout.lock()).run()?;

    info!("event=session_end module=cli status=ok");
    Ok(())
}
