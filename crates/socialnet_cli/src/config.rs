//! Command line and environment configuration.

use clap::{Parser, ValueEnum};
use socialnet_core::default_log_level;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "socialnet.db";
const DEFAULT_LOG_DIR: &str = "logs";

/// Storage backend behind the menu session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Records live only for the session.
    Memory,
    /// Records persist in a SQLite database file.
    Sqlite,
}

#[derive(Debug, Parser)]
#[command(name = "socialnet")]
#[command(about = "Manage user profiles and status updates from an interactive menu.")]
#[command(version)]
pub struct CliConfig {
    #[arg(
        long,
        value_enum,
        env = "SOCIALNET_BACKEND",
        default_value_t = Backend::Memory,
        help = "Storage backend"
    )]
    pub backend: Backend,

    #[arg(
        long,
        env = "SOCIALNET_DB_PATH",
        default_value = DEFAULT_DB_PATH,
        help = "SQLite database file (sqlite backend only)"
    )]
    pub db_path: PathBuf,

    #[arg(
        long,
        env = "SOCIALNET_LOG_LEVEL",
        help = "trace|debug|info|warn|error (default: debug in debug builds, info otherwise)"
    )]
    pub log_level: Option<String>,

    #[arg(
        long,
        env = "SOCIALNET_LOG_DIR",
        help = "Directory for rotated log files (default: ./logs)"
    )]
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Log directory made absolute against the current directory.
    pub fn resolved_log_dir(&self) -> std::io::Result<PathBuf> {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        if dir.is_absolute() {
            return Ok(dir);
        }
        Ok(std::env::current_dir()?.join(dir))
    }
}
