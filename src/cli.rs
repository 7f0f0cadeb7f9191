//! Command line definitions.

use crate::logging::LogTarget;
use clap::{Parser, Subcommand};

/// Task tracking HTTP backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Address to listen on (overrides config)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Keep tasks in an in-memory database instead of a file
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: LogTarget,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server (default if no subcommand given)
    Serve,

    /// Create or migrate the database file, then exit
    InitDb,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["task-store"]).unwrap();
        assert_eq!(cli.log, LogTarget::Stderr);
        assert!(cli.command.is_none());
        assert!(!cli.in_memory);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "task-store",
            "serve",
            "--port",
            "9000",
            "--database",
            "/tmp/t.db",
            "--log",
            "off",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Command::Serve));
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.database.as_deref(), Some("/tmp/t.db"));
        assert_eq!(cli.log, LogTarget::Off);
    }

    #[test]
    fn test_init_db_subcommand() {
        let cli = Cli::try_parse_from(["task-store", "init-db"]).unwrap();
        assert_eq!(cli.command, Some(Command::InitDb));
    }
}
