use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI commands
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    Text,
    #[default]
    Json,
}

#[derive(Parser)]
#[command(name = "memory-bridge")]
#[command(version, about = "Memory Bridge - rolling per-project session memory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (defaults to ~/.claude/memory-bridge.db)
    #[arg(long, global = true, env = "MEMORY_BRIDGE_DB")]
    pub db_path: Option<PathBuf>,

    /// Config file path (defaults to ~/.claude/memory-bridge.json)
    #[arg(long, global = true, env = "MEMORY_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sessions kept per project
    #[arg(long, global = true)]
    pub window: Option<usize>,

    /// Sessions returned when loading
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save the current session (hook request on stdin)
    Save,

    /// Print previous-session context for the host (hook request on stdin)
    Load,

    /// Show stored sessions for a project
    Recent {
        /// Project path (defaults to the current directory)
        #[arg(long)]
        project: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// List projects with stored sessions
    Projects,
}
