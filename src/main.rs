// Memory Bridge - hook entry point
// Always exits successfully: memory is best-effort and must never block the host.

mod cli;

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use memory_bridge::models::hook::HookInput;
use memory_bridge::models::settings::BridgeConfig;
use memory_bridge::services::memory::{format_context, ContextOptions};
use memory_bridge::storage::config::ConfigService;
use memory_bridge::utils::paths;
use memory_bridge::HookRunner;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    // stdout carries host payloads, so logs go to stderr
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("MEMORY_BRIDGE_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli) {
        tracing::warn!("[MemoryBridge] Error: {:#}", e);
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    let runner = HookRunner::new(load_config(&cli)?, resolve_db_path(&cli)?);

    match cli.command {
        Commands::Save => {
            let input = read_hook_input();
            runner.save(&input).into_completed();
        }
        Commands::Load => {
            let input = read_hook_input();
            if let Some(Some(output)) = runner.load(&input).into_completed() {
                println!("{}", serde_json::to_string(&output)?);
            }
        }
        Commands::Recent { project, format } => {
            if let Some(sessions) = runner.recent(project.as_deref()).into_completed() {
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sessions)?),
                    OutputFormat::Text => println!(
                        "{}",
                        format_context(&sessions, &ContextOptions::from(runner.config()))
                    ),
                }
                tracing::info!("[MemoryBridge] Retrieved {} session(s)", sessions.len());
            }
        }
        Commands::Projects => {
            if let Some(projects) = runner.projects().into_completed() {
                for project in projects {
                    println!("{}", project);
                }
            }
        }
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn load_config(cli: &Cli) -> Result<BridgeConfig> {
    let loaded = match &cli.config {
        Some(path) => ConfigService::load_from(path),
        None => ConfigService::load(),
    };
    let mut config = match loaded {
        Ok(service) => service.into_config(),
        Err(e) => {
            tracing::warn!("[MemoryBridge] {}; using default settings", e);
            BridgeConfig::default()
        }
    };

    if let Some(window) = cli.window {
        config.window_size = window;
    }
    if let Some(limit) = cli.limit {
        config.query_limit = limit;
    }
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid command-line settings")?;
    Ok(config)
}

fn resolve_db_path(cli: &Cli) -> Result<std::path::PathBuf> {
    match &cli.db_path {
        Some(path) => Ok(paths::absolutize(path)?),
        None => Ok(paths::database_path()?),
    }
}

/// Hook request from stdin; unreadable or malformed input degrades to defaults.
fn read_hook_input() -> HookInput {
    let mut raw = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut raw) {
        tracing::warn!("[MemoryBridge] Could not read stdin: {}", e);
        return HookInput::default();
    }
    HookInput::parse(&raw).unwrap_or_else(|e| {
        tracing::warn!("[MemoryBridge] Malformed hook input: {}", e);
        HookInput::default()
    })
}
