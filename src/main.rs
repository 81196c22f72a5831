use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod cli;
mod commands;

use cli::CliContext;
use commands::Commands;

#[derive(Parser)]
#[command(name = "lifequest")]
#[command(about = "Gamify your life - tasks, levels, a prize lottery and monthly bingo")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.lifequest/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the database (overrides the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = CliContext {
        config_path: cli.config,
        data_dir: cli.data_dir,
    };

    match cli.command {
        Some(Commands::Init { force }) => cli::init::init_command(&ctx, force)?,
        Some(Commands::Status { json }) => cli::status::status_command(&ctx, json)?,
        Some(Commands::Task { command }) => cli::task::task_command(&ctx, command)?,
        Some(Commands::Lottery { command }) => cli::lottery::lottery_command(&ctx, command)?,
        Some(Commands::Wish { command }) => cli::wish::wish_command(&ctx, command)?,
        Some(Commands::Bingo { command }) => cli::bingo::bingo_command(&ctx, command)?,
        Some(Commands::Achievements { unlocked }) => {
            cli::achievements::achievements_command(&ctx, unlocked)?
        }
        // Default: show status
        None => cli::status::status_command(&ctx, false)?,
    }

    Ok(())
}
