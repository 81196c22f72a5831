//! Init command implementation

use anyhow::Result;
use tracing::info;

use lifequest::config::Config;

use super::CliContext;

/// Write the default config (unless present) and create the database
pub fn init_command(ctx: &CliContext, force: bool) -> Result<()> {
    let config_path = ctx
        .config_path
        .clone()
        .unwrap_or_else(Config::global_config_path);

    if Config::write_default(&config_path, force)? {
        println!("Created {}", config_path.display());
    } else {
        println!(
            "Config already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }

    let tracker = ctx.open_tracker()?;
    let board = tracker.board()?;
    info!(month = %board.month, "database ready");

    println!();
    println!("Next steps:");
    println!("  lifequest task add \"Morning run\" -c fitness -d medium -r daily");
    println!("  lifequest task today");
    println!("  lifequest status");
    Ok(())
}
