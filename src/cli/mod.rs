//! CLI command implementations

pub mod achievements;
pub mod bingo;
pub mod init;
pub mod lottery;
pub mod status;
pub mod task;
pub mod wish;

use std::path::PathBuf;

use anyhow::{Context, Result};

use lifequest::config::Config;
use lifequest::store::Store;
use lifequest::tracker::{GamificationEvent, Tracker};

/// Global options every command needs
pub struct CliContext {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl CliContext {
    pub fn load_config(&self) -> Result<Config> {
        Config::load(self.config_path.as_deref())
    }

    /// Load config, open the database and run the day change bookkeeping
    pub fn open_tracker(&self) -> Result<Tracker> {
        let config = self.load_config()?;
        let data_dir = config.data_dir(self.data_dir.clone());
        let store = Store::open_in_dir(&data_dir)
            .with_context(|| format!("Failed to open data in {}", data_dir.display()))?;

        let mut tracker = Tracker::open(store, config)?;
        print_events(&tracker.take_startup_events());
        Ok(tracker)
    }
}

/// Print gamification events below a command's own output
pub fn print_events(events: &[GamificationEvent]) {
    for event in events {
        match event {
            GamificationEvent::AchievementUnlocked(a) => {
                println!("{} Achievement unlocked: {} - {}", a.icon, a.name, a.description);
            }
            GamificationEvent::LevelUp(up) => {
                println!(
                    "Level up! {} -> {} ({})",
                    up.old_level, up.new_level, up.new_title
                );
            }
            GamificationEvent::BingoLines {
                granted,
                total_lines,
            } => {
                println!(
                    "BINGO! +{} free draw(s), {} line(s) complete",
                    granted, total_lines
                );
            }
            GamificationEvent::DailyReset { tasks_reset } => {
                println!("New day: {} daily task(s) reopened", tasks_reset);
            }
            GamificationEvent::BingoRollover { month } => {
                println!("New bingo card for {}", month);
            }
        }
    }
}

/// First 8 characters of an id, for display
pub fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(i, _)| &id[..i])
}
