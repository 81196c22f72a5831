//! Configuration loading and management

mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{Prize, default_prize_pool};
use crate::engine::bingo::{CELL_COUNT, default_labels};

/// Points one lottery spin costs unless configured otherwise
pub const DEFAULT_DRAW_COST: u32 = 20;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Lottery prize pool, drawn by relative weight
    #[serde(default = "default_prize_pool")]
    pub prize: Vec<Prize>,

    /// Bingo card settings
    #[serde(default)]
    pub bingo: BingoSettings,
}

/// General settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Where the database lives. Defaults to `~/.lifequest`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Points spent per lottery spin
    #[serde(default = "default_draw_cost")]
    pub draw_cost: u32,
}

fn default_draw_cost() -> u32 {
    DEFAULT_DRAW_COST
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            draw_cost: DEFAULT_DRAW_COST,
        }
    }
}

/// Bingo card settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BingoSettings {
    /// Labels for a new card, row by row. Empty means the built-in set.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            prize: default_prize_pool(),
            bingo: BingoSettings::default(),
        }
    }
}

impl Config {
    /// Labels for a new bingo card.
    ///
    /// Falls back to the built-in labels when none are configured or the
    /// configured list does not have exactly 25 entries.
    pub fn bingo_labels(&self) -> Vec<String> {
        if self.bingo.labels.len() == CELL_COUNT {
            return self.bingo.labels.clone();
        }
        if !self.bingo.labels.is_empty() {
            tracing::warn!(
                "Ignoring {} configured bingo labels, exactly {} are needed",
                self.bingo.labels.len(),
                CELL_COUNT
            );
        }
        default_labels()
    }

    /// Data directory: explicit override, then the config, then `~/.lifequest`
    pub fn data_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.settings.data_dir.clone())
            .unwrap_or_else(Self::global_config_dir)
    }
}
