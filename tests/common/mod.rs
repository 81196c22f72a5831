//! Shared helpers for tracker integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use tempfile::TempDir;

use lifequest::config::Config;
use lifequest::domain::{Category, Difficulty, Repeat, TaskDraft};
use lifequest::store::Store;
use lifequest::tracker::Tracker;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Open a tracker on `day` over the database in `dir`
pub fn tracker_on(dir: &TempDir, day: &str) -> Tracker {
    tracker_with(dir, day, Config::default())
}

pub fn tracker_with(dir: &TempDir, day: &str, config: Config) -> Tracker {
    let store = Store::open_in_dir(dir.path()).expect("Failed to open store");
    Tracker::open_on(store, config, date(day)).expect("Failed to open tracker")
}

/// A task scheduled every day of 2024
pub fn daily(title: &str, difficulty: Difficulty) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        category: Category::Fitness,
        difficulty,
        repeat: Repeat::Daily,
        start_date: Some(date("2024-01-01")),
        end_date: Some(date("2024-12-31")),
        specific_date: None,
    }
}

/// A weekly task on the weekday of `start`
pub fn weekly(title: &str, start: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        category: Category::Social,
        difficulty: Difficulty::Medium,
        repeat: Repeat::Weekly,
        start_date: Some(date(start)),
        end_date: Some(date("2024-12-31")),
        specific_date: None,
    }
}
