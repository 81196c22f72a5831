//! Completion log aggregation
//!
//! Every completion is logged with its day and category. Un-completing a task
//! by hand removes that day's entry again; the daily reset does not.

use std::collections::{BTreeMap, HashSet};

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::{Category, TaskId};

/// One logged completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionEntry {
    pub task_id: TaskId,
    pub category: Category,
    pub day: NaiveDate,
    pub exp: u32,
}

/// Completions per day for the `days` days ending at `today`, oldest first.
///
/// Days without activity are present with a zero count.
pub fn daily_counts(log: &[CompletionEntry], today: NaiveDate, days: u32) -> Vec<(NaiveDate, u32)> {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for offset in 0..days {
        if let Some(day) = today.checked_sub_days(Days::new(u64::from(offset))) {
            counts.insert(day, 0);
        }
    }
    for entry in log {
        if let Some(count) = counts.get_mut(&entry.day) {
            *count += 1;
        }
    }
    counts.into_iter().collect()
}

/// Total completions per category, in [`Category::ALL`] order
pub fn category_totals(log: &[CompletionEntry]) -> Vec<(Category, u32)> {
    Category::ALL
        .iter()
        .map(|&category| {
            let count = log.iter().filter(|e| e.category == category).count() as u32;
            (category, count)
        })
        .collect()
}

/// Consecutive active days ending today, or yesterday if nothing happened yet today
pub fn current_streak(log: &[CompletionEntry], today: NaiveDate) -> u32 {
    let active: HashSet<NaiveDate> = log.iter().map(|e| e.day).collect();

    let mut day = if active.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if active.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while active.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
