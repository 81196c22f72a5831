//! Experience and level system
//!
//! Levels are a flat 1000 experience apart. Total experience is the sum of
//! the experience of every currently completed task.

use serde::Serialize;

use crate::domain::Task;

/// Experience needed per level
pub const EXP_PER_LEVEL: u32 = 1000;

/// Title bands (must be sorted by starting level)
static TITLES: &[(u32, &str)] = &[
    (1, "Novice"),
    (3, "Apprentice"),
    (5, "Adventurer"),
    (10, "Veteran"),
    (20, "Champion"),
    (50, "Legend"),
];

/// Level for the given total experience: `floor(exp / 1000) + 1`
pub fn level(total_exp: u32) -> u32 {
    total_exp / EXP_PER_LEVEL + 1
}

/// Experience still missing for the next level: `1000 - exp % 1000`
pub fn exp_to_next_level(total_exp: u32) -> u32 {
    EXP_PER_LEVEL - total_exp % EXP_PER_LEVEL
}

/// Title for a level
pub fn title_for(level: u32) -> &'static str {
    TITLES
        .iter()
        .rev()
        .find(|(min, _)| level >= *min)
        .map(|(_, title)| *title)
        .unwrap_or(TITLES[0].1)
}

/// Sum of experience over completed tasks
pub fn total_exp(tasks: &[Task]) -> u32 {
    tasks.iter().filter(|t| t.completed).map(Task::exp).sum()
}

/// Player progress derived from total experience
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub total_exp: u32,
    pub level: u32,
    pub title: &'static str,
    /// Experience earned inside the current level
    pub exp_in_level: u32,
    /// Experience missing for the next level
    pub exp_to_next: u32,
}

impl PlayerStats {
    pub fn new(total_exp: u32) -> Self {
        let level = level(total_exp);
        Self {
            total_exp,
            level,
            title: title_for(level),
            exp_in_level: total_exp % EXP_PER_LEVEL,
            exp_to_next: exp_to_next_level(total_exp),
        }
    }

    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self::new(total_exp(tasks))
    }

    /// Progress to next level (0.0 - 1.0)
    pub fn progress_to_next(&self) -> f32 {
        self.exp_in_level as f32 / EXP_PER_LEVEL as f32
    }
}
