//! Achievement badges
//!
//! Definitions and pure unlock checks. Persisting unlocks is the tracker's job.

mod checker;
mod definitions;

pub use checker::{
    Progress, check_all, check_bingo_achievements, check_category_achievements,
    check_level_achievements, check_milestone_achievements, check_reward_achievements,
    check_streak_achievements,
};
pub use definitions::{ACHIEVEMENTS, Achievement, AchievementCategory, AchievementId};
