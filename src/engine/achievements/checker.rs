//! Achievement checking logic
//!
//! Pure functions over aggregate counters. Each returns the ids that are
//! newly earned, skipping anything already in `unlocked`.

use super::definitions::{Achievement, AchievementId};
use crate::domain::Category;

/// Aggregate counters the checkers look at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub total_completions: u32,
    /// Completions per category
    pub category_counts: Vec<(Category, u32)>,
    pub level: u32,
    pub daily_streak: u32,
    /// Lines completed on the current bingo card
    pub bingo_lines: usize,
    pub lottery_spins: u32,
    pub wishes_completed: u32,
}

fn is_unlocked(id: AchievementId, unlocked: &[String]) -> bool {
    unlocked.iter().any(|u| u == id.as_str())
}

/// Ids from `candidates` whose target is reached by `value`
fn reached(value: u64, candidates: &[AchievementId], unlocked: &[String]) -> Vec<AchievementId> {
    candidates
        .iter()
        .copied()
        .filter(|&id| value >= u64::from(Achievement::get(id).target))
        .filter(|&id| !is_unlocked(id, unlocked))
        .collect()
}

/// Check milestone achievements based on total completions
pub fn check_milestone_achievements(total: u32, unlocked: &[String]) -> Vec<AchievementId> {
    reached(
        u64::from(total),
        &[
            AchievementId::FirstTask,
            AchievementId::TenTasks,
            AchievementId::FiftyTasks,
            AchievementId::Century,
            AchievementId::FiveHundred,
        ],
        unlocked,
    )
}

/// Check specialist and all-rounder
pub fn check_category_achievements(
    category_counts: &[(Category, u32)],
    unlocked: &[String],
) -> Vec<AchievementId> {
    let mut newly_unlocked = Vec::new();

    let best = category_counts.iter().map(|(_, n)| *n).max().unwrap_or(0);
    newly_unlocked.extend(reached(u64::from(best), &[AchievementId::Specialist], unlocked));

    let covered = Category::ALL
        .iter()
        .filter(|c| category_counts.iter().any(|(cat, n)| cat == *c && *n > 0))
        .count();
    newly_unlocked.extend(reached(covered as u64, &[AchievementId::AllRounder], unlocked));

    newly_unlocked
}

/// Check level achievements
pub fn check_level_achievements(level: u32, unlocked: &[String]) -> Vec<AchievementId> {
    reached(
        u64::from(level),
        &[AchievementId::Level5, AchievementId::Level10, AchievementId::Level20],
        unlocked,
    )
}

/// Check daily streak achievements
pub fn check_streak_achievements(streak: u32, unlocked: &[String]) -> Vec<AchievementId> {
    reached(
        u64::from(streak),
        &[AchievementId::Streak3, AchievementId::Streak7, AchievementId::Streak30],
        unlocked,
    )
}

/// Check bingo achievements against the current card's line count
pub fn check_bingo_achievements(lines: usize, unlocked: &[String]) -> Vec<AchievementId> {
    reached(
        lines as u64,
        &[AchievementId::FirstLine, AchievementId::FullCard],
        unlocked,
    )
}

/// Check lottery and wish achievements
pub fn check_reward_achievements(
    spins: u32,
    wishes_completed: u32,
    unlocked: &[String],
) -> Vec<AchievementId> {
    let mut newly_unlocked = reached(u64::from(spins), &[AchievementId::FirstSpin], unlocked);
    newly_unlocked.extend(reached(
        u64::from(wishes_completed),
        &[AchievementId::DreamComeTrue],
        unlocked,
    ));
    newly_unlocked
}

/// Run every checker
pub fn check_all(progress: &Progress, unlocked: &[String]) -> Vec<AchievementId> {
    let mut newly_unlocked = check_milestone_achievements(progress.total_completions, unlocked);
    newly_unlocked.extend(check_category_achievements(&progress.category_counts, unlocked));
    newly_unlocked.extend(check_level_achievements(progress.level, unlocked));
    newly_unlocked.extend(check_streak_achievements(progress.daily_streak, unlocked));
    newly_unlocked.extend(check_bingo_achievements(progress.bingo_lines, unlocked));
    newly_unlocked.extend(check_reward_achievements(
        progress.lottery_spins,
        progress.wishes_completed,
        unlocked,
    ));
    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[AchievementId]) -> Vec<String> {
        list.iter().map(|id| id.as_str().to_string()).collect()
    }

    #[test]
    fn test_milestones_respect_unlocked() {
        assert!(check_milestone_achievements(0, &[]).is_empty());
        assert_eq!(
            check_milestone_achievements(12, &[]),
            vec![AchievementId::FirstTask, AchievementId::TenTasks]
        );
        let unlocked = ids(&[AchievementId::FirstTask]);
        assert_eq!(
            check_milestone_achievements(12, &unlocked),
            vec![AchievementId::TenTasks]
        );
    }

    #[test]
    fn test_category_achievements() {
        let mut counts: Vec<(Category, u32)> = Category::ALL.iter().map(|c| (*c, 0)).collect();
        counts[0].1 = 25;
        assert_eq!(
            check_category_achievements(&counts, &[]),
            vec![AchievementId::Specialist]
        );

        for entry in counts.iter_mut() {
            entry.1 = entry.1.max(1);
        }
        let unlocked = ids(&[AchievementId::Specialist]);
        assert_eq!(
            check_category_achievements(&counts, &unlocked),
            vec![AchievementId::AllRounder]
        );
    }

    #[test]
    fn test_check_all_collects_every_group() {
        let progress = Progress {
            total_completions: 1,
            category_counts: vec![(Category::Skill, 1)],
            level: 5,
            daily_streak: 3,
            bingo_lines: 12,
            lottery_spins: 1,
            wishes_completed: 1,
        };
        let found = check_all(&progress, &[]);
        for id in [
            AchievementId::FirstTask,
            AchievementId::Level5,
            AchievementId::Streak3,
            AchievementId::FirstLine,
            AchievementId::FullCard,
            AchievementId::FirstSpin,
            AchievementId::DreamComeTrue,
        ] {
            assert!(found.contains(&id), "missing {:?}", id);
        }
        assert!(!found.contains(&AchievementId::AllRounder));
        assert!(!found.contains(&AchievementId::Level10));

        assert!(check_all(&progress, &ids(&found)).is_empty());
    }
}
