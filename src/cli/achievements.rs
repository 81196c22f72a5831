//! Achievements command

use anyhow::Result;

use lifequest::engine::achievements::AchievementCategory;
use lifequest::engine::calendar::local_date_of;

use super::CliContext;

const CATEGORY_ORDER: [AchievementCategory; 6] = [
    AchievementCategory::Milestone,
    AchievementCategory::Category,
    AchievementCategory::Level,
    AchievementCategory::Streak,
    AchievementCategory::Bingo,
    AchievementCategory::Reward,
];

pub fn achievements_command(ctx: &CliContext, unlocked_only: bool) -> Result<()> {
    let tracker = ctx.open_tracker()?;
    let all = tracker.achievements()?;
    let unlocked = all.iter().filter(|a| a.unlocked_at.is_some()).count();

    println!("Achievements ({}/{}):", unlocked, all.len());
    for category in CATEGORY_ORDER {
        let entries: Vec<_> = all
            .iter()
            .filter(|a| a.achievement.category == category)
            .filter(|a| !unlocked_only || a.unlocked_at.is_some())
            .collect();
        if entries.is_empty() {
            continue;
        }

        println!("\n{}", category.label());
        for entry in entries {
            let a = entry.achievement;
            match entry.unlocked_at {
                Some(at) => println!(
                    "  {} {} - {} (unlocked {})",
                    a.icon,
                    a.name,
                    a.description,
                    local_date_of(at)
                ),
                None => println!("  .. {} - {}", a.name, a.description),
            }
        }
    }

    Ok(())
}
