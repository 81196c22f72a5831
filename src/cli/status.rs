//! Status command implementation

use anyhow::Result;

use super::CliContext;

const BAR_WIDTH: usize = 20;

fn progress_bar(fraction: f32) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * BAR_WIDTH as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Show the player's progress
pub fn status_command(ctx: &CliContext, json: bool) -> Result<()> {
    let tracker = ctx.open_tracker()?;
    let status = tracker.status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let player = &status.player;
    println!("Level {} {}", player.level, player.title);
    println!(
        "  EXP {} {} ({} to next level)",
        player.total_exp,
        progress_bar(player.progress_to_next()),
        player.exp_to_next
    );
    println!(
        "  Points {} (spin costs {}), free draws {}",
        status.points, status.draw_cost, status.extra_draws
    );
    println!(
        "  Today {}/{} done, streak {} day(s)",
        status.done_today, status.due_today, status.streak
    );
    println!(
        "  Achievements {}/{}",
        status.achievements_unlocked, status.achievements_total
    );

    println!("\nLast {} days:", status.activity.len());
    for (day, count) in &status.activity {
        println!("  {} {:>3} {}", day.format("%a %m-%d"), count, "*".repeat(*count as usize));
    }

    println!("\nBy life area:");
    for (category, count) in &status.category_totals {
        println!("  {:<12} {}", category.label(), count);
    }

    Ok(())
}
