//! Lottery commands

use anyhow::Result;
use chrono::{DateTime, Local};

use lifequest::domain::{DrawSource, LotteryRecord, PrizeKind};
use lifequest::engine::lottery::probabilities;

use super::{CliContext, print_events, short_id};
use crate::commands::LotteryCommands;

fn format_time(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn print_record(record: &LotteryRecord) {
    let ticket = match (record.kind, record.used) {
        (PrizeKind::WishTicket, true) => " (used)",
        (PrizeKind::WishTicket, false) => " (unused ticket)",
        (PrizeKind::Item, _) => "",
    };
    let source = match record.source {
        DrawSource::Points => "points",
        DrawSource::BonusDraw => "free draw",
    };
    println!(
        "  {} {} {}{} [{}]",
        short_id(&record.id),
        format_time(record.drawn_at),
        record.prize,
        ticket,
        source
    );
}

pub fn lottery_command(ctx: &CliContext, command: LotteryCommands) -> Result<()> {
    let tracker = ctx.open_tracker()?;

    match command {
        LotteryCommands::Spin => {
            let outcome = tracker.spin()?;
            println!("You won: {}", outcome.record.prize);
            if outcome.record.kind == PrizeKind::WishTicket {
                println!(
                    "  Redeem it with: lifequest lottery use {}",
                    short_id(&outcome.record.id)
                );
            }
            println!(
                "  Points {}, free draws left {}",
                outcome.points, outcome.extra_draws
            );
            print_events(&outcome.events);
        }
        LotteryCommands::History { json, limit } => {
            let mut records = tracker.lottery_history()?;
            if let Some(n) = limit {
                records.truncate(n);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }
            if records.is_empty() {
                println!("No spins yet.");
                return Ok(());
            }
            println!("Lottery history ({}):\n", records.len());
            for record in &records {
                print_record(record);
            }
        }
        LotteryCommands::Use { id } => {
            let record = tracker.use_ticket(&id)?;
            println!("Used \"{}\". Time to make a wish come true!", record.prize);
        }
        LotteryCommands::Prizes => {
            let pool = &tracker.config().prize;
            println!(
                "Prize pool ({} entries, {} points per spin):\n",
                pool.len(),
                tracker.config().settings.draw_cost
            );
            for (prize, p) in pool.iter().zip(probabilities(pool)) {
                println!("  {:>5.1}%  {}", p * 100.0, prize.name);
            }
        }
    }

    Ok(())
}
