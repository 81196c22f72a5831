//! Wish list commands

use anyhow::Result;

use lifequest::domain::WishStatus;

use super::{CliContext, print_events, short_id};
use crate::commands::WishCommands;

pub fn wish_command(ctx: &CliContext, command: WishCommands) -> Result<()> {
    let tracker = ctx.open_tracker()?;

    match command {
        WishCommands::Add { title } => {
            let wish = tracker.add_wish(&title)?;
            println!("Added wish {}: {}", short_id(&wish.id), wish.title);
        }
        WishCommands::List { json } => {
            let wishes = tracker.wishes()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&wishes)?);
                return Ok(());
            }
            if wishes.is_empty() {
                println!("No wishes yet.");
                return Ok(());
            }
            println!("Wishes ({}):\n", wishes.len());
            for wish in &wishes {
                let mark = match wish.status {
                    WishStatus::Pending => " ",
                    WishStatus::InProgress => "~",
                    WishStatus::Completed => "x",
                };
                println!("  [{}] {} {} ({})", mark, short_id(&wish.id), wish.title, wish.status);
            }
        }
        WishCommands::Status { id, status } => {
            let (wish, events) = tracker.set_wish_status(&id, status)?;
            println!("\"{}\" is now {}", wish.title, wish.status);
            print_events(&events);
        }
        WishCommands::Delete { id } => {
            tracker.delete_wish(&id)?;
            println!("Deleted wish");
        }
    }

    Ok(())
}
