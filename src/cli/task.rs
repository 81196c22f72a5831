//! Task commands

use anyhow::Result;
use chrono::{Months, NaiveDate};

use lifequest::domain::{Category, Difficulty, Repeat, Task, TaskDraft};
use lifequest::engine::calendar::{format_date, parse_date};
use lifequest::engine::state::TaskEvent;

use super::{CliContext, print_events, short_id};
use crate::commands::{TaskCommands, TaskFields};

/// How long a recurring task runs when no end date is given
const DEFAULT_WINDOW_MONTHS: u32 = 12;

fn parse_opt(value: Option<&str>) -> Result<Option<NaiveDate>> {
    Ok(value.map(parse_date).transpose()?)
}

/// Overlay command line options on `base`.
///
/// Dates the chosen mode needs but nobody gave are filled in: a recurring
/// task runs from today for a year, a one-off task is for today.
pub fn apply_fields(
    mut base: TaskDraft,
    fields: &TaskFields,
    today: NaiveDate,
) -> Result<TaskDraft> {
    if let Some(category) = fields.category {
        base.category = category;
    }
    if let Some(difficulty) = fields.difficulty {
        base.difficulty = difficulty;
    }
    if let Some(repeat) = fields.repeat {
        base.repeat = repeat;
    }
    if let Some(start) = parse_opt(fields.start.as_deref())? {
        base.start_date = Some(start);
    }
    if let Some(end) = parse_opt(fields.end.as_deref())? {
        base.end_date = Some(end);
    }
    if let Some(on) = parse_opt(fields.on.as_deref())? {
        base.specific_date = Some(on);
    }

    if base.repeat == Repeat::Once {
        if base.specific_date.is_none() {
            base.specific_date = Some(today);
        }
    } else {
        if base.start_date.is_none() {
            base.start_date = Some(today);
        }
        if base.end_date.is_none() {
            base.end_date = base
                .start_date
                .and_then(|start| start.checked_add_months(Months::new(DEFAULT_WINDOW_MONTHS)));
        }
    }
    Ok(base)
}

fn schedule(task: &Task) -> String {
    match (task.repeat, task.specific_date, task.start_date, task.end_date) {
        (Some(Repeat::Once), Some(day), _, _) => format!("once on {}", format_date(day)),
        (Some(repeat), _, Some(start), Some(end)) => {
            format!("{} {}..{}", repeat, format_date(start), format_date(end))
        }
        (Some(repeat), _, _, _) => repeat.to_string(),
        (None, _, _, _) => "unscheduled".to_string(),
    }
}

fn print_task(task: &Task) {
    println!(
        "  [{}] {} {} ({}, {}, +{} exp / +{} pts) - {}",
        if task.completed { "x" } else { " " },
        short_id(&task.id),
        task.title,
        task.category.label(),
        task.difficulty,
        task.exp(),
        task.points(),
        schedule(task)
    );
}

pub fn task_command(ctx: &CliContext, command: TaskCommands) -> Result<()> {
    let tracker = ctx.open_tracker()?;
    let today = tracker.today();

    match command {
        TaskCommands::Add { title, fields } => {
            let base = TaskDraft {
                title,
                category: Category::Habit,
                difficulty: Difficulty::Medium,
                repeat: Repeat::Daily,
                start_date: None,
                end_date: None,
                specific_date: None,
            };
            let draft = apply_fields(base, &fields, today)?;
            let task = tracker.add_task(draft)?;
            println!("Added task {}:", short_id(&task.id));
            print_task(&task);
        }
        TaskCommands::Edit { id, title, fields } => {
            let mut base = tracker.task(&id)?.to_draft();
            if let Some(title) = title {
                base.title = title;
            }
            let draft = apply_fields(base, &fields, today)?;
            let task = tracker.edit_task(&id, draft)?;
            println!("Updated task {}:", short_id(&task.id));
            print_task(&task);
        }
        TaskCommands::List { json, category } => {
            let tasks: Vec<Task> = tracker
                .tasks()?
                .into_iter()
                .filter(|t| category.is_none_or(|c| t.category == c))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
                return Ok(());
            }
            if tasks.is_empty() {
                println!("No tasks found.");
                return Ok(());
            }
            println!("Tasks ({}):\n", tasks.len());
            for task in &tasks {
                print_task(task);
            }
        }
        TaskCommands::Today { json } => {
            let due = tracker.due_today()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&due)?);
                return Ok(());
            }
            if due.is_empty() {
                println!("Nothing due today ({}).", format_date(today));
                return Ok(());
            }
            let done = due.iter().filter(|t| t.completed).count();
            println!("Due today ({}/{} done):\n", done, due.len());
            for task in &due {
                print_task(task);
            }
        }
        TaskCommands::Toggle { id } => {
            let outcome = tracker.toggle_task(&id)?;
            match outcome.event {
                TaskEvent::Completed { exp, points, .. } => println!(
                    "Completed \"{}\": +{} exp, +{} points (balance {})",
                    outcome.task.title, exp, points, outcome.points
                ),
                TaskEvent::Reopened { points_removed, .. } => println!(
                    "Reopened \"{}\": -{} points (balance {})",
                    outcome.task.title, points_removed, outcome.points
                ),
            }
            print_events(&outcome.events);
        }
        TaskCommands::Delete { id } => {
            let task = tracker.delete_task(&id)?;
            println!("Deleted task \"{}\"", task.title);
        }
    }

    Ok(())
}
