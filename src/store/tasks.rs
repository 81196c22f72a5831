//! Task, points and completion log persistence

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::{Category, Difficulty, Repeat, Task};
use crate::engine::activity::CompletionEntry;
use crate::engine::calendar::{format_date, parse_date};
use crate::engine::state::LifeState;

/// Raw task row before the text columns are parsed
struct TaskRow {
    id: String,
    title: String,
    category: String,
    difficulty: String,
    repeat_mode: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    specific_date: Option<String>,
    completed: bool,
    last_completed_date: Option<String>,
    created_at: String,
}

fn optional_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|s| parse_date(&s).ok())
}

impl TaskRow {
    fn into_task(self) -> Result<Task> {
        let category: Category = self
            .category
            .parse()
            .with_context(|| format!("Task {} has a bad category", self.id))?;
        let difficulty: Difficulty = self
            .difficulty
            .parse()
            .with_context(|| format!("Task {} has a bad difficulty", self.id))?;
        let created_at = parse_date(&self.created_at)
            .with_context(|| format!("Task {} has a bad creation date", self.id))?;

        Ok(Task {
            id: self.id,
            title: self.title,
            category,
            difficulty,
            repeat: self.repeat_mode.as_deref().and_then(Repeat::parse),
            start_date: optional_date(self.start_date),
            end_date: optional_date(self.end_date),
            specific_date: optional_date(self.specific_date),
            completed: self.completed,
            last_completed_date: optional_date(self.last_completed_date),
            created_at,
        })
    }
}

/// Load all tasks in display order
pub fn load_tasks(conn: &Connection) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, category, difficulty, repeat_mode, start_date, end_date,
                specific_date, completed, last_completed_date, created_at
         FROM tasks ORDER BY position",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TaskRow {
                id: row.get(0)?,
                title: row.get(1)?,
                category: row.get(2)?,
                difficulty: row.get(3)?,
                repeat_mode: row.get(4)?,
                start_date: row.get(5)?,
                end_date: row.get(6)?,
                specific_date: row.get(7)?,
                completed: row.get(8)?,
                last_completed_date: row.get(9)?,
                created_at: row.get(10)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter().map(TaskRow::into_task).collect()
}

pub fn load_points(conn: &Connection) -> Result<u32> {
    let points = conn
        .query_row("SELECT points FROM wallet WHERE id = 1", [], |r| r.get(0))
        .optional()?;
    Ok(points.unwrap_or(0))
}

/// Load tasks and the points balance together
pub fn load_state(conn: &Connection) -> Result<LifeState> {
    Ok(LifeState::new(load_tasks(conn)?, load_points(conn)?))
}

/// Replace all stored tasks and the balance with `state`
pub fn save_state(conn: &Connection, state: &LifeState) -> Result<()> {
    conn.execute("DELETE FROM tasks", [])?;

    let mut stmt = conn.prepare(
        "INSERT INTO tasks (id, position, title, category, difficulty, repeat_mode, start_date,
                            end_date, specific_date, completed, last_completed_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )?;
    for (position, task) in state.tasks.iter().enumerate() {
        stmt.execute(params![
            task.id,
            position as i64,
            task.title,
            task.category.as_str(),
            task.difficulty.as_str(),
            task.repeat.map(|r| r.as_str()),
            task.start_date.map(format_date),
            task.end_date.map(format_date),
            task.specific_date.map(format_date),
            task.completed,
            task.last_completed_date.map(format_date),
            format_date(task.created_at),
        ])?;
    }

    conn.execute(
        "INSERT INTO wallet (id, points) VALUES (1, ?1)
         ON CONFLICT(id) DO UPDATE SET points = excluded.points",
        [state.points],
    )?;
    Ok(())
}

pub fn insert_completion(conn: &Connection, entry: &CompletionEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO completions (task_id, category, exp, day) VALUES (?1, ?2, ?3, ?4)",
        params![
            entry.task_id,
            entry.category.as_str(),
            entry.exp,
            format_date(entry.day)
        ],
    )?;
    Ok(())
}

/// Drop the latest completion of `task_id` on `day`. Returns false if there was none.
pub fn remove_completion(conn: &Connection, task_id: &str, day: NaiveDate) -> Result<bool> {
    let removed = conn.execute(
        "DELETE FROM completions WHERE id = (
            SELECT id FROM completions WHERE task_id = ?1 AND day = ?2
            ORDER BY id DESC LIMIT 1
         )",
        params![task_id, format_date(day)],
    )?;
    Ok(removed > 0)
}

/// The whole completion log, oldest first
pub fn load_completions(conn: &Connection) -> Result<Vec<CompletionEntry>> {
    let mut stmt =
        conn.prepare("SELECT task_id, category, exp, day FROM completions ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(task_id, category, exp, day)| {
            Ok(CompletionEntry {
                category: category
                    .parse()
                    .with_context(|| format!("Completion of {task_id} has a bad category"))?,
                day: parse_date(&day)
                    .with_context(|| format!("Completion of {task_id} has a bad day"))?,
                task_id,
                exp,
            })
        })
        .collect()
}
