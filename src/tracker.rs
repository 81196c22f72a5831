//! Tracker - the host service around the game rules
//!
//! Loads state from the store, applies one mutation through the pure engine,
//! writes the result back in a single transaction and then checks
//! achievements. The daily reset and the bingo month rollover run when the
//! tracker is opened.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::Rng;
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{
    Category, DrawSource, LotteryRecord, Task, TaskDraft, Wish, WishStatus,
};
use crate::engine::achievements::{self, Achievement, AchievementId, Progress};
use crate::engine::activity::{self, CompletionEntry};
use crate::engine::bingo::BingoBoard;
use crate::engine::calendar;
use crate::engine::levels::PlayerStats;
use crate::engine::lottery;
use crate::engine::state::{LifeState, TaskEvent};
use crate::error::Error;
use crate::store::{Store, bingo, progress, rewards, tasks};

/// Days covered by the activity summary in [`Status`]
pub const ACTIVITY_DAYS: u32 = 7;

/// A level up event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    pub new_title: &'static str,
}

/// Things worth telling the player about after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GamificationEvent {
    AchievementUnlocked(&'static Achievement),
    LevelUp(LevelUp),
    /// Bingo lines completed by the last cell toggle
    BingoLines { granted: u32, total_lines: usize },
    DailyReset { tasks_reset: usize },
    BingoRollover { month: String },
}

/// Result of completing or reopening a task
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub task: Task,
    pub event: TaskEvent,
    pub points: u32,
    pub events: Vec<GamificationEvent>,
}

/// Result of a lottery spin
#[derive(Debug, Clone)]
pub struct SpinOutcome {
    pub record: LotteryRecord,
    pub points: u32,
    pub extra_draws: u32,
    pub events: Vec<GamificationEvent>,
}

/// Result of toggling a bingo cell
#[derive(Debug, Clone)]
pub struct MarkOutcome {
    pub board: BingoBoard,
    pub granted: u32,
    pub events: Vec<GamificationEvent>,
}

/// Snapshot for the status screen
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub today: NaiveDate,
    pub player: PlayerStats,
    pub points: u32,
    pub draw_cost: u32,
    pub extra_draws: u32,
    pub due_today: usize,
    pub done_today: usize,
    pub streak: u32,
    pub activity: Vec<(NaiveDate, u32)>,
    pub category_totals: Vec<(Category, u32)>,
    pub achievements_unlocked: usize,
    pub achievements_total: usize,
}

/// An achievement with its unlock time, if unlocked
#[derive(Debug, Clone)]
pub struct AchievementStatus {
    pub achievement: &'static Achievement,
    pub unlocked_at: Option<i64>,
}

/// Find an id by exact match or unique prefix
fn resolve_id<'a>(ids: impl IntoIterator<Item = &'a str>, query: &str) -> Option<String> {
    let mut matches = Vec::new();
    for id in ids {
        if id == query {
            return Some(id.to_string());
        }
        if !query.is_empty() && id.starts_with(query) {
            matches.push(id);
        }
    }
    match matches.as_slice() {
        [only] => Some(only.to_string()),
        _ => None,
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Main service for all player actions
pub struct Tracker {
    store: Store,
    config: Config,
    today: NaiveDate,
    /// Events raised while opening (daily reset, bingo rollover)
    startup_events: Vec<GamificationEvent>,
}

impl Tracker {
    /// Open the tracker for the current local date
    pub fn open(store: Store, config: Config) -> Result<Self> {
        Self::open_on(store, config, calendar::today())
    }

    /// Open the tracker as if `today` were the current date
    pub fn open_on(store: Store, config: Config, today: NaiveDate) -> Result<Self> {
        let mut tracker = Self {
            store,
            config,
            today,
            startup_events: Vec::new(),
        };
        tracker.startup_events = tracker.sync_day()?;
        Ok(tracker)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Events raised while opening, drained
    pub fn take_startup_events(&mut self) -> Vec<GamificationEvent> {
        std::mem::take(&mut self.startup_events)
    }

    /// Run the daily reset once per observed date change and roll the bingo
    /// card over when the month changed.
    fn sync_day(&self) -> Result<Vec<GamificationEvent>> {
        let today = self.today;
        let labels = self.config.bingo_labels();

        self.store.write(|conn| {
            let mut events = Vec::new();

            if progress::last_seen_day(conn)? != Some(today) {
                let mut state = tasks::load_state(conn)?;
                let reset = state.reset_daily_tasks(today);
                if reset > 0 {
                    tasks::save_state(conn, &state)?;
                    info!(tasks_reset = reset, %today, "daily reset");
                    events.push(GamificationEvent::DailyReset { tasks_reset: reset });
                }
                progress::set_last_seen_day(conn, today)?;
            }

            let month = calendar::month_key(today);
            match bingo::load_board(conn)? {
                None => {
                    let board = BingoBoard::new(month, labels)?;
                    bingo::save_board(conn, &board)?;
                    debug!(month = %board.month, "created bingo board");
                }
                Some(mut board) => {
                    if board.roll_over(&month) {
                        bingo::save_board(conn, &board)?;
                        info!(%month, "bingo board rolled over");
                        events.push(GamificationEvent::BingoRollover { month });
                    }
                }
            }

            Ok(events)
        })
    }

    // ========================================
    // TASKS
    // ========================================

    fn resolve_task(state: &LifeState, query: &str) -> Result<String, Error> {
        resolve_id(state.tasks.iter().map(|t| t.id.as_str()), query)
            .ok_or_else(|| Error::TaskNotFound(query.to_string()))
    }

    /// All tasks in display order
    pub fn tasks(&self) -> Result<Vec<Task>> {
        self.store.read(tasks::load_tasks)
    }

    /// One task by id or unique id prefix
    pub fn task(&self, id: &str) -> Result<Task> {
        let state = self.store.read(tasks::load_state)?;
        let id = Self::resolve_task(&state, id)?;
        state
            .task(&id)
            .cloned()
            .ok_or_else(|| Error::TaskNotFound(id).into())
    }

    /// Tasks due today
    pub fn due_today(&self) -> Result<Vec<Task>> {
        let state = self.store.read(tasks::load_state)?;
        Ok(state.due_today(self.today).into_iter().cloned().collect())
    }

    pub fn add_task(&self, draft: TaskDraft) -> Result<Task> {
        let today = self.today;
        let task = self.store.write(|conn| {
            let mut state = tasks::load_state(conn)?;
            let task = state.add_task(new_id(), draft, today)?.clone();
            tasks::save_state(conn, &state)?;
            Ok(task)
        })?;
        info!(task_id = %task.id, title = %task.title, "added task");
        Ok(task)
    }

    /// Edit a task. A completed task moves the balance by its points delta.
    pub fn edit_task(&self, id: &str, draft: TaskDraft) -> Result<Task> {
        let task = self.store.write(|conn| {
            let mut state = tasks::load_state(conn)?;
            let id = Self::resolve_task(&state, id)?;
            state.update_task(&id, draft)?;
            tasks::save_state(conn, &state)?;
            state
                .task(&id)
                .cloned()
                .ok_or_else(|| Error::TaskNotFound(id).into())
        })?;
        info!(task_id = %task.id, "edited task");
        Ok(task)
    }

    /// Complete a task, or reopen it if it is already completed
    pub fn toggle_task(&self, id: &str) -> Result<ToggleOutcome> {
        let today = self.today;
        let (task, event, points, old_stats, new_stats) = self.store.write(|conn| {
            let mut state = tasks::load_state(conn)?;
            let id = Self::resolve_task(&state, id)?;
            let old_stats = state.player_stats();
            let event = state.toggle_task(&id, today)?;

            match &event {
                TaskEvent::Completed {
                    task_id,
                    category,
                    exp,
                    day,
                    ..
                } => tasks::insert_completion(
                    conn,
                    &CompletionEntry {
                        task_id: task_id.clone(),
                        category: *category,
                        day: *day,
                        exp: *exp,
                    },
                )?,
                TaskEvent::Reopened { task_id, day, .. } => {
                    tasks::remove_completion(conn, task_id, *day)?;
                }
            }
            tasks::save_state(conn, &state)?;

            let task = state
                .task(&id)
                .cloned()
                .ok_or_else(|| Error::TaskNotFound(id.clone()))?;
            Ok((task, event, state.points, old_stats, state.player_stats()))
        })?;

        match &event {
            TaskEvent::Completed { points: gained, .. } => {
                info!(task_id = %task.id, points = gained, balance = points, "completed task")
            }
            TaskEvent::Reopened { points_removed, .. } => {
                info!(task_id = %task.id, points_removed, balance = points, "reopened task")
            }
        }

        let mut events = Vec::new();
        if new_stats.level > old_stats.level {
            events.push(GamificationEvent::LevelUp(LevelUp {
                old_level: old_stats.level,
                new_level: new_stats.level,
                new_title: new_stats.title,
            }));
        }
        events.extend(self.check_achievements()?);

        Ok(ToggleOutcome {
            task,
            event,
            points,
            events,
        })
    }

    /// Delete a task. A completed one takes its points with it.
    pub fn delete_task(&self, id: &str) -> Result<Task> {
        let task = self.store.write(|conn| {
            let mut state = tasks::load_state(conn)?;
            let id = Self::resolve_task(&state, id)?;
            let task = state.delete_task(&id)?;
            tasks::save_state(conn, &state)?;
            Ok(task)
        })?;
        info!(task_id = %task.id, "deleted task");
        Ok(task)
    }

    // ========================================
    // LOTTERY
    // ========================================

    /// Spin with the thread-local RNG
    pub fn spin(&self) -> Result<SpinOutcome> {
        self.spin_with(&mut rand::thread_rng())
    }

    /// Spin the lottery.
    ///
    /// Uses a bingo extra draw if one is available, otherwise spends
    /// `draw_cost` points. Nothing changes when the spin is rejected.
    pub fn spin_with<R: Rng>(&self, rng: &mut R) -> Result<SpinOutcome> {
        let draw_cost = self.config.settings.draw_cost;
        let pool = &self.config.prize;

        let (record, points, extra_draws) = self.store.write(|conn| {
            let mut state = tasks::load_state(conn)?;
            let mut board = self.current_board(conn)?;

            let source = if board.extra_draws > 0 {
                DrawSource::BonusDraw
            } else if state.points >= draw_cost {
                DrawSource::Points
            } else {
                return Err(Error::InsufficientPoints {
                    required: draw_cost,
                    available: state.points,
                }
                .into());
            };

            let prize = lottery::draw(pool, rng)?;

            match source {
                DrawSource::BonusDraw => {
                    board.take_extra_draw();
                    bingo::save_board(conn, &board)?;
                }
                DrawSource::Points => {
                    state.spend_points(draw_cost)?;
                    tasks::save_state(conn, &state)?;
                }
            }

            let record = LotteryRecord {
                id: new_id(),
                prize: prize.name.clone(),
                kind: prize.kind,
                source,
                drawn_at: calendar::now_ms(),
                used: false,
            };
            rewards::insert_record(conn, &record)?;
            Ok((record, state.points, board.extra_draws))
        })?;

        info!(
            prize = %record.prize,
            source = record.source.as_str(),
            balance = points,
            "lottery spin"
        );
        let events = self.check_achievements()?;
        Ok(SpinOutcome {
            record,
            points,
            extra_draws,
            events,
        })
    }

    /// Lottery history, newest first
    pub fn lottery_history(&self) -> Result<Vec<LotteryRecord>> {
        self.store.read(rewards::load_records)
    }

    /// Spend a wish ticket from the history
    pub fn use_ticket(&self, id: &str) -> Result<LotteryRecord> {
        let record = self.store.write(|conn| {
            let records = rewards::load_records(conn)?;
            let id = resolve_id(records.iter().map(|r| r.id.as_str()), id)
                .ok_or_else(|| Error::RecordNotFound(id.to_string()))?;
            let mut record = rewards::find_record(conn, &id)?
                .ok_or_else(|| Error::RecordNotFound(id.clone()))?;
            record.use_ticket()?;
            rewards::set_record_used(conn, &record.id, true)?;
            Ok(record)
        })?;
        info!(record_id = %record.id, "used wish ticket");
        Ok(record)
    }

    // ========================================
    // WISHES
    // ========================================

    fn resolve_wish(conn: &Connection, query: &str) -> Result<String> {
        let wishes = rewards::load_wishes(conn)?;
        resolve_id(wishes.iter().map(|w| w.id.as_str()), query)
            .ok_or_else(|| Error::WishNotFound(query.to_string()).into())
    }

    pub fn wishes(&self) -> Result<Vec<Wish>> {
        self.store.read(rewards::load_wishes)
    }

    pub fn add_wish(&self, title: &str) -> Result<Wish> {
        let wish = Wish::new(new_id(), title, self.today)?;
        self.store.write(|conn| rewards::insert_wish(conn, &wish))?;
        info!(wish_id = %wish.id, title = %wish.title, "added wish");
        Ok(wish)
    }

    /// Move a wish to any status
    pub fn set_wish_status(
        &self,
        id: &str,
        status: WishStatus,
    ) -> Result<(Wish, Vec<GamificationEvent>)> {
        let wish = self.store.write(|conn| {
            let id = Self::resolve_wish(conn, id)?;
            rewards::update_wish_status(conn, &id, status)?;
            rewards::load_wishes(conn)?
                .into_iter()
                .find(|w| w.id == id)
                .ok_or_else(|| Error::WishNotFound(id).into())
        })?;
        info!(wish_id = %wish.id, status = status.as_str(), "wish status changed");
        let events = self.check_achievements()?;
        Ok((wish, events))
    }

    pub fn delete_wish(&self, id: &str) -> Result<()> {
        let id = self.store.write(|conn| {
            let id = Self::resolve_wish(conn, id)?;
            rewards::delete_wish(conn, &id)?;
            Ok(id)
        })?;
        info!(wish_id = %id, "deleted wish");
        Ok(())
    }

    // ========================================
    // BINGO
    // ========================================

    /// Board for the current month, created if missing
    fn current_board(&self, conn: &Connection) -> Result<BingoBoard> {
        let month = calendar::month_key(self.today);
        let board = match bingo::load_board(conn)? {
            Some(mut board) => {
                board.roll_over(&month);
                board
            }
            None => BingoBoard::new(month, self.config.bingo_labels())?,
        };
        Ok(board)
    }

    pub fn board(&self) -> Result<BingoBoard> {
        self.store.read(|conn| self.current_board(conn))
    }

    /// Toggle one bingo cell (0-24, row by row)
    pub fn mark_cell(&self, index: usize) -> Result<MarkOutcome> {
        let (board, granted) = self.store.write(|conn| {
            let mut board = self.current_board(conn)?;
            let granted = board.toggle_cell(index)?;
            bingo::save_board(conn, &board)?;
            Ok((board, granted))
        })?;

        debug!(index, granted, lines = board.lines_completed, "toggled bingo cell");
        let mut events = Vec::new();
        if granted > 0 {
            info!(granted, extra_draws = board.extra_draws, "bingo line completed");
            events.push(GamificationEvent::BingoLines {
                granted,
                total_lines: board.lines_completed,
            });
        }
        events.extend(self.check_achievements()?);
        Ok(MarkOutcome {
            board,
            granted,
            events,
        })
    }

    /// Replace all 25 labels of the current card
    pub fn set_bingo_labels(&self, labels: Vec<String>) -> Result<BingoBoard> {
        self.store.write(|conn| {
            let mut board = self.current_board(conn)?;
            board.relabel(labels)?;
            bingo::save_board(conn, &board)?;
            Ok(board)
        })
    }

    // ========================================
    // PROGRESS
    // ========================================

    /// Completion log, oldest first
    pub fn completions(&self) -> Result<Vec<CompletionEntry>> {
        self.store.read(tasks::load_completions)
    }

    pub fn status(&self) -> Result<Status> {
        let today = self.today;
        let (state, log, board, unlocked) = self.store.read(|conn| {
            Ok((
                tasks::load_state(conn)?,
                tasks::load_completions(conn)?,
                self.current_board(conn)?,
                progress::unlocked_ids(conn)?,
            ))
        })?;

        let due = state.due_today(today);
        Ok(Status {
            today,
            player: state.player_stats(),
            points: state.points,
            draw_cost: self.config.settings.draw_cost,
            extra_draws: board.extra_draws,
            due_today: due.len(),
            done_today: due.iter().filter(|t| t.completed).count(),
            streak: activity::current_streak(&log, today),
            activity: activity::daily_counts(&log, today, ACTIVITY_DAYS),
            category_totals: activity::category_totals(&log),
            achievements_unlocked: unlocked.len(),
            achievements_total: Achievement::total_count(),
        })
    }

    /// Every achievement with its unlock time
    pub fn achievements(&self) -> Result<Vec<AchievementStatus>> {
        let unlocked = self.store.read(progress::unlocked_with_time)?;
        Ok(achievements::ACHIEVEMENTS
            .iter()
            .map(|achievement| AchievementStatus {
                achievement,
                unlocked_at: unlocked
                    .iter()
                    .find(|(id, _)| id == achievement.id.as_str())
                    .map(|(_, at)| *at),
            })
            .collect())
    }

    /// Unlock every achievement whose condition now holds
    pub fn check_achievements(&self) -> Result<Vec<GamificationEvent>> {
        let today = self.today;
        let newly = self.store.write(|conn| {
            let state = tasks::load_state(conn)?;
            let log = tasks::load_completions(conn)?;
            let board = self.current_board(conn)?;
            let unlocked = progress::unlocked_ids(conn)?;

            let snapshot = Progress {
                total_completions: log.len() as u32,
                category_counts: activity::category_totals(&log),
                level: state.player_stats().level,
                daily_streak: activity::current_streak(&log, today),
                bingo_lines: board.lines_completed,
                lottery_spins: rewards::count_spins(conn)?,
                wishes_completed: rewards::count_completed_wishes(conn)?,
            };

            let now = calendar::now_ms();
            let mut newly: Vec<AchievementId> = Vec::new();
            for id in achievements::check_all(&snapshot, &unlocked) {
                if progress::unlock(conn, id.as_str(), now)? {
                    newly.push(id);
                }
            }
            Ok(newly)
        })
        .context("Failed to check achievements")?;

        Ok(newly
            .into_iter()
            .map(|id| {
                let achievement = Achievement::get(id);
                info!(achievement = achievement.name, "achievement unlocked");
                GamificationEvent::AchievementUnlocked(achievement)
            })
            .collect())
    }
}
