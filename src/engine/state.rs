//! Explicit task/points state with transactional updates
//!
//! Every mutation that touches both a task and the points balance happens in
//! one function, so the two can never drift apart. Point balances never go
//! below zero: subtraction clamps.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::levels::PlayerStats;
use super::recurrence;
use crate::domain::{Category, Task, TaskDraft, TaskId};
use crate::error::{Error, Result};

/// Side effect of a task mutation, for the host to persist or display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    Completed {
        task_id: TaskId,
        category: Category,
        exp: u32,
        points: u32,
        day: NaiveDate,
    },
    Reopened {
        task_id: TaskId,
        exp: u32,
        points_removed: u32,
        day: NaiveDate,
    },
}

/// Tasks and the spendable points balance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeState {
    pub tasks: Vec<Task>,
    pub points: u32,
}

impl LifeState {
    pub fn new(tasks: Vec<Task>, points: u32) -> Self {
        Self { tasks, points }
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    /// Validate and append a new task
    pub fn add_task(&mut self, id: TaskId, draft: TaskDraft, today: NaiveDate) -> Result<&Task> {
        let task = Task::new(id, draft, today)?;
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Edit a task. If it is completed, the balance follows the change in its points.
    pub fn update_task(&mut self, id: &str, draft: TaskDraft) -> Result<()> {
        let task = self.task_mut(id)?;
        let old_points = task.points();
        task.apply_draft(draft)?;
        let (completed, new_points) = (task.completed, task.points());

        if completed {
            self.points = (self.points + new_points).saturating_sub(old_points);
        }
        Ok(())
    }

    /// Mark a task complete, or reopen it if it already is.
    ///
    /// Completion records `today` and adds the task's points; reopening clears
    /// the date and takes the points back, clamped at zero.
    pub fn toggle_task(&mut self, id: &str, today: NaiveDate) -> Result<TaskEvent> {
        let task = self.task_mut(id)?;
        let (exp, points, category) = (task.exp(), task.points(), task.category);

        if task.completed {
            let day = task.last_completed_date.unwrap_or(today);
            task.completed = false;
            task.last_completed_date = None;

            let before = self.points;
            self.points = before.saturating_sub(points);
            Ok(TaskEvent::Reopened {
                task_id: id.to_string(),
                exp,
                points_removed: before - self.points,
                day,
            })
        } else {
            task.completed = true;
            task.last_completed_date = Some(today);

            self.points = self.points.saturating_add(points);
            Ok(TaskEvent::Completed {
                task_id: id.to_string(),
                category,
                exp,
                points,
                day: today,
            })
        }
    }

    /// Alias of [`LifeState::toggle_task`]
    pub fn complete_task(&mut self, id: &str, today: NaiveDate) -> Result<TaskEvent> {
        self.toggle_task(id, today)
    }

    /// Remove a task. A completed task takes its points with it.
    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        let task = self.tasks.remove(index);
        if task.completed {
            self.points = self.points.saturating_sub(task.points());
        }
        Ok(task)
    }

    /// Spend points. Rejected without change if the balance is short.
    pub fn spend_points(&mut self, amount: u32) -> Result<u32> {
        if self.points < amount {
            return Err(Error::InsufficientPoints {
                required: amount,
                available: self.points,
            });
        }
        self.points -= amount;
        Ok(self.points)
    }

    pub fn add_points(&mut self, amount: u32) -> u32 {
        self.points = self.points.saturating_add(amount);
        self.points
    }

    /// Re-open daily tasks completed before `today`
    pub fn reset_daily_tasks(&mut self, today: NaiveDate) -> usize {
        recurrence::reset_daily_tasks(&mut self.tasks, today)
    }

    pub fn due_today(&self, today: NaiveDate) -> Vec<&Task> {
        recurrence::due_today(&self.tasks, today)
    }

    pub fn player_stats(&self) -> PlayerStats {
        PlayerStats::from_tasks(&self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, Repeat};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft(title: &str, difficulty: Difficulty) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            category: Category::Skill,
            difficulty,
            repeat: Repeat::Daily,
            start_date: Some(date("2024-01-01")),
            end_date: Some(date("2024-12-31")),
            specific_date: None,
        }
    }

    fn state() -> LifeState {
        let mut s = LifeState::default();
        s.add_task("a".into(), draft("Practice piano", Difficulty::Hard), date("2024-01-01"))
            .unwrap();
        s.add_task("b".into(), draft("Stretch", Difficulty::Easy), date("2024-01-01"))
            .unwrap();
        s
    }

    #[test]
    fn test_toggle_moves_points_and_exp_together() {
        let mut s = state();
        let event = s.toggle_task("a", date("2024-01-02")).unwrap();
        assert!(matches!(event, TaskEvent::Completed { points: 33, exp: 100, .. }));
        assert_eq!(s.points, 33);
        assert_eq!(s.player_stats().total_exp, 100);
        assert_eq!(s.task("a").unwrap().last_completed_date, Some(date("2024-01-02")));

        let event = s.toggle_task("a", date("2024-01-02")).unwrap();
        assert!(matches!(event, TaskEvent::Reopened { points_removed: 33, .. }));
        assert_eq!(s.points, 0);
        assert_eq!(s.player_stats().total_exp, 0);
        assert_eq!(s.task("a").unwrap().last_completed_date, None);
    }

    #[test]
    fn test_complete_task_toggles_like_toggle_task() {
        let mut s = state();
        let event = s.complete_task("b", date("2024-01-02")).unwrap();
        assert!(matches!(event, TaskEvent::Completed { points: 10, exp: 30, .. }));
        assert_eq!(s.points, 10);

        let event = s.complete_task("b", date("2024-01-02")).unwrap();
        assert!(matches!(event, TaskEvent::Reopened { points_removed: 10, .. }));
        assert_eq!(s.points, 0);
        assert_eq!(
            s.complete_task("missing", date("2024-01-02")),
            Err(Error::TaskNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_reopen_clamps_at_zero() {
        let mut s = state();
        s.toggle_task("a", date("2024-01-02")).unwrap();
        s.spend_points(20).unwrap();
        let event = s.toggle_task("a", date("2024-01-02")).unwrap();
        assert!(matches!(event, TaskEvent::Reopened { points_removed: 13, .. }));
        assert_eq!(s.points, 0);
    }

    #[test]
    fn test_delete_completed_task_removes_its_points() {
        let mut s = state();
        s.toggle_task("a", date("2024-01-02")).unwrap();
        s.toggle_task("b", date("2024-01-02")).unwrap();
        assert_eq!(s.points, 43);

        s.delete_task("b").unwrap();
        assert_eq!(s.points, 33);
    }

    #[test]
    fn test_delete_incomplete_task_keeps_points() {
        let mut s = state();
        s.toggle_task("a", date("2024-01-02")).unwrap();
        s.delete_task("b").unwrap();
        assert_eq!(s.points, 33);
        assert_eq!(s.delete_task("b"), Err(Error::TaskNotFound("b".to_string())));
    }

    #[test]
    fn test_update_completed_task_adjusts_balance() {
        let mut s = state();
        s.toggle_task("b", date("2024-01-02")).unwrap();
        assert_eq!(s.points, 10);
        s.update_task("b", draft("Stretch longer", Difficulty::Hard)).unwrap();
        assert_eq!(s.points, 33);
        assert_eq!(s.task("b").unwrap().title, "Stretch longer");
        assert!(s.task("b").unwrap().completed);
    }

    #[test]
    fn test_invalid_update_changes_nothing() {
        let mut s = state();
        let before = s.clone();
        assert_eq!(s.update_task("a", draft("", Difficulty::Easy)), Err(Error::EmptyTitle));
        assert_eq!(s, before);
    }

    #[test]
    fn test_spend_points_rejects_short_balance() {
        let mut s = state();
        s.add_points(5);
        assert_eq!(
            s.spend_points(20),
            Err(Error::InsufficientPoints {
                required: 20,
                available: 5
            })
        );
        assert_eq!(s.points, 5);
        assert_eq!(s.spend_points(5).unwrap(), 0);
    }

    #[test]
    fn test_daily_reset_drops_exp_but_keeps_points() {
        let mut s = state();
        s.toggle_task("a", date("2024-01-02")).unwrap();
        assert_eq!(s.reset_daily_tasks(date("2024-01-03")), 1);
        assert_eq!(s.points, 33);
        assert_eq!(s.player_stats().total_exp, 0);
    }
}
