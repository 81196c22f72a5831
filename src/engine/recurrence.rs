//! Recurrence matching and the daily reset rule
//!
//! Decides whether a task is due on a given civil date, and re-opens daily
//! tasks that were completed on an earlier day.

use chrono::{Datelike, NaiveDate};

use crate::domain::{Repeat, Task};

/// Check whether `today` falls inside the task's inclusive start/end window.
///
/// A missing bound means the task is not schedulable, so this returns false.
fn in_window(task: &Task, today: NaiveDate) -> bool {
    match (task.start_date, task.end_date) {
        (Some(start), Some(end)) => start <= today && today <= end,
        _ => false,
    }
}

/// Decide whether a task is due on `today`.
///
/// | mode    | due when                                               |
/// |---------|--------------------------------------------------------|
/// | once    | `specific_date == today`                               |
/// | daily   | `start <= today <= end`                                |
/// | weekly  | in window and same weekday as `start`                  |
/// | monthly | in window and same day of month as `start`             |
/// | range   | `start <= today <= end`                                |
///
/// Unknown modes and missing dates are never due.
pub fn is_due_today(task: &Task, today: NaiveDate) -> bool {
    let Some(repeat) = task.repeat else {
        return false;
    };

    match repeat {
        Repeat::Once => task.specific_date == Some(today),
        Repeat::Daily | Repeat::Range => in_window(task, today),
        Repeat::Weekly => {
            in_window(task, today)
                && task
                    .start_date
                    .is_some_and(|start| start.weekday() == today.weekday())
        }
        Repeat::Monthly => {
            in_window(task, today)
                && task.start_date.is_some_and(|start| start.day() == today.day())
        }
    }
}

/// Tasks due on `today`, in their original order
pub fn due_today(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| is_due_today(t, today)).collect()
}

/// Whether the daily reset would re-open this task on `today`
pub fn needs_daily_reset(task: &Task, today: NaiveDate) -> bool {
    task.is_daily() && task.completed && task.last_completed_date != Some(today)
}

/// Re-open daily tasks completed on an earlier day.
///
/// Every task with `repeat = daily`, `completed = true` and a last completion
/// date other than `today` becomes incomplete with its completion date cleared.
/// Running this twice on the same day changes nothing the second time.
///
/// Returns the number of tasks that were reset.
pub fn reset_daily_tasks(tasks: &mut [Task], today: NaiveDate) -> usize {
    let mut reset = 0;
    for task in tasks.iter_mut().filter(|t| needs_daily_reset(t, today)) {
        task.completed = false;
        task.last_completed_date = None;
        reset += 1;
    }
    reset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Difficulty};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn task(repeat: Option<Repeat>, start: Option<&str>, end: Option<&str>) -> Task {
        Task {
            id: "t".to_string(),
            title: "Task".to_string(),
            category: Category::Habit,
            difficulty: Difficulty::Easy,
            repeat,
            start_date: start.map(date),
            end_date: end.map(date),
            specific_date: None,
            completed: false,
            last_completed_date: None,
            created_at: date("2024-01-01"),
        }
    }

    #[test]
    fn test_daily_window_is_inclusive() {
        let t = task(Some(Repeat::Daily), Some("2024-01-10"), Some("2024-01-20"));
        assert!(!is_due_today(&t, date("2024-01-09")));
        assert!(is_due_today(&t, date("2024-01-10")));
        assert!(is_due_today(&t, date("2024-01-15")));
        assert!(is_due_today(&t, date("2024-01-20")));
        assert!(!is_due_today(&t, date("2024-01-21")));
    }

    #[test]
    fn test_single_day_window() {
        let t = task(Some(Repeat::Daily), Some("2024-05-05"), Some("2024-05-05"));
        assert!(is_due_today(&t, date("2024-05-05")));
        assert!(!is_due_today(&t, date("2024-05-06")));
    }

    #[test]
    fn test_weekly_matches_start_weekday() {
        // 2024-01-01 is a Monday
        let t = task(Some(Repeat::Weekly), Some("2024-01-01"), Some("2024-12-31"));
        assert!(is_due_today(&t, date("2024-01-01")));
        assert!(is_due_today(&t, date("2024-01-08")));
        assert!(is_due_today(&t, date("2024-01-15")));
        assert!(!is_due_today(&t, date("2024-01-09")));
        assert!(!is_due_today(&t, date("2025-01-06")));
    }

    #[test]
    fn test_monthly_matches_day_of_month() {
        let t = task(Some(Repeat::Monthly), Some("2024-01-31"), Some("2024-12-31"));
        assert!(is_due_today(&t, date("2024-03-31")));
        assert!(!is_due_today(&t, date("2024-02-29")));
        assert!(!is_due_today(&t, date("2024-04-30")));

        let t = task(Some(Repeat::Monthly), Some("2024-01-15"), Some("2024-06-30"));
        assert!(is_due_today(&t, date("2024-02-15")));
        assert!(!is_due_today(&t, date("2024-07-15")));
    }

    #[test]
    fn test_once_matches_specific_date() {
        let mut t = task(Some(Repeat::Once), None, None);
        t.specific_date = Some(date("2024-06-01"));
        assert!(is_due_today(&t, date("2024-06-01")));
        assert!(!is_due_today(&t, date("2024-06-02")));
    }

    #[test]
    fn test_range_behaves_as_window() {
        let t = task(Some(Repeat::Range), Some("2024-01-01"), Some("2024-01-03"));
        assert!(is_due_today(&t, date("2024-01-02")));
        assert!(!is_due_today(&t, date("2024-01-04")));
    }

    #[test]
    fn test_unknown_mode_and_missing_dates_fail_closed() {
        let t = task(None, Some("2024-01-01"), Some("2024-12-31"));
        assert!(!is_due_today(&t, date("2024-01-02")));

        let t = task(Some(Repeat::Daily), Some("2024-01-01"), None);
        assert!(!is_due_today(&t, date("2024-01-02")));

        let t = task(Some(Repeat::Once), None, None);
        assert!(!is_due_today(&t, date("2024-01-02")));
    }

    #[test]
    fn test_due_today_filters() {
        let tasks = vec![
            task(Some(Repeat::Daily), Some("2024-01-01"), Some("2024-01-31")),
            task(Some(Repeat::Daily), Some("2024-02-01"), Some("2024-02-28")),
        ];
        assert_eq!(due_today(&tasks, date("2024-01-05")).len(), 1);
    }

    #[test]
    fn test_reset_daily_tasks() {
        let mut done_yesterday = task(Some(Repeat::Daily), Some("2024-01-01"), Some("2024-01-31"));
        done_yesterday.completed = true;
        done_yesterday.last_completed_date = Some(date("2024-01-04"));

        let mut done_today = done_yesterday.clone();
        done_today.last_completed_date = Some(date("2024-01-05"));

        let mut weekly_done = task(Some(Repeat::Weekly), Some("2024-01-01"), Some("2024-01-31"));
        weekly_done.completed = true;
        weekly_done.last_completed_date = Some(date("2024-01-01"));

        let mut tasks = vec![done_yesterday, done_today.clone(), weekly_done.clone()];
        let reset = reset_daily_tasks(&mut tasks, date("2024-01-05"));

        assert_eq!(reset, 1);
        assert!(!tasks[0].completed);
        assert_eq!(tasks[0].last_completed_date, None);
        assert_eq!(tasks[1], done_today);
        assert_eq!(tasks[2], weekly_done);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut t = task(Some(Repeat::Daily), Some("2024-01-01"), Some("2024-01-31"));
        t.completed = true;
        t.last_completed_date = Some(date("2024-01-02"));
        let mut once = vec![t.clone(), t];
        reset_daily_tasks(&mut once, date("2024-01-03"));
        let mut twice = once.clone();
        assert_eq!(reset_daily_tasks(&mut twice, date("2024-01-03")), 0);
        assert_eq!(once, twice);
    }
}
