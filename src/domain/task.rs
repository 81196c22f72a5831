//! Task model
//!
//! A task has a category, a difficulty (which fixes its experience and point
//! rewards) and a recurrence mode with the dates that mode needs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::normalize_title;
use crate::error::{Error, Result};

pub type TaskId = String;

/// Life area a task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Skill,
    Fitness,
    Habit,
    Growth,
    Finance,
    Social,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Skill,
        Self::Fitness,
        Self::Habit,
        Self::Growth,
        Self::Finance,
        Self::Social,
    ];

    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Fitness => "fitness",
            Self::Habit => "habit",
            Self::Growth => "growth",
            Self::Finance => "finance",
            Self::Social => "social",
        }
    }

    /// Human readable name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skill => "Skill",
            Self::Fitness => "Fitness",
            Self::Habit => "Good Habit",
            Self::Growth => "Growth",
            Self::Finance => "Finance",
            Self::Social => "Social",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownValue {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Task difficulty. Experience and points are derived from it and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Experience awarded on completion
    pub fn exp(&self) -> u32 {
        match self {
            Self::Easy => 30,
            Self::Medium => 50,
            Self::Hard => 100,
        }
    }

    /// Points awarded on completion: `round(exp / 3)`
    pub fn points(&self) -> u32 {
        // Integer form of round-half-up for a divisor of 3
        (self.exp() + 1) / 3
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(Error::UnknownValue {
                kind: "difficulty",
                value: s.to_string(),
            }),
        }
    }
}

/// Recurrence mode of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Every day inside the date window
    Daily,
    /// Same weekday as the start date, inside the window
    Weekly,
    /// Same day of month as the start date, inside the window
    Monthly,
    /// A single specific date
    Once,
    /// Every day inside the date window
    Range,
}

impl Repeat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Once => "once",
            Self::Range => "range",
        }
    }

    /// Parse a stored mode. Unknown modes yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "once" => Some(Self::Once),
            "range" => Some(Self::Range),
            _ => None,
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Repeat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::UnknownValue {
            kind: "repeat mode",
            value: s.to_string(),
        })
    }
}

/// A tracked task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub category: Category,
    pub difficulty: Difficulty,
    /// `None` when the stored mode is missing or unrecognised; such a task is never due
    pub repeat: Option<Repeat>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub specific_date: Option<NaiveDate>,
    pub completed: bool,
    pub last_completed_date: Option<NaiveDate>,
    pub created_at: NaiveDate,
}

/// User supplied fields for creating or editing a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub repeat: Repeat,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub specific_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Validate the draft and return the normalized title.
    ///
    /// `once` needs a specific date; every other mode needs an ordered start/end window.
    pub fn validate(&self) -> Result<String> {
        let title = normalize_title(&self.title)?;

        match self.repeat {
            Repeat::Once => {
                if self.specific_date.is_none() {
                    return Err(Error::MissingDate("specific date"));
                }
            }
            _ => {
                let start = self.start_date.ok_or(Error::MissingDate("start date"))?;
                let end = self.end_date.ok_or(Error::MissingDate("end date"))?;
                if start > end {
                    return Err(Error::InvalidDateRange { start, end });
                }
            }
        }

        Ok(title)
    }
}

impl Task {
    /// Create a new, incomplete task from a validated draft
    pub fn new(id: TaskId, draft: TaskDraft, today: NaiveDate) -> Result<Self> {
        let mut task = Self {
            id,
            title: String::new(),
            category: draft.category,
            difficulty: draft.difficulty,
            repeat: Some(draft.repeat),
            start_date: None,
            end_date: None,
            specific_date: None,
            completed: false,
            last_completed_date: None,
            created_at: today,
        };
        task.apply_draft(draft)?;
        Ok(task)
    }

    /// Overwrite the editable fields. Completion state is left alone.
    pub fn apply_draft(&mut self, draft: TaskDraft) -> Result<()> {
        let title = draft.validate()?;

        self.title = title;
        self.category = draft.category;
        self.difficulty = draft.difficulty;
        self.repeat = Some(draft.repeat);
        if draft.repeat == Repeat::Once {
            self.specific_date = draft.specific_date;
            self.start_date = None;
            self.end_date = None;
        } else {
            self.specific_date = None;
            self.start_date = draft.start_date;
            self.end_date = draft.end_date;
        }
        Ok(())
    }

    /// Editable fields as a draft. A task without a known mode comes back as daily.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            category: self.category,
            difficulty: self.difficulty,
            repeat: self.repeat.unwrap_or(Repeat::Daily),
            start_date: self.start_date,
            end_date: self.end_date,
            specific_date: self.specific_date,
        }
    }

    pub fn exp(&self) -> u32 {
        self.difficulty.exp()
    }

    pub fn points(&self) -> u32 {
        self.difficulty.points()
    }

    pub fn is_daily(&self) -> bool {
        self.repeat == Some(Repeat::Daily)
    }
}
