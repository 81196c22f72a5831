//! Wish list entries

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::normalize_title;
use crate::error::{Error, Result};

pub type WishId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishStatus {
    Pending,
    InProgress,
    Completed,
}

impl WishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for WishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WishStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(Error::UnknownValue {
                kind: "wish status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wish {
    pub id: WishId,
    pub title: String,
    pub status: WishStatus,
    pub created_at: NaiveDate,
}

impl Wish {
    pub fn new(id: WishId, title: &str, today: NaiveDate) -> Result<Self> {
        Ok(Self {
            id,
            title: normalize_title(title)?,
            status: WishStatus::Pending,
            created_at: today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_wish_is_pending() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let wish = Wish::new("w1".into(), " Trip to the coast ", today).unwrap();
        assert_eq!(wish.title, "Trip to the coast");
        assert_eq!(wish.status, WishStatus::Pending);
        assert_eq!(Wish::new("w2".into(), "", today), Err(Error::EmptyTitle));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("in-progress".parse::<WishStatus>().unwrap(), WishStatus::InProgress);
        assert_eq!("done".parse::<WishStatus>().unwrap(), WishStatus::Completed);
        assert!("cancelled".parse::<WishStatus>().is_err());
    }
}
