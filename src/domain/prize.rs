//! Lottery prizes and the history of draws

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::lottery::Weighted;
use crate::error::{Error, Result};

pub type RecordId = String;

/// What a prize is worth once drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeKind {
    /// A plain reward the user grants themselves
    #[default]
    Item,
    /// Can be exchanged once for a wish
    WishTicket,
}

impl PrizeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::WishTicket => "wish_ticket",
        }
    }
}

impl fmt::Display for PrizeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrizeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "item" => Ok(Self::Item),
            "wish_ticket" => Ok(Self::WishTicket),
            _ => Err(Error::UnknownValue {
                kind: "prize kind",
                value: s.to_string(),
            }),
        }
    }
}

/// One entry of the prize pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub name: String,
    /// Relative weight; the pool does not need to sum to 100
    pub weight: u32,
    #[serde(default)]
    pub kind: PrizeKind,
}

impl Prize {
    pub fn new(name: impl Into<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            weight,
            kind: PrizeKind::Item,
        }
    }

    pub fn wish_ticket(name: impl Into<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            weight,
            kind: PrizeKind::WishTicket,
        }
    }
}

impl Weighted for Prize {
    fn weight(&self) -> u32 {
        self.weight
    }
}

/// Prize pool used when the config does not define one
pub fn default_prize_pool() -> Vec<Prize> {
    vec![
        Prize::new("Favorite snack", 30),
        Prize::new("30 minutes of guilt-free gaming", 25),
        Prize::new("Movie night", 15),
        Prize::new("Sleep in tomorrow", 10),
        Prize::new("Better luck next time", 15),
        Prize::wish_ticket("Wish ticket", 5),
    ]
}

/// How a spin was paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawSource {
    Points,
    BonusDraw,
}

impl DrawSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::BonusDraw => "bonus_draw",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "points" => Some(Self::Points),
            "bonus_draw" => Some(Self::BonusDraw),
            _ => None,
        }
    }
}

/// A past lottery result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryRecord {
    pub id: RecordId,
    pub prize: String,
    pub kind: PrizeKind,
    pub source: DrawSource,
    /// Unix timestamp in milliseconds
    pub drawn_at: i64,
    pub used: bool,
}

impl LotteryRecord {
    /// Mark a wish ticket as spent. Only wish tickets can be used, and only once.
    pub fn use_ticket(&mut self) -> Result<()> {
        if self.kind != PrizeKind::WishTicket {
            return Err(Error::NotAWishTicket(self.id.clone()));
        }
        if self.used {
            return Err(Error::TicketAlreadyUsed(self.id.clone()));
        }
        self.used = true;
        Ok(())
    }
}
