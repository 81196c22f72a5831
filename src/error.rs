//! Typed errors for validation and policy failures
//!
//! Storage and configuration I/O use `anyhow` at the boundary; everything the
//! pure core can reject is described here.

use chrono::NaiveDate;

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Title is too long: {len} characters (max {max})")]
    TitleTooLong { len: usize, max: usize },

    #[error("Missing required date: {0}")]
    MissingDate(&'static str),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Prize pool is empty")]
    EmptyPrizePool,

    #[error("Prize pool has no positive weight")]
    ZeroTotalWeight,

    #[error("Insufficient points: has {available}, needs {required}")]
    InsufficientPoints { required: u32, available: u32 },

    #[error("Bingo cell {0} is out of range (0-24)")]
    CellOutOfRange(usize),

    #[error("Bingo board needs exactly 25 labels, got {0}")]
    InvalidLabelCount(usize),

    #[error("Wish not found: {0}")]
    WishNotFound(String),

    #[error("Lottery record not found: {0}")]
    RecordNotFound(String),

    #[error("Lottery record {0} is not a wish ticket")]
    NotAWishTicket(String),

    #[error("Wish ticket {0} has already been used")]
    TicketAlreadyUsed(String),
}
