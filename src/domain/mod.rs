//! Domain types: tasks, prizes, lottery records and wishes

mod prize;
mod task;
mod wish;

pub use prize::{DrawSource, LotteryRecord, Prize, PrizeKind, RecordId, default_prize_pool};
pub use task::{Category, Difficulty, Repeat, Task, TaskDraft, TaskId};
pub use wish::{Wish, WishId, WishStatus};

use crate::error::{Error, Result};

/// Maximum title length in characters for tasks and wishes
pub const MAX_TITLE_LENGTH: usize = 200;

/// Trim a title and reject empty or oversized ones
pub(crate) fn normalize_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyTitle);
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(Error::TitleTooLong {
            len,
            max: MAX_TITLE_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}
