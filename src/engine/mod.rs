//! Pure game rules: recurrence, leveling, lottery, bingo and achievements
//!
//! Nothing in here touches the clock or the database. Callers pass `today`
//! and an RNG explicitly.

pub mod achievements;
pub mod activity;
pub mod bingo;
pub mod calendar;
pub mod levels;
pub mod lottery;
pub mod recurrence;
pub mod state;

pub use bingo::{BingoBoard, LineReport, check_lines};
pub use levels::PlayerStats;
pub use lottery::{Weighted, draw};
pub use state::{LifeState, TaskEvent};
