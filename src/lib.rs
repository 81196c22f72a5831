//! lifequest - gamify your life
//!
//! Tasks in six life areas earn experience and points when completed. Experience
//! levels the player up; points buy spins on a weighted prize lottery. A monthly
//! 5x5 bingo card grants free spins for every completed line.
//!
//! ## Layout
//!
//! - [`domain`]: tasks, prizes, lottery records and wishes
//! - [`engine`]: the pure rules (recurrence, daily reset, leveling, weighted
//!   draws, bingo lines, achievements). No I/O, `today` is always passed in.
//! - [`store`]: SQLite persistence
//! - [`tracker`]: loads state, applies one action, saves it in one transaction
//! - [`config`]: `~/.lifequest/config.toml`

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod store;
pub mod tracker;

pub use error::{Error, Result};
