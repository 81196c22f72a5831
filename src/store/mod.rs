//! SQLite persistence
//!
//! [`Store`] owns the connection. The submodules are plain functions over a
//! `&Connection`, so callers can combine several of them in one
//! [`Store::write`] transaction.

pub mod bingo;
mod db;
pub mod progress;
pub mod rewards;
pub mod tasks;

pub use db::{DB_FILE_NAME, Store};
