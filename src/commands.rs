//! CLI command definitions for lifequest.

use clap::Subcommand;

use lifequest::domain::{Category, Difficulty, Repeat, WishStatus};

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default ~/.lifequest/config.toml and create the database
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show level, points, streak and today's progress
    Status {
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Spend points or bingo draws on the prize lottery
    Lottery {
        #[command(subcommand)]
        command: LotteryCommands,
    },

    /// Manage the wish list
    Wish {
        #[command(subcommand)]
        command: WishCommands,
    },

    /// This month's bingo card
    Bingo {
        #[command(subcommand)]
        command: BingoCommands,
    },

    /// List achievements
    Achievements {
        /// Only show unlocked achievements
        #[arg(long)]
        unlocked: bool,
    },
}

/// Task fields shared by `add` and `edit`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TaskFields {
    /// Life area (skill, fitness, habit, growth, finance, social)
    #[arg(long, short = 'c')]
    pub category: Option<Category>,
    /// Difficulty (easy, medium, hard)
    #[arg(long, short = 'd')]
    pub difficulty: Option<Difficulty>,
    /// Recurrence (daily, weekly, monthly, once, range)
    #[arg(long, short = 'r')]
    pub repeat: Option<Repeat>,
    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
    /// Last day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
    /// The day of a one-off task (YYYY-MM-DD)
    #[arg(long)]
    pub on: Option<String>,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    Add {
        title: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Change a task; unset options keep their value
    Edit {
        /// Task ID or unique prefix
        id: String,
        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// List all tasks
    List {
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
        /// Only this life area
        #[arg(long, short = 'c')]
        category: Option<Category>,
    },
    /// List tasks due today
    Today {
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// Complete a task, or reopen it if already completed
    Toggle {
        /// Task ID or unique prefix
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID or unique prefix
        id: String,
    },
}

#[derive(Subcommand)]
pub enum LotteryCommands {
    /// Spin once
    Spin,
    /// Show past results, newest first
    History {
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
        /// Limit number of results
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Use a wish ticket
    Use {
        /// Lottery record ID or unique prefix
        id: String,
    },
    /// Show the prize pool and odds
    Prizes,
}

#[derive(Subcommand)]
pub enum WishCommands {
    /// Add a wish
    Add { title: String },
    /// List wishes
    List {
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// Set the status of a wish (pending, in-progress, completed)
    Status {
        /// Wish ID or unique prefix
        id: String,
        status: WishStatus,
    },
    /// Delete a wish
    Delete {
        /// Wish ID or unique prefix
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BingoCommands {
    /// Show the card
    Show {
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// Toggle a cell, numbered 1-25 row by row
    Mark {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
        cell: u8,
    },
    /// Replace all 25 labels of the current card
    Labels {
        /// Exactly 25 labels, row by row
        #[arg(num_args = 25, required = true)]
        labels: Vec<String>,
    },
}
