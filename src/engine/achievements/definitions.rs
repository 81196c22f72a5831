//! Achievement definitions and metadata
//!
//! Achievements are badges only. They never award experience, so total
//! experience always equals the sum over completed tasks.

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    // Milestone achievements
    FirstTask,
    TenTasks,
    FiftyTasks,
    Century,
    FiveHundred,

    // Category achievements
    Specialist,
    AllRounder,

    // Level achievements
    Level5,
    Level10,
    Level20,

    // Streak achievements
    Streak3,
    Streak7,
    Streak30,

    // Bingo achievements
    FirstLine,
    FullCard,

    // Lottery and wishes
    FirstSpin,
    DreamComeTrue,
}

impl AchievementId {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstTask => "first_task",
            Self::TenTasks => "ten_tasks",
            Self::FiftyTasks => "fifty_tasks",
            Self::Century => "century",
            Self::FiveHundred => "five_hundred",
            Self::Specialist => "specialist",
            Self::AllRounder => "all_rounder",
            Self::Level5 => "level_5",
            Self::Level10 => "level_10",
            Self::Level20 => "level_20",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Streak30 => "streak_30",
            Self::FirstLine => "first_line",
            Self::FullCard => "full_card",
            Self::FirstSpin => "first_spin",
            Self::DreamComeTrue => "dream_come_true",
        }
    }

    /// Parse from database string
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|id| id.as_str() == s)
    }

    /// Get all achievement IDs
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstTask,
            Self::TenTasks,
            Self::FiftyTasks,
            Self::Century,
            Self::FiveHundred,
            Self::Specialist,
            Self::AllRounder,
            Self::Level5,
            Self::Level10,
            Self::Level20,
            Self::Streak3,
            Self::Streak7,
            Self::Streak30,
            Self::FirstLine,
            Self::FullCard,
            Self::FirstSpin,
            Self::DreamComeTrue,
        ]
    }
}

/// Achievement category for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementCategory {
    Milestone,
    Category,
    Level,
    Streak,
    Bingo,
    Reward,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Milestone => "Milestones",
            Self::Category => "Life Areas",
            Self::Level => "Levels",
            Self::Streak => "Streaks",
            Self::Bingo => "Bingo",
            Self::Reward => "Rewards",
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    /// Threshold the checker compares against
    pub target: u32,
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[Achievement] = &[
    // === MILESTONE ===
    Achievement {
        id: AchievementId::FirstTask,
        name: "First Steps",
        description: "Complete your first task",
        icon: "🎯",
        category: AchievementCategory::Milestone,
        target: 1,
    },
    Achievement {
        id: AchievementId::TenTasks,
        name: "Getting Started",
        description: "Complete 10 tasks",
        icon: "📈",
        category: AchievementCategory::Milestone,
        target: 10,
    },
    Achievement {
        id: AchievementId::FiftyTasks,
        name: "Productive",
        description: "Complete 50 tasks",
        icon: "💪",
        category: AchievementCategory::Milestone,
        target: 50,
    },
    Achievement {
        id: AchievementId::Century,
        name: "Century",
        description: "Complete 100 tasks",
        icon: "💯",
        category: AchievementCategory::Milestone,
        target: 100,
    },
    Achievement {
        id: AchievementId::FiveHundred,
        name: "Unstoppable",
        description: "Complete 500 tasks",
        icon: "🏆",
        category: AchievementCategory::Milestone,
        target: 500,
    },
    // === CATEGORY ===
    Achievement {
        id: AchievementId::Specialist,
        name: "Specialist",
        description: "Complete 25 tasks in one life area",
        icon: "🎓",
        category: AchievementCategory::Category,
        target: 25,
    },
    Achievement {
        id: AchievementId::AllRounder,
        name: "All-Rounder",
        description: "Complete a task in every life area",
        icon: "🌈",
        category: AchievementCategory::Category,
        target: 6,
    },
    // === LEVEL ===
    Achievement {
        id: AchievementId::Level5,
        name: "Adventurer",
        description: "Reach level 5",
        icon: "⭐",
        category: AchievementCategory::Level,
        target: 5,
    },
    Achievement {
        id: AchievementId::Level10,
        name: "Veteran",
        description: "Reach level 10",
        icon: "🌟",
        category: AchievementCategory::Level,
        target: 10,
    },
    Achievement {
        id: AchievementId::Level20,
        name: "Champion",
        description: "Reach level 20",
        icon: "👑",
        category: AchievementCategory::Level,
        target: 20,
    },
    // === STREAK ===
    Achievement {
        id: AchievementId::Streak3,
        name: "On Fire",
        description: "Complete tasks 3 days in a row",
        icon: "🔥",
        category: AchievementCategory::Streak,
        target: 3,
    },
    Achievement {
        id: AchievementId::Streak7,
        name: "Week Warrior",
        description: "Complete tasks 7 days in a row",
        icon: "📅",
        category: AchievementCategory::Streak,
        target: 7,
    },
    Achievement {
        id: AchievementId::Streak30,
        name: "Monthly Master",
        description: "Complete tasks 30 days in a row",
        icon: "🗓️",
        category: AchievementCategory::Streak,
        target: 30,
    },
    // === BINGO ===
    Achievement {
        id: AchievementId::FirstLine,
        name: "Bingo!",
        description: "Complete a bingo line",
        icon: "🎲",
        category: AchievementCategory::Bingo,
        target: 1,
    },
    Achievement {
        id: AchievementId::FullCard,
        name: "Full Card",
        description: "Complete all 12 bingo lines in one month",
        icon: "🃏",
        category: AchievementCategory::Bingo,
        target: 12,
    },
    // === REWARD ===
    Achievement {
        id: AchievementId::FirstSpin,
        name: "Feeling Lucky",
        description: "Spin the lottery for the first time",
        icon: "🎰",
        category: AchievementCategory::Reward,
        target: 1,
    },
    Achievement {
        id: AchievementId::DreamComeTrue,
        name: "Dream Come True",
        description: "Fulfil a wish",
        icon: "✨",
        category: AchievementCategory::Reward,
        target: 1,
    },
];

impl Achievement {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> &'static Achievement {
        ACHIEVEMENTS
            .iter()
            .find(|a| a.id == id)
            .unwrap_or(&ACHIEVEMENTS[0])
    }

    /// Get total number of achievements
    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }
}
