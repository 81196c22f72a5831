//! Monthly bingo card
//!
//! A 5x5 grid of monthly sub-tasks. Completing a row, column or diagonal
//! grants extra lottery draws. The card is wiped when the month changes.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const BOARD_SIZE: usize = 5;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// All 12 lines in fixed order: rows 0-4, columns 5-9, diagonals 10-11
pub const LINES: [[usize; 5]; 12] = [
    [0, 1, 2, 3, 4],
    [5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14],
    [15, 16, 17, 18, 19],
    [20, 21, 22, 23, 24],
    [0, 5, 10, 15, 20],
    [1, 6, 11, 16, 21],
    [2, 7, 12, 17, 22],
    [3, 8, 13, 18, 23],
    [4, 9, 14, 19, 24],
    [0, 6, 12, 18, 24],
    [4, 8, 12, 16, 20],
];

/// Completed lines of a board
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LineReport {
    pub count: usize,
    /// Indices into [`LINES`], ascending
    pub indices: Vec<usize>,
}

/// Find every fully completed line. Recomputed from scratch on each call.
pub fn check_lines(completed: &[bool; CELL_COUNT]) -> LineReport {
    let indices: Vec<usize> = LINES
        .iter()
        .enumerate()
        .filter(|(_, line)| line.iter().all(|&cell| completed[cell]))
        .map(|(i, _)| i)
        .collect();

    LineReport {
        count: indices.len(),
        indices,
    }
}

/// Labels used when nothing is configured
pub fn default_labels() -> Vec<String> {
    [
        "Read 50 pages",
        "Cook a new recipe",
        "Call a friend",
        "Run 5 km",
        "Declutter a drawer",
        "Learn 20 new words",
        "Go to bed before 11pm",
        "No takeout for a week",
        "Write a journal entry",
        "Try a new sport",
        "Save 10% of income",
        "Visit a museum",
        "Free space",
        "Meditate 3 days in a row",
        "Finish an online lesson",
        "Stretch every morning for a week",
        "Do a digital detox day",
        "Help someone out",
        "Drink 2L water 5 days",
        "Review monthly budget",
        "Take a long walk",
        "Fix something broken",
        "Write a thank-you note",
        "Plan next month's goals",
        "Celebrate a small win",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Bingo board for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BingoBoard {
    /// Owning month, "YYYY-MM"
    pub month: String,
    pub labels: Vec<String>,
    pub completed: [bool; CELL_COUNT],
    /// Completed lines as of the last change
    pub lines_completed: usize,
    /// Most lines completed at once this month. Draws are only granted above it.
    #[serde(default)]
    pub max_lines_reached: usize,
    /// Unspent free draws earned from lines
    pub extra_draws: u32,
}

impl BingoBoard {
    /// Fresh board. Exactly 25 labels are required.
    pub fn new(month: impl Into<String>, labels: Vec<String>) -> Result<Self> {
        if labels.len() != CELL_COUNT {
            return Err(Error::InvalidLabelCount(labels.len()));
        }
        Ok(Self {
            month: month.into(),
            labels,
            completed: [false; CELL_COUNT],
            lines_completed: 0,
            max_lines_reached: 0,
            extra_draws: 0,
        })
    }

    /// Start over when `month` differs from the owning month.
    ///
    /// Clears cells and counters but keeps the labels. Returns true if a reset happened.
    pub fn roll_over(&mut self, month: &str) -> bool {
        if self.month == month {
            return false;
        }
        self.month = month.to_string();
        self.completed = [false; CELL_COUNT];
        self.lines_completed = 0;
        self.max_lines_reached = 0;
        self.extra_draws = 0;
        true
    }

    /// Flip one cell and recount lines.
    ///
    /// Returns the number of extra draws granted: how far the line count rose
    /// above the month's high-water mark. Re-marking a cell of a line that was
    /// already paid out grants nothing, and draws already granted are never
    /// taken back.
    pub fn toggle_cell(&mut self, index: usize) -> Result<u32> {
        if index >= CELL_COUNT {
            return Err(Error::CellOutOfRange(index));
        }
        self.completed[index] = !self.completed[index];

        let report = check_lines(&self.completed);
        let granted = report.count.saturating_sub(self.max_lines_reached) as u32;
        self.lines_completed = report.count;
        self.max_lines_reached = self.max_lines_reached.max(report.count);
        self.extra_draws += granted;
        Ok(granted)
    }

    /// Spend one free draw if there is one
    pub fn take_extra_draw(&mut self) -> bool {
        if self.extra_draws == 0 {
            return false;
        }
        self.extra_draws -= 1;
        true
    }

    /// Replace all 25 labels, keeping progress
    pub fn relabel(&mut self, labels: Vec<String>) -> Result<()> {
        if labels.len() != CELL_COUNT {
            return Err(Error::InvalidLabelCount(labels.len()));
        }
        self.labels = labels;
        Ok(())
    }

    pub fn lines(&self) -> LineReport {
        check_lines(&self.completed)
    }

    pub fn completed_cells(&self) -> usize {
        self.completed.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BingoBoard {
        BingoBoard::new("2024-01", default_labels()).unwrap()
    }

    #[test]
    fn test_first_row() {
        let mut cells = [false; CELL_COUNT];
        for i in 0..5 {
            cells[i] = true;
        }
        let report = check_lines(&cells);
        assert_eq!(report.count, 1);
        assert_eq!(report.indices, vec![0]);
    }

    #[test]
    fn test_full_board_has_twelve_lines() {
        let report = check_lines(&[true; CELL_COUNT]);
        assert_eq!(report.count, 12);
        assert_eq!(report.indices, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_diagonals_and_columns() {
        let mut cells = [false; CELL_COUNT];
        for i in [4, 8, 12, 16, 20] {
            cells[i] = true;
        }
        assert_eq!(check_lines(&cells).indices, vec![11]);

        let mut cells = [false; CELL_COUNT];
        for i in [2, 7, 12, 17, 22] {
            cells[i] = true;
        }
        assert_eq!(check_lines(&cells).indices, vec![7]);
    }

    #[test]
    fn test_toggle_grants_draws_for_new_lines() {
        let mut b = board();
        for i in 0..4 {
            assert_eq!(b.toggle_cell(i).unwrap(), 0);
        }
        assert_eq!(b.toggle_cell(4).unwrap(), 1);
        assert_eq!(b.extra_draws, 1);

        // Cell 0 is shared with column 0 and the main diagonal
        for i in [5, 10, 15, 6, 12, 18] {
            assert_eq!(b.toggle_cell(i).unwrap(), 0);
        }
        assert_eq!(b.lines_completed, 1);
        assert_eq!(b.toggle_cell(20).unwrap(), 1);
        assert_eq!(b.toggle_cell(24).unwrap(), 1);
        assert_eq!(b.lines().indices, vec![0, 5, 10]);
        assert_eq!(b.extra_draws, 3);
    }

    #[test]
    fn test_untoggle_keeps_granted_draws() {
        let mut b = board();
        for i in 0..5 {
            b.toggle_cell(i).unwrap();
        }
        assert_eq!(b.extra_draws, 1);
        assert_eq!(b.toggle_cell(2).unwrap(), 0);
        assert_eq!(b.lines_completed, 0);
        assert_eq!(b.extra_draws, 1);
    }

    #[test]
    fn test_remarking_a_paid_line_grants_nothing() {
        let mut b = board();
        for i in 0..5 {
            b.toggle_cell(i).unwrap();
        }
        b.take_extra_draw();

        for _ in 0..3 {
            assert_eq!(b.toggle_cell(4).unwrap(), 0);
            assert_eq!(b.toggle_cell(4).unwrap(), 0);
        }
        assert_eq!(b.lines_completed, 1);
        assert_eq!(b.max_lines_reached, 1);
        assert_eq!(b.extra_draws, 0);

        // A second, new line still pays
        for i in [5, 10, 15, 20] {
            b.toggle_cell(i).unwrap();
        }
        assert_eq!(b.lines_completed, 2);
        assert_eq!(b.extra_draws, 1);
    }

    #[test]
    fn test_out_of_range_cell() {
        let mut b = board();
        assert_eq!(b.toggle_cell(25), Err(Error::CellOutOfRange(25)));
    }

    #[test]
    fn test_roll_over_resets_progress() {
        let mut b = board();
        for i in 0..5 {
            b.toggle_cell(i).unwrap();
        }
        assert!(!b.roll_over("2024-01"));
        assert!(b.roll_over("2024-02"));
        assert_eq!(b.month, "2024-02");
        assert_eq!(b.completed_cells(), 0);
        assert_eq!(b.lines_completed, 0);
        assert_eq!(b.max_lines_reached, 0);
        assert_eq!(b.extra_draws, 0);
        assert_eq!(b.labels.len(), CELL_COUNT);
    }

    #[test]
    fn test_take_extra_draw() {
        let mut b = board();
        assert!(!b.take_extra_draw());
        b.extra_draws = 1;
        assert!(b.take_extra_draw());
        assert!(!b.take_extra_draw());
    }

    #[test]
    fn test_label_count_checked() {
        assert_eq!(
            BingoBoard::new("2024-01", vec!["x".to_string()]),
            Err(Error::InvalidLabelCount(1))
        );
    }
}
