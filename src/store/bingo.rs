//! Bingo board persistence

use anyhow::{Result, bail};
use rusqlite::{Connection, OptionalExtension, params};

use crate::engine::bingo::{BingoBoard, CELL_COUNT};

/// Load the stored board, if one was ever saved
pub fn load_board(conn: &Connection) -> Result<Option<BingoBoard>> {
    let header: Option<(String, i64, i64, u32)> = conn
        .query_row(
            "SELECT month, lines_completed, max_lines_reached, extra_draws
             FROM bingo_board WHERE id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let Some((month, lines_completed, max_lines_reached, extra_draws)) = header else {
        return Ok(None);
    };

    let mut stmt = conn.prepare("SELECT idx, label, completed FROM bingo_cells ORDER BY idx")?;
    let cells = stmt
        .query_map([], |r| {
            Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?, r.get::<_, bool>(2)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    if cells.len() != CELL_COUNT {
        bail!("Bingo board has {} cells, expected {}", cells.len(), CELL_COUNT);
    }

    let mut labels = Vec::with_capacity(CELL_COUNT);
    let mut completed = [false; CELL_COUNT];
    for (idx, label, done) in cells {
        let Some(slot) = usize::try_from(idx).ok().filter(|&i| i < CELL_COUNT) else {
            bail!("Bingo cell index {} out of range", idx);
        };
        completed[slot] = done;
        labels.push(label);
    }

    Ok(Some(BingoBoard {
        month,
        labels,
        completed,
        lines_completed: usize::try_from(lines_completed).unwrap_or(0),
        max_lines_reached: usize::try_from(max_lines_reached).unwrap_or(0),
        extra_draws,
    }))
}

/// Overwrite the stored board
pub fn save_board(conn: &Connection, board: &BingoBoard) -> Result<()> {
    conn.execute(
        "INSERT INTO bingo_board (id, month, lines_completed, max_lines_reached, extra_draws)
         VALUES (1, ?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET month = excluded.month,
             lines_completed = excluded.lines_completed,
             max_lines_reached = excluded.max_lines_reached,
             extra_draws = excluded.extra_draws",
        params![
            board.month,
            board.lines_completed as i64,
            board.max_lines_reached as i64,
            board.extra_draws
        ],
    )?;

    let mut stmt = conn.prepare(
        "INSERT INTO bingo_cells (idx, label, completed) VALUES (?1, ?2, ?3)
         ON CONFLICT(idx) DO UPDATE SET label = excluded.label, completed = excluded.completed",
    )?;
    for (idx, (label, done)) in board.labels.iter().zip(board.completed.iter()).enumerate() {
        stmt.execute(params![idx as i64, label, done])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bingo::default_labels;
    use crate::store::Store;

    #[test]
    fn test_missing_board_is_none() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.read(load_board).unwrap().is_none());
    }

    #[test]
    fn test_board_roundtrip() {
        let store = Store::open_in_memory().unwrap();
        let mut board = BingoBoard::new("2024-04", default_labels()).unwrap();
        for i in 0..5 {
            board.toggle_cell(i).unwrap();
        }
        store.write(|conn| save_board(conn, &board)).unwrap();
        assert_eq!(store.read(load_board).unwrap(), Some(board.clone()));

        board.roll_over("2024-05");
        store.write(|conn| save_board(conn, &board)).unwrap();
        let loaded = store.read(load_board).unwrap().unwrap();
        assert_eq!(loaded.month, "2024-05");
        assert_eq!(loaded.extra_draws, 0);
        assert_eq!(loaded.completed_cells(), 0);
    }

    #[test]
    fn test_high_water_mark_survives_reload() {
        let store = Store::open_in_memory().unwrap();
        let mut board = BingoBoard::new("2024-04", default_labels()).unwrap();
        for i in 0..5 {
            board.toggle_cell(i).unwrap();
        }
        board.toggle_cell(0).unwrap();
        store.write(|conn| save_board(conn, &board)).unwrap();

        let mut loaded = store.read(load_board).unwrap().unwrap();
        assert_eq!(loaded.lines_completed, 0);
        assert_eq!(loaded.max_lines_reached, 1);
        assert_eq!(loaded.toggle_cell(0).unwrap(), 0);
    }
}
