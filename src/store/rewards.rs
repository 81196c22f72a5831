//! Lottery history and wish list persistence

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::{DrawSource, LotteryRecord, PrizeKind, Wish, WishStatus};
use crate::engine::calendar::{format_date, parse_date};

// ============================================
// LOTTERY HISTORY
// ============================================

fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(LotteryRecord, String)> {
    let kind: String = row.get(2)?;
    let source: String = row.get(3)?;
    let record = LotteryRecord {
        id: row.get(0)?,
        prize: row.get(1)?,
        kind: PrizeKind::Item,
        source: DrawSource::parse(&source).unwrap_or(DrawSource::Points),
        drawn_at: row.get(4)?,
        used: row.get(5)?,
    };
    Ok((record, kind))
}

fn finish_record((mut record, kind): (LotteryRecord, String)) -> Result<LotteryRecord> {
    record.kind = kind
        .parse()
        .with_context(|| format!("Lottery record {} has a bad kind", record.id))?;
    Ok(record)
}

pub fn insert_record(conn: &Connection, record: &LotteryRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO lottery_history (id, prize, kind, source, drawn_at, used)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.id,
            record.prize,
            record.kind.as_str(),
            record.source.as_str(),
            record.drawn_at,
            record.used
        ],
    )?;
    Ok(())
}

/// Lottery history, newest first
pub fn load_records(conn: &Connection) -> Result<Vec<LotteryRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, prize, kind, source, drawn_at, used FROM lottery_history
         ORDER BY drawn_at DESC, rowid DESC",
    )?;
    let rows = stmt
        .query_map([], record_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(finish_record).collect()
}

pub fn find_record(conn: &Connection, id: &str) -> Result<Option<LotteryRecord>> {
    let row = conn
        .query_row(
            "SELECT id, prize, kind, source, drawn_at, used FROM lottery_history WHERE id = ?1",
            [id],
            record_from_row,
        )
        .optional()?;
    row.map(finish_record).transpose()
}

pub fn set_record_used(conn: &Connection, id: &str, used: bool) -> Result<()> {
    conn.execute(
        "UPDATE lottery_history SET used = ?2 WHERE id = ?1",
        params![id, used],
    )?;
    Ok(())
}

pub fn count_spins(conn: &Connection) -> Result<u32> {
    let count = conn.query_row("SELECT COUNT(*) FROM lottery_history", [], |r| r.get(0))?;
    Ok(count)
}

// ============================================
// WISHES
// ============================================

/// All wishes, oldest first
pub fn load_wishes(conn: &Connection) -> Result<Vec<Wish>> {
    let mut stmt =
        conn.prepare("SELECT id, title, status, created_at FROM wishes ORDER BY created_at, rowid")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(id, title, status, created_at)| {
            Ok(Wish {
                status: status
                    .parse()
                    .with_context(|| format!("Wish {id} has a bad status"))?,
                created_at: parse_date(&created_at)
                    .with_context(|| format!("Wish {id} has a bad creation date"))?,
                id,
                title,
            })
        })
        .collect()
}

pub fn insert_wish(conn: &Connection, wish: &Wish) -> Result<()> {
    conn.execute(
        "INSERT INTO wishes (id, title, status, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            wish.id,
            wish.title,
            wish.status.as_str(),
            format_date(wish.created_at)
        ],
    )?;
    Ok(())
}

/// Returns false if no wish has this id
pub fn update_wish_status(conn: &Connection, id: &str, status: WishStatus) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE wishes SET status = ?2 WHERE id = ?1",
        params![id, status.as_str()],
    )?;
    Ok(changed > 0)
}

/// Returns false if no wish has this id
pub fn delete_wish(conn: &Connection, id: &str) -> Result<bool> {
    let changed = conn.execute("DELETE FROM wishes WHERE id = ?1", [id])?;
    Ok(changed > 0)
}

pub fn count_completed_wishes(conn: &Connection) -> Result<u32> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM wishes WHERE status = ?1",
        [WishStatus::Completed.as_str()],
        |r| r.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use chrono::NaiveDate;

    fn record(id: &str, drawn_at: i64, kind: PrizeKind) -> LotteryRecord {
        LotteryRecord {
            id: id.to_string(),
            prize: "Movie night".to_string(),
            kind,
            source: DrawSource::BonusDraw,
            drawn_at,
            used: false,
        }
    }

    #[test]
    fn test_records_newest_first() {
        let store = Store::open_in_memory().unwrap();
        store
            .write(|conn| {
                insert_record(conn, &record("aaa", 1, PrizeKind::Item))?;
                insert_record(conn, &record("bbb", 2, PrizeKind::WishTicket))?;
                Ok(())
            })
            .unwrap();

        let records = store.read(load_records).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "bbb");
        assert_eq!(records[0].kind, PrizeKind::WishTicket);
        assert_eq!(records[0].source, DrawSource::BonusDraw);
        assert_eq!(store.read(count_spins).unwrap(), 2);
    }

    #[test]
    fn test_find_record_and_mark_used() {
        let store = Store::open_in_memory().unwrap();
        store
            .write(|conn| insert_record(conn, &record("abc123", 1, PrizeKind::WishTicket)))
            .unwrap();

        let found = store.read(|conn| find_record(conn, "abc123")).unwrap().unwrap();
        assert_eq!(found.kind, PrizeKind::WishTicket);
        assert!(!found.used);
        assert!(store.read(|conn| find_record(conn, "abc")).unwrap().is_none());

        store.write(|conn| set_record_used(conn, "abc123", true)).unwrap();
        let found = store.read(|conn| find_record(conn, "abc123")).unwrap().unwrap();
        assert!(found.used);
    }

    #[test]
    fn test_wish_lifecycle() {
        let store = Store::open_in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let wish = Wish::new("w1".into(), "Trip to Kyoto", today).unwrap();
        store.write(|conn| insert_wish(conn, &wish)).unwrap();

        assert!(
            store
                .write(|conn| update_wish_status(conn, "w1", WishStatus::Completed))
                .unwrap()
        );
        assert_eq!(store.read(count_completed_wishes).unwrap(), 1);
        assert_eq!(store.read(load_wishes).unwrap()[0].status, WishStatus::Completed);

        assert!(store.write(|conn| delete_wish(conn, "w1")).unwrap());
        assert!(!store.write(|conn| delete_wish(conn, "w1")).unwrap());
        assert!(store.read(load_wishes).unwrap().is_empty());
    }
}
