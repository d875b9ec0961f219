//! SQLite request-queue implementation

use crate::queue::schema::initialize_schema;
use crate::queue::{EnqueueOutcome, QueueResult, QueuedRequest, RequestQueue};
use crate::request::{CrawlTarget, PageTag};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed request queue
///
/// A single connection behind a mutex; insert-with-dedup rides on the
/// table's unique URL constraint, so concurrent enqueues of the same URL
/// collapse to one row.
pub struct SqliteQueue {
    conn: Mutex<Connection>,
}

impl SqliteQueue {
    /// Opens or creates a queue database at the given path
    pub fn new(path: &Path) -> QueueResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory queue (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> QueueResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Request counts per state, for the --stats mode
    pub fn state_counts(&self) -> QueueResult<Vec<(String, u64)>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT state, COUNT(*) FROM requests GROUP BY state ORDER BY state")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[async_trait]
impl RequestQueue for SqliteQueue {
    async fn enqueue(&self, target: CrawlTarget) -> QueueResult<EnqueueOutcome> {
        let payload = target.tag.payload_json()?;
        let now = Utc::now().to_rfc3339();

        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "INSERT INTO requests (url, kind, payload, state, enqueued_at)
             VALUES (?1, ?2, ?3, 'pending', ?4)
             ON CONFLICT(url) DO NOTHING",
            params![target.url, target.tag.kind_str(), payload, now],
        )?;

        if changed == 0 {
            Ok(EnqueueOutcome::Duplicate)
        } else {
            Ok(EnqueueOutcome::Inserted)
        }
    }

    async fn reserve_batch(&self, limit: usize) -> QueueResult<Vec<QueuedRequest>> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let reserved = {
            let mut stmt = tx.prepare(
                "SELECT id, url, kind, payload FROM requests
                 WHERE state = 'pending' ORDER BY id LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(params![limit as i64], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            let now = Utc::now().to_rfc3339();
            let mut reserved = Vec::with_capacity(rows.len());
            for (id, url, kind, payload) in rows {
                tx.execute(
                    "UPDATE requests SET state = 'in-flight', updated_at = ?1 WHERE id = ?2",
                    params![now, id],
                )?;
                let tag = PageTag::from_parts(&kind, payload.as_deref());
                if tag.is_none() {
                    tracing::warn!("Request {} has unrecognized kind '{}'", url, kind);
                }
                reserved.push(QueuedRequest { id, url, tag });
            }
            reserved
        };

        tx.commit()?;
        Ok(reserved)
    }

    async fn mark_done(&self, id: i64) -> QueueResult<()> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE requests SET state = 'done', updated_at = ?1 WHERE id = ?2",
            params![now, id],
        )?;
        if changed == 0 {
            return Err(crate::queue::QueueError::RequestNotFound(id));
        }
        Ok(())
    }

    async fn mark_failed(&self, id: i64, retry_count: u32, error: &str) -> QueueResult<()> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE requests SET state = 'failed', retry_count = ?1, error_message = ?2,
             updated_at = ?3 WHERE id = ?4",
            params![retry_count, error, now, id],
        )?;
        if changed == 0 {
            return Err(crate::queue::QueueError::RequestNotFound(id));
        }
        Ok(())
    }

    async fn pending_count(&self) -> QueueResult<u64> {
        let conn = self.conn.lock().unwrap();
        let count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM requests WHERE state = 'pending'",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    async fn reset_in_flight(&self) -> QueueResult<u64> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE requests SET state = 'pending', updated_at = ?1 WHERE state = 'in-flight'",
            params![now],
        )?;
        Ok(changed as u64)
    }

    async fn clear(&self) -> QueueResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM requests", [])?;
        Ok(())
    }
}
