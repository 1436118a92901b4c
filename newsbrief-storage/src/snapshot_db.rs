//! SQLite snapshot store
//!
//! Backs the persistence API: one row per calendar date (daily) or per
//! (week start, week end) pair (weekly), upserted on conflict. Summary,
//! articles, and column are stored as JSON text columns.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use newsbrief_core::{DailyNewsData, NewsColumn, WeeklyNewsData};

use crate::error::StorageError;

/// Snapshot store using SQLite
pub struct SnapshotStore {
    conn: Mutex<Connection>,
}

impl SnapshotStore {
    /// Open (or create) the store at the given path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Io(format!("Failed to create database directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path)?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;

        Ok(store)
    }

    /// Create an in-memory store (useful for testing)
    pub fn new_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;

        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Lock)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS daily_news (
                date TEXT PRIMARY KEY,
                generated_at TEXT NOT NULL,
                summary TEXT NOT NULL,
                articles TEXT NOT NULL,
                column_json TEXT
            );

            CREATE TABLE IF NOT EXISTS weekly_news (
                week_start TEXT NOT NULL,
                week_end TEXT NOT NULL,
                generated_at TEXT NOT NULL,
                summary TEXT NOT NULL,
                articles TEXT NOT NULL,
                column_json TEXT,
                PRIMARY KEY (week_start, week_end)
            );
            "#,
        )?;

        Ok(())
    }

    /// Insert or update the daily snapshot for its date
    pub fn upsert_daily(&self, data: &DailyNewsData) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Lock)?;

        conn.execute(
            r#"
            INSERT INTO daily_news (date, generated_at, summary, articles, column_json)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(date) DO UPDATE SET
                generated_at = excluded.generated_at,
                summary = excluded.summary,
                articles = excluded.articles,
                column_json = excluded.column_json
            "#,
            params![
                data.date.format("%Y-%m-%d").to_string(),
                data.generated_at.to_rfc3339(),
                to_json(&data.summary)?,
                to_json(&data.articles)?,
                data.column.as_ref().map(to_json).transpose()?,
            ],
        )?;

        Ok(())
    }

    /// Insert or update the weekly snapshot for its (start, end) pair
    pub fn upsert_weekly(&self, data: &WeeklyNewsData) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Lock)?;

        conn.execute(
            r#"
            INSERT INTO weekly_news (week_start, week_end, generated_at, summary, articles, column_json)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(week_start, week_end) DO UPDATE SET
                generated_at = excluded.generated_at,
                summary = excluded.summary,
                articles = excluded.articles,
                column_json = excluded.column_json
            "#,
            params![
                data.week_start.format("%Y-%m-%d").to_string(),
                data.week_end.format("%Y-%m-%d").to_string(),
                data.generated_at.to_rfc3339(),
                to_json(&data.summary)?,
                to_json(&data.articles)?,
                data.column.as_ref().map(to_json).transpose()?,
            ],
        )?;

        Ok(())
    }

    /// Most recent daily snapshot by date, if any
    pub fn latest_daily(&self) -> Result<Option<DailyNewsData>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Lock)?;

        let row = conn
            .query_row(
                r#"
                SELECT date, generated_at, summary, articles, column_json
                FROM daily_news
                ORDER BY date DESC
                LIMIT 1
                "#,
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, Option<String>>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((date, generated_at, summary, articles, column_json)) = row else {
            return Ok(None);
        };

        Ok(Some(DailyNewsData {
            generated_at: parse_timestamp(&generated_at)?,
            date: parse_date(&date)?,
            summary: from_json(&summary)?,
            articles: from_json(&articles)?,
            column: parse_column(column_json)?,
        }))
    }

    /// Most recent weekly snapshot by week start, if any
    pub fn latest_weekly(&self) -> Result<Option<WeeklyNewsData>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Lock)?;

        let row = conn
            .query_row(
                r#"
                SELECT week_start, week_end, generated_at, summary, articles, column_json
                FROM weekly_news
                ORDER BY week_start DESC
                LIMIT 1
                "#,
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((week_start, week_end, generated_at, summary, articles, column_json)) = row
        else {
            return Ok(None);
        };

        Ok(Some(WeeklyNewsData {
            generated_at: parse_timestamp(&generated_at)?,
            week_start: parse_date(&week_start)?,
            week_end: parse_date(&week_end)?,
            summary: from_json(&summary)?,
            articles: from_json(&articles)?,
            column: parse_column(column_json)?,
        }))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, StorageError> {
    serde_json::from_str(json).map_err(|e| StorageError::Serialize(e.to_string()))
}

fn parse_column(column_json: Option<String>) -> Result<Option<NewsColumn>, StorageError> {
    column_json.as_deref().map(from_json).transpose()
}

fn parse_date(raw: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| StorageError::Serialize(format!("Invalid stored date '{}': {}", raw, e)))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| StorageError::Serialize(format!("Invalid stored timestamp '{}': {}", raw, e)))
}
