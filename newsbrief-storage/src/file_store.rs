//! JSON file snapshot store
//!
//! The build-time alternative to the persistence API: the generation job
//! writes the snapshot wholesale to a fixed file, the presentation layer
//! reads it wholesale.

use std::path::{Path, PathBuf};

use newsbrief_core::{DailyNewsData, WeeklyNewsData};

use crate::error::StorageError;

/// File name for the daily snapshot
pub const DAILY_FILE: &str = "daily-news.json";
/// File name for the weekly snapshot
pub const WEEKLY_FILE: &str = "news.json";

/// Snapshot store writing JSON files under one directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the daily snapshot, replacing any previous one
    pub fn write_daily(&self, data: &DailyNewsData) -> Result<PathBuf, StorageError> {
        self.write(DAILY_FILE, data)
    }

    /// Write the weekly snapshot, replacing any previous one
    pub fn write_weekly(&self, data: &WeeklyNewsData) -> Result<PathBuf, StorageError> {
        self.write(WEEKLY_FILE, data)
    }

    /// Read the daily snapshot, if one has been written
    pub fn read_daily(&self) -> Result<Option<DailyNewsData>, StorageError> {
        self.read(DAILY_FILE)
    }

    /// Read the weekly snapshot, if one has been written
    pub fn read_weekly(&self) -> Result<Option<WeeklyNewsData>, StorageError> {
        self.read(WEEKLY_FILE)
    }

    fn write<T: serde::Serialize>(&self, name: &str, data: &T) -> Result<PathBuf, StorageError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::Io(format!("Failed to create {:?}: {}", self.dir, e)))?;

        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        std::fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {:?}: {}", path, e)))?;

        Ok(path)
    }

    fn read<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StorageError> {
        let path = self.dir.join(name);
        if !Path::new(&path).exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {:?}: {}", path, e)))?;
        let data = serde_json::from_str(&json)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;

        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use newsbrief_core::{CategorySummary, Importance, NewsSummary};

    fn temp_store(tag: &str) -> FileStore {
        let dir = std::env::temp_dir()
            .join("newsbrief-file-store-tests")
            .join(format!("{}-{}", tag, std::process::id()));
        FileStore::new(dir)
    }

    fn daily() -> DailyNewsData {
        DailyNewsData {
            generated_at: Utc.with_ymd_and_hms(2025, 3, 1, 22, 0, 0).unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            summary: NewsSummary {
                overview: "개요".to_string(),
                highlights: vec![],
                categories: vec![CategorySummary {
                    name: "정치".to_string(),
                    summary: "요약".to_string(),
                    key_topics: vec![],
                    importance: Importance::Low,
                }],
            },
            articles: vec![],
            column: None,
        }
    }

    #[test]
    fn test_daily_round_trip() {
        let store = temp_store("daily");
        let data = daily();

        store.write_daily(&data).unwrap();
        let loaded = store.read_daily().unwrap().unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_read_without_write_is_none() {
        let store = temp_store("empty");
        assert!(store.read_weekly().unwrap().is_none());
    }

    #[test]
    fn test_second_write_replaces_first() {
        let store = temp_store("replace");

        let mut data = daily();
        store.write_daily(&data).unwrap();
        data.summary.overview = "수정된 개요".to_string();
        store.write_daily(&data).unwrap();

        let loaded = store.read_daily().unwrap().unwrap();
        assert_eq!(loaded.summary.overview, "수정된 개요");
    }
}
