//! Core types for the Newsbrief pipeline
//!
//! This crate defines the shared data structures used across the pipeline:
//! news items, summaries, snapshots, and the fixed category set that every
//! summary must enumerate.

pub mod category;
pub mod news;

pub use category::NewsCategory;
pub use news::{
    CategorySummary, DailyNewsData, Importance, NewsColumn, NewsItem, NewsSummary, Period,
    WeeklyNewsData,
};
