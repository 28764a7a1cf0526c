//! Item record extracted from one detail page
//!
//! Field declaration order is the serialized order: `cover`, `name`,
//! `categories`, `published_at`, `drama`, `score`.

use serde::{Deserialize, Serialize};

/// Structured data for a single listing item
///
/// Every field is independently optional. `score` stays raw text and
/// `published_at` is whatever `YYYY-MM-DD` string the page carried, valid
/// calendar date or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Cover image address
    pub cover: Option<String>,

    /// Item name; also the key records are stored under
    pub name: Option<String>,

    /// Category labels in page order, duplicates kept
    pub categories: Vec<String>,

    /// Release date text
    pub published_at: Option<String>,

    /// Synopsis
    pub drama: Option<String>,

    /// Score text
    pub score: Option<String>,
}

impl ItemRecord {
    /// Returns true when no rule matched anything
    pub fn is_empty(&self) -> bool {
        self.cover.is_none()
            && self.name.is_none()
            && self.categories.is_empty()
            && self.published_at.is_none()
            && self.drama.is_none()
            && self.score.is_none()
    }
}
