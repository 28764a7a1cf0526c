//! JSON file persister
//!
//! Each record becomes `<root>/<stem>.json`, where the stem is derived from
//! the record's name. Records are pretty-printed with two-space indentation
//! and non-ASCII text written as-is.

use crate::output::traits::{OutputError, OutputResult, Persister};
use crate::record::ItemRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Stem used for records without a usable name
pub const UNNAMED_STEM: &str = "_unnamed";

/// File extension of persisted records
pub const RECORD_EXTENSION: &str = "json";

/// Writes records as JSON files under a root directory
#[derive(Debug, Clone)]
pub struct JsonPersister {
    root: PathBuf,
}

impl JsonPersister {
    /// Creates a persister for `root`; the directory is not touched yet
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the output root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the output root if missing; safe to call repeatedly
    pub fn ensure_root(&self) -> OutputResult<()> {
        fs::create_dir_all(&self.root).map_err(|source| OutputError::Write {
            path: self.root.clone(),
            source,
        })
    }

    /// Path a record is stored at
    pub fn path_for(&self, record: &ItemRecord) -> PathBuf {
        self.root.join(format!(
            "{}.{}",
            file_stem(record.name.as_deref()),
            RECORD_EXTENSION
        ))
    }
}

impl Persister for JsonPersister {
    fn persist(&self, record: &ItemRecord) -> OutputResult<PathBuf> {
        let path = self.path_for(record);
        let json = serde_json::to_string_pretty(record)?;

        fs::write(&path, json).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!("data saved successfully to {}", path.display());
        Ok(path)
    }
}

/// Derives a file stem from a record name
///
/// Path separators, characters rejected by common filesystems and control
/// characters become `_`. A missing or blank name, or one that would name
/// the current or parent directory, maps to [`UNNAMED_STEM`]. Distinct names
/// can map to the same stem; the later write wins.
pub fn file_stem(name: Option<&str>) -> String {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return UNNAMED_STEM.to_string();
    };

    if name == "." || name == ".." {
        return UNNAMED_STEM.to_string();
    }

    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Reads a persisted record back from disk
pub fn load_record(path: &Path) -> OutputResult<ItemRecord> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
