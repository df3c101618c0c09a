/*!
 * Core types and data structures for code-zippy
 */

use std::path::PathBuf;

use serde::Serialize;

/// A file loaded from the scanned tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
    /// Raw text content (invalid UTF-8 replaced)
    pub content: String,
}

impl FileRecord {
    /// Relative path as a display string
    pub fn relative_display(&self) -> String {
        self.relative_path.to_string_lossy().to_string()
    }
}

/// Per-file metadata written to `summaries.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Relative path of the summarized file
    pub file: String,
    /// Number of newline-separated segments (never zero)
    pub lines: usize,
    /// Number of characters in the content
    pub characters: usize,
    /// First five lines
    pub preview: String,
}

/// Entry of the aggregate `files.json` listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry<'a> {
    pub relative_path: String,
    pub content: &'a str,
}

impl<'a> From<&'a FileRecord> for FileEntry<'a> {
    fn from(record: &'a FileRecord) -> Self {
        Self {
            relative_path: record.relative_display(),
            content: &record.content,
        }
    }
}
