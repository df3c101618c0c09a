/*!
 * Per-file metadata summaries
 */

use crate::types::{FileRecord, FileSummary};

/// Number of leading lines kept in a preview
pub const PREVIEW_LINES: usize = 5;

/// Derive line count, character count and a short preview from a record.
///
/// Lines are the segments produced by splitting on `\n`, so empty content
/// counts as one line and a trailing newline adds an empty last line.
pub fn summarize(record: &FileRecord) -> FileSummary {
    let lines: Vec<&str> = record.content.split('\n').collect();

    FileSummary {
        file: record.relative_display(),
        lines: lines.len(),
        characters: record.content.chars().count(),
        preview: lines[..lines.len().min(PREVIEW_LINES)].join("\n"),
    }
}
