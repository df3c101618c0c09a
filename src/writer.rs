/*!
 * Snapshot writer for code-zippy
 *
 * Drives the whole pipeline against the staging directory: ignore list,
 * structure, file copies, optional JSON listings and chunks, then the archive.
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use serde::Serialize;

use crate::archive::{create_zip, relocate};
use crate::chunker::{chunk_content, MAX_PERSISTED_CHUNKS};
use crate::config::Config;
use crate::error::Result;
use crate::filter::IgnoreList;
use crate::report::{FileReportInfo, SnapshotOutcome};
use crate::scanner::Scanner;
use crate::summary::summarize;
use crate::tree::render_structure;
use crate::types::{FileEntry, FileRecord, FileSummary};

pub const STRUCTURE_FILE: &str = "structure.txt";
pub const FILES_DIR: &str = "files";
pub const FILES_JSON: &str = "files.json";
pub const SUMMARIES_JSON: &str = "summaries.json";
pub const CHUNKS_DIR: &str = "chunks";

/// Writes a snapshot of one source tree into a staging directory
pub struct SnapshotWriter {
    /// Writer configuration
    config: Config,
    /// Progress bar
    progress: Arc<ProgressBar>,
}

impl SnapshotWriter {
    /// Create a new snapshot writer
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Run every step in order, reading the ignore list from the source tree.
    /// The first failure aborts the run and leaves whatever was already
    /// written in place.
    pub fn run(&self) -> Result<SnapshotOutcome> {
        let source = fs::canonicalize(&self.config.source_dir)?;
        let ignore = IgnoreList::load(&source, &self.config.ignore_file)?;
        self.run_with_ignore(&ignore)
    }

    /// Run every step with an already resolved ignore list
    pub fn run_with_ignore(&self, ignore: &IgnoreList) -> Result<SnapshotOutcome> {
        let source = fs::canonicalize(&self.config.source_dir)?;
        let output = &self.config.output_dir;

        self.step("🧹 Preparing", format!("Clearing {}", output.display()));
        reset_dir(output)?;

        self.step("🌳 Structure", format!("Rendering {}", source.display()));
        let structure = render_structure(&source, ignore, "")?;
        fs::write(output.join(STRUCTURE_FILE), structure)?;

        let mut outcome = SnapshotOutcome {
            output_dir: output.clone(),
            structure_only: self.config.structure_only,
            ignore_source: ignore.source().map(Path::to_path_buf),
            files: Vec::new(),
            chunks_written: 0,
            archive: None,
        };

        if self.config.structure_only {
            return Ok(outcome);
        }

        self.step("🔎 Scanning", "Collecting files".to_string());
        let scanner = Scanner::new(&source, ignore);
        let paths = scanner.walk()?;
        let records = scanner.load(&paths)?;

        self.progress.set_length(records.len() as u64);
        self.step("📄 Copying", format!("{} files", records.len()));
        self.write_files(&records)?;

        let summaries: Vec<FileSummary> = records.iter().map(summarize).collect();
        outcome.files = summaries
            .iter()
            .map(|summary| FileReportInfo {
                path: summary.file.clone(),
                lines: summary.lines,
                chars: summary.characters,
            })
            .collect();

        if self.config.files_json {
            self.step("🗂️ Listing", FILES_JSON.to_string());
            let entries: Vec<FileEntry> = records.iter().map(FileEntry::from).collect();
            write_json(&output.join(FILES_JSON), &entries)?;
        }

        if self.config.summaries {
            self.step("📝 Summaries", SUMMARIES_JSON.to_string());
            write_json(&output.join(SUMMARIES_JSON), &summaries)?;
        }

        if self.config.chunks {
            self.step("🧩 Chunking", format!("{} characters per chunk", self.config.chunk_size));
            outcome.chunks_written = self.write_chunks(&records)?;
        }

        self.step("🗜️ Archiving", self.config.zip_path.display().to_string());
        create_zip(output, &self.config.zip_path)?;
        let archive_path = self.config.archive_path();
        relocate(&self.config.zip_path, &archive_path)?;
        let size = fs::metadata(&archive_path)?.len();
        outcome.archive = Some((archive_path, size));

        Ok(outcome)
    }

    fn step(&self, prefix: &'static str, message: String) {
        self.progress.set_prefix(prefix);
        self.progress.set_message(message);
    }

    /// Copy every record verbatim under `files/`
    fn write_files(&self, records: &[FileRecord]) -> Result<()> {
        let files_dir = self.config.output_dir.join(FILES_DIR);
        for record in records {
            write_with_parents(&files_dir.join(&record.relative_path), &record.content)?;
            self.progress.inc(1);
        }
        Ok(())
    }

    /// Write at most the first two chunks of every record under `chunks/`
    fn write_chunks(&self, records: &[FileRecord]) -> Result<usize> {
        let chunks_dir = self.config.output_dir.join(CHUNKS_DIR);
        let mut written = 0;

        for record in records {
            let base = chunks_dir.join(&record.relative_path);
            let chunks = chunk_content(&record.content, self.config.chunk_size);
            for (index, chunk) in chunks.iter().take(MAX_PERSISTED_CHUNKS).enumerate() {
                write_with_parents(&chunk_file_path(&base, index + 1), chunk)?;
                written += 1;
            }
        }

        Ok(written)
    }
}

/// `<base>.chunk<n>.txt`
pub fn chunk_file_path(base: &Path, n: usize) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".chunk{}.txt", n));
    PathBuf::from(name)
}

/// Remove `dir` if present and create it empty
fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

fn write_with_parents(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Pretty JSON with two-space indentation and a trailing newline
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}
