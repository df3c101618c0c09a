/*!
 * code-zippy - Snapshot a source tree for LLM context
 *
 * Writes the folder structure, verbatim file copies, per-file summaries and
 * size-bounded chunks of a directory into a staging directory, then bundles
 * everything into a single zip archive.
 */

pub mod archive;
pub mod chunker;
pub mod config;
pub mod error;
pub mod filter;
pub mod report;
pub mod scanner;
pub mod summary;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use chunker::{chunk_content, DEFAULT_CHUNK_SIZE, MAX_PERSISTED_CHUNKS};
pub use config::Config;
pub use error::{Result, SnapshotError};
pub use filter::{should_ignore, IgnoreList};
pub use report::{FileReportInfo, ReportFormat, Reporter, ScanReport, SnapshotOutcome};
pub use scanner::Scanner;
pub use summary::summarize;
pub use tree::render_structure;
pub use types::{FileEntry, FileRecord, FileSummary};
pub use utils::format_file_size;
pub use writer::SnapshotWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
