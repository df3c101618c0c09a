/*!
 * Reporting functionality for code-zippy
 *
 * Renders the outcome of a snapshot run as console tables using the tabled
 * library.
 */

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

/// Information about a file in the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Relative path of the file
    pub path: String,
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// What a snapshot run produced
#[derive(Debug, Clone)]
pub struct SnapshotOutcome {
    /// Staging directory
    pub output_dir: PathBuf,
    /// Run stopped after structure.txt
    pub structure_only: bool,
    /// Ignore file the patterns came from, if any
    pub ignore_source: Option<PathBuf>,
    /// One entry per copied file, in walk order
    pub files: Vec<FileReportInfo>,
    /// Number of chunk files written
    pub chunks_written: usize,
    /// Final archive location and size in bytes
    pub archive: Option<(PathBuf, u64)>,
}

impl SnapshotOutcome {
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.lines).sum()
    }

    pub fn total_chars(&self) -> usize {
        self.files.iter().map(|f| f.chars).sum()
    }
}

/// Statistics for a whole run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Snapshot outcome
    pub outcome: SnapshotOutcome,
    /// Time taken by the run
    pub duration: Duration,
    /// When the run finished
    pub finished_at: DateTime<Local>,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for snapshot results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the tail of long paths, which carries the file name
    fn format_path(&self, path: &str, max_len: usize) -> String {
        let count = path.chars().count();
        if count <= max_len {
            return path.to_string();
        }
        let tail: String = path.chars().skip(count - (max_len - 3)).collect();
        format!("...{}", tail)
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let outcome = &report.outcome;
        let mut rows = vec![SummaryRow {
            key: "📂 Output Directory".to_string(),
            value: outcome.output_dir.display().to_string(),
        }];

        rows.push(SummaryRow {
            key: "🙈 Ignore File".to_string(),
            value: outcome
                .ignore_source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string()),
        });

        rows.push(SummaryRow {
            key: "⏱️ Process Time".to_string(),
            value: format!("{:.4?}", report.duration),
        });

        rows.push(SummaryRow {
            key: "🕒 Finished".to_string(),
            value: report.finished_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        });

        if !outcome.structure_only {
            rows.push(SummaryRow {
                key: "📄 Files Copied".to_string(),
                value: self.format_number(outcome.files.len()),
            });

            rows.push(SummaryRow {
                key: "📝 Total Lines".to_string(),
                value: self.format_number(outcome.total_lines()),
            });

            rows.push(SummaryRow {
                key: "📦 LLM Tokens".to_string(),
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(outcome.total_chars() / 4)
                ),
            });

            rows.push(SummaryRow {
                key: "🧩 Chunk Files".to_string(),
                value: self.format_number(outcome.chunks_written),
            });
        }

        if let Some((path, size)) = &outcome.archive {
            rows.push(SummaryRow {
                key: "🗜️ Archive".to_string(),
                value: format!("{} ({} bytes)", path.display(), size),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<_> = report.outcome.files.iter().collect();
        files.sort_by(|a, b| b.chars.cmp(&a.chars));

        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|info| FileRow {
                path: self.format_path(&info.path, 60),
                lines: self.format_number(info.lines),
                tokens: self.format_number(info.chars / 4),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);

        if report.outcome.structure_only {
            return format!("✅  STRUCTURE WRITTEN\n{}", summary_table);
        }

        let files_table = self.create_files_table(report);
        let files_title = if report.outcome.files.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  COPIED FILES"
        };

        format!(
            "{}\n{}\n\n✅  SNAPSHOT COMPLETE\n{}",
            files_title, files_table, summary_table
        )
    }
}
