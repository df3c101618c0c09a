/*!
 * Configuration handling for code-zippy
 */

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::chunker::DEFAULT_CHUNK_SIZE;
use crate::error::Result;
use crate::filter::DEFAULT_IGNORE_FILE;
use crate::{bail, ensure};

/// Name of the tool, also used for the final archive file
pub const TOOL_NAME: &str = "code-zippy";

/// Default staging directory
pub const DEFAULT_OUTPUT_DIR: &str = "_output";

/// Command-line arguments for code-zippy
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "code-zippy",
    version = env!("CARGO_PKG_VERSION"),
    about = "Snapshot a source tree for LLM context",
    long_about = "Writes the folder structure, verbatim file copies, per-file summaries and content chunks of a source tree into a staging directory and bundles them into a single zip archive."
)]
pub struct Args {
    /// Source folder to snapshot
    #[clap(required_unless_present = "generate")]
    pub source: Option<String>,

    /// Staging directory for the snapshot (cleared on every run)
    #[clap(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: String,

    /// Path the archive is written to before it is moved into the staging directory
    /// [default: <OUTPUT>.zip]
    #[clap(long)]
    pub zip: Option<String>,

    /// Only write structure.txt, skip file copies and the archive
    #[clap(long)]
    pub structure_only: bool,

    /// Do not write chunk files
    #[clap(long)]
    pub no_chunks: bool,

    /// Do not write summaries.json
    #[clap(long)]
    pub no_summary: bool,

    /// Also write files.json with every path and its content
    #[clap(long)]
    pub json: bool,

    /// Name of the ignore file looked up in the source folder
    #[clap(long, default_value = DEFAULT_IGNORE_FILE)]
    pub ignore_file: String,

    /// Chunk length in characters
    #[clap(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to snapshot
    pub source_dir: PathBuf,

    /// Staging directory
    pub output_dir: PathBuf,

    /// Where the archive is packed before being moved into `output_dir`
    pub zip_path: PathBuf,

    /// Primary ignore file name
    pub ignore_file: String,

    /// Stop after writing structure.txt
    pub structure_only: bool,

    /// Write chunk files
    pub chunks: bool,

    /// Write summaries.json
    pub summaries: bool,

    /// Write files.json
    pub files_json: bool,

    /// Chunk length in characters
    pub chunk_size: usize,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let output_dir = PathBuf::from(&args.output);
        let zip_path = args
            .zip
            .map(PathBuf::from)
            .unwrap_or_else(|| default_zip_path(&output_dir));

        Self {
            source_dir: PathBuf::from(args.source.unwrap_or_default()),
            output_dir,
            zip_path,
            ignore_file: args.ignore_file,
            structure_only: args.structure_only,
            chunks: !args.no_chunks,
            summaries: !args.no_summary,
            files_json: args.json,
            chunk_size: args.chunk_size,
        }
    }

    /// Configuration with default toggles for the given source and staging directories
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            source_dir: source_dir.into(),
            zip_path: default_zip_path(&output_dir),
            output_dir,
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            structure_only: false,
            chunks: true,
            summaries: true,
            files_json: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Final location of the archive inside the staging directory
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.zip", TOOL_NAME))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            bail!(
                PathNotFound,
                "Source directory not found: {}",
                self.source_dir.display()
            );
        }

        ensure!(self.chunk_size > 0, Config, "Chunk size must be greater than zero");
        ensure!(
            !self.ignore_file.is_empty(),
            Config,
            "Ignore file name must not be empty"
        );

        // The staging directory is wiped at the start of each run
        let source = self.source_dir.canonicalize()?;
        if let Some(output) = resolve_existing(&self.output_dir)? {
            ensure!(
                !source.starts_with(&output),
                Config,
                "Output directory {} would delete the source directory {}",
                self.output_dir.display(),
                self.source_dir.display()
            );
        }

        if self.zip_path.starts_with(&self.output_dir) {
            bail!(
                Config,
                "Archive path {} must be outside the output directory",
                self.zip_path.display()
            );
        }

        Ok(())
    }
}

/// `<output>.zip` next to the staging directory
fn default_zip_path(output_dir: &Path) -> PathBuf {
    let mut name = output_dir.as_os_str().to_owned();
    name.push(".zip");
    PathBuf::from(name)
}

/// Canonical form of `path` if it exists
fn resolve_existing(path: &Path) -> Result<Option<PathBuf>> {
    if path.exists() {
        Ok(Some(path.canonicalize()?))
    } else {
        Ok(None)
    }
}
