/*!
 * Zip packing of the staging directory
 */

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;

/// Maximum deflate level
const COMPRESSION_LEVEL: i64 = 9;

/// Pack the contents of `dir` (not `dir` itself) into a zip at `zip_path`.
///
/// Entries are added sorted by name so identical trees give identical entry
/// order. Returns the archive size in bytes.
pub fn create_zip(dir: &Path, zip_path: &Path) -> Result<u64> {
    if let Some(parent) = zip_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(zip_path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(entry.path().strip_prefix(dir).unwrap_or(entry.path()));

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else {
            zip.start_file(name, options)?;
            let mut source = File::open(entry.path())?;
            io::copy(&mut source, &mut zip)?;
        }
    }

    let mut writer = zip.finish()?;
    writer.flush()?;
    drop(writer);

    Ok(fs::metadata(zip_path)?.len())
}

/// Move a finished archive to its final location.
///
/// Falls back to copy and remove when a rename is not possible, e.g. across
/// file systems.
pub fn relocate(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_err() {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

/// Zip entry names always use forward slashes
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
