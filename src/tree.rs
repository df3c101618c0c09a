/*!
 * Folder structure rendering
 */

use std::path::Path;

use crate::error::Result;
use crate::filter::IgnoreList;
use crate::scanner::list_dir;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Render the entries below `dir` as an indented tree, one line per entry.
///
/// The root itself is not printed. Whether an entry is drawn as the last one
/// is decided by its index in the unfiltered listing, so when the final raw
/// entry is ignored the last visible entry keeps a `├── ` connector.
pub fn render_structure(dir: &Path, ignore: &IgnoreList, prefix: &str) -> Result<String> {
    let entries = list_dir(dir)?;
    let total = entries.len();
    let mut structure = String::new();

    for (index, entry) in entries.iter().enumerate() {
        if ignore.should_ignore(entry.path()) {
            continue;
        }

        let is_last = index + 1 == total;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        structure.push_str(prefix);
        structure.push_str(connector);
        structure.push_str(&entry.file_name().to_string_lossy());
        structure.push('\n');

        if entry.file_type().is_dir() {
            let child_prefix = format!(
                "{}{}",
                prefix,
                if is_last { SPACE_INDENT } else { PIPE_INDENT }
            );
            structure.push_str(&render_structure(entry.path(), ignore, &child_prefix)?);
        }
    }

    Ok(structure)
}
