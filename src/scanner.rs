/*!
 * Directory traversal and file loading
 */

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::filter::IgnoreList;
use crate::types::FileRecord;

/// Scanner for the files of one source tree
pub struct Scanner<'a> {
    /// Absolute scan root
    root: PathBuf,
    /// Ignore patterns shared with the structure renderer
    ignore: &'a IgnoreList,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner rooted at `root`
    pub fn new(root: impl Into<PathBuf>, ignore: &'a IgnoreList) -> Self {
        Self {
            root: root.into(),
            ignore,
        }
    }

    /// Scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect every non-ignored file below the root.
    ///
    /// Depth-first, pre-order, in the order the OS lists each directory. An
    /// ignored directory is pruned with its whole subtree. Any read error
    /// aborts the walk.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.ignore.should_ignore(entry.path()));

        for entry in walker {
            let entry = entry?;
            if entry.depth() == 0 || entry.file_type().is_dir() {
                continue;
            }
            files.push(entry.into_path());
        }

        Ok(files)
    }

    /// Read every path into a [`FileRecord`].
    ///
    /// Content is decoded lossily, so binary files come back as garbled text
    /// rather than an error. Unreadable files abort the load.
    pub fn load(&self, paths: &[PathBuf]) -> Result<Vec<FileRecord>> {
        paths.iter().map(|path| self.load_file(path)).collect()
    }

    fn load_file(&self, path: &Path) -> Result<FileRecord> {
        let bytes = fs::read(path)?;
        let relative_path = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();

        Ok(FileRecord {
            path: path.to_path_buf(),
            relative_path,
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Entries directly inside `dir`, in OS listing order, links followed
pub fn list_dir(dir: &Path) -> Result<Vec<DirEntry>> {
    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn setup_tree() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join("README.md"), "# readme\n").unwrap();
        fs::write(dir.path().join("src/lib.rs"), "pub fn f() {}\n").unwrap();
        fs::write(dir.path().join("src/nested/deep.rs"), "// deep\n").unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.js"), "x").unwrap();
        dir
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        let mut rel: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().to_string())
            .collect();
        rel.sort();
        rel
    }

    #[test]
    fn test_walk_all_files() {
        let dir = setup_tree();
        let root = dir.path().canonicalize().unwrap();
        let ignore = IgnoreList::default();

        let files = Scanner::new(&root, &ignore).walk().unwrap();
        assert_eq!(
            relative(&root, &files),
            vec![
                "README.md",
                "node_modules/pkg/index.js",
                "src/lib.rs",
                "src/nested/deep.rs"
            ]
        );
        assert!(files.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_walk_prunes_ignored_directory() {
        let dir = setup_tree();
        let root = dir.path().canonicalize().unwrap();
        let ignore = IgnoreList::new(["node_modules", "nested"]);

        let files = Scanner::new(&root, &ignore).walk().unwrap();
        assert_eq!(relative(&root, &files), vec!["README.md", "src/lib.rs"]);
    }

    #[test]
    fn test_walk_is_pre_order() {
        let dir = setup_tree();
        let root = dir.path().canonicalize().unwrap();
        let ignore = IgnoreList::default();

        let files = Scanner::new(&root, &ignore).walk().unwrap();
        let lib = files.iter().position(|p| p.ends_with("src/lib.rs")).unwrap();
        let deep = files.iter().position(|p| p.ends_with("src/nested/deep.rs")).unwrap();
        let readme = files.iter().position(|p| p.ends_with("README.md")).unwrap();
        // Files of one directory stay contiguous with its subdirectories
        assert!(lib.abs_diff(deep) == 1);
        assert!(readme < lib.min(deep) || readme > lib.max(deep));
    }

    #[test]
    fn test_walk_missing_root_fails() {
        let dir = tempdir().unwrap();
        let ignore = IgnoreList::default();
        let scanner = Scanner::new(dir.path().join("missing"), &ignore);
        assert!(scanner.walk().is_err());
    }

    #[test]
    fn test_load_records() {
        let dir = setup_tree();
        let root = dir.path().canonicalize().unwrap();
        let ignore = IgnoreList::new(["node_modules"]);
        let scanner = Scanner::new(&root, &ignore);

        let files = scanner.walk().unwrap();
        let records = scanner.load(&files).unwrap();
        assert_eq!(records.len(), 3);

        let lib = records
            .iter()
            .find(|r| r.relative_path == Path::new("src/lib.rs"))
            .unwrap();
        assert_eq!(lib.content, "pub fn f() {}\n");
        assert_eq!(lib.path, root.join("src/lib.rs"));
    }

    #[test]
    fn test_load_binary_is_lossy() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let mut bin = File::create(root.join("blob.bin")).unwrap();
        bin.write_all(&[0x66, 0x6f, 0xff, 0x6f]).unwrap();

        let ignore = IgnoreList::default();
        let scanner = Scanner::new(&root, &ignore);
        let records = scanner.load(&[root.join("blob.bin")]).unwrap();
        assert_eq!(records[0].content, "fo\u{FFFD}o");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let ignore = IgnoreList::default();
        let scanner = Scanner::new(dir.path(), &ignore);
        assert!(scanner.load(&[dir.path().join("gone.txt")]).is_err());
    }

    #[test]
    fn test_list_dir_single_level() {
        let dir = setup_tree();
        let mut names: Vec<String> = list_dir(dir.path())
            .unwrap()
            .iter()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["README.md", "node_modules", "src"]);
    }
}
