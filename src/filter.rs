/*!
 * Ignore-list loading and path filtering
 *
 * Patterns are matched as plain substrings of the full path. A pattern such as
 * `node_modules` therefore excludes any path containing that text anywhere,
 * including inside unrelated names.
 */

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default name of the project-specific ignore file
pub const DEFAULT_IGNORE_FILE: &str = ".code-zippy-ignore";

/// Ignore file consulted when the primary one is missing
pub const FALLBACK_IGNORE_FILE: &str = ".gitignore";

/// Marker for comment lines in an ignore file
const COMMENT_MARKER: char = '#';

/// Ordered, immutable list of ignore patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    patterns: Vec<String>,
    source: Option<PathBuf>,
}

impl IgnoreList {
    /// Build a list from explicit patterns
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            source: None,
        }
    }

    /// Load the ignore list for `root`.
    ///
    /// Looks for `root/<file_name>` first, then `root/.gitignore`. When neither
    /// exists the list is empty. A missing root is not reported here; the
    /// traversal fails on it instead.
    pub fn load(root: &Path, file_name: &str) -> Result<Self> {
        let candidates = [root.join(file_name), root.join(FALLBACK_IGNORE_FILE)];

        match candidates.into_iter().find(|path| path.is_file()) {
            Some(path) => {
                let content = fs::read_to_string(&path)?;
                Ok(Self {
                    patterns: parse_patterns(&content),
                    source: Some(path),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Patterns in file order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Ignore file the patterns were read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check a path against this list
    pub fn should_ignore(&self, path: &Path) -> bool {
        should_ignore(path, &self.patterns)
    }
}

/// Parse ignore-file content into patterns
pub fn parse_patterns(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .map(String::from)
        .collect()
}

/// A path is ignored when any pattern occurs in it as a literal substring
pub fn should_ignore<S: AsRef<str>>(path: &Path, patterns: &[S]) -> bool {
    let path = path.to_string_lossy();
    patterns
        .iter()
        .any(|pattern| path.contains(pattern.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parse_patterns() {
        let content = "# build output\ntarget\n\n   node_modules  \r\n#dist\n.env\n";
        assert_eq!(parse_patterns(content), vec!["target", "node_modules", ".env"]);
    }

    #[test]
    fn test_substring_matching() {
        let patterns = ["node_modules"];
        assert!(should_ignore(Path::new("/src/node_modules/a.js"), &patterns));
        // Partial matches inside unrelated names count too
        assert!(should_ignore(Path::new("/src/my_node_modules_backup"), &patterns));
        assert!(!should_ignore(Path::new("/src/lib/index.js"), &patterns));
    }

    #[test]
    fn test_no_glob_expansion() {
        let patterns = ["*.log"];
        assert!(!should_ignore(Path::new("/var/app/debug.log"), &patterns));
        assert!(should_ignore(Path::new("/var/app/*.log"), &patterns));
    }

    #[test]
    fn test_empty_list_ignores_nothing() {
        let list = IgnoreList::default();
        assert!(list.is_empty());
        assert!(!list.should_ignore(Path::new("/anything/at/all")));
    }

    #[test]
    fn test_should_ignore_is_pure() {
        let list = IgnoreList::new(["sub", "tmp"]);
        let path = Path::new("/project/sub/file.rs");
        let first = list.should_ignore(path);
        for _ in 0..5 {
            assert_eq!(list.should_ignore(path), first);
        }
        assert!(first);
    }

    #[test]
    fn test_load_prefers_primary_file() {
        let dir = tempdir().unwrap();
        let mut primary = File::create(dir.path().join(DEFAULT_IGNORE_FILE)).unwrap();
        writeln!(primary, "# comment\nsecret").unwrap();
        let mut git = File::create(dir.path().join(FALLBACK_IGNORE_FILE)).unwrap();
        writeln!(git, "target").unwrap();

        let list = IgnoreList::load(dir.path(), DEFAULT_IGNORE_FILE).unwrap();
        assert_eq!(list.patterns(), ["secret"]);
        assert_eq!(list.source(), Some(dir.path().join(DEFAULT_IGNORE_FILE).as_path()));
    }

    #[test]
    fn test_load_falls_back_to_gitignore() {
        let dir = tempdir().unwrap();
        let mut git = File::create(dir.path().join(FALLBACK_IGNORE_FILE)).unwrap();
        writeln!(git, "target\n\nnode_modules").unwrap();

        let list = IgnoreList::load(dir.path(), DEFAULT_IGNORE_FILE).unwrap();
        assert_eq!(list.patterns(), ["target", "node_modules"]);
    }

    #[test]
    fn test_load_custom_file_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".myignore"), "vendor\n").unwrap();

        let list = IgnoreList::load(dir.path(), ".myignore").unwrap();
        assert_eq!(list.patterns(), ["vendor"]);
    }

    #[test]
    fn test_load_without_any_file() {
        let dir = tempdir().unwrap();
        let list = IgnoreList::load(dir.path(), DEFAULT_IGNORE_FILE).unwrap();
        assert!(list.is_empty());
        assert!(list.source().is_none());
    }

    #[test]
    fn test_load_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let list = IgnoreList::load(&dir.path().join("nope"), DEFAULT_IGNORE_FILE).unwrap();
        assert!(list.is_empty());
    }
}
