//! Directory scanner for discovering rule and template files

use crate::error::Result;
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file discovered by the scanner
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: String,
    /// File size in bytes
    pub size: u64,
}

/// File scanner matching file names against glob patterns
pub struct Scanner {
    /// Root directory to scan
    root: PathBuf,
    /// Include patterns (glob); empty matches everything
    patterns: Vec<Pattern>,
    /// Maximum depth below the root (1 = direct children only)
    max_depth: Option<usize>,
    /// Whether dot-files and dot-directories are visited
    include_hidden: bool,
}

impl Scanner {
    /// Create a new scanner
    pub fn new<P: AsRef<Path>>(root: P, patterns: &[&str]) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Scanner {
            root,
            patterns,
            max_depth: None,
            include_hidden: false,
        })
    }

    /// Limit how deep below the root the scan descends
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Visit dot-files and dot-directories too
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Scan for all matching files, sorted by file name within each directory
    pub fn scan(&self) -> impl Iterator<Item = ScanResult> + '_ {
        let mut walker = WalkDir::new(&self.root).sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        walker
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e.path()))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches(e.path()))
            .filter_map(|e| {
                let metadata = e.metadata().ok()?;
                let relative_path = e
                    .path()
                    .strip_prefix(&self.root)
                    .ok()?
                    .to_string_lossy()
                    .replace('\\', "/");

                Some(ScanResult {
                    path: e.path().to_path_buf(),
                    relative_path,
                    size: metadata.len(),
                })
            })
    }

    /// Check if a file name matches any include pattern
    fn matches(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        self.patterns.iter().any(|p| p.matches(filename))
    }

    /// Check if a path should be skipped
    fn is_excluded(&self, path: &Path) -> bool {
        // Never exclude the root directory itself
        if path == self.root || self.include_hidden {
            return false;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        name.starts_with('.')
    }
}
