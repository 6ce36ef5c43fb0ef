//! Read-only rule store
//!
//! The store is a directory tree laid out as `<root>/<purpose>/<name>.mdc`.
//! Nothing in this module writes to disk.

use crate::descriptions::{self, NO_DESCRIPTION};
use crate::error::{Error, Result};
use crate::purpose::Purpose;
use crate::scanner::Scanner;
use crate::{frontmatter, validate_segment, RULE_EXTENSION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A rule file within one purpose directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFile {
    /// File name, including the `.mdc` extension
    pub name: String,
    /// Storage path
    pub path: PathBuf,
    /// Human-readable description
    pub description: String,
}

/// All rule files of a single purpose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurposeRules {
    /// Purpose the files belong to
    pub purpose: Purpose,
    /// Rule files, sorted by name
    pub files: Vec<RuleFile>,
}

/// Rule store rooted at a directory of purpose subdirectories
#[derive(Debug, Clone)]
pub struct RuleStore {
    root: PathBuf,
}

impl RuleStore {
    /// Open a store rooted at `root`. The directory does not need to exist.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source directory for a purpose name.
    ///
    /// Fails with `InvalidParameter` unless `purpose` is a single plain path segment.
    pub fn purpose_dir(&self, purpose: &str) -> Result<PathBuf> {
        let purpose = validate_segment("purpose", purpose)?;
        Ok(self.root.join(purpose))
    }

    /// List rule files, either for one purpose or for every default purpose.
    ///
    /// Purposes without a directory are skipped; a filtered listing of a
    /// missing purpose is an empty vector rather than an error.
    pub fn list(&self, purpose: Option<Purpose>) -> Result<Vec<PurposeRules>> {
        let purposes: Vec<Purpose> = match purpose {
            Some(p) => vec![p],
            None => Purpose::DEFAULT.to_vec(),
        };

        let mut listings = Vec::new();
        for purpose in purposes {
            let dir = self.root.join(purpose.as_str());
            if !dir.is_dir() {
                tracing::debug!("Skipping {}: no directory at {}", purpose, dir.display());
                continue;
            }

            let files = self.rule_files(&dir)?;
            tracing::debug!("Found {} rule files for {}", files.len(), purpose);
            listings.push(PurposeRules { purpose, files });
        }

        Ok(listings)
    }

    /// Fetch the raw text of a rule file.
    ///
    /// `name` may be given with or without the `.mdc` extension.
    pub fn get(&self, purpose: Option<&str>, name: Option<&str>) -> Result<String> {
        let purpose = required("purpose", purpose)?;
        let name = required("ruleName", name)?;

        let dir = self.purpose_dir(purpose)?;
        let file_name = rule_file_name(validate_segment("ruleName", name)?);
        let path = dir.join(&file_name);

        if !path.is_file() {
            return Err(Error::NotFound(format!("{}/{}", purpose, file_name)));
        }

        tracing::debug!("Reading rule {}", path.display());
        Ok(std::fs::read_to_string(&path)?)
    }

    fn rule_files(&self, dir: &Path) -> Result<Vec<RuleFile>> {
        let pattern = format!("*.{}", RULE_EXTENSION);
        let scanner = Scanner::new(dir, &[pattern.as_str()])?.max_depth(1);

        Ok(scanner
            .scan()
            .map(|entry| {
                let description = describe(&entry.relative_path, &entry.path);
                RuleFile {
                    name: entry.relative_path,
                    path: entry.path,
                    description,
                }
            })
            .collect())
    }
}

/// Resolve a rule's description: built-in table, then front matter, then placeholder
fn describe(name: &str, path: &Path) -> String {
    if let Some(description) = descriptions::lookup(name) {
        return description.to_string();
    }

    std::fs::read(path)
        .ok()
        .and_then(|bytes| frontmatter::description(&String::from_utf8_lossy(&bytes)))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

fn required<'a>(param: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::MissingParameter(param.to_string())),
    }
}

fn rule_file_name(name: &str) -> String {
    let suffix = format!(".{}", RULE_EXTENSION);
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}
