//! Project templates
//!
//! A template is a directory under the template root whose contents are
//! copied verbatim into a project.

use crate::error::{Error, Result};
use crate::installer::copy_dir_contents;
use crate::scanner::Scanner;
use crate::validate_segment;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Summary of an available template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    /// Template name (directory name)
    pub name: String,
    /// Template directory
    pub path: PathBuf,
    /// Number of files in the template
    pub files: usize,
    /// Total size of the template's files in bytes
    pub size: u64,
}

/// Read-only store of templates
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    /// Open a template store rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// List templates sorted by name. A missing root yields an empty list.
    pub fn list(&self) -> Result<Vec<TemplateInfo>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut templates = Vec::new();
        let entries = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !entry.file_type().is_dir() || name.starts_with('.') {
                continue;
            }

            let path = entry.into_path();
            let (files, size) = Scanner::new(&path, &[])?
                .include_hidden(true)
                .scan()
                .fold((0, 0), |(files, size), file| (files + 1, size + file.size));
            templates.push(TemplateInfo {
                name,
                path,
                files,
                size,
            });
        }

        Ok(templates)
    }

    /// Copy a template's contents into `dest`, returning `dest`
    pub fn apply(&self, name: &str, dest: &Path) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(Error::MissingParameter("template".to_string()));
        }

        let source = self.root.join(validate_segment("template", name)?);
        if !source.is_dir() {
            return Err(Error::NotFound(format!("template {}", name)));
        }

        tracing::info!("Applying template {} to {}", name, dest.display());
        copy_dir_contents(&source, dest)?;
        Ok(dest.to_path_buf())
    }
}
