//! Rule installer
//!
//! Copies whole purpose directories from the rule store into a project's
//! rule tree (`<project>/.cursor/rules/<purpose>` by default).

use crate::error::{Error, Result};
use crate::store::RuleStore;
use fs_extra::dir::{self, CopyOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rule subdirectory created under an installation target
pub const DEFAULT_RULES_SUBDIR: &str = ".cursor/rules";

/// Outcome of installing one purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStatus {
    /// Purpose directory copied into the project
    Enabled,
    /// Copy failed; see the report's `error`
    Error,
    /// Purpose has no directory in the store
    NotFound,
}

impl std::fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InstallStatus::Enabled => "enabled",
            InstallStatus::Error => "error",
            InstallStatus::NotFound => "not_found",
        };
        f.write_str(s)
    }
}

/// Per-purpose install report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReport {
    /// Requested purpose name
    pub purpose: String,
    /// Outcome
    pub status: InstallStatus,
    /// Target directory (set when enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Error message (set on error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InstallReport {
    fn enabled(purpose: &str, path: PathBuf) -> Self {
        Self {
            purpose: purpose.to_string(),
            status: InstallStatus::Enabled,
            path: Some(path),
            error: None,
        }
    }

    fn error(purpose: &str, error: &Error) -> Self {
        Self {
            purpose: purpose.to_string(),
            status: InstallStatus::Error,
            path: None,
            error: Some(error.to_string()),
        }
    }

    fn not_found(purpose: &str) -> Self {
        Self {
            purpose: purpose.to_string(),
            status: InstallStatus::NotFound,
            path: None,
            error: None,
        }
    }

    /// Whether the purpose was installed
    pub fn is_enabled(&self) -> bool {
        self.status == InstallStatus::Enabled
    }
}

/// Progress callback for installs
pub trait InstallProgress {
    /// Called after each purpose is processed
    fn on_purpose(&mut self, report: &InstallReport);
}

/// Progress sink that ignores everything
struct NoopProgress;

impl InstallProgress for NoopProgress {
    fn on_purpose(&mut self, _report: &InstallReport) {}
}

/// Installs purposes from a rule store into project directories
pub struct Installer<'a> {
    store: &'a RuleStore,
    rules_subdir: PathBuf,
}

impl<'a> Installer<'a> {
    /// Create an installer targeting the default `.cursor/rules` subdirectory
    pub fn new(store: &'a RuleStore) -> Self {
        Installer {
            store,
            rules_subdir: PathBuf::from(DEFAULT_RULES_SUBDIR),
        }
    }

    /// Use a different rule subdirectory under the installation target
    pub fn with_rules_subdir<P: AsRef<Path>>(mut self, subdir: P) -> Self {
        self.rules_subdir = subdir.as_ref().to_path_buf();
        self
    }

    /// Rule directory inside `project`
    pub fn rules_dir(&self, project: &Path) -> PathBuf {
        project.join(&self.rules_subdir)
    }

    /// Install each purpose into `project` (current directory when `None`).
    ///
    /// Returns one report per requested purpose, in input order. Only an
    /// empty purpose list or an unresolvable current directory fail the call;
    /// per-purpose problems are reported with `error`/`not_found` status.
    pub fn enable(&self, purposes: &[String], project: Option<&Path>) -> Result<Vec<InstallReport>> {
        self.enable_with_progress(purposes, project, &mut NoopProgress)
    }

    /// Install with progress reporting
    pub fn enable_with_progress(
        &self,
        purposes: &[String],
        project: Option<&Path>,
        progress: &mut dyn InstallProgress,
    ) -> Result<Vec<InstallReport>> {
        if purposes.is_empty() {
            return Err(Error::MissingParameter("purposes".to_string()));
        }

        let project = match project {
            Some(p) => p.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let rules_dir = self.rules_dir(&project);

        tracing::info!(
            "Enabling {} purpose(s) in {}",
            purposes.len(),
            rules_dir.display()
        );

        let mut reports = Vec::with_capacity(purposes.len());
        for purpose in purposes {
            let report = self.enable_one(purpose, &rules_dir);
            match report.status {
                InstallStatus::Enabled => tracing::info!("Enabled {}", purpose),
                InstallStatus::NotFound => tracing::warn!("Purpose not found: {}", purpose),
                InstallStatus::Error => tracing::warn!(
                    "Failed to enable {}: {}",
                    purpose,
                    report.error.as_deref().unwrap_or_default()
                ),
            }
            progress.on_purpose(&report);
            reports.push(report);
        }

        Ok(reports)
    }

    fn enable_one(&self, purpose: &str, rules_dir: &Path) -> InstallReport {
        let source = match self.store.purpose_dir(purpose) {
            Ok(source) => source,
            Err(e) => return InstallReport::error(purpose, &e),
        };

        if !source.is_dir() {
            return InstallReport::not_found(purpose);
        }

        let target = rules_dir.join(purpose);
        match copy_dir_contents(&source, &target) {
            Ok(()) => InstallReport::enabled(purpose, target),
            Err(e) => InstallReport::error(purpose, &e),
        }
    }
}

/// Copy a directory's contents into `dst`, creating it and overwriting files
pub(crate) fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
    let failure = |message: String| Error::CopyFailure {
        path: dst.to_path_buf(),
        message,
    };

    std::fs::create_dir_all(dst).map_err(|e| failure(e.to_string()))?;

    let options = CopyOptions::new().content_only(true).overwrite(true);
    dir::copy(src, dst, &options).map_err(|e| failure(e.to_string()))?;

    tracing::debug!("Copied {} -> {}", src.display(), dst.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_store() -> (RuleStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("core/nested")).unwrap();
        fs::write(dir.path().join("core/workflow.mdc"), "# Workflow").unwrap();
        fs::write(dir.path().join("core/nested/extra.mdc"), "# Extra").unwrap();
        (RuleStore::new(dir.path()), dir)
    }

    #[test]
    fn test_enable_copies_recursively() {
        let (store, _src) = create_store();
        let project = tempdir().unwrap();

        let reports = Installer::new(&store)
            .enable(&["core".to_string()], Some(project.path()))
            .unwrap();

        let target = project.path().join(".cursor/rules/core");
        assert_eq!(reports.len(), 1);
        assert!(reports[0].is_enabled());
        assert_eq!(reports[0].path.as_deref(), Some(target.as_path()));
        assert_eq!(fs::read_to_string(target.join("workflow.mdc")).unwrap(), "# Workflow");
        assert_eq!(fs::read_to_string(target.join("nested/extra.mdc")).unwrap(), "# Extra");
    }

    #[test]
    fn test_enable_overwrites_and_keeps_extra_files() {
        let (store, _src) = create_store();
        let project = tempdir().unwrap();
        let target = project.path().join(".cursor/rules/core");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("workflow.mdc"), "stale").unwrap();
        fs::write(target.join("local.mdc"), "mine").unwrap();

        let installer = Installer::new(&store);
        installer.enable(&["core".to_string()], Some(project.path())).unwrap();
        let reports = installer.enable(&["core".to_string()], Some(project.path())).unwrap();

        assert!(reports[0].is_enabled());
        assert_eq!(fs::read_to_string(target.join("workflow.mdc")).unwrap(), "# Workflow");
        assert_eq!(fs::read_to_string(target.join("local.mdc")).unwrap(), "mine");
    }

    #[test]
    fn test_enable_empty_list() {
        let (store, _src) = create_store();
        let result = Installer::new(&store).enable(&[], None);
        assert!(matches!(result, Err(Error::MissingParameter(p)) if p == "purposes"));
    }

    #[test]
    fn test_enable_traversal_is_error() {
        let (store, _src) = create_store();
        let project = tempdir().unwrap();

        let reports = Installer::new(&store)
            .enable(&["../core".to_string()], Some(project.path()))
            .unwrap();

        assert_eq!(reports[0].status, InstallStatus::Error);
        assert!(reports[0].error.as_deref().unwrap().contains("purpose"));
        assert!(!project.path().join(".cursor").exists());
    }

    #[test]
    fn test_enable_copy_failure_is_isolated() {
        let (store, _src) = create_store();
        let project = tempdir().unwrap();
        let not_a_dir = project.path().join("afile");
        fs::write(&not_a_dir, "plain file").unwrap();

        let reports = Installer::new(&store)
            .enable(
                &["core".to_string(), "backend".to_string()],
                Some(not_a_dir.as_path()),
            )
            .unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].status, InstallStatus::Error);
        assert!(reports[0].path.is_none());
        assert!(reports[0]
            .error
            .as_deref()
            .unwrap()
            .contains("Failed to copy into"));
        // The following purpose is still processed
        assert_eq!(reports[1].purpose, "backend");
        assert_eq!(reports[1].status, InstallStatus::NotFound);
    }

    #[test]
    fn test_custom_rules_subdir() {
        let (store, _src) = create_store();
        let project = tempdir().unwrap();

        let reports = Installer::new(&store)
            .with_rules_subdir("rules")
            .enable(&["core".to_string()], Some(project.path()))
            .unwrap();

        assert_eq!(
            reports[0].path.as_deref(),
            Some(project.path().join("rules/core").as_path())
        );
    }

    #[test]
    fn test_progress_called_per_purpose() {
        struct Collect(Vec<String>);
        impl InstallProgress for Collect {
            fn on_purpose(&mut self, report: &InstallReport) {
                self.0.push(format!("{}:{}", report.purpose, report.status));
            }
        }

        let (store, _src) = create_store();
        let project = tempdir().unwrap();
        let mut progress = Collect(Vec::new());

        Installer::new(&store)
            .enable_with_progress(
                &["core".to_string(), "backend".to_string()],
                Some(project.path()),
                &mut progress,
            )
            .unwrap();

        assert_eq!(progress.0, ["core:enabled", "backend:not_found"]);
    }

    #[test]
    fn test_report_serialization() {
        let report = InstallReport::not_found("api");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({"purpose": "api", "status": "not_found"}));
    }
}
