//! Configuration: rule store, template root and install subdirectory
//!
//! Values come from built-in defaults, then an optional YAML file, then
//! explicit overrides (CLI flags / environment) applied by the binaries.

use crate::error::{Error, Result};
use crate::installer::DEFAULT_RULES_SUBDIR;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the rule store (`<purpose>/<name>.mdc`)
    pub rules_dir: PathBuf,
    /// Root of the template store
    pub templates_dir: PathBuf,
    /// Rule directory created inside installation targets
    pub rules_subdir: PathBuf,
}

/// On-disk config file; every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    rules_dir: Option<PathBuf>,
    templates_dir: Option<PathBuf>,
    rules_subdir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let base = data_root();
        Self {
            rules_dir: base.join("rules"),
            templates_dir: base.join("templates"),
            rules_subdir: PathBuf::from(DEFAULT_RULES_SUBDIR),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default config file is
    /// read if present, otherwise defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        let file = match path {
            Some(p) => {
                if !p.is_file() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                Some(p.to_path_buf())
            }
            None => Some(default_config_path()).filter(|p| p.is_file()),
        };

        if let Some(file) = file {
            tracing::debug!("Loading config from {}", file.display());
            config.merge_file(&file)?;
        }

        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Ok(());
        }

        let file: ConfigFile = serde_yaml::from_str(&text)
            .map_err(|e| Error::Config(format!("Invalid config {}: {}", path.display(), e)))?;

        if let Some(dir) = file.rules_dir {
            self.rules_dir = dir;
        }
        if let Some(dir) = file.templates_dir {
            self.templates_dir = dir;
        }
        if let Some(subdir) = file.rules_subdir {
            if subdir.is_absolute() {
                return Err(Error::Config(format!(
                    "rules_subdir must be relative: {}",
                    subdir.display()
                )));
            }
            self.rules_subdir = subdir;
        }

        Ok(())
    }

    /// Apply explicit overrides (e.g. from CLI flags)
    pub fn with_overrides(mut self, rules_dir: Option<PathBuf>, templates_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = rules_dir {
            self.rules_dir = dir;
        }
        if let Some(dir) = templates_dir {
            self.templates_dir = dir;
        }
        self
    }
}

/// Data root: `<data_dir>/rulekit`
fn data_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rulekit")
}

/// Default config file: `<config_dir>/rulekit/config.yaml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rulekit")
        .join("config.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.rules_dir.ends_with("rulekit/rules"));
        assert!(config.templates_dir.ends_with("rulekit/templates"));
        assert_eq!(config.rules_subdir, PathBuf::from(".cursor/rules"));
    }

    #[test]
    fn test_load_file_partial() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "rules_dir: /srv/rules\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.rules_dir, PathBuf::from("/srv/rules"));
        assert_eq!(config.templates_dir, Config::default().templates_dir);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "rule_dir: /typo\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(Error::Config(_))));
    }

    #[test]
    fn test_absolute_subdir_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "rules_subdir: /etc\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/rulekit.yaml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default().with_overrides(Some(PathBuf::from("/a")), None);
        assert_eq!(config.rules_dir, PathBuf::from("/a"));
        assert_eq!(config.templates_dir, Config::default().templates_dir);
    }
}
