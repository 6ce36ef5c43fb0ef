//! # rulekit
//!
//! Distribution of Cursor IDE rule files (`.mdc`) grouped by purpose.
//!
//! rulekit provides:
//! - **Rule listing** per purpose, with descriptions
//! - **Rule fetching** by purpose and name
//! - **Rule installation** of whole purposes into a project's `.cursor/rules`
//! - **Project templates** copied into new projects
//! - **MCP server** exposing the above to AI agents
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rulekit::{Installer, Purpose, RuleStore};
//! use std::path::Path;
//!
//! let store = RuleStore::new("/usr/share/rulekit/rules");
//!
//! for listing in store.list(Some(Purpose::Core)).unwrap() {
//!     for file in listing.files {
//!         println!("{}: {}", file.name, file.description);
//!     }
//! }
//!
//! let text = store.get(Some("core"), Some("workflow")).unwrap();
//! println!("{}", text);
//!
//! let reports = Installer::new(&store)
//!     .enable(&["core".to_string()], Some(Path::new("/tmp/proj")))
//!     .unwrap();
//! ```

pub mod config;
pub mod descriptions;
pub mod error;
pub mod frontmatter;
pub mod installer;
pub mod mcp;
pub mod purpose;
pub mod scanner;
pub mod setup;
pub mod store;
pub mod templates;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use installer::{InstallReport, InstallStatus, Installer};
pub use purpose::Purpose;
pub use store::{PurposeRules, RuleFile, RuleStore};
pub use templates::{TemplateInfo, TemplateStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File extension of rule files
pub const RULE_EXTENSION: &str = "mdc";

/// Check that `value` is a single plain path segment and return it.
///
/// Rejects empty values, `.`/`..`, and anything containing a path separator,
/// so a caller-supplied name can never address a path outside its parent.
///
/// # Examples
/// ```
/// use rulekit::validate_segment;
///
/// assert_eq!(validate_segment("purpose", "ci-cd").unwrap(), "ci-cd");
/// assert!(validate_segment("purpose", "../etc").is_err());
/// ```
pub fn validate_segment<'a>(param: &str, value: &'a str) -> Result<&'a str> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains('/')
        || value.contains('\\')
        || value.contains('\0');

    if invalid {
        return Err(Error::InvalidParameter(format!(
            "{} must be a single path segment: {:?}",
            param, value
        )));
    }
    Ok(value)
}
