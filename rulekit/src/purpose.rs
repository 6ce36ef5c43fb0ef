//! Rule purposes (categories)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named category of rule files, mapped to a subdirectory of the rule store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Purpose {
    /// Workflow and engineering practice rules
    Core,
    /// Backend service rules
    Backend,
    /// Documentation rules
    Docs,
    /// Testing rules
    Testing,
    /// CI/CD pipeline rules
    CiCd,
    /// Frontend rules
    Frontend,
    /// Deployment rules
    Deployment,
    /// API design rules
    Api,
}

impl Purpose {
    /// Purposes enumerated when listing without a filter, in listing order
    pub const DEFAULT: [Purpose; 5] = [
        Purpose::Core,
        Purpose::Backend,
        Purpose::Docs,
        Purpose::Testing,
        Purpose::CiCd,
    ];

    /// Every known purpose, including the optional extras
    pub const ALL: [Purpose; 8] = [
        Purpose::Core,
        Purpose::Backend,
        Purpose::Docs,
        Purpose::Testing,
        Purpose::CiCd,
        Purpose::Frontend,
        Purpose::Deployment,
        Purpose::Api,
    ];

    /// Directory name of this purpose inside the rule store
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Core => "core",
            Purpose::Backend => "backend",
            Purpose::Docs => "docs",
            Purpose::Testing => "testing",
            Purpose::CiCd => "ci-cd",
            Purpose::Frontend => "frontend",
            Purpose::Deployment => "deployment",
            Purpose::Api => "api",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Purpose {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Purpose::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| Error::InvalidParameter(format!("Unknown purpose: {}", s)))
    }
}
