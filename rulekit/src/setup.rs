//! Project setup: registers the rulekit MCP server in `.cursor/mcp.json`

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

/// Server key used in `mcpServers`
pub const SERVER_NAME: &str = "rulekit";

/// Location of the MCP config relative to the project root
pub const MCP_CONFIG_PATH: &str = ".cursor/mcp.json";

/// `.cursor/mcp.json` contents. Unknown top-level keys are preserved.
#[derive(Debug, Default, Serialize, Deserialize)]
struct McpConfig {
    #[serde(rename = "mcpServers", default)]
    mcp_servers: Map<String, Value>,

    #[serde(flatten)]
    other: Map<String, Value>,
}

/// Add (or replace) the rulekit entry in `<project>/.cursor/mcp.json`.
///
/// Other configured servers are left untouched. Returns the config path.
pub fn write_mcp_config(project: &Path, command: &str) -> Result<PathBuf> {
    if command.trim().is_empty() {
        return Err(Error::MissingParameter("command".to_string()));
    }

    let path = project.join(MCP_CONFIG_PATH);
    let mut config: McpConfig = if path.is_file() {
        let text = std::fs::read_to_string(&path)?;
        if text.trim().is_empty() {
            McpConfig::default()
        } else {
            serde_json::from_str(&text).map_err(|e| {
                Error::Config(format!("Invalid {}: {}", path.display(), e))
            })?
        }
    } else {
        McpConfig::default()
    };

    config.mcp_servers.insert(
        SERVER_NAME.to_string(),
        json!({ "command": command, "args": [] }),
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, serde_json::to_string_pretty(&config)? + "\n")?;

    tracing::info!("Registered {} MCP server in {}", SERVER_NAME, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_new_config() {
        let project = tempdir().unwrap();
        let path = write_mcp_config(project.path(), "rulekit-mcp").unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["mcpServers"]["rulekit"]["command"], "rulekit-mcp");
        assert!(value["mcpServers"]["rulekit"]["args"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_merge_preserves_other_servers() {
        let project = tempdir().unwrap();
        let path = project.path().join(MCP_CONFIG_PATH);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{"mcpServers":{"other":{"command":"other-mcp"}},"theme":"dark"}"#,
        )
        .unwrap();

        write_mcp_config(project.path(), "/usr/local/bin/rulekit-mcp").unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["mcpServers"]["other"]["command"], "other-mcp");
        assert_eq!(value["mcpServers"]["rulekit"]["command"], "/usr/local/bin/rulekit-mcp");
        assert_eq!(value["theme"], "dark");
    }

    #[test]
    fn test_invalid_existing_config() {
        let project = tempdir().unwrap();
        let path = project.path().join(MCP_CONFIG_PATH);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            write_mcp_config(project.path(), "rulekit-mcp"),
            Err(Error::Config(_))
        ));
    }
}
