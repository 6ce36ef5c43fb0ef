//! MCP tool handlers for rulekit
//!
//! Each tool handler processes a specific tool call and returns results.
//! Domain failures (missing parameter, unknown rule) come back as tool
//! results with `isError` set; only malformed calls are JSON-RPC errors.

use super::protocol::{JsonRpcError, ToolDefinition, ToolResult};
use crate::error::Error;
use crate::installer::Installer;
use crate::purpose::Purpose;
use crate::store::RuleStore;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

/// Get all tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    let purposes: Vec<&str> = Purpose::ALL.iter().map(|p| p.as_str()).collect();

    vec![
        ToolDefinition {
            name: "list_rules".to_string(),
            description: "List available Cursor rule files grouped by purpose, with descriptions. Lists every purpose when none is given.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "purpose": {
                        "type": "string",
                        "enum": purposes,
                        "description": "Optional purpose to list rules for"
                    }
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "get_rule".to_string(),
            description: "Get the full text of a rule file.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "purpose": {
                        "type": "string",
                        "description": "Purpose the rule belongs to (e.g. core)"
                    },
                    "ruleName": {
                        "type": "string",
                        "description": "Rule file name, with or without the .mdc extension"
                    }
                },
                "required": ["purpose", "ruleName"]
            }),
        },
        ToolDefinition {
            name: "enable_rules".to_string(),
            description: "Install the rules of one or more purposes into a project's .cursor/rules directory. Existing files with the same name are overwritten.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "purposes": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Purposes to enable"
                    },
                    "projectPath": {
                        "type": "string",
                        "description": "Project directory (default: server working directory)"
                    }
                },
                "required": ["purposes"]
            }),
        },
    ]
}

/// Handle tool call dispatch
pub fn handle_tool_call(
    store: &RuleStore,
    installer: &Installer<'_>,
    tool_name: &str,
    arguments: &Value,
) -> Result<ToolResult, JsonRpcError> {
    tracing::debug!("Tool call: {} {}", tool_name, arguments);

    match tool_name {
        "list_rules" => tool_list_rules(store, arguments),
        "get_rule" => Ok(tool_get_rule(store, arguments)),
        "enable_rules" => tool_enable_rules(installer, arguments),
        _ => Err(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            tool_name
        ))),
    }
}

/// Execute list_rules
fn tool_list_rules(store: &RuleStore, args: &Value) -> Result<ToolResult, JsonRpcError> {
    let purpose = match args.get("purpose") {
        None | Some(Value::Null) => None,
        Some(value) => {
            let name = value
                .as_str()
                .ok_or_else(|| JsonRpcError::invalid_params("purpose must be a string"))?;
            let purpose: Purpose = name
                .parse()
                .map_err(|e: Error| JsonRpcError::invalid_params(e.to_string()))?;
            Some(purpose)
        }
    };

    match store.list(purpose) {
        Ok(listings) => pretty(&listings),
        Err(e) => Ok(error_result(&e)),
    }
}

/// Execute get_rule
fn tool_get_rule(store: &RuleStore, args: &Value) -> ToolResult {
    let purpose = args.get("purpose").and_then(|v| v.as_str());
    let name = args.get("ruleName").and_then(|v| v.as_str());

    match store.get(purpose, name) {
        Ok(text) => ToolResult::text(text),
        Err(e) => error_result(&e),
    }
}

/// Execute enable_rules
fn tool_enable_rules(installer: &Installer<'_>, args: &Value) -> Result<ToolResult, JsonRpcError> {
    let purposes: Vec<String> = match args.get("purposes") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(String::from)
                    .ok_or_else(|| JsonRpcError::invalid_params("purposes must be strings"))
            })
            .collect::<Result<_, _>>()?,
        Some(_) => return Err(JsonRpcError::invalid_params("purposes must be an array")),
    };

    let project = args
        .get("projectPath")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(Path::new);

    match installer.enable(&purposes, project) {
        Ok(reports) => pretty(&reports),
        Err(e) => Ok(error_result(&e)),
    }
}

fn pretty<T: Serialize>(value: &T) -> Result<ToolResult, JsonRpcError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| JsonRpcError::server_error(e.to_string()))?;
    Ok(ToolResult::text(text))
}

fn error_result(err: &Error) -> ToolResult {
    tracing::debug!("Tool failed: {}", err);
    ToolResult::error(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_store() -> (RuleStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("core")).unwrap();
        fs::write(dir.path().join("core/workflow.mdc"), "# Workflow Rule").unwrap();
        (RuleStore::new(dir.path()), dir)
    }

    #[test]
    fn test_tool_definitions_valid() {
        let tools = get_tool_definitions();
        assert_eq!(tools.len(), 3);

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["list_rules", "get_rule", "enable_rules"]);

        for tool in tools {
            assert!(!tool.description.is_empty(), "{} has empty description", tool.name);
            assert_eq!(tool.input_schema["type"], "object");
        }
    }

    #[test]
    fn test_unknown_tool_error() {
        let (store, _dir) = create_store();
        let installer = Installer::new(&store);
        let err = handle_tool_call(&store, &installer, "unknown_tool", &json!({})).unwrap_err();
        assert_eq!(err.code, -32602);
        assert!(err.message.contains("Unknown tool"));
    }

    #[test]
    fn test_list_invalid_purpose() {
        let (store, _dir) = create_store();
        let installer = Installer::new(&store);
        let err = handle_tool_call(&store, &installer, "list_rules", &json!({"purpose": "bogus"}))
            .unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[test]
    fn test_get_rule_missing_param_is_tool_error() {
        let (store, _dir) = create_store();
        let installer = Installer::new(&store);
        let result = handle_tool_call(&store, &installer, "get_rule", &json!({"purpose": "core"}))
            .unwrap();
        assert!(result.is_error);
        assert!(result.content[0].text.contains("ruleName"));
    }

    #[test]
    fn test_enable_rules_wrong_type() {
        let (store, _dir) = create_store();
        let installer = Installer::new(&store);
        let err = handle_tool_call(&store, &installer, "enable_rules", &json!({"purposes": "core"}))
            .unwrap_err();
        assert!(err.message.contains("array"));
    }

    #[test]
    fn test_enable_rules_empty_is_tool_error() {
        let (store, _dir) = create_store();
        let installer = Installer::new(&store);
        let result = handle_tool_call(&store, &installer, "enable_rules", &json!({"purposes": []}))
            .unwrap();
        assert!(result.is_error);
        assert!(result.content[0].text.contains("purposes"));
    }
}
