//! YAML front matter extraction for `.mdc` rule files
//!
//! Cursor rule files start with a block like:
//!
//! ```text
//! ---
//! description: Engineering practices
//! globs: "**/*.rs"
//! alwaysApply: false
//! ---
//! ```

use std::collections::HashMap;

/// Parse the leading front matter block into a key/value map.
///
/// Returns an empty map if the text has no front matter or it is not a YAML mapping.
pub fn parse(text: &str) -> HashMap<String, serde_json::Value> {
    let mut metadata = HashMap::new();
    let mut lines = text.lines();

    if lines.next().map(str::trim) != Some("---") {
        return metadata;
    }

    let mut frontmatter_lines = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.trim() == "---" {
            closed = true;
            break;
        }
        frontmatter_lines.push(line);
    }

    if !closed {
        return metadata;
    }

    let frontmatter_text = frontmatter_lines.join("\n");
    if let Ok(serde_yaml::Value::Mapping(map)) =
        serde_yaml::from_str::<serde_yaml::Value>(&frontmatter_text)
    {
        for (k, v) in map {
            if let serde_yaml::Value::String(key) = k {
                if let Ok(json_val) = serde_json::to_value(&v) {
                    metadata.insert(key, json_val);
                }
            }
        }
    }

    metadata
}

/// The `description` front matter value, if present and non-empty
pub fn description(text: &str) -> Option<String> {
    parse(text)
        .get("description")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
