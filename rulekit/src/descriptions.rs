//! Built-in descriptions for the rule files shipped with rulekit

/// Placeholder used when no description is known for a rule file
pub const NO_DESCRIPTION: &str = "No description available";

/// Static rule-file name to description table
const DESCRIPTIONS: &[(&str, &str)] = &[
    ("workflow.mdc", "Task workflow: plan, implement, verify and hand off changes"),
    ("engineering-practices.mdc", "General engineering practices and code quality standards"),
    ("code-review.mdc", "Checklist for reviewing and responding to code review"),
    ("api-design.mdc", "REST and RPC API design conventions"),
    ("database.mdc", "Schema design, migrations and query guidelines"),
    ("error-handling.mdc", "Error propagation, logging and user-facing failures"),
    ("documentation.mdc", "Writing and maintaining project documentation"),
    ("readme.mdc", "README structure and required sections"),
    ("testing-strategy.mdc", "Unit, integration and end-to-end testing strategy"),
    ("tdd.mdc", "Test-driven development loop"),
    ("github-actions.mdc", "GitHub Actions workflow conventions"),
    ("release.mdc", "Versioning and release process"),
];

/// Look up the built-in description for a rule file name
pub fn lookup(name: &str) -> Option<&'static str> {
    DESCRIPTIONS
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, description)| *description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known() {
        assert!(lookup("workflow.mdc").unwrap().contains("workflow"));
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(lookup("nope.mdc"), None);
        // Names are matched with their extension
        assert_eq!(lookup("workflow"), None);
    }
}
