use anyhow::{anyhow, bail, Context, Result};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

use crate::model::task::TaskRecord;

/// Draft-07 schema every task entry must satisfy.
const TASK_SCHEMA: &str = include_str!("tasks.schema.json");

/// Read, validate and deserialize a task file.
///
/// The file must hold a JSON array; every element is checked against the
/// task schema individually so errors can name the offending entry.
/// Summaries are the cross-reference key for links, so duplicates are
/// rejected here as well.
pub fn load_tasks(path: &Path) -> Result<Vec<TaskRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read task file {}", path.display()))?;
    let json: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Task file {} is not valid JSON", path.display()))?;

    let entries = match json.as_array() {
        Some(entries) => entries,
        None => bail!(
            "Task file {} must contain a JSON array of tasks",
            path.display()
        ),
    };

    let schema = compile_schema()?;
    for (index, entry) in entries.iter().enumerate() {
        if let Err(mut errors) = schema.validate(entry) {
            // One bad entry fails the whole run; report its first violation.
            let error = errors
                .next()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "schema violation".to_string());
            bail!("Task {index} failed validation: {error}");
        }
    }

    let tasks: Vec<TaskRecord> =
        serde_json::from_value(json).context("Failed to deserialize task file")?;

    if let Some(summary) = first_duplicate_summary(&tasks) {
        bail!(
            "Duplicate task summary \"{summary}\": summaries are the link reference key and must be unique"
        );
    }

    Ok(tasks)
}

fn compile_schema() -> Result<JSONSchema> {
    let schema: Value =
        serde_json::from_str(TASK_SCHEMA).context("embedded task schema is not valid JSON")?;
    JSONSchema::compile(&schema).map_err(|e| anyhow!("embedded task schema does not compile: {e}"))
}

fn first_duplicate_summary(tasks: &[TaskRecord]) -> Option<&str> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .find(|task| !seen.insert(task.summary.as_str()))
        .map(|task| task.summary.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::model::link::LinkKind;

    fn write_tasks(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_minimal_task() {
        let file = write_tasks(
            r#"[{
                "project": "PROJ",
                "summary": "Set up CI",
                "issue_type": "Task",
                "reporter": "sanderson"
            }]"#,
        );
        let tasks = load_tasks(file.path()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].project, "PROJ");
        assert_eq!(tasks[0].summary, "Set up CI");
        assert!(tasks[0].epic_link.is_none());
        assert!(tasks[0].components.is_empty());
        assert!(tasks[0].linked_issues.is_empty());
    }

    #[test]
    fn loads_links_and_optional_fields() {
        let file = write_tasks(
            r#"[{
                "project": "PROJ",
                "summary": "Write docs",
                "issue_type": "Story",
                "reporter": "sanderson",
                "epic_link": "PROJ-100",
                "story_points": 3,
                "assignee": "mreynolds",
                "priority": "1— Critical",
                "description": "User-facing docs",
                "components": ["docs", "web"],
                "linked_issues": [{"blockedBy": "Set up CI"}]
            }]"#,
        );
        let tasks = load_tasks(file.path()).unwrap();
        assert_eq!(tasks[0].epic_link.as_deref(), Some("PROJ-100"));
        assert_eq!(tasks[0].story_points, Some(3.0));
        assert_eq!(tasks[0].components, vec!["docs", "web"]);
        let (kind, target) = tasks[0].linked_issues[0].iter().next().unwrap();
        assert_eq!(*kind, LinkKind::BlockedBy);
        assert_eq!(target, "Set up CI");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_tasks(Path::new("/no/such/tasks.json")).unwrap_err();
        assert!(err.to_string().contains("/no/such/tasks.json"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let file = write_tasks("[{");
        let err = load_tasks(file.path()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn top_level_object_is_rejected() {
        let file = write_tasks(r#"{"project": "PROJ"}"#);
        let err = load_tasks(file.path()).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let file = write_tasks(
            r#"[{"project": "PROJ", "summary": "No type", "reporter": "sanderson"}]"#,
        );
        let err = load_tasks(file.path()).unwrap_err();
        assert!(err.to_string().contains("Task 0 failed validation"));
    }

    #[test]
    fn validation_error_names_the_failing_index() {
        let file = write_tasks(
            r#"[
                {"project": "P", "summary": "ok", "issue_type": "Task", "reporter": "r"},
                {"project": "P", "summary": "bad", "issue_type": "Task", "reporter": "r",
                 "story_points": "three"}
            ]"#,
        );
        let err = load_tasks(file.path()).unwrap_err();
        assert!(err.to_string().contains("Task 1 failed validation"));
    }

    #[test]
    fn unknown_property_is_rejected() {
        // Typo protection: "linked_issue" would otherwise silently drop links.
        let file = write_tasks(
            r#"[{"project": "P", "summary": "s", "issue_type": "Task", "reporter": "r",
                 "linked_issue": [{"blocks": "other"}]}]"#,
        );
        assert!(load_tasks(file.path()).is_err());
    }

    #[test]
    fn unknown_link_kind_is_rejected() {
        let file = write_tasks(
            r#"[{"project": "P", "summary": "s", "issue_type": "Task", "reporter": "r",
                 "linked_issues": [{"tracks": "other"}]}]"#,
        );
        assert!(load_tasks(file.path()).is_err());
    }

    #[test]
    fn empty_summary_is_rejected() {
        let file = write_tasks(
            r#"[{"project": "P", "summary": "", "issue_type": "Task", "reporter": "r"}]"#,
        );
        assert!(load_tasks(file.path()).is_err());
    }

    #[test]
    fn duplicate_summaries_are_rejected() {
        let file = write_tasks(
            r#"[
                {"project": "P", "summary": "Same", "issue_type": "Task", "reporter": "r"},
                {"project": "P", "summary": "Same", "issue_type": "Bug", "reporter": "r"}
            ]"#,
        );
        let err = load_tasks(file.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate task summary \"Same\""));
    }

    #[test]
    fn empty_array_loads_as_no_tasks() {
        let file = write_tasks("[]");
        assert!(load_tasks(file.path()).unwrap().is_empty());
    }
}
