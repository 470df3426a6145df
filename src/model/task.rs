use serde::Deserialize;
use std::collections::BTreeMap;

use crate::model::link::LinkKind;

/// One entry of a task file, already schema-validated by the loader.
///
/// `summary` doubles as the cross-reference key for `linked_issues`, so it
/// must be unique within a file; nothing else identifies a task before the
/// tracker assigns it a key.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskRecord {
    pub project: String,
    pub summary: String,
    pub issue_type: String,
    pub reporter: String,
    pub epic_link: Option<String>,
    pub story_points: Option<f64>,
    pub assignee: Option<String>,
    pub priority: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
    /// Declared relationships, each a single `{"<kind>": "<target summary>"}` pair.
    #[serde(default)]
    pub linked_issues: Vec<BTreeMap<LinkKind, String>>,
}
