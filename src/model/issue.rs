use serde::Serialize;

/// Field set for one issue, shaped for `POST /rest/api/2/issue`.
///
/// The two `customfield_*` ids are the epic link and story points fields of
/// the target instance's field configuration.
#[derive(Debug, Clone, Serialize)]
pub struct IssueFields {
    pub project: KeyRef,
    pub summary: String,
    #[serde(rename = "customfield_10201", skip_serializing_if = "Option::is_none")]
    pub epic_link: Option<String>,
    #[serde(rename = "customfield_10300")]
    pub story_points: f64,
    pub assignee: NameRef,
    pub priority: NameRef,
    pub description: String,
    pub components: Vec<NameRef>,
    pub reporter: NameRef,
    #[serde(rename = "issuetype")]
    pub issue_type: NameRef,
}

/// `{"key": ...}` reference, used for projects and link endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRef {
    pub key: String,
}

/// `{"name": ...}` reference, used for users, priorities, components and
/// issue types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameRef {
    pub name: String,
}

impl KeyRef {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }
}

impl NameRef {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}
