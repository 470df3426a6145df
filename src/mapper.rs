use crate::model::issue::{IssueFields, KeyRef, NameRef};
use crate::model::task::TaskRecord;

/// Priority used when a task does not set one. The name has to exist in
/// the target instance's priority scheme.
const DEFAULT_PRIORITY: &str = "2— Normal";

const DEFAULT_STORY_POINTS: f64 = 1.0;

/// Map one validated task record onto the tracker's field model, filling
/// in the defaults for everything optional. Pure; no I/O.
pub fn build_issue_fields(task: &TaskRecord) -> IssueFields {
    let components = task
        .components
        .iter()
        .map(|name| NameRef::new(name))
        .collect();

    IssueFields {
        project: KeyRef::new(&task.project),
        summary: task.summary.clone(),
        epic_link: task.epic_link.clone(),
        story_points: task.story_points.unwrap_or(DEFAULT_STORY_POINTS),
        assignee: NameRef::new(task.assignee.as_deref().unwrap_or_default()),
        priority: NameRef::new(task.priority.as_deref().unwrap_or(DEFAULT_PRIORITY)),
        description: task.description.clone().unwrap_or_default(),
        components,
        reporter: NameRef::new(&task.reporter),
        issue_type: NameRef::new(&task.issue_type),
    }
}
