use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, warn};

use crate::model::link::{LinkKind, LinkUpdate};
use crate::model::task::TaskRecord;
use crate::tracker::{CreationResult, Tracker};

/// A link declaration with both endpoints pinned to issue keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub kind: LinkKind,
    pub source: String,
    pub target: String,
}

/// Resolve every `linked_issues` declaration to a pair of issue keys.
///
/// Targets named in the batch resolve from the creation results and never
/// hit the tracker, even when their creation failed. Anything else goes
/// through a summary search; a search miss drops the link with a warning,
/// a search error aborts the run.
pub async fn resolve_links(
    tasks: &[TaskRecord],
    created: &[CreationResult],
    tracker: &dyn Tracker,
) -> Result<Vec<ResolvedLink>> {
    let by_summary: HashMap<&str, &CreationResult> =
        created.iter().map(|r| (r.summary.as_str(), r)).collect();

    let mut resolved = Vec::new();
    for task in tasks {
        if task.linked_issues.is_empty() {
            continue;
        }
        let source = match by_summary.get(task.summary.as_str()).and_then(|r| r.key()) {
            Some(key) => key,
            None => {
                warn!(
                    summary = %task.summary,
                    "skipping links declared on an issue that was not created"
                );
                continue;
            }
        };
        for declaration in &task.linked_issues {
            for (kind, target_summary) in declaration {
                match resolve_target(&by_summary, tracker, target_summary).await? {
                    Some(target) => {
                        debug!(source, target = %target, kind = %kind, "link resolved");
                        resolved.push(ResolvedLink {
                            kind: *kind,
                            source: source.to_string(),
                            target,
                        });
                    }
                    None => warn!(
                        source,
                        target = %target_summary,
                        kind = %kind,
                        "dropping link with unresolvable target"
                    ),
                }
            }
        }
    }
    Ok(resolved)
}

async fn resolve_target(
    by_summary: &HashMap<&str, &CreationResult>,
    tracker: &dyn Tracker,
    summary: &str,
) -> Result<Option<String>> {
    if let Some(result) = by_summary.get(summary) {
        // Declared in this batch, so the search fallback never applies,
        // even when the creation failed.
        return Ok(result.key().map(str::to_string));
    }
    tracker.search_issue_key(summary).await
}

/// Turn resolved links into per-issue update payloads, in declaration order.
pub fn build_link_updates(links: &[ResolvedLink]) -> Vec<(String, LinkUpdate)> {
    links
        .iter()
        .map(|link| {
            (
                link.source.clone(),
                LinkUpdate::for_target(link.kind, &link.target),
            )
        })
        .collect()
}
