use std::path::Path;

use anyhow::Result;

use crate::linker::{build_link_updates, resolve_links};
use crate::loader::load_tasks;
use crate::mapper::build_issue_fields;
use crate::tracker::{CreationOutcome, Tracker};

/// Counts reported by [`run`], used for the exit-code decision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub created: usize,
    pub failed: usize,
    pub links_applied: usize,
}

/// Drive the whole batch: load the file, create every issue, then resolve
/// and apply the declared links.
///
/// A rejected creation is recorded and the run carries on; a transport
/// error at any phase aborts it.
pub async fn run(tracker: &dyn Tracker, file: &Path) -> Result<RunSummary> {
    println!("Loading tasks from {}...", file.display());
    let tasks = load_tasks(file)?;

    println!("Generating issue fields...");
    let batch: Vec<_> = tasks.iter().map(build_issue_fields).collect();

    println!("Creating {} issue(s)...", batch.len());
    let results = tracker.create_issues(&batch).await?;
    let mut summary = RunSummary::default();
    for result in &results {
        match &result.outcome {
            CreationOutcome::Created { key } => {
                summary.created += 1;
                println!("  Created {}: {}", key, result.summary);
            }
            CreationOutcome::Failed { error } => {
                summary.failed += 1;
                println!("  Failed: {} ({})", result.summary, error);
            }
        }
    }

    println!("Resolving links...");
    let links = resolve_links(&tasks, &results, tracker).await?;
    let updates = build_link_updates(&links);

    println!("Applying {} link(s)...", updates.len());
    for (issue_key, update) in &updates {
        tracker.add_link(issue_key, update).await?;
        summary.links_applied += 1;
    }

    println!(
        "Created {} of {} issues, applied {} link(s).",
        summary.created,
        results.len(),
        summary.links_applied
    );
    Ok(summary)
}
