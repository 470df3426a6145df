pub mod jira;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::issue::IssueFields;
use crate::model::link::LinkUpdate;

/// Outcome of one attempted issue creation, keyed by the originating
/// summary (the only identifier a task has before the tracker assigns one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationResult {
    pub summary: String,
    pub outcome: CreationOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationOutcome {
    Created { key: String },
    Failed { error: String },
}

impl CreationResult {
    pub fn created(summary: &str, key: &str) -> Self {
        Self {
            summary: summary.to_string(),
            outcome: CreationOutcome::Created {
                key: key.to_string(),
            },
        }
    }

    pub fn failed(summary: &str, error: &str) -> Self {
        Self {
            summary: summary.to_string(),
            outcome: CreationOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    /// The assigned issue key, when creation succeeded.
    pub fn key(&self) -> Option<&str> {
        match &self.outcome {
            CreationOutcome::Created { key } => Some(key),
            CreationOutcome::Failed { .. } => None,
        }
    }
}

/// The tracker API surface this tool needs: batch creation, a text search
/// for pre-existing issues by summary, and per-issue link updates.
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Create one issue per field set, in order. Rejections are captured
    /// per item so one bad task does not abort the batch; transport
    /// failures do.
    async fn create_issues(&self, batch: &[IssueFields]) -> Result<Vec<CreationResult>>;

    /// Key of the first issue whose summary matches the given text, if any.
    async fn search_issue_key(&self, summary: &str) -> Result<Option<String>>;

    /// Attach one link to an existing issue.
    async fn add_link(&self, issue_key: &str, link: &LinkUpdate) -> Result<()>;
}
