use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use super::{CreationResult, Tracker};
use crate::config::JiraConfig;
use crate::model::issue::IssueFields;
use crate::model::link::LinkUpdate;

/// Thin client for the Jira REST v2 API, authenticated with HTTP Basic.
pub struct JiraClient {
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Self {
        let creds = format!("{}:{}", config.user, config.token);
        let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {encoded}"),
            client: reqwest::Client::new(),
        }
    }

    /// Check the configured credentials with one cheap authenticated call,
    /// so a bad login fails the run before any issue is touched.
    pub async fn verify_credentials(&self) -> Result<()> {
        let url = format!("{}/rest/api/2/myself", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Credential check request failed")?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            bail!("Jira login failed. Please check your username and token.");
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Credential check failed: HTTP {status}: {}", short_body(&body));
        }
        debug!("credentials verified");
        Ok(())
    }
}

#[derive(Deserialize)]
struct CreatedIssue {
    key: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    issues: Vec<FoundIssue>,
}

#[derive(Deserialize)]
struct FoundIssue {
    key: String,
}

/// Escape a summary for interpolation into a quoted JQL string.
fn escape_jql(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Trim server error bodies so one failed call cannot flood the output.
fn short_body(body: &str) -> String {
    const MAX_CHARS: usize = 300;
    if body.chars().count() > MAX_CHARS {
        let cut: String = body.chars().take(MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}

#[async_trait]
impl Tracker for JiraClient {
    async fn create_issues(&self, batch: &[IssueFields]) -> Result<Vec<CreationResult>> {
        let url = format!("{}/rest/api/2/issue", self.base_url);
        let mut results = Vec::with_capacity(batch.len());

        for fields in batch {
            let body = serde_json::json!({ "fields": fields });
            let resp = self
                .client
                .post(&url)
                .header("Authorization", &self.auth_header)
                .header("Accept", "application/json")
                .json(&body)
                .send()
                .await
                .with_context(|| {
                    format!("Issue creation request for \"{}\" failed", fields.summary)
                })?;

            if resp.status().is_success() {
                let created: CreatedIssue = resp
                    .json()
                    .await
                    .context("Failed to parse issue creation response")?;
                debug!(key = %created.key, summary = %fields.summary, "issue created");
                results.push(CreationResult::created(&fields.summary, &created.key));
            } else {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                results.push(CreationResult::failed(
                    &fields.summary,
                    &format!("HTTP {status}: {}", short_body(&body)),
                ));
            }
        }

        Ok(results)
    }

    async fn search_issue_key(&self, summary: &str) -> Result<Option<String>> {
        let jql = format!("summary ~ \"{}\"", escape_jql(summary));
        let url = format!(
            "{}/rest/api/2/search?jql={}&maxResults=1&fields=summary",
            self.base_url,
            urlencoding::encode(&jql)
        );

        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Issue search for \"{summary}\" failed"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!(
                "Issue search for \"{summary}\" failed: HTTP {status}: {}",
                short_body(&body)
            );
        }

        let found: SearchResponse = resp
            .json()
            .await
            .context("Failed to parse issue search response")?;
        Ok(found.issues.into_iter().next().map(|issue| issue.key))
    }

    async fn add_link(&self, issue_key: &str, link: &LinkUpdate) -> Result<()> {
        let url = format!("{}/rest/api/2/issue/{issue_key}", self.base_url);
        let body = serde_json::json!({ "update": { "issuelinks": [link] } });

        let resp = self
            .client
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Link update request for {issue_key} failed"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!(
                "Link update for {issue_key} failed: HTTP {status}: {}",
                short_body(&body)
            );
        }

        debug!(issue_key, "link applied");
        Ok(())
    }
}
