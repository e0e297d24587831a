//! JSON-file persistence for job records.
//!
//! The whole store is one pretty-printed document:
//!
//! ```text
//! {"jobs": {"job-1": {"url": "...", "source": "manual", "approved": false}}}
//! ```
//!
//! Every operation reads and rewrites the file in full. There is no locking;
//! at most one writer at a time is assumed.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::JobLink;

/// Errors surfaced by repository and review-queue operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unknown job id: {0}")]
    JobNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// One persisted job: the link fields plus the approval flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub url: String,
    pub source: String,
    pub approved: bool,
}

/// Top-level wrapper so the on-disk format can grow fields later.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JobsDocument {
    #[serde(default)]
    pub jobs: BTreeMap<String, JobRecord>,
}

/// Capability contract for job persistence.
///
/// One production implementation ([`JsonJobRepository`]); tests may
/// substitute in-memory fakes.
pub trait JobRepository {
    /// Persist a job link and return the assigned job ID.
    fn add_job_link(&self, link: &JobLink) -> Result<String>;

    /// Job IDs still awaiting approval, in insertion order.
    fn list_pending_jobs(&self) -> Result<Vec<String>>;

    /// Flip a job's approval flag. One-way; there is no unapprove.
    fn mark_approved(&self, job_id: &str) -> Result<()>;

    /// Reconstruct the stored link for a job.
    fn get_job_link(&self, job_id: &str) -> Result<JobLink>;

    /// Raw approval flag, or `None` when the ID is unknown.
    fn approval_flag(&self, job_id: &str) -> Result<Option<bool>>;
}

/// JSON-file repository; the production [`JobRepository`].
#[derive(Debug, Clone)]
pub struct JsonJobRepository {
    path: PathBuf,
}

impl JsonJobRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the full document; a missing file reads as the empty store.
    fn load(&self) -> Result<JobsDocument> {
        if !self.path.exists() {
            return Ok(JobsDocument::default());
        }
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Rewrite the full document, creating parent directories on first use.
    fn save(&self, document: &JobsDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, text.as_bytes())?;
        Ok(())
    }
}

/// Numeric suffix of a `job-<N>` ID.
///
/// IDs are assigned sequentially, so ordering by suffix recovers the
/// document's insertion order regardless of map iteration order.
fn job_number(job_id: &str) -> Option<u64> {
    job_id.strip_prefix("job-")?.parse().ok()
}

impl JobRepository for JsonJobRepository {
    fn add_job_link(&self, link: &JobLink) -> Result<String> {
        let mut document = self.load()?;
        let job_id = format!("job-{}", document.jobs.len() + 1);
        document.jobs.insert(
            job_id.clone(),
            JobRecord {
                url: link.url.clone(),
                source: link.source.clone(),
                approved: false,
            },
        );
        self.save(&document)?;
        Ok(job_id)
    }

    fn list_pending_jobs(&self) -> Result<Vec<String>> {
        let document = self.load()?;
        let mut pending: Vec<String> = document
            .jobs
            .iter()
            .filter(|(_, record)| !record.approved)
            .map(|(job_id, _)| job_id.clone())
            .collect();
        pending.sort_by_key(|job_id| job_number(job_id).unwrap_or(u64::MAX));
        Ok(pending)
    }

    fn mark_approved(&self, job_id: &str) -> Result<()> {
        let mut document = self.load()?;
        let record = document
            .jobs
            .get_mut(job_id)
            .ok_or_else(|| StorageError::JobNotFound(job_id.to_string()))?;
        record.approved = true;
        self.save(&document)?;
        Ok(())
    }

    fn get_job_link(&self, job_id: &str) -> Result<JobLink> {
        let document = self.load()?;
        let record = document
            .jobs
            .get(job_id)
            .ok_or_else(|| StorageError::JobNotFound(job_id.to_string()))?;
        Ok(JobLink::new(&record.url, &record.source))
    }

    fn approval_flag(&self, job_id: &str) -> Result<Option<bool>> {
        let document = self.load()?;
        Ok(document.jobs.get(job_id).map(|record| record.approved))
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
