//! Markdown review queue for outreach drafts.
//!
//! Each job gets at most one draft file at `<dir>/<job-id>.md`; writing a
//! newer draft replaces the previous one. Approval state itself lives in the
//! repository, not in the drafts directory.

use std::fs;
use std::path::PathBuf;

use crate::model::DraftMessage;
use crate::storage::{JobRepository, Result};

/// Capability contract for queueing drafts for human approval.
pub trait ReviewQueue {
    /// Write (or overwrite) the draft awaiting review for a job.
    fn request_review(&self, job_id: &str, draft: &DraftMessage) -> Result<()>;

    /// Whether a human has approved the job's draft.
    fn is_approved(&self, job_id: &str) -> Result<bool>;
}

/// Review queue backed by a local directory of Markdown files.
pub struct LocalReviewQueue<'a, R> {
    drafts_dir: PathBuf,
    repository: &'a R,
}

impl<'a, R: JobRepository> LocalReviewQueue<'a, R> {
    pub fn new(drafts_dir: impl Into<PathBuf>, repository: &'a R) -> Self {
        Self {
            drafts_dir: drafts_dir.into(),
            repository,
        }
    }

    /// Path of the draft file for a job.
    pub fn draft_path(&self, job_id: &str) -> PathBuf {
        self.drafts_dir.join(format!("{job_id}.md"))
    }
}

impl<R: JobRepository> ReviewQueue for LocalReviewQueue<'_, R> {
    fn request_review(&self, job_id: &str, draft: &DraftMessage) -> Result<()> {
        fs::create_dir_all(&self.drafts_dir)?;
        fs::write(self.draft_path(job_id), draft.render_markdown())?;
        Ok(())
    }

    /// A job the repository has never seen reads as not approved; only
    /// direct repository lookups report a missing ID as an error.
    fn is_approved(&self, job_id: &str) -> Result<bool> {
        Ok(self.repository.approval_flag(job_id)?.unwrap_or(false))
    }
}

#[cfg(test)]
#[path = "review_tests.rs"]
mod tests;
