//! Value types shared across the job tracker.

/// A job-application lead: a URL plus a label naming where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobLink {
    pub url: String,
    pub source: String,
}

impl JobLink {
    pub fn new(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}

/// An outreach draft (subject + body) awaiting human review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftMessage {
    pub subject: String,
    pub body: String,
}

impl DraftMessage {
    /// Render the draft in the Markdown form stored by the review queue.
    pub fn render_markdown(&self) -> String {
        format!("# {}\n\n{}\n", self.subject, self.body)
    }
}
