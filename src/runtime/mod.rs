//! Adapter to the external OpenClaw draft-generation runtime.
//!
//! The runtime is reached over HTTP (a chat-completion-style endpoint) and
//! can optionally be launched as a local subprocess. Which variant applies is
//! decided by configuration, not by type.

mod config;
mod openclaw;

pub use config::OpenClawConfig;
pub use openclaw::OpenClaw;

use crate::model::DraftMessage;

/// Errors from runtime lifecycle and generation calls.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// An operation needs a setting that is absent.
    #[error("openclaw configuration error: {0}")]
    Configuration(String),

    /// The HTTP endpoint failed, timed out, or returned an undecodable body.
    #[error("openclaw request failed: {0}")]
    Unavailable(Box<ureq::Error>),

    /// Subprocess management failed.
    #[error("openclaw process error: {0}")]
    Process(#[from] std::io::Error),
}

impl From<ureq::Error> for RuntimeError {
    fn from(err: ureq::Error) -> Self {
        Self::Unavailable(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Capability contract for the draft-generation runtime.
///
/// Lifecycle: `stopped` → `start()` → `running` → `stop()` → `stopped`.
pub trait OutreachRuntime {
    /// Start the runtime; a no-op when already running or purely remote.
    fn start(&mut self) -> Result<()>;

    /// Stop a locally spawned runtime; a no-op when nothing was spawned.
    fn stop(&mut self) -> Result<()>;

    /// Produce an outreach draft for a job.
    fn generate_outreach(&mut self, job_id: &str) -> Result<DraftMessage>;
}
