//! CLI argument parsing for the job tracker.
//!
//! The CLI is intentionally thin: each subcommand wires the repository,
//! review queue, and runtime together for a single invocation, without
//! embedding policy of its own.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "jobtrack",
    version,
    about = "Track job-application links and human-reviewed outreach drafts",
    after_help = "Examples:\n  jobtrack add-link --url https://example.com/job/1\n  jobtrack list-pending\n  jobtrack approve --job-id job-1\n  jobtrack generate-draft --job-id job-1 --openclaw-url http://127.0.0.1:8080",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Directory for local JSON storage and drafts
    #[arg(long, value_name = "DIR", default_value = ".job_agent", global = true)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the design walkthrough note
    Design,
    /// Store a job link and queue a placeholder draft for review
    AddLink(AddLinkArgs),
    /// List job IDs still awaiting approval
    ListPending,
    /// Mark a job application as approved
    Approve(ApproveArgs),
    /// Generate an outreach draft via the OpenClaw runtime
    GenerateDraft(GenerateDraftArgs),
}

/// Inputs for `add-link`.
#[derive(Parser, Debug)]
pub struct AddLinkArgs {
    /// Job link URL
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// Source label for the link
    #[arg(long, value_name = "LABEL", default_value = "manual")]
    pub source: String,
}

/// Inputs for `approve`.
#[derive(Parser, Debug)]
pub struct ApproveArgs {
    /// Job ID to approve
    #[arg(long, value_name = "ID")]
    pub job_id: String,
}

/// Inputs for `generate-draft`.
#[derive(Parser, Debug)]
pub struct GenerateDraftArgs {
    /// Job ID to draft outreach for
    #[arg(long, value_name = "ID")]
    pub job_id: String,

    /// Override the OpenClaw server URL from the environment
    #[arg(long, value_name = "URL")]
    pub openclaw_url: Option<String>,
}
