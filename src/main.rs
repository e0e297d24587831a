use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;

mod cli;
mod model;
mod review;
mod runtime;
mod storage;

use cli::{AddLinkArgs, ApproveArgs, Command, GenerateDraftArgs, RootArgs};
use model::{DraftMessage, JobLink};
use review::{LocalReviewQueue, ReviewQueue};
use runtime::{OpenClaw, OpenClawConfig, OutreachRuntime};
use storage::{JobRepository, JsonJobRepository};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = RootArgs::parse();
    let repository = JsonJobRepository::new(args.data_dir.join("jobs.json"));
    let drafts_dir = args.data_dir.join("drafts");

    match args.command {
        Command::Design => cmd_design(),
        Command::AddLink(add) => cmd_add_link(&repository, &drafts_dir, &add),
        Command::ListPending => cmd_list_pending(&repository),
        Command::Approve(approve) => cmd_approve(&repository, &approve),
        Command::GenerateDraft(generate) => cmd_generate_draft(&repository, &drafts_dir, &generate),
    }
}

fn design_notes() -> DraftMessage {
    DraftMessage {
        subject: "Local OpenClaw design".to_string(),
        body: [
            "Job links live in jobs.json; drafts are Markdown files under drafts/.",
            "Add links, review and edit the drafts by hand, then approve them here.",
            "Set OPENCLAW_URL (or OPENCLAW_START_COMMAND) before generate-draft.",
        ]
        .join("\n"),
    }
}

fn cmd_design() -> Result<()> {
    let notes = design_notes();
    println!("{}", notes.subject);
    println!("{}", notes.body);
    Ok(())
}

fn cmd_add_link(
    repository: &JsonJobRepository,
    drafts_dir: &Path,
    args: &AddLinkArgs,
) -> Result<()> {
    if args.url.trim().is_empty() {
        bail!("--url must be non-empty");
    }
    let link = JobLink::new(&args.url, &args.source);
    let job_id = repository.add_job_link(&link).context("store job link")?;

    let queue = LocalReviewQueue::new(drafts_dir, repository);
    let draft = DraftMessage {
        subject: format!("Draft outreach for {job_id}"),
        body: format!("Placeholder draft for {}.", args.url),
    };
    queue
        .request_review(&job_id, &draft)
        .context("queue placeholder draft")?;
    tracing::info!(job_id = %job_id, source = %args.source, "job link stored");
    println!("Created {job_id} and stored draft for review.");
    Ok(())
}

fn cmd_list_pending(repository: &JsonJobRepository) -> Result<()> {
    let pending = repository
        .list_pending_jobs()
        .context("list pending jobs")?;
    if pending.is_empty() {
        println!("No pending jobs.");
    } else {
        println!("{}", pending.join("\n"));
    }
    Ok(())
}

fn cmd_approve(repository: &JsonJobRepository, args: &ApproveArgs) -> Result<()> {
    repository
        .mark_approved(&args.job_id)
        .with_context(|| format!("approve {}", args.job_id))?;
    println!("Approved {}.", args.job_id);
    Ok(())
}

fn cmd_generate_draft(
    repository: &JsonJobRepository,
    drafts_dir: &Path,
    args: &GenerateDraftArgs,
) -> Result<()> {
    let link = repository
        .get_job_link(&args.job_id)
        .with_context(|| format!("look up {}", args.job_id))?;

    let mut config = OpenClawConfig::from_env().context("load OpenClaw configuration")?;
    if let Some(url) = &args.openclaw_url {
        config.server_url = Some(url.clone());
    }
    let local = config.start_command.is_some();
    let mut openclaw = OpenClaw::new(config);

    if local {
        openclaw.start().context("start OpenClaw")?;
    }
    let generated = openclaw.generate_outreach(&args.job_id);
    if local {
        if let Err(err) = openclaw.stop() {
            tracing::warn!(error = %err, "failed to stop OpenClaw cleanly");
        }
    }
    let draft = generated.with_context(|| format!("generate outreach for {}", args.job_id))?;

    let queue = LocalReviewQueue::new(drafts_dir, repository);
    queue
        .request_review(&args.job_id, &draft)
        .context("queue generated draft")?;
    println!("Stored generated draft for {} ({}).", args.job_id, link.url);
    Ok(())
}
