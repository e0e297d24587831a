//! End-to-end checks that drive the compiled binary over a temp data dir.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn jobtrack(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jobtrack"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        // Keep host OpenClaw settings out of the test environment.
        .env_remove("OPENCLAW_URL")
        .env_remove("OPENCLAW_START_COMMAND")
        .env_remove("OPENCLAW_API_KEY")
        .output()
        .expect("run jobtrack")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn add_approve_flow() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("agent");

    let added = jobtrack(
        &data_dir,
        &["add-link", "--url", "https://example.com/job/1"],
    );
    assert!(added.status.success(), "stderr: {}", stderr(&added));
    assert!(stdout(&added).contains("Created job-1"));

    // The placeholder draft is queued alongside the record.
    let draft = std::fs::read_to_string(data_dir.join("drafts").join("job-1.md")).unwrap();
    assert_eq!(
        draft,
        "# Draft outreach for job-1\n\nPlaceholder draft for https://example.com/job/1.\n"
    );

    // Persisted document matches the external format.
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(data_dir.join("jobs.json")).unwrap())
            .unwrap();
    assert_eq!(raw["jobs"]["job-1"]["url"], "https://example.com/job/1");
    assert_eq!(raw["jobs"]["job-1"]["source"], "manual");
    assert_eq!(raw["jobs"]["job-1"]["approved"], false);

    let pending = jobtrack(&data_dir, &["list-pending"]);
    assert!(pending.status.success());
    assert_eq!(stdout(&pending).trim(), "job-1");

    let approved = jobtrack(&data_dir, &["approve", "--job-id", "job-1"]);
    assert!(approved.status.success());
    assert!(stdout(&approved).contains("Approved job-1."));

    let pending = jobtrack(&data_dir, &["list-pending"]);
    assert_eq!(stdout(&pending).trim(), "No pending jobs.");
}

#[test]
fn approving_an_unknown_job_fails() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("agent");

    jobtrack(
        &data_dir,
        &["add-link", "--url", "https://example.com/job/1"],
    );
    let output = jobtrack(&data_dir, &["approve", "--job-id", "job-2"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("job-2"));
}

#[test]
fn add_link_requires_a_url() {
    let dir = TempDir::new().unwrap();
    let output = jobtrack(&dir.path().join("agent"), &["add-link"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--url"));
}

#[test]
fn generate_draft_requires_a_known_job() {
    let dir = TempDir::new().unwrap();
    let output = jobtrack(
        &dir.path().join("agent"),
        &["generate-draft", "--job-id", "job-9"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("job-9"));
}

#[test]
fn generate_draft_without_a_server_url_fails() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("agent");

    jobtrack(
        &data_dir,
        &["add-link", "--url", "https://example.com/job/1"],
    );
    let output = jobtrack(&data_dir, &["generate-draft", "--job-id", "job-1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("OPENCLAW_URL"));
}

#[test]
fn design_prints_the_walkthrough_note() {
    let dir = TempDir::new().unwrap();
    let output = jobtrack(&dir.path().join("agent"), &["design"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Local OpenClaw design"));
}
