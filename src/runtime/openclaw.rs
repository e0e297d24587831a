//! OpenClaw subprocess lifecycle and HTTP draft generation.

use std::fs::{self, File};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::{OpenClawConfig, OutreachRuntime, Result, RuntimeError};
use crate::model::DraftMessage;

/// Grace period between SIGTERM and SIGKILL when stopping the process.
const STOP_TIMEOUT: Duration = Duration::from_secs(10);
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

const SYSTEM_PROMPT: &str = "Draft a professional outreach message for a job application.";
const FALLBACK_BODY: &str = "Draft unavailable.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// Response fields are optional so a well-formed reply that merely lacks the
// content path falls back to placeholder text instead of a decode error.
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Production adapter for the OpenClaw runtime.
///
/// Owns at most one spawned process, released in [`OutreachRuntime::stop`].
/// Remote-only configurations (a `server_url` without a `start_command`)
/// have nothing to launch or tear down.
pub struct OpenClaw {
    config: OpenClawConfig,
    agent: ureq::Agent,
    child: Option<Child>,
}

impl OpenClaw {
    pub fn new(config: OpenClawConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_s)))
            .build()
            .into();
        Self {
            config,
            agent,
            child: None,
        }
    }

    /// Spawn the configured start command inside the workspace directory,
    /// with stdout and stderr combined into `openclaw.log`.
    fn spawn_local(&mut self, argv: &[String]) -> Result<()> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| RuntimeError::Configuration("start command is empty".to_string()))?;

        fs::create_dir_all(&self.config.workspace_dir)?;
        let log_path = self.config.workspace_dir.join("openclaw.log");
        let log_out = File::create(&log_path)?;
        let log_err = log_out.try_clone()?;

        let child = Command::new(program)
            .args(args)
            .current_dir(&self.config.workspace_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_out))
            .stderr(Stdio::from(log_err))
            .spawn()?;
        tracing::info!(
            pid = child.id(),
            log = %log_path.display(),
            "openclaw process started"
        );
        self.child = Some(child);
        Ok(())
    }
}

impl OutreachRuntime for OpenClaw {
    fn start(&mut self) -> Result<()> {
        if self.child.is_some() {
            return Ok(());
        }
        if let Some(argv) = self.config.start_command.clone() {
            return self.spawn_local(&argv);
        }
        if self.config.server_url.is_some() {
            // Remote server; nothing to launch.
            return Ok(());
        }
        Err(RuntimeError::Configuration(
            "neither OPENCLAW_START_COMMAND nor OPENCLAW_URL is set".to_string(),
        ))
    }

    fn stop(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        if child.try_wait()?.is_none() {
            terminate(&mut child)?;
        }
        let deadline = Instant::now() + STOP_TIMEOUT;
        loop {
            if let Some(status) = child.try_wait()? {
                tracing::info!(%status, "openclaw process exited");
                return Ok(());
            }
            if Instant::now() >= deadline {
                tracing::warn!("openclaw process ignored termination signal; killing");
                child.kill()?;
                child.wait()?;
                return Ok(());
            }
            thread::sleep(STOP_POLL_INTERVAL);
        }
    }

    fn generate_outreach(&mut self, job_id: &str) -> Result<DraftMessage> {
        let Some(server_url) = self.config.server_url.as_deref() else {
            return Err(RuntimeError::Configuration(
                "OPENCLAW_URL is required to generate drafts".to_string(),
            ));
        };

        let user_prompt = format!("Create outreach for job id: {job_id}.");
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
        };

        let url = format!("{}/v1/chat/completions", server_url.trim_end_matches('/'));
        let start = Instant::now();
        let mut builder = self.agent.post(&url);
        if let Some(key) = self.config.api_key.as_deref() {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }
        let mut response = builder.send_json(&request)?;
        let parsed: ChatResponse = response.body_mut().read_json()?;
        tracing::info!(
            job_id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "outreach draft generated"
        );

        let body = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_else(|| FALLBACK_BODY.to_string());
        Ok(DraftMessage {
            subject: format!("Draft outreach for {job_id}"),
            body,
        })
    }
}

#[cfg(unix)]
fn terminate(child: &mut Child) -> Result<()> {
    let pid = child.id() as libc::pid_t;
    if unsafe { libc::kill(pid, libc::SIGTERM) } != 0 {
        let err = std::io::Error::last_os_error();
        // A child that exited between try_wait and here reports ESRCH.
        if err.raw_os_error() != Some(libc::ESRCH) {
            return Err(err.into());
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) -> Result<()> {
    child.kill()?;
    Ok(())
}

#[cfg(test)]
#[path = "openclaw_tests.rs"]
mod tests;
