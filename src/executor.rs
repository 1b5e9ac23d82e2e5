//! Dispatcher for execution requests
//!
//! Maps a language identifier to its runner, provisions a workspace, runs
//! the compile/run pipeline under the supervisor's timeout, and converts
//! every failure mode into an `ExecutionResult`. Nothing escapes to the
//! HTTP layer as an error.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config;
use crate::language::Language;
use crate::runner::{CompileOutcome, LanguageRunner};
use crate::supervisor::{self, RunStatus};
use crate::workspace::Workspace;

/// One code execution request
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: String,
    /// Text piped to the program's stdin
    #[serde(default)]
    pub input: String,
}

/// Result returned to the client; errors are in-band
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub output: String,
    pub error: String,
    /// Wall-clock milliseconds from spawn to exit (0 if nothing ran)
    pub execution_time: u64,
}

impl ExecutionResult {
    fn failure(message: String) -> Self {
        Self {
            output: String::new(),
            error: message,
            execution_time: 0,
        }
    }
}

/// Execute a request, converting every error into an error result
pub async fn execute(request: &ExecutionRequest) -> ExecutionResult {
    match try_execute(request).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Execution failed: {:#}", e);
            ExecutionResult::failure(format!("{:#}", e))
        }
    }
}

async fn try_execute(request: &ExecutionRequest) -> Result<ExecutionResult> {
    // Reject unknown languages before touching the filesystem
    let language: Language = request.language.parse()?;
    let runner = language.runner();

    info!(
        "Executing {} submission ({} bytes)",
        language,
        request.code.len()
    );

    let workspace = Workspace::provision()
        .await
        .context("Failed to provision workspace")?;

    let result = run_in_workspace(runner, &workspace, request).await;

    workspace.cleanup();

    result
}

async fn run_in_workspace(
    runner: &dyn LanguageRunner,
    workspace: &Workspace,
    request: &ExecutionRequest,
) -> Result<ExecutionResult> {
    let prepared = runner
        .prepare(workspace, &request.code, &request.input)
        .await
        .context("Failed to prepare source")?;

    match runner.compile(workspace, &prepared).await? {
        CompileOutcome::Failed(message) => {
            debug!("Compilation failed: {}", message);
            return Ok(ExecutionResult {
                output: String::new(),
                error: format!("Compilation error: {}", message),
                execution_time: 0,
            });
        }
        CompileOutcome::NotRequired | CompileOutcome::Succeeded => {}
    }

    let run_timeout_ms = config::get().run_timeout_ms;
    let run = supervisor::supervise(
        &prepared.run,
        workspace.path(),
        &request.input,
        Duration::from_millis(run_timeout_ms),
    )
    .await?;

    let execution_time = run.elapsed.as_millis() as u64;

    let result = match run.status {
        RunStatus::TimedOut => ExecutionResult {
            output: run.stdout,
            // The timeout message wins over any partial stderr
            error: format!("Execution timeout ({} seconds)", run_timeout_ms / 1000),
            execution_time,
        },
        RunStatus::Exited(code) => {
            let error = if !run.stderr.is_empty() {
                run.stderr
            } else if code != 0 {
                format!("Process exited with code {}", code)
            } else {
                String::new()
            };

            ExecutionResult {
                output: run.stdout,
                error,
                execution_time,
            }
        }
    };

    Ok(result)
}
