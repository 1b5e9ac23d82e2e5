//! Language runners
//!
//! Per-language strategy objects. A runner knows how to materialize source
//! code into a workspace, how to compile it (when the language needs it),
//! and which command runs the result. It does NOT enforce timeouts or shape
//! HTTP responses; the supervisor and dispatcher own those concerns.

pub mod c;
pub mod cpp;
pub mod java;
pub mod javascript;
pub mod python;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config;
use crate::workspace::Workspace;

/// Command specification for execution
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Program path or name
    pub program: String,
    /// Arguments to the program
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(|a| a.into()).collect();
        self
    }
}

/// Source materialized into a workspace, ready to compile and run
#[derive(Debug)]
pub struct Prepared {
    /// Where the source was written
    pub source_path: PathBuf,
    /// Compile command, if the language has a compile step
    pub compile: Option<CommandSpec>,
    /// Command that runs the program
    pub run: CommandSpec,
}

/// Result of a compilation attempt
#[derive(Debug, PartialEq)]
pub enum CompileOutcome {
    /// Interpreted language, nothing to compile
    NotRequired,
    Succeeded,
    /// Compiler rejected the source; execution must not begin
    Failed(String),
}

/// Per-language preparation and compilation strategy
#[async_trait]
pub trait LanguageRunner: Send + Sync {
    /// Write the request's source code into the workspace
    async fn prepare(&self, workspace: &Workspace, code: &str, input: &str) -> Result<Prepared>;

    /// Compile the prepared source. Interpreted languages keep the default.
    async fn compile(&self, workspace: &Workspace, prepared: &Prepared) -> Result<CompileOutcome> {
        match &prepared.compile {
            Some(cmd) => run_compiler(cmd, workspace.path()).await,
            None => Ok(CompileOutcome::NotRequired),
        }
    }
}

/// Run a compiler command under the configured compile time limit
pub(crate) async fn run_compiler(cmd: &CommandSpec, work_dir: &Path) -> Result<CompileOutcome> {
    let timeout = Duration::from_millis(config::get().compile_timeout_ms);

    debug!("Compiling with {} {:?}", cmd.program, cmd.args);

    let mut command = Command::new(&cmd.program);
    command
        .args(&cmd.args)
        .current_dir(work_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(result) => result.with_context(|| format!("Failed to run compiler {}", cmd.program))?,
        Err(_) => return Ok(CompileOutcome::Failed("Compilation timed out".to_string())),
    };

    if output.status.success() {
        return Ok(CompileOutcome::Succeeded);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();

    let message = if !stderr.is_empty() {
        stderr
    } else if !stdout.is_empty() {
        stdout
    } else {
        format!(
            "Compilation failed with exit code {}",
            output.status.code().unwrap_or(-1)
        )
    };

    Ok(CompileOutcome::Failed(message))
}
