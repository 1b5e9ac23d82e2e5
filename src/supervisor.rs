//! Execution supervisor
//!
//! Wraps a child process with a hard wall-clock timeout. Stdout and stderr
//! are drained concurrently while the process runs, so partial output
//! survives a timeout kill. Exactly one of the two race arms (process exit,
//! timer) resolves the run; the other is neutralized.

use std::path::Path;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::runner::CommandSpec;

/// How long to keep draining the pipes after the process itself is done.
/// A forked grandchild inherits the pipe write ends and can hold them open
/// long after the child exits or is killed; without this bound the response
/// would wait on the grandchild and escape the wall-clock budget.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// How a supervised process ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    /// Process exited on its own with the given exit code
    Exited(i32),
    /// Process was still running when the timer fired and was killed
    TimedOut,
}

/// Outcome of a supervised run
#[derive(Debug)]
pub struct SupervisedRun {
    pub status: RunStatus,
    /// Accumulated stdout (partial if the run timed out)
    pub stdout: String,
    /// Accumulated stderr
    pub stderr: String,
    /// Wall-clock time from spawn to exit or kill
    pub elapsed: Duration,
}

/// Run a command with piped stdio under a wall-clock timeout
pub async fn supervise(
    cmd: &CommandSpec,
    work_dir: &Path,
    stdin: &str,
    timeout: Duration,
) -> Result<SupervisedRun> {
    debug!("Supervising {} {:?} in {}", cmd.program, cmd.args, work_dir.display());

    let mut command = Command::new(&cmd.program);
    command
        .args(&cmd.args)
        .current_dir(work_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();
    let mut child = command
        .spawn()
        .with_context(|| format!("Failed to spawn {}", cmd.program))?;

    // Drain output before feeding stdin so neither pipe can deadlock
    let (mut stdout_task, stdout_buf) = collect_stream(child.stdout.take());
    let (mut stderr_task, stderr_buf) = collect_stream(child.stderr.take());

    let stdin_pipe = child.stdin.take();
    let input = stdin.to_string();
    tokio::spawn(async move {
        if let Some(mut pipe) = stdin_pipe {
            if !input.is_empty() {
                let _ = pipe.write_all(input.as_bytes()).await;
            }
            // pipe dropped here, closing the child's stdin
        }
    });

    let status = tokio::select! {
        exit = child.wait() => {
            let exit = exit.context("Failed to wait for child process")?;
            RunStatus::Exited(exit.code().unwrap_or(-1))
        }
        _ = tokio::time::sleep(timeout) => {
            // Non-catchable kill, then reap so no zombie survives
            let _ = child.start_kill();
            let _ = child.wait().await;
            RunStatus::TimedOut
        }
    };

    let elapsed = start.elapsed();

    // The pipes normally close with the process, but a grandchild may still
    // hold them; give the collectors a short grace and take what arrived
    let (stdout_drained, stderr_drained) = tokio::join!(
        tokio::time::timeout(DRAIN_GRACE, &mut stdout_task),
        tokio::time::timeout(DRAIN_GRACE, &mut stderr_task),
    );
    if stdout_drained.is_err() {
        stdout_task.abort();
    }
    if stderr_drained.is_err() {
        stderr_task.abort();
    }

    let stdout = take_captured(&stdout_buf);
    let stderr = take_captured(&stderr_buf);

    Ok(SupervisedRun {
        status,
        stdout,
        stderr,
        elapsed,
    })
}

/// Accumulate a pipe's chunks into a shared buffer as they arrive.
/// The buffer stays readable even when the collector is cut off mid-drain.
fn collect_stream<R>(stream: Option<R>) -> (JoinHandle<()>, Arc<Mutex<Vec<u8>>>)
where
    R: AsyncReadExt + Unpin + Send + 'static,
{
    let buf = Arc::new(Mutex::new(Vec::new()));
    let shared = Arc::clone(&buf);

    let task = tokio::spawn(async move {
        if let Some(mut stream) = stream {
            let mut chunk = [0u8; 4096];
            loop {
                match stream.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => {
                        if let Ok(mut captured) = shared.lock() {
                            captured.extend_from_slice(&chunk[..n]);
                        }
                    }
                    Err(_) => break,
                }
            }
        }
    });

    (task, buf)
}

fn take_captured(buf: &Arc<Mutex<Vec<u8>>>) -> String {
    buf.lock()
        .map(|captured| String::from_utf8_lossy(&captured).into_owned())
        .unwrap_or_default()
}
