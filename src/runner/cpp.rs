//! C++ runner
//!
//! Compiles with g++. When g++ itself cannot be spawned (not installed),
//! falls back to gcc with -lstdc++ for basic C++ support.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{run_compiler, CommandSpec, CompileOutcome, LanguageRunner, Prepared};
use crate::workspace::Workspace;

pub struct CppRunner;

#[async_trait]
impl LanguageRunner for CppRunner {
    async fn prepare(&self, workspace: &Workspace, code: &str, _input: &str) -> Result<Prepared> {
        let id = workspace.execution_id();
        let source_path = workspace.file(format!("{}.cpp", id));
        let exec_path = workspace.file(format!("{}_exec", id));

        fs::write(&source_path, code)
            .await
            .context("Failed to write C++ source")?;

        let source = source_path.to_string_lossy().into_owned();
        let exec = exec_path.to_string_lossy().into_owned();

        let compile = CommandSpec::new("g++").with_args([source, "-o".to_string(), exec.clone()]);
        let run = CommandSpec::new(exec);

        Ok(Prepared {
            source_path,
            compile: Some(compile),
            run,
        })
    }

    async fn compile(&self, workspace: &Workspace, prepared: &Prepared) -> Result<CompileOutcome> {
        let gxx = match &prepared.compile {
            Some(cmd) => cmd,
            None => return Ok(CompileOutcome::NotRequired),
        };

        match run_compiler(gxx, workspace.path()).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                debug!("g++ unavailable ({:#}), falling back to gcc -lstdc++", e);

                let mut args = gxx.args.clone();
                args.push("-lstdc++".to_string());
                let gcc = CommandSpec::new("gcc").with_args(args);

                run_compiler(&gcc, workspace.path()).await
            }
        }
    }
}
