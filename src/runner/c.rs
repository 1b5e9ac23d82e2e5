//! C runner

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::{CommandSpec, LanguageRunner, Prepared};
use crate::workspace::Workspace;

pub struct CRunner;

#[async_trait]
impl LanguageRunner for CRunner {
    async fn prepare(&self, workspace: &Workspace, code: &str, _input: &str) -> Result<Prepared> {
        let id = workspace.execution_id();
        let source_path = workspace.file(format!("{}.c", id));
        let exec_path = workspace.file(format!("{}_exec", id));

        fs::write(&source_path, code)
            .await
            .context("Failed to write C source")?;

        let source = source_path.to_string_lossy().into_owned();
        let exec = exec_path.to_string_lossy().into_owned();

        let compile = CommandSpec::new("gcc").with_args([source, "-o".to_string(), exec.clone()]);
        let run = CommandSpec::new(exec);

        Ok(Prepared {
            source_path,
            compile: Some(compile),
            run,
        })
    }
}
