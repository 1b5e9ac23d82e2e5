//! Python runner

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::{CommandSpec, LanguageRunner, Prepared};
use crate::workspace::Workspace;

pub struct PythonRunner;

#[async_trait]
impl LanguageRunner for PythonRunner {
    async fn prepare(&self, workspace: &Workspace, code: &str, _input: &str) -> Result<Prepared> {
        let source_path = workspace.file(format!("{}.py", workspace.execution_id()));

        fs::write(&source_path, code)
            .await
            .context("Failed to write Python source")?;

        let run = CommandSpec::new("python3")
            .with_args([source_path.to_string_lossy().into_owned()]);

        Ok(Prepared {
            source_path,
            compile: None,
            run,
        })
    }
}
