//! JavaScript runner
//!
//! Node has no built-in synchronous `prompt()`, so the source is wrapped
//! with a shim that splits the request input into lines and serves them in
//! order. The input is embedded as a JSON string literal so user-controlled
//! text cannot break out of the wrapper.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::{CommandSpec, LanguageRunner, Prepared};
use crate::workspace::Workspace;

pub struct JavaScriptRunner;

fn wrap_with_prompt_shim(code: &str, input: &str) -> Result<String> {
    let input_literal =
        serde_json::to_string(input).context("Failed to encode stdin for the prompt shim")?;

    Ok(format!(
        r#"const __rawInput = {input_literal};
const __inputLines = __rawInput.split('\n').filter((line) => line.trim() !== '');
let __inputIndex = 0;

global.prompt = function (question) {{
  if (__inputIndex < __inputLines.length) {{
    const answer = __inputLines[__inputIndex++];
    if (question !== undefined) {{
      console.log(question + answer);
    }}
    return answer;
  }}
  return '';
}};

{code}
"#
    ))
}

#[async_trait]
impl LanguageRunner for JavaScriptRunner {
    async fn prepare(&self, workspace: &Workspace, code: &str, input: &str) -> Result<Prepared> {
        let source_path = workspace.file(format!("{}.js", workspace.execution_id()));
        let wrapped = wrap_with_prompt_shim(code, input)?;

        fs::write(&source_path, wrapped)
            .await
            .context("Failed to write JavaScript source")?;

        let run =
            CommandSpec::new("node").with_args([source_path.to_string_lossy().into_owned()]);

        Ok(Prepared {
            source_path,
            compile: None,
            run,
        })
    }
}
