//! Java runner
//!
//! The source file must be named after its public class, so the class name
//! is extracted from the code. Code without a public class is wrapped in a
//! synthetic `Main<id>` class so snippets still compile.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use tokio::fs;

use super::{CommandSpec, LanguageRunner, Prepared};
use crate::workspace::Workspace;

pub struct JavaRunner;

fn class_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"public\s+class\s+(\w+)").expect("valid class pattern"))
}

/// Extract the public class name, if the code declares one
fn extract_class_name(code: &str) -> Option<String> {
    class_name_pattern()
        .captures(code)
        .map(|caps| caps[1].to_string())
}

#[async_trait]
impl LanguageRunner for JavaRunner {
    async fn prepare(&self, workspace: &Workspace, code: &str, _input: &str) -> Result<Prepared> {
        let (class_name, final_code) = match extract_class_name(code) {
            Some(name) => (name, code.to_string()),
            None => {
                let name = format!("Main{}", workspace.execution_id());
                let wrapped = format!("public class {} {{\n{}\n}}", name, code);
                (name, wrapped)
            }
        };

        let source_path = workspace.file(format!("{}.java", class_name));

        fs::write(&source_path, final_code)
            .await
            .context("Failed to write Java source")?;

        let compile =
            CommandSpec::new("javac").with_args([source_path.to_string_lossy().into_owned()]);
        // Runs with the workspace as cwd, where javac dropped the .class file
        let run = CommandSpec::new("java").with_args([class_name]);

        Ok(Prepared {
            source_path,
            compile: Some(compile),
            run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_class_name() {
        let code = "public class Hello { public static void main(String[] a) {} }";
        assert_eq!(extract_class_name(code), Some("Hello".to_string()));
    }

    #[test]
    fn test_extract_class_name_with_whitespace() {
        let code = "public\n  class\n  Spread {}";
        assert_eq!(extract_class_name(code), Some("Spread".to_string()));
    }

    #[test]
    fn test_extract_class_name_missing() {
        assert_eq!(extract_class_name("int x = 1;"), None);
        // Modifiers between public and class are not recognized
        assert_eq!(extract_class_name("public final class Edge {}"), None);
    }

    #[tokio::test]
    async fn test_prepare_names_file_after_class() {
        let workspace = Workspace::provision().await.unwrap();
        let prepared = JavaRunner
            .prepare(&workspace, "public class Hello {}", "")
            .await
            .unwrap();

        assert!(prepared.source_path.ends_with("Hello.java"));
        assert_eq!(prepared.run.program, "java");
        assert_eq!(prepared.run.args, vec!["Hello".to_string()]);

        workspace.cleanup();
    }

    #[tokio::test]
    async fn test_prepare_wraps_classless_code() {
        let workspace = Workspace::provision().await.unwrap();
        let snippet = "public static void main(String[] a) {}";
        let prepared = JavaRunner.prepare(&workspace, snippet, "").await.unwrap();

        let expected_class = format!("Main{}", workspace.execution_id());
        assert!(prepared
            .source_path
            .ends_with(format!("{}.java", expected_class)));

        let written = std::fs::read_to_string(&prepared.source_path).unwrap();
        assert!(written.starts_with(&format!("public class {} {{", expected_class)));
        assert!(written.contains(snippet));

        workspace.cleanup();
    }
}
