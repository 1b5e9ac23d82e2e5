//! End-to-end execution tests
//!
//! Each test skips itself when the language toolchain is not installed on
//! the host, so the suite stays green on minimal machines.

use std::time::Instant;

use playground_exec::executor::{execute, ExecutionRequest};

fn toolchain_available(program: &str) -> bool {
    std::process::Command::new(program)
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}

fn request(language: &str, code: &str, input: &str) -> ExecutionRequest {
    ExecutionRequest {
        code: code.to_string(),
        language: language.to_string(),
        input: input.to_string(),
    }
}

#[tokio::test]
async fn test_python_hello_world() {
    if !toolchain_available("python3") {
        eprintln!("skipping: python3 not installed");
        return;
    }

    let result = execute(&request("python", r#"print("Hello, World!")"#, "")).await;

    assert_eq!(result.output, "Hello, World!\n");
    assert_eq!(result.error, "");
}

#[tokio::test]
async fn test_python_reads_stdin() {
    if !toolchain_available("python3") {
        eprintln!("skipping: python3 not installed");
        return;
    }

    let result = execute(&request("python", "print(input())", "hello")).await;

    assert!(result.output.contains("hello"));
    assert_eq!(result.error, "");
}

#[tokio::test]
async fn test_python_nonzero_exit_without_stderr() {
    if !toolchain_available("python3") {
        eprintln!("skipping: python3 not installed");
        return;
    }

    let result = execute(&request("python", "import sys\nsys.exit(3)", "")).await;

    assert_eq!(result.error, "Process exited with code 3");
}

#[tokio::test]
async fn test_python_stderr_wins_over_exit_code_message() {
    if !toolchain_available("python3") {
        eprintln!("skipping: python3 not installed");
        return;
    }

    let result = execute(&request("python", r#"raise ValueError("boom")"#, "")).await;

    assert!(result.error.contains("ValueError"));
    assert!(!result.error.contains("Process exited with code"));
}

#[tokio::test]
async fn test_python_infinite_loop_times_out() {
    if !toolchain_available("python3") {
        eprintln!("skipping: python3 not installed");
        return;
    }

    let started = Instant::now();
    let result = execute(&request("python", "while True: pass", "")).await;
    let wall = started.elapsed();

    assert_eq!(result.error, "Execution timeout (10 seconds)");
    assert!(result.execution_time >= 10_000);
    assert!(result.execution_time <= 11_500, "took {}ms", result.execution_time);
    assert!(wall.as_millis() <= 12_000);
}

#[tokio::test]
async fn test_javascript_hello_world() {
    if !toolchain_available("node") {
        eprintln!("skipping: node not installed");
        return;
    }

    let result = execute(&request("javascript", r#"console.log("Hello, World!");"#, "")).await;

    assert_eq!(result.output, "Hello, World!\n");
    assert_eq!(result.error, "");
}

#[tokio::test]
async fn test_javascript_prompt_shim_serves_input() {
    if !toolchain_available("node") {
        eprintln!("skipping: node not installed");
        return;
    }

    let result = execute(&request("javascript", "console.log(prompt());", "hello")).await;

    assert!(result.output.contains("hello"));
    assert_eq!(result.error, "");
}

#[tokio::test]
async fn test_c_hello_world() {
    if !toolchain_available("gcc") {
        eprintln!("skipping: gcc not installed");
        return;
    }

    let code = r#"
#include <stdio.h>
int main(void) {
    printf("Hello, World!\n");
    return 0;
}
"#;
    let result = execute(&request("c", code, "")).await;

    assert_eq!(result.output, "Hello, World!\n");
    assert_eq!(result.error, "");
}

#[tokio::test]
async fn test_c_compile_error() {
    if !toolchain_available("gcc") {
        eprintln!("skipping: gcc not installed");
        return;
    }

    // Missing semicolon
    let code = "int main(void) { return 0 }";
    let result = execute(&request("c", code, "")).await;

    assert_eq!(result.output, "");
    assert!(result.error.starts_with("Compilation error:"), "{}", result.error);
    assert_eq!(result.execution_time, 0);
}

#[tokio::test]
async fn test_cpp_hello_world() {
    if !toolchain_available("g++") && !toolchain_available("gcc") {
        eprintln!("skipping: no C++ compiler installed");
        return;
    }

    let code = r#"
#include <iostream>
int main() {
    std::cout << "Hello, World!" << std::endl;
    return 0;
}
"#;
    let result = execute(&request("cpp", code, "")).await;

    assert_eq!(result.output, "Hello, World!\n");
    assert_eq!(result.error, "");
}

#[tokio::test]
async fn test_java_hello_world() {
    if !toolchain_available("javac") || !toolchain_available("java") {
        eprintln!("skipping: JDK not installed");
        return;
    }

    let code = r#"
public class Main {
    public static void main(String[] args) {
        System.out.println("Hello, World!");
    }
}
"#;
    let result = execute(&request("java", code, "")).await;

    assert_eq!(result.output, "Hello, World!\n");
    assert_eq!(result.error, "");
}

#[tokio::test]
async fn test_concurrent_executions_in_different_languages_do_not_interfere() {
    if !toolchain_available("python3") || !toolchain_available("node") {
        eprintln!("skipping: python3 or node not installed");
        return;
    }

    let alpha = request("python", r#"print("alpha")"#, "");
    let beta = request("javascript", r#"console.log("beta");"#, "");

    let (first, second) = tokio::join!(execute(&alpha), execute(&beta));

    assert_eq!(first.output, "alpha\n");
    assert_eq!(second.output, "beta\n");
    assert_eq!(first.error, "");
    assert_eq!(second.error, "");
}

#[tokio::test]
async fn test_unsupported_language() {
    let result = execute(&request("ruby", "puts 1", "")).await;

    assert_eq!(result.output, "");
    assert!(result.error.contains("Unsupported language: ruby"));
    assert_eq!(result.execution_time, 0);
}
