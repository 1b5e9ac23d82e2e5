//! Supported languages and runner dispatch

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SandboxError;
use crate::runner::{
    c::CRunner, cpp::CppRunner, java::JavaRunner, javascript::JavaScriptRunner,
    python::PythonRunner, LanguageRunner,
};

/// Languages the sandbox can execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    C,
    Cpp,
    Java,
}

impl Language {
    /// Get the runner implementation for this language
    pub fn runner(&self) -> &'static dyn LanguageRunner {
        match self {
            Language::Python => &PythonRunner,
            Language::Javascript => &JavaScriptRunner,
            Language::C => &CRunner,
            Language::Cpp => &CppRunner,
            Language::Java => &JavaRunner,
        }
    }
}

impl FromStr for Language {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "python3" | "py" => Ok(Language::Python),
            "javascript" | "js" | "node" => Ok(Language::Javascript),
            "c" => Ok(Language::C),
            "cpp" | "c++" => Ok(Language::Cpp),
            "java" => Ok(Language::Java),
            other => Err(SandboxError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
        };
        write!(f, "{}", s)
    }
}
