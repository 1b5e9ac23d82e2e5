use thiserror::Error;

/// Errors surfaced by the execution sandbox
#[derive(Debug, Error)]
pub enum SandboxError {
    /// Requested language is not one of the supported identifiers
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}
