//! Sandbox configuration
//!
//! Configuration for the execution sandbox, loaded from environment or set dynamically.

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Context;
use tracing::warn;

/// Sandbox configuration
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Scratch directory holding per-execution workspaces
    pub scratch_root: PathBuf,
    /// Wall-clock run time limit in milliseconds (default: 10000ms = 10s)
    pub run_timeout_ms: u64,
    /// Compile time limit in milliseconds (default: 5000ms = 5s)
    pub compile_timeout_ms: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            scratch_root: PathBuf::from("/tmp/code-exec"),
            run_timeout_ms: 10_000,
            compile_timeout_ms: 5_000,
        }
    }
}

/// Global sandbox configuration
static SANDBOX_CONFIG: OnceLock<SandboxConfig> = OnceLock::new();

/// Initialize sandbox configuration from environment variables
pub fn init_from_env() -> anyhow::Result<&'static SandboxConfig> {
    let mut config = SandboxConfig::default();

    if let Ok(dir) = std::env::var("SCRATCH_DIR") {
        config.scratch_root = PathBuf::from(dir);
    }
    if let Ok(ms) = std::env::var("RUN_TIMEOUT_MS") {
        config.run_timeout_ms = ms.parse().context("Invalid RUN_TIMEOUT_MS")?;
    }
    if let Ok(ms) = std::env::var("COMPILE_TIMEOUT_MS") {
        config.compile_timeout_ms = ms.parse().context("Invalid COMPILE_TIMEOUT_MS")?;
    }

    SANDBOX_CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Sandbox configuration already initialized"))?;

    Ok(get())
}

/// Get sandbox configuration
pub fn get() -> &'static SandboxConfig {
    SANDBOX_CONFIG.get().unwrap_or_else(|| {
        static DEFAULT: OnceLock<SandboxConfig> = OnceLock::new();

        warn!("Sandbox configuration not initialized, using default");
        DEFAULT.get_or_init(SandboxConfig::default)
    })
}
