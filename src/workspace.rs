//! Workspace management for executions
//!
//! Each execution gets its own directory under the scratch root, named by a
//! unique execution id. Removing that directory reclaims every artifact the
//! execution produced (source files, binaries, class files).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use tracing::debug;
use uuid::Uuid;

use crate::config;

/// Create the scratch root if it does not exist yet
pub async fn ensure_scratch_root() -> Result<PathBuf> {
    let root = config::get().scratch_root.clone();
    tokio::fs::create_dir_all(&root)
        .await
        .with_context(|| format!("Failed to create scratch directory {}", root.display()))?;
    Ok(root)
}

/// Filesystem workspace owned by a single execution
pub struct Workspace {
    execution_id: String,
    dir: TempDir,
}

impl Workspace {
    /// Provision a fresh workspace directory under the scratch root
    pub async fn provision() -> Result<Self> {
        let root = ensure_scratch_root().await?;
        let execution_id = Uuid::new_v4().simple().to_string();

        let dir = tempfile::Builder::new()
            .prefix(&format!("{}-", execution_id))
            .tempdir_in(&root)
            .with_context(|| format!("Failed to create workspace under {}", root.display()))?;

        debug!(
            "Provisioned workspace {} at {}",
            execution_id,
            dir.path().display()
        );

        Ok(Self { execution_id, dir })
    }

    /// Unique id for this execution, used to name files in the workspace
    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the workspace
    pub fn file(&self, name: impl AsRef<str>) -> PathBuf {
        self.dir.path().join(name.as_ref())
    }

    /// Best-effort removal of the workspace and everything in it.
    /// A result has already been computed at this point, so failures are
    /// logged and swallowed rather than surfaced.
    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            debug!("Failed to remove workspace {}: {}", path.display(), e);
        }
    }
}
