//! Temporary GOPATH workspace
//!
//! The workspace is a freshly created, uniquely named directory that acts as
//! the build root for one run. It is removed by [`Workspace::teardown`], or
//! by `Drop` when a run ends early through an error or a panic.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::defaults::{SRC_SUBDIR, WORKSPACE_PREFIX};
use crate::error::FilesystemError;

/// Provisioned temporary workspace
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a new empty workspace
    ///
    /// The directory is created under `parent`, or under the system temp
    /// directory when no parent is given. `parent` should be absolute so the
    /// workspace root is too.
    pub fn provision(parent: Option<&Path>) -> Result<Self, FilesystemError> {
        let parent = parent.map_or_else(std::env::temp_dir, Path::to_path_buf);

        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(&parent)
            .map_err(|e| FilesystemError::CreateTempDir {
                parent,
                error: e.to_string(),
            })?;

        tracing::debug!("Provisioned workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Workspace root, used as GOPATH
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Source tree where vendor entries are linked
    pub fn src_dir(&self) -> PathBuf {
        self.root().join(SRC_SUBDIR)
    }

    /// Remove the workspace, reporting failure
    ///
    /// Symlinks inside the workspace are removed themselves; their targets
    /// are never followed.
    pub fn teardown(self) -> Result<(), FilesystemError> {
        let path = self.root().to_path_buf();
        self.dir.close().map_err(|e| FilesystemError::RemoveDir {
            path: path.clone(),
            error: e.to_string(),
        })?;
        tracing::debug!("Removed workspace {}", path.display());
        Ok(())
    }
}
