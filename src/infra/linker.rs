//! Vendor linking
//!
//! Mirrors the immediate entries of a vendor directory into a workspace
//! source tree as symbolic links. Entries are linked as whole units; the
//! linker never descends into them.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::FilesystemError;
use crate::infra::filesystem;

/// A link created inside the workspace source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedEntry {
    /// Vendor entry name, also the link name
    pub name: OsString,
    /// Path of the created link
    pub link: PathBuf,
    /// Absolute path the link points at
    pub target: PathBuf,
}

/// Link every entry of `source` into `src_dir`
///
/// `source` must be absolute so links stay valid regardless of the working
/// directory. `src_dir` and its parents are created if missing. The first
/// failure stops linking.
pub fn link_vendor(src_dir: &Path, source: &Path) -> Result<Vec<LinkedEntry>, FilesystemError> {
    debug_assert!(source.is_absolute(), "vendor source must be absolute");

    filesystem::create_dir_all(src_dir)?;

    let mut linked = Vec::new();
    for name in filesystem::list_dir(source)? {
        let target = source.join(&name);
        let link = src_dir.join(&name);
        filesystem::symlink(&target, &link)?;
        tracing::debug!("Linked {} -> {}", link.display(), target.display());
        linked.push(LinkedEntry { name, link, target });
    }

    Ok(linked)
}
