//! Output directory resolution
//!
//! Priority: explicit target > `$GOBIN` > first `$GOPATH` entry + `bin` >
//! `<home>/go/bin`. The result is always absolute.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::defaults::{BIN_SUBDIR, HOME_GOPATH_SUBDIR};
use crate::config::env::{GOBIN, GOPATH};
use crate::error::ResolveError;

/// Make `path` absolute by joining relative paths onto `cwd`
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Current working directory, as a resolution error on failure
pub fn current_dir() -> Result<PathBuf, ResolveError> {
    std::env::current_dir().map_err(|e| ResolveError::CurrentDir {
        error: e.to_string(),
    })
}

/// Resolve the directory built binaries are installed into
pub fn resolve_target_dir(
    explicit: Option<&Path>,
    lookup: impl Fn(&str) -> Option<OsString>,
    home: Option<PathBuf>,
    cwd: &Path,
) -> Result<PathBuf, ResolveError> {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    let target = if let Some(explicit) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        explicit.to_path_buf()
    } else if let Some(gobin) = non_empty(GOBIN) {
        PathBuf::from(gobin)
    } else if let Some(gopath) = non_empty(GOPATH).and_then(|v| first_path_entry(&v)) {
        gopath.join(BIN_SUBDIR)
    } else {
        home.ok_or(ResolveError::NoHomeDir)?
            .join(HOME_GOPATH_SUBDIR)
            .join(BIN_SUBDIR)
    };

    Ok(absolutize(&target, cwd))
}

/// First non-empty entry of a search-path list
fn first_path_entry(list: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(list).find(|p| !p.as_os_str().is_empty())
}
