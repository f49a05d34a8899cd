//! Scoped environment for delegated commands
//!
//! A [`ScopedEnv`] describes the variables a delegated command sees on top
//! of the inherited environment. It is injected into each child process and
//! never written to the parent's environment, so the caller's environment
//! is left exactly as it was on every exit path.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::config::env::{GOBIN, GOPATH, PATH, PATH_LIST_SEPARATOR};
use crate::error::ResolveError;

/// One overridden variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverride {
    /// Variable name
    pub key: String,
    /// Value before the scope, `None` if unset
    pub previous: Option<OsString>,
    /// Value inside the scope
    pub value: OsString,
}

/// Environment overrides applied to every delegated command of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopedEnv {
    overrides: Vec<EnvOverride>,
}

impl ScopedEnv {
    /// Overrides for a GOPATH-style workspace installing into `target`
    ///
    /// PATH gets `target` prepended, GOPATH points at the workspace and GOBIN
    /// at the target.
    pub fn for_workspace(
        workspace: &Path,
        target: &Path,
        lookup: impl Fn(&str) -> Option<OsString>,
    ) -> Result<Self, ResolveError> {
        let previous_path = lookup(PATH);
        let path = prepend_path(target, previous_path.as_deref())?;

        let scope = Self::default()
            .with_override(PATH, path, previous_path)
            .with_override(GOPATH, workspace.as_os_str(), lookup(GOPATH))
            .with_override(GOBIN, target.as_os_str(), lookup(GOBIN));
        Ok(scope)
    }

    /// Add or replace an override
    #[must_use]
    pub fn with_override(
        mut self,
        key: &str,
        value: impl Into<OsString>,
        previous: Option<OsString>,
    ) -> Self {
        let entry = EnvOverride {
            key: key.to_string(),
            previous,
            value: value.into(),
        };
        match self.overrides.iter_mut().find(|o| o.key == key) {
            Some(existing) => *existing = entry,
            None => self.overrides.push(entry),
        }
        self
    }

    /// All overrides, in insertion order
    pub fn overrides(&self) -> &[EnvOverride] {
        &self.overrides
    }

    /// Value a variable has inside the scope, if overridden
    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.overrides
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.value.as_os_str())
    }

    /// Key/value pairs to inject into a child process
    pub fn vars(&self) -> Vec<(String, OsString)> {
        self.overrides
            .iter()
            .map(|o| (o.key.clone(), o.value.clone()))
            .collect()
    }
}

/// Prepend `dir` to a search-path list
///
/// An unset or empty list becomes just `dir`, so no empty entry (meaning the
/// working directory) is added.
pub fn prepend_path(dir: &Path, previous: Option<&OsStr>) -> Result<OsString, ResolveError> {
    let mut path = std::env::join_paths([dir]).map_err(|e| ResolveError::InvalidPathEntry {
        path: dir.to_path_buf(),
        error: e.to_string(),
    })?;

    if let Some(previous) = previous.filter(|p| !p.is_empty()) {
        path.push(PATH_LIST_SEPARATOR);
        path.push(previous);
    }
    Ok(path)
}
