//! Error types for vendorinstall
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors, raised before any side effect
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No package arguments were given
    #[error("no packages: specify a package")]
    NoPackages,

    /// Follow-up command list contains an entry without a program
    #[error("follow-up command #{index} is empty")]
    EmptyCommand { index: usize },

    /// Extra environment entry is not KEY=VALUE
    #[error("invalid environment override '{entry}': expected KEY=VALUE")]
    InvalidEnvOverride { entry: String },

    /// Extra environment entry targets a variable the workspace controls
    #[error("environment variable '{key}' is set by vendorinstall and cannot be overridden")]
    ReservedVariable { key: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create the temporary workspace
    #[error("Failed to create temporary directory in '{parent}': {error}")]
    CreateTempDir { parent: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to list directory
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },

    /// Failed to create a symbolic link
    #[error("Failed to link '{link}' -> '{target}': {error}")]
    Symlink {
        link: PathBuf,
        target: PathBuf,
        error: String,
    },
}

/// Errors resolving paths and environment values
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Current working directory is unavailable
    #[error("Failed to determine current directory: {error}")]
    CurrentDir { error: String },

    /// No target given and nothing to derive one from
    #[error("Cannot determine target directory: GOBIN and GOPATH are unset and no home directory was found")]
    NoHomeDir,

    /// Path cannot be placed on a search-path list
    #[error("'{path}' cannot be added to PATH: {error}")]
    InvalidPathEntry { path: PathBuf, error: String },
}

/// Errors running a delegated command
#[derive(Error, Debug)]
pub enum DelegateError {
    /// Program could not be located
    #[error("{program}: executable file not found in PATH")]
    NotFound { program: String },

    /// Program could not be started
    #[error("failed to start '{program}': {error}")]
    Spawn { program: String, error: String },

    /// I/O failure while the program was running
    #[error("failed while running '{command}': {error}")]
    Io { command: String, error: String },

    /// Program exited unsuccessfully
    #[error("'{command}' failed: {status}")]
    Failed {
        command: String,
        status: String,
        output: Vec<u8>,
    },

    /// Program exceeded the configured timeout and was killed
    #[error("'{command}' timed out after {timeout:?}")]
    TimedOut {
        command: String,
        timeout: Duration,
        output: Vec<u8>,
    },
}

impl DelegateError {
    /// Combined output captured before the failure, if any
    pub fn output(&self) -> Option<&[u8]> {
        match self {
            Self::Failed { output, .. } | Self::TimedOut { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Top-level vendorinstall error type
#[derive(Error, Debug)]
pub enum VendorInstallError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Path or environment resolution error
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Delegated command error
    #[error(transparent)]
    Delegate(#[from] DelegateError),
}

impl VendorInstallError {
    /// Output of the failing delegated command, if the failure came from one
    pub fn captured_output(&self) -> Option<&[u8]> {
        match self {
            Self::Delegate(e) => e.output(),
            _ => None,
        }
    }
}
