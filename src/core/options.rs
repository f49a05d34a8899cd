//! Install options
//!
//! Collects what a run needs and parses the string forms accepted on the
//! command line: follow-up command lists and extra environment entries.

use std::fmt;
use std::path::PathBuf;

use crate::config::defaults::{COMMAND_SEPARATOR, DEFAULT_SOURCE_DIR, DEFAULT_TOOLCHAIN};
use crate::config::env::SCOPED_VARS;
use crate::error::ConfigError;

/// A command run in the workspace after the install succeeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpCommand {
    /// Program name or path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
}

impl FollowUpCommand {
    /// Split a command line on whitespace into program and arguments
    ///
    /// Returns `None` for a blank line. Quoting is not interpreted.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().map(str::to_string);
        let program = tokens.next()?;
        Some(Self {
            program,
            args: tokens.collect(),
        })
    }
}

impl fmt::Display for FollowUpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Parse a comma-separated follow-up command list
///
/// An empty list yields no commands; an empty entry inside a list is an error.
pub fn parse_commands(list: &str) -> Result<Vec<FollowUpCommand>, ConfigError> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    list.split(COMMAND_SEPARATOR)
        .enumerate()
        .map(|(i, line)| {
            FollowUpCommand::parse(line).ok_or(ConfigError::EmptyCommand { index: i + 1 })
        })
        .collect()
}

/// Parse a `KEY=VALUE` environment entry
pub fn parse_env_override(entry: &str) -> Result<(String, String), ConfigError> {
    let invalid = || ConfigError::InvalidEnvOverride {
        entry: entry.to_string(),
    };

    let (key, value) = entry.split_once('=').ok_or_else(invalid)?;
    if key.is_empty() {
        return Err(invalid());
    }
    if SCOPED_VARS.iter().any(|v| key.eq_ignore_ascii_case(v)) {
        return Err(ConfigError::ReservedVariable {
            key: key.to_string(),
        });
    }
    Ok((key.to_string(), value.to_string()))
}

/// Everything one install run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Packages passed verbatim to the install command
    pub packages: Vec<String>,
    /// Vendor directory, possibly relative
    pub source: PathBuf,
    /// Explicit output directory
    pub target: Option<PathBuf>,
    /// Commands run after the install
    pub commands: Vec<FollowUpCommand>,
    /// Toolchain binary for the install
    pub toolchain: String,
    /// Extra variables injected into every delegated command
    pub extra_env: Vec<(String, String)>,
    /// Parent directory of the temporary workspace
    pub work_root: Option<PathBuf>,
}

impl InstallOptions {
    /// Create options for the given packages with defaults for everything else
    pub fn new(packages: Vec<String>) -> Self {
        Self {
            packages,
            source: PathBuf::from(DEFAULT_SOURCE_DIR),
            target: None,
            commands: Vec::new(),
            toolchain: DEFAULT_TOOLCHAIN.to_string(),
            extra_env: Vec::new(),
            work_root: None,
        }
    }

    /// Set the vendor directory
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the follow-up commands
    #[must_use]
    pub fn with_commands(mut self, commands: Vec<FollowUpCommand>) -> Self {
        self.commands = commands;
        self
    }

    /// Set the toolchain binary
    #[must_use]
    pub fn with_toolchain(mut self, toolchain: impl Into<String>) -> Self {
        self.toolchain = toolchain.into();
        self
    }

    /// Add an extra environment variable
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_env.push((key.into(), value.into()));
        self
    }

    /// Set the parent directory of the temporary workspace
    #[must_use]
    pub fn with_work_root(mut self, work_root: impl Into<PathBuf>) -> Self {
        self.work_root = Some(work_root.into());
        self
    }

    /// Check the options before anything touches the filesystem
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.packages.is_empty() {
            return Err(ConfigError::NoPackages);
        }
        Ok(())
    }
}
