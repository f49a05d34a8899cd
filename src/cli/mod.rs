//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use crate::config::defaults::{DEFAULT_SOURCE_DIR, DEFAULT_TOOLCHAIN};
use crate::core::install::install;
use crate::core::options::{parse_commands, parse_env_override, InstallOptions};
use crate::infra::delegate::ProcessDelegate;

/// vendorinstall - install Go packages from a vendor directory
///
/// Links the entries of a vendor directory into a temporary GOPATH and runs
/// `go install` there, leaving the real workspace and environment untouched.
#[derive(Parser, Debug)]
#[command(name = "vendorinstall")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source directory whose entries become the GOPATH source tree
    #[arg(long, env = "VENDORINSTALL_SOURCE", default_value = DEFAULT_SOURCE_DIR)]
    pub source: PathBuf,

    /// Target directory (defaults to $GOBIN, if not set $GOPATH/bin, then ~/go/bin)
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Comma separated list of commands to execute after install in the temporary environment
    #[arg(long)]
    pub commands: Option<String>,

    /// Toolchain binary used for the install
    #[arg(long = "go", env = "VENDORINSTALL_GO", default_value = DEFAULT_TOOLCHAIN)]
    pub toolchain: String,

    /// Extra environment variable for delegated commands (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Kill a delegated command after this many seconds
    #[arg(long, env = "VENDORINSTALL_TIMEOUT", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Directory to create the temporary workspace in
    #[arg(long, env = "VENDORINSTALL_TMPDIR")]
    pub work_root: Option<PathBuf>,

    /// Disable output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Packages to install
    pub packages: Vec<String>,
}

impl Cli {
    /// Build install options from the parsed arguments
    pub fn install_options(&self) -> Result<InstallOptions> {
        let mut options = InstallOptions::new(self.packages.clone())
            .with_source(&self.source)
            .with_toolchain(&self.toolchain)
            .with_commands(parse_commands(self.commands.as_deref().unwrap_or_default())?);

        if let Some(target) = &self.target {
            options = options.with_target(target);
        }
        if let Some(work_root) = &self.work_root {
            options = options.with_work_root(work_root);
        }
        for entry in &self.env {
            let (key, value) = parse_env_override(entry)?;
            options = options.with_env(key, value);
        }

        Ok(options)
    }

    /// Execute the install
    pub async fn run(self) -> Result<()> {
        let options = self.install_options()?;

        let delegate = ProcessDelegate::new().with_timeout(self.timeout.map(Duration::from_secs));
        let report = install(&options, &delegate).await?;

        tracing::info!(
            "Installed {} into {} ({} vendor entries, {} follow-up commands)",
            options.packages.join(" "),
            report.target.display(),
            report.linked,
            report.commands_run
        );
        Ok(())
    }
}
