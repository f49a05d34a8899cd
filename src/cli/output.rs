//! Output formatting and progress indicators
//!
//! Informational lines respect `--quiet`; errors and the output of a failed
//! command are always printed.

use std::io::Write;
use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::VendorInstallError;

static GLOBAL: OnceLock<OutputConfig> = OnceLock::new();

/// Output settings derived from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress informational output
    pub quiet: bool,
    /// Verbosity level (-v count)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create an output configuration
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Make this configuration the process-wide one
    ///
    /// Only the first call takes effect.
    pub fn apply_global(self) {
        let _ = GLOBAL.set(self);
    }

    /// Current process-wide configuration
    pub fn global() -> Self {
        GLOBAL.get().copied().unwrap_or_default()
    }

    /// Default tracing level for this configuration
    pub fn log_level(&self) -> tracing::Level {
        match (self.quiet, self.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, _) => tracing::Level::DEBUG,
        }
    }
}

/// Print an informational line unless quiet
pub fn info(message: &str) {
    if !OutputConfig::global().quiet {
        println!("{message}");
    }
}

/// Print the output of a successful command when verbose
pub fn command_output(output: &[u8]) {
    let config = OutputConfig::global();
    if !config.quiet && config.verbose > 0 && !output.is_empty() {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(output);
        let _ = stdout.flush();
    }
}

/// Create a spinner for a running command, or none when quiet
pub fn create_spinner(message: &str) -> Option<ProgressBar> {
    if OutputConfig::global().quiet {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    Some(pb)
}

/// Print a failure: the failing command's output first, then `error: ...`
pub fn display_error(error: &anyhow::Error) {
    let captured = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<VendorInstallError>())
        .and_then(VendorInstallError::captured_output);

    let mut stderr = std::io::stderr().lock();
    if let Some(output) = captured.filter(|o| !o.is_empty()) {
        let _ = stderr.write_all(output);
        if !output.ends_with(b"\n") {
            let _ = writeln!(stderr);
        }
    }
    let _ = writeln!(stderr, "error: {error:#}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(OutputConfig::new(true, 2).log_level(), tracing::Level::ERROR);
        assert_eq!(OutputConfig::new(false, 0).log_level(), tracing::Level::WARN);
        assert_eq!(OutputConfig::new(false, 1).log_level(), tracing::Level::INFO);
        assert_eq!(OutputConfig::new(false, 3).log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_default_is_not_quiet() {
        let config = OutputConfig::default();
        assert!(!config.quiet);
        assert_eq!(config.verbose, 0);
    }
}
