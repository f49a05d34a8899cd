//! Default configuration values

/// Vendor directory used when `--source` is not given
pub const DEFAULT_SOURCE_DIR: &str = "vendor";

/// Toolchain binary used for the primary install
pub const DEFAULT_TOOLCHAIN: &str = "go";

/// Toolchain subcommand that builds and installs packages
pub const INSTALL_SUBCOMMAND: &str = "install";

/// Name prefix of the temporary workspace directory
pub const WORKSPACE_PREFIX: &str = "vendorinstall-gopath-";

/// Source tree inside a GOPATH-style workspace
pub const SRC_SUBDIR: &str = "src";

/// Binary directory inside a GOPATH
pub const BIN_SUBDIR: &str = "bin";

/// GOPATH the toolchain assumes when none is set, relative to the home directory
pub const HOME_GOPATH_SUBDIR: &str = "go";

/// Separator between follow-up commands in `--commands`
pub const COMMAND_SEPARATOR: char = ',';

/// How long output is still collected after a timed-out command is killed
///
/// Descendants of the killed command may hold the output pipe open.
pub const KILL_DRAIN_GRACE: std::time::Duration = std::time::Duration::from_millis(500);
