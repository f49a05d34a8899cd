//! Environment variable names

/// Executable search path
pub const PATH: &str = "PATH";

/// Toolchain workspace root
pub const GOPATH: &str = "GOPATH";

/// Toolchain install directory
pub const GOBIN: &str = "GOBIN";

/// Variables owned by the scoped environment of every delegated command
pub const SCOPED_VARS: [&str; 3] = [PATH, GOPATH, GOBIN];

/// Platform separator for search-path lists
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: &str = ";";

/// Platform separator for search-path lists
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: &str = ":";
