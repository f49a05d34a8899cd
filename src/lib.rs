//! vendorinstall - install Go packages from a vendor directory
//!
//! Builds packages whose dependencies live in a local vendor directory by
//! linking that directory's entries into a throwaway GOPATH and running the
//! toolchain's install command there.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Install options, target resolution, environment scoping and orchestration
//! - [`infra`] - Infrastructure layer (filesystem, workspace, child processes)
//! - [`config`] - Defaults and environment variable names
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
