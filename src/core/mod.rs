//! Core install logic
//!
//! # Submodules
//!
//! - [`options`] - Install options and command-line value parsing
//! - [`target`] - Output directory resolution
//! - [`env_scope`] - Environment seen by delegated commands
//! - [`install`] - Run orchestration

pub mod env_scope;
pub mod install;
pub mod options;
pub mod target;
