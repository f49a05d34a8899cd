//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem, the temporary workspace, and
//! external processes.

pub mod delegate;
pub mod filesystem;
pub mod linker;
pub mod workspace;
