//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests: a project
//! directory with a vendor tree, a fake toolchain that reports what it saw,
//! and a helper to run the vendorinstall binary.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use assert_fs::prelude::*;
use assert_fs::TempDir;

/// Search path handed to the binary, enough for the fake scripts
pub const TEST_PATH: &str = "/usr/bin:/bin";

/// Fake `go` that appends what it observed to `$VENDORINSTALL_TEST_REPORT`
const FAKE_GO: &str = r#"#!/bin/sh
{
  echo "args=$*"
  echo "gopath=$GOPATH"
  echo "gobin=$GOBIN"
  echo "path=$PATH"
  echo "pwd=$(pwd -P)"
  for entry in "$GOPATH"/src/*; do
    [ -e "$entry" ] || [ -L "$entry" ] || continue
    echo "link=$(basename "$entry") $(readlink "$entry")"
  done
} >> "$VENDORINSTALL_TEST_REPORT"
echo "fake go ran"
echo "fake go warning" >&2
exit "${FAKE_GO_EXIT:-0}"
"#;

/// Test project context
///
/// Holds a project directory with a vendor tree, an output directory, a
/// parent directory for workspaces and a directory for fake tools.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a project whose vendor directory holds the given entries
    pub fn with_vendor(entries: &[&str]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        dir.child("vendor")
            .create_dir_all()
            .expect("Failed to create vendor directory");
        for entry in entries {
            let package = dir.child("vendor").child(entry);
            package
                .create_dir_all()
                .expect("Failed to create vendor entry");
            package
                .child("main.go")
                .write_str("package main\n")
                .expect("Failed to write vendor entry");
        }
        for sub in ["out", "work", "tools"] {
            dir.child(sub).create_dir_all().expect("Failed to create directory");
        }

        let project = Self { dir };
        project.write_script("tools/go", FAKE_GO);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Vendor directory
    pub fn vendor(&self) -> PathBuf {
        self.path().join("vendor")
    }

    /// Output directory passed as `--target`
    pub fn target(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Parent directory for temporary workspaces
    pub fn work_root(&self) -> PathBuf {
        self.path().join("work")
    }

    /// Fake toolchain binary
    pub fn fake_go(&self) -> PathBuf {
        self.path().join("tools/go")
    }

    /// File the fake toolchain reports into
    pub fn report_path(&self) -> PathBuf {
        self.path().join("report.txt")
    }

    /// Number of workspaces left behind in the work root
    pub fn leftover_workspaces(&self) -> usize {
        std::fs::read_dir(self.work_root())
            .expect("Failed to read work root")
            .count()
    }

    /// Write an executable shell script relative to the project
    pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, body).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        path
    }

    /// Values the fake toolchain reported for `key`, one per line
    pub fn reported(&self, key: &str) -> Vec<String> {
        let Ok(report) = std::fs::read_to_string(self.report_path()) else {
            return Vec::new();
        };
        let prefix = format!("{key}=");
        report
            .lines()
            .filter_map(|line| line.strip_prefix(&prefix))
            .map(str::to_string)
            .collect()
    }

    /// Single reported value for `key`
    pub fn reported_one(&self, key: &str) -> String {
        let values = self.reported(key);
        assert_eq!(values.len(), 1, "expected one '{key}' in report, got {values:?}");
        values[0].clone()
    }

    /// Base command: project as working directory, fake toolchain, fixed PATH
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vendorinstall"));
        cmd.current_dir(self.path())
            .env("PATH", TEST_PATH)
            .env("VENDORINSTALL_TEST_REPORT", self.report_path())
            .env("VENDORINSTALL_GO", self.fake_go())
            .env("VENDORINSTALL_TMPDIR", self.work_root())
            .env_remove("GOBIN")
            .env_remove("GOPATH")
            .env_remove("VENDORINSTALL_SOURCE")
            .env_remove("VENDORINSTALL_TIMEOUT")
            .env_remove("FAKE_GO_EXIT")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run the binary with `--target` pointing at the project output directory
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = self.command();
        cmd.arg("--target").arg(self.target());
        cmd.args(args);
        cmd.output().expect("Failed to execute vendorinstall")
    }
}

/// Resolve symlinks in a path for comparisons with `pwd -P`
pub fn real(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).expect("Failed to canonicalize path")
}
