//! Install orchestration
//!
//! One run moves through: validate → provision workspace → resolve target →
//! link vendor → scope environment → install → follow-up commands →
//! teardown. The first failure stops the run. The workspace is removed on
//! every path; the caller's environment is never modified.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::cli::output;
use crate::config::defaults::INSTALL_SUBCOMMAND;
use crate::core::env_scope::ScopedEnv;
use crate::core::options::InstallOptions;
use crate::core::target::{absolutize, current_dir, resolve_target_dir};
use crate::error::{DelegateError, VendorInstallError};
use crate::infra::delegate::{in_workspace, Delegate, Invocation};
use crate::infra::linker::link_vendor;
use crate::infra::workspace::Workspace;

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Workspace used as GOPATH (already removed)
    pub workspace: PathBuf,
    /// Directory binaries were installed into
    pub target: PathBuf,
    /// Number of vendor entries linked
    pub linked: usize,
    /// Number of follow-up commands run
    pub commands_run: usize,
}

/// Install packages from a vendor directory in a temporary workspace
pub async fn install<D: Delegate>(
    options: &InstallOptions,
    delegate: &D,
) -> Result<InstallReport, VendorInstallError> {
    options.validate()?;

    let cwd = current_dir()?;
    let work_root = options.work_root.as_deref().map(|p| absolutize(p, &cwd));
    let workspace = Workspace::provision(work_root.as_deref())?;
    output::info(&format!("gopath: {}", workspace.root().display()));

    let outcome = run_in_workspace(&workspace, options, &cwd, delegate).await;

    match (outcome, workspace.teardown()) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(cleanup)) => Err(cleanup.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup)) => {
            tracing::warn!("{cleanup}");
            Err(e)
        }
    }
}

async fn run_in_workspace<D: Delegate>(
    workspace: &Workspace,
    options: &InstallOptions,
    cwd: &Path,
    delegate: &D,
) -> Result<InstallReport, VendorInstallError> {
    let target = resolve_target_dir(
        options.target.as_deref(),
        process_env,
        dirs::home_dir(),
        cwd,
    )?;
    output::info(&format!("gobin: {}", target.display()));

    let source = absolutize(&options.source, cwd);
    let linked = link_vendor(&workspace.src_dir(), &source)?;
    tracing::debug!("Linked {} entries from {}", linked.len(), source.display());

    let scope = scoped_env(workspace.root(), &target, options)?;
    for o in scope.overrides() {
        tracing::debug!("{}: {:?} -> {:?}", o.key, o.previous, o.value);
    }

    let args = std::iter::once(INSTALL_SUBCOMMAND.to_string())
        .chain(options.packages.iter().cloned())
        .collect();
    let primary = in_workspace(workspace.root(), &options.toolchain, args, &scope);
    run_step(delegate, &primary).await?;

    for command in &options.commands {
        let invocation = in_workspace(
            workspace.root(),
            &command.program,
            command.args.clone(),
            &scope,
        );
        run_step(delegate, &invocation).await?;
    }

    Ok(InstallReport {
        workspace: workspace.root().to_path_buf(),
        target,
        linked: linked.len(),
        commands_run: options.commands.len(),
    })
}

/// Scoped variables for the workspace plus the extra ones from options
fn scoped_env(
    workspace: &Path,
    target: &Path,
    options: &InstallOptions,
) -> Result<ScopedEnv, VendorInstallError> {
    let scope = options.extra_env.iter().fold(
        ScopedEnv::for_workspace(workspace, target, process_env)?,
        |scope, (key, value)| scope.with_override(key, value, process_env(key)),
    );
    Ok(scope)
}

async fn run_step<D: Delegate>(delegate: &D, invocation: &Invocation) -> Result<(), DelegateError> {
    let line = invocation.command_line();
    output::info(&line);

    let spinner = output::create_spinner(&line);
    let result = delegate.run(invocation).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let captured = result?;
    output::command_output(&captured);
    Ok(())
}

fn process_env(key: &str) -> Option<OsString> {
    std::env::var_os(key)
}
