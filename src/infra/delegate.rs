//! Delegated command execution
//!
//! Runs external programs (the toolchain install and follow-up commands)
//! inside the workspace with the scoped environment injected, capturing
//! stdout and stderr as one combined stream. On unix both streams share a
//! single pipe, so the captured bytes keep the order they were written in.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::defaults::KILL_DRAIN_GRACE;
use crate::config::env::PATH;
use crate::core::env_scope::ScopedEnv;
use crate::error::DelegateError;

/// A program to run, where, and with which extra environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path
    pub program: String,
    /// Arguments, passed verbatim
    pub args: Vec<String>,
    /// Working directory
    pub dir: PathBuf,
    /// Variables set on top of the inherited environment
    pub env: Vec<(String, OsString)>,
}

impl Invocation {
    /// Create an invocation with no extra environment
    pub fn new(program: impl Into<String>, args: Vec<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            dir: dir.into(),
            env: Vec::new(),
        }
    }

    /// Inject a scoped environment
    #[must_use]
    pub fn with_env(mut self, scope: &ScopedEnv) -> Self {
        self.env = scope.vars();
        self
    }

    /// Value of an injected variable
    pub fn env_var(&self, key: &str) -> Option<&OsString> {
        self.env.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Program and arguments joined by spaces, for display
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs invocations to completion
///
/// Implementations return the combined output on success. Failures carry
/// the output captured so far where there is any.
#[allow(async_fn_in_trait)]
pub trait Delegate {
    /// Run one invocation and wait for it
    async fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, DelegateError>;
}

/// Delegate that spawns real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessDelegate {
    timeout: Option<Duration>,
}

impl ProcessDelegate {
    /// Create a delegate with no timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill commands that run longer than `timeout`
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Locate the program using the search path the child will see
    fn resolve_program(invocation: &Invocation) -> Result<PathBuf, DelegateError> {
        let search_path = invocation
            .env_var(PATH)
            .cloned()
            .or_else(|| std::env::var_os(PATH));

        which::which_in(&invocation.program, search_path, &invocation.dir).map_err(|_| {
            DelegateError::NotFound {
                program: invocation.program.clone(),
            }
        })
    }
}

impl Delegate for ProcessDelegate {
    async fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, DelegateError> {
        let command = invocation.command_line();
        let program = Self::resolve_program(invocation)?;
        tracing::debug!("Running {} in {}", program.display(), invocation.dir.display());

        let spawn_err = |e: std::io::Error| DelegateError::Spawn {
            program: invocation.program.clone(),
            error: e.to_string(),
        };

        #[cfg(unix)]
        let (reader, stdout, stderr) = combined_pipe().map_err(spawn_err)?;
        #[cfg(not(unix))]
        let (stdout, stderr) = (Stdio::piped(), Stdio::piped());

        let mut child = Command::new(&program)
            .args(&invocation.args)
            .current_dir(&invocation.dir)
            .envs(invocation.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_err)?;

        let sink = Arc::new(Mutex::new(Vec::new()));
        #[cfg(unix)]
        let pumps = vec![pump(Some(reader), Arc::clone(&sink))];
        #[cfg(not(unix))]
        let pumps = vec![
            pump(child.stdout.take(), Arc::clone(&sink)),
            pump(child.stderr.take(), Arc::clone(&sink)),
        ];

        let io_err = |e: std::io::Error| DelegateError::Io {
            command: command.clone(),
            error: e.to_string(),
        };

        let status = match self.timeout {
            Some(limit) => {
                let waited = tokio::time::timeout(limit, child.wait()).await;
                match waited {
                    Ok(status) => Some(status.map_err(io_err)?),
                    Err(_) => {
                        tracing::warn!("'{command}' exceeded {limit:?}, killing it");
                        child.kill().await.map_err(io_err)?;
                        None
                    }
                }
            }
            None => Some(child.wait().await.map_err(io_err)?),
        };

        // A killed command's descendants may keep the pipe open indefinitely
        let deadline = status.is_none().then(|| Instant::now() + KILL_DRAIN_GRACE);
        drain(pumps, deadline).await.map_err(io_err)?;
        let output = std::mem::take(&mut *sink.lock().unwrap_or_else(PoisonError::into_inner));

        match status {
            Some(status) if status.success() => Ok(output),
            Some(status) => Err(DelegateError::Failed {
                command,
                status: status.to_string(),
                output,
            }),
            None => Err(DelegateError::TimedOut {
                command,
                timeout: self.timeout.unwrap_or_default(),
                output,
            }),
        }
    }
}

/// One pipe for both stdout and stderr of a child
///
/// Returns the read end and two `Stdio` handles on the write end. The
/// handles must be dropped after spawning so the reader sees EOF.
#[cfg(unix)]
fn combined_pipe() -> std::io::Result<(tokio::net::unix::pipe::Receiver, Stdio, Stdio)> {
    let (sender, receiver) = tokio::net::unix::pipe::pipe()?;
    let write = sender.into_blocking_fd()?;
    let write_err = write.try_clone()?;
    Ok((receiver, Stdio::from(write), Stdio::from(write_err)))
}

/// Wait for the pumps to reach EOF
///
/// With a deadline, pumps still running when it passes are aborted and the
/// output collected so far is kept.
async fn drain(
    pumps: Vec<JoinHandle<std::io::Result<()>>>,
    deadline: Option<Instant>,
) -> std::io::Result<()> {
    for mut handle in pumps {
        let joined = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    tracing::debug!("Output still open after kill, abandoning it");
                    handle.abort();
                    continue;
                }
            },
            None => handle.await,
        };
        joined.map_err(std::io::Error::other)??;
    }
    Ok(())
}

/// Copy a child stream into the shared sink until EOF
fn pump<R>(stream: Option<R>, sink: Arc<Mutex<Vec<u8>>>) -> JoinHandle<std::io::Result<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let Some(mut stream) = stream else {
            return Ok(());
        };
        let mut buf = [0u8; 8192];
        loop {
            let n = stream.read(&mut buf).await?;
            if n == 0 {
                return Ok(());
            }
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(&buf[..n]);
        }
    })
}

/// Invocation running in a workspace root with its scoped environment
pub fn in_workspace(
    root: &Path,
    program: impl Into<String>,
    args: Vec<String>,
    scope: &ScopedEnv,
) -> Invocation {
    Invocation::new(program, args, root).with_env(scope)
}
