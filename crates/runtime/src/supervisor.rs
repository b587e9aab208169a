//! Driver process supervision
//!
//! Spawns the WebDriver server binary, drains its output streams into a
//! configured sink, and signals it to terminate on stop.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Where the child's stdout and stderr bytes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamSink {
    /// Both streams into one file, created (and truncated) at start.
    File(PathBuf),
    /// Stdout to this process's stdout, stderr to its stderr.
    Console,
}

/// Everything needed to launch one driver process.
#[derive(Debug, Clone)]
pub struct SpawnSpec {
    /// Binary to execute.
    pub program: PathBuf,
    /// Argument vector, handed to the binary as-is.
    pub args: Vec<String>,
    /// Driver-native log file whose writability is verified before spawning.
    pub native_log_path: Option<PathBuf>,
    /// Sink for the child's stdout/stderr.
    pub output: StreamSink,
}

/// How stop terminates the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownPolicy {
    /// Send the graceful signal and return without waiting for exit.
    #[default]
    Signal,
    /// Send the graceful signal, wait up to `grace` for exit, then kill.
    SignalThenKill {
        /// How long to wait before escalating.
        grace: Duration,
    },
}

/// Owns at most one driver process and its capture file.
///
/// Start and stop are not designed for concurrent invocation; the `&mut
/// self` receivers make one caller at a time a structural requirement
/// rather than a convention.
#[derive(Debug, Default)]
pub struct ProcessSupervisor {
    child: Option<Child>,
    capture: Option<std::fs::File>,
}

impl ProcessSupervisor {
    /// Creates a supervisor with no process attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a child process is supervised.
    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// Launches the driver process described by `spec`.
    ///
    /// Log-path writability is verified and the capture sink is opened
    /// before the spawn, so path problems fail fast instead of leaving a
    /// child behind. Returns once the process is running; readiness is the
    /// caller's separate step (see [`wait_until_reachable`](crate::probe::wait_until_reachable)).
    ///
    /// For each output stream one detached drain task copies bytes into the
    /// sink until the child closes the stream. Drain I/O errors are logged
    /// and never propagated; the subprocess's lifetime does not depend on
    /// logging success.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyRunning`] if a child is already supervised,
    /// [`Error::LogPath`] for an unwritable log or capture path,
    /// [`Error::Spawn`] if the OS rejects the launch and
    /// [`Error::StreamAttach`] if a stdio pipe is missing.
    pub async fn start(&mut self, spec: SpawnSpec) -> Result<()> {
        if self.child.is_some() {
            return Err(Error::AlreadyRunning);
        }

        if let Some(path) = &spec.native_log_path {
            check_writable(path)?;
        }

        let (capture, sinks) = match &spec.output {
            StreamSink::File(path) => {
                let file = open_capture_file(path)?;
                let out = drain_writer(&file, path)?;
                let err = drain_writer(&file, path)?;
                (Some(file), Some((out, err)))
            }
            StreamSink::Console => (None, None),
        };

        debug!(program = %spec.program.display(), args = ?spec.args, "spawning driver process");
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(Error::Spawn)?;

        let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
            (Some(out), Some(err)) => (out, err),
            (None, _) => {
                let _ = child.start_kill();
                return Err(Error::StreamAttach { stream: "stdout" });
            }
            (_, None) => {
                let _ = child.start_kill();
                return Err(Error::StreamAttach { stream: "stderr" });
            }
        };

        match sinks {
            Some((out_sink, err_sink)) => {
                spawn_drain("stdout", stdout, out_sink);
                spawn_drain("stderr", stderr, err_sink);
            }
            None => {
                spawn_drain("stdout", stdout, Box::new(tokio::io::stdout()));
                spawn_drain("stderr", stderr, Box::new(tokio::io::stderr()));
            }
        }

        self.child = Some(child);
        self.capture = capture;
        Ok(())
    }

    /// Signals the supervised process to terminate.
    ///
    /// The association is cleared unconditionally, so a later
    /// [`start`](Self::start) works no matter what this call returns. Under
    /// [`ShutdownPolicy::Signal`] the call does not wait for the child to
    /// exit; the runtime reaps it in the background once it does. The
    /// capture file is released either way, which is what ends any drain
    /// still holding bytes for it.
    ///
    /// # Errors
    ///
    /// [`Error::NotRunning`] without a supervised child,
    /// [`Error::ProcessState`] if the child has no live pid and
    /// [`Error::Signal`] if the signal cannot be delivered.
    pub async fn stop(&mut self, policy: ShutdownPolicy) -> Result<()> {
        // Take both handles first: the association must not survive a
        // failure below.
        let child = self.child.take();
        drop(self.capture.take());

        let mut child = child.ok_or(Error::NotRunning)?;
        let Some(pid) = child.id() else {
            return Err(Error::ProcessState);
        };

        debug!(pid, ?policy, "stopping driver process");
        send_interrupt(&mut child, pid)?;

        if let ShutdownPolicy::SignalThenKill { grace } = policy {
            match tokio::time::timeout(grace, child.wait()).await {
                Ok(Ok(status)) => debug!(pid, %status, "driver process exited"),
                Ok(Err(err)) => return Err(Error::Signal(err)),
                Err(_) => {
                    warn!(pid, ?grace, "driver ignored the signal, killing");
                    child.kill().await.map_err(Error::Signal)?;
                }
            }
        }

        Ok(())
    }
}

fn check_writable(path: &Path) -> Result<()> {
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map(drop)
        .map_err(|source| Error::LogPath {
            path: path.to_path_buf(),
            source,
        })
}

fn open_capture_file(path: &Path) -> Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| Error::LogPath {
            path: path.to_path_buf(),
            source,
        })
}

/// Clones the capture handle for one drain task. Both drains share the fd's
/// file offset, same as two writers appending to one open file.
fn drain_writer(file: &std::fs::File, path: &Path) -> Result<Box<dyn AsyncWrite + Send + Unpin>> {
    let clone = file.try_clone().map_err(|source| Error::LogPath {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(tokio::fs::File::from_std(clone)))
}

fn spawn_drain<R>(stream: &'static str, mut from: R, mut to: Box<dyn AsyncWrite + Send + Unpin>)
where
    R: AsyncRead + Send + Unpin + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = tokio::io::copy(&mut from, &mut to).await {
            warn!(stream, error = %err, "driver output drain stopped");
        }
    });
}

#[cfg(unix)]
fn send_interrupt(_child: &mut Child, pid: u32) -> Result<()> {
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    match signal::kill(Pid::from_raw(pid as i32), Signal::SIGINT) {
        // ESRCH means the process is already gone, which is what stop wants.
        Ok(()) | Err(nix::errno::Errno::ESRCH) => Ok(()),
        Err(errno) => Err(Error::Signal(std::io::Error::other(errno))),
    }
}

#[cfg(not(unix))]
fn send_interrupt(child: &mut Child, _pid: u32) -> Result<()> {
    // No interrupt for arbitrary processes on windows; terminate instead.
    child.start_kill().map_err(Error::Signal)
}
