//! Error types for the driver runtime.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while managing a driver process.
#[derive(Debug, Error)]
pub enum Error {
    /// Start was called while a process is already supervised.
    #[error("driver already running")]
    AlreadyRunning,

    /// Stop was called with no process supervised.
    #[error("driver not running")]
    NotRunning,

    /// The supervised entry has no live OS process behind it.
    #[error("no live process behind the supervised handle")]
    ProcessState,

    /// A configured log path cannot be written.
    #[error("log path '{}' is not writable: {source}", .path.display())]
    LogPath {
        /// Path that failed the writability check.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The OS could not provide a free loopback port.
    #[error("free port lookup failed: {0}")]
    PortAllocation(#[source] std::io::Error),

    /// The process did not open its port within the deadline.
    #[error("port {port} not reachable within {timeout:?}")]
    StartupTimeout {
        /// Port the probe was connecting to.
        port: u16,
        /// Deadline that elapsed.
        timeout: Duration,
    },

    /// The OS failed to create the subprocess.
    #[error("failed to spawn driver process: {0}")]
    Spawn(#[source] std::io::Error),

    /// A stdout/stderr handle could not be obtained from the child.
    #[error("failed to attach to child {stream}")]
    StreamAttach {
        /// Which stream was missing ("stdout" or "stderr").
        stream: &'static str,
    },

    /// Delivering the termination signal failed.
    #[error("failed to signal driver process: {0}")]
    Signal(#[source] std::io::Error),

    /// The driver binary could not be located.
    #[error("executable '{name}' not found on this machine")]
    ExecutableNotFound {
        /// Binary name that was searched for.
        name: String,
    },

    /// The session collaborator reported a failure.
    #[error("session layer error: {0}")]
    Session(String),
}

impl Error {
    /// Returns true if this is a startup-deadline error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::StartupTimeout { .. })
    }

    /// Returns true for errors that indicate lifecycle-state misuse rather
    /// than an environment failure.
    pub fn is_state(&self) -> bool {
        matches!(
            self,
            Error::AlreadyRunning | Error::NotRunning | Error::ProcessState
        )
    }
}
