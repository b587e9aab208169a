//! Driver configuration.

use std::path::PathBuf;
use std::time::Duration;
use wd_runtime::ShutdownPolicy;

/// Verbosity the driver binary is asked to log at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational logging.
    Info,
    /// Everything.
    #[default]
    Debug,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        };
        f.write_str(level)
    }
}

/// Where the driver process and the probe find each other, plus the knobs
/// handed to the driver binary.
///
/// Created with defaults by a flavor constructor, optionally adjusted, then
/// frozen in effect once the driver starts: the values read at start stay
/// in force until stop, whatever is assigned afterwards.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Port the driver listens on. `None` asks the OS for a free one at
    /// start; the allocated value is written back here and reused by later
    /// start/stop cycles of the same handle.
    pub port: Option<u16>,
    /// Interface the driver binds and the probe connects to.
    pub host: String,
    /// URL path prefix for all WebDriver REST requests.
    pub base_url: String,
    /// Worker-thread count hint for driver binaries that accept one.
    pub threads: u32,
    /// Driver-native log file; writability is checked before launch. An
    /// empty path disables the check (the switch is still passed).
    pub log_path: PathBuf,
    /// Capture file for the child's stdout/stderr; `None` forwards both to
    /// this process's console.
    pub log_file: Option<PathBuf>,
    /// Verbosity requested from the driver binary.
    pub log_level: LogLevel,
    /// How long start waits for the driver to open its port.
    pub start_timeout: Duration,
    /// How stop terminates the driver process.
    pub shutdown: ShutdownPolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            port: None,
            host: "127.0.0.1".to_string(),
            base_url: String::new(),
            threads: 4,
            log_path: PathBuf::from("webdriver.log"),
            log_file: None,
            log_level: LogLevel::default(),
            start_timeout: Duration::from_secs(20),
            shutdown: ShutdownPolicy::default(),
        }
    }
}

impl DriverConfig {
    /// Pins the listening port instead of auto-allocating one.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the host the driver binds and the probe targets.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the URL path prefix for WebDriver requests.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the worker-thread count hint.
    pub fn threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the driver-native log file path.
    pub fn log_path(mut self, log_path: impl Into<PathBuf>) -> Self {
        self.log_path = log_path.into();
        self
    }

    /// Captures the child's stdout/stderr into this file.
    pub fn log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = Some(log_file.into());
        self
    }

    /// Sets the verbosity requested from the driver binary.
    pub fn log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Sets how long start waits for the driver's port to open.
    pub fn start_timeout(mut self, start_timeout: Duration) -> Self {
        self.start_timeout = start_timeout;
        self
    }

    /// Sets the termination policy used by stop.
    pub fn shutdown(mut self, shutdown: ShutdownPolicy) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// The URL the session layer sends requests to, for a given effective
    /// port.
    pub(crate) fn endpoint(&self, port: u16) -> String {
        format!("http://{}:{}{}", self.host, port, self.base_url)
    }
}
