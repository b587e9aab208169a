//! chromedriver flavor of the driver handle.

use std::path::PathBuf;
use std::sync::Arc;

use wd_protocol::Capabilities;
use wd_runtime::{Result, find_executable};

use crate::config::{DriverConfig, LogLevel};
use crate::service::DriverService;
use crate::session::{self, Session, SessionBackend};

/// Handle over one `chromedriver` process.
///
/// Same lifecycle as [`PhantomJsDriver`](crate::PhantomJsDriver), different
/// argument vector. chromedriver is the one flavor that consumes the
/// `threads` hint.
pub struct ChromeDriver {
    /// Lifecycle knobs. Adjust before `start`.
    pub config: DriverConfig,
    program: PathBuf,
    service: DriverService,
}

impl ChromeDriver {
    /// Creates a handle for the `chromedriver` binary at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            config: default_config(),
            program: program.into(),
            service: DriverService::default(),
        }
    }

    /// Locates `chromedriver` via `CHROMEDRIVER_EXECUTABLE`, `PATH`, or the
    /// usual install directories.
    pub fn find() -> Result<Self> {
        let program = find_executable("chromedriver", "CHROMEDRIVER_EXECUTABLE", &[])?;
        Ok(Self::new(program))
    }

    /// Starts the process and waits for its port to accept connections.
    pub async fn start(&mut self) -> Result<()> {
        self.service
            .start(&self.program, &mut self.config, chrome_args)
            .await
    }

    /// Signals the process to shut down per `config.shutdown`.
    pub async fn stop(&mut self) -> Result<()> {
        self.service.stop(&self.config).await
    }

    /// The `http://host:port/base-url` this driver serves, while running.
    pub fn endpoint(&self) -> Option<&str> {
        self.service.endpoint()
    }

    /// Whether a child process is currently associated with this handle.
    pub fn is_running(&self) -> bool {
        self.service.is_running()
    }

    /// Opens a new session against the running driver through `backend`.
    pub async fn new_session(
        &self,
        backend: Arc<dyn SessionBackend>,
        desired: Capabilities,
        required: Capabilities,
    ) -> Result<Session> {
        let endpoint = self.service.require_endpoint()?;
        session::create_attached(endpoint, backend, desired, required).await
    }

    /// Lists the running driver's sessions through `backend`.
    pub async fn sessions(&self, backend: Arc<dyn SessionBackend>) -> Result<Vec<Session>> {
        let endpoint = self.service.require_endpoint()?;
        session::list_attached(endpoint, backend).await
    }
}

fn default_config() -> DriverConfig {
    DriverConfig::default().log_path("chromedriver.log")
}

fn chrome_args(config: &DriverConfig, port: u16) -> Vec<String> {
    let mut args = vec![
        format!("--port={port}"),
        format!("--log-path={}", config.log_path.display()),
        format!("--http-threads={}", config.threads),
    ];
    if !config.base_url.is_empty() {
        args.push(format!("--url-base={}", config.base_url));
    }
    if config.log_level == LogLevel::Debug {
        args.push("--verbose".to_string());
    }
    args
}
