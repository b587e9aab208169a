// Copyright 2025 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// PhantomJsDriver - ghostdriver process lifecycle

//! PhantomJS flavor of the driver handle.

use std::path::PathBuf;
use std::sync::Arc;

use wd_protocol::Capabilities;
use wd_runtime::{Result, find_executable};

use crate::config::{DriverConfig, LogLevel};
use crate::service::DriverService;
use crate::session::{self, Session, SessionBackend};

/// Handle over one `phantomjs` process running in webdriver mode.
///
/// The handle owns the process for as long as it lives, but dropping it does
/// NOT stop the child; call [`stop`](Self::stop) when you are done with it.
///
/// # Example
///
/// ```ignore
/// let mut driver = PhantomJsDriver::find()?;
/// driver.start().await?;
/// let endpoint = driver.endpoint().unwrap().to_string();
/// // ... drive the browser through the endpoint ...
/// driver.stop().await?;
/// ```
pub struct PhantomJsDriver {
    /// Lifecycle knobs. Adjust before `start`; changes made while the
    /// process runs take effect on the next start.
    pub config: DriverConfig,
    program: PathBuf,
    service: DriverService,
}

impl PhantomJsDriver {
    /// Creates a handle for the `phantomjs` binary at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            config: default_config(),
            program: program.into(),
            service: DriverService::default(),
        }
    }

    /// Locates `phantomjs` via `PHANTOMJS_EXECUTABLE`, `PATH`, or the usual
    /// install directories.
    pub fn find() -> Result<Self> {
        let program = find_executable("phantomjs", "PHANTOMJS_EXECUTABLE", &[])?;
        Ok(Self::new(program))
    }

    /// Starts the process and waits for its webdriver port to accept
    /// connections.
    ///
    /// Allocates a port first if `config.port` is unset and records the
    /// chosen one back into the config, so restarts reuse it.
    pub async fn start(&mut self) -> Result<()> {
        self.service
            .start(&self.program, &mut self.config, phantomjs_args)
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

    /// Opens a new session against the running driver through `backend` and
    /// tags it with this driver's endpoint.
    pub async fn new_session(
        &self,
        backend: Arc<dyn SessionBackend>,
        desired: Capabilities,
        required: Capabilities,
    ) -> Result<Session> {
        let endpoint = self.service.require_endpoint()?;
        session::create_attached(endpoint, backend, desired, required).await
    }

    /// Lists the running driver's sessions through `backend`, each tagged
    /// with this driver's endpoint.
    pub async fn sessions(&self, backend: Arc<dyn SessionBackend>) -> Result<Vec<Session>> {
        let endpoint = self.service.require_endpoint()?;
        session::list_attached(endpoint, backend).await
    }
}

fn default_config() -> DriverConfig {
    DriverConfig::default()
        .log_path("phantomjsdriver.log")
        .log_file("phantomjs-output.log")
        .log_level(LogLevel::Debug)
}

fn phantomjs_args(config: &DriverConfig, port: u16) -> Vec<String> {
    // ghostdriver's switch spellings; reordering is safe, spelling is not.
    vec![
        format!("--webdriver={}:{}", config.host, port),
        format!("--webdriver-logfile={}", config.log_path.display()),
        format!("--webdriver-loglevel={}", config.log_level),
    ]
}
