//! Shared start/stop orchestration behind every driver flavor.

use std::path::Path;

use tracing::{debug, warn};
use wd_runtime::{
    Error, ProcessSupervisor, Result, SpawnSpec, StreamSink, free_port, wait_until_reachable,
};

use crate::config::DriverConfig;

/// One driver process plus the endpoint computed for it.
///
/// This is the state machine the flavors share: idle until start succeeds,
/// running (endpoint observable) until stop. Start and stop take `&mut
/// self`, so one caller at a time is a structural requirement, not a
/// convention.
#[derive(Debug, Default)]
pub(crate) struct DriverService {
    supervisor: ProcessSupervisor,
    endpoint: Option<String>,
}

impl DriverService {
    /// The URL the running driver serves, while it is running.
    pub(crate) fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// The endpoint, or [`Error::NotRunning`] when the driver is stopped.
    pub(crate) fn require_endpoint(&self) -> Result<&str> {
        self.endpoint().ok_or(Error::NotRunning)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.supervisor.is_running()
    }

    /// Allocates the port if needed, spawns the driver and waits for its
    /// port to open.
    pub(crate) async fn start(
        &mut self,
        program: &Path,
        config: &mut DriverConfig,
        build_args: impl FnOnce(&DriverConfig, u16) -> Vec<String>,
    ) -> Result<()> {
        // Reject before touching the config, so a double start cannot
        // allocate a port it then abandons.
        if self.supervisor.is_running() {
            return Err(Error::AlreadyRunning);
        }

        let port = match config.port {
            Some(port) => port,
            None => {
                let port = free_port()?;
                config.port = Some(port);
                port
            }
        };

        let endpoint = config.endpoint(port);
        let args = build_args(config, port);
        let native_log_path =
            (!config.log_path.as_os_str().is_empty()).then(|| config.log_path.clone());
        let output = match &config.log_file {
            Some(path) => StreamSink::File(path.clone()),
            None => StreamSink::Console,
        };

        debug!(%endpoint, "starting driver");
        self.supervisor
            .start(SpawnSpec {
                program: program.to_path_buf(),
                args,
                native_log_path,
                output,
            })
            .await?;

        if let Err(err) = wait_until_reachable(port, config.start_timeout).await {
            // Don't leave the child orphaned. The timeout stays the error
            // the caller sees either way.
            if let Err(stop_err) = self.supervisor.stop(config.shutdown).await {
                warn!(error = %stop_err, "cleanup after failed readiness wait");
            }
            return Err(err);
        }

        self.endpoint = Some(endpoint);
        Ok(())
    }

    /// Signals the driver to terminate and invalidates the endpoint.
    pub(crate) async fn stop(&mut self, config: &DriverConfig) -> Result<()> {
        self.endpoint = None;
        self.supervisor.stop(config.shutdown).await
    }
}
