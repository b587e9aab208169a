#![cfg(unix)]

//! Full lifecycle tests against a stand-in driver binary.
//!
//! The stand-in is a shell script that prints one line and idles. A
//! listener held by the test plays the webdriver port the real binary
//! would open, so readiness probing behaves as it does in production.

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use wd::{
    BackendFuture, Capabilities, DriverConfig, Error, PhantomJsDriver, SessionBackend, SessionId,
    SessionSummary, ShutdownPolicy,
};

fn write_fake_driver(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-driver.sh");
    std::fs::write(
        &path,
        "#!/bin/sh\necho fake driver booting\nwhile :; do sleep 1; done\n",
    )
    .unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn driver_in(dir: &TempDir) -> (PhantomJsDriver, TcpListener) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let mut driver = PhantomJsDriver::new(write_fake_driver(dir.path()));
    driver.config = DriverConfig::default()
        .port(port)
        .log_path(dir.path().join("driver.log"))
        .log_file(dir.path().join("driver-output.log"))
        .start_timeout(Duration::from_secs(5))
        .shutdown(ShutdownPolicy::SignalThenKill {
            grace: Duration::from_secs(5),
        });
    (driver, listener)
}

#[tokio::test]
async fn start_stop_restart_cycle() {
    let dir = TempDir::new().unwrap();
    let (mut driver, _listener) = driver_in(&dir);
    let port = driver.config.port.unwrap();

    driver.start().await.unwrap();
    assert!(driver.is_running());
    assert_eq!(
        driver.endpoint(),
        Some(format!("http://127.0.0.1:{port}").as_str())
    );

    // The drain tasks race this read; give them a moment.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let captured = std::fs::read_to_string(dir.path().join("driver-output.log")).unwrap();
    assert!(captured.contains("fake driver booting"), "got: {captured:?}");

    driver.stop().await.unwrap();
    assert!(!driver.is_running());
    assert_eq!(driver.endpoint(), None);

    // The allocated port sticks, so a restart serves the same endpoint.
    driver.start().await.unwrap();
    assert!(driver.is_running());
    assert_eq!(driver.config.port, Some(port));
    driver.stop().await.unwrap();
}

#[tokio::test]
async fn double_start_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (mut driver, _listener) = driver_in(&dir);

    driver.start().await.unwrap();
    let err = driver.start().await.unwrap_err();
    assert!(matches!(err, Error::AlreadyRunning));
    assert!(driver.is_running());

    driver.stop().await.unwrap();
}

#[tokio::test]
async fn stop_before_start_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (mut driver, _listener) = driver_in(&dir);

    let err = driver.stop().await.unwrap_err();
    assert!(matches!(err, Error::NotRunning));
}

#[tokio::test]
async fn unwritable_log_path_prevents_the_spawn() {
    let dir = TempDir::new().unwrap();
    let (mut driver, _listener) = driver_in(&dir);
    driver.config.log_path = dir.path().join("no-such-dir").join("driver.log");

    let err = driver.start().await.unwrap_err();
    assert!(matches!(err, Error::LogPath { .. }));
    assert!(!driver.is_running());

    // Fixing the path makes the same handle startable.
    driver.config.log_path = dir.path().join("driver.log");
    driver.start().await.unwrap();
    driver.stop().await.unwrap();
}

#[tokio::test]
async fn startup_timeout_leaves_a_restartable_handle() {
    let dir = TempDir::new().unwrap();
    let (mut driver, listener) = driver_in(&dir);
    let port = driver.config.port.unwrap();
    driver.config.start_timeout = Duration::from_millis(200);
    // Nothing listens on the chosen port now.
    drop(listener);

    let started = Instant::now();
    let err = driver.start().await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(err.is_timeout(), "got: {err}");
    assert!(
        elapsed >= Duration::from_millis(200),
        "gave up after {elapsed:?}"
    );
    assert!(
        elapsed < Duration::from_millis(500),
        "gave up after {elapsed:?}"
    );
    assert!(!driver.is_running());
    assert_eq!(driver.endpoint(), None);

    // The failed start tore the child down, so the handle can go again.
    let _listener = TcpListener::bind(("127.0.0.1", port)).unwrap();
    driver.config.start_timeout = Duration::from_secs(5);
    driver.start().await.unwrap();
    driver.stop().await.unwrap();
}

#[tokio::test]
async fn auto_allocated_port_is_written_back_and_reused() {
    let dir = TempDir::new().unwrap();
    let mut driver = PhantomJsDriver::new(write_fake_driver(dir.path()));
    driver.config = DriverConfig::default()
        .log_path(dir.path().join("driver.log"))
        .log_file(dir.path().join("driver-output.log"))
        .start_timeout(Duration::from_millis(200))
        .shutdown(ShutdownPolicy::SignalThenKill {
            grace: Duration::from_secs(5),
        });
    assert_eq!(driver.config.port, None);

    // The stand-in never listens, so this start can only time out; the
    // allocated port still sticks in the config.
    let err = driver.start().await.unwrap_err();
    assert!(err.is_timeout(), "got: {err}");
    let port = driver.config.port.expect("allocated port written back");

    // A listener on the recorded port makes the next start succeed.
    let _listener = TcpListener::bind(("127.0.0.1", port)).unwrap();
    driver.config.start_timeout = Duration::from_secs(5);
    driver.start().await.unwrap();
    assert_eq!(
        driver.endpoint(),
        Some(format!("http://127.0.0.1:{port}").as_str())
    );
    driver.stop().await.unwrap();
}

struct StaticBackend;

impl SessionBackend for StaticBackend {
    fn create_session<'a>(
        &'a self,
        _endpoint: &'a str,
        desired: &'a Capabilities,
        _required: &'a Capabilities,
    ) -> BackendFuture<'a, SessionSummary> {
        let capabilities = desired.clone();
        Box::pin(async move {
            Ok(SessionSummary {
                id: SessionId::new("from-backend"),
                capabilities,
            })
        })
    }

    fn list_sessions<'a>(&'a self, _endpoint: &'a str) -> BackendFuture<'a, Vec<SessionSummary>> {
        Box::pin(async {
            Ok(vec![SessionSummary {
                id: SessionId::new("listed"),
                capabilities: Capabilities::new(),
            }])
        })
    }
}

#[tokio::test]
async fn sessions_require_a_running_driver() {
    let dir = TempDir::new().unwrap();
    let (driver, _listener) = driver_in(&dir);
    let backend: Arc<dyn SessionBackend> = Arc::new(StaticBackend);

    let err = driver.sessions(backend.clone()).await.unwrap_err();
    assert!(matches!(err, Error::NotRunning));

    let err = driver
        .new_session(backend, Capabilities::new(), Capabilities::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotRunning));
}

#[tokio::test]
async fn sessions_carry_the_drivers_endpoint() {
    let dir = TempDir::new().unwrap();
    let (mut driver, _listener) = driver_in(&dir);
    let backend: Arc<dyn SessionBackend> = Arc::new(StaticBackend);

    driver.start().await.unwrap();
    let endpoint = driver.endpoint().unwrap().to_string();

    let session = driver
        .new_session(
            backend.clone(),
            Capabilities::new().set("browserName", "phantomjs"),
            Capabilities::new(),
        )
        .await
        .unwrap();
    assert_eq!(session.id().as_str(), "from-backend");
    assert_eq!(session.remote().endpoint(), endpoint);

    let sessions = driver.sessions(backend).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id().as_str(), "listed");
    assert_eq!(sessions[0].remote().endpoint(), endpoint);

    driver.stop().await.unwrap();
}
