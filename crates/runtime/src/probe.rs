//! TCP readiness probing.

use crate::error::{Error, Result};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::Instant;

/// Delay between connection attempts.
///
/// Constant and short: typical driver startup is sub-second to a few
/// seconds, and a fixed 50ms poll detects that promptly without
/// busy-looping.
pub const PROBE_INTERVAL: Duration = Duration::from_millis(50);

/// Waits until `127.0.0.1:<port>` accepts a TCP connection.
///
/// Attempts a connect immediately, then retries every [`PROBE_INTERVAL`]
/// (no backoff) until one succeeds or `timeout` has elapsed. Each attempt
/// is itself bounded by the time remaining, so the call returns no earlier
/// than the deadline and no later than roughly one interval past it.
///
/// # Errors
///
/// Returns [`Error::StartupTimeout`] once the deadline passes without a
/// successful connection.
pub async fn wait_until_reachable(port: u16, timeout: Duration) -> Result<()> {
    let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port));
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(Error::StartupTimeout { port, timeout });
        }

        match tokio::time::timeout(remaining, TcpStream::connect(addr)).await {
            Ok(Ok(_stream)) => return Ok(()),
            Ok(Err(_)) | Err(_) => {}
        }

        if Instant::now() + PROBE_INTERVAL >= deadline {
            // Sleeping a full interval would only push the error past the
            // deadline for nothing.
            tokio::time::sleep_until(deadline).await;
            return Err(Error::StartupTimeout { port, timeout });
        }
        tokio::time::sleep(PROBE_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[tokio::test]
    async fn detects_listening_server_within_one_interval() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();

        let started = Instant::now();
        wait_until_reachable(port, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(started.elapsed() < PROBE_INTERVAL);
    }

    #[tokio::test]
    async fn times_out_between_deadline_and_one_interval_past_it() {
        // Bind then drop, so the port is almost certainly unoccupied.
        let port = {
            let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
            listener.local_addr().unwrap().port()
        };

        let timeout = Duration::from_millis(200);
        let started = Instant::now();
        let err = wait_until_reachable(port, timeout).await.unwrap_err();
        let elapsed = started.elapsed();

        assert!(err.is_timeout(), "expected a timeout, got {err:?}");
        assert!(elapsed >= timeout, "returned early: {elapsed:?}");
        assert!(
            elapsed <= timeout + PROBE_INTERVAL + Duration::from_millis(50),
            "returned late: {elapsed:?}"
        );

        match err {
            Error::StartupTimeout { port: p, timeout: t } => {
                assert_eq!(p, port);
                assert_eq!(t, timeout);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn zero_timeout_fails_immediately() {
        let port = {
            let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = wait_until_reachable(port, Duration::ZERO).await.unwrap_err();
        assert!(err.is_timeout());
    }
}
