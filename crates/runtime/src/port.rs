//! Free-port lookup on the loopback interface.

use crate::error::{Error, Result};
use std::net::TcpListener;

/// Asks the OS for a TCP port that was free at the moment of the call.
///
/// Binds a listener on `127.0.0.1` port 0, reads back the assigned port and
/// releases the socket immediately. Nothing stops another process from
/// claiming the port between this call and the eventual bind by the driver
/// binary; callers keep that window short by spawning right away.
///
/// # Errors
///
/// Returns [`Error::PortAllocation`] if the bind or the local-address query
/// fails.
pub fn free_port() -> Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).map_err(Error::PortAllocation)?;
    let port = listener
        .local_addr()
        .map_err(Error::PortAllocation)?
        .port();
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_bindable_port() {
        let port = free_port().unwrap();
        assert!(port >= 1024, "got privileged port {port}");
        // The socket was released, so the port is bindable right away.
        TcpListener::bind(("127.0.0.1", port)).unwrap();
    }

    #[test]
    fn test_sequential_lookups_are_independent() {
        // Two lookups may or may not return the same number (the first
        // socket is closed before the second bind); both must be valid.
        let a = free_port().unwrap();
        let b = free_port().unwrap();
        assert!(a >= 1024);
        assert!(b >= 1024);
    }
}
