//! Session objects and the seam to the external WebDriver session layer.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use wd_protocol::{Capabilities, SessionId, SessionSummary};
use wd_runtime::Result;

/// Type alias for the boxed futures [`SessionBackend`] methods return.
///
/// Keeps the trait dyn-compatible; async-fn-in-trait objects are not.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// The external WebDriver session layer.
///
/// Implementations speak the REST protocol against a driver endpoint. This
/// crate never issues protocol traffic itself; the driver handles route
/// calls through this trait and attach endpoint back-references to the
/// results.
pub trait SessionBackend: Send + Sync {
    /// Creates a session at `endpoint` from the desired/required capability
    /// pair, returning the identifier and capabilities the remote end
    /// negotiated.
    fn create_session<'a>(
        &'a self,
        endpoint: &'a str,
        desired: &'a Capabilities,
        required: &'a Capabilities,
    ) -> BackendFuture<'a, SessionSummary>;

    /// Lists the sessions the remote end at `endpoint` knows about.
    fn list_sessions<'a>(&'a self, endpoint: &'a str) -> BackendFuture<'a, Vec<SessionSummary>>;
}

/// Back-reference every session carries to the driver that produced it.
///
/// Cheap to clone; the session layer uses it to route protocol calls to the
/// right endpoint.
#[derive(Clone)]
pub struct RemoteEnd {
    endpoint: Arc<str>,
    backend: Arc<dyn SessionBackend>,
}

impl RemoteEnd {
    /// The driver endpoint this remote end routes to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The session layer behind this remote end.
    pub fn backend(&self) -> &Arc<dyn SessionBackend> {
        &self.backend
    }
}

impl std::fmt::Debug for RemoteEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteEnd")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// One WebDriver session, tagged with the driver endpoint it lives on.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    capabilities: Capabilities,
    remote: RemoteEnd,
}

impl Session {
    /// Identifier the remote end assigned.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Capabilities the remote end negotiated.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// The driver this session routes through.
    pub fn remote(&self) -> &RemoteEnd {
        &self.remote
    }
}

pub(crate) async fn create_attached(
    endpoint: &str,
    backend: Arc<dyn SessionBackend>,
    desired: Capabilities,
    required: Capabilities,
) -> Result<Session> {
    let summary = backend.create_session(endpoint, &desired, &required).await?;
    let remote = RemoteEnd {
        endpoint: Arc::from(endpoint),
        backend,
    };
    Ok(attach(summary, remote))
}

pub(crate) async fn list_attached(
    endpoint: &str,
    backend: Arc<dyn SessionBackend>,
) -> Result<Vec<Session>> {
    let summaries = backend.list_sessions(endpoint).await?;
    let remote = RemoteEnd {
        endpoint: Arc::from(endpoint),
        backend,
    };
    Ok(summaries
        .into_iter()
        .map(|summary| attach(summary, remote.clone()))
        .collect())
}

fn attach(summary: SessionSummary, remote: RemoteEnd) -> Session {
    Session {
        id: summary.id,
        capabilities: summary.capabilities,
        remote,
    }
}
