//! In-memory reference implementation of the users REST API.
//!
//! Serves `/api/users` CRUD endpoints and `/actuator/health` with the
//! status codes the CRUD exerciser expects, so the exerciser can be run
//! end-to-end without an external service.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod store;

pub use config::StubConfig;
pub use error::StoreError;
pub use router::Router;
pub use server::Server;
pub use store::UserStore;

/// A reference server running in a background task.
///
/// The task is aborted when the handle is dropped.
pub struct StubHandle {
    addr: SocketAddr,
    store: Arc<UserStore>,
    task: JoinHandle<()>,
}

impl StubHandle {
    /// `http://host:port` of the running server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The store backing the server.
    pub fn store(&self) -> &Arc<UserStore> {
        &self.store
    }
}

impl Drop for StubHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Binds `addr` (port 0 picks a free port) and serves in a background task.
///
/// Must be called from within a tokio runtime.
pub async fn spawn(config: StubConfig, addr: SocketAddr) -> std::io::Result<StubHandle> {
    let store = Arc::new(UserStore::new());
    let router = Router::new(store.clone(), Arc::new(config));
    let server = Server::bind(addr, router).await?;
    let addr = server.local_addr()?;

    let task = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(StubHandle { addr, store, task })
}

/// Spawns a server with default configuration on a free loopback port.
pub async fn spawn_local() -> std::io::Result<StubHandle> {
    spawn(StubConfig::default(), SocketAddr::from(([127, 0, 0, 1], 0))).await
}
