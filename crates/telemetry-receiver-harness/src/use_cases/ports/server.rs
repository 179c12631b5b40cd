use async_trait::async_trait;
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::entities::{CaptureSinks, ServiceStub};
use crate::error::HarnessError;

/// Trait for transports that can host the service stubs
#[async_trait]
pub trait Server: Send + Sync {
    /// Bind `addr` and start serving `stubs` in the background.
    ///
    /// Returns once the listener is bound, so a failure to claim the port is
    /// reported here. Every decoded request is published on the matching
    /// sink in `sinks`.
    async fn start(
        &self,
        addr: SocketAddr,
        stubs: Vec<ServiceStub>,
        sinks: CaptureSinks,
    ) -> Result<RunningServer, HarnessError>;
}

/// Handle on a server started by [`Server::start`].
///
/// Dropping the handle signals shutdown without waiting for it.
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl RunningServer {
    pub fn new(
        local_addr: SocketAddr,
        shutdown_tx: oneshot::Sender<()>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Signal shutdown and wait for the server task. Later calls do nothing.
    pub async fn shutdown(&mut self) -> Result<(), HarnessError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|e| HarnessError::ServerError(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
