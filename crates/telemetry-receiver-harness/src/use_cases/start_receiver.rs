use std::net::SocketAddr;

use tracing::info;

use crate::adapters::gateways::Tonic;
use crate::config::ReceiverConfig;
use crate::entities::{capture_channels, CaptureChannels, Reply, ServiceKind};
use crate::error::HarnessError;
use crate::use_cases::ports::{RunningServer, Server};

/// The three telemetry services listening on one port.
///
/// Started with [`FakeReceiver::start`], which hands back the
/// [`CaptureChannels`] the services publish every decoded request on.
/// Dropping the receiver signals shutdown; call [`FakeReceiver::stop`] to
/// wait for the port to be released.
///
/// # Example
///
/// ```rust,no_run
/// use telemetry_receiver_harness::prelude::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), HarnessError> {
///     let (mut receiver, mut channels) = FakeReceiver::start_on(12312).await?;
///
///     // ... drive the proxy at receiver.local_addr() ...
///
///     let report = Verification::default()
///         .expect(Expectation::on::<WriteLogEntriesRequest>("logs").observed())
///         .run(&mut channels)
///         .await?;
///
///     receiver.stop().await?;
///     report.into_result()
/// }
/// ```
#[derive(Debug)]
pub struct FakeReceiver {
    server: RunningServer,
}

impl FakeReceiver {
    pub fn builder() -> ReceiverBuilder<Tonic> {
        ReceiverBuilder::new().server(Tonic::new())
    }

    /// Start the receiver described by `config`.
    pub async fn start(config: ReceiverConfig) -> Result<(Self, CaptureChannels), HarnessError> {
        Self::builder().config(config).start().await
    }

    /// Start on 127.0.0.1:`port` with every service acknowledging.
    pub async fn start_on(port: u16) -> Result<(Self, CaptureChannels), HarnessError> {
        Self::start(ReceiverConfig::default().with_port(port)).await
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.server.local_addr()
    }

    /// `http://` URI the proxy should export to
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.local_addr())
    }

    pub fn is_running(&self) -> bool {
        self.server.is_running()
    }

    /// Stop serving and release the port. Calling it again is a no-op.
    ///
    /// Requests captured before the call stay readable on the channels.
    pub async fn stop(&mut self) -> Result<(), HarnessError> {
        if self.server.is_running() {
            info!(local_addr = %self.local_addr(), "stopping telemetry receiver");
        }
        self.server.shutdown().await
    }
}

/// Builder for a [`FakeReceiver`] on a chosen transport
pub struct ReceiverBuilder<S> {
    server: S,
    config: ReceiverConfig,
}

impl ReceiverBuilder<()> {
    pub fn new() -> Self {
        Self {
            server: (),
            config: ReceiverConfig::default(),
        }
    }
}

impl Default for ReceiverBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ReceiverBuilder<S> {
    /// Set the server implementation to use
    pub fn server<NewS: Server>(self, server: NewS) -> ReceiverBuilder<NewS> {
        ReceiverBuilder {
            server,
            config: self.config,
        }
    }

    pub fn config(mut self, config: ReceiverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn listen_addr(mut self, addr: impl Into<SocketAddr>) -> Self {
        self.config = self.config.with_listen_addr(addr);
        self
    }

    /// Answer calls of `kind` with `reply`
    pub fn reply(mut self, kind: ServiceKind, reply: Reply) -> Self {
        self.config = self.config.with_reply(kind, reply);
        self
    }
}

impl<S: Server> ReceiverBuilder<S> {
    /// Bind the port and start serving.
    pub async fn start(self) -> Result<(FakeReceiver, CaptureChannels), HarnessError> {
        let (sinks, channels) = capture_channels();
        let running = self
            .server
            .start(self.config.listen_addr, self.config.stubs(), sinks)
            .await?;

        info!(
            local_addr = %running.local_addr(),
            services = ServiceKind::ALL.len(),
            "fake telemetry receiver started"
        );
        Ok((FakeReceiver { server: running }, channels))
    }
}
