use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;

use crate::entities::{Reply, ServiceKind, ServiceStub};
use crate::error::HarnessError;

/// Port the proxy's telemetry tests point every endpoint at
pub const DEFAULT_PORT: u16 = 12312;

const PORT_VAR: &str = "TELEMETRY_RECEIVER_PORT";
const HOST_VAR: &str = "TELEMETRY_RECEIVER_HOST";

/// Fake receiver settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiverConfig {
    /// Address all three services listen on; port 0 picks a free port
    pub listen_addr: SocketAddr,
    #[serde(skip)]
    pub metrics_reply: Reply,
    #[serde(skip)]
    pub logging_reply: Reply,
    #[serde(skip)]
    pub edges_reply: Reply,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0),
            metrics_reply: Reply::Ack,
            logging_reply: Reply::Ack,
            edges_reply: Reply::Ack,
        }
    }
}

impl ReceiverConfig {
    /// Read `TELEMETRY_RECEIVER_HOST` and `TELEMETRY_RECEIVER_PORT`, falling
    /// back to 127.0.0.1 and [`DEFAULT_PORT`].
    pub fn from_env() -> Result<Self, HarnessError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_json(json: &str) -> Result<Self, HarnessError> {
        serde_json::from_str(json)
            .map_err(|e| HarnessError::ConfigurationError(format!("invalid receiver config: {e}")))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HarnessError> {
        let host = match lookup(HOST_VAR) {
            Some(host) => host.parse::<IpAddr>().map_err(|e| {
                HarnessError::ConfigurationError(format!("{HOST_VAR}={host}: {e}"))
            })?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port = match lookup(PORT_VAR) {
            Some(port) => port.parse::<u16>().map_err(|e| {
                HarnessError::ConfigurationError(format!("{PORT_VAR}={port}: {e}"))
            })?,
            None => DEFAULT_PORT,
        };
        Ok(Self::default().with_listen_addr(SocketAddr::new(host, port)))
    }

    pub fn with_listen_addr(mut self, addr: impl Into<SocketAddr>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.listen_addr.set_port(port);
        self
    }

    /// Answer calls of `kind` with `reply` instead of an empty success.
    pub fn with_reply(mut self, kind: ServiceKind, reply: Reply) -> Self {
        match kind {
            ServiceKind::Metrics => self.metrics_reply = reply,
            ServiceKind::Logging => self.logging_reply = reply,
            ServiceKind::Edges => self.edges_reply = reply,
        }
        self
    }

    pub fn reply(&self, kind: ServiceKind) -> &Reply {
        match kind {
            ServiceKind::Metrics => &self.metrics_reply,
            ServiceKind::Logging => &self.logging_reply,
            ServiceKind::Edges => &self.edges_reply,
        }
    }

    /// The three stubs this configuration describes
    pub fn stubs(&self) -> Vec<ServiceStub> {
        ServiceKind::ALL
            .into_iter()
            .map(|kind| ServiceStub::new(kind).with_reply(self.reply(kind).clone()))
            .collect()
    }
}
