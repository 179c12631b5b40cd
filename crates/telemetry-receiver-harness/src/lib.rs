//! Telemetry Receiver Harness
//!
//! A fake receiver for the three telemetry services a service-mesh proxy
//! exports to (monitoring time series, log entries and mesh edges), plus a
//! verification step that waits for the expected requests to arrive.
//!
//! # Example
//!
//! ```rust,no_run
//! use telemetry_receiver_harness::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), HarnessError> {
//!     let (mut receiver, mut channels) = FakeReceiver::start(ReceiverConfig::from_env()?).await?;
//!
//!     // ... start the proxy with its exporters pointed at receiver.endpoint()
//!     // and send it some traffic ...
//!
//!     let server_requests: TimeSeries = fixture::from_json(
//!         r#"{"metric": {"type": "istio.io/service/server/request_count"}}"#,
//!     )?;
//!
//!     let report = Verification::new(Duration::from_secs(20))
//!         .expect(Expectation::time_series("server metrics", server_requests))
//!         .expect(Expectation::on::<WriteLogEntriesRequest>("logs").observed())
//!         .expect(Expectation::on::<ReportTrafficAssertionsRequest>("edges").observed())
//!         .run(&mut channels)
//!         .await?;
//!
//!     receiver.stop().await?;
//!     println!("{}", report.summary());
//!     report.into_result()
//! }
//! ```

mod adapters;
pub mod config;
pub mod entities;
pub mod error;
pub mod fixture;
pub mod proto;
pub mod use_cases;

pub use adapters::gateways::Tonic;
pub use error::HarnessError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ReceiverConfig, DEFAULT_PORT};
    pub use crate::entities::{
        CaptureChannel, CaptureChannels, CapturedRequest, ExpectationStatus, Mismatch, Outcome,
        Received, Reply, ServiceKind, TelemetryRequest, VerificationReport,
    };
    pub use crate::error::HarnessError;
    pub use crate::fixture;
    pub use crate::proto::logging::{LogEntry, WriteLogEntriesRequest};
    pub use crate::proto::mesh_edges::{ReportTrafficAssertionsRequest, TrafficAssertion};
    pub use crate::proto::monitoring::{CreateTimeSeriesRequest, TimeSeries};
    pub use crate::use_cases::compare::{compare, compare_ignoring, Volatile};
    pub use crate::use_cases::{
        Expectation, ExpectationBuilder, FakeReceiver, ReceiverBuilder, Verification,
        DEFAULT_DEADLINE,
    };
    pub use crate::Tonic;
}
