mod capture_channel;
mod captured_request;
mod mismatch;
mod reply;
mod report;
mod service_kind;
mod service_stub;

pub use capture_channel::{
    capture_channel, capture_channels, CaptureChannel, CaptureChannels, CaptureSink, CaptureSinks,
};
pub use captured_request::{CapturedRequest, Received, TelemetryRequest};
pub use mismatch::Mismatch;
pub use reply::Reply;
pub use report::{ExpectationStatus, Outcome, VerificationReport};
pub use service_kind::ServiceKind;
pub use service_stub::ServiceStub;
