use super::ServiceKind;
use crate::proto::logging::WriteLogEntriesRequest;
use crate::proto::mesh_edges::ReportTrafficAssertionsRequest;
use crate::proto::monitoring::CreateTimeSeriesRequest;

/// A decoded request together with its position in its capture channel
#[derive(Debug, Clone, PartialEq)]
pub struct Received<T> {
    /// Zero-based arrival index within the channel it was captured on
    pub sequence: u64,
    pub message: T,
}

impl<T> Received<T> {
    pub fn new(sequence: u64, message: T) -> Self {
        Self { sequence, message }
    }

    pub fn into_message(self) -> T {
        self.message
    }
}

/// A captured request of any of the three kinds
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedRequest {
    Metrics(Received<CreateTimeSeriesRequest>),
    Logging(Received<WriteLogEntriesRequest>),
    Edges(Received<ReportTrafficAssertionsRequest>),
}

impl CapturedRequest {
    pub fn kind(&self) -> ServiceKind {
        match self {
            CapturedRequest::Metrics(_) => ServiceKind::Metrics,
            CapturedRequest::Logging(_) => ServiceKind::Logging,
            CapturedRequest::Edges(_) => ServiceKind::Edges,
        }
    }

    pub fn sequence(&self) -> u64 {
        match self {
            CapturedRequest::Metrics(r) => r.sequence,
            CapturedRequest::Logging(r) => r.sequence,
            CapturedRequest::Edges(r) => r.sequence,
        }
    }

    /// Borrow the payload if this request is of type `T`
    pub fn payload<T: TelemetryRequest>(&self) -> Option<&T> {
        T::extract(self).map(|received| &received.message)
    }
}

/// Links a wire request type to the ingestion contract that carries it
pub trait TelemetryRequest: prost::Message + Default + Clone + PartialEq + 'static {
    const KIND: ServiceKind;

    fn tag(received: Received<Self>) -> CapturedRequest;

    fn extract(captured: &CapturedRequest) -> Option<&Received<Self>>;
}

impl TelemetryRequest for CreateTimeSeriesRequest {
    const KIND: ServiceKind = ServiceKind::Metrics;

    fn tag(received: Received<Self>) -> CapturedRequest {
        CapturedRequest::Metrics(received)
    }

    fn extract(captured: &CapturedRequest) -> Option<&Received<Self>> {
        match captured {
            CapturedRequest::Metrics(r) => Some(r),
            _ => None,
        }
    }
}

impl TelemetryRequest for WriteLogEntriesRequest {
    const KIND: ServiceKind = ServiceKind::Logging;

    fn tag(received: Received<Self>) -> CapturedRequest {
        CapturedRequest::Logging(received)
    }

    fn extract(captured: &CapturedRequest) -> Option<&Received<Self>> {
        match captured {
            CapturedRequest::Logging(r) => Some(r),
            _ => None,
        }
    }
}

impl TelemetryRequest for ReportTrafficAssertionsRequest {
    const KIND: ServiceKind = ServiceKind::Edges;

    fn tag(received: Received<Self>) -> CapturedRequest {
        CapturedRequest::Edges(received)
    }

    fn extract(captured: &CapturedRequest) -> Option<&Received<Self>> {
        match captured {
            CapturedRequest::Edges(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagging_preserves_kind_and_sequence() {
        let captured = ReportTrafficAssertionsRequest::tag(Received::new(
            4,
            ReportTrafficAssertionsRequest {
                mesh_uid: "mesh".to_string(),
                ..Default::default()
            },
        ));
        assert_eq!(captured.kind(), ServiceKind::Edges);
        assert_eq!(captured.sequence(), 4);
        assert_eq!(
            captured
                .payload::<ReportTrafficAssertionsRequest>()
                .unwrap()
                .mesh_uid,
            "mesh"
        );
    }

    #[test]
    fn test_payload_of_other_kind_is_none() {
        let captured = CreateTimeSeriesRequest::tag(Received::new(0, Default::default()));
        assert!(captured.payload::<WriteLogEntriesRequest>().is_none());
        assert!(captured.payload::<CreateTimeSeriesRequest>().is_some());
    }
}
