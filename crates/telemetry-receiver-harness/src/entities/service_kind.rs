use std::fmt;

/// The three ingestion contracts the fake receiver impersonates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// `google.monitoring.v3.MetricService/CreateTimeSeries`
    Metrics,
    /// `google.logging.v2.LoggingServiceV2/WriteLogEntries`
    Logging,
    /// `google.cloud.meshtelemetry.v1alpha1.MeshEdgesService/ReportTrafficAssertions`
    Edges,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [ServiceKind::Metrics, ServiceKind::Logging, ServiceKind::Edges];

    pub fn service_name(&self) -> &'static str {
        match self {
            ServiceKind::Metrics => "google.monitoring.v3.MetricService",
            ServiceKind::Logging => "google.logging.v2.LoggingServiceV2",
            ServiceKind::Edges => "google.cloud.meshtelemetry.v1alpha1.MeshEdgesService",
        }
    }

    pub fn method_name(&self) -> &'static str {
        match self {
            ServiceKind::Metrics => "CreateTimeSeries",
            ServiceKind::Logging => "WriteLogEntries",
            ServiceKind::Edges => "ReportTrafficAssertions",
        }
    }

    /// HTTP/2 request path of the RPC, `/package.Service/Method`
    pub fn path(&self) -> String {
        format!("/{}/{}", self.service_name(), self.method_name())
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.path() == path)
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceKind::Metrics => "metrics",
            ServiceKind::Logging => "logging",
            ServiceKind::Edges => "edges",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(
            ServiceKind::Metrics.path(),
            "/google.monitoring.v3.MetricService/CreateTimeSeries"
        );
        assert_eq!(
            ServiceKind::Logging.path(),
            "/google.logging.v2.LoggingServiceV2/WriteLogEntries"
        );
        assert_eq!(
            ServiceKind::Edges.path(),
            "/google.cloud.meshtelemetry.v1alpha1.MeshEdgesService/ReportTrafficAssertions"
        );
    }

    #[test]
    fn test_from_path() {
        for kind in ServiceKind::ALL {
            assert_eq!(ServiceKind::from_path(&kind.path()), Some(kind));
        }
        assert_eq!(
            ServiceKind::from_path("/google.monitoring.v3.MetricService/CreateMetricDescriptor"),
            None
        );
    }
}
