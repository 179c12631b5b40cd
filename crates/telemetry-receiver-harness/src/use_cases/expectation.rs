use std::fmt;
use std::marker::PhantomData;

use crate::entities::{CapturedRequest, Mismatch, ServiceKind, TelemetryRequest};
use crate::proto::logging::WriteLogEntriesRequest;
use crate::proto::mesh_edges::ReportTrafficAssertionsRequest;
use crate::proto::monitoring::{CreateTimeSeriesRequest, TimeSeries};
use crate::use_cases::compare::{compare, Volatile};

type Selector = Box<dyn Fn(&CapturedRequest) -> bool + Send + Sync>;
type Check = Box<dyn Fn(&CapturedRequest) -> Result<(), Mismatch> + Send + Sync>;

/// A named event a verification run must observe.
///
/// The selector decides whether a captured request belongs to this
/// expectation; the check then validates it. Several expectations may share
/// one kind, e.g. client and server metrics both arrive as
/// `CreateTimeSeries` calls and are told apart by metric type.
pub struct Expectation {
    name: String,
    kind: ServiceKind,
    selector: Selector,
    check: Check,
    expected: Option<String>,
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Expectation {
    /// Start building an expectation on requests of type `T`.
    pub fn on<T: TelemetryRequest>(name: impl Into<String>) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            name: name.into(),
            selector: Box::new(|_: &T| true),
            expected: None,
            _marker: PhantomData,
        }
    }

    /// A `CreateTimeSeries` call carrying a series of the fixture's metric
    /// type, equal to the fixture apart from point intervals.
    pub fn time_series(name: impl Into<String>, fixture: TimeSeries) -> Self {
        let name = name.into();
        let subject = name.clone();
        let metric_type = fixture.metric_type().to_string();

        Expectation::on::<CreateTimeSeriesRequest>(name)
            .describe(format!("{fixture:#?}"))
            .when({
                let metric_type = metric_type.clone();
                move |request: &CreateTimeSeriesRequest| {
                    request.find_series(&metric_type).is_some()
                }
            })
            .verify_with(move |request| match request.find_series(&metric_type) {
                Some(series) => compare(&subject, series, &fixture),
                None => Err(Mismatch::rejected(
                    subject.as_str(),
                    request,
                    format!("a time series of type {metric_type}"),
                )),
            })
    }

    /// A `WriteLogEntries` call equal to the fixture apart from entry timestamps.
    pub fn log_entries(name: impl Into<String>, fixture: WriteLogEntriesRequest) -> Self {
        Expectation::on::<WriteLogEntriesRequest>(name).matches(fixture)
    }

    /// A `ReportTrafficAssertions` call equal to the fixture apart from its timestamp.
    pub fn traffic_assertions(
        name: impl Into<String>,
        fixture: ReportTrafficAssertionsRequest,
    ) -> Self {
        Expectation::on::<ReportTrafficAssertionsRequest>(name).matches(fixture)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Whether `request` belongs to this expectation.
    pub fn selects(&self, request: &CapturedRequest) -> bool {
        request.kind() == self.kind && (self.selector)(request)
    }

    pub fn check(&self, request: &CapturedRequest) -> Result<(), Mismatch> {
        (self.check)(request)
    }

    /// Rendering of the fixture this expectation compares against, if any
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }
}

/// Typed builder returned by [`Expectation::on`]
pub struct ExpectationBuilder<T> {
    name: String,
    selector: Box<dyn Fn(&T) -> bool + Send + Sync>,
    expected: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TelemetryRequest> ExpectationBuilder<T> {
    /// Only claim requests for which `selector` returns true.
    pub fn when<F>(mut self, selector: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.selector = Box::new(selector);
        self
    }

    /// What to show as the wanted side when a request cannot be routed here.
    pub fn describe(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Finish with a custom check.
    pub fn verify_with<F>(self, check: F) -> Expectation
    where
        F: Fn(&T) -> Result<(), Mismatch> + Send + Sync + 'static,
    {
        let selector = self.selector;
        Expectation {
            name: self.name,
            kind: T::KIND,
            expected: self.expected,
            selector: Box::new(move |request: &CapturedRequest| {
                request.payload::<T>().is_some_and(|payload| selector(payload))
            }),
            check: Box::new(move |request: &CapturedRequest| match request.payload::<T>() {
                Some(payload) => check(payload),
                None => Err(Mismatch::rejected(
                    "captured request",
                    request,
                    format!("a {} request", T::KIND),
                )),
            }),
        }
    }

    /// Finish by comparing the whole request with `fixture`, volatile fields masked.
    pub fn matches(self, fixture: T) -> Expectation
    where
        T: Volatile + fmt::Debug,
    {
        let subject = self.name.clone();
        self.describe(format!("{fixture:#?}"))
            .verify_with(move |request| compare(&subject, request, &fixture))
    }

    /// Finish without validating content; observing a request is enough.
    pub fn observed(self) -> Expectation {
        self.verify_with(|_| Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Received;
    use crate::proto::monitoring::Metric;

    fn series(metric_type: &str) -> TimeSeries {
        TimeSeries {
            metric: Some(Metric {
                r#type: metric_type.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn metrics(series: Vec<TimeSeries>) -> CapturedRequest {
        CreateTimeSeriesRequest::tag(Received::new(
            0,
            CreateTimeSeriesRequest {
                name: "projects/test-project".to_string(),
                time_series: series,
            },
        ))
    }

    #[test]
    fn test_time_series_selects_by_metric_type() {
        let client = Expectation::time_series(
            "client metrics",
            series("istio.io/service/client/request_count"),
        );
        assert_eq!(client.kind(), ServiceKind::Metrics);

        let request = metrics(vec![series("istio.io/service/client/request_count")]);
        assert!(client.selects(&request));
        assert!(client.check(&request).is_ok());

        let other = metrics(vec![series("istio.io/service/server/request_count")]);
        assert!(!client.selects(&other));
    }

    #[test]
    fn test_time_series_check_reports_mismatch() {
        let mut fixture = series("istio.io/service/client/request_count");
        fixture.metric_kind = 3;
        let expectation = Expectation::time_series("client metrics", fixture);

        let request = metrics(vec![series("istio.io/service/client/request_count")]);
        let mismatch = expectation.check(&request).unwrap_err();
        assert_eq!(mismatch.subject, "client metrics");
    }

    #[test]
    fn test_fixture_rendering_is_kept() {
        let client = Expectation::time_series(
            "client metrics",
            series("istio.io/service/client/request_count"),
        );
        assert!(client
            .expected()
            .unwrap()
            .contains("istio.io/service/client/request_count"));

        let logs = Expectation::log_entries(
            "logs",
            WriteLogEntriesRequest {
                log_name: "server-accesslog-stackdriver".to_string(),
                ..Default::default()
            },
        );
        assert!(logs.expected().unwrap().contains("server-accesslog-stackdriver"));

        let edges = Expectation::on::<ReportTrafficAssertionsRequest>("edges").observed();
        assert_eq!(edges.expected(), None);
    }

    #[test]
    fn test_expectation_ignores_other_kinds() {
        let edges = Expectation::on::<ReportTrafficAssertionsRequest>("edges").observed();
        assert!(!edges.selects(&metrics(Vec::new())));

        let request = ReportTrafficAssertionsRequest::tag(Received::new(0, Default::default()));
        assert!(edges.selects(&request));
        assert!(edges.check(&request).is_ok());
    }

    #[test]
    fn test_custom_check() {
        let expectation = Expectation::on::<ReportTrafficAssertionsRequest>("edges")
            .when(|request| !request.traffic_assertions.is_empty())
            .verify_with(|request| {
                if request.mesh_uid == "mesh" {
                    Ok(())
                } else {
                    Err(Mismatch::rejected("edges", request, "mesh_uid \"mesh\""))
                }
            });

        let empty = ReportTrafficAssertionsRequest::tag(Received::new(0, Default::default()));
        assert!(!expectation.selects(&empty));
        assert!(expectation.check(&empty).is_err());
    }
}
