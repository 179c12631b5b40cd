//! Structural comparison of captured requests against fixtures.
//!
//! Wall-clock fields differ on every run, so both sides are masked with
//! [`Volatile::mask_volatile`] before they are compared.

use std::fmt::Debug;

use pretty_assertions::Comparison;

use crate::entities::Mismatch;
use crate::proto::logging::{LogEntry, WriteLogEntriesRequest};
use crate::proto::mesh_edges::ReportTrafficAssertionsRequest;
use crate::proto::monitoring::{CreateTimeSeriesRequest, TimeSeries};

/// Messages carrying fields that change on every run
pub trait Volatile {
    /// Clear timestamps, intervals and latencies in place.
    fn mask_volatile(&mut self);
}

impl Volatile for TimeSeries {
    fn mask_volatile(&mut self) {
        for point in &mut self.points {
            point.interval = None;
        }
    }
}

impl Volatile for CreateTimeSeriesRequest {
    fn mask_volatile(&mut self) {
        self.time_series.iter_mut().for_each(Volatile::mask_volatile);
    }
}

impl Volatile for LogEntry {
    fn mask_volatile(&mut self) {
        self.timestamp = None;
        if let Some(http_request) = self.http_request.as_mut() {
            http_request.latency = None;
        }
    }
}

impl Volatile for WriteLogEntriesRequest {
    fn mask_volatile(&mut self) {
        self.entries.iter_mut().for_each(Volatile::mask_volatile);
    }
}

impl Volatile for ReportTrafficAssertionsRequest {
    fn mask_volatile(&mut self) {
        self.timestamp = None;
    }
}

/// Compare `actual` with `expected`, ignoring volatile fields.
pub fn compare<T>(subject: &str, actual: &T, expected: &T) -> Result<(), Mismatch>
where
    T: Volatile + Clone + PartialEq + Debug,
{
    compare_ignoring(subject, actual, expected, |_| {})
}

/// Like [`compare`], with `mask` applied to both sides as well.
pub fn compare_ignoring<T, F>(
    subject: &str,
    actual: &T,
    expected: &T,
    mask: F,
) -> Result<(), Mismatch>
where
    T: Volatile + Clone + PartialEq + Debug,
    F: Fn(&mut T),
{
    let mut actual = actual.clone();
    let mut expected = expected.clone();
    for side in [&mut actual, &mut expected] {
        side.mask_volatile();
        mask(side);
    }

    if actual == expected {
        return Ok(());
    }

    let diff = Comparison::new(&expected, &actual).to_string();
    Err(Mismatch::new(
        subject,
        format!("{actual:#?}"),
        format!("{expected:#?}"),
        diff,
    ))
}
