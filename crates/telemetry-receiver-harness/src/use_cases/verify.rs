use std::collections::HashSet;
use std::time::Duration;

use futures::StreamExt;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::entities::{
    CaptureChannels, CapturedRequest, ExpectationStatus, Mismatch, Outcome, VerificationReport,
};
use crate::error::HarnessError;
use crate::use_cases::Expectation;

/// How long a run waits for its expectations unless told otherwise
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(20);

/// Waits, up to a deadline, until every expectation has been observed on the
/// capture channels.
///
/// # Example
///
/// ```rust,no_run
/// use telemetry_receiver_harness::prelude::*;
/// use std::time::Duration;
///
/// # async fn run(mut channels: CaptureChannels) -> Result<(), HarnessError> {
/// let report = Verification::new(Duration::from_secs(20))
///     .expect(Expectation::on::<WriteLogEntriesRequest>("logs").observed())
///     .expect(Expectation::on::<ReportTrafficAssertionsRequest>("edges").observed())
///     .run(&mut channels)
///     .await?;
///
/// report.into_result()
/// # }
/// ```
#[derive(Debug)]
pub struct Verification {
    deadline: Duration,
    expectations: Vec<Expectation>,
}

impl Default for Verification {
    fn default() -> Self {
        Self::new(DEFAULT_DEADLINE)
    }
}

impl Verification {
    pub fn new(deadline: Duration) -> Self {
        Self {
            deadline,
            expectations: Vec::new(),
        }
    }

    /// Add an expectation
    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Add multiple expectations
    pub fn expectations(mut self, expectations: impl IntoIterator<Item = Expectation>) -> Self {
        self.expectations.extend(expectations);
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Consume captured requests until every expectation is observed or the
    /// deadline fires.
    ///
    /// Failed checks never stop the wait; they are collected in the report.
    /// Only a malformed expectation set is an `Err` here, the verdict itself
    /// is carried by the returned report.
    pub async fn run(
        self,
        channels: &mut CaptureChannels,
    ) -> Result<VerificationReport, HarnessError> {
        self.validate()?;

        let started = Instant::now();
        let mut tracker = Tracker::new(&self.expectations);
        let mut events = channels.merged();
        let sleep = tokio::time::sleep(self.deadline);
        tokio::pin!(sleep);

        let outcome = loop {
            if tracker.all_observed() {
                break Outcome::AllSatisfied;
            }

            tokio::select! {
                event = events.next() => match event {
                    Some(request) => tracker.record(&self.expectations, request),
                    None => {
                        warn!("all capture channels closed before expectations were met");
                        break Outcome::TimedOut;
                    }
                },
                _ = &mut sleep => break Outcome::TimedOut,
            }
        };

        let report = tracker.into_report(outcome, started.elapsed());
        match report.outcome {
            Outcome::AllSatisfied => info!(
                elapsed = ?report.elapsed,
                mismatches = report.mismatches.len(),
                "all expectations observed"
            ),
            Outcome::TimedOut => warn!(
                elapsed = ?report.elapsed,
                status = %report.summary(),
                "verification timed out"
            ),
        }
        Ok(report)
    }

    fn validate(&self) -> Result<(), HarnessError> {
        if self.expectations.is_empty() {
            return Err(HarnessError::ConfigurationError(
                "verification needs at least one expectation".to_string(),
            ));
        }
        let mut names = HashSet::new();
        for expectation in &self.expectations {
            if !names.insert(expectation.name()) {
                return Err(HarnessError::ConfigurationError(format!(
                    "duplicate expectation name: {}",
                    expectation.name()
                )));
            }
        }
        Ok(())
    }
}

/// Mutable state of one run; discarded when the report is built.
struct Tracker {
    status: Vec<ExpectationStatus>,
    failed: Vec<bool>,
    mismatches: Vec<Mismatch>,
}

impl Tracker {
    fn new(expectations: &[Expectation]) -> Self {
        Self {
            status: expectations
                .iter()
                .map(|e| ExpectationStatus {
                    name: e.name().to_string(),
                    kind: e.kind(),
                    observed: false,
                    matched: false,
                    events: 0,
                })
                .collect(),
            failed: vec![false; expectations.len()],
            mismatches: Vec::new(),
        }
    }

    fn all_observed(&self) -> bool {
        self.status.iter().all(|s| s.observed)
    }

    /// Route `request` to the first selecting expectation still waiting, or
    /// failing that to the first selecting one at all.
    fn route(&self, expectations: &[Expectation], request: &CapturedRequest) -> Option<usize> {
        let mut selecting = expectations
            .iter()
            .enumerate()
            .filter(|(_, e)| e.selects(request))
            .map(|(i, _)| i)
            .peekable();
        let first = *selecting.peek()?;
        Some(selecting.find(|&i| !self.status[i].observed).unwrap_or(first))
    }

    fn record(&mut self, expectations: &[Expectation], request: CapturedRequest) {
        let Some(index) = self.route(expectations, &request) else {
            warn!(
                kind = %request.kind(),
                sequence = request.sequence(),
                "captured request matches no expectation"
            );
            self.mismatches.push(Mismatch::rejected(
                format!("unclassified {} request #{}", request.kind(), request.sequence()),
                &request,
                candidates(expectations, &request),
            ));
            return;
        };

        let expectation = &expectations[index];
        debug!(
            kind = %request.kind(),
            sequence = request.sequence(),
            expectation = expectation.name(),
            "routed captured request"
        );

        if let Err(mismatch) = expectation.check(&request) {
            warn!(expectation = expectation.name(), "verification failed: {mismatch}");
            self.failed[index] = true;
            self.mismatches.push(mismatch);
        }

        let status = &mut self.status[index];
        status.observed = true;
        status.events += 1;
        status.matched = !self.failed[index];
    }

    fn into_report(self, outcome: Outcome, elapsed: Duration) -> VerificationReport {
        VerificationReport {
            outcome,
            status: self.status,
            mismatches: self.mismatches,
            elapsed,
        }
    }
}

/// The wanted side of an unclassified request: every expectation of its kind,
/// with the fixture it compares against where there is one.
fn candidates(expectations: &[Expectation], request: &CapturedRequest) -> String {
    let wanted = expectations
        .iter()
        .filter(|e| e.kind() == request.kind())
        .map(|e| match e.expected() {
            Some(fixture) => format!("{}: {fixture}", e.name()),
            None => format!("{}: a request accepted by its selector", e.name()),
        })
        .collect::<Vec<_>>();

    if wanted.is_empty() {
        format!("no expectation on {} requests", request.kind())
    } else {
        wanted.join("\n")
    }
}
