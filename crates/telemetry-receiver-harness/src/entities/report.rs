use std::fmt;
use std::time::Duration;

use super::{Mismatch, ServiceKind};
use crate::error::HarnessError;

/// Final state of a verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every expectation observed at least once before the deadline
    AllSatisfied,
    /// The deadline fired, or every channel closed, with expectations left
    TimedOut,
}

/// Per-expectation result
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectationStatus {
    pub name: String,
    pub kind: ServiceKind,
    /// At least one request was routed to this expectation
    pub observed: bool,
    /// Observed, and no routed request failed its check
    pub matched: bool,
    /// Number of requests routed to this expectation
    pub events: usize,
}

impl fmt::Display for ExpectationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: observed={} matched={}",
            self.name, self.observed, self.matched
        )
    }
}

/// Everything a verification run learned
#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub outcome: Outcome,
    pub status: Vec<ExpectationStatus>,
    /// Failed checks and requests no expectation claimed, in arrival order
    pub mismatches: Vec<Mismatch>,
    pub elapsed: Duration,
}

impl VerificationReport {
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// All expectations observed and nothing mismatched.
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::AllSatisfied && self.mismatches.is_empty()
    }

    pub fn unobserved(&self) -> impl Iterator<Item = &str> {
        self.status
            .iter()
            .filter(|s| !s.observed)
            .map(|s| s.name.as_str())
    }

    pub fn status_of(&self, name: &str) -> Option<&ExpectationStatus> {
        self.status.iter().find(|s| s.name == name)
    }

    /// One line naming every expectation and its flags.
    pub fn summary(&self) -> String {
        self.status
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn into_result(self) -> Result<(), HarnessError> {
        match self.outcome {
            Outcome::TimedOut => Err(HarnessError::Timeout {
                status: self.status,
                mismatches: self.mismatches,
            }),
            Outcome::AllSatisfied if !self.mismatches.is_empty() => Err(HarnessError::Mismatch {
                mismatches: self.mismatches,
            }),
            Outcome::AllSatisfied => Ok(()),
        }
    }
}
