use std::net::SocketAddr;

use thiserror::Error;

use crate::entities::{ExpectationStatus, Mismatch};

/// Errors that can occur while receiving or verifying telemetry
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Failed to bind telemetry receiver to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Failed to decode {path} request: {reason}")]
    Decode { path: String, reason: String },

    #[error("{} expectation(s) did not match:\n{}", .mismatches.len(), join(.mismatches))]
    Mismatch { mismatches: Vec<Mismatch> },

    #[error(
        "timeout: telemetry receiver did not receive required requests: {}{}",
        join_inline(.status),
        mismatch_suffix(.mismatches)
    )]
    Timeout {
        status: Vec<ExpectationStatus>,
        mismatches: Vec<Mismatch>,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid fixture: {0}")]
    InvalidFixture(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

fn join(mismatches: &[Mismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_inline(status: &[ExpectationStatus]) -> String {
    status
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn mismatch_suffix(mismatches: &[Mismatch]) -> String {
    if mismatches.is_empty() {
        String::new()
    } else {
        format!("\n{}", join(mismatches))
    }
}
