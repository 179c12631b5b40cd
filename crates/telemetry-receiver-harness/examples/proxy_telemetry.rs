//! Example standing in for a proxy telemetry test
//!
//! This example shows how to:
//! - Start the fake receiver on the port from `TELEMETRY_RECEIVER_PORT` (12312 by default)
//! - Play the proxy by sending one request to each telemetry service
//! - Wait for client metrics, server metrics, logs and edges with a deadline
//! - Print the verification report
//!
//! Run with `RUST_LOG` unset; the example prints its own progress.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use prost::Message;
use std::net::SocketAddr;
use std::time::Duration;
use telemetry_receiver_harness::prelude::*;

/// Helper to create a gRPC request body with length prefix
fn grpc_request_body(data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(5 + data.len());
    body.push(0); // No compression
    body.extend_from_slice(&(data.len() as u32).to_be_bytes());
    body.extend_from_slice(data);
    body
}

fn request_count(metric_type: &str) -> Result<TimeSeries, HarnessError> {
    fixture::from_json(&format!(
        r#"{{
            "metric": {{"type": "{metric_type}", "labels": {{"response_code": "200"}}}},
            "metricKind": "CUMULATIVE",
            "valueType": "INT64",
            "points": [{{"value": {{"int64Value": 1}}}}]
        }}"#
    ))
}

/// Send what a client/server proxy pair would export for one request
async fn play_proxy(addr: SocketAddr) {
    let client = Client::builder(TokioExecutor::new())
        .http2_only(true)
        .build_http();

    let mut calls: Vec<(ServiceKind, Vec<u8>)> = Vec::new();
    for metric_type in [
        "istio.io/service/server/request_count",
        "istio.io/service/client/request_count",
    ] {
        let series = match request_count(metric_type) {
            Ok(series) => series,
            Err(e) => {
                println!("  -> {metric_type} fixture failed to parse: {e}");
                continue;
            }
        };
        let request = CreateTimeSeriesRequest {
            name: "projects/test-project".to_string(),
            time_series: vec![series],
        };
        calls.push((ServiceKind::Metrics, request.encode_to_vec()));
    }
    let logs = WriteLogEntriesRequest {
        log_name: "projects/test-project/logs/server-accesslog-stackdriver".to_string(),
        entries: vec![LogEntry::default()],
        ..Default::default()
    };
    calls.push((ServiceKind::Logging, logs.encode_to_vec()));
    let edges = ReportTrafficAssertionsRequest {
        parent: "projects/test-project".to_string(),
        mesh_uid: "mesh".to_string(),
        ..Default::default()
    };
    calls.push((ServiceKind::Edges, edges.encode_to_vec()));

    for (kind, message) in calls {
        let request = hyper::Request::builder()
            .method("POST")
            .uri(format!("http://{}{}", addr, kind.path()))
            .header("content-type", "application/grpc")
            .body(Full::new(Bytes::from(grpc_request_body(&message))));
        let Ok(request) = request else { continue };

        match client.request(request).await {
            Ok(response) => {
                let _ = response.into_body().collect().await;
                println!("  -> {kind} request sent");
            }
            Err(e) => println!("  -> {kind} request failed: {e}"),
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::main]
async fn main() -> Result<(), HarnessError> {
    let config = ReceiverConfig::from_env()?;
    let (mut receiver, mut channels) = FakeReceiver::start(config).await?;
    println!("Fake telemetry receiver listening on {}\n", receiver.endpoint());

    let proxy = tokio::spawn(play_proxy(receiver.local_addr()));

    let report = Verification::new(Duration::from_secs(5))
        .expect(Expectation::time_series(
            "client metrics",
            request_count("istio.io/service/client/request_count")?,
        ))
        .expect(Expectation::time_series(
            "server metrics",
            request_count("istio.io/service/server/request_count")?,
        ))
        .expect(
            Expectation::on::<WriteLogEntriesRequest>("logs")
                .when(|request| request.log_name.ends_with("server-accesslog-stackdriver"))
                .observed(),
        )
        .expect(Expectation::on::<ReportTrafficAssertionsRequest>("edges").observed())
        .run(&mut channels)
        .await?;

    let _ = proxy.await;
    receiver.stop().await?;

    println!("\n{:?} after {:?}", report.outcome(), report.elapsed);
    println!("{}", report.summary());
    report.into_result()
}
