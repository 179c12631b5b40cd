//! Shared helpers for the integration tests: a minimal gRPC client standing
//! in for the proxy's exporters, and the expected-message fixtures.

#![allow(dead_code)]

pub mod fixtures;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use prost::Message;
use std::net::SocketAddr;

pub const METRICS_PATH: &str = "/google.monitoring.v3.MetricService/CreateTimeSeries";
pub const LOGGING_PATH: &str = "/google.logging.v2.LoggingServiceV2/WriteLogEntries";
pub const EDGES_PATH: &str = "/google.cloud.meshtelemetry.v1alpha1.MeshEdgesService/ReportTrafficAssertions";

/// Helper to create a gRPC request body with length prefix
pub fn grpc_request_body(data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(5 + data.len());
    body.push(0); // No compression
    body.extend_from_slice(&(data.len() as u32).to_be_bytes());
    body.extend_from_slice(data);
    body
}

/// What came back from one unary call
#[derive(Debug)]
pub struct GrpcResponse {
    pub http_status: u16,
    /// `grpc-status` from the trailers, or the headers for trailers-only responses
    pub grpc_status: Option<i32>,
    pub grpc_message: Option<String>,
    pub body: Bytes,
}

impl GrpcResponse {
    pub fn is_ok(&self) -> bool {
        self.http_status == 200 && self.grpc_status == Some(0)
    }
}

/// Cleartext HTTP/2 client posting unary gRPC calls at the receiver
#[derive(Clone)]
pub struct TelemetryClient {
    addr: SocketAddr,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl TelemetryClient {
    pub fn new(addr: SocketAddr) -> Self {
        let client = Client::builder(TokioExecutor::new())
            .http2_only(true)
            .build_http();
        Self { addr, client }
    }

    pub async fn call(&self, path: &str, message: &impl Message) -> GrpcResponse {
        self.call_raw(path, grpc_request_body(&message.encode_to_vec()))
            .await
    }

    pub async fn call_raw(&self, path: &str, body: Vec<u8>) -> GrpcResponse {
        let request = hyper::Request::builder()
            .method("POST")
            .uri(format!("http://{}{}", self.addr, path))
            .header("content-type", "application/grpc")
            .header("te", "trailers")
            .body(Full::new(Bytes::from(body)))
            .unwrap();

        let response = self.client.request(request).await.unwrap();
        let http_status = response.status().as_u16();
        let headers = response.headers().clone();
        let collected = response.into_body().collect().await.unwrap();

        let trailers = collected.trailers().cloned();
        let lookup = |name: &str| {
            trailers
                .as_ref()
                .and_then(|t| t.get(name))
                .or_else(|| headers.get(name))
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        GrpcResponse {
            http_status,
            grpc_status: lookup("grpc-status").and_then(|s| s.parse().ok()),
            grpc_message: lookup("grpc-message"),
            body: collected.to_bytes(),
        }
    }
}
