use async_trait::async_trait;
use futures::stream;
use http_body_util::{BodyExt, StreamBody};
use hyper::body::{Bytes, Frame, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http2;
use hyper::service::service_fn;
use hyper::{HeaderMap, Request, Response};
use hyper_util::rt::{TokioExecutor, TokioIo};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::framing::{decode_frame, encode_frame};
use crate::entities::{CaptureSink, CaptureSinks, Reply, ServiceKind, ServiceStub};
use crate::error::HarnessError;
use crate::use_cases::ports::{RunningServer, Server};

type GrpcBody = StreamBody<stream::Iter<std::vec::IntoIter<Result<Frame<Bytes>, Infallible>>>>;

const GRPC_STATUS: &str = "grpc-status";
const GRPC_MESSAGE: &str = "grpc-message";

/// `grpc-message` carries printable ASCII only; everything else is `%XX`.
const GRPC_MESSAGE_ESCAPE: &AsciiSet = &CONTROLS.add(b'%');

/// gRPC server implementation over cleartext HTTP/2
#[derive(Clone, Debug, Default)]
pub struct Tonic {
    max_concurrent_streams: Option<u32>,
}

impl Tonic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit concurrent RPCs per connection; unlimited by default.
    pub fn with_max_concurrent_streams(mut self, max: u32) -> Self {
        self.max_concurrent_streams = Some(max);
        self
    }
}

/// State shared with handlers
struct ServerState {
    /// Map from "/package.Service/Method" to the stub serving it
    routes: HashMap<String, ServiceStub>,
    sinks: CaptureSinks,
}

impl ServerState {
    fn new(stubs: Vec<ServiceStub>, sinks: CaptureSinks) -> Self {
        let routes = stubs.into_iter().map(|stub| (stub.path(), stub)).collect();
        Self { routes, sinks }
    }
}

async fn handle_grpc_request(
    state: Arc<ServerState>,
    req: Request<Incoming>,
) -> Result<Response<GrpcBody>, hyper::Error> {
    let path = req.uri().path().to_string();

    let Some(stub) = state.routes.get(&path) else {
        debug!(%path, "no stub for method");
        return Ok(trailers_only(&Reply::fail(
            tonic::Code::Unimplemented,
            "Method not found",
        )));
    };

    let body_bytes = req.into_body().collect().await?.to_bytes();

    // Decode failures are isolated to this call; the proxy still gets its ack.
    match capture(&state.sinks, stub.kind, &path, &body_bytes) {
        Ok(Some(sequence)) => debug!(kind = %stub.kind, sequence, "captured request"),
        Ok(None) => warn!(kind = %stub.kind, "capture channel closed, request discarded"),
        Err(e) => warn!(kind = %stub.kind, error = %e, "acknowledging undecodable request"),
    }

    Ok(match &stub.reply {
        Reply::Ack => ack(),
        failure => trailers_only(failure),
    })
}

fn capture(
    sinks: &CaptureSinks,
    kind: ServiceKind,
    path: &str,
    body: &[u8],
) -> Result<Option<u64>, HarnessError> {
    let message = decode_frame(body).map_err(|e| HarnessError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    match kind {
        ServiceKind::Metrics => publish(&sinks.metrics, path, message),
        ServiceKind::Logging => publish(&sinks.logging, path, message),
        ServiceKind::Edges => publish(&sinks.edges, path, message),
    }
}

fn publish<T>(
    sink: &CaptureSink<T>,
    path: &str,
    message: &[u8],
) -> Result<Option<u64>, HarnessError>
where
    T: prost::Message + Default,
{
    let decoded = T::decode(message).map_err(|e| HarnessError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    Ok(sink.publish(decoded))
}

/// Successful unary response: one empty message followed by `grpc-status: 0`.
///
/// Every ack type of the three contracts is an empty message.
fn ack() -> Response<GrpcBody> {
    let mut trailers = HeaderMap::new();
    trailers.insert(GRPC_STATUS, HeaderValue::from_static("0"));

    let frames = vec![
        Ok(Frame::data(Bytes::from(encode_frame(&[])))),
        Ok(Frame::trailers(trailers)),
    ];
    grpc_response(frames)
}

/// Status-only response carrying the reply's code and message in the headers.
fn trailers_only(reply: &Reply) -> Response<GrpcBody> {
    let mut response = grpc_response(Vec::new());
    let headers = response.headers_mut();
    headers.insert(GRPC_STATUS, HeaderValue::from(reply.grpc_status()));
    if let Some(message) = reply.grpc_message() {
        let encoded = utf8_percent_encode(message, GRPC_MESSAGE_ESCAPE).to_string();
        if let Ok(value) = HeaderValue::from_str(&encoded) {
            headers.insert(GRPC_MESSAGE, value);
        }
    }
    response
}

fn grpc_response(frames: Vec<Result<Frame<Bytes>, Infallible>>) -> Response<GrpcBody> {
    let mut response = Response::new(StreamBody::new(stream::iter(frames)));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/grpc"));
    response
}

async fn serve(
    listener: TcpListener,
    state: Arc<ServerState>,
    http2_settings: Tonic,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            result = listener.accept() => match result {
                Ok((stream, peer)) => {
                    debug!(%peer, "accepted connection");
                    let state = state.clone();
                    let io = TokioIo::new(stream);
                    let mut builder = http2::Builder::new(TokioExecutor::new());
                    builder.max_concurrent_streams(http2_settings.max_concurrent_streams);

                    connections.spawn(async move {
                        let service = service_fn(move |req| {
                            let state = state.clone();
                            async move { handle_grpc_request(state, req).await }
                        });

                        if let Err(e) = builder.serve_connection(io, service).await {
                            debug!(%peer, error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => warn!(error = %e, "failed to accept connection"),
            },
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
            _ = &mut shutdown_rx => break,
        }
    }

    connections.abort_all();
    while connections.join_next().await.is_some() {}
}

#[async_trait]
impl Server for Tonic {
    async fn start(
        &self,
        addr: SocketAddr,
        stubs: Vec<ServiceStub>,
        sinks: CaptureSinks,
    ) -> Result<RunningServer, HarnessError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| HarnessError::Bind { addr, source })?;

        let local_addr = listener.local_addr()?;
        let state = Arc::new(ServerState::new(stubs, sinks));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(serve(listener, state, self.clone(), shutdown_rx));
        info!(%local_addr, "telemetry receiver listening");

        Ok(RunningServer::new(local_addr, shutdown_tx, task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::capture_channels;
    use crate::proto::mesh_edges::ReportTrafficAssertionsRequest;
    use prost::Message;

    fn state() -> (ServerState, crate::entities::CaptureChannels) {
        let (sinks, channels) = capture_channels();
        let stubs = ServiceKind::ALL.into_iter().map(ServiceStub::new).collect();
        (ServerState::new(stubs, sinks), channels)
    }

    #[test]
    fn test_routes_cover_all_kinds() {
        let (state, _channels) = state();
        for kind in ServiceKind::ALL {
            assert_eq!(state.routes[&kind.path()].kind, kind);
        }
    }

    #[test]
    fn test_capture_decodes_and_publishes() {
        let (state, mut channels) = state();
        let request = ReportTrafficAssertionsRequest {
            mesh_uid: "mesh".to_string(),
            ..Default::default()
        };
        let body = encode_frame(&request.encode_to_vec());

        let path = ServiceKind::Edges.path();
        let sequence = capture(&state.sinks, ServiceKind::Edges, &path, &body).unwrap();
        assert_eq!(sequence, Some(0));
        assert_eq!(channels.edges.try_recv().unwrap().message, request);
    }

    #[test]
    fn test_capture_rejects_garbage() {
        let (state, mut channels) = state();
        let path = ServiceKind::Metrics.path();

        let body = [0, 0, 0, 0, 2, 0xff, 0xff];

        let result = capture(&state.sinks, ServiceKind::Metrics, &path, &body);
        assert!(matches!(result, Err(HarnessError::Decode { .. })));
        assert!(channels.metrics.try_recv().is_none());
    }

    #[test]
    fn test_trailers_only_headers() {
        let response = trailers_only(&Reply::fail(tonic::Code::Unavailable, "backend down"));
        assert_eq!(response.headers()[GRPC_STATUS], "14");
        assert_eq!(response.headers()[GRPC_MESSAGE], "backend down");
        assert_eq!(response.headers()[CONTENT_TYPE], "application/grpc");
    }

    #[test]
    fn test_grpc_message_is_percent_encoded() {
        let response = trailers_only(&Reply::fail(
            tonic::Code::ResourceExhausted,
            "quota é\n100%",
        ));
        assert_eq!(response.headers()[GRPC_STATUS], "8");
        assert_eq!(response.headers()[GRPC_MESSAGE], "quota %C3%A9%0A100%25");
    }
}
