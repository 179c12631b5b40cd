use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::mpsc;

use super::{CapturedRequest, Received, TelemetryRequest};
use crate::proto::logging::WriteLogEntriesRequest;
use crate::proto::mesh_edges::ReportTrafficAssertionsRequest;
use crate::proto::monitoring::CreateTimeSeriesRequest;

/// Producer half of a capture channel, shared by every in-flight RPC of one kind.
///
/// Publishing never waits on the consumer: requests are buffered until read.
pub struct CaptureSink<T> {
    state: Arc<Mutex<SinkState<T>>>,
}

struct SinkState<T> {
    next_sequence: u64,
    tx: mpsc::UnboundedSender<Received<T>>,
}

impl<T> Clone for CaptureSink<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> CaptureSink<T> {
    /// Enqueue a request and return the sequence number it was captured
    /// under, or `None` when the consumer is gone.
    pub fn publish(&self, message: T) -> Option<u64> {
        // Sequence assignment and enqueue happen under one lock so that
        // sequence order is channel order.
        let mut state = self.state.lock().ok()?;
        let sequence = state.next_sequence;
        state.tx.send(Received::new(sequence, message)).ok()?;
        state.next_sequence += 1;
        Some(sequence)
    }

    pub fn is_closed(&self) -> bool {
        self.state
            .lock()
            .map(|state| state.tx.is_closed())
            .unwrap_or(true)
    }
}

/// Consumer half of a capture channel. FIFO by arrival.
pub struct CaptureChannel<T> {
    rx: mpsc::UnboundedReceiver<Received<T>>,
}

impl<T> CaptureChannel<T> {
    /// Wait for the next captured request; `None` once every sink is dropped
    /// and the buffer is empty.
    pub async fn recv(&mut self) -> Option<Received<T>> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Received<T>> {
        self.rx.try_recv().ok()
    }

    /// Take everything currently buffered without waiting.
    pub fn drain(&mut self) -> Vec<Received<T>> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<Received<T>>> {
        self.rx.poll_recv(cx)
    }
}

/// Create a connected sink/channel pair.
pub fn capture_channel<T>() -> (CaptureSink<T>, CaptureChannel<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink = CaptureSink {
        state: Arc::new(Mutex::new(SinkState { next_sequence: 0, tx })),
    };
    (sink, CaptureChannel { rx })
}

/// Producer halves for all three kinds, handed to the server gateway
#[derive(Clone)]
pub struct CaptureSinks {
    pub metrics: CaptureSink<CreateTimeSeriesRequest>,
    pub logging: CaptureSink<WriteLogEntriesRequest>,
    pub edges: CaptureSink<ReportTrafficAssertionsRequest>,
}

/// Consumer halves for all three kinds, handed to the test
pub struct CaptureChannels {
    pub metrics: CaptureChannel<CreateTimeSeriesRequest>,
    pub logging: CaptureChannel<WriteLogEntriesRequest>,
    pub edges: CaptureChannel<ReportTrafficAssertionsRequest>,
}

impl CaptureChannels {
    /// One stream of tagged requests fed by all three channels.
    ///
    /// Order within a kind is preserved; which kind yields first when several
    /// are ready is unspecified. The stream ends once all three channels are
    /// closed and empty.
    pub fn merged(&mut self) -> BoxStream<'_, CapturedRequest> {
        stream::select_all([
            tagged(&mut self.metrics),
            tagged(&mut self.logging),
            tagged(&mut self.edges),
        ])
        .boxed()
    }
}

fn tagged<T>(channel: &mut CaptureChannel<T>) -> BoxStream<'_, CapturedRequest>
where
    T: TelemetryRequest,
{
    stream::poll_fn(move |cx| channel.poll_recv(cx).map(|item| item.map(T::tag))).boxed()
}

/// Create the three sink/channel pairs a receiver needs.
pub fn capture_channels() -> (CaptureSinks, CaptureChannels) {
    let (metrics_sink, metrics) = capture_channel();
    let (logging_sink, logging) = capture_channel();
    let (edges_sink, edges) = capture_channel();
    (
        CaptureSinks {
            metrics: metrics_sink,
            logging: logging_sink,
            edges: edges_sink,
        },
        CaptureChannels {
            metrics,
            logging,
            edges,
        },
    )
}
