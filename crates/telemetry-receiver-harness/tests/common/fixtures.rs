//! Requests a proxy pair emits for one productpage -> ratings HTTP call.

use prost_types::Timestamp;
use telemetry_receiver_harness::prelude::*;

pub const CLIENT_REQUEST_COUNT: &str = "istio.io/service/client/request_count";
pub const SERVER_REQUEST_COUNT: &str = "istio.io/service/server/request_count";

pub fn client_request_count() -> TimeSeries {
    request_count(CLIENT_REQUEST_COUNT, "k8s_pod", "productpage-v1-84975bc778-pxz2w")
}

pub fn server_request_count() -> TimeSeries {
    request_count(SERVER_REQUEST_COUNT, "k8s_container", "ratings-v1-84975bc778-pxz2w")
}

fn request_count(metric_type: &str, resource_type: &str, pod_name: &str) -> TimeSeries {
    fixture::from_json(&format!(
        r#"{{
            "metric": {{
                "type": "{metric_type}",
                "labels": {{
                    "request_protocol": "http",
                    "response_code": "200",
                    "source_workload_name": "productpage-v1",
                    "destination_workload_name": "ratings-v1",
                    "destination_service_name": "server",
                    "mesh_uid": "mesh"
                }}
            }},
            "resource": {{
                "type": "{resource_type}",
                "labels": {{
                    "cluster_name": "test-cluster",
                    "location": "us-east4-b",
                    "namespace_name": "default",
                    "pod_name": "{pod_name}",
                    "project_id": "test-project"
                }}
            }},
            "metricKind": "CUMULATIVE",
            "valueType": "INT64",
            "points": [{{"value": {{"int64Value": 1}}}}]
        }}"#
    ))
    .unwrap()
}

pub fn server_access_log() -> WriteLogEntriesRequest {
    fixture::from_json(
        r#"{
            "logName": "projects/test-project/logs/server-accesslog-stackdriver",
            "resource": {
                "type": "k8s_container",
                "labels": {
                    "cluster_name": "test-cluster",
                    "location": "us-east4-b",
                    "namespace_name": "default",
                    "pod_name": "ratings-v1-84975bc778-pxz2w",
                    "project_id": "test-project"
                }
            },
            "labels": {
                "destination_name": "ratings-v1-84975bc778-pxz2w",
                "destination_workload": "ratings-v1",
                "mesh_uid": "mesh",
                "source_name": "productpage-v1-84975bc778-pxz2w",
                "source_workload": "productpage-v1"
            },
            "entries": [
                {
                    "severity": "INFO",
                    "timestamp": "2019-10-02T20:24:41Z",
                    "httpRequest": {
                        "requestMethod": "GET",
                        "requestUrl": "http://127.0.0.1:20250/echo",
                        "status": 200,
                        "latency": "0.004s",
                        "protocol": "http"
                    }
                }
            ]
        }"#,
    )
    .unwrap()
}

pub fn traffic_assertions() -> ReportTrafficAssertionsRequest {
    fixture::from_json(
        r#"{
            "parent": "projects/test-project",
            "meshUid": "mesh",
            "trafficAssertions": [
                {
                    "protocol": "PROTOCOL_HTTP",
                    "destinationServiceName": "server.default.svc.cluster.local",
                    "destinationServiceNamespace": "default",
                    "source": {
                        "uid": "kubernetes://productpage-v1-84975bc778-pxz2w.default",
                        "location": "us-east4-b",
                        "clusterName": "test-cluster",
                        "ownerUid": "kubernetes://api/apps/v1/namespaces/default/deployment/productpage-v1",
                        "workloadName": "productpage-v1",
                        "workloadNamespace": "default"
                    },
                    "destination": {
                        "uid": "kubernetes://ratings-v1-84975bc778-pxz2w.default",
                        "location": "us-east4-b",
                        "clusterName": "test-cluster",
                        "ownerUid": "kubernetes://api/apps/v1/namespaces/default/deployment/ratings-v1",
                        "workloadName": "ratings-v1",
                        "workloadNamespace": "default"
                    }
                }
            ]
        }"#,
    )
    .unwrap()
}

/// What the proxy actually sends: the fixture plus volatile fields filled in.
pub fn emitted_metrics(series: TimeSeries, seconds: i64) -> CreateTimeSeriesRequest {
    let mut series = series;
    for point in &mut series.points {
        point.interval = Some(telemetry_receiver_harness::proto::monitoring::TimeInterval {
            start_time: Some(Timestamp { seconds, nanos: 0 }),
            end_time: Some(Timestamp {
                seconds: seconds + 10,
                nanos: 0,
            }),
        });
    }
    CreateTimeSeriesRequest {
        name: "projects/test-project".to_string(),
        time_series: vec![series],
    }
}

pub fn emitted_access_log(seconds: i64) -> WriteLogEntriesRequest {
    let mut request = server_access_log();
    for entry in &mut request.entries {
        entry.timestamp = Some(Timestamp { seconds, nanos: 0 });
        if let Some(http) = entry.http_request.as_mut() {
            http.latency = Some(prost_types::Duration {
                seconds: 0,
                nanos: 3_917_000,
            });
        }
    }
    request
}

pub fn emitted_traffic_assertions(seconds: i64) -> ReportTrafficAssertionsRequest {
    ReportTrafficAssertionsRequest {
        timestamp: Some(Timestamp { seconds, nanos: 0 }),
        ..traffic_assertions()
    }
}
