//! `google.monitoring.v3.MetricService` request types.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTimeSeriesRequest {
    /// Project resource name, `projects/<project-id>`.
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub time_series: ::prost::alloc::vec::Vec<TimeSeries>,
}

impl CreateTimeSeriesRequest {
    /// First series whose metric type equals `metric_type`.
    pub fn find_series(&self, metric_type: &str) -> Option<&TimeSeries> {
        self.time_series
            .iter()
            .find(|series| series.metric_type() == metric_type)
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeSeries {
    #[prost(message, optional, tag = "1")]
    pub metric: ::core::option::Option<Metric>,
    #[prost(message, optional, tag = "2")]
    pub resource: ::core::option::Option<MonitoredResource>,
    #[prost(enumeration = "MetricKind", tag = "3")]
    #[serde(deserialize_with = "super::metric_kind")]
    pub metric_kind: i32,
    #[prost(enumeration = "ValueType", tag = "4")]
    #[serde(deserialize_with = "super::value_type")]
    pub value_type: i32,
    #[prost(message, repeated, tag = "5")]
    pub points: ::prost::alloc::vec::Vec<Point>,
}

impl TimeSeries {
    /// The metric type, or `""` when the series carries no metric.
    pub fn metric_type(&self) -> &str {
        self.metric
            .as_ref()
            .map(|m| m.r#type.as_str())
            .unwrap_or_default()
    }
}

/// `google.api.Metric`
#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metric {
    #[prost(string, tag = "3")]
    #[serde(rename = "type")]
    pub r#type: ::prost::alloc::string::String,
    #[prost(btree_map = "string, string", tag = "2")]
    pub labels: BTreeMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}

/// `google.api.MonitoredResource`, shared with the logging contract.
#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitoredResource {
    #[prost(string, tag = "1")]
    #[serde(rename = "type")]
    pub r#type: ::prost::alloc::string::String,
    #[prost(btree_map = "string, string", tag = "2")]
    pub labels: BTreeMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Point {
    #[prost(message, optional, tag = "1")]
    #[serde(deserialize_with = "super::ignore_volatile")]
    pub interval: ::core::option::Option<TimeInterval>,
    #[prost(message, optional, tag = "2")]
    pub value: ::core::option::Option<TypedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TimeInterval {
    #[prost(message, optional, tag = "2")]
    pub end_time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "1")]
    pub start_time: ::core::option::Option<::prost_types::Timestamp>,
}

#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(transparent)]
pub struct TypedValue {
    #[prost(oneof = "typed_value::Value", tags = "1, 2, 3, 4")]
    pub value: ::core::option::Option<typed_value::Value>,
}

pub mod typed_value {
    use serde::Deserialize;

    #[derive(Clone, PartialEq, ::prost::Oneof, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub enum Value {
        #[prost(bool, tag = "1")]
        BoolValue(bool),
        #[prost(int64, tag = "2")]
        #[serde(deserialize_with = "crate::proto::int64")]
        Int64Value(i64),
        #[prost(double, tag = "3")]
        DoubleValue(f64),
        #[prost(string, tag = "4")]
        StringValue(::prost::alloc::string::String),
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum MetricKind {
    MetricKindUnspecified = 0,
    Gauge = 1,
    Delta = 2,
    Cumulative = 3,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ValueType {
    ValueTypeUnspecified = 0,
    Bool = 1,
    Int64 = 2,
    Double = 3,
    String = 4,
    Distribution = 5,
    Money = 6,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    fn request_count(metric_type: &str, count: i64) -> TimeSeries {
        TimeSeries {
            metric: Some(Metric {
                r#type: metric_type.to_string(),
                labels: BTreeMap::from([("response_code".to_string(), "200".to_string())]),
            }),
            metric_kind: MetricKind::Cumulative as i32,
            value_type: ValueType::Int64 as i32,
            points: vec![Point {
                interval: None,
                value: Some(TypedValue {
                    value: Some(typed_value::Value::Int64Value(count)),
                }),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_metric_type_of_empty_series() {
        assert_eq!(TimeSeries::default().metric_type(), "");
    }

    #[test]
    fn test_find_series_by_metric_type() {
        let request = CreateTimeSeriesRequest {
            name: "projects/test-project".to_string(),
            time_series: vec![
                request_count("istio.io/service/client/request_count", 1),
                request_count("istio.io/service/server/request_count", 2),
            ],
        };

        let found = request
            .find_series("istio.io/service/server/request_count")
            .unwrap();
        assert_eq!(
            found.points[0].value.as_ref().unwrap().value,
            Some(typed_value::Value::Int64Value(2))
        );
        assert!(request.find_series("istio.io/service/server/bytes").is_none());
    }

    #[test]
    fn test_time_series_wire_decode() {
        let request = CreateTimeSeriesRequest {
            name: "projects/test-project".to_string(),
            time_series: vec![request_count("istio.io/service/server/request_count", 10)],
        };

        let decoded = CreateTimeSeriesRequest::decode(request.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, request);
        assert_eq!(decoded.time_series[0].metric_kind(), MetricKind::Cumulative);
    }
}
