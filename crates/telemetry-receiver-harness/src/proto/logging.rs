//! `google.logging.v2.LoggingServiceV2` request types.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::monitoring::MonitoredResource;

#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriteLogEntriesRequest {
    #[prost(string, tag = "1")]
    pub log_name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub resource: ::core::option::Option<MonitoredResource>,
    #[prost(btree_map = "string, string", tag = "3")]
    pub labels: BTreeMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "4")]
    pub entries: ::prost::alloc::vec::Vec<LogEntry>,
    #[prost(bool, tag = "5")]
    pub partial_success: bool,
    #[prost(bool, tag = "6")]
    pub dry_run: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WriteLogEntriesResponse {}

#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogEntry {
    #[prost(string, tag = "12")]
    pub log_name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "8")]
    pub resource: ::core::option::Option<MonitoredResource>,
    #[prost(string, tag = "3")]
    pub text_payload: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "9")]
    #[serde(deserialize_with = "super::ignore_volatile")]
    pub timestamp: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(enumeration = "LogSeverity", tag = "10")]
    #[serde(deserialize_with = "super::log_severity")]
    pub severity: i32,
    #[prost(string, tag = "4")]
    pub insert_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "7")]
    pub http_request: ::core::option::Option<HttpRequest>,
    #[prost(btree_map = "string, string", tag = "11")]
    pub labels: BTreeMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
    #[prost(string, tag = "22")]
    pub trace: ::prost::alloc::string::String,
    #[prost(string, tag = "27")]
    pub span_id: ::prost::alloc::string::String,
}

/// `google.logging.type.HttpRequest`
#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpRequest {
    #[prost(string, tag = "1")]
    pub request_method: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub request_url: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    #[serde(deserialize_with = "super::int64")]
    pub request_size: i64,
    #[prost(int32, tag = "4")]
    pub status: i32,
    #[prost(int64, tag = "5")]
    #[serde(deserialize_with = "super::int64")]
    pub response_size: i64,
    #[prost(string, tag = "6")]
    pub user_agent: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub remote_ip: ::prost::alloc::string::String,
    #[prost(string, tag = "13")]
    pub server_ip: ::prost::alloc::string::String,
    #[prost(string, tag = "8")]
    pub referer: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "14")]
    #[serde(deserialize_with = "super::ignore_volatile")]
    pub latency: ::core::option::Option<::prost_types::Duration>,
    #[prost(string, tag = "15")]
    pub protocol: ::prost::alloc::string::String,
}

/// `google.logging.type.LogSeverity`
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum LogSeverity {
    Default = 0,
    Debug = 100,
    Info = 200,
    Notice = 300,
    Warning = 400,
    Error = 500,
    Critical = 600,
    Alert = 700,
    Emergency = 800,
}
