//! `google.cloud.meshtelemetry.v1alpha1.MeshEdgesService` request types.

use serde::Deserialize;

#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportTrafficAssertionsRequest {
    /// `projects/<project-id>`
    #[prost(string, tag = "1")]
    pub parent: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub mesh_uid: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub traffic_assertions: ::prost::alloc::vec::Vec<TrafficAssertion>,
    #[prost(message, optional, tag = "4")]
    #[serde(deserialize_with = "super::ignore_volatile")]
    pub timestamp: ::core::option::Option<::prost_types::Timestamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReportTrafficAssertionsResponse {}

/// One observed edge between two workload instances.
#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrafficAssertion {
    #[prost(message, optional, tag = "1")]
    pub source: ::core::option::Option<WorkloadInstance>,
    #[prost(message, optional, tag = "2")]
    pub destination: ::core::option::Option<WorkloadInstance>,
    #[prost(enumeration = "Protocol", tag = "3")]
    #[serde(deserialize_with = "super::traffic_protocol")]
    pub protocol: i32,
    #[prost(string, tag = "4")]
    pub destination_service_name: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub destination_service_namespace: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkloadInstance {
    #[prost(string, tag = "1")]
    pub uid: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub location: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub cluster_name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub owner_uid: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub workload_name: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub workload_namespace: ::prost::alloc::string::String,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum Protocol {
    ProtocolUnspecified = 0,
    ProtocolHttp = 1,
    ProtocolHttps = 2,
    ProtocolTcp = 3,
    ProtocolGrpc = 4,
}
