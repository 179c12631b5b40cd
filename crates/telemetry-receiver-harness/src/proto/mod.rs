//! Wire contracts of the three telemetry ingestion services.
//!
//! Only the fields a proxy actually emits are declared; field tags follow the
//! upstream protos so requests produced by real clients decode unchanged.
//! Unknown fields are skipped by `prost` on decode.

pub mod logging;
pub mod mesh_edges;
pub mod monitoring;

use serde::{Deserialize, Deserializer};

/// Declares a serde adapter that reads a protobuf enum into the `i32` prost
/// stores, either by its upper-case name (`"CUMULATIVE"`, `"PROTOCOL_HTTP"`)
/// or by its number.
macro_rules! enum_by_name {
    ($name:ident, $ty:ty) => {
        pub(crate) fn $name<'de, D>(deserializer: D) -> Result<i32, D::Error>
        where
            D: Deserializer<'de>,
        {
            #[derive(Deserialize)]
            #[serde(untagged)]
            enum Repr {
                Name($ty),
                Number(i32),
            }

            Ok(match Repr::deserialize(deserializer)? {
                Repr::Name(value) => value as i32,
                Repr::Number(value) => value,
            })
        }
    };
}

enum_by_name!(metric_kind, monitoring::MetricKind);
enum_by_name!(value_type, monitoring::ValueType);
enum_by_name!(log_severity, logging::LogSeverity);
enum_by_name!(traffic_protocol, mesh_edges::Protocol);

/// Reads an `int64`, which the proto3 JSON mapping writes as a string
/// (`"10"`) but hand-written fixtures often give as a number.
pub(crate) fn int64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(i64),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(value) => Ok(value),
        Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

/// Fixtures never carry wall-clock values; whatever the JSON holds for a
/// timestamp or interval is skipped and the field stays unset.
pub(crate) fn ignore_volatile<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer)?;
    Ok(None)
}
