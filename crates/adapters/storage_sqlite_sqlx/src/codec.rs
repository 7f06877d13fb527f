//! Column encodings shared by the repositories.

use std::str::FromStr;

use chrono::SecondsFormat;

use pumpctl_domain::time::Timestamp;

/// Timestamps are stored as fixed-width RFC 3339 text so that string order is
/// time order and an identical instant always encodes to the identical string.
pub(crate) fn encode_ts(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_ts(raw: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Parse a text column through its domain `FromStr`.
pub(crate) fn decode<T>(raw: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(raw).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
