//! Deserializers for fields the API may send as either JSON numbers or strings.
//!
//! Ids and permission masks can exceed 2^53, so the platform encodes them as
//! decimal strings; older payloads and tests still use plain numbers.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntOrString {
    U64(u64),
    I64(i64),
    String(String),
}

pub fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrString::deserialize(deserializer)? {
        IntOrString::U64(v) => Ok(v),
        IntOrString::I64(v) => u64::try_from(v).map_err(D::Error::custom),
        IntOrString::String(s) => s.parse::<u64>().map_err(D::Error::custom),
    }
}

pub fn i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrString::deserialize(deserializer)? {
        IntOrString::U64(v) => i64::try_from(v).map_err(D::Error::custom),
        IntOrString::I64(v) => Ok(v),
        IntOrString::String(s) => s.parse::<i64>().map_err(D::Error::custom),
    }
}
