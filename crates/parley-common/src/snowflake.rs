//! Snowflake IDs.
//!
//! Every entity on the platform is identified by a 64-bit snowflake. The upper
//! 42 bits hold milliseconds since [`EPOCH_MILLIS`], so ids sort by creation
//! time. On the wire they travel as decimal strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::serde_helpers::u64_from_string_or_number;

/// 2015-01-01T00:00:00Z in Unix milliseconds.
pub const EPOCH_MILLIS: i64 = 1_420_070_400_000;

const TIMESTAMP_SHIFT: u32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(u64);

impl Snowflake {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Extract the creation timestamp encoded in the id.
    pub fn timestamp(self) -> Option<chrono::DateTime<chrono::Utc>> {
        let ms = (self.0 >> TIMESTAMP_SHIFT) as i64 + EPOCH_MILLIS;
        chrono::DateTime::from_timestamp_millis(ms)
    }

    /// Smallest id that could have been created at `time`.
    pub fn from_timestamp(time: chrono::DateTime<chrono::Utc>) -> Self {
        let ms = (time.timestamp_millis() - EPOCH_MILLIS).max(0) as u64;
        Self(ms << TIMESTAMP_SHIFT)
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64_from_string_or_number(deserializer).map(Self)
    }
}
