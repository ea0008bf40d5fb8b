//! Member model — a user's membership in a specific server.

use serde::{Deserialize, Serialize};

use crate::snowflake::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberData {
    pub user_id: Snowflake,

    /// Server-specific nickname
    #[serde(default)]
    pub nickname: Option<String>,

    /// Role IDs assigned to this member, not including @everyone
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}
