//! Server (guild) model — the community container roles belong to.

use serde::{Deserialize, Serialize};

use super::role::RoleData;
use crate::snowflake::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerData {
    /// Also the id of the server's @everyone role
    pub id: Snowflake,

    pub name: String,

    pub owner_id: Snowflake,

    #[serde(default)]
    pub roles: Vec<RoleData>,
}

impl ServerData {
    /// The @everyone role, which shares the server's id.
    pub fn everyone_role(&self) -> Option<&RoleData> {
        self.roles.iter().find(|r| r.id == self.id)
    }
}
