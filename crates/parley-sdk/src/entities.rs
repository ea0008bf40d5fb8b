//! Client-side entities decoded from API payloads.

use std::sync::Arc;

use parley_common::Permissions;
use parley_common::Snowflake;
use parley_common::models::{MemberData, RoleData, ServerData};
use parley_common::permissions::compute_server_permissions;
use serde_json::Value;

use crate::error::Result;

// ── Server ────────────────────────────────────────────────────────────────────

/// A server as seen by the current user.
///
/// `self_permissions` is a cached snapshot; the API re-checks every request,
/// so a stale value only means a local check passes or fails early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
    pub self_user_id: Snowflake,
    pub self_permissions: Permissions,
}

impl Server {
    pub fn new(
        id: Snowflake,
        name: impl Into<String>,
        owner_id: Snowflake,
        self_user_id: Snowflake,
        self_permissions: Permissions,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            owner_id,
            self_user_id,
            self_permissions,
        }
    }

    /// Build from the server payload and the current user's membership.
    pub fn from_data(data: &ServerData, member: &MemberData) -> Self {
        let everyone = data
            .everyone_role()
            .map(|r| Permissions::from_bits_truncate(r.permissions))
            .unwrap_or_else(Permissions::empty);

        let assigned: Vec<Permissions> = data
            .roles
            .iter()
            .filter(|r| member.roles.contains(&r.id))
            .map(|r| Permissions::from_bits_truncate(r.permissions))
            .collect();

        let is_owner = data.owner_id == member.user_id;

        Self {
            id: data.id,
            name: data.name.clone(),
            owner_id: data.owner_id,
            self_user_id: member.user_id,
            self_permissions: compute_server_permissions(everyone, &assigned, is_owner),
        }
    }

    /// Whether the current user holds `permission` here.
    pub fn has_permission(&self, permission: Permissions) -> bool {
        self.self_permissions.has(permission)
    }
}

// ── Role ──────────────────────────────────────────────────────────────────────

/// A role attached to a [`Server`].
#[derive(Debug, Clone)]
pub struct Role {
    pub id: Snowflake,
    pub server_id: Snowflake,
    pub name: String,
    /// `None` when the role has no colour
    pub color: Option<u32>,
    pub hoisted: bool,
    pub mentionable: bool,
    pub managed: bool,
    pub position: i32,
    pub permissions: Permissions,
    server: Arc<Server>,
}

impl Role {
    pub fn server(&self) -> &Arc<Server> {
        &self.server
    }

    /// Whether this is the server's @everyone role.
    pub fn is_public_role(&self) -> bool {
        self.id == self.server_id
    }

    /// Back to the wire representation.
    pub fn to_data(&self) -> RoleData {
        RoleData {
            id: self.id,
            name: self.name.clone(),
            color: self.color.unwrap_or(0),
            hoist: self.hoisted,
            position: self.position,
            permissions: self.permissions.bits(),
            managed: self.managed,
            mentionable: self.mentionable,
        }
    }
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Turns raw response bodies into entities.
pub struct EntityBuilder;

impl EntityBuilder {
    pub fn create_role(server: &Arc<Server>, json: Value, server_id: Snowflake) -> Result<Role> {
        let data: RoleData = serde_json::from_value(json)?;

        let permissions = Permissions::from_bits_truncate(data.permissions);
        if permissions.bits() != data.permissions {
            tracing::debug!(
                role_id = %data.id,
                raw = data.permissions,
                "dropping unknown permission bits"
            );
        }

        Ok(Role {
            id: data.id,
            server_id,
            name: data.name,
            color: (data.color != 0).then_some(data.color),
            hoisted: data.hoist,
            mentionable: data.mentionable,
            managed: data.managed,
            position: data.position,
            permissions,
            server: Arc::clone(server),
        })
    }
}
