//! Role model and the role-creation request body.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::i64_from_string_or_number;
use crate::snowflake::Snowflake;

/// Bits of a colour value that carry the RGB triple.
pub const COLOR_MASK: i32 = 0xFF_FFFF;

/// A role as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleData {
    pub id: Snowflake,

    pub name: String,

    /// RGB colour, 0 meaning "no colour"
    #[serde(default)]
    pub color: u32,

    /// Whether this role is displayed separately in the member list
    #[serde(default)]
    pub hoist: bool,

    /// Position in the role hierarchy (higher = more power)
    #[serde(default)]
    pub position: i32,

    /// Permission bitfield
    #[serde(deserialize_with = "i64_from_string_or_number")]
    pub permissions: i64,

    /// Managed by an integration and not editable by members
    #[serde(default)]
    pub managed: bool,

    #[serde(default)]
    pub mentionable: bool,
}

/// Body of `POST /servers/{server_id}/roles`.
///
/// Only fields that were set are serialized; the server fills in defaults for
/// the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRolePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoist: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentionable: Option<bool>,
}

impl CreateRolePayload {
    /// Keep only the RGB bits of `rgb`; anything above 24 bits is dropped.
    pub fn mask_color(rgb: i32) -> u32 {
        (rgb & COLOR_MASK) as u32
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
