//! Command-line arguments.

use clap::{Parser, Subcommand};
use parley_common::{Permissions, Snowflake};

#[derive(Debug, Parser)]
#[command(name = "parley", version, about = "Parley server administration from the terminal")]
pub struct Cli {
    /// Override `api.base_url` from the configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override `api.token` from the configuration
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a role in a server
    CreateRole(CreateRoleArgs),
}

#[derive(Debug, clap::Args)]
pub struct CreateRoleArgs {
    /// Target server id
    #[arg(long)]
    pub server: Snowflake,

    #[arg(long)]
    pub name: Option<String>,

    /// RGB colour as `#rrggbb`, `0xrrggbb` or decimal
    #[arg(long, value_parser = parse_color)]
    pub color: Option<i32>,

    /// Show members separately in the member list
    #[arg(long)]
    pub hoist: Option<bool>,

    #[arg(long)]
    pub mentionable: Option<bool>,

    /// Raw permission mask
    #[arg(long, conflicts_with = "grant", allow_negative_numbers = true)]
    pub permissions: Option<i64>,

    /// Permission to grant by name, e.g. `KICK_MEMBERS`; repeatable
    #[arg(long, value_parser = parse_permission)]
    pub grant: Vec<Permissions>,

    /// Audit-log reason
    #[arg(long)]
    pub reason: Option<String>,
}

impl CreateRoleArgs {
    /// The requested mask, from either `--permissions` or `--grant`.
    pub fn requested_permissions(&self) -> Option<i64> {
        if self.permissions.is_some() {
            return self.permissions;
        }
        if self.grant.is_empty() {
            return None;
        }
        Some(
            self.grant
                .iter()
                .fold(Permissions::empty(), |acc, &p| acc | p)
                .bits(),
        )
    }
}

pub fn parse_color(s: &str) -> Result<i32, String> {
    let hex = s.strip_prefix('#').or_else(|| s.strip_prefix("0x"));
    let parsed = match hex {
        Some(h) => i32::from_str_radix(h, 16),
        None => s.parse::<i32>(),
    };
    parsed.map_err(|e| format!("invalid colour {s:?}: {e}"))
}

pub fn parse_permission(s: &str) -> Result<Permissions, String> {
    Permissions::from_name(&s.to_ascii_uppercase()).ok_or_else(|| format!("unknown permission {s:?}"))
}
