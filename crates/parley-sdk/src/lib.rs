//! Parley client SDK for Rust.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use parley_sdk::{ParleyClient, Snowflake};
//!
//! #[tokio::main]
//! async fn main() -> parley_sdk::Result<()> {
//!     let client = ParleyClient::new("Bot mytoken", None)?;
//!     let server = Arc::new(client.rest.fetch_server(Snowflake::new(81384788765712384)).await?);
//!
//!     let mut action = client.create_role(server);
//!     action.name("Admins").hoisted(true);
//!
//!     if let Some(role) = action.execute().await? {
//!         println!("created {} ({})", role.name, role.id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod entities;
pub mod error;
pub mod requests;
pub mod rest;
pub mod route;
pub mod transport;

pub use client::ParleyClient;
pub use entities::{EntityBuilder, Role, Server};
pub use error::{ParleyError, Result};
pub use parley_common::{ALL_PERMISSIONS, CheckError, Permissions, Snowflake};
pub use requests::RoleAction;
pub use rest::RestClient;
pub use transport::{RestRequest, Transport};
