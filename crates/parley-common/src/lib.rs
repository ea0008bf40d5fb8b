//! # parley-common
//!
//! Shared permissions, ids, wire models, client-side checks and configuration
//! used by the Parley client crates. Nothing in here performs I/O.

pub mod checks;
pub mod config;
pub mod error;
pub mod models;
pub mod permissions;
pub mod serde_helpers;
pub mod snowflake;

pub use error::CheckError;
pub use permissions::{ALL_PERMISSIONS, Permissions};
pub use snowflake::Snowflake;
