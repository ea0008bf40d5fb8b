//! Wire models exchanged with the REST API.
//!
//! These mirror the JSON the server sends and accepts. Client-side entities
//! with behaviour attached live in the SDK and are decoded from these.

pub mod member;
pub mod role;
pub mod server;

pub use member::*;
pub use role::*;
pub use server::*;
