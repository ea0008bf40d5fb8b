//! Client-side validation errors.
//!
//! These are raised synchronously while a request is being built, before
//! anything is sent over the network.

use crate::permissions::Permissions;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// A value was out of range or otherwise malformed.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The caller does not hold a permission it tried to grant.
    #[error("Missing permission: {}", .permission.name().unwrap_or("UNKNOWN"))]
    InsufficientPermission { permission: Permissions },
}

impl CheckError {
    /// Error code string for programmatic handling.
    pub fn error_code(&self) -> &str {
        match self {
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::InsufficientPermission { .. } => "MISSING_PERMISSION",
        }
    }
}
