//! Argument checks used by request builders.

use crate::error::CheckError;

/// Fail with [`CheckError::InvalidArgument`] unless `condition` holds.
pub fn check(condition: bool, message: &str) -> Result<(), CheckError> {
    if condition {
        Ok(())
    } else {
        Err(CheckError::InvalidArgument {
            message: message.to_owned(),
        })
    }
}

/// Fail if `value` is negative.
pub fn not_negative(value: i64, name: &str) -> Result<(), CheckError> {
    check(value >= 0, &format!("{name} may not be negative"))
}
