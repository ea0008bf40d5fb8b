//! Request builders that accumulate fields and then execute once.

mod role_action;

pub use role_action::RoleAction;
