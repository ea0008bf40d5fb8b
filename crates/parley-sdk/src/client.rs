//! High-level `ParleyClient` wrapping the REST transport.

use std::sync::Arc;

use parley_common::config::ApiConfig;

use crate::entities::Server;
use crate::error::Result;
use crate::requests::RoleAction;
use crate::rest::RestClient;
use crate::transport::Transport;

/// Entry point for building requests.
///
/// ```rust,no_run
/// use parley_sdk::{ParleyClient, Snowflake};
///
/// #[tokio::main]
/// async fn main() -> parley_sdk::Result<()> {
///     let client = ParleyClient::new("Bot mytoken", None)?;
///     let server = client.rest.fetch_server(Snowflake::new(81384788765712384)).await?;
///     println!("can manage roles: {}", server.has_permission(parley_sdk::Permissions::MANAGE_ROLES));
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ParleyClient {
    pub rest: RestClient,
    transport: Arc<dyn Transport>,
}

impl ParleyClient {
    pub fn new(token: impl Into<String>, rest_url: Option<&str>) -> Result<Self> {
        Ok(Self::with_rest(RestClient::new(token, rest_url)?))
    }

    pub fn from_config(cfg: &ApiConfig) -> Result<Self> {
        Ok(Self::with_rest(RestClient::from_config(cfg)?))
    }

    fn with_rest(rest: RestClient) -> Self {
        let transport: Arc<dyn Transport> = Arc::new(rest.clone());
        Self { rest, transport }
    }

    /// Start building a new role in `server`.
    pub fn create_role(&self, server: Arc<Server>) -> RoleAction {
        RoleAction::new(Arc::clone(&self.transport), server)
    }
}
