//! Async REST client for the Parley API.

use std::time::Duration;

use async_trait::async_trait;
use parley_common::Snowflake;
use parley_common::config::{ApiConfig, DEFAULT_BASE_URL};
use parley_common::models::{MemberData, ServerData};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::entities::Server;
use crate::error::{ParleyError, Result};
use crate::route;
use crate::transport::{AUDIT_LOG_REASON_HEADER, RestRequest, Transport};

/// Async Parley REST client.
///
/// ```rust,no_run
/// use parley_sdk::{RestClient, Snowflake};
///
/// #[tokio::main]
/// async fn main() -> parley_sdk::Result<()> {
///     let rest = RestClient::new("Bot mytoken", None)?;
///     let server = rest.get_server(Snowflake::new(81384788765712384)).await?;
///     println!("{}", server.name);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(token: impl Into<String>, base_url: Option<&str>) -> Result<Self> {
        Self::build(token.into(), base_url.unwrap_or(DEFAULT_BASE_URL), None, None)
    }

    /// Build a client from loaded configuration, including timeout and user agent.
    pub fn from_config(cfg: &ApiConfig) -> Result<Self> {
        Self::build(
            cfg.token.clone(),
            &cfg.base_url,
            Some(&cfg.user_agent),
            Some(Duration::from_secs(cfg.timeout_secs)),
        )
    }

    fn build(
        token: String,
        base_url: &str,
        user_agent: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let token = if token.starts_with("Bot ") { token } else { format!("Bot {token}") };

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&token).map_err(|e| ParleyError::Other(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(ua) = user_agent {
            headers.insert(
                USER_AGENT,
                HeaderValue::from_str(ua).map_err(|e| ParleyError::Other(e.to_string()))?,
            );
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ParleyError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    async fn send(&self, request: RestRequest) -> Result<Value> {
        let RestRequest { route, body, reason } = request;
        let url = format!("{}{}", self.base_url, route.path);

        let mut req = self.client.request(route.method.clone(), &url);
        if let Some(b) = &body {
            req = req.json(b);
        }
        if let Some(reason) = reason {
            let value = HeaderValue::from_str(&reason)
                .map_err(|_| ParleyError::Other(format!("invalid audit log reason: {reason:?}")))?;
            req = req.header(AUDIT_LOG_REASON_HEADER, value);
        }

        tracing::debug!(%route, "sending request");
        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.json::<Value>().await.ok();
            let code = body
                .as_ref()
                .and_then(|v| v.get("error"))
                .and_then(Value::as_str)
                .map(str::to_owned);
            let message = body
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_owned)
                .or_else(|| code.clone())
                .unwrap_or_else(|| status.to_string());
            tracing::warn!(%route, status = status.as_u16(), %message, "request failed");
            return Err(ParleyError::Api { status: status.as_u16(), code, message });
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        Ok(resp.json::<Value>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, request: RestRequest) -> Result<T> {
        let value = self.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    // ── Servers ───────────────────────────────────────────────────────────────

    pub async fn get_server(&self, server_id: Snowflake) -> Result<ServerData> {
        let id = server_id.to_string();
        self.get(RestRequest::new(route::GET_SERVER.compile(&[&id]))).await
    }

    pub async fn get_self_member(&self, server_id: Snowflake) -> Result<MemberData> {
        let id = server_id.to_string();
        self.get(RestRequest::new(route::GET_SELF_MEMBER.compile(&[&id]))).await
    }

    /// Resolve a server together with the caller's permissions in it.
    pub async fn fetch_server(&self, server_id: Snowflake) -> Result<Server> {
        let (data, member) =
            tokio::try_join!(self.get_server(server_id), self.get_self_member(server_id))?;
        Ok(Server::from_data(&data, &member))
    }
}

#[async_trait]
impl Transport for RestClient {
    async fn execute(&self, request: RestRequest) -> Result<Value> {
        self.send(request).await
    }
}
