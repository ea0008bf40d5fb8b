//! # Parley CLI
//!
//! Loads the client configuration, resolves the current user's permissions in
//! the target server and runs one request builder per invocation.

mod args;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use parley_common::config::{self, Overrides};
use parley_sdk::ParleyClient;

use args::{Cli, Command, CreateRoleArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=info,parley_sdk=info".into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    config::init(Overrides {
        base_url: cli.base_url,
        token: cli.token,
    })
    .context("failed to load configuration")?;

    let client = ParleyClient::from_config(&config::get().api)?;
    tracing::debug!(base_url = %client.rest.base_url(), "client ready");

    match cli.command {
        Command::CreateRole(args) => create_role(&client, args).await,
    }
}

async fn create_role(client: &ParleyClient, args: CreateRoleArgs) -> anyhow::Result<()> {
    let server = client
        .rest
        .fetch_server(args.server)
        .await
        .with_context(|| format!("failed to load server {}", args.server))?;
    tracing::info!(server = %server.name, permissions = ?server.self_permissions, "resolved server");

    let mut action = client.create_role(Arc::new(server));
    action
        .color(args.color)
        .hoisted(args.hoist)
        .mentionable(args.mentionable)
        .permissions(args.requested_permissions())?;
    if let Some(name) = &args.name {
        action.name(name.as_str());
    }
    if let Some(reason) = &args.reason {
        action.reason(reason.as_str());
    }

    match action.execute().await? {
        Some(role) => {
            tracing::info!(role_id = %role.id, "role created");
            println!("{}", serde_json::to_string_pretty(&role.to_data())?);
        }
        None => tracing::warn!("role creation was skipped"),
    }
    Ok(())
}
