use std::{io::Write as _, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{GraphQlGateway, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod dispatch;
mod render;

use commands::{parse_command, ConsoleCommand};
use config::{load_settings, normalize_api_url};

#[derive(Parser, Debug)]
#[command(about = "Manage users against a GraphQL users API")]
struct Args {
    /// Users API endpoint, e.g. http://localhost:4000/graphql
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file; defaults to ./users-console.toml when present
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let endpoint = normalize_api_url(&settings.api_url)?;
    let gateway = GraphQlGateway::with_timeout(endpoint.clone(), settings.request_timeout())
        .context("failed to build users api client")?;
    info!(endpoint = %endpoint, "console: starting session");

    let session = Arc::new(Session::new(Arc::new(gateway)));
    if let Err(err) = session.mount().await {
        warn!("console: initial list load failed: {err}");
    }
    print!("{}", render::render_session(&session.view().await));
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(ConsoleCommand::Quit)) => break,
            Ok(Some(command)) => {
                if let Some(out) = dispatch::dispatch(&session, command).await {
                    println!("{}", out.trim_end());
                }
            }
            Err(err) => eprintln!("{err}"),
        }
        prompt()?;
    }

    info!("console: session closed");
    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush().context("failed to flush stdout")
}
