//! Booping live client
//!
//! Logs in, loads the directory, then stays connected: server events and
//! typed commands are handled one at a time on a single loop.

use anyhow::Context;
use booping::app::{App, Command, TerminalView, HELP};
use booping::config::Config;
use booping::logging::init_logging;
use booping::realtime::{self, EventDispatcher, RealtimeEvent};
use booping::BoopClient;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Parser)]
#[command(name = "booping")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live terminal client for a boop server")]
struct Args {
    /// Config file (default: search the usual locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Boop server URL
    #[arg(long)]
    server: Option<String>,

    /// Login name (password comes from config or BOOPING_PASSWORD)
    #[arg(short, long)]
    username: Option<String>,

    /// Disable coloured notifications
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load_default(args.config.as_deref())?;
    if let Some(server) = args.server {
        config.server.base_url = server;
    }
    if let Some(username) = args.username {
        config.server.username = Some(username);
    }

    init_logging(&config.logging)?;
    tracing::info!("Booping v{}", env!("CARGO_PKG_VERSION"));

    let (username, password) = config
        .server
        .credentials()
        .context("No login configured: set server.username and server.password, or BOOPING_USERNAME and BOOPING_PASSWORD")?;

    let client = BoopClient::new(&config.server.base_url, config.server.request_timeout())?;
    let me = client
        .login(username, password)
        .await
        .with_context(|| format!("Cannot log in to {}", config.server.base_url))?;
    println!("Logged in as {} (#{})", me.display_name, me.id);

    let socket = realtime::socket_url(client.base_url(), &config.server.socket_path)?;
    let cookie = client.cookie_header();
    let client = Arc::new(client);

    let color = config.display.color && !args.no_color;
    let mut app = App::new(client.clone(), Box::new(TerminalView::stdout(color)));
    let mut dispatcher = EventDispatcher::new();
    App::register_handlers(&mut dispatcher);

    let mut events = match realtime::connect(&socket, cookie.as_deref()).await {
        Ok((handle, events)) => {
            app.attach_realtime(handle);
            Some(events)
        }
        Err(e) => {
            tracing::error!(url = %socket, error = %e, "Real-time connection failed");
            None
        }
    };

    app.refresh_all().await;
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = next_event(&mut events) => match event {
                Some(event) => {
                    dispatcher.dispatch(&mut app, &event);
                }
                None => events = None,
            },
            line = lines.next_line() => match line? {
                Some(line) => match line.parse::<Command>() {
                    Ok(command) => {
                        if !app.handle_command(command).await {
                            break;
                        }
                    }
                    Err(e) => eprintln!("{}", e),
                },
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::info!("Shutting down...");
    if let Err(e) = client.logout().await {
        tracing::warn!(error = %e, "Logout failed");
    }
    Ok(())
}

/// Next real-time event, or never once the socket is gone
async fn next_event(
    events: &mut Option<UnboundedReceiver<RealtimeEvent>>,
) -> Option<RealtimeEvent> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
