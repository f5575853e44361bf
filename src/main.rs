//! Library Gateway
//!
//! ```text
//!                ┌──────────────┐    ┌─────────────┐
//!  HTTP ────────▶│   Gateway    │───▶│ reservation │
//!  X-User-Name   │ (axum)       │    ├─────────────┤
//!                │ Coordinator  │───▶│   library   │
//!                │              │    ├─────────────┤
//!                └──────────────┘───▶│   rating    │
//!                                    └─────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use library_gateway::config::AppConfig;
use library_gateway::gateway;
use library_gateway::library::LibraryCoordinator;
use library_gateway::logging::init_logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config =
        AppConfig::load(&env).with_context(|| format!("loading config for env '{}'", env))?;
    let _log_guard = init_logging(&app_config);

    tracing::info!("Starting library gateway in {} mode", env);

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    let services = &app_config.services;
    tracing::info!(
        reservation = %services.reservation_url,
        library = %services.library_url,
        rating = %services.rating_url,
        timeout_ms = services.request_timeout_ms,
        max_conns_per_host = services.max_conns_per_host,
        "downstream services"
    );

    let coordinator = LibraryCoordinator::from_config(services)
        .context("building downstream clients")?;

    gateway::run_server(&app_config.gateway.host, port, Arc::new(coordinator))
        .await
        .with_context(|| format!("serving on {}:{}", app_config.gateway.host, port))?;

    tracing::info!("gateway stopped");
    Ok(())
}
