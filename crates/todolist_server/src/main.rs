//! HTTP server entry point.
//!
//! # Responsibility
//! - Load configuration from the environment and start logging.
//! - Serve the todo list router until Ctrl-C.

use log::{info, warn};
use std::process::ExitCode;
use todolist_core::init_logging;
use todolist_web::{router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("todolist-server: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let config = ServerConfig::from_env().map_err(|err| err.to_string())?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    let state = AppState::from_config(&config).map_err(|err| err.to_string())?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|err| format!("failed to bind {}: {err}", config.bind_addr))?;
    info!(
        "event=server_listen module=server status=ok addr={} core_version={}",
        config.bind_addr,
        todolist_core::core_version()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| format!("server error: {err}"))?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        warn!("event=shutdown_signal module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
    info!("event=shutdown_signal module=server status=ok");
}
