mod config;
mod handlers;
mod models;
mod page;
mod qr;
mod routes;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::AppState;

fn die(msg: &str) -> ! {
    error!("{msg}");
    std::process::exit(1);
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("无法监听 Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            // 配置无效时日志系统尚未初始化，先用默认级别
            tracing_subscriber::fmt().init();
            die(&e.to_string());
        }
    };
    init_tracing(&config);

    let addr = config.socket_addr();
    let app = routes::build_router(Arc::new(AppState::new(&config)));

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => die(&format!("Failed to bind {addr}: {e}")),
    };
    info!(
        "QR code generator listening on http://{} (debug: {})",
        addr, config.debug
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        die(&format!("Server error: {e}"));
    }
}
