mod config;

use std::sync::Arc;

use chirpy_api::{AppState, AppStateInner};
use chirpy_auth::password::{DEFAULT_ITERATIONS, DEFAULT_MEMORY_KIB};
use chirpy_auth::{PasswordHasher, TokenSigner};
use chirpy_db::{Database, StoreOptions};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,chirpy_api=debug,chirpy_db=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let db = Database::open_with(
        &config.db_path,
        StoreOptions {
            unique_emails: config.unique_emails,
        },
    )?;

    let hasher = match (config.argon2_memory_kib, config.argon2_iterations) {
        (None, None) => PasswordHasher::default(),
        (memory, iterations) => PasswordHasher::with_params(
            memory.unwrap_or(DEFAULT_MEMORY_KIB),
            iterations.unwrap_or(DEFAULT_ITERATIONS),
        )?,
    };

    let state: AppState = Arc::new(AppStateInner::new(
        db,
        TokenSigner::new(&config.jwt_secret),
        hasher,
        config.fileserver_root.clone(),
    ));

    let app = chirpy_api::router(state).layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Chirpy listening on {}", addr);
    info!(
        "Serving files from {} under /app/, store at {}",
        config.fileserver_root.display(),
        config.db_path.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let Ok(mut sigterm) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        else {
            ctrl_c.await.ok();
            info!("Received Ctrl+C, shutting down...");
            return;
        };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
