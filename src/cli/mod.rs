use anyhow::Context;
use clap::Parser;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::{self, AppConfig};
use crate::database::{
    CategoryRepository, DatabaseManager, MemoryCategoryRepository, PgCategoryRepository,
};
use crate::middleware::{ApiKeyAuthorizer, SharedAuthorizer};
use crate::AppState;

#[derive(Parser, Debug)]
#[command(name = "category-api")]
#[command(about = "Category CRUD API server")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Bind host (overrides API_HOST)")]
    pub host: Option<String>,

    #[arg(long, help = "Bind port (overrides API_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Keep categories in process memory instead of Postgres")]
    pub in_memory: bool,

    #[arg(long, help = "Do not create the category table on startup")]
    pub skip_migrate: bool,
}

impl Cli {
    /// Process configuration with command-line overrides applied
    pub fn resolve_config(&self) -> AppConfig {
        let mut resolved = config::config().clone();
        if let Some(host) = &self.host {
            resolved.api.host = host.clone();
        }
        if let Some(port) = self.port {
            resolved.api.port = port;
        }
        resolved
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config();
    tracing::info!("Starting category API in {:?} mode", config.environment);

    let (repository, pool): (Arc<dyn CategoryRepository>, Option<PgPool>) = if cli.in_memory {
        tracing::warn!("Using in-memory storage; data is lost on exit");
        let repository: Arc<dyn CategoryRepository> = Arc::new(MemoryCategoryRepository::new());
        (repository, None)
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        if !cli.skip_migrate {
            DatabaseManager::ensure_schema(&pool)
                .await
                .context("failed to prepare schema")?;
        }
        let repository: Arc<dyn CategoryRepository> = Arc::new(PgCategoryRepository::new(
            pool.clone(),
            config.database.statement_timeout(),
        ));
        (repository, Some(pool))
    };

    if config.security.api_key.is_empty() {
        tracing::warn!("API_KEY is not set; every request will be rejected");
    }
    let authorizer: SharedAuthorizer = Arc::new(ApiKeyAuthorizer::from_config(&config.security));

    let app = crate::app(AppState::new(repository, pool.clone()), authorizer, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Category API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Closed database pool");
    }
    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_bind_address() {
        let cli = Cli::parse_from(["category-api", "--host", "127.0.0.1", "--port", "8081"]);
        assert_eq!(cli.resolve_config().bind_addr(), "127.0.0.1:8081");
        assert!(!cli.in_memory);
    }

    #[test]
    fn in_memory_flag_parses() {
        let cli = Cli::parse_from(["category-api", "--in-memory", "--skip-migrate"]);
        assert!(cli.in_memory);
        assert!(cli.skip_migrate);
    }
}
