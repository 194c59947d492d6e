use std::{env, future::Future, io, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{routes, state::ServerState};
use service::jobs::{repo::seaorm::SeaOrmJobRepository, JobService};

/// Cross-origin access is allowed from anywhere.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load configuration from the config file, or from env vars when there is none.
pub fn load_config() -> anyhow::Result<AppConfig> {
    config_or_env(configs::load_default())
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>().is_some_and(|io| io.kind() == io::ErrorKind::NotFound)
}

/// Only a missing file falls back to the environment; a file that exists but
/// fails to parse is an error.
fn config_or_env(loaded: anyhow::Result<AppConfig>) -> anyhow::Result<AppConfig> {
    let mut cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) if is_missing_file(&e) => {
            warn!(error = %e, "no config file; falling back to environment");
            from_env()
        }
        Err(e) => return Err(e.context("invalid config file")),
    };
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

fn from_env() -> AppConfig {
    let mut cfg = AppConfig::default();
    if let Ok(host) = env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    if let Some(w) = env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
        cfg.server.worker_threads = Some(w);
    }
    cfg.database.url = models::db::DATABASE_URL.clone();
    cfg
}

fn bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Connect the store and assemble the router around it.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::from(&cfg.database)).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    let repo = Arc::new(SeaOrmJobRepository::new(db));
    let state = ServerState::new(JobService::new(repo));
    Ok(routes::build_router(state, build_cors()))
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server drained");
    Ok(())
}

/// Build the app from an already loaded config and serve it until `shutdown`.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting job board server");
    let listener = TcpListener::bind(addr).await?;
    serve(listener, app, shutdown).await
}
