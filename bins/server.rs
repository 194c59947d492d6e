use std::process::ExitCode;

use tracing::{error, info};
use uuid::Uuid;

const SERVICE: &str = "job-board";

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(service = SERVICE, event = "signal_failed", error = %e, "cannot listen for Ctrl+C");
        // without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    info!(service = SERVICE, event = "shutdown_signal", "received Ctrl+C, draining in-flight requests");
}

fn main() -> ExitCode {
    // .env first so RUST_LOG, LOG_FORMAT and DATABASE_URL take effect
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    let pid = std::process::id();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = SERVICE, event = "panic", %instance, pid, message = %info, "unhandled panic");
    }));

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = SERVICE, event = "config_failed", error = %e, "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = cfg.server.worker_threads {
        builder.worker_threads(threads);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = SERVICE, event = "runtime_build_failed", error = %e, "cannot build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = SERVICE,
        event = "start",
        %instance,
        pid,
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "job board starting"
    );

    match rt.block_on(server::run(cfg, shutdown_signal())) {
        Ok(()) => {
            info!(service = SERVICE, event = "stop", %instance, pid, "job board stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = SERVICE, event = "run_failed", error = %e, "job board exited with error");
            ExitCode::FAILURE
        }
    }
}
