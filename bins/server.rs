use anyhow::Context;
use tracing::{error, info, warn};

/// Resolves on Ctrl+C. If the handler cannot be installed the server runs until killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received, draining in-flight requests"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();
    std::panic::set_hook(Box::new(|info| error!(message = %info, "panic")));

    let cfg = configs::AppConfig::load_or_env().context("loading configuration")?;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = cfg.server.worker_threads {
        builder.worker_threads(threads);
    }
    let runtime = builder.build().context("building tokio runtime")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        threads = ?cfg.server.worker_threads,
        database = if cfg.database.url.starts_with("sqlite:") { "sqlite" } else { "postgres" },
        "starting school records service"
    );
    runtime.block_on(server::run(cfg, shutdown_signal()))
}
